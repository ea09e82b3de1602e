// Copyright (c) 2025 Spendwise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;

use crate::server;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let port = match m.get_one::<u16>("port") {
        Some(p) => *p,
        None => std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000),
    };
    let db_path = match m.get_one::<String>("db") {
        Some(p) => PathBuf::from(p),
        None => match std::env::var("SPENDWISE_DB") {
            Ok(p) => PathBuf::from(p),
            Err(_) => server::store::default_path()?,
        },
    };

    let conn = server::store::open_or_init(&db_path)?;
    println!(
        "Serving record store on port {} (db: {})",
        port,
        db_path.display()
    );
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(server::run(addr, conn))
}
