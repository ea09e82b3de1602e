// Copyright (c) 2025 Spendwise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The thin server: a REST surface over one relational table of records.

pub mod handlers;
pub mod routes;
pub mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use rusqlite::Connection;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
}

pub async fn run(addr: SocketAddr, conn: Connection) -> Result<()> {
    let state = AppState {
        db: Arc::new(Mutex::new(conn)),
    };
    let app = routes::api_routes().with_state(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("record store listening on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
