// Copyright (c) 2025 Spendwise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use spendwise::{cache, cli, commands};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("spendwise=warn")),
        )
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    // The server owns its own database; everything else goes through the
    // client cache.
    if let Some(("serve", sub)) = matches.subcommand() {
        return commands::serve::handle(sub);
    }

    let conn = cache::open_or_init()?;
    match matches.subcommand() {
        Some(("tx", sub)) => commands::transactions::handle(&conn, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&conn, sub)?,
        Some(("report", sub)) => commands::reports::handle(&conn, sub)?,
        Some(("insights", sub)) => commands::insights::handle(&conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
