// Copyright (c) 2025 Spendwise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::insights;
use crate::remote::HttpRemote;
use crate::sync::SyncStore;
use crate::utils::{maybe_print_json, sync_banner};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");

    let store = SyncStore::new(conn, HttpRemote::from_env()?);
    let (records, availability) = store.fetch_all()?;

    // "Too few records" and "the endpoint failed" intentionally render the
    // same empty state.
    match insights::financial_insights(&records) {
        Some(insight) => {
            if !maybe_print_json(json_flag, jsonl_flag, &insight)? {
                println!("Summary:");
                println!("  {}", insight.summary);
                println!();
                println!("Recommendations:");
                for tip in &insight.recommendations {
                    println!("  - {}", tip);
                }
                println!();
                println!("Savings potential:");
                println!("  {}", insight.savings_potential);
            }
        }
        None => {
            println!("No insights available yet. Add more records or try again later.");
        }
    }
    if !json_flag && !jsonl_flag && !availability.is_remote() {
        println!();
        println!("{}", sync_banner(availability));
    }
    Ok(())
}
