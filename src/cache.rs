// Copyright (c) 2025 Spendwise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Last-known-good copy of the record list, plus the budget list, kept as
//! opaque JSON blobs in a per-user SQLite file. This is the client-side
//! fallback store the sync facade reads when the remote store is down.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{params, Connection, OptionalExtension};
use std::fs;
use std::path::PathBuf;

use crate::models::{Budget, Record};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.spendwise", "Spendwise", "spendwise"));

const RECORDS_KEY: &str = "transactions_backup";
const BUDGETS_KEY: &str = "budgets";

pub fn cache_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("spendwise.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = cache_path()?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open cache at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS cache(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );
    "#,
    )?;
    Ok(())
}

fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM cache WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

fn put(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO cache(key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// Missing or never-written entry reads as an empty list.
pub fn load_records(conn: &Connection) -> Result<Vec<Record>> {
    match get(conn, RECORDS_KEY)? {
        Some(blob) => serde_json::from_str(&blob).context("Corrupt cached record list"),
        None => Ok(Vec::new()),
    }
}

/// Full replace of the cached list, never a merge.
pub fn store_records(conn: &Connection, records: &[Record]) -> Result<()> {
    put(conn, RECORDS_KEY, &serde_json::to_string(records)?)
}

pub fn load_budgets(conn: &Connection) -> Result<Vec<Budget>> {
    match get(conn, BUDGETS_KEY)? {
        Some(blob) => serde_json::from_str(&blob).context("Corrupt cached budget list"),
        None => Ok(Vec::new()),
    }
}

/// At most one budget per category; saving again overwrites the old limit.
pub fn save_budget(conn: &Connection, budget: &Budget) -> Result<()> {
    let mut budgets = load_budgets(conn)?;
    match budgets.iter_mut().find(|b| b.category == budget.category) {
        Some(slot) => *slot = budget.clone(),
        None => budgets.push(budget.clone()),
    }
    put(conn, BUDGETS_KEY, &serde_json::to_string(&budgets)?)
}
