// Copyright (c) 2025 Spendwise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use rusqlite::{params, Connection};

use crate::models::{Category, Kind, Record};

pub fn default_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from("com.spendwise", "Spendwise", "spendwise")
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("spendwise-server.sqlite"))
}

pub fn open_or_init(path: &Path) -> Result<Connection> {
    let conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS transactions(
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        amount TEXT NOT NULL,
        date TEXT NOT NULL,
        category TEXT NOT NULL,
        kind TEXT NOT NULL CHECK(kind IN ('expense','income')),
        description TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
    "#,
    )?;
    Ok(())
}

pub fn list(conn: &Connection) -> Result<Vec<Record>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, amount, date, category, kind, description
         FROM transactions ORDER BY date DESC, id DESC",
    )?;
    let mut rows = stmt.query([])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: String = r.get(0)?;
        let title: String = r.get(1)?;
        let amount: String = r.get(2)?;
        let date: String = r.get(3)?;
        let category: String = r.get(4)?;
        let kind: String = r.get(5)?;
        let description: Option<String> = r.get(6)?;
        data.push(Record {
            id,
            title,
            amount: crate::utils::parse_decimal(&amount)?,
            date: crate::utils::parse_date(&date)?,
            category: Category::from_str(&category)?,
            kind: Kind::from_str(&kind)?,
            description,
        });
    }
    Ok(data)
}

pub fn upsert(conn: &Connection, record: &Record) -> Result<()> {
    conn.execute(
        "INSERT INTO transactions(id, title, amount, date, category, kind, description)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(id) DO UPDATE SET
             title=excluded.title,
             amount=excluded.amount,
             date=excluded.date,
             category=excluded.category,
             kind=excluded.kind,
             description=excluded.description",
        params![
            record.id,
            record.title,
            record.amount.to_string(),
            record.date.to_string(),
            record.category.as_str(),
            record.kind.as_str(),
            record.description
        ],
    )?;
    Ok(())
}

/// Deleting an id that is not present still succeeds.
pub fn delete(conn: &Connection, id: &str) -> Result<()> {
    conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    Ok(())
}
