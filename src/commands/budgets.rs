// Copyright (c) 2025 Spendwise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::cache;
use crate::models::{Budget, Category, Kind, Record};
use crate::remote::HttpRemote;
use crate::sync::SyncStore;
use crate::utils::{fmt_money, maybe_print_json, parse_amount, pretty_table, sync_banner};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub),
        Some(("list", sub)) => list(conn, sub),
        Some(("status", sub)) => status(conn, sub),
        _ => Ok(()),
    }
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let category: Category = sub.get_one::<String>("category").unwrap().parse()?;
    let limit = parse_amount(sub.get_one::<String>("limit").unwrap())?;
    cache::save_budget(conn, &Budget { category, limit })?;
    println!("Budget set: {} = {}/month", category, fmt_money(&limit));
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let budgets = cache::load_budgets(conn)?;
    if !maybe_print_json(json_flag, jsonl_flag, &budgets)? {
        let rows: Vec<Vec<String>> = budgets
            .iter()
            .map(|b| vec![b.category.to_string(), fmt_money(&b.limit)])
            .collect();
        println!("{}", pretty_table(&["Category", "Monthly limit"], rows));
    }
    Ok(())
}

#[derive(Serialize)]
pub struct BudgetStatusRow {
    pub category: Category,
    pub limit: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
}

fn status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = match sub.get_one::<String>("month") {
        Some(m) => m.to_string(),
        None => Utc::now().date_naive().format("%Y-%m").to_string(),
    };

    let budgets = cache::load_budgets(conn)?;
    if budgets.is_empty() {
        println!("No budgets configured. Use 'budget set' first.");
        return Ok(());
    }

    let store = SyncStore::new(conn, HttpRemote::from_env()?);
    let (records, availability) = store.fetch_all()?;
    let data = status_rows(&budgets, &records, &month);

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|row| {
                vec![
                    row.category.to_string(),
                    fmt_money(&row.limit),
                    fmt_money(&row.spent),
                    fmt_money(&row.remaining),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Limit", "Spent", "Remaining"], rows)
        );
        println!("{}", sync_banner(availability));
    }
    Ok(())
}

/// Spending for `month` (YYYY-MM) against each configured limit.
pub fn status_rows(budgets: &[Budget], records: &[Record], month: &str) -> Vec<BudgetStatusRow> {
    budgets
        .iter()
        .map(|b| {
            let spent: Decimal = records
                .iter()
                .filter(|r| {
                    r.kind == Kind::Expense
                        && r.category == b.category
                        && r.date.format("%Y-%m").to_string() == month
                })
                .map(|r| r.amount)
                .sum();
            BudgetStatusRow {
                category: b.category,
                limit: b.limit,
                spent,
                remaining: b.limit - spent,
            }
        })
        .collect()
}
