// Copyright (c) 2025 Spendwise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Aggregates over whatever list the sync facade returns. The charts the
//! web dashboard drew become tables with proportional bars here.

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Category, Kind, Record};
use crate::remote::HttpRemote;
use crate::sync::{Availability, SyncStore};
use crate::utils::{fmt_money, maybe_print_json, pretty_table, sync_banner};

const BAR_WIDTH: usize = 24;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub),
        Some(("categories", sub)) => categories(conn, sub),
        Some(("daily", sub)) => daily(conn, sub),
        _ => Ok(()),
    }
}

fn fetch(conn: &Connection) -> Result<(Vec<Record>, Availability)> {
    SyncStore::new(conn, HttpRemote::from_env()?).fetch_all()
}

#[derive(Serialize)]
pub struct Summary {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

pub fn summarize(records: &[Record]) -> Summary {
    let income: Decimal = records
        .iter()
        .filter(|r| r.kind == Kind::Income)
        .map(|r| r.amount)
        .sum();
    let expense: Decimal = records
        .iter()
        .filter(|r| r.kind == Kind::Expense)
        .map(|r| r.amount)
        .sum();
    Summary {
        income,
        expense,
        balance: income - expense,
    }
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (records, availability) = fetch(conn)?;
    let totals = summarize(&records);

    if !maybe_print_json(json_flag, jsonl_flag, &totals)? {
        let rows = vec![
            vec!["Income".to_string(), fmt_money(&totals.income)],
            vec!["Expenses".to_string(), fmt_money(&totals.expense)],
            vec!["Balance".to_string(), fmt_money(&totals.balance)],
        ];
        println!("{}", pretty_table(&["Total", "Amount"], rows));
        println!("{}", sync_banner(availability));
    }
    Ok(())
}

#[derive(Serialize)]
pub struct CategorySpend {
    pub category: Category,
    pub spent: Decimal,
    pub share: Decimal,
}

/// Expense totals per category, largest first, with each category's share
/// of overall spending as a percentage.
pub fn category_spend(records: &[Record]) -> Vec<CategorySpend> {
    let mut totals: Vec<(Category, Decimal)> = Vec::new();
    for r in records.iter().filter(|r| r.kind == Kind::Expense) {
        match totals.iter_mut().find(|(c, _)| *c == r.category) {
            Some((_, sum)) => *sum += r.amount,
            None => totals.push((r.category, r.amount)),
        }
    }
    let overall: Decimal = totals.iter().map(|(_, d)| *d).sum();
    let mut out: Vec<CategorySpend> = totals
        .into_iter()
        .map(|(category, spent)| {
            let share = if overall.is_zero() {
                Decimal::ZERO
            } else {
                (spent / overall * Decimal::from(100)).round_dp(1)
            };
            CategorySpend {
                category,
                spent,
                share,
            }
        })
        .collect();
    out.sort_by(|a, b| b.spent.cmp(&a.spent));
    out
}

fn categories(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (mut records, availability) = fetch(conn)?;
    if let Some(month) = sub.get_one::<String>("month") {
        records.retain(|r| r.date.format("%Y-%m").to_string() == *month);
    }

    let data = category_spend(&records);
    if data.is_empty() {
        println!("No expenses recorded.");
        return Ok(());
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let max = data[0].spent;
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|c| {
                vec![
                    c.category.to_string(),
                    fmt_money(&c.spent),
                    format!("{}%", c.share),
                    bar(c.spent, max),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Spent", "Share", ""], rows)
        );
        println!("{}", sync_banner(availability));
    }
    Ok(())
}

fn daily(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let days = *sub.get_one::<usize>("days").unwrap();
    let (records, availability) = fetch(conn)?;
    let today = Utc::now().date_naive();

    let mut data: Vec<(String, Decimal)> = Vec::new();
    for back in (0..days).rev() {
        let date = today - chrono::Duration::days(back as i64);
        let spent: Decimal = records
            .iter()
            .filter(|r| r.kind == Kind::Expense && r.date == date)
            .map(|r| r.amount)
            .sum();
        data.push((date.to_string(), spent));
    }

    let max = data
        .iter()
        .map(|(_, d)| *d)
        .max()
        .unwrap_or(Decimal::ZERO);
    let rows: Vec<Vec<String>> = data
        .into_iter()
        .map(|(date, spent)| vec![date, fmt_money(&spent), bar(spent, max)])
        .collect();
    println!("{}", pretty_table(&["Date", "Spent", ""], rows));
    println!("{}", sync_banner(availability));
    Ok(())
}

fn bar(value: Decimal, max: Decimal) -> String {
    if max <= Decimal::ZERO || value <= Decimal::ZERO {
        return String::new();
    }
    let filled = (value / max * Decimal::from(BAR_WIDTH as u32))
        .round()
        .to_usize()
        .unwrap_or(0)
        .clamp(1, BAR_WIDTH);
    "█".repeat(filled)
}
