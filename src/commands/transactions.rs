// Copyright (c) 2025 Spendwise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use uuid::Uuid;

use crate::insights;
use crate::models::{Category, Kind, Record};
use crate::remote::HttpRemote;
use crate::sync::{Availability, SyncStore};
use crate::utils::{
    fmt_money, maybe_print_json, parse_amount, parse_date, pretty_table, sync_banner,
};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub),
        Some(("edit", sub)) => edit(conn, sub),
        Some(("list", sub)) => list(conn, sub),
        Some(("delete", sub)) => remove(conn, sub),
        Some(("export", sub)) => export(conn, sub),
        _ => Ok(()),
    }
}

fn open_store(conn: &Connection) -> Result<SyncStore<'_, HttpRemote>> {
    Ok(SyncStore::new(conn, HttpRemote::from_env()?))
}

fn note_if_local(availability: Availability) {
    if !availability.is_remote() {
        println!("{}", sync_banner(availability));
    }
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let title = sub.get_one::<String>("title").unwrap();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };
    let kind: Kind = sub.get_one::<String>("kind").unwrap().parse()?;
    let category = match sub.get_one::<String>("category") {
        Some(s) => s.parse::<Category>()?,
        None => insights::suggest_category(title),
    };
    let description = sub.get_one::<String>("description").map(|s| s.to_string());

    let record = Record {
        id: Uuid::new_v4().to_string(),
        title: title.to_string(),
        amount,
        date,
        category,
        kind,
        description,
    };
    let availability = open_store(conn)?.upsert(&record)?;
    println!(
        "Recorded {} {} '{}' on {} [{}]",
        record.kind,
        fmt_money(&record.amount),
        record.title,
        record.date,
        record.category
    );
    note_if_local(availability);
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let store = open_store(conn)?;
    let (records, _) = store.fetch_all()?;
    let mut record = records
        .into_iter()
        .find(|r| &r.id == id)
        .ok_or_else(|| anyhow::anyhow!("No record with id '{}'", id))?;

    if let Some(title) = sub.get_one::<String>("title") {
        record.title = title.to_string();
    }
    if let Some(amount) = sub.get_one::<String>("amount") {
        record.amount = parse_amount(amount)?;
    }
    if let Some(date) = sub.get_one::<String>("date") {
        record.date = parse_date(date)?;
    }
    if let Some(category) = sub.get_one::<String>("category") {
        record.category = category.parse()?;
    }
    if let Some(kind) = sub.get_one::<String>("kind") {
        record.kind = kind.parse()?;
    }
    if let Some(description) = sub.get_one::<String>("description") {
        record.description = Some(description.to_string());
    }

    let availability = store.upsert(&record)?;
    println!("Updated record {}", record.id);
    note_if_local(availability);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (records, availability) = open_store(conn)?.fetch_all()?;
    let records = filter_records(records, sub)?;

    if !maybe_print_json(json_flag, jsonl_flag, &records)? {
        let rows: Vec<Vec<String>> = records
            .iter()
            .map(|r| {
                vec![
                    r.date.to_string(),
                    r.title.clone(),
                    r.category.to_string(),
                    r.kind.to_string(),
                    signed_amount(r),
                    r.description.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Title", "Category", "Kind", "Amount", "Description"],
                rows,
            )
        );
        println!("{}", sync_banner(availability));
    }
    Ok(())
}

pub fn filter_records(records: Vec<Record>, sub: &clap::ArgMatches) -> Result<Vec<Record>> {
    let category = sub
        .get_one::<String>("category")
        .map(|s| s.parse::<Category>())
        .transpose()?;
    let kind = sub
        .get_one::<String>("kind")
        .map(|s| s.parse::<Kind>())
        .transpose()?;

    let mut out: Vec<Record> = records
        .into_iter()
        .filter(|r| category.is_none_or(|c| r.category == c))
        .filter(|r| kind.is_none_or(|k| r.kind == k))
        .collect();
    if let Some(limit) = sub.get_one::<usize>("limit") {
        out.truncate(*limit);
    }
    Ok(out)
}

fn signed_amount(r: &Record) -> String {
    match r.kind {
        Kind::Income => format!("+{}", fmt_money(&r.amount)),
        Kind::Expense => format!("-{}", fmt_money(&r.amount)),
    }
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let availability = open_store(conn)?.delete(id)?;
    println!("Deleted record {}", id);
    note_if_local(availability);
    Ok(())
}

fn export(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap();
    let out = sub.get_one::<String>("out").unwrap();
    let (records, availability) = open_store(conn)?.fetch_all()?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id",
                "title",
                "amount",
                "date",
                "category",
                "type",
                "description",
            ])?;
            for r in &records {
                wtr.write_record([
                    r.id.clone(),
                    r.title.clone(),
                    r.amount.to_string(),
                    r.date.to_string(),
                    r.category.to_string(),
                    r.kind.to_string(),
                    r.description.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        _ => {
            std::fs::write(out, serde_json::to_string_pretty(&records)?)?;
        }
    }
    println!("Exported {} records to {}", records.len(), out);
    note_if_local(availability);
    Ok(())
}
