// Copyright (c) 2025 Spendwise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal_macros::dec;

use spendwise::cache;
use spendwise::models::{Budget, Category, Kind, Record};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE cache(key TEXT PRIMARY KEY, value TEXT NOT NULL);")
        .unwrap();
    conn
}

fn record(id: &str) -> Record {
    Record {
        id: id.into(),
        title: "Lunch".into(),
        amount: dec!(12.50),
        date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        category: Category::Food,
        kind: Kind::Expense,
        description: Some("team lunch".into()),
    }
}

#[test]
fn missing_entry_reads_as_empty_list() {
    let conn = setup();
    assert!(cache::load_records(&conn).unwrap().is_empty());
    assert!(cache::load_budgets(&conn).unwrap().is_empty());
}

#[test]
fn records_round_trip_preserving_order() {
    let conn = setup();
    let records = vec![record("b"), record("a"), record("c")];
    cache::store_records(&conn, &records).unwrap();
    assert_eq!(cache::load_records(&conn).unwrap(), records);
}

#[test]
fn store_records_overwrites_previous_blob() {
    let conn = setup();
    cache::store_records(&conn, &[record("a"), record("b")]).unwrap();
    cache::store_records(&conn, &[record("c")]).unwrap();
    let ids: Vec<String> = cache::load_records(&conn)
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec!["c"]);
}

#[test]
fn save_budget_is_last_write_wins_per_category() {
    let conn = setup();
    cache::save_budget(
        &conn,
        &Budget {
            category: Category::Food,
            limit: dec!(200),
        },
    )
    .unwrap();
    cache::save_budget(
        &conn,
        &Budget {
            category: Category::Transport,
            limit: dec!(80),
        },
    )
    .unwrap();
    cache::save_budget(
        &conn,
        &Budget {
            category: Category::Food,
            limit: dec!(150),
        },
    )
    .unwrap();

    let budgets = cache::load_budgets(&conn).unwrap();
    assert_eq!(budgets.len(), 2);
    assert_eq!(budgets[0].category, Category::Food);
    assert_eq!(budgets[0].limit, dec!(150));
    assert_eq!(budgets[1].category, Category::Transport);
}

#[test]
fn corrupt_blob_is_an_error_not_an_empty_list() {
    let conn = setup();
    conn.execute(
        "INSERT INTO cache(key, value) VALUES ('transactions_backup', 'not json')",
        [],
    )
    .unwrap();
    assert!(cache::load_records(&conn).is_err());
}
