// Copyright (c) 2025 Spendwise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal_macros::dec;

use spendwise::cache;
use spendwise::models::{Category, Kind, Record};
use spendwise::remote::{RemoteError, RemoteStore, StatusCode};
use spendwise::sync::{Availability, SyncStore};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE cache(key TEXT PRIMARY KEY, value TEXT NOT NULL);")
        .unwrap();
    conn
}

fn record(id: &str, title: &str) -> Record {
    Record {
        id: id.into(),
        title: title.into(),
        amount: dec!(50),
        date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        category: Category::Food,
        kind: Kind::Expense,
        description: None,
    }
}

struct StubRemote {
    records: Vec<Record>,
    reachable: bool,
}

impl StubRemote {
    fn up(records: Vec<Record>) -> Self {
        StubRemote {
            records,
            reachable: true,
        }
    }

    fn down() -> Self {
        StubRemote {
            records: Vec::new(),
            reachable: false,
        }
    }

    fn check(&self) -> Result<(), RemoteError> {
        if self.reachable {
            Ok(())
        } else {
            Err(RemoteError::Status(StatusCode::INTERNAL_SERVER_ERROR))
        }
    }
}

impl RemoteStore for StubRemote {
    fn list(&self) -> Result<Vec<Record>, RemoteError> {
        self.check()?;
        Ok(self.records.clone())
    }

    fn upsert(&self, _record: &Record) -> Result<(), RemoteError> {
        self.check()
    }

    fn delete(&self, _id: &str) -> Result<(), RemoteError> {
        self.check()
    }
}

#[test]
fn fetch_success_replaces_cache_wholesale() {
    let conn = setup();
    cache::store_records(&conn, &[record("stale", "Old lunch")]).unwrap();

    let remote = vec![record("r1", "Groceries"), record("r2", "Bus pass")];
    let store = SyncStore::new(&conn, StubRemote::up(remote.clone()));
    let (records, availability) = store.fetch_all().unwrap();

    assert_eq!(availability, Availability::Remote);
    assert_eq!(records, remote);
    // The stale entry is gone from the cache, not merged.
    assert_eq!(cache::load_records(&conn).unwrap(), remote);
}

#[test]
fn fetch_failure_returns_cached_list_unchanged() {
    let conn = setup();
    let cached = vec![record("a1", "Lunch"), record("a2", "Coffee")];
    cache::store_records(&conn, &cached).unwrap();

    let store = SyncStore::new(&conn, StubRemote::down());
    let (records, availability) = store.fetch_all().unwrap();

    assert_eq!(availability, Availability::Local);
    assert_eq!(records, cached);
    assert_eq!(cache::load_records(&conn).unwrap(), cached);
}

#[test]
fn fetch_failure_with_empty_cache_yields_empty_list() {
    let conn = setup();
    let store = SyncStore::new(&conn, StubRemote::down());
    let (records, availability) = store.fetch_all().unwrap();
    assert_eq!(availability, Availability::Local);
    assert!(records.is_empty());
}

#[test]
fn upsert_new_id_prepends() {
    let conn = setup();
    cache::store_records(&conn, &[record("a1", "Lunch")]).unwrap();

    let store = SyncStore::new(&conn, StubRemote::up(Vec::new()));
    store.upsert(&record("a2", "Dinner")).unwrap();

    let ids: Vec<String> = cache::load_records(&conn)
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec!["a2", "a1"]);
}

#[test]
fn upsert_existing_id_replaces_in_place() {
    let conn = setup();
    cache::store_records(
        &conn,
        &[record("a1", "Lunch"), record("a2", "Coffee"), record("a3", "Taxi")],
    )
    .unwrap();

    let mut updated = record("a2", "Espresso");
    updated.amount = dec!(4.20);
    let store = SyncStore::new(&conn, StubRemote::up(Vec::new()));
    store.upsert(&updated).unwrap();

    let records = cache::load_records(&conn).unwrap();
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "a2", "a3"]);
    assert_eq!(records[1].title, "Espresso");
    assert_eq!(records[1].amount, dec!(4.20));
}

// The worked example: empty cache, remote unreachable. The save still
// succeeds, the record lands in the cache, availability degrades.
#[test]
fn upsert_with_remote_down_saves_locally_without_error() {
    let conn = setup();
    let store = SyncStore::new(&conn, StubRemote::down());

    let availability = store.upsert(&record("a1", "Lunch")).unwrap();

    assert_eq!(availability, Availability::Local);
    let records = cache::load_records(&conn).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "a1");
    assert_eq!(records[0].amount, dec!(50));
}

#[test]
fn upsert_with_remote_up_reports_remote() {
    let conn = setup();
    let store = SyncStore::new(&conn, StubRemote::up(Vec::new()));
    let availability = store.upsert(&record("a1", "Lunch")).unwrap();
    assert_eq!(availability, Availability::Remote);
}

#[test]
fn delete_removes_from_cache_when_remote_up() {
    let conn = setup();
    cache::store_records(&conn, &[record("a1", "Lunch")]).unwrap();

    let store = SyncStore::new(&conn, StubRemote::up(Vec::new()));
    let availability = store.delete("a1").unwrap();

    assert_eq!(availability, Availability::Remote);
    assert!(cache::load_records(&conn).unwrap().is_empty());
}

#[test]
fn delete_removes_from_cache_even_when_remote_down() {
    let conn = setup();
    cache::store_records(&conn, &[record("a1", "Lunch"), record("a2", "Coffee")]).unwrap();

    let store = SyncStore::new(&conn, StubRemote::down());
    let availability = store.delete("a1").unwrap();

    assert_eq!(availability, Availability::Local);
    let ids: Vec<String> = cache::load_records(&conn)
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec!["a2"]);
}
