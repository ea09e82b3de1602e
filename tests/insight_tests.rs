// Copyright (c) 2025 Spendwise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde_json::json;

use spendwise::insights;
use spendwise::models::{Category, Kind, Record};

fn record(id: &str) -> Record {
    Record {
        id: id.into(),
        title: "Lunch".into(),
        amount: dec!(12),
        date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        category: Category::Food,
        kind: Kind::Expense,
        description: None,
    }
}

#[test]
fn fewer_than_three_records_skips_the_call() {
    // Two records: the endpoint must not be contacted at all, so this
    // returns immediately even with no key and no network.
    let records = vec![record("a"), record("b")];
    assert!(insights::financial_insights(&records).is_none());
    assert!(insights::financial_insights(&[]).is_none());
}

#[test]
fn parse_insight_reply_extracts_structured_payload() {
    let payload = json!({
        "summary": "Most spending goes to dining out.",
        "recommendations": ["Cook at home twice a week", "Set a dining budget"],
        "savingsPotential": "$120/month by trimming restaurant visits"
    });
    let reply = json!({
        "candidates": [{
            "content": {
                "parts": [{ "text": payload.to_string() }]
            }
        }]
    });

    let insight = insights::parse_insight_reply(&reply).unwrap();
    assert_eq!(insight.summary, "Most spending goes to dining out.");
    assert_eq!(insight.recommendations.len(), 2);
    assert_eq!(
        insight.savings_potential,
        "$120/month by trimming restaurant visits"
    );
}

#[test]
fn parse_insight_reply_rejects_missing_text_part() {
    assert!(insights::parse_insight_reply(&json!({ "candidates": [] })).is_err());
    let reply = json!({
        "candidates": [{ "content": { "parts": [{ "text": "not json" }] } }]
    });
    assert!(insights::parse_insight_reply(&reply).is_err());
}

#[test]
fn match_category_accepts_wire_names_loosely() {
    assert_eq!(
        insights::match_category("Food & Dining"),
        Category::Food
    );
    assert_eq!(
        insights::match_category("  bills & utilities \n"),
        Category::Bills
    );
    assert_eq!(insights::match_category("TRANSPORT"), Category::Transport);
}

#[test]
fn match_category_falls_back_to_other() {
    assert_eq!(insights::match_category("Groceries"), Category::Other);
    assert_eq!(insights::match_category(""), Category::Other);
}
