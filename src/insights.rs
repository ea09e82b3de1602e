// Copyright (c) 2025 Spendwise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Stateless call-and-parse wrapper around the hosted Gemini endpoint.
//! Failures never propagate: any transport, auth, or parse problem yields
//! `None` after a log line, and the view renders the same empty state it
//! shows when there is not enough data.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::models::{Category, Insight, Kind, Record};
use crate::utils;

const ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const MODEL: &str = "gemini-2.0-flash";

/// Below this many records the endpoint is not called at all.
pub const MIN_RECORDS: usize = 3;

/// Minimal projection sent to the model; short keys keep the prompt small.
#[derive(Serialize)]
struct RecordDigest<'a> {
    t: &'a str,
    a: &'a Decimal,
    c: Category,
    d: NaiveDate,
    ty: Kind,
}

pub fn financial_insights(records: &[Record]) -> Option<Insight> {
    if records.len() < MIN_RECORDS {
        return None;
    }
    match request_insights(records) {
        Ok(insight) => Some(insight),
        Err(e) => {
            warn!("insight request failed: {e:#}");
            None
        }
    }
}

fn request_insights(records: &[Record]) -> Result<Insight> {
    let key = utils::ai_api_key()?;
    let digest: Vec<RecordDigest> = records
        .iter()
        .map(|r| RecordDigest {
            t: &r.title,
            a: &r.amount,
            c: r.category,
            d: r.date,
            ty: r.kind,
        })
        .collect();
    let prompt = format!(
        "Analyze these financial transactions and provide insights: {}",
        serde_json::to_string(&digest)?
    );
    let body = json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "summary": {
                        "type": "STRING",
                        "description": "One paragraph summarizing spending habits."
                    },
                    "recommendations": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" },
                        "description": "Specific actionable tips."
                    },
                    "savingsPotential": {
                        "type": "STRING",
                        "description": "Estimated potential monthly savings amount with reasoning."
                    }
                },
                "required": ["summary", "recommendations", "savingsPotential"]
            }
        }
    });

    let reply = generate(&key, &body)?;
    parse_insight_reply(&reply)
}

/// Ask the model to sort a record title into one of the fixed categories.
/// Anything unexpected, including an unreachable endpoint, lands in Other.
pub fn suggest_category(title: &str) -> Category {
    match request_category(title) {
        Ok(category) => category,
        Err(e) => {
            warn!("category suggestion failed, defaulting to Other: {e:#}");
            Category::Other
        }
    }
}

fn request_category(title: &str) -> Result<Category> {
    let key = utils::ai_api_key()?;
    let names = Category::ALL.map(|c| c.as_str()).join(", ");
    let prompt = format!(
        "Given the transaction title \"{title}\", categorize it into one of: {names}. \
         Return only the category name."
    );
    let body = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });
    let reply = generate(&key, &body)?;
    let text = reply_text(&reply)?;
    Ok(match_category(text))
}

fn generate(key: &str, body: &Value) -> Result<Value> {
    let client = utils::http_client()?;
    let url = format!("{ENDPOINT}/{MODEL}:generateContent");
    let resp = client
        .post(url)
        .header("x-goog-api-key", key)
        .json(body)
        .send()?
        .error_for_status()?;
    Ok(resp.json()?)
}

fn reply_text(reply: &Value) -> Result<&str> {
    reply["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .context("model reply carried no text part")
}

/// Extract the structured payload from a generateContent reply body.
pub fn parse_insight_reply(reply: &Value) -> Result<Insight> {
    let text = reply_text(reply)?;
    serde_json::from_str(text).context("model reply was not the requested JSON shape")
}

/// Map a free-text model reply onto the category set; unknowns become Other.
pub fn match_category(reply: &str) -> Category {
    Category::ALL
        .into_iter()
        .find(|c| c.as_str().eq_ignore_ascii_case(reply.trim()))
        .unwrap_or(Category::Other)
}
