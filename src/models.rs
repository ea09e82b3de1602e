// Copyright (c) 2025 Spendwise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fixed spending categories. The serde names are the wire names the REST
/// surface and the insight endpoint both see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Food & Dining")]
    Food,
    Transport,
    Shopping,
    Entertainment,
    Health,
    #[serde(rename = "Bills & Utilities")]
    Bills,
    Income,
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Entertainment,
        Category::Health,
        Category::Bills,
        Category::Income,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food & Dining",
            Category::Transport => "Transport",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::Health => "Health",
            Category::Bills => "Bills & Utilities",
            Category::Income => "Income",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    /// Accepts the wire name or a short alias ("food", "bills", ...),
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        for c in Category::ALL {
            if c.as_str().eq_ignore_ascii_case(t) {
                return Ok(c);
            }
        }
        match t.to_ascii_lowercase().as_str() {
            "food" | "dining" => Ok(Category::Food),
            "transport" => Ok(Category::Transport),
            "shopping" => Ok(Category::Shopping),
            "entertainment" => Ok(Category::Entertainment),
            "health" => Ok(Category::Health),
            "bills" | "utilities" => Ok(Category::Bills),
            "income" => Ok(Category::Income),
            "other" => Ok(Category::Other),
            _ => Err(anyhow::anyhow!(
                "Unknown category '{}' (expected one of: {})",
                s,
                Category::ALL.map(|c| c.as_str()).join(", ")
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Expense,
    Income,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Expense => "expense",
            Kind::Income => "income",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expense" => Ok(Kind::Expense),
            "income" => Ok(Kind::Income),
            _ => Err(anyhow::anyhow!(
                "Unknown kind '{}' (expected 'expense' or 'income')",
                s
            )),
        }
    }
}

/// One financial event. `id` is an opaque client-generated string and the
/// sole key for upsert and delete. `amount` is a non-negative magnitude;
/// the sign is carried by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub title: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: Category,
    #[serde(rename = "type")]
    pub kind: Kind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Per-category monthly spending limit. Stored only in the local cache;
/// never sent to the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub category: Category,
    pub limit: Decimal,
}

/// Structured reply from the insight endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub summary: String,
    pub recommendations: Vec<String>,
    pub savings_potential: String,
}
