// Copyright (c) 2025 Spendwise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use spendwise::commands::budgets;
use spendwise::models::{Budget, Category, Kind, Record};

fn expense(id: &str, date: &str, category: Category, amount: rust_decimal::Decimal) -> Record {
    Record {
        id: id.into(),
        title: id.to_uppercase(),
        amount,
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        category,
        kind: Kind::Expense,
        description: None,
    }
}

#[test]
fn status_sums_only_the_requested_month_and_category() {
    let budgets = vec![Budget {
        category: Category::Food,
        limit: dec!(200),
    }];
    let records = vec![
        expense("a", "2025-08-02", Category::Food, dec!(30)),
        expense("b", "2025-08-20", Category::Food, dec!(45.50)),
        expense("c", "2025-07-31", Category::Food, dec!(99)), // previous month
        expense("d", "2025-08-10", Category::Transport, dec!(12)), // other category
    ];

    let rows = budgets::status_rows(&budgets, &records, "2025-08");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].spent, dec!(75.50));
    assert_eq!(rows[0].remaining, dec!(124.50));
}

#[test]
fn status_goes_negative_when_over_budget() {
    let budgets = vec![Budget {
        category: Category::Shopping,
        limit: dec!(50),
    }];
    let records = vec![expense("a", "2025-08-02", Category::Shopping, dec!(80))];

    let rows = budgets::status_rows(&budgets, &records, "2025-08");
    assert_eq!(rows[0].remaining, dec!(-30));
}

#[test]
fn income_never_counts_as_spending() {
    let budgets = vec![Budget {
        category: Category::Income,
        limit: dec!(100),
    }];
    let mut salary = expense("a", "2025-08-01", Category::Income, dec!(2500));
    salary.kind = Kind::Income;

    let rows = budgets::status_rows(&budgets, &[salary], "2025-08");
    assert_eq!(rows[0].spent, dec!(0));
}
