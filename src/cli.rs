// Copyright (c) 2025 Spendwise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("spendwise")
        .about("Local-first personal finance tracker with remote sync and AI spending insights")
        .version(clap::crate_version!())
        .subcommand(tx_cmd())
        .subcommand(budget_cmd())
        .subcommand(report_cmd())
        .subcommand(insights_cmd())
        .subcommand(serve_cmd())
}

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .help("Print pretty JSON instead of a table")
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .help("Print one JSON object per line")
            .action(ArgAction::SetTrue),
    )
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Manage income and expense records")
        .subcommand(
            Command::new("add")
                .about("Record a new income or expense")
                .arg(Arg::new("title").long("title").required(true))
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .required(true)
                        .help("Non-negative magnitude; the sign comes from --kind"),
                )
                .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today"))
                .arg(
                    Arg::new("category")
                        .long("category")
                        .help("Omit to let the model suggest one"),
                )
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .value_parser(["expense", "income"])
                        .default_value("expense"),
                )
                .arg(Arg::new("description").long("description")),
        )
        .subcommand(
            Command::new("edit")
                .about("Replace fields of an existing record, keyed by id")
                .arg(Arg::new("id").required(true))
                .arg(Arg::new("title").long("title"))
                .arg(Arg::new("amount").long("amount"))
                .arg(Arg::new("date").long("date"))
                .arg(Arg::new("category").long("category"))
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .value_parser(["expense", "income"]),
                )
                .arg(Arg::new("description").long("description")),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List records, newest first")
                .arg(Arg::new("category").long("category"))
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .value_parser(["expense", "income"]),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(
            Command::new("delete")
                .about("Delete a record by id")
                .arg(Arg::new("id").required(true)),
        )
        .subcommand(
            Command::new("export")
                .about("Export the current record list")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(["csv", "json"])
                        .default_value("csv"),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
}

fn budget_cmd() -> Command {
    Command::new("budget")
        .about("Per-category monthly spending limits (stored locally)")
        .subcommand(
            Command::new("set")
                .about("Set or replace the limit for a category")
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("limit").long("limit").required(true)),
        )
        .subcommand(json_flags(Command::new("list").about("List configured limits")))
        .subcommand(json_flags(
            Command::new("status")
                .about("Compare limits against this month's spending")
                .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to the current month")),
        ))
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Summaries and charts over the record list")
        .subcommand(json_flags(
            Command::new("summary").about("Income, expenses, and balance totals"),
        ))
        .subcommand(json_flags(
            Command::new("categories")
                .about("Expense breakdown by category")
                .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to all records")),
        ))
        .subcommand(
            Command::new("daily")
                .about("Daily expense totals for the last N days")
                .arg(
                    Arg::new("days")
                        .long("days")
                        .value_parser(value_parser!(usize))
                        .default_value("7"),
                ),
        )
}

fn insights_cmd() -> Command {
    json_flags(Command::new("insights").about("AI-generated spending insights"))
}

fn serve_cmd() -> Command {
    Command::new("serve")
        .about("Run the record store server")
        .arg(
            Arg::new("port")
                .long("port")
                .value_parser(value_parser!(u16))
                .help("Listen port (falls back to PORT, then 3000)"),
        )
        .arg(
            Arg::new("db")
                .long("db")
                .help("SQLite path (falls back to SPENDWISE_DB, then the platform data dir)"),
        )
}
