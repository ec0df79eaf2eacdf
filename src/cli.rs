// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::DEFAULT_API_URL;
use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn filter_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("search").long("search").short('s').help("Match title, note or category"))
        .arg(
            Arg::new("category")
                .long("category")
                .short('c')
                .default_value("all")
                .help("Exact category, or 'all'"),
        )
        .arg(Arg::new("from").long("from").help("Start date YYYY-MM-DD (inclusive)"))
        .arg(Arg::new("to").long("to").help("End date YYYY-MM-DD (inclusive)"))
        .arg(
            Arg::new("sort")
                .long("sort")
                .default_value("dateDesc")
                .help("dateDesc|dateAsc|amountDesc|amountAsc|titleAsc"),
        )
}

fn record_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(Arg::new("title").long("title").required(required))
        .arg(Arg::new("amount").long("amount").required(required))
        .arg(Arg::new("category").long("category").required(required))
        .arg(Arg::new("note").long("note").help("Optional description"))
        .arg(
            Arg::new("date")
                .long("date")
                .help("YYYY-MM-DD, defaults to today"),
        )
}

fn record_command(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .subcommand_required(true)
        .subcommand(record_fields(Command::new("add").about("Record a new entry"), true))
        .subcommand(
            record_fields(
                Command::new("edit")
                    .about("Replace the editable fields of an entry")
                    .arg(
                        Arg::new("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                false,
            ),
        )
        .subcommand(
            Command::new("rm").about("Delete an entry").arg(
                Arg::new("id")
                    .required(true)
                    .value_parser(value_parser!(i64)),
            ),
        )
        .subcommand(json_flags(filter_args(
            Command::new("list")
                .about("Filtered, sorted, paginated listing")
                .arg(
                    Arg::new("page")
                        .long("page")
                        .default_value("1")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("per-page")
                        .long("per-page")
                        .default_value("5")
                        .value_parser(["5", "10", "20", "50"]),
                ),
        )))
        .subcommand(filter_args(
            Command::new("export")
                .about("Export the filtered, sorted entries")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .default_value("csv")
                        .help("csv|json|pdf"),
                )
                .arg(Arg::new("out").long("out").short('o').help("Output path")),
        ))
}

fn kind_arg() -> Arg {
    Arg::new("kind")
        .long("kind")
        .short('k')
        .default_value("expense")
        .value_parser(["expense", "income"])
}

pub fn build_cli() -> Command {
    Command::new("spendwise")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Track expenses and incomes, with local analytics and reports")
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .env("SPENDWISE_API_URL")
                .default_value(DEFAULT_API_URL)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("register")
                .about("Create an account")
                .arg(Arg::new("username").long("username").required(true))
                .arg(Arg::new("email").long("email").required(true))
                .arg(Arg::new("password").long("password").required(true)),
        )
        .subcommand(
            Command::new("login")
                .about("Sign in and store the session")
                .arg(Arg::new("username").long("username").required(true))
                .arg(Arg::new("password").long("password").required(true)),
        )
        .subcommand(Command::new("logout").about("Sign out and clear the stored session"))
        .subcommand(Command::new("whoami").about("Show the signed-in user"))
        .subcommand(
            Command::new("refresh").about("Exchange the refresh token for a new access token"),
        )
        .subcommand(
            Command::new("profile")
                .about("View or update the account profile")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("update")
                        .arg(Arg::new("username").long("username"))
                        .arg(Arg::new("email").long("email"))
                        .arg(Arg::new("password").long("password")),
                ),
        )
        .subcommand(
            Command::new("theme")
                .about("Show or change the colour theme")
                .arg(
                    Arg::new("mode")
                        .value_parser(["show", "dark", "light", "toggle"])
                        .default_value("show"),
                ),
        )
        .subcommand(
            Command::new("categories")
                .about("List the category vocabulary")
                .arg(kind_arg()),
        )
        .subcommand(record_command("expense", "Manage expenses"))
        .subcommand(record_command("income", "Manage incomes"))
        .subcommand(json_flags(
            Command::new("analytics")
                .about("Statistics, breakdown and trends")
                .arg(kind_arg())
                .arg(
                    Arg::new("range")
                        .long("range")
                        .default_value("all")
                        .value_parser(["all", "year", "month"]),
                )
                .arg(Arg::new("year").long("year").value_parser(value_parser!(i32)))
                .arg(
                    Arg::new("month")
                        .long("month")
                        .value_parser(value_parser!(u32).range(1..=12)),
                )
                .arg(
                    Arg::new("pdf")
                        .long("pdf")
                        .action(ArgAction::SetTrue)
                        .help("Write the report as PDF"),
                )
                .arg(Arg::new("out").long("out").short('o').requires("pdf")),
        ))
        .subcommand(json_flags(
            Command::new("budget")
                .about("Monthly income vs expense with a day-by-day calendar")
                .arg(Arg::new("year").long("year").value_parser(value_parser!(i32)))
                .arg(
                    Arg::new("month")
                        .long("month")
                        .value_parser(value_parser!(u32).range(1..=12)),
                ),
        ))
}
