// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use spendwise::api::ApiClient;
use spendwise::commands::{self, require_session};
use spendwise::context::AppContext;
use spendwise::models::RecordKind;
use spendwise::{cli, db, utils};

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("spendwise={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    init_tracing(matches.get_count("verbose"));

    let conn = db::open_or_init()?;
    let mut ctx = AppContext::hydrate(&conn)?;
    let base_url = matches
        .get_one::<String>("api-url")
        .map(String::as_str)
        .unwrap_or(spendwise::api::DEFAULT_API_URL);
    let api = ApiClient::new(
        utils::http_client()?,
        base_url,
        ctx.access_token().map(str::to_string),
    );

    let result = match matches.subcommand() {
        Some(("register", sub)) => commands::auth::register(&api, sub),
        Some(("login", sub)) => commands::auth::login(&mut ctx, &api, sub),
        Some(("logout", _)) => commands::auth::logout(&mut ctx, &api),
        Some(("whoami", _)) => commands::auth::whoami(&ctx),
        Some(("refresh", _)) => commands::auth::refresh(&mut ctx, &api),
        Some(("profile", sub)) => commands::auth::profile(&mut ctx, &api, sub),
        Some(("theme", sub)) => commands::theme::handle(&mut ctx, sub),
        Some(("categories", sub)) => commands::categories::handle(ctx.theme(), sub),
        Some(("expense", sub)) => require_session(&ctx)
            .and_then(|_| commands::records::handle(&api, RecordKind::Expense, ctx.theme(), sub)),
        Some(("income", sub)) => require_session(&ctx)
            .and_then(|_| commands::records::handle(&api, RecordKind::Income, ctx.theme(), sub)),
        Some(("analytics", sub)) => {
            require_session(&ctx).and_then(|_| commands::analytics::handle(&api, ctx.theme(), sub))
        }
        Some(("budget", sub)) => {
            require_session(&ctx).and_then(|_| commands::budget::handle(&api, ctx.theme(), sub))
        }
        _ => {
            cli::build_cli().print_help()?;
            println!();
            Ok(())
        }
    };

    commands::finish(&mut ctx, result)
}
