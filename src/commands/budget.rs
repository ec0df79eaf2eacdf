// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{
    CalendarDay, CalendarMonth, DayTone, MonthSummary, calendar_month, month_summary,
};
use crate::api::RecordsApi;
use crate::collection::{CancelToken, RecordCollection};
use crate::context::Theme;
use crate::models::{Record, RecordKind};
use crate::utils::{fmt_money, maybe_print_json, month_name, pretty_table};
use anyhow::{Context, Result, anyhow};
use chrono::{Datelike, Local};
use rust_decimal::Decimal;
use serde::Serialize;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Serialize)]
pub struct BudgetView {
    pub summary: MonthSummary,
    pub calendar: CalendarMonth,
}

pub fn build_view(records: &[Record], year: i32, month: u32) -> Result<BudgetView> {
    let calendar = calendar_month(records, year, month)
        .ok_or_else(|| anyhow!("Invalid month {}-{:02}", year, month))?;
    Ok(BudgetView {
        summary: month_summary(records, year, month),
        calendar,
    })
}

pub fn handle(api: &dyn RecordsApi, theme: Theme, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let now = Local::now().date_naive();
    let year = m.get_one::<i32>("year").copied().unwrap_or(now.year());
    let month = m.get_one::<u32>("month").copied().unwrap_or(now.month());

    let token = CancelToken::new();
    let mut records = Vec::new();
    for kind in [RecordKind::Expense, RecordKind::Income] {
        let mut coll = RecordCollection::new(kind);
        coll.load(api, &token)
            .with_context(|| format!("Failed to fetch {}", kind.wire_path()))?;
        records.extend_from_slice(coll.records());
    }

    let view = build_view(&records, year, month)?;
    if maybe_print_json(json_flag, jsonl_flag, &view)? {
        return Ok(());
    }

    println!("Budget · {} {}", month_name(month), year);
    let s = &view.summary;
    println!(
        "{}",
        pretty_table(
            theme,
            &["Income", "Expense", "Balance"],
            vec![vec![
                fmt_money(&s.total_income),
                fmt_money(&s.total_expense),
                fmt_money(&s.balance),
            ]],
        )
    );
    if s.total_income.is_zero() && s.total_expense.is_zero() {
        println!("No activity this month.");
    }
    println!("{}", pretty_table(theme, &WEEKDAYS, calendar_rows(&view.calendar)));
    println!("+ more income   - more expense   = balanced   (░▒▓█ relative activity)");
    Ok(())
}

fn shade(intensity: Decimal) -> &'static str {
    if intensity.is_zero() {
        ""
    } else if intensity <= Decimal::new(25, 2) {
        "░"
    } else if intensity <= Decimal::new(50, 2) {
        "▒"
    } else if intensity <= Decimal::new(75, 2) {
        "▓"
    } else {
        "█"
    }
}

fn day_cell(d: &CalendarDay, max: Decimal) -> String {
    let marker = match d.tone() {
        DayTone::Idle => return d.day.to_string(),
        DayTone::Surplus => "+",
        DayTone::Deficit => "-",
        DayTone::Balanced => "=",
    };
    format!("{} {}{}\n{}", d.day, marker, shade(d.intensity(max)), d.total.round_dp(0))
}

/// Week rows for a Sunday-first grid, padded before the 1st and after the last day.
pub fn calendar_rows(cal: &CalendarMonth) -> Vec<Vec<String>> {
    let max = cal.max_total();
    let mut cells: Vec<String> = vec![String::new(); cal.first_weekday as usize];
    cells.extend(cal.days.iter().map(|d| day_cell(d, max)));
    while cells.len() % 7 != 0 {
        cells.push(String::new());
    }
    cells.chunks(7).map(|w| w.to_vec()).collect()
}
