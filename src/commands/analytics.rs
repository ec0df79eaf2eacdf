// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{
    CategoryShare, Statistics, TrendPoint, category_breakdown, monthly_trend, statistics,
    weekly_trend,
};
use crate::api::RecordsApi;
use crate::collection::{CancelToken, RecordCollection};
use crate::commands::records::write_pdf;
use crate::context::Theme;
use crate::export::pdf_filename;
use crate::filter::{Period, available_years, in_period};
use crate::models::{Record, RecordKind};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::cmp::Ordering;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
pub struct AnalyticsReport {
    pub kind: RecordKind,
    pub period: String,
    pub available_years: Vec<i32>,
    pub statistics: Statistics,
    pub breakdown: Vec<CategoryShare>,
    pub monthly: Vec<TrendPoint>,
    pub weekly: Vec<TrendPoint>,
    pub insights: Insights,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Flat,
}

impl TrendDirection {
    fn label(self) -> &'static str {
        match self {
            TrendDirection::Increasing => "Increasing",
            TrendDirection::Decreasing => "Decreasing",
            TrendDirection::Flat => "Flat",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    /// Largest group by value; the earliest seen wins a tie.
    pub top: Option<CategoryShare>,
    /// Last monthly point against the one before it.
    pub trend: Option<TrendDirection>,
    /// Records per day over 30 days for a month, 365 otherwise.
    pub per_day: Decimal,
    pub diversity: usize,
}

pub fn insights(
    period: Period,
    stats: &Statistics,
    breakdown: &[CategoryShare],
    monthly: &[TrendPoint],
) -> Insights {
    let top = breakdown
        .iter()
        .fold(None::<&CategoryShare>, |best, c| match best {
            Some(b) if b.value >= c.value => Some(b),
            _ => Some(c),
        })
        .cloned();
    let trend = match monthly {
        [.., prev, last] => Some(match last.amount.cmp(&prev.amount) {
            Ordering::Greater => TrendDirection::Increasing,
            Ordering::Less => TrendDirection::Decreasing,
            Ordering::Equal => TrendDirection::Flat,
        }),
        _ => None,
    };
    let days = match period {
        Period::Month { .. } => 30,
        _ => 365,
    };
    let per_day = (Decimal::from(stats.count) / Decimal::from(days))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    Insights {
        top,
        trend,
        per_day,
        diversity: breakdown.len(),
    }
}

/// Resolve `--range/--year/--month`, defaulting to the current year and month.
pub fn period_from_args(sub: &clap::ArgMatches) -> Period {
    let now = Local::now().date_naive();
    let year = sub.get_one::<i32>("year").copied().unwrap_or(now.year());
    let month = sub.get_one::<u32>("month").copied().unwrap_or(now.month());
    match sub.get_one::<String>("range").map(String::as_str) {
        Some("year") => Period::Year(year),
        Some("month") => Period::Month { year, month },
        _ => Period::All,
    }
}

pub fn build_report(kind: RecordKind, period: Period, records: &[Record]) -> AnalyticsReport {
    let filtered = in_period(records, period);
    let stats = statistics(&filtered);
    let breakdown = category_breakdown(&filtered);
    let monthly = monthly_trend(&filtered);
    AnalyticsReport {
        kind,
        period: period.label(),
        available_years: available_years(records),
        insights: insights(period, &stats, &breakdown, &monthly),
        statistics: stats,
        breakdown,
        monthly,
        weekly: weekly_trend(&filtered),
    }
}

pub fn handle(api: &dyn RecordsApi, theme: Theme, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let kind: RecordKind = m
        .get_one::<String>("kind")
        .map(String::as_str)
        .unwrap_or("expense")
        .parse()?;
    let period = period_from_args(m);

    let token = CancelToken::new();
    let mut coll = RecordCollection::new(kind);
    coll.load(api, &token).context("Failed to fetch data")?;

    if m.get_flag("pdf") {
        let today = Local::now().date_naive();
        let path = m
            .get_one::<String>("out")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(pdf_filename(kind, period, today)));
        let filtered = in_period(coll.records(), period);
        write_pdf(kind, period, &filtered, &path);
        return Ok(());
    }

    let report = build_report(kind, period, coll.records());
    tracing::debug!(
        kind = %kind,
        count = report.statistics.count,
        groups = report.breakdown.len(),
        "analytics computed"
    );
    if maybe_print_json(json_flag, jsonl_flag, &report)? {
        return Ok(());
    }
    print_report(&report, theme);
    Ok(())
}

fn print_report(r: &AnalyticsReport, theme: Theme) {
    let label = r.kind.label();
    println!("{} Analytics · {}", label, r.period);
    let s = &r.statistics;
    println!(
        "{}",
        pretty_table(
            theme,
            &["Statistic", "Value"],
            vec![
                vec![format!("Total {}s", label), fmt_money(&s.total)],
                vec![format!("Average {}", label), fmt_money(&s.average)],
                vec![format!("Highest {}", label), fmt_money(&s.max)],
                vec![format!("Lowest {}", label), fmt_money(&s.min)],
                vec!["Transactions".into(), s.count.to_string()],
            ],
        )
    );
    if r.breakdown.is_empty() {
        println!("No {} data for this period.", r.kind);
        return;
    }
    let rows = r
        .breakdown
        .iter()
        .map(|c| vec![c.name.clone(), fmt_money(&c.value), format!("{}%", c.percentage)])
        .collect();
    println!(
        "{}",
        pretty_table(theme, &[r.kind.breakdown_label(), "Amount", "Share"], rows)
    );
    let rows = r
        .monthly
        .iter()
        .map(|p| vec![p.label.clone(), fmt_money(&p.amount)])
        .collect();
    println!("{}", pretty_table(theme, &["Month", "Amount"], rows));
    let rows = r
        .weekly
        .iter()
        .map(|p| vec![p.period.clone(), p.label.clone(), fmt_money(&p.amount)])
        .collect();
    println!("{}", pretty_table(theme, &["Key", "Week", "Amount"], rows));
    print_insights(r, theme);
}

fn print_insights(r: &AnalyticsReport, theme: Theme) {
    let expense = r.kind == RecordKind::Expense;
    let i = &r.insights;
    let mut rows = Vec::new();
    if let Some(top) = &i.top {
        rows.push(vec![
            if expense { "Top Spending Category" } else { "Top Income Source" }.to_string(),
            format!("{} · {} ({}% of total)", top.name, fmt_money(&top.value), top.percentage),
        ]);
    }
    if let Some(t) = i.trend {
        rows.push(vec![
            if expense { "Spending Trend" } else { "Income Trend" }.to_string(),
            format!("{} vs previous month", t.label()),
        ]);
    }
    rows.push(vec![
        "Transaction Frequency".to_string(),
        format!("{} per day (avg)", i.per_day),
    ]);
    rows.push(vec![
        format!("{} Diversity", r.kind.breakdown_label()),
        format!("{} actively used", i.diversity),
    ]);
    println!("{}", pretty_table(theme, &["Insight", "Value"], rows));
}
