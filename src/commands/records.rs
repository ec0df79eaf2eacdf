// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{Statistics, statistics};
use crate::api::RecordsApi;
use crate::collection::{CancelToken, RecordCollection};
use crate::context::Theme;
use crate::export::{self, ExportFormat};
use crate::filter::{self, CategoryFilter, FilterSpec, Period};
use crate::models::{Record, RecordInput, RecordKind};
use crate::paginate::{Pager, total_pages};
use crate::pdf;
use crate::sort;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{Context, Result, anyhow, bail};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::path::PathBuf;

pub fn handle(
    api: &dyn RecordsApi,
    kind: RecordKind,
    theme: Theme,
    m: &clap::ArgMatches,
) -> Result<()> {
    let token = CancelToken::new();
    let today = Local::now().date_naive();
    match m.subcommand() {
        Some(("add", sub)) => add(api, kind, sub, today, &token)?,
        Some(("edit", sub)) => edit(api, kind, sub, today, &token)?,
        Some(("rm", sub)) => remove(api, kind, sub, &token)?,
        Some(("list", sub)) => list(api, kind, theme, sub, &token)?,
        Some(("export", sub)) => export_records(api, kind, sub, today, &token)?,
        _ => {}
    }
    Ok(())
}

fn add(
    api: &dyn RecordsApi,
    kind: RecordKind,
    sub: &clap::ArgMatches,
    today: NaiveDate,
    token: &CancelToken,
) -> Result<()> {
    let input = input_from_args(sub, None, today)?;
    input.validate(kind, today)?;
    let mut coll = RecordCollection::new(kind);
    let created = coll
        .create(api, &input, token)
        .with_context(|| format!("Failed to add {}", kind))?;
    println!(
        "Recorded {} #{} '{}' {} on {} ({} {}s on record)",
        kind,
        created.id,
        created.title,
        fmt_money(&created.amount),
        created.date,
        coll.len(),
        kind
    );
    Ok(())
}

fn edit(
    api: &dyn RecordsApi,
    kind: RecordKind,
    sub: &clap::ArgMatches,
    today: NaiveDate,
    token: &CancelToken,
) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("id missing")?;
    let mut coll = RecordCollection::new(kind);
    coll.load(api, token)?;
    let existing = coll
        .find(id)
        .ok_or_else(|| anyhow!("{} #{} not found", kind.label(), id))?;
    let input = input_from_args(sub, Some(existing), today)?;
    input.validate(kind, today)?;
    let updated = coll
        .update(api, id, &input, token)
        .with_context(|| format!("Failed to update {}", kind))?;
    println!("Updated {} #{} '{}'", kind, updated.id, updated.title);
    Ok(())
}

fn remove(
    api: &dyn RecordsApi,
    kind: RecordKind,
    sub: &clap::ArgMatches,
    token: &CancelToken,
) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("id missing")?;
    let mut coll = RecordCollection::new(kind);
    coll.load(api, token)?;
    let title = coll
        .find(id)
        .map(|r| r.title.clone())
        .ok_or_else(|| anyhow!("{} #{} not found", kind.label(), id))?;
    coll.delete(api, id, token)
        .with_context(|| format!("Failed to delete {}", kind))?;
    println!(
        "Deleted {} #{} '{}' ({} remaining)",
        kind,
        id,
        title,
        coll.len()
    );
    Ok(())
}

/// Editable fields from flags, falling back to `existing` for anything not given.
pub fn input_from_args(
    sub: &clap::ArgMatches,
    existing: Option<&Record>,
    today: NaiveDate,
) -> Result<RecordInput> {
    let base = existing.map(Record::to_input);
    let title = match sub.get_one::<String>("title") {
        Some(t) => t.trim().to_string(),
        None => base.as_ref().map(|b| b.title.clone()).unwrap_or_default(),
    };
    let amount = match sub.get_one::<String>("amount") {
        Some(a) => parse_decimal(a)?,
        None => base
            .as_ref()
            .map(|b| b.amount)
            .context("amount is required")?,
    };
    let category = match sub.get_one::<String>("category") {
        Some(c) => c.trim().to_string(),
        None => base.as_ref().map(|b| b.category.clone()).unwrap_or_default(),
    };
    let note = match sub.get_one::<String>("note") {
        Some(n) => n.trim().to_string(),
        None => base.as_ref().map(|b| b.note.clone()).unwrap_or_default(),
    };
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => base.as_ref().map(|b| b.date).unwrap_or(today),
    };
    Ok(RecordInput {
        title,
        amount,
        category,
        note,
        date,
    })
}

pub fn filter_spec(sub: &clap::ArgMatches) -> Result<FilterSpec> {
    let start = sub
        .get_one::<String>("from")
        .map(|s| parse_date(s))
        .transpose()?;
    let end = sub
        .get_one::<String>("to")
        .map(|s| parse_date(s))
        .transpose()?;
    Ok(FilterSpec::new()
        .search(sub.get_one::<String>("search").cloned().unwrap_or_default())
        .category(CategoryFilter::parse(
            sub.get_one::<String>("category").map(String::as_str).unwrap_or("all"),
        ))
        .date_range(start, end))
}

/// Filter then sort, the order every list view and export works in.
pub fn prepare(records: &[Record], sub: &clap::ArgMatches) -> Result<Vec<Record>> {
    let spec = filter_spec(sub)?;
    let filtered = filter::apply(records, &spec);
    let key = sub
        .get_one::<String>("sort")
        .map(String::as_str)
        .unwrap_or("dateDesc");
    Ok(sort::sorted_by_name(&filtered, key))
}

#[derive(Debug, Serialize)]
pub struct ListPage {
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub total_count: usize,
    pub filters: Vec<String>,
    /// Over the whole filtered set, not just this page.
    pub statistics: Statistics,
    pub rows: Vec<Record>,
}

pub fn query_page(records: &[Record], sub: &clap::ArgMatches) -> Result<ListPage> {
    let prepared = prepare(records, sub)?;
    let per_page: usize = sub
        .get_one::<String>("per-page")
        .map(|s| s.parse())
        .transpose()
        .context("Invalid page size")?
        .unwrap_or(crate::paginate::DEFAULT_PAGE_SIZE);
    let page = *sub.get_one::<usize>("page").unwrap_or(&1);
    let pager = Pager::new(page, per_page);
    Ok(ListPage {
        page: pager.page,
        per_page: pager.per_page,
        total_pages: total_pages(prepared.len(), pager.per_page),
        total_count: prepared.len(),
        filters: filter_spec(sub)?.active_labels(),
        statistics: statistics(&prepared),
        rows: pager.slice(&prepared).to_vec(),
    })
}

fn list(
    api: &dyn RecordsApi,
    kind: RecordKind,
    theme: Theme,
    sub: &clap::ArgMatches,
    token: &CancelToken,
) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let mut coll = RecordCollection::new(kind);
    coll.load(api, token)
        .with_context(|| format!("Failed to fetch {}", kind.wire_path()))?;
    let view = query_page(coll.records(), sub)?;
    if maybe_print_json(json_flag, jsonl_flag, &view)? {
        return Ok(());
    }
    if !view.filters.is_empty() {
        println!("Active Filters: {}", view.filters.join(" | "));
    }
    if view.total_count == 0 {
        println!("No {} match your filters.", kind.wire_path());
        return Ok(());
    }
    let s = &view.statistics;
    println!(
        "{}",
        pretty_table(
            theme,
            &["Total", "Average", "Highest", "Lowest", "Count"],
            vec![vec![
                fmt_money(&s.total),
                fmt_money(&s.average),
                fmt_money(&s.max),
                fmt_money(&s.min),
                s.count.to_string(),
            ]],
        )
    );
    let rows: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.date.format("%d %b %Y").to_string(),
                r.title.clone(),
                r.category.clone(),
                fmt_money(&r.amount),
                r.note.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            theme,
            &["ID", "Date", "Title", kind.breakdown_label(), "Amount", "Description"],
            rows,
        )
    );
    println!(
        "{} {}{}  ·  Page {} of {}",
        view.total_count,
        kind,
        if view.total_count == 1 { "" } else { "s" },
        view.page,
        view.total_pages.max(1)
    );
    Ok(())
}

fn export_records(
    api: &dyn RecordsApi,
    kind: RecordKind,
    sub: &clap::ArgMatches,
    today: NaiveDate,
    token: &CancelToken,
) -> Result<()> {
    let fmt_raw = sub
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("csv");
    let Some(fmt) = ExportFormat::parse(fmt_raw) else {
        bail!("Unknown format: {} (use csv|json|pdf)", fmt_raw);
    };
    let mut coll = RecordCollection::new(kind);
    coll.load(api, token)
        .with_context(|| format!("Failed to fetch {}", kind.wire_path()))?;
    let rows = prepare(coll.records(), sub)?;
    write_export(kind, fmt, &rows, sub.get_one::<String>("out"), today)
}

/// Write `rows` in `fmt`. PDF failures are reported and swallowed.
pub fn write_export(
    kind: RecordKind,
    fmt: ExportFormat,
    rows: &[Record],
    out: Option<&String>,
    today: NaiveDate,
) -> Result<()> {
    let path = |default: String| out.map(PathBuf::from).unwrap_or_else(|| PathBuf::from(default));
    match fmt {
        ExportFormat::Csv => {
            let path = path(export::csv_filename(kind, today));
            let file = std::fs::File::create(&path)
                .with_context(|| format!("Create {}", path.display()))?;
            export::write_csv(file, rows)?;
            println!("Exported {} {} to {}", rows.len(), kind.wire_path(), path.display());
        }
        ExportFormat::Json => {
            let path = path(export::json_filename(kind, today));
            std::fs::write(&path, export::json_string(rows)?)
                .with_context(|| format!("Write {}", path.display()))?;
            println!("Exported {} {} to {}", rows.len(), kind.wire_path(), path.display());
        }
        ExportFormat::Pdf => {
            let path = path(export::pdf_filename(kind, Period::All, today));
            write_pdf(kind, Period::All, rows, &path);
        }
    }
    Ok(())
}

/// Render and save a PDF report; a failure becomes a notice, never an error.
pub fn write_pdf(
    kind: RecordKind,
    period: Period,
    rows: &[Record],
    path: &std::path::Path,
) -> bool {
    let result = pdf::report_pdf(kind, period, rows, Local::now().naive_local())
        .and_then(|bytes| std::fs::write(path, bytes).map_err(Into::into));
    match result {
        Ok(()) => {
            tracing::info!(path = %path.display(), "pdf report written");
            println!("PDF report saved to {}", path.display());
            true
        }
        Err(e) => {
            tracing::error!(error = %e, "pdf generation failed");
            println!("Failed to generate PDF. Please try again.");
            false
        }
    }
}
