// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::filter::Period;
use crate::models::{Record, RecordKind};
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

pub const CSV_HEADER: [&str; 5] = ["Title", "Category", "Amount", "Date", "Description"];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("PDF rendering failed: {0}")]
    Pdf(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Pdf,
}

impl ExportFormat {
    pub fn parse(s: &str) -> Option<ExportFormat> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            "pdf" => Some(ExportFormat::Pdf),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    title: &'a str,
    category: &'a str,
    amount: String,
    date: String,
    description: &'a str,
}

impl<'a> ExportRow<'a> {
    fn from_record(r: &'a Record) -> Self {
        ExportRow {
            title: &r.title,
            category: &r.category,
            amount: format!("{:.2}", r.amount),
            date: r.date.to_string(),
            description: &r.note,
        }
    }
}

/// One header row plus one row per record, RFC 4180 quoted.
pub fn write_csv<W: Write>(out: W, records: &[Record]) -> Result<(), ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);
    wtr.write_record(CSV_HEADER)?;
    for r in records {
        let row = ExportRow::from_record(r);
        wtr.write_record([
            row.title,
            row.category,
            row.amount.as_str(),
            row.date.as_str(),
            row.description,
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn csv_string(records: &[Record]) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_csv(&mut buf, records)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn json_string(records: &[Record]) -> Result<String, ExportError> {
    let rows: Vec<ExportRow<'_>> = records.iter().map(ExportRow::from_record).collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

/// `expenses_2024-01-31.csv`
pub fn csv_filename(kind: RecordKind, today: NaiveDate) -> String {
    format!("{}_{}.csv", kind.wire_path(), today)
}

pub fn json_filename(kind: RecordKind, today: NaiveDate) -> String {
    format!("{}_{}.json", kind.wire_path(), today)
}

/// `expense_report_month_2024-01-31.pdf`
pub fn pdf_filename(kind: RecordKind, period: Period, today: NaiveDate) -> String {
    format!("{}_report_{}_{}.pdf", kind.slug(), period.slug(), today)
}
