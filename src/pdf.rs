// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Analytics report as a PDF document.
//!
//! [`build_layout`] decides what goes on the page from the aggregation
//! outputs; [`render`] only places that text with `printpdf`.

use crate::aggregate::{category_breakdown, statistics};
use crate::export::ExportError;
use crate::filter::Period;
use crate::models::{Record, RecordKind};
use crate::utils::fmt_rs;
use chrono::NaiveDateTime;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rgb,
};

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN: f32 = 14.0;
const TOP: f32 = PAGE_H - 20.0;
const ACCENT: (f32, f32, f32) = (16.0, 185.0, 129.0);

const BREAKDOWN_COLS: [f32; 3] = [MARGIN, 100.0, 150.0];
const DETAIL_COLS: [f32; 5] = [MARGIN, 62.0, 100.0, 130.0, 155.0];
const DETAIL_WIDTHS: [usize; 5] = [26, 20, 14, 12, 24];

#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pub title: String,
    pub generated: String,
    pub period: String,
    pub summary_title: String,
    pub summary: Vec<String>,
    pub breakdown_title: String,
    pub breakdown_head: [String; 3],
    pub breakdown: Vec<[String; 3]>,
    pub detail_title: String,
    pub detail_head: [String; 5],
    pub details: Vec<[String; 5]>,
}

pub fn build_layout(
    kind: RecordKind,
    period: Period,
    records: &[Record],
    generated_at: NaiveDateTime,
) -> ReportLayout {
    let label = kind.label();
    let stats = statistics(records);
    let summary = vec![
        format!("Total {}s: {}", label, fmt_rs(&stats.total)),
        format!("Average {}: {}", label, fmt_rs(&stats.average)),
        format!("Highest {}: {}", label, fmt_rs(&stats.max)),
        format!("Lowest {}: {}", label, fmt_rs(&stats.min)),
        format!("Number of Transactions: {}", stats.count),
    ];
    let breakdown = category_breakdown(records)
        .into_iter()
        .map(|c| [c.name, fmt_rs(&c.value), format!("{}%", c.percentage)])
        .collect();
    let details = records
        .iter()
        .map(|r| {
            [
                r.title.clone(),
                r.category.clone(),
                fmt_rs(&r.amount),
                r.date.format("%d/%m/%Y").to_string(),
                if r.note.trim().is_empty() {
                    "-".to_string()
                } else {
                    r.note.clone()
                },
            ]
        })
        .collect();
    let group = kind.breakdown_label();
    ReportLayout {
        title: format!("{} Report", label),
        generated: format!("Generated: {}", generated_at.format("%d/%m/%Y, %H:%M:%S")),
        period: format!("Period: {}", period.label()),
        summary_title: "Summary Statistics".to_string(),
        summary,
        breakdown_title: format!("{} Breakdown", group),
        breakdown_head: [group.to_string(), "Amount".into(), "Percentage".into()],
        breakdown,
        detail_title: format!("Detailed {} List", label),
        detail_head: [
            "Title".into(),
            group.to_string(),
            "Amount".into(),
            "Date".into(),
            "Description".into(),
        ],
        details,
    }
}

fn pdf_err<E: std::fmt::Debug>(e: E) -> ExportError {
    ExportError::Pdf(format!("{:?}", e))
}

fn rgb((r, g, b): (f32, f32, f32)) -> Color {
    Color::Rgb(Rgb::new(r / 255.0, g / 255.0, b / 255.0, None))
}

fn clip(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(3)).collect();
        out.push_str("...");
        out
    }
}

struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl PageWriter<'_> {
    fn ensure_room(&mut self, needed: f32) {
        if self.y - needed < MARGIN {
            let (page, layer) = self.doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = TOP;
        }
    }

    fn text(&mut self, s: &str, size: f32, x: f32, bold: bool) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(s, size, Mm(x), Mm(self.y), font);
    }

    fn heading(&mut self, s: &str, size: f32) {
        self.ensure_room(12.0);
        self.layer.set_fill_color(rgb(ACCENT));
        self.text(s, size, MARGIN, true);
        self.layer.set_fill_color(rgb((0.0, 0.0, 0.0)));
        self.y -= 7.0;
    }

    fn line(&mut self, s: &str, size: f32) {
        self.ensure_room(6.0);
        self.text(s, size, MARGIN, false);
        self.y -= 6.0;
    }

    fn row(
        &mut self,
        cells: &[String],
        cols: &[f32],
        widths: Option<&[usize]>,
        size: f32,
        bold: bool,
    ) {
        self.ensure_room(6.0);
        for (i, (cell, x)) in cells.iter().zip(cols).enumerate() {
            let text = match widths {
                Some(w) => clip(cell, w[i]),
                None => cell.clone(),
            };
            self.text(&text, size, *x, bold);
        }
        self.y -= 5.5;
    }
}

pub fn render(layout: &ReportLayout) -> Result<Vec<u8>, ExportError> {
    let (doc, page, layer) = PdfDocument::new(&layout.title, Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_err)?;
    {
        let mut w = PageWriter {
            doc: &doc,
            layer: doc.get_page(page).get_layer(layer),
            y: TOP,
            regular,
            bold,
        };

        w.heading(&layout.title, 20.0);
        w.y -= 3.0;
        w.line(&layout.generated, 10.0);
        w.line(&layout.period, 10.0);
        w.y -= 4.0;

        w.heading(&layout.summary_title, 14.0);
        for s in &layout.summary {
            w.line(s, 10.0);
        }

        if !layout.breakdown.is_empty() {
            w.y -= 4.0;
            w.heading(&layout.breakdown_title, 14.0);
            w.row(&layout.breakdown_head, &BREAKDOWN_COLS, None, 10.0, true);
            for r in &layout.breakdown {
                w.row(r, &BREAKDOWN_COLS, None, 10.0, false);
            }
        }

        if !layout.details.is_empty() {
            w.y -= 4.0;
            w.heading(&layout.detail_title, 14.0);
            w.row(&layout.detail_head, &DETAIL_COLS, Some(&DETAIL_WIDTHS[..]), 8.0, true);
            for r in &layout.details {
                w.row(r, &DETAIL_COLS, Some(&DETAIL_WIDTHS[..]), 8.0, false);
            }
        }
    }
    doc.save_to_bytes().map_err(pdf_err)
}

/// Build and render in one step.
pub fn report_pdf(
    kind: RecordKind,
    period: Period,
    records: &[Record],
    generated_at: NaiveDateTime,
) -> Result<Vec<u8>, ExportError> {
    let layout = build_layout(kind, period, records, generated_at);
    tracing::debug!(
        rows = layout.details.len(),
        groups = layout.breakdown.len(),
        "rendering pdf report"
    );
    render(&layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_keeps_short_text() {
        assert_eq!(clip("Lunch", 10), "Lunch");
        assert_eq!(clip("A very long description", 10), "A very ...");
    }
}
