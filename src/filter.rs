// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Record;
use crate::utils::month_name;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// `"all"` (any case) or an empty value selects every category.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(s.to_string())
        }
    }

    fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => c == category,
        }
    }
}

/// Predicates a list view applies to its collection. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub search: String,
    pub category: CategoryFilter,
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search<T: Into<String>>(mut self, term: T) -> Self {
        self.search = term.into();
        self
    }

    pub fn category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.date_start = start;
        self.date_end = end;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
            && self.category == CategoryFilter::All
            && self.date_start.is_none()
            && self.date_end.is_none()
    }

    pub fn matches(&self, r: &Record) -> bool {
        self.matches_search(r)
            && self.category.matches(&r.category)
            && self.date_start.is_none_or(|start| r.date >= start)
            && self.date_end.is_none_or(|end| r.date <= end)
    }

    fn matches_search(&self, r: &Record) -> bool {
        let term = self.search.trim();
        if term.is_empty() {
            return true;
        }
        let term = term.to_lowercase();
        r.title.to_lowercase().contains(&term)
            || r.note.to_lowercase().contains(&term)
            || r.category.to_lowercase().contains(&term)
    }

    /// Human-readable tags for the filters currently in effect.
    pub fn active_labels(&self) -> Vec<String> {
        let mut out = Vec::new();
        if !self.search.trim().is_empty() {
            out.push(format!("Search: {}", self.search.trim()));
        }
        if let CategoryFilter::Only(c) = &self.category {
            out.push(format!("Category: {}", c));
        }
        if let Some(d) = self.date_start {
            out.push(format!("From: {}", d));
        }
        if let Some(d) = self.date_end {
            out.push(format!("To: {}", d));
        }
        out
    }
}

/// Returns the records matching `spec`, keeping their input order.
pub fn apply(records: &[Record], spec: &FilterSpec) -> Vec<Record> {
    records.iter().filter(|r| spec.matches(r)).cloned().collect()
}

/// Time range selected on the analytics screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    All,
    Year(i32),
    Month { year: i32, month: u32 },
}

impl Period {
    pub fn matches(&self, date: NaiveDate) -> bool {
        match *self {
            Period::All => true,
            Period::Year(y) => date.year() == y,
            Period::Month { year, month } => date.year() == year && date.month() == month,
        }
    }

    pub fn label(&self) -> String {
        match *self {
            Period::All => "All Time".to_string(),
            Period::Year(y) => format!("Year {}", y),
            Period::Month { year, month } => format!("{} {}", month_name(month), year),
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Period::All => "all",
            Period::Year(_) => "year",
            Period::Month { .. } => "month",
        }
    }
}

pub fn in_period(records: &[Record], period: Period) -> Vec<Record> {
    records
        .iter()
        .filter(|r| period.matches(r.date))
        .cloned()
        .collect()
}

/// Distinct years present in the data, newest first.
pub fn available_years(records: &[Record]) -> Vec<i32> {
    let years: BTreeSet<i32> = records.iter().map(|r| r.date.year()).collect();
    years.into_iter().rev().collect()
}
