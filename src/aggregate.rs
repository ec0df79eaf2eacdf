// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Report aggregations over an already-filtered record collection.
//!
//! Every function here is total: an empty input yields zeroed or empty
//! output, never an error.

use crate::models::{Record, RecordKind};
use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Number of trailing weeks kept by [`weekly_trend`].
pub const WEEKLY_WINDOW: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub total: Decimal,
    pub average: Decimal,
    pub max: Decimal,
    pub min: Decimal,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub name: String,
    pub value: Decimal,
    /// Share of the grand total, one decimal place.
    pub percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    /// Sortable bucket key: `YYYY-MM` or `YYYY-Www`.
    pub period: String,
    pub label: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalendarDay {
    pub day: u32,
    pub income: Decimal,
    pub expense: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DayTone {
    Idle,
    Surplus,
    Deficit,
    Balanced,
}

impl CalendarDay {
    fn empty(day: u32) -> Self {
        CalendarDay {
            day,
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }

    pub fn tone(&self) -> DayTone {
        if self.total.is_zero() {
            DayTone::Idle
        } else if self.income > self.expense {
            DayTone::Surplus
        } else if self.expense > self.income {
            DayTone::Deficit
        } else {
            DayTone::Balanced
        }
    }

    /// Activity relative to the busiest day of the month, in `0..=1`.
    pub fn intensity(&self, max_total: Decimal) -> Decimal {
        if max_total.is_zero() {
            Decimal::ZERO
        } else {
            self.total / max_total
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    /// Weekday of the 1st, 0 = Sunday.
    pub first_weekday: u32,
    pub days: Vec<CalendarDay>,
}

impl CalendarMonth {
    pub fn days_in_month(&self) -> u32 {
        self.days.len() as u32
    }

    pub fn max_total(&self) -> Decimal {
        self.days
            .iter()
            .map(|d| d.total)
            .max()
            .unwrap_or(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSummary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
}

pub fn statistics(records: &[Record]) -> Statistics {
    let count = records.len();
    let total: Decimal = records.iter().map(|r| r.amount).sum();
    let average = if count == 0 {
        Decimal::ZERO
    } else {
        total / Decimal::from(count)
    };
    let max = records.iter().map(|r| r.amount).max().unwrap_or(Decimal::ZERO);
    let min = records.iter().map(|r| r.amount).min().unwrap_or(Decimal::ZERO);
    Statistics {
        total,
        average,
        max,
        min,
        count,
    }
}

/// Totals per category in order of first appearance.
pub fn category_breakdown(records: &[Record]) -> Vec<CategoryShare> {
    let mut order: Vec<(String, Decimal)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for r in records {
        match index.get(r.category.as_str()) {
            Some(&i) => order[i].1 += r.amount,
            None => {
                index.insert(r.category.as_str(), order.len());
                order.push((r.category.clone(), r.amount));
            }
        }
    }
    let grand: Decimal = order.iter().map(|(_, v)| *v).sum();
    order
        .into_iter()
        .map(|(name, value)| CategoryShare {
            name,
            value,
            percentage: percent_of(value, grand),
        })
        .collect()
}

fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    (part / whole * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Sum per calendar month, oldest first.
pub fn monthly_trend(records: &[Record]) -> Vec<TrendPoint> {
    let mut buckets: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();
    for r in records {
        *buckets
            .entry((r.date.year(), r.date.month()))
            .or_insert(Decimal::ZERO) += r.amount;
    }
    buckets
        .into_iter()
        .map(|((y, m), amount)| {
            let key = format!("{:04}-{:02}", y, m);
            TrendPoint {
                period: key.clone(),
                label: key,
                amount,
            }
        })
        .collect()
}

/// Calendar-year-relative week number: week 1 holds January 1st and ends on
/// the first Saturday. This is not ISO-8601 week numbering.
pub fn week_number(date: NaiveDate) -> u32 {
    let jan1_offset = NaiveDate::from_ymd_opt(date.year(), 1, 1)
        .map(|d| d.weekday().num_days_from_sunday())
        .unwrap_or(0);
    // ceil((days_since_jan1 + jan1_offset + 1) / 7)
    (date.ordinal0() + jan1_offset + 1).div_ceil(7)
}

/// Sum per week for the most recent [`WEEKLY_WINDOW`] weeks that have data, oldest first.
pub fn weekly_trend(records: &[Record]) -> Vec<TrendPoint> {
    let mut buckets: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();
    for r in records {
        *buckets
            .entry((r.date.year(), week_number(r.date)))
            .or_insert(Decimal::ZERO) += r.amount;
    }
    let skip = buckets.len().saturating_sub(WEEKLY_WINDOW);
    buckets
        .into_iter()
        .skip(skip)
        .map(|((y, w), amount)| TrendPoint {
            period: format!("{:04}-W{:02}", y, w),
            label: format!("Week {}", w),
            amount,
        })
        .collect()
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((next - first).num_days() as u32)
}

/// Day-by-day income and expense for one month, zero-filled.
///
/// Records of both kinds may be mixed in `records`; anything outside the
/// month is ignored. Returns `None` only for an impossible `(year, month)`.
pub fn calendar_month(records: &[Record], year: i32, month: u32) -> Option<CalendarMonth> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let len = days_in_month(year, month)?;
    let mut days: Vec<CalendarDay> = (1..=len).map(CalendarDay::empty).collect();
    for r in records {
        if r.date.year() != year || r.date.month() != month {
            continue;
        }
        let slot = &mut days[(r.date.day() - 1) as usize];
        match r.kind {
            RecordKind::Income => slot.income += r.amount,
            RecordKind::Expense => slot.expense += r.amount,
        }
        slot.total += r.amount;
    }
    Some(CalendarMonth {
        year,
        month,
        first_weekday: first.weekday().num_days_from_sunday(),
        days,
    })
}

/// Income, expense and balance for one month across both record kinds.
pub fn month_summary(records: &[Record], year: i32, month: u32) -> MonthSummary {
    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;
    for r in records
        .iter()
        .filter(|r| r.date.year() == year && r.date.month() == month)
    {
        match r.kind {
            RecordKind::Income => total_income += r.amount,
            RecordKind::Expense => total_expense += r.amount,
        }
    }
    MonthSummary {
        total_income,
        total_expense,
        balance: total_income - total_expense,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn week_one_starts_on_jan_first() {
        // 2023-01-01 was a Sunday, 2024-01-01 a Monday.
        assert_eq!(week_number(d(2023, 1, 1)), 1);
        assert_eq!(week_number(d(2023, 1, 7)), 1);
        assert_eq!(week_number(d(2023, 1, 8)), 2);
        assert_eq!(week_number(d(2024, 1, 1)), 1);
        assert_eq!(week_number(d(2024, 1, 6)), 1);
        assert_eq!(week_number(d(2024, 1, 7)), 2);
    }

    #[test]
    fn week_number_at_year_end() {
        // 2024 is a leap year starting on Monday: Dec 31 is day 365 (0-based).
        assert_eq!(week_number(d(2024, 12, 31)), 53);
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(2024, 12), Some(31));
        assert_eq!(days_in_month(2024, 13), None);
    }

    #[test]
    fn percent_of_zero_total_is_zero() {
        assert_eq!(percent_of(Decimal::ONE, Decimal::ZERO), Decimal::ZERO);
    }
}
