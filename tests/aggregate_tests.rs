// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use spendwise::aggregate::{
    DayTone, WEEKLY_WINDOW, calendar_month, category_breakdown, month_summary, monthly_trend,
    statistics, weekly_trend,
};
use spendwise::models::{Record, RecordKind};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn rec(kind: RecordKind, amount: i64, category: &str, d: &str) -> Record {
    Record {
        id: 0,
        kind,
        title: format!("{} {}", category, d),
        amount: Decimal::from(amount),
        category: category.to_string(),
        note: String::new(),
        date: date(d),
        created_at: None,
        username: None,
    }
}

fn scenario() -> Vec<Record> {
    vec![
        rec(RecordKind::Expense, 100, "Food", "2024-01-05"),
        rec(RecordKind::Expense, 200, "Food", "2024-02-10"),
        rec(RecordKind::Expense, 50, "Travel", "2024-01-20"),
    ]
}

#[test]
fn statistics_for_three_records() {
    let s = statistics(&scenario());
    assert_eq!(s.total, Decimal::from(350));
    assert_eq!(s.average.round_dp(2), Decimal::new(11667, 2));
    assert_eq!(s.max, Decimal::from(200));
    assert_eq!(s.min, Decimal::from(50));
    assert_eq!(s.count, 3);
}

#[test]
fn statistics_for_nothing_are_zero() {
    let s = statistics(&[]);
    assert_eq!(s.total, Decimal::ZERO);
    assert_eq!(s.average, Decimal::ZERO);
    assert_eq!(s.max, Decimal::ZERO);
    assert_eq!(s.min, Decimal::ZERO);
    assert_eq!(s.count, 0);
}

#[test]
fn breakdown_groups_in_first_seen_order() {
    let shares = category_breakdown(&scenario());
    assert_eq!(shares.len(), 2);
    assert_eq!(shares[0].name, "Food");
    assert_eq!(shares[0].value, Decimal::from(300));
    assert_eq!(shares[0].percentage, Decimal::new(857, 1));
    assert_eq!(shares[1].name, "Travel");
    assert_eq!(shares[1].value, Decimal::from(50));
    assert_eq!(shares[1].percentage, Decimal::new(143, 1));
}

#[test]
fn breakdown_sums_back_to_total() {
    let records = vec![
        rec(RecordKind::Expense, 10, "Food", "2024-01-01"),
        rec(RecordKind::Expense, 10, "Rent", "2024-01-02"),
        rec(RecordKind::Expense, 10, "Pets", "2024-01-03"),
        rec(RecordKind::Expense, 7, "Food", "2024-01-04"),
    ];
    let shares = category_breakdown(&records);
    let value_sum: Decimal = shares.iter().map(|c| c.value).sum();
    assert_eq!(value_sum, statistics(&records).total);
    let pct_sum: Decimal = shares.iter().map(|c| c.percentage).sum();
    assert!((pct_sum - Decimal::ONE_HUNDRED).abs() <= Decimal::new(2, 1));
    assert!(category_breakdown(&[]).is_empty());
}

#[test]
fn monthly_trend_is_chronological() {
    let trend = monthly_trend(&scenario());
    let points: Vec<(&str, Decimal)> = trend
        .iter()
        .map(|p| (p.period.as_str(), p.amount))
        .collect();
    assert_eq!(
        points,
        vec![("2024-01", Decimal::from(150)), ("2024-02", Decimal::from(200))]
    );
}

#[test]
fn weekly_trend_keeps_the_latest_window() {
    let start = date("2024-01-01");
    let records: Vec<Record> = (0..10)
        .map(|i| {
            let d = start + Duration::days(7 * i);
            rec(RecordKind::Expense, 5, "Food", &d.to_string())
        })
        .collect();
    let trend = weekly_trend(&records);
    assert_eq!(trend.len(), WEEKLY_WINDOW);
    assert_eq!(trend[0].period, "2024-W03");
    assert_eq!(trend[0].label, "Week 3");
    assert_eq!(trend[WEEKLY_WINDOW - 1].period, "2024-W10");
    assert!(trend.iter().all(|p| p.amount == Decimal::from(5)));
}

#[test]
fn weekly_trend_orders_across_year_boundary() {
    let records = vec![
        rec(RecordKind::Expense, 3, "Food", "2024-01-02"),
        rec(RecordKind::Expense, 4, "Food", "2023-12-30"),
        rec(RecordKind::Expense, 6, "Food", "2024-01-03"),
    ];
    let trend = weekly_trend(&records);
    assert_eq!(trend.len(), 2);
    assert!(trend[0].period.starts_with("2023-"));
    assert_eq!(trend[1].period, "2024-W01");
    assert_eq!(trend[1].amount, Decimal::from(9));
}

#[test]
fn calendar_month_without_records_is_zero_filled() {
    let cal = calendar_month(&[], 2024, 2).unwrap();
    assert_eq!(cal.days_in_month(), 29);
    // 2024-02-01 was a Thursday.
    assert_eq!(cal.first_weekday, 4);
    assert!(cal.days.iter().all(|d| d.total.is_zero() && d.tone() == DayTone::Idle));
    assert_eq!(cal.max_total(), Decimal::ZERO);
    assert!(calendar_month(&[], 2024, 13).is_none());
}

#[test]
fn calendar_month_splits_by_kind() {
    let records = vec![
        rec(RecordKind::Expense, 30, "Food", "2024-02-03"),
        rec(RecordKind::Income, 100, "Salary", "2024-02-03"),
        rec(RecordKind::Expense, 20, "Food", "2024-02-05"),
        rec(RecordKind::Income, 999, "Bonus", "2024-03-03"),
    ];
    let cal = calendar_month(&records, 2024, 2).unwrap();
    let d3 = cal.days[2];
    assert_eq!(d3.income, Decimal::from(100));
    assert_eq!(d3.expense, Decimal::from(30));
    assert_eq!(d3.total, Decimal::from(130));
    assert_eq!(d3.tone(), DayTone::Surplus);
    assert_eq!(cal.days[4].tone(), DayTone::Deficit);
    assert_eq!(cal.max_total(), Decimal::from(130));
    assert_eq!(d3.intensity(cal.max_total()), Decimal::ONE);

    let s = month_summary(&records, 2024, 2);
    assert_eq!(s.total_income, Decimal::from(100));
    assert_eq!(s.total_expense, Decimal::from(50));
    assert_eq!(s.balance, Decimal::from(50));
}
