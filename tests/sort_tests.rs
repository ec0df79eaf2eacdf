// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use spendwise::models::{Record, RecordKind};
use spendwise::sort::{SortKey, sorted, sorted_by_name};

fn rec(id: i64, title: &str, amount: i64, d: &str) -> Record {
    Record {
        id,
        kind: RecordKind::Income,
        title: title.to_string(),
        amount: Decimal::from(amount),
        category: "Salary".to_string(),
        note: String::new(),
        date: NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap(),
        created_at: None,
        username: None,
    }
}

fn ids(records: &[Record]) -> Vec<i64> {
    records.iter().map(|r| r.id).collect()
}

fn sample() -> Vec<Record> {
    vec![
        rec(1, "banana", 20, "2024-03-01"),
        rec(2, "Apple", 50, "2024-01-15"),
        rec(3, "cherry", 20, "2024-03-01"),
        rec(4, "apple", 10, "2024-02-01"),
    ]
}

#[test]
fn each_key_orders_as_named() {
    let records = sample();
    assert_eq!(ids(&sorted(&records, SortKey::DateDesc)), vec![1, 3, 4, 2]);
    assert_eq!(ids(&sorted(&records, SortKey::DateAsc)), vec![2, 4, 1, 3]);
    assert_eq!(ids(&sorted(&records, SortKey::AmountDesc)), vec![2, 1, 3, 4]);
    assert_eq!(ids(&sorted(&records, SortKey::AmountAsc)), vec![4, 1, 3, 2]);
}

#[test]
fn title_sort_is_case_insensitive() {
    let out = sorted(&sample(), SortKey::TitleAsc);
    let titles: Vec<&str> = out.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(&titles[2..], &["banana", "cherry"]);
    assert!(titles[..2].iter().all(|t| t.eq_ignore_ascii_case("apple")));
}

#[test]
fn equal_keys_keep_input_order() {
    // 1 and 3 share both date and amount.
    let records = sample();
    let by_date = sorted(&records, SortKey::DateDesc);
    assert_eq!(&ids(&by_date)[..2], &[1, 3]);
    let reversed: Vec<Record> = records.iter().rev().cloned().collect();
    let by_date = sorted(&reversed, SortKey::DateDesc);
    assert_eq!(&ids(&by_date)[..2], &[3, 1]);
}

#[test]
fn sorting_is_idempotent() {
    let records = sample();
    for key in SortKey::ALL {
        let once = sorted(&records, key);
        let twice = sorted(&once, key);
        assert_eq!(once, twice, "{}", key.as_str());
    }
}

#[test]
fn unknown_key_is_identity() {
    let records = sample();
    assert_eq!(sorted_by_name(&records, "byColour"), records);
    assert_eq!(ids(&sorted_by_name(&records, "amount-asc")), vec![4, 1, 3, 2]);
}

#[test]
fn default_key_is_newest_first() {
    assert_eq!(SortKey::default(), SortKey::DateDesc);
    assert!(sorted(&[], SortKey::TitleAsc).is_empty());
}

#[test]
fn title_sort_folds_accents_and_puts_lowercase_first() {
    let records = vec![
        rec(1, "Zebra", 1, "2024-01-01"),
        rec(2, "Éclair", 1, "2024-01-01"),
        rec(3, "apple", 1, "2024-01-01"),
        rec(4, "Apple", 1, "2024-01-01"),
    ];
    let out = sorted(&records, SortKey::TitleAsc);
    let titles: Vec<&str> = out.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["apple", "Apple", "Éclair", "Zebra"]);
}
