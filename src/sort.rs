// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Record;
use std::cmp::Ordering;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
    TitleAsc,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::DateDesc,
        SortKey::DateAsc,
        SortKey::AmountDesc,
        SortKey::AmountAsc,
        SortKey::TitleAsc,
    ];

    /// Accepts the camelCase names (`dateDesc`) as well as kebab-case (`date-desc`).
    pub fn parse(s: &str) -> Option<SortKey> {
        let norm: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match norm.as_str() {
            "datedesc" => Some(SortKey::DateDesc),
            "dateasc" => Some(SortKey::DateAsc),
            "amountdesc" => Some(SortKey::AmountDesc),
            "amountasc" => Some(SortKey::AmountAsc),
            "titleasc" => Some(SortKey::TitleAsc),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::DateDesc => "dateDesc",
            SortKey::DateAsc => "dateAsc",
            SortKey::AmountDesc => "amountDesc",
            SortKey::AmountAsc => "amountAsc",
            SortKey::TitleAsc => "titleAsc",
        }
    }

    fn compare(self, a: &Record, b: &Record) -> Ordering {
        match self {
            SortKey::DateDesc => b.date.cmp(&a.date),
            SortKey::DateAsc => a.date.cmp(&b.date),
            SortKey::AmountDesc => b.amount.cmp(&a.amount),
            SortKey::AmountAsc => a.amount.cmp(&b.amount),
            SortKey::TitleAsc => collate(&a.title, &b.title),
        }
    }
}

/// Dictionary order for titles: letters first with accents and case folded
/// away, then unaccented before accented, then lowercase before uppercase.
fn collate(a: &str, b: &str) -> Ordering {
    base_key(a)
        .cmp(&base_key(b))
        .then_with(|| accent_key(a).cmp(&accent_key(b)))
        .then_with(|| case_key(a).cmp(&case_key(b)))
        .then_with(|| a.cmp(b))
}

fn base_key(s: &str) -> String {
    s.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn accent_key(s: &str) -> String {
    s.nfkd().flat_map(char::to_lowercase).collect()
}

fn case_key(s: &str) -> Vec<bool> {
    s.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .map(char::is_uppercase)
        .collect()
}

/// Stable sort: records that compare equal keep their relative order.
pub fn sorted(records: &[Record], key: SortKey) -> Vec<Record> {
    let mut out = records.to_vec();
    out.sort_by(|a, b| key.compare(a, b));
    out
}

/// Sort by a user-supplied key name; unknown names leave the order untouched.
pub fn sorted_by_name(records: &[Record], name: &str) -> Vec<Record> {
    match SortKey::parse(name) {
        Some(key) => sorted(records, key),
        None => {
            tracing::debug!(key = name, "unknown sort key, keeping input order");
            records.to_vec()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collate_folds_case_and_accents() {
        assert_eq!(collate("apple", "Banana"), Ordering::Less);
        assert_eq!(collate("apple", "Apple"), Ordering::Less);
        assert_eq!(collate("Éclair", "Zebra"), Ordering::Less);
        assert_eq!(collate("eclair", "éclair"), Ordering::Less);
        assert_eq!(collate("same", "same"), Ordering::Equal);
    }

    #[test]
    fn parse_accepts_both_spellings() {
        assert_eq!(SortKey::parse("amountDesc"), Some(SortKey::AmountDesc));
        assert_eq!(SortKey::parse("title-asc"), Some(SortKey::TitleAsc));
        assert_eq!(SortKey::parse("random"), None);
    }
}
