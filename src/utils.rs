// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use crate::context::Theme;
use comfy_table::{Attribute, Cell, Table};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

const UA: &str = concat!(
    "spendwise/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/spendwise)"
);

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

static EMAIL: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn month_name(month: u32) -> &'static str {
    MONTHS
        .get(month.wrapping_sub(1) as usize)
        .copied()
        .unwrap_or("Unknown")
}

/// Terminal money format with the rupee sign.
pub fn fmt_money(d: &Decimal) -> String {
    format!("₹{:.2}", d.round_dp(2))
}

/// ASCII money format for PDF output, where the rupee glyph is not guaranteed.
pub fn fmt_rs(d: &Decimal) -> String {
    format!("Rs.{:.2}", d.round_dp(2))
}

pub fn is_valid_email(s: &str) -> bool {
    EMAIL.as_ref().is_some_and(|re| re.is_match(s.trim()))
}

pub fn pretty_table(theme: Theme, headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(theme.table_preset());
    t.set_header(headers.iter().map(|h| {
        Cell::new(*h)
            .fg(theme.accent())
            .add_attribute(Attribute::Bold)
    }));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_formats_two_decimals() {
        let d = "1234.5".parse::<Decimal>().unwrap();
        assert_eq!(fmt_rs(&d), "Rs.1234.50");
        assert_eq!(fmt_money(&d), "₹1234.50");
    }

    #[test]
    fn month_names_are_one_based() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(0), "Unknown");
    }

    #[test]
    fn light_theme_drops_row_separators() {
        let rows = || vec![vec!["a".to_string()], vec!["b".to_string()], vec!["c".to_string()]];
        let dark = pretty_table(Theme::Dark, &["X"], rows()).to_string();
        let light = pretty_table(Theme::Light, &["X"], rows()).to_string();
        assert_eq!(dark.lines().count(), 9);
        assert_eq!(light.lines().count(), 7);
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("john@email.com"));
        assert!(!is_valid_email("john@"));
        assert!(!is_valid_email("no at sign"));
    }
}
