// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;
use std::str::FromStr;

pub const EXPENSE_CATEGORIES: [&str; 25] = [
    "Food",
    "Transport",
    "Utilities",
    "Entertainment",
    "Health",
    "Education",
    "Shopping",
    "Groceries",
    "Rent",
    "Travel",
    "Insurance",
    "Clothing",
    "Electronics",
    "Fitness",
    "Personal Care",
    "Gifts",
    "Charity",
    "Subscriptions",
    "Dining Out",
    "Pets",
    "Home Improvement",
    "Vehicle Maintenance",
    "Taxes",
    "Investments",
    "Other",
];

pub const INCOME_CATEGORIES: [&str; 16] = [
    "Salary",
    "Freelance",
    "Business",
    "Investment",
    "Rental",
    "Bonus",
    "Commission",
    "Dividend",
    "Interest",
    "Pension",
    "Gift",
    "Refund",
    "Side Hustle",
    "Royalty",
    "Grant",
    "Other",
];

/// Category used when the server hands back a record without one.
pub const FALLBACK_CATEGORY: &str = "Other";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Expense,
    Income,
}

impl RecordKind {
    pub fn label(self) -> &'static str {
        match self {
            RecordKind::Expense => "Expense",
            RecordKind::Income => "Income",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            RecordKind::Expense => "expense",
            RecordKind::Income => "income",
        }
    }

    /// Collection path on the remote API, also used as the CSV file prefix.
    pub fn wire_path(self) -> &'static str {
        match self {
            RecordKind::Expense => "expenses",
            RecordKind::Income => "incomes",
        }
    }

    pub fn date_field(self) -> &'static str {
        match self {
            RecordKind::Expense => "expenseDate",
            RecordKind::Income => "incomeDate",
        }
    }

    pub fn categories(self) -> &'static [&'static str] {
        match self {
            RecordKind::Expense => &EXPENSE_CATEGORIES,
            RecordKind::Income => &INCOME_CATEGORIES,
        }
    }

    /// Heading for the grouping column in reports.
    pub fn breakdown_label(self) -> &'static str {
        match self {
            RecordKind::Expense => "Category",
            RecordKind::Income => "Source",
        }
    }

    pub fn is_known_category(self, category: &str) -> bool {
        self.categories().contains(&category)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for RecordKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expense" | "expenses" => Ok(RecordKind::Expense),
            "income" | "incomes" => Ok(RecordKind::Income),
            other => Err(ValidationError::UnknownKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title is required")]
    MissingTitle,
    #[error("Amount must be greater than zero (got {0})")]
    NonPositiveAmount(Decimal),
    #[error("Amount {0} has more than two decimal places")]
    SubCentAmount(Decimal),
    #[error("'{category}' is not a valid {kind} category")]
    UnknownCategory { kind: RecordKind, category: String },
    #[error("Date {0} is in the future")]
    FutureDate(NaiveDate),
    #[error("Unknown record kind '{0}', expected expense|income")]
    UnknownKind(String),
    #[error("Invalid email address '{0}'")]
    InvalidEmail(String),
}

/// An expense or income entry as held by the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub id: i64,
    pub kind: RecordKind,
    pub title: String,
    pub amount: Decimal,
    pub category: String,
    pub note: String,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Record as returned by the API; the date arrives under a kind-specific name.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPayload {
    pub id: i64,
    pub title: String,
    pub amount: Decimal,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(alias = "expenseDate", alias = "incomeDate")]
    pub date: NaiveDate,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl Record {
    pub fn from_payload(kind: RecordKind, p: RecordPayload) -> Self {
        let category = p
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_CATEGORY.to_string());
        Record {
            id: p.id,
            kind,
            title: p.title,
            amount: p.amount,
            category,
            note: p.note.unwrap_or_default(),
            date: p.date,
            created_at: p.created_at,
            username: p.username,
        }
    }

    /// Editable fields of this record, as sent back on update.
    pub fn to_input(&self) -> RecordInput {
        RecordInput {
            title: self.title.clone(),
            amount: self.amount,
            category: self.category.clone(),
            note: self.note.clone(),
            date: self.date,
        }
    }
}

/// The five user-editable fields of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordInput {
    pub title: String,
    pub amount: Decimal,
    pub category: String,
    pub note: String,
    pub date: NaiveDate,
}

impl RecordInput {
    pub fn validate(&self, kind: RecordKind, today: NaiveDate) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(self.amount));
        }
        // Stored with two decimals server-side; trailing zeros are fine.
        if self.amount.normalize().scale() > 2 {
            return Err(ValidationError::SubCentAmount(self.amount));
        }
        if !kind.is_known_category(&self.category) {
            return Err(ValidationError::UnknownCategory {
                kind,
                category: self.category.clone(),
            });
        }
        if self.date > today {
            return Err(ValidationError::FutureDate(self.date));
        }
        Ok(())
    }

    /// Request body in the shape the API expects for `kind`.
    pub fn to_wire(&self, kind: RecordKind) -> Value {
        let mut body = json!({
            "title": self.title.trim(),
            "amount": self.amount.to_string(),
            "category": self.category,
            "note": self.note,
        });
        body[kind.date_field()] = json!(self.date.to_string());
        body
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}
