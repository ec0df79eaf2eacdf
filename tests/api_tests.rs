// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use reqwest::StatusCode;
use rust_decimal::Decimal;
use spendwise::api::{ApiError, LoginResponse, ProfileUpdate, classify};
use spendwise::commands::auth::merge_user;
use spendwise::models::{Record, RecordInput, RecordKind, RecordPayload, ValidationError};

#[test]
fn token_failures_end_the_session() {
    let e = classify(StatusCode::UNAUTHORIZED, Some("Invalid token".into()));
    assert!(matches!(e, ApiError::SessionExpired { .. }));
    assert!(e.is_session_ending());

    let e = classify(StatusCode::FORBIDDEN, Some("Unauthorized access".into()));
    assert!(e.is_session_ending());
}

#[test]
fn other_auth_failures_keep_the_session() {
    let e = classify(StatusCode::FORBIDDEN, Some("Not your record".into()));
    assert!(matches!(e, ApiError::Unauthorized { .. }));
    assert!(!e.is_session_ending());

    let e = classify(StatusCode::UNAUTHORIZED, None);
    assert_eq!(e.to_string(), "Not authorized: Access denied");
}

#[test]
fn server_errors_carry_message_or_status() {
    let e = classify(StatusCode::BAD_REQUEST, Some("Amount must be positive".into()));
    assert_eq!(e.to_string(), "Amount must be positive");
    // "token" in a non-auth error is not a session problem.
    let e = classify(StatusCode::INTERNAL_SERVER_ERROR, Some("token store down".into()));
    assert!(!e.is_session_ending());
    let e = classify(StatusCode::BAD_GATEWAY, Some("  ".into()));
    assert_eq!(e.to_string(), "Request failed (502 Bad Gateway)");
}

#[test]
fn payloads_decode_with_kind_specific_dates() {
    let expense: RecordPayload = serde_json::from_str(
        r#"{"id":1,"title":"Lunch","amount":12.5,"category":"Food","expenseDate":"2024-01-05","username":"alice"}"#,
    )
    .unwrap();
    let rec = Record::from_payload(RecordKind::Expense, expense);
    assert_eq!(rec.date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    assert_eq!(rec.amount, Decimal::new(125, 1));
    assert_eq!(rec.note, "");

    let income: RecordPayload = serde_json::from_str(
        r#"{"id":2,"title":"Pay","amount":"1000","incomeDate":"2024-01-31","note":"Jan"}"#,
    )
    .unwrap();
    let rec = Record::from_payload(RecordKind::Income, income);
    assert_eq!(rec.category, "Other");
    assert_eq!(rec.note, "Jan");
    assert_eq!(rec.kind, RecordKind::Income);
}

#[test]
fn wire_body_uses_kind_specific_date_key() {
    let input = RecordInput {
        title: " Rent ".into(),
        amount: Decimal::from(900),
        category: "Rent".into(),
        note: String::new(),
        date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
    };
    let body = input.to_wire(RecordKind::Expense);
    assert_eq!(body["title"], "Rent");
    assert_eq!(body["expenseDate"], "2024-02-01");
    assert!(body.get("incomeDate").is_none());
    assert_eq!(input.to_wire(RecordKind::Income)["incomeDate"], "2024-02-01");
}

#[test]
fn validation_rules() {
    let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let good = RecordInput {
        title: "Salary".into(),
        amount: Decimal::from(5000),
        category: "Salary".into(),
        note: String::new(),
        date: today,
    };
    assert!(good.validate(RecordKind::Income, today).is_ok());
    assert!(matches!(
        good.validate(RecordKind::Expense, today),
        Err(ValidationError::UnknownCategory { .. })
    ));

    let mut blank = good.clone();
    blank.title = "   ".into();
    assert_eq!(blank.validate(RecordKind::Income, today), Err(ValidationError::MissingTitle));

    let mut cents = good.clone();
    cents.amount = "1.005".parse().unwrap();
    assert_eq!(
        cents.validate(RecordKind::Income, today),
        Err(ValidationError::SubCentAmount(cents.amount))
    );
    cents.amount = "0.125".parse().unwrap();
    assert!(cents.validate(RecordKind::Income, today).is_err());
    cents.amount = "12.500".parse().unwrap();
    assert!(cents.validate(RecordKind::Income, today).is_ok());
    cents.amount = "0.01".parse().unwrap();
    assert!(cents.validate(RecordKind::Income, today).is_ok());

    let mut future = good.clone();
    future.date = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
    assert!(matches!(
        future.validate(RecordKind::Income, today),
        Err(ValidationError::FutureDate(_))
    ));
    assert_eq!(RecordKind::Expense.categories().len(), 25);
    assert_eq!(RecordKind::Income.categories().len(), 16);
    assert!("incomes".parse::<RecordKind>().is_ok());
    assert!("transfer".parse::<RecordKind>().is_err());
}

#[test]
fn login_response_becomes_session() {
    let resp: LoginResponse = serde_json::from_str(
        r#"{"accessToken":"a","refreshToken":"r","tokenType":"Bearer","id":3,"username":"bob","email":"bob@example.com"}"#,
    )
    .unwrap();
    let session = resp.into_session();
    assert_eq!(session.access_token, "a");
    assert_eq!(session.refresh_token.as_deref(), Some("r"));
    assert_eq!(session.user.username, "bob");

    let merged = merge_user(
        session.user,
        &ProfileUpdate {
            email: Some("robert@example.com".into()),
            ..Default::default()
        },
    );
    assert_eq!(merged.username, "bob");
    assert_eq!(merged.email.as_deref(), Some("robert@example.com"));
}
