// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use spendwise::context::{AppContext, Session, Theme};
use spendwise::db;
use spendwise::models::User;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn session() -> Session {
    Session {
        access_token: "access-1".into(),
        refresh_token: Some("refresh-1".into()),
        user: User {
            id: 7,
            username: "alice".into(),
            email: Some("alice@example.com".into()),
            created_at: None,
        },
    }
}

#[test]
fn fresh_store_is_signed_out_and_dark() {
    let conn = setup();
    let ctx = AppContext::hydrate(&conn).unwrap();
    assert!(!ctx.is_authenticated());
    assert!(ctx.access_token().is_none());
    assert_eq!(ctx.theme(), Theme::Dark);
}

#[test]
fn login_survives_rehydration() {
    let conn = setup();
    {
        let mut ctx = AppContext::hydrate(&conn).unwrap();
        ctx.login(session()).unwrap();
        assert!(ctx.is_authenticated());
    }
    let ctx = AppContext::hydrate(&conn).unwrap();
    assert_eq!(ctx.session(), Some(&session()));
    assert_eq!(ctx.access_token(), Some("access-1"));
    assert_eq!(ctx.user().map(|u| u.username.as_str()), Some("alice"));
}

#[test]
fn teardown_clears_session_but_keeps_theme() {
    let conn = setup();
    let mut ctx = AppContext::hydrate(&conn).unwrap();
    ctx.set_theme(Theme::Light).unwrap();
    ctx.login(session()).unwrap();
    ctx.teardown().unwrap();
    assert!(!ctx.is_authenticated());
    // Tearing down twice is harmless.
    ctx.teardown().unwrap();

    let ctx = AppContext::hydrate(&conn).unwrap();
    assert!(!ctx.is_authenticated());
    assert_eq!(ctx.theme(), Theme::Light);
    assert_eq!(db::get_setting(&conn, "access_token").unwrap(), None);
    assert_eq!(db::get_setting(&conn, "refresh_token").unwrap(), None);
}

#[test]
fn toggle_theme_persists() {
    let conn = setup();
    let mut ctx = AppContext::hydrate(&conn).unwrap();
    assert_eq!(ctx.toggle_theme().unwrap(), Theme::Light);
    assert_eq!(AppContext::hydrate(&conn).unwrap().theme(), Theme::Light);
    assert_eq!(ctx.toggle_theme().unwrap(), Theme::Dark);
    assert_eq!(db::get_setting(&conn, "theme").unwrap().as_deref(), Some("dark"));
}

#[test]
fn corrupt_values_fall_back_to_defaults() {
    let conn = setup();
    db::set_setting(&conn, "theme", "sepia").unwrap();
    db::set_setting(&conn, "access_token", "tok").unwrap();
    db::set_setting(&conn, "user", "{not json").unwrap();
    let ctx = AppContext::hydrate(&conn).unwrap();
    assert_eq!(ctx.theme(), Theme::Dark);
    assert!(!ctx.is_authenticated());
    assert_eq!(db::get_setting(&conn, "access_token").unwrap(), None);
}

#[test]
fn token_refresh_keeps_user() {
    let conn = setup();
    let mut ctx = AppContext::hydrate(&conn).unwrap();
    ctx.login(session()).unwrap();
    ctx.update_tokens("access-2".into(), None).unwrap();
    let s = ctx.session().unwrap();
    assert_eq!(s.access_token, "access-2");
    assert_eq!(s.refresh_token.as_deref(), Some("refresh-1"));
    assert_eq!(s.user.id, 7);
    assert_eq!(
        db::get_setting(&conn, "access_token").unwrap().as_deref(),
        Some("access-2")
    );
}

#[test]
fn rejected_token_clears_session_through_context_layers() {
    use anyhow::Context;
    use reqwest::StatusCode;
    use spendwise::api::classify;
    use spendwise::commands;

    let conn = setup();
    let mut ctx = AppContext::hydrate(&conn).unwrap();
    ctx.login(session()).unwrap();

    let denied: anyhow::Result<()> = Err(classify(
        StatusCode::FORBIDDEN,
        Some("Not your record".into()),
    ))
    .context("Failed to update expense");
    assert!(commands::finish(&mut ctx, denied).is_err());
    assert!(ctx.is_authenticated());
    assert_eq!(
        db::get_setting(&conn, "access_token").unwrap().as_deref(),
        Some("access-1")
    );

    let expired: anyhow::Result<()> = Err(classify(
        StatusCode::UNAUTHORIZED,
        Some("Invalid token".into()),
    ))
    .context("Failed to fetch expenses");
    let err = commands::finish(&mut ctx, expired).unwrap_err();
    assert!(err.to_string().contains("Failed to fetch expenses"));
    assert!(!ctx.is_authenticated());
    assert_eq!(db::get_setting(&conn, "access_token").unwrap(), None);
    assert_eq!(db::get_setting(&conn, "user").unwrap(), None);

    assert!(commands::finish(&mut ctx, Ok(())).is_ok());
}
