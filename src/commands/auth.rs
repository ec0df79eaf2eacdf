// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::{ApiClient, ProfileUpdate};
use crate::commands::require_session;
use crate::context::{AppContext, Theme};
use crate::models::{User, ValidationError};
use crate::utils::{is_valid_email, pretty_table};
use anyhow::{Context, Result, bail};

pub fn register(api: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let username = sub.get_one::<String>("username").context("username missing")?;
    let email = sub.get_one::<String>("email").context("email missing")?;
    let password = sub.get_one::<String>("password").context("password missing")?;
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail(email.clone()).into());
    }
    let msg = api
        .register(username.trim(), email.trim(), password)
        .context("Error registering user")?;
    println!("{}", msg);
    Ok(())
}

pub fn login(ctx: &mut AppContext, api: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let username = sub.get_one::<String>("username").context("username missing")?;
    let password = sub.get_one::<String>("password").context("password missing")?;
    let resp = api
        .login(username.trim(), password)
        .context("Invalid username or password. Please try again.")?;
    let session = resp.into_session();
    let name = session.user.username.clone();
    ctx.login(session)?;
    println!("Logged in as {}", name);
    Ok(())
}

/// Server-side logout is best effort; the local session is always cleared.
pub fn logout(ctx: &mut AppContext, api: &ApiClient) -> Result<()> {
    if ctx.is_authenticated() {
        if let Err(e) = api.logout() {
            tracing::warn!(error = %e, "server logout failed");
        }
    }
    ctx.teardown()?;
    println!("Logged out");
    Ok(())
}

pub fn whoami(ctx: &AppContext) -> Result<()> {
    match ctx.user() {
        Some(u) => println!("{}", user_table(u, ctx.theme())),
        None => println!("Not logged in"),
    }
    Ok(())
}

pub fn refresh(ctx: &mut AppContext, api: &ApiClient) -> Result<()> {
    require_session(ctx)?;
    let Some(refresh_token) = ctx.session().and_then(|s| s.refresh_token.clone()) else {
        bail!("No refresh token stored. Please log in again.");
    };
    let resp = api.refresh(&refresh_token).context("Token refresh failed")?;
    ctx.update_tokens(resp.access_token, resp.refresh_token)?;
    println!("Access token refreshed");
    Ok(())
}

pub fn profile(ctx: &mut AppContext, api: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    require_session(ctx)?;
    match m.subcommand() {
        Some(("update", sub)) => update_profile(ctx, api, sub),
        _ => {
            let user = api.me().context("Failed to load profile")?;
            ctx.update_user(user.clone())?;
            println!("{}", user_table(&user, ctx.theme()));
            Ok(())
        }
    }
}

fn update_profile(ctx: &mut AppContext, api: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let update = ProfileUpdate {
        username: sub.get_one::<String>("username").map(|s| s.trim().to_string()),
        email: sub.get_one::<String>("email").map(|s| s.trim().to_string()),
        password: sub.get_one::<String>("password").cloned(),
    };
    if update.username.is_none() && update.email.is_none() && update.password.is_none() {
        bail!("Nothing to update: pass --username, --email or --password");
    }
    if let Some(email) = &update.email {
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail(email.clone()).into());
        }
    }
    let msg = api
        .update_profile(&update)
        .context("Failed to update profile")?;
    if let Some(current) = ctx.user().cloned() {
        let merged = merge_user(current, &update);
        ctx.update_user(merged)?;
    }
    println!("{}", msg);
    Ok(())
}

pub fn merge_user(mut user: User, update: &ProfileUpdate) -> User {
    if let Some(name) = &update.username {
        user.username = name.clone();
    }
    if let Some(email) = &update.email {
        user.email = Some(email.clone());
    }
    user
}

fn user_table(u: &User, theme: Theme) -> comfy_table::Table {
    pretty_table(
        theme,
        &["ID", "Username", "Email", "Member since"],
        vec![vec![
            u.id.to_string(),
            u.username.clone(),
            u.email.clone().unwrap_or_default(),
            u.created_at.clone().unwrap_or_default(),
        ]],
    )
}
