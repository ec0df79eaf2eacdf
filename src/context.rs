// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::{get_setting, remove_settings, set_setting};
use crate::models::User;
use anyhow::{Context, Result};
use comfy_table::Color;
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use rusqlite::Connection;
use std::fmt;
use std::str::FromStr;

const ACCESS_TOKEN: &str = "access_token";
const REFRESH_TOKEN: &str = "refresh_token";
const USER: &str = "user";
const THEME: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Border preset for terminal tables.
    pub fn table_preset(self) -> &'static str {
        match self {
            Theme::Dark => UTF8_FULL,
            Theme::Light => UTF8_FULL_CONDENSED,
        }
    }

    /// Header colour readable on the matching terminal background.
    pub fn accent(self) -> Color {
        match self {
            Theme::Dark => Color::Cyan,
            Theme::Light => Color::DarkBlue,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        })
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(anyhow::anyhow!("Unknown theme '{}', expected dark|light", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub user: User,
}

/// Session and preferences shared by every command, backed by the settings table.
///
/// Built once with [`AppContext::hydrate`] and passed down explicitly.
pub struct AppContext<'c> {
    conn: &'c Connection,
    session: Option<Session>,
    theme: Theme,
}

impl<'c> AppContext<'c> {
    pub fn hydrate(conn: &'c Connection) -> Result<Self> {
        let theme = match get_setting(conn, THEME)? {
            // A corrupt preference falls back to the default rather than blocking startup.
            Some(t) => t.parse().unwrap_or_default(),
            None => Theme::default(),
        };
        let session = match (get_setting(conn, ACCESS_TOKEN)?, get_setting(conn, USER)?) {
            (Some(access_token), Some(user_json)) => match serde_json::from_str::<User>(&user_json)
            {
                Ok(user) => Some(Session {
                    access_token,
                    refresh_token: get_setting(conn, REFRESH_TOKEN)?,
                    user,
                }),
                Err(e) => {
                    tracing::warn!(error = %e, "stored user is unreadable, dropping session");
                    remove_settings(conn, &[ACCESS_TOKEN, REFRESH_TOKEN, USER])?;
                    None
                }
            },
            _ => None,
        };
        Ok(AppContext {
            conn,
            session,
            theme,
        })
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.access_token.as_str())
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn login(&mut self, session: Session) -> Result<()> {
        set_setting(self.conn, ACCESS_TOKEN, &session.access_token)?;
        match &session.refresh_token {
            Some(t) => set_setting(self.conn, REFRESH_TOKEN, t)?,
            None => remove_settings(self.conn, &[REFRESH_TOKEN])?,
        }
        let user_json = serde_json::to_string(&session.user).context("Serialize user")?;
        set_setting(self.conn, USER, &user_json)?;
        tracing::info!(user = %session.user.username, "session stored");
        self.session = Some(session);
        Ok(())
    }

    /// Replace the cached user after a profile update.
    pub fn update_user(&mut self, user: User) -> Result<()> {
        let user_json = serde_json::to_string(&user).context("Serialize user")?;
        set_setting(self.conn, USER, &user_json)?;
        if let Some(s) = self.session.as_mut() {
            s.user = user;
        }
        Ok(())
    }

    pub fn update_tokens(
        &mut self,
        access_token: String,
        refresh_token: Option<String>,
    ) -> Result<()> {
        set_setting(self.conn, ACCESS_TOKEN, &access_token)?;
        if let Some(t) = &refresh_token {
            set_setting(self.conn, REFRESH_TOKEN, t)?;
        }
        if let Some(s) = self.session.as_mut() {
            s.access_token = access_token;
            if refresh_token.is_some() {
                s.refresh_token = refresh_token;
            }
        }
        Ok(())
    }

    /// Forget tokens and user. The theme preference survives.
    pub fn teardown(&mut self) -> Result<()> {
        remove_settings(self.conn, &[ACCESS_TOKEN, REFRESH_TOKEN, USER])?;
        if self.session.take().is_some() {
            tracing::info!("session cleared");
        }
        Ok(())
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        set_setting(self.conn, THEME, &theme.to_string())?;
        self.theme = theme;
        Ok(())
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        let next = self.theme.toggled();
        self.set_theme(next)?;
        Ok(next)
    }
}
