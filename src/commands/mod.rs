// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod analytics;
pub mod auth;
pub mod budget;
pub mod categories;
pub mod records;
pub mod theme;

use crate::api::ApiError;
use crate::context::AppContext;
use anyhow::{Result, bail};

/// Record views are only reachable with a stored session.
pub fn require_session(ctx: &AppContext) -> Result<()> {
    if !ctx.is_authenticated() {
        bail!("User not authenticated. Run `spendwise login` first.");
    }
    Ok(())
}

/// Hands back a command's result, clearing the stored session first when the
/// server rejected its token. Context layers added by handlers are looked through.
pub fn finish(ctx: &mut AppContext, result: Result<()>) -> Result<()> {
    if let Err(e) = &result {
        if e.downcast_ref::<ApiError>()
            .is_some_and(ApiError::is_session_ending)
        {
            tracing::warn!("token rejected by server, clearing session");
            ctx.teardown()?;
        }
    }
    result
}
