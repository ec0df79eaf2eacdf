// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::context::{AppContext, Theme};
use anyhow::Result;

pub fn handle(ctx: &mut AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.get_one::<String>("mode").map(String::as_str) {
        Some("toggle") => {
            let t = ctx.toggle_theme()?;
            println!("Theme set to {}", t);
        }
        Some(mode @ ("dark" | "light")) => {
            let t: Theme = mode.parse()?;
            ctx.set_theme(t)?;
            println!("Theme set to {}", t);
        }
        _ => println!("Current theme: {}", ctx.theme()),
    }
    Ok(())
}
