// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::context::Theme;
use crate::models::RecordKind;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(theme: Theme, m: &clap::ArgMatches) -> Result<()> {
    let kind: RecordKind = m
        .get_one::<String>("kind")
        .map(String::as_str)
        .unwrap_or("expense")
        .parse()?;
    let data = kind
        .categories()
        .iter()
        .map(|c| vec![c.to_string()])
        .collect();
    println!("{}", pretty_table(theme, &[kind.breakdown_label()], data));
    Ok(())
}
