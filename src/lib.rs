// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod api;
pub mod cli;
pub mod collection;
pub mod commands;
pub mod context;
pub mod db;
pub mod export;
pub mod filter;
pub mod models;
pub mod paginate;
pub mod pdf;
pub mod sort;
pub mod utils;
