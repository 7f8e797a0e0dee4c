// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! MyMoney: personal expense tracker
//!
//! An HTTP service for recording income and expenses, setting monthly
//! budget goals and reviewing spending, plus a command-line client.

pub mod analytics;
pub mod auth;
pub mod client;
pub mod config;
pub mod csv_io;
pub mod db;
pub mod error;
pub mod format;
pub mod logging;
pub mod models;
pub mod session;
pub mod validation;
pub mod web;

pub use config::AppConfig;
pub use error::{MyMoneyError, Result};
