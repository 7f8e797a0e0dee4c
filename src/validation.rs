// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Input validation rules for registration, transactions and budgets

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::{MyMoneyError, Result};

/// Longest category name accepted
pub const MAX_CATEGORY_LEN: usize = 64;
/// Largest single amount accepted (one trillion)
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.-]+@[\w.-]+\.\w+$").expect("email pattern compiles"));
static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("username pattern compiles"));

pub fn validate_email(email: &str) -> Result<()> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(MyMoneyError::validation("Invalid email address"))
    }
}

pub fn validate_username(username: &str) -> Result<()> {
    if username.chars().count() < 3 {
        return Err(MyMoneyError::validation(
            "Username must be at least 3 characters long",
        ));
    }
    if !USERNAME_RE.is_match(username) {
        return Err(MyMoneyError::validation(
            "Username can only contain letters, numbers, and underscores",
        ));
    }
    Ok(())
}

/// Password strength: length, mixed case and a digit
pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < 8 {
        return Err(MyMoneyError::validation(
            "Password must be at least 8 characters long",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(MyMoneyError::validation(
            "Password must contain at least one uppercase letter",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(MyMoneyError::validation(
            "Password must contain at least one lowercase letter",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(MyMoneyError::validation(
            "Password must contain at least one number",
        ));
    }
    Ok(())
}

pub fn validate_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(MyMoneyError::validation("Amount must be greater than zero"));
    }
    if amount > Decimal::from(MAX_AMOUNT) {
        return Err(MyMoneyError::validation(format!(
            "Amount cannot be greater than {}",
            MAX_AMOUNT
        )));
    }
    Ok(())
}

pub fn validate_category(category: &str) -> Result<()> {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        return Err(MyMoneyError::validation("Category cannot be empty"));
    }
    if trimmed.chars().count() > MAX_CATEGORY_LEN {
        return Err(MyMoneyError::validation(format!(
            "Category cannot be longer than {} characters",
            MAX_CATEGORY_LEN
        )));
    }
    Ok(())
}
