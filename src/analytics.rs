// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Monthly summaries, category breakdowns and budget tracking

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{Budget, Month, TransactionType};
use crate::{MyMoneyError, Result};

/// Months shown in a trend when the caller does not say
pub const DEFAULT_TREND_MONTHS: usize = 6;
/// Longest trend served
pub const MAX_TREND_MONTHS: usize = 36;

/// Income and expense totals for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub month: Month,
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
    /// Share of income kept, in percent; zero without income
    pub savings_rate: Decimal,
}

impl MonthlySummary {
    pub fn from_totals(month: Month, income: Decimal, expense: Decimal) -> Result<Self> {
        let balance = checked_sub(income, expense)?;
        Ok(Self {
            month,
            income,
            expense,
            balance,
            savings_rate: percentage_of(balance, income).round_dp(2),
        })
    }

    pub fn empty(month: Month) -> Self {
        Self {
            month,
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
            balance: Decimal::ZERO,
            savings_rate: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

/// Traffic-light state of a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetHealth {
    /// Up to half used
    Healthy,
    /// Up to 80% used
    Warning,
    Critical,
}

impl BudgetHealth {
    pub fn from_percentage(percentage: Decimal) -> Self {
        if percentage <= Decimal::from(50) {
            BudgetHealth::Healthy
        } else if percentage <= Decimal::from(80) {
            BudgetHealth::Warning
        } else {
            BudgetHealth::Critical
        }
    }
}

/// Spending against one budget goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub budget_id: i64,
    pub category: String,
    pub month: Month,
    pub budget: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percentage: Decimal,
    pub health: BudgetHealth,
    pub over_budget: bool,
}

impl BudgetStatus {
    pub fn new(budget: &Budget, spent: Decimal) -> Result<Self> {
        let percentage = percentage_of(spent, budget.amount).round_dp(1);
        let remaining = checked_sub(budget.amount, spent)?;
        Ok(Self {
            budget_id: budget.id,
            category: budget.category.clone(),
            month: budget.month,
            budget: budget.amount,
            spent,
            remaining,
            percentage,
            health: BudgetHealth::from_percentage(percentage),
            over_budget: remaining < Decimal::ZERO,
        })
    }
}

/// `part / whole * 100`, zero when `whole` is not positive
fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

fn overflow() -> MyMoneyError {
    MyMoneyError::Overflow("total exceeds the representable amount".to_string())
}

pub fn checked_add(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_add(b).ok_or_else(overflow)
}

pub fn checked_sub(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_sub(b).ok_or_else(overflow)
}

pub fn savings_rate(income: Decimal, expense: Decimal) -> Decimal {
    income
        .checked_sub(expense)
        .map(|kept| percentage_of(kept, income).round_dp(2))
        .unwrap_or(Decimal::ZERO)
}

/// Sum amounts into (income, expense)
pub fn tally<I>(entries: I) -> Result<(Decimal, Decimal)>
where
    I: IntoIterator<Item = (TransactionType, Decimal)>,
{
    let (mut income, mut expense) = (Decimal::ZERO, Decimal::ZERO);
    for (kind, amount) in entries {
        match kind {
            TransactionType::Income => income = checked_add(income, amount)?,
            TransactionType::Expense => expense = checked_add(expense, amount)?,
        }
    }
    Ok((income, expense))
}

/// Sum per category into `totals`
pub fn accumulate<I>(totals: &mut HashMap<String, Decimal>, entries: I) -> Result<()>
where
    I: IntoIterator<Item = (String, Decimal)>,
{
    for (category, amount) in entries {
        let total = totals.entry(category).or_insert(Decimal::ZERO);
        *total = checked_add(*total, amount)?;
    }
    Ok(())
}

/// Sum per category, largest first, ties by name
pub fn rank_categories<I>(entries: I) -> Result<Vec<CategoryTotal>>
where
    I: IntoIterator<Item = (String, Decimal)>,
{
    let mut totals: HashMap<String, Decimal> = HashMap::new();
    accumulate(&mut totals, entries)?;
    let mut ranked: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, total)| CategoryTotal { category, total })
        .collect();
    ranked.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    Ok(ranked)
}

/// The `months` months ending at `end`, oldest first. Shorter when it
/// would reach before 0001-01.
pub fn month_window(end: Month, months: usize) -> Vec<Month> {
    let months = months.clamp(1, MAX_TREND_MONTHS);
    let mut window = Vec::with_capacity(months);
    let mut current = Some(end);
    while let Some(month) = current {
        window.push(month);
        if window.len() == months {
            break;
        }
        current = month.prev();
    }
    window.reverse();
    window
}
