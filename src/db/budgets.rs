// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{decimal_column, month_column, Database};
use crate::models::{Budget, BudgetPatch, Month, NewBudget};
use crate::{MyMoneyError, Result};

const BUDGET_COLUMNS: &str = "id, user_id, category, amount, month";

fn map_budget(row: &Row<'_>) -> rusqlite::Result<Budget> {
    Ok(Budget {
        id: row.get(0)?,
        user_id: row.get(1)?,
        category: row.get(2)?,
        amount: decimal_column(row, 3)?,
        month: month_column(row, 4)?,
    })
}

fn fetch_budget(conn: &Connection, user_id: i64, id: i64) -> Result<Option<Budget>> {
    conn.query_row(
        &format!("SELECT {} FROM budgets WHERE id = ?1 AND user_id = ?2", BUDGET_COLUMNS),
        params![id, user_id],
        map_budget,
    )
    .optional()
    .map_err(Into::into)
}

/// Budgets of one user, optionally narrowed to a month
pub(super) fn query_budgets(conn: &Connection, user_id: i64, month: Option<Month>) -> Result<Vec<Budget>> {
    let budgets = match month {
        Some(month) => {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM budgets WHERE user_id = ?1 AND month = ?2 ORDER BY category",
                BUDGET_COLUMNS
            ))?;
            let rows = stmt
                .query_map(params![user_id, month.to_string()], map_budget)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
        }
        None => {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM budgets WHERE user_id = ?1 ORDER BY month DESC, category",
                BUDGET_COLUMNS
            ))?;
            let rows = stmt
                .query_map(params![user_id], map_budget)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
        }
    };
    Ok(budgets)
}

impl Database {
    pub fn list_budgets(&self, user_id: i64, month: Option<Month>) -> Result<Vec<Budget>> {
        let conn = self.lock_conn()?;
        query_budgets(&conn, user_id, month)
    }

    /// Set the goal for a category and month, replacing any earlier amount
    pub fn upsert_budget(&self, user_id: i64, new: &NewBudget) -> Result<Budget> {
        let conn = self.lock_conn()?;
        let category = new.category.trim();
        let month = new.month.to_string();
        conn.execute(
            "INSERT INTO budgets (user_id, category, amount, month) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(user_id, category, month) DO UPDATE SET amount = excluded.amount",
            params![user_id, category, new.amount.to_string(), month],
        )?;
        conn.query_row(
            &format!(
                "SELECT {} FROM budgets WHERE user_id = ?1 AND category = ?2 AND month = ?3",
                BUDGET_COLUMNS
            ),
            params![user_id, category, month],
            map_budget,
        )
        .optional()?
        .ok_or_else(|| MyMoneyError::NotFound("Budget".to_string()))
    }

    pub fn get_budget(&self, user_id: i64, id: i64) -> Result<Option<Budget>> {
        let conn = self.lock_conn()?;
        fetch_budget(&conn, user_id, id)
    }

    /// Change a budget's amount. `None` when it does not exist for this user.
    pub fn update_budget(&self, user_id: i64, id: i64, patch: &BudgetPatch) -> Result<Option<Budget>> {
        let conn = self.lock_conn()?;
        let changed = conn.execute(
            "UPDATE budgets SET amount = ?1 WHERE id = ?2 AND user_id = ?3",
            params![patch.amount.to_string(), id, user_id],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        fetch_budget(&conn, user_id, id)
    }

    pub fn delete_budget(&self, user_id: i64, id: i64) -> Result<bool> {
        let conn = self.lock_conn()?;
        let deleted = conn.execute(
            "DELETE FROM budgets WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        Ok(deleted > 0)
    }
}
