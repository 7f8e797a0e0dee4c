// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

use rusqlite::params;

use super::budgets::query_budgets;
use super::{decimal_column, type_column, Database};
use crate::analytics::{
    accumulate, month_window, rank_categories, tally, BudgetStatus, CategoryTotal, MonthlySummary,
};
use crate::models::{Month, TransactionType};
use crate::Result;

impl Database {
    /// Income, expense and balance for one month
    pub fn monthly_summary(&self, user_id: i64, month: Month) -> Result<MonthlySummary> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(
            "SELECT transaction_type, amount FROM transactions
             WHERE user_id = ?1 AND substr(date, 1, 7) = ?2",
        )?;
        let rows = stmt
            .query_map(params![user_id, month.to_string()], |row| {
                Ok((type_column(row, 0)?, decimal_column(row, 1)?))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        let (income, expense) = tally(rows)?;
        MonthlySummary::from_totals(month, income, expense)
    }

    /// Expense totals per category, over one month or all time
    pub fn category_breakdown(&self, user_id: i64, month: Option<Month>) -> Result<Vec<CategoryTotal>> {
        let conn = self.lock_conn()?;
        let mut sql = String::from(
            "SELECT category, amount FROM transactions
             WHERE user_id = ?1 AND transaction_type = 'expense'",
        );
        let month_key = month.map(|m| m.to_string());
        if month_key.is_some() {
            sql.push_str(" AND substr(date, 1, 7) = ?2");
        }
        let mut stmt = conn.prepare(&sql)?;
        let map_row = |row: &rusqlite::Row<'_>| -> rusqlite::Result<(String, Decimal)> {
            Ok((row.get(0)?, decimal_column(row, 1)?))
        };
        let rows = match &month_key {
            Some(key) => stmt.query_map(params![user_id, key], map_row)?.collect::<rusqlite::Result<Vec<_>>>()?,
            None => stmt.query_map(params![user_id], map_row)?.collect::<rusqlite::Result<Vec<_>>>()?,
        };
        rank_categories(rows)
    }

    /// One summary per month for the window ending at `end`, zero-filled
    pub fn monthly_trend(&self, user_id: i64, end: Month, months: usize) -> Result<Vec<MonthlySummary>> {
        let window = month_window(end, months);
        let (first, last) = match (window.first(), window.last()) {
            (Some(first), Some(last)) => (first.to_string(), last.to_string()),
            _ => return Ok(Vec::new()),
        };

        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(
            "SELECT substr(date, 1, 7), transaction_type, amount FROM transactions
             WHERE user_id = ?1 AND substr(date, 1, 7) BETWEEN ?2 AND ?3",
        )?;
        let rows = stmt
            .query_map(params![user_id, first, last], |row| {
                Ok((row.get::<_, String>(0)?, type_column(row, 1)?, decimal_column(row, 2)?))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut per_month: BTreeMap<String, Vec<(TransactionType, Decimal)>> = BTreeMap::new();
        for (key, kind, amount) in rows {
            per_month.entry(key).or_default().push((kind, amount));
        }

        window
            .into_iter()
            .map(|month| {
                let entries = per_month.remove(&month.to_string()).unwrap_or_default();
                let (income, expense) = tally(entries)?;
                MonthlySummary::from_totals(month, income, expense)
            })
            .collect()
    }

    /// Spending against every budget set for the month
    pub fn budget_report(&self, user_id: i64, month: Month) -> Result<Vec<BudgetStatus>> {
        let conn = self.lock_conn()?;
        let budgets = query_budgets(&conn, user_id, Some(month))?;

        let mut stmt = conn.prepare(
            "SELECT category, amount FROM transactions
             WHERE user_id = ?1 AND transaction_type = 'expense' AND substr(date, 1, 7) = ?2",
        )?;
        let rows = stmt
            .query_map(params![user_id, month.to_string()], |row| {
                Ok((row.get::<_, String>(0)?, decimal_column(row, 1)?))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut spent: HashMap<String, Decimal> = HashMap::new();
        accumulate(&mut spent, rows)?;

        budgets
            .iter()
            .map(|budget| {
                let used = spent.get(&budget.category).copied().unwrap_or(Decimal::ZERO);
                BudgetStatus::new(budget, used)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::analytics::BudgetHealth;
    use crate::models::NewBudget;
    use crate::models::TransactionType::{Expense, Income};

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn seeded() -> (Database, i64) {
        let (db, user) = db_with_user("jane");
        let batch = vec![
            txn(Income, "3000", "Salary", "2024-01-01"),
            txn(Expense, "120.50", "Food", "2024-01-04"),
            txn(Expense, "79.50", "Food", "2024-01-20"),
            txn(Expense, "60", "Transport", "2024-01-21"),
            txn(Expense, "45", "Food", "2024-02-02"),
            txn(Income, "500", "Freelance", "2023-11-15"),
        ];
        db.insert_transactions(user.id, &batch).unwrap();
        (db, user.id)
    }

    #[test]
    fn test_monthly_summary() {
        let (db, user_id) = seeded();
        let jan = db.monthly_summary(user_id, "2024-01".parse().unwrap()).unwrap();
        assert_eq!(jan.income, d("3000"));
        assert_eq!(jan.expense, d("260"));
        assert_eq!(jan.balance, d("2740"));
        assert_eq!(jan.savings_rate, d("91.33"));

        let empty = db.monthly_summary(user_id, "2024-05".parse().unwrap()).unwrap();
        assert_eq!(empty.income, Decimal::ZERO);
        assert_eq!(empty.expense, Decimal::ZERO);
    }

    #[test]
    fn test_category_breakdown() {
        let (db, user_id) = seeded();
        let jan = db.category_breakdown(user_id, Some("2024-01".parse().unwrap())).unwrap();
        assert_eq!(jan.len(), 2);
        assert_eq!(jan[0].category, "Food");
        assert_eq!(jan[0].total, d("200"));
        assert_eq!(jan[1].category, "Transport");

        let all_time = db.category_breakdown(user_id, None).unwrap();
        assert_eq!(all_time[0].total, d("245"));
        assert!(all_time.iter().all(|c| c.category != "Salary"));
    }

    #[test]
    fn test_monthly_trend_zero_fills() {
        let (db, user_id) = seeded();
        let trend = db.monthly_trend(user_id, "2024-02".parse().unwrap(), 4).unwrap();
        let months: Vec<String> = trend.iter().map(|s| s.month.to_string()).collect();
        assert_eq!(months, vec!["2023-11", "2023-12", "2024-01", "2024-02"]);
        assert_eq!(trend[0].income, d("500"));
        assert_eq!(trend[1].income, Decimal::ZERO);
        assert_eq!(trend[2].expense, d("260"));
        assert_eq!(trend[3].balance, d("-45"));
    }

    #[test]
    fn test_budget_report() {
        let (db, user_id) = seeded();
        let jan: Month = "2024-01".parse().unwrap();
        for (category, amount) in [("Food", "250"), ("Transport", "50"), ("Health", "100")] {
            db.upsert_budget(
                user_id,
                &NewBudget { category: category.to_string(), amount: d(amount), month: jan },
            )
            .unwrap();
        }

        let report = db.budget_report(user_id, jan).unwrap();
        assert_eq!(report.len(), 3);

        let food = report.iter().find(|s| s.category == "Food").unwrap();
        assert_eq!(food.spent, d("200"));
        assert_eq!(food.percentage, d("80"));
        assert_eq!(food.health, BudgetHealth::Warning);

        let transport = report.iter().find(|s| s.category == "Transport").unwrap();
        assert!(transport.over_budget);
        assert_eq!(transport.remaining, d("-10"));
        assert_eq!(transport.health, BudgetHealth::Critical);

        let health = report.iter().find(|s| s.category == "Health").unwrap();
        assert_eq!(health.spent, Decimal::ZERO);
        assert_eq!(health.health, BudgetHealth::Healthy);
    }
}
