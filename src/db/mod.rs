// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! SQLite storage for users, transactions and budgets

mod analytics;
mod budgets;
mod transactions;
mod users;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, ErrorCode, Row};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::config::{DatabaseConfig, DatabaseLocation};
use crate::models::{Budget, Month, Transaction, TransactionType, User};
use crate::{MyMoneyError, Result};

/// Database manager for MyMoney (thread-safe wrapper)
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

/// Row counts across the whole database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbStats {
    pub user_count: i64,
    pub transaction_count: i64,
    pub budget_count: i64,
}

/// Everything stored for one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserExport {
    pub user: User,
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub exported_at: DateTime<Utc>,
}

impl Database {
    /// Open or create the database
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Open an in-memory database (for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    /// Open whatever the configured URL points at
    pub fn from_config(config: &DatabaseConfig) -> Result<Self> {
        match config.location()? {
            DatabaseLocation::File(path) => Self::open(path),
            DatabaseLocation::Memory => Self::in_memory(),
        }
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.initialize()?;
        Ok(db)
    }

    fn lock_conn(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| MyMoneyError::Config("Database lock poisoned".to_string()))
    }

    /// Initialize database schema
    fn initialize(&self) -> Result<()> {
        let conn = self.lock_conn()?;
        conn.execute_batch(r#"
            PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE COLLATE NOCASE,
                username TEXT NOT NULL UNIQUE,
                hashed_password TEXT NOT NULL,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                amount TEXT NOT NULL,
                category TEXT NOT NULL,
                description TEXT,
                transaction_type TEXT NOT NULL CHECK (transaction_type IN ('income', 'expense')),
                date TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS budgets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                category TEXT NOT NULL,
                amount TEXT NOT NULL,
                month TEXT NOT NULL,
                UNIQUE(user_id, category, month)
            );

            CREATE INDEX IF NOT EXISTS idx_transactions_user_date ON transactions(user_id, date);
            CREATE INDEX IF NOT EXISTS idx_budgets_user_month ON budgets(user_id, month);
        "#)?;
        Ok(())
    }

    /// Get database statistics
    pub fn get_stats(&self) -> Result<DbStats> {
        let conn = self.lock_conn()?;
        let user_count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        let transaction_count: i64 =
            conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
        let budget_count: i64 = conn.query_row("SELECT COUNT(*) FROM budgets", [], |row| row.get(0))?;
        Ok(DbStats { user_count, transaction_count, budget_count })
    }

    /// Vacuum database
    pub fn vacuum(&self) -> Result<()> {
        let conn = self.lock_conn()?;
        conn.execute("VACUUM", [])?;
        Ok(())
    }

    /// Collect a user's profile, transactions and budgets
    pub fn export_user(&self, user_id: i64) -> Result<Option<UserExport>> {
        let Some(user) = self.get_user(user_id)? else {
            return Ok(None);
        };
        let transactions = self.all_transactions(user_id)?;
        let budgets = self.list_budgets(user_id, None)?;
        Ok(Some(UserExport {
            user,
            transactions,
            budgets,
            exported_at: Utc::now(),
        }))
    }
}

/// Timestamps are stored fixed-width so text comparison orders them
pub(crate) fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn conversion_error<E>(idx: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

pub(crate) fn decimal_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let raw: String = row.get(idx)?;
    raw.parse::<Decimal>().map_err(|e| conversion_error(idx, e))
}

pub(crate) fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(idx, e))
}

pub(crate) fn month_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Month> {
    let raw: String = row.get(idx)?;
    raw.parse::<Month>().map_err(|e| conversion_error(idx, e))
}

pub(crate) fn type_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<TransactionType> {
    let raw: String = row.get(idx)?;
    raw.parse::<TransactionType>().map_err(|e| conversion_error(idx, e))
}

pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(err, rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation)
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::models::{NewBudget, TransactionType};

    #[test]
    fn test_stats_and_export() {
        let (db, user) = db_with_user("jane");
        db.create_transaction(user.id, &txn(TransactionType::Expense, "12.50", "Food", "2024-01-03"))
            .unwrap();
        db.upsert_budget(
            user.id,
            &NewBudget { category: "Food".into(), amount: "200".parse().unwrap(), month: "2024-01".parse().unwrap() },
        )
        .unwrap();

        let stats = db.get_stats().unwrap();
        assert_eq!(stats.user_count, 1);
        assert_eq!(stats.transaction_count, 1);
        assert_eq!(stats.budget_count, 1);

        let export = db.export_user(user.id).unwrap().unwrap();
        assert_eq!(export.user.username, "jane");
        assert_eq!(export.transactions.len(), 1);
        assert_eq!(export.budgets.len(), 1);
        assert!(db.export_user(user.id + 1).unwrap().is_none());
    }

    #[test]
    fn test_file_database_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("money.db");
        {
            let db = Database::open(&path).unwrap();
            db.create_user("a@example.com", "alice", "hash").unwrap();
        }
        let db = Database::open(&path).unwrap();
        assert!(db.get_user_by_username("alice").unwrap().is_some());
        db.vacuum().unwrap();
    }

    #[test]
    fn test_timestamp_format_is_fixed_width() {
        let dt = crate::models::parse_datetime("2024-01-02T03:04:05").unwrap();
        assert_eq!(format_timestamp(&dt), "2024-01-02T03:04:05.000Z");
    }
}
