// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

use chrono::{NaiveDate, Utc};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use tracing::debug;

use super::{decimal_column, format_timestamp, timestamp_column, type_column, Database};
use crate::models::{NewTransaction, Transaction, TransactionFilter, TransactionPatch, DEFAULT_PAGE_SIZE};
use crate::Result;

const TXN_COLUMNS: &str = "id, user_id, amount, category, description, transaction_type, date";

fn map_transaction(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: row.get(0)?,
        user_id: row.get(1)?,
        amount: decimal_column(row, 2)?,
        category: row.get(3)?,
        description: row.get(4)?,
        transaction_type: type_column(row, 5)?,
        date: timestamp_column(row, 6)?,
    })
}

fn clean_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(String::from)
}

fn day_start(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn fetch_transaction(conn: &Connection, user_id: i64, id: i64) -> Result<Option<Transaction>> {
    conn.query_row(
        &format!("SELECT {} FROM transactions WHERE id = ?1 AND user_id = ?2", TXN_COLUMNS),
        params![id, user_id],
        map_transaction,
    )
    .optional()
    .map_err(Into::into)
}

fn insert_transaction(conn: &Connection, user_id: i64, new: &NewTransaction) -> Result<Transaction> {
    let txn = Transaction {
        id: 0,
        user_id,
        amount: new.amount,
        category: new.category.trim().to_string(),
        description: clean_description(new.description.as_deref()),
        transaction_type: new.transaction_type,
        date: new.date.unwrap_or_else(Utc::now),
    };
    conn.execute(
        "INSERT INTO transactions (user_id, amount, category, description, transaction_type, date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            user_id,
            txn.amount.to_string(),
            txn.category,
            txn.description,
            txn.transaction_type.as_str(),
            format_timestamp(&txn.date),
        ],
    )?;
    let id = conn.last_insert_rowid();
    fetch_transaction(conn, user_id, id)?
        .ok_or_else(|| crate::MyMoneyError::NotFound("Transaction".to_string()))
}

impl Database {
    /// List a user's transactions, newest first
    pub fn list_transactions(
        &self,
        user_id: i64,
        filter: &TransactionFilter,
        max_limit: u32,
    ) -> Result<Vec<Transaction>> {
        let mut sql = format!("SELECT {} FROM transactions WHERE user_id = ?", TXN_COLUMNS);
        let mut args: Vec<Value> = vec![Value::Integer(user_id)];

        if let Some(kind) = filter.transaction_type {
            sql.push_str(" AND transaction_type = ?");
            args.push(Value::Text(kind.as_str().to_string()));
        }
        if let Some(category) = filter.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            sql.push_str(" AND category = ? COLLATE NOCASE");
            args.push(Value::Text(category.to_string()));
        }
        if let Some(from) = filter.from {
            sql.push_str(" AND date >= ?");
            args.push(Value::Text(day_start(from)));
        }
        // The last representable day has no successor, so it bounds nothing
        if let Some(next_day) = filter.to.and_then(|to| to.succ_opt()) {
            sql.push_str(" AND date < ?");
            args.push(Value::Text(day_start(next_day)));
        }

        let limit = filter.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(max_limit);
        let skip = filter.skip.unwrap_or(0);
        sql.push_str(" ORDER BY date DESC, id DESC LIMIT ? OFFSET ?");
        args.push(Value::Integer(i64::from(limit)));
        args.push(Value::Integer(i64::from(skip)));

        debug!(user_id, limit, skip, "listing transactions");
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let txns = stmt
            .query_map(params_from_iter(args.iter()), map_transaction)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(txns)
    }

    /// Every transaction of a user, oldest first
    pub fn all_transactions(&self, user_id: i64) -> Result<Vec<Transaction>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM transactions WHERE user_id = ?1 ORDER BY date, id",
            TXN_COLUMNS
        ))?;
        let txns = stmt
            .query_map(params![user_id], map_transaction)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(txns)
    }

    pub fn get_transaction(&self, user_id: i64, id: i64) -> Result<Option<Transaction>> {
        let conn = self.lock_conn()?;
        fetch_transaction(&conn, user_id, id)
    }

    pub fn create_transaction(&self, user_id: i64, new: &NewTransaction) -> Result<Transaction> {
        let conn = self.lock_conn()?;
        insert_transaction(&conn, user_id, new)
    }

    /// Insert many transactions atomically; nothing is stored if one fails
    pub fn insert_transactions(&self, user_id: i64, batch: &[NewTransaction]) -> Result<usize> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;
        for new in batch {
            insert_transaction(&tx, user_id, new)?;
        }
        tx.commit()?;
        Ok(batch.len())
    }

    /// Apply a partial update. `None` when the transaction does not exist for this user.
    pub fn update_transaction(
        &self,
        user_id: i64,
        id: i64,
        patch: &TransactionPatch,
    ) -> Result<Option<Transaction>> {
        let conn = self.lock_conn()?;
        let Some(mut txn) = fetch_transaction(&conn, user_id, id)? else {
            return Ok(None);
        };
        if patch.is_empty() {
            return Ok(Some(txn));
        }
        patch.apply_to(&mut txn);
        txn.description = clean_description(txn.description.as_deref());

        conn.execute(
            "UPDATE transactions
             SET amount = ?1, category = ?2, description = ?3, transaction_type = ?4, date = ?5
             WHERE id = ?6 AND user_id = ?7",
            params![
                txn.amount.to_string(),
                txn.category,
                txn.description,
                txn.transaction_type.as_str(),
                format_timestamp(&txn.date),
                id,
                user_id,
            ],
        )?;
        fetch_transaction(&conn, user_id, id)
    }

    /// Returns false when nothing was deleted
    pub fn delete_transaction(&self, user_id: i64, id: i64) -> Result<bool> {
        let conn = self.lock_conn()?;
        let deleted = conn.execute(
            "DELETE FROM transactions WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::models::TransactionType::{Expense, Income};
    use chrono::Duration;
    use rust_decimal::Decimal;

    #[test]
    fn test_create_defaults() {
        let (db, user) = db_with_user("jane");
        let mut new = txn(Expense, "9.99", "  Food ", "2024-01-01");
        new.date = None;
        new.description = Some("   ".to_string());

        let before = Utc::now() - Duration::seconds(1);
        let created = db.create_transaction(user.id, &new).unwrap();
        assert!(created.id > 0);
        assert_eq!(created.category, "Food");
        assert!(created.description.is_none());
        assert_eq!(created.amount, Decimal::new(999, 2));
        assert!(created.date >= before);
    }

    #[test]
    fn test_list_ordering_paging_and_filters() {
        let (db, user) = db_with_user("jane");
        db.create_transaction(user.id, &txn(Expense, "10", "Food", "2024-01-05")).unwrap();
        db.create_transaction(user.id, &txn(Income, "3000", "Salary", "2024-01-01")).unwrap();
        db.create_transaction(user.id, &txn(Expense, "40", "Transport", "2024-02-10")).unwrap();
        db.create_transaction(user.id, &txn(Expense, "15", "food", "2024-02-11")).unwrap();

        let all = db.list_transactions(user.id, &TransactionFilter::default(), 1000).unwrap();
        let dates: Vec<String> = all.iter().map(|t| t.date.format("%m-%d").to_string()).collect();
        assert_eq!(dates, vec!["02-11", "02-10", "01-05", "01-01"]);

        let page = TransactionFilter { skip: Some(1), limit: Some(2), ..Default::default() };
        let page = db.list_transactions(user.id, &page, 1000).unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].category, "Transport");

        let clamped = TransactionFilter { limit: Some(500), ..Default::default() };
        assert_eq!(db.list_transactions(user.id, &clamped, 3).unwrap().len(), 3);

        let expenses = TransactionFilter { transaction_type: Some(Expense), ..Default::default() };
        assert_eq!(db.list_transactions(user.id, &expenses, 1000).unwrap().len(), 3);

        let food = TransactionFilter { category: Some("FOOD".into()), ..Default::default() };
        assert_eq!(db.list_transactions(user.id, &food, 1000).unwrap().len(), 2);

        let january = TransactionFilter {
            from: NaiveDate::from_ymd_opt(2024, 1, 1),
            to: NaiveDate::from_ymd_opt(2024, 1, 31),
            ..Default::default()
        };
        assert_eq!(db.list_transactions(user.id, &january, 1000).unwrap().len(), 2);

        let single_day = TransactionFilter {
            from: NaiveDate::from_ymd_opt(2024, 2, 10),
            to: NaiveDate::from_ymd_opt(2024, 2, 10),
            ..Default::default()
        };
        assert_eq!(db.list_transactions(user.id, &single_day, 1000).unwrap().len(), 1);

        let open_ended = TransactionFilter { to: Some(NaiveDate::MAX), ..Default::default() };
        assert_eq!(db.list_transactions(user.id, &open_ended, 1000).unwrap().len(), 4);
    }

    #[test]
    fn test_empty_description_clears_it() {
        let (db, user) = db_with_user("jane");
        let mut new = txn(Expense, "10", "Food", "2024-01-05");
        new.description = Some("lunch".into());
        let created = db.create_transaction(user.id, &new).unwrap();

        let keep = TransactionPatch { amount: Some(Decimal::ONE), ..Default::default() };
        let kept = db.update_transaction(user.id, created.id, &keep).unwrap().unwrap();
        assert_eq!(kept.description.as_deref(), Some("lunch"));

        let clear = TransactionPatch { description: Some("  ".into()), ..Default::default() };
        let cleared = db.update_transaction(user.id, created.id, &clear).unwrap().unwrap();
        assert!(cleared.description.is_none());
    }

    #[test]
    fn test_rows_are_scoped_to_owner() {
        let (db, jane) = db_with_user("jane");
        let john = db.create_user("john@example.com", "john", "h").unwrap();
        let txn_id = db
            .create_transaction(jane.id, &txn(Expense, "10", "Food", "2024-01-05"))
            .unwrap()
            .id;

        assert!(db.get_transaction(john.id, txn_id).unwrap().is_none());
        assert!(db.list_transactions(john.id, &TransactionFilter::default(), 100).unwrap().is_empty());
        let patch = TransactionPatch { amount: Some(Decimal::ONE), ..Default::default() };
        assert!(db.update_transaction(john.id, txn_id, &patch).unwrap().is_none());
        assert!(!db.delete_transaction(john.id, txn_id).unwrap());
        assert!(db.get_transaction(jane.id, txn_id).unwrap().is_some());
    }

    #[test]
    fn test_update_and_delete() {
        let (db, user) = db_with_user("jane");
        let created = db
            .create_transaction(user.id, &txn(Expense, "10", "Food", "2024-01-05"))
            .unwrap();

        let patch = TransactionPatch {
            amount: Some("12.75".parse().unwrap()),
            description: Some("lunch".into()),
            transaction_type: Some(Income),
            ..Default::default()
        };
        let updated = db.update_transaction(user.id, created.id, &patch).unwrap().unwrap();
        assert_eq!(updated.amount, Decimal::new(1275, 2));
        assert_eq!(updated.description.as_deref(), Some("lunch"));
        assert_eq!(updated.transaction_type, Income);
        assert_eq!(updated.category, "Food");
        assert_eq!(updated.date, created.date);

        assert!(db.delete_transaction(user.id, created.id).unwrap());
        assert!(!db.delete_transaction(user.id, created.id).unwrap());
        assert!(db.update_transaction(user.id, created.id, &patch).unwrap().is_none());
    }

    #[test]
    fn test_bulk_insert_is_atomic() {
        let (db, user) = db_with_user("jane");
        let batch = vec![
            txn(Expense, "1", "Food", "2024-01-01"),
            txn(Expense, "2", "Food", "2024-01-02"),
        ];
        assert_eq!(db.insert_transactions(user.id, &batch).unwrap(), 2);
        assert_eq!(db.all_transactions(user.id).unwrap().len(), 2);

        // A missing owner violates the foreign key and rolls the batch back
        assert!(db.insert_transactions(user.id + 100, &batch).is_err());
        assert_eq!(db.get_stats().unwrap().transaction_count, 2);
    }
}
