// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};

use super::{format_timestamp, is_unique_violation, timestamp_column, Database};
use crate::models::User;
use crate::{MyMoneyError, Result};

const USER_COLUMNS: &str = "id, email, username, is_active, created_at";

fn map_user(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        username: row.get(2)?,
        is_active: row.get(3)?,
        created_at: timestamp_column(row, 4)?,
    })
}

impl Database {
    /// Insert a new user. Duplicate email or username is a conflict.
    pub fn create_user(&self, email: &str, username: &str, hashed_password: &str) -> Result<User> {
        let conn = self.lock_conn()?;
        let created_at = Utc::now();
        let inserted = conn.execute(
            "INSERT INTO users (email, username, hashed_password, is_active, created_at)
             VALUES (?1, ?2, ?3, 1, ?4)",
            params![email, username, hashed_password, format_timestamp(&created_at)],
        );
        match inserted {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(MyMoneyError::Conflict("Email or username already registered".to_string()))
            }
            Err(e) => return Err(e.into()),
        }
        let id = conn.last_insert_rowid();
        conn.query_row(
            &format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS),
            params![id],
            map_user,
        )
        .map_err(Into::into)
    }

    pub fn get_user(&self, id: i64) -> Result<Option<User>> {
        let conn = self.lock_conn()?;
        conn.query_row(
            &format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS),
            params![id],
            map_user,
        )
        .optional()
        .map_err(Into::into)
    }

    /// Lookup by email, ignoring case
    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.lock_conn()?;
        conn.query_row(
            &format!("SELECT {} FROM users WHERE email = ?1", USER_COLUMNS),
            params![email],
            map_user,
        )
        .optional()
        .map_err(Into::into)
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let conn = self.lock_conn()?;
        conn.query_row(
            &format!("SELECT {} FROM users WHERE username = ?1", USER_COLUMNS),
            params![username],
            map_user,
        )
        .optional()
        .map_err(Into::into)
    }

    /// User plus stored password hash, for login
    pub fn get_credentials(&self, username: &str) -> Result<Option<(User, String)>> {
        let conn = self.lock_conn()?;
        conn.query_row(
            &format!("SELECT {}, hashed_password FROM users WHERE username = ?1", USER_COLUMNS),
            params![username],
            |row| Ok((map_user(row)?, row.get::<_, String>(5)?)),
        )
        .optional()
        .map_err(Into::into)
    }

    pub fn list_users(&self) -> Result<Vec<User>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(&format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS))?;
        let users = stmt
            .query_map([], map_user)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(users)
    }

    /// Returns false when no such user exists
    pub fn set_user_active(&self, username: &str, active: bool) -> Result<bool> {
        let conn = self.lock_conn()?;
        let changed = conn.execute(
            "UPDATE users SET is_active = ?1 WHERE username = ?2",
            params![active, username],
        )?;
        Ok(changed > 0)
    }

    /// Delete a user together with their transactions and budgets
    pub fn delete_user(&self, id: i64) -> Result<bool> {
        let conn = self.lock_conn()?;
        let deleted = conn.execute("DELETE FROM users WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::models::TransactionType;

    #[test]
    fn test_create_and_lookup() {
        let (db, user) = db_with_user("jane");
        assert!(user.is_active);
        assert_eq!(user.email, "jane@example.com");

        assert_eq!(db.get_user(user.id).unwrap().unwrap(), user);
        assert_eq!(db.get_user_by_username("jane").unwrap().unwrap().id, user.id);
        assert_eq!(db.get_user_by_email("JANE@example.com").unwrap().unwrap().id, user.id);
        assert!(db.get_user_by_username("john").unwrap().is_none());

        let (found, hash) = db.get_credentials("jane").unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(hash, "$argon2id$stub");
    }

    #[test]
    fn test_duplicates_conflict() {
        let (db, _) = db_with_user("jane");
        assert!(matches!(
            db.create_user("jane@example.com", "other", "h"),
            Err(MyMoneyError::Conflict(_))
        ));
        assert!(matches!(
            db.create_user("other@example.com", "jane", "h"),
            Err(MyMoneyError::Conflict(_))
        ));
        assert_eq!(db.list_users().unwrap().len(), 1);
    }

    #[test]
    fn test_deactivate() {
        let (db, user) = db_with_user("jane");
        assert!(db.set_user_active("jane", false).unwrap());
        assert!(!db.get_user(user.id).unwrap().unwrap().is_active);
        assert!(!db.set_user_active("ghost", false).unwrap());
    }

    #[test]
    fn test_delete_cascades() {
        let (db, user) = db_with_user("jane");
        db.create_transaction(user.id, &txn(TransactionType::Income, "100", "Salary", "2024-01-01"))
            .unwrap();
        assert!(db.delete_user(user.id).unwrap());
        assert!(db.get_user(user.id).unwrap().is_none());
        assert_eq!(db.get_stats().unwrap().transaction_count, 0);
        assert!(!db.delete_user(user.id).unwrap());
    }
}
