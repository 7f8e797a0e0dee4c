// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Saved login for the command-line client

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::Result;

/// A bearer token obtained from `POST /token`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub token: String,
    pub base_url: String,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(username: &str, token: &str, base_url: &str) -> Self {
        Self {
            username: username.to_string(),
            token: token.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            created_at: Utc::now(),
        }
    }

    /// Whether this session was issued by the server at `base_url`
    pub fn is_for(&self, base_url: &str) -> bool {
        self.base_url == base_url.trim_end_matches('/')
    }
}

/// JSON file holding at most one session
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Replace the stored session
    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// The stored session. An unreadable file counts as logged out.
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        match serde_json::from_str(&content) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!("Ignoring unreadable session file {}: {}", self.path.display(), e);
                Ok(None)
            }
        }
    }

    /// Forget the session. Returns false when there was none.
    pub fn clear(&self) -> Result<bool> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            return Ok(true);
        }
        Ok(false)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_load_clear() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().join("nested").join("session.json"));
        assert!(store.load().unwrap().is_none());

        let session = Session::new("jane", "abc.def.ghi", "http://localhost:8000/");
        store.save(&session).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, session);
        assert!(loaded.is_for("http://localhost:8000"));
        assert!(!loaded.is_for("http://example.com"));

        assert!(store.clear().unwrap());
        assert!(!store.clear().unwrap());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_is_logged_out() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();
        let store = SessionStore::new(path);
        assert!(store.load().unwrap().is_none());
    }
}
