// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Configuration management for MyMoney
//!
//! Settings come from a JSON file (missing file means defaults), then from
//! environment variables, which win over the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{MyMoneyError, Result};

/// Secret shipped in the defaults; servers should override it
pub const DEFAULT_SECRET_KEY: &str = "your-secret-key-here-change-in-production";

/// Main application configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// HTTP server settings
    #[serde(default)]
    pub web: WebConfig,

    /// Database settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Token and password hashing settings
    #[serde(default)]
    pub auth: AuthConfig,

    /// Categories offered to clients
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// Terminal client settings
    #[serde(default)]
    pub client: ClientConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WebConfig {
    #[serde(default = "default_web_host")]
    pub host: String,
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// Upper bound for `limit` on listings
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    /// `sqlite:///relative/path.db`, `sqlite:////absolute/path.db`,
    /// `sqlite://:memory:` or a bare file path
    #[serde(default = "default_db_url")]
    pub url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    #[serde(default = "default_secret_key")]
    pub secret_key: String,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_expire_minutes")]
    pub access_token_expire_minutes: i64,
    /// Argon2 memory cost in KiB
    #[serde(default = "default_hash_memory")]
    pub hash_memory_kib: u32,
    /// Argon2 time cost
    #[serde(default = "default_hash_iterations")]
    pub hash_iterations: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ClientConfig {
    #[serde(default = "default_api_url")]
    pub base_url: String,
    #[serde(default = "default_session_file")]
    pub session_file: String,
    #[serde(default = "default_client_timeout")]
    pub timeout_secs: u64,
}

// Default value functions
fn default_app_name() -> String { "MyMoney Expense Tracker".to_string() }
fn default_web_host() -> String { "127.0.0.1".to_string() }
fn default_web_port() -> u16 { 8000 }
fn default_max_page_size() -> u32 { 1000 }
fn default_db_url() -> String { "sqlite:///./mymoney.db".to_string() }
fn default_secret_key() -> String { DEFAULT_SECRET_KEY.to_string() }
fn default_algorithm() -> String { "HS256".to_string() }
fn default_expire_minutes() -> i64 { 1440 }
fn default_hash_memory() -> u32 { 19 * 1024 }
fn default_hash_iterations() -> u32 { 2 }
fn default_api_url() -> String { "http://localhost:8000".to_string() }
fn default_session_file() -> String { "mymoney_session.json".to_string() }
fn default_client_timeout() -> u64 { 30 }

fn default_categories() -> Vec<String> {
    vec!["Food", "Transport", "Shopping", "Bills", "Entertainment", "Health", "Other"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            web: WebConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            categories: default_categories(),
            client: ClientConfig::default(),
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_web_host(),
            port: default_web_port(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { url: default_db_url() }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: default_secret_key(),
            algorithm: default_algorithm(),
            access_token_expire_minutes: default_expire_minutes(),
            hash_memory_kib: default_hash_memory(),
            hash_iterations: default_hash_iterations(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            session_file: default_session_file(),
            timeout_secs: default_client_timeout(),
        }
    }
}

/// Where the SQLite database lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    File(PathBuf),
    Memory,
}

impl DatabaseConfig {
    /// Resolve the URL into a SQLite location; other schemes are rejected
    pub fn location(&self) -> Result<DatabaseLocation> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(MyMoneyError::Config("database url is empty".to_string()));
        }
        let path = match url.split_once("://") {
            Some(("sqlite", rest)) => rest.strip_prefix('/').unwrap_or(rest),
            Some((scheme, _)) => {
                return Err(MyMoneyError::Config(format!(
                    "Unsupported database scheme '{}', only sqlite is available",
                    scheme
                )))
            }
            None => url,
        };
        if path.is_empty() || path == ":memory:" {
            return Ok(DatabaseLocation::Memory);
        }
        Ok(DatabaseLocation::File(PathBuf::from(path)))
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = serde_json::from_str(&content)
                .map_err(|e| MyMoneyError::Config(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            tracing::info!("Config file not found at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Load the file and apply environment overrides
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("APP_NAME") {
            self.app_name = v;
        }
        if let Some(v) = lookup("DATABASE_URL") {
            self.database.url = v;
        }
        if let Some(v) = lookup("SECRET_KEY") {
            self.auth.secret_key = v;
        }
        if let Some(v) = lookup("ALGORITHM") {
            self.auth.algorithm = v;
        }
        if let Some(v) = lookup("ACCESS_TOKEN_EXPIRE_MINUTES") {
            self.auth.access_token_expire_minutes = v.trim().parse().map_err(|_| {
                MyMoneyError::Config(format!("ACCESS_TOKEN_EXPIRE_MINUTES is not a number: {}", v))
            })?;
        }
        if let Some(v) = lookup("MYMONEY_HOST") {
            self.web.host = v;
        }
        if let Some(v) = lookup("MYMONEY_PORT") {
            self.web.port = v
                .trim()
                .parse()
                .map_err(|_| MyMoneyError::Config(format!("MYMONEY_PORT is not a port: {}", v)))?;
        }
        if let Some(v) = lookup("MYMONEY_API_URL") {
            self.client.base_url = v;
        }
        Ok(())
    }

    /// Check settings that would otherwise fail at first use
    pub fn validate(&self) -> Result<()> {
        if self.auth.secret_key.trim().is_empty() {
            return Err(MyMoneyError::Config("auth.secret_key must not be empty".to_string()));
        }
        if !matches!(self.auth.algorithm.as_str(), "HS256" | "HS384" | "HS512") {
            return Err(MyMoneyError::Config(format!(
                "auth.algorithm must be HS256, HS384 or HS512, got {}",
                self.auth.algorithm
            )));
        }
        if self.auth.access_token_expire_minutes <= 0 {
            return Err(MyMoneyError::Config(
                "auth.access_token_expire_minutes must be positive".to_string(),
            ));
        }
        if self.auth.hash_iterations == 0 || self.auth.hash_memory_kib < 8 {
            return Err(MyMoneyError::Config(
                "auth.hash_iterations must be positive and auth.hash_memory_kib at least 8".to_string(),
            ));
        }
        if self.web.max_page_size == 0 {
            return Err(MyMoneyError::Config("web.max_page_size must be positive".to_string()));
        }
        self.database.location()?;
        Ok(())
    }

    pub fn uses_default_secret(&self) -> bool {
        self.auth.secret_key == DEFAULT_SECRET_KEY
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.uses_default_secret());
        assert_eq!(config.web.port, 8000);
        assert_eq!(config.auth.access_token_expire_minutes, 1440);
        assert_eq!(config.categories.len(), 7);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"web": {"port": 9000}, "auth": {"secret_key": "s3cret"}}"#).unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.web.port, 9000);
        assert_eq!(config.web.host, "127.0.0.1");
        assert_eq!(config.auth.secret_key, "s3cret");
        assert_eq!(config.auth.algorithm, "HS256");
        assert!(!config.uses_default_secret());
    }

    #[test]
    fn test_missing_file_and_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut config = AppConfig::load(&path).unwrap();
        config.app_name = "Household".to_string();
        config.save(&path).unwrap();

        let reloaded = AppConfig::load(&path).unwrap();
        assert_eq!(reloaded.app_name, "Household");
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("SECRET_KEY", "from-env"),
            ("DATABASE_URL", "sqlite:////var/lib/mymoney.db"),
            ("ACCESS_TOKEN_EXPIRE_MINUTES", "30"),
            ("MYMONEY_PORT", "8123"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.auth.secret_key, "from-env");
        assert_eq!(config.auth.access_token_expire_minutes, 30);
        assert_eq!(config.web.port, 8123);
        assert_eq!(
            config.database.location().unwrap(),
            DatabaseLocation::File(PathBuf::from("/var/lib/mymoney.db"))
        );

        let bad = |key: &str| (key == "MYMONEY_PORT").then(|| "eighty".to_string());
        assert!(AppConfig::default().apply_overrides(bad).is_err());
    }

    #[test]
    fn test_database_locations() {
        let loc = |url: &str| DatabaseConfig { url: url.to_string() }.location();
        assert_eq!(loc("sqlite:///./mymoney.db").unwrap(), DatabaseLocation::File(PathBuf::from("./mymoney.db")));
        assert_eq!(loc("data/money.db").unwrap(), DatabaseLocation::File(PathBuf::from("data/money.db")));
        assert_eq!(loc("sqlite://:memory:").unwrap(), DatabaseLocation::Memory);
        assert!(loc("postgresql://user@localhost/money").is_err());
        assert!(loc("").is_err());
    }

    #[test]
    fn test_validate_rejects_bad_auth() {
        let mut config = AppConfig::default();
        config.auth.algorithm = "RS256".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.auth.secret_key = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.auth.access_token_expire_minutes = 0;
        assert!(config.validate().is_err());
    }
}
