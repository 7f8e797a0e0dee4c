// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Domain types shared by the store, the HTTP API and the client

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::validation;
use crate::{MyMoneyError, Result};

/// Page size used when a listing does not ask for one
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Direction of a transaction; amounts are always stored positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = MyMoneyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(MyMoneyError::validation(
                "Transaction type must be income or expense",
            )),
        }
    }
}

/// A calendar month, written `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=9999).contains(&year) || !(1..=12).contains(&month) {
            return Err(MyMoneyError::validation(format!(
                "Invalid month {:04}-{:02}",
                year, month
            )));
        }
        Ok(Self { year, month })
    }

    /// The month containing `dt`
    pub fn of(dt: &DateTime<Utc>) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
        }
    }

    pub fn current() -> Self {
        Self::of(&Utc::now())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// `None` before 0001-01
    pub fn prev(&self) -> Option<Self> {
        if self.month == 1 {
            Self::new(self.year - 1, 12).ok()
        } else {
            Some(Self { year: self.year, month: self.month - 1 })
        }
    }

    /// `None` after 9999-12
    pub fn next(&self) -> Option<Self> {
        if self.month == 12 {
            Self::new(self.year + 1, 1).ok()
        } else {
            Some(Self { year: self.year, month: self.month + 1 })
        }
    }

    pub fn contains(&self, dt: &DateTime<Utc>) -> bool {
        *self == Self::of(dt)
    }

    /// Long display name, e.g. "January 2024"
    pub fn label(&self) -> String {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(date) => date.format("%B %Y").to_string(),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = MyMoneyError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || MyMoneyError::validation(format!("Invalid month '{}', expected YYYY-MM", s));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Month::new(year, month).map_err(|_| invalid())
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Years 1 to 9999 keep stored timestamps fixed-width and month keys parseable
fn in_supported_range(dt: DateTime<Utc>) -> Option<DateTime<Utc>> {
    (1..=9999).contains(&dt.year()).then_some(dt)
}

/// Parse a timestamp given as RFC 3339, a naive date-time or a bare date.
/// Naive values are taken as UTC. Results outside years 1..=9999 (after
/// conversion to UTC) are rejected.
pub fn parse_datetime(input: &str) -> Option<DateTime<Utc>> {
    let s = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return in_supported_range(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return in_supported_range(Utc.from_utc_datetime(&naive));
        }
    }
    parse_with_format(s, "%Y-%m-%d")
}

/// Parse with an explicit chrono pattern, accepting date-only patterns
pub fn parse_with_format(input: &str, fmt: &str) -> Option<DateTime<Utc>> {
    let s = input.trim();
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
        return in_supported_range(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(s, fmt)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .and_then(in_supported_range)
}

fn deserialize_optional_datetime<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_datetime(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid datetime '{}'", raw))),
    }
}

/// A registered account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// A single income or expense entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub amount: Decimal,
    pub category: String,
    pub description: Option<String>,
    pub transaction_type: TransactionType,
    pub date: DateTime<Utc>,
}

/// Monthly spending goal for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub user_id: i64,
    pub category: String,
    pub amount: Decimal,
    pub month: Month,
}

/// Checks run on request bodies before they reach the store
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password: String,
}

impl Validate for NewUser {
    fn validate(&self) -> Result<()> {
        validation::validate_email(&self.email)?;
        validation::validate_username(&self.username)?;
        validation::validate_password(&self.password)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    pub amount: Decimal,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub transaction_type: TransactionType,
    /// Defaults to the time of insertion
    #[serde(
        default,
        deserialize_with = "deserialize_optional_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<DateTime<Utc>>,
}

impl Validate for NewTransaction {
    fn validate(&self) -> Result<()> {
        validation::validate_amount(self.amount)?;
        validation::validate_category(&self.category)
    }
}

/// Partial update; absent fields keep their stored value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<DateTime<Utc>>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.transaction_type.is_none()
            && self.date.is_none()
    }

    /// Apply the present fields onto a stored transaction
    pub fn apply_to(&self, txn: &mut Transaction) {
        if let Some(amount) = self.amount {
            txn.amount = amount;
        }
        if let Some(category) = &self.category {
            txn.category = category.trim().to_string();
        }
        if let Some(description) = &self.description {
            txn.description = Some(description.clone());
        }
        if let Some(kind) = self.transaction_type {
            txn.transaction_type = kind;
        }
        if let Some(date) = self.date {
            txn.date = date;
        }
    }
}

impl Validate for TransactionPatch {
    fn validate(&self) -> Result<()> {
        if let Some(amount) = self.amount {
            validation::validate_amount(amount)?;
        }
        if let Some(category) = &self.category {
            validation::validate_category(category)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBudget {
    pub category: String,
    pub amount: Decimal,
    pub month: Month,
}

impl Validate for NewBudget {
    fn validate(&self) -> Result<()> {
        validation::validate_amount(self.amount)?;
        validation::validate_category(&self.category)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetPatch {
    pub amount: Decimal,
}

impl Validate for BudgetPatch {
    fn validate(&self) -> Result<()> {
        validation::validate_amount(self.amount)
    }
}

/// Listing filter for transactions; also the query string of `GET /api/transactions`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Inclusive lower date bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    /// Inclusive upper date bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_parse_and_display() {
        let m: Month = "2024-01".parse().unwrap();
        assert_eq!(m.year(), 2024);
        assert_eq!(m.month(), 1);
        assert_eq!(m.to_string(), "2024-01");
        assert_eq!(m.label(), "January 2024");

        assert!("2024-13".parse::<Month>().is_err());
        assert!("2024-00".parse::<Month>().is_err());
        assert!("2024-1".parse::<Month>().is_err());
        assert!("24-01".parse::<Month>().is_err());
        assert!("2024/01".parse::<Month>().is_err());
        assert!("+024-01".parse::<Month>().is_err());
    }

    #[test]
    fn test_month_navigation() {
        let jan: Month = "2024-01".parse().unwrap();
        assert_eq!(jan.prev().unwrap().to_string(), "2023-12");
        assert_eq!(jan.next().unwrap().to_string(), "2024-02");
        assert_eq!(jan.prev().and_then(|m| m.next()), Some(jan));

        let dec: Month = "2023-12".parse().unwrap();
        assert_eq!(dec.next(), Some(jan));
        assert!(dec < jan);

        assert!("0001-01".parse::<Month>().unwrap().prev().is_none());
        assert!("9999-12".parse::<Month>().unwrap().next().is_none());
    }

    #[test]
    fn test_month_serde() {
        let m: Month = serde_json::from_str("\"2024-06\"").unwrap();
        assert_eq!(serde_json::to_string(&m).unwrap(), "\"2024-06\"");
        assert!(serde_json::from_str::<Month>("\"June\"").is_err());
    }

    #[test]
    fn test_parse_datetime_variants() {
        let rfc = parse_datetime("2024-03-05T10:30:00+02:00").unwrap();
        assert_eq!(rfc.to_rfc3339(), "2024-03-05T08:30:00+00:00");

        let naive = parse_datetime("2024-03-05T10:30:00").unwrap();
        assert_eq!(naive.to_rfc3339(), "2024-03-05T10:30:00+00:00");

        let fractional = parse_datetime("2024-03-05T10:30:00.250").unwrap();
        assert_eq!(fractional.timestamp_subsec_millis(), 250);

        let date_only = parse_datetime("2024-03-05").unwrap();
        assert_eq!(date_only.to_rfc3339(), "2024-03-05T00:00:00+00:00");

        assert!(parse_datetime("05/03/2024").is_none());
        assert!(parse_with_format("05/03/2024", "%d/%m/%Y").is_some());

        // Converting to UTC would move these outside years 1..=9999
        assert!(parse_datetime("0001-01-01T00:30:00+01:00").is_none());
        assert!(parse_datetime("0000-06-01").is_none());
        assert!(parse_datetime("9999-12-31T23:30:00-01:00").is_none());
        assert!(parse_datetime("0001-01-01T00:30:00Z").is_some());
        assert!(parse_with_format("10000-01-01", "%Y-%m-%d").is_none());
    }

    #[test]
    fn test_new_transaction_wire_format() {
        let txn: NewTransaction = serde_json::from_str(
            r#"{"amount": 12.5, "category": "Food", "transaction_type": "expense", "date": "2024-02-01"}"#,
        )
        .unwrap();
        assert_eq!(txn.amount, Decimal::new(125, 1));
        assert_eq!(txn.transaction_type, TransactionType::Expense);
        assert!(txn.description.is_none());
        assert_eq!(Month::of(&txn.date.unwrap()).to_string(), "2024-02");
        assert!(txn.validate().is_ok());

        let bad = serde_json::from_str::<NewTransaction>(
            r#"{"amount": 1, "category": "Food", "transaction_type": "refund"}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_patch_apply() {
        let mut txn = Transaction {
            id: 1,
            user_id: 1,
            amount: Decimal::new(1000, 2),
            category: "Food".to_string(),
            description: None,
            transaction_type: TransactionType::Expense,
            date: parse_datetime("2024-01-01").unwrap(),
        };
        let patch = TransactionPatch {
            amount: Some(Decimal::new(2500, 2)),
            category: Some(" Transport ".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
        patch.apply_to(&mut txn);
        assert_eq!(txn.amount, Decimal::new(25, 0));
        assert_eq!(txn.category, "Transport");
        assert_eq!(txn.transaction_type, TransactionType::Expense);

        assert!(TransactionPatch::default().is_empty());
        let negative = TransactionPatch {
            amount: Some(Decimal::new(-1, 0)),
            ..Default::default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_transaction_type_from_str() {
        assert_eq!("Income".parse::<TransactionType>().unwrap(), TransactionType::Income);
        assert_eq!(" expense ".parse::<TransactionType>().unwrap(), TransactionType::Expense);
        assert!("transfer".parse::<TransactionType>().is_err());
    }
}
