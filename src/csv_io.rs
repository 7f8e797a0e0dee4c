// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! CSV import and export of transactions
//!
//! Rows are `date,description,amount[,category]`. The amount sign gives the
//! direction: positive is income, negative is expense. Exports use the same
//! leading columns so an export can be imported again.

use chrono::SecondsFormat;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use rust_decimal::Decimal;

use crate::models::{parse_datetime, parse_with_format, NewTransaction, Transaction, TransactionType};
use crate::validation::{validate_amount, validate_category};
use crate::{MyMoneyError, Result};

/// Category given to imported rows that carry none
pub const IMPORT_CATEGORY: &str = "Imported";

#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub delimiter: u8,
    pub has_header: bool,
    /// chrono pattern for the date column; `None` accepts RFC 3339,
    /// `YYYY-MM-DDTHH:MM:SS` and `YYYY-MM-DD`
    pub date_format: Option<String>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
            date_format: None,
        }
    }
}

/// Accepts `,` `;` `|` and a tab (literal, `\t` or `tab`)
pub fn parse_delimiter(raw: &str) -> Result<u8> {
    match raw {
        "," => Ok(b','),
        ";" => Ok(b';'),
        "|" => Ok(b'|'),
        "\t" | "\\t" | "tab" => Ok(b'\t'),
        other => Err(MyMoneyError::validation(format!(
            "Unsupported delimiter '{}', use one of , ; | or tab",
            other
        ))),
    }
}

fn signed_amount(txn: &Transaction) -> Decimal {
    match txn.transaction_type {
        TransactionType::Income => txn.amount,
        TransactionType::Expense => -txn.amount,
    }
}

/// Render transactions as CSV with a header row
pub fn export_transactions(transactions: &[Transaction]) -> Result<String> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(["date", "description", "amount", "category", "type", "id"])?;
    for txn in transactions {
        writer.write_record([
            txn.date.to_rfc3339_opts(SecondsFormat::Millis, true),
            txn.description.clone().unwrap_or_default(),
            signed_amount(txn).to_string(),
            txn.category.clone(),
            txn.transaction_type.to_string(),
            txn.id.to_string(),
        ])?;
    }
    let bytes = writer.into_inner().map_err(|e| MyMoneyError::FileSystem(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| MyMoneyError::Corrupt(format!("CSV output: {}", e)))
}

/// Parse an uploaded CSV. Any bad record rejects the whole file.
pub fn parse_import(data: &str, options: &ImportOptions) -> Result<Vec<NewTransaction>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_header)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(data.as_bytes());

    let mut parsed = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        let number = idx + 1;
        let reject = |msg: String| MyMoneyError::validation(format!("Record {}: {}", number, msg));

        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let raw_date = record.get(0).unwrap_or_default();
        let date = match &options.date_format {
            Some(fmt) => parse_with_format(raw_date, fmt),
            None => parse_datetime(raw_date),
        }
        .ok_or_else(|| reject(format!("invalid date '{}'", raw_date)))?;

        let raw_amount = record
            .get(2)
            .filter(|a| !a.is_empty())
            .ok_or_else(|| reject("amount is missing".to_string()))?;
        let amount: Decimal = raw_amount
            .parse()
            .map_err(|_| reject(format!("invalid amount '{}'", raw_amount)))?;
        if amount.is_zero() {
            return Err(reject("amount cannot be zero".to_string()));
        }
        validate_amount(amount.abs()).map_err(|e| reject(e.to_string()))?;

        let category = record
            .get(3)
            .filter(|c| !c.is_empty())
            .unwrap_or(IMPORT_CATEGORY)
            .to_string();
        validate_category(&category).map_err(|e| reject(e.to_string()))?;

        let description = record.get(1).filter(|d| !d.is_empty()).map(String::from);
        let transaction_type = if amount.is_sign_negative() {
            TransactionType::Expense
        } else {
            TransactionType::Income
        };

        parsed.push(NewTransaction {
            amount: amount.abs(),
            category,
            description,
            transaction_type,
            date: Some(date),
        });
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_signs_and_defaults() {
        let data = "date,description,amount,category\n\
                    2024-01-01,Salary,3000,Income\n\
                    2024-01-02,Groceries,-45.20,\n";
        let rows = parse_import(data, &ImportOptions::default()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].transaction_type, TransactionType::Income);
        assert_eq!(rows[0].category, "Income");
        assert_eq!(rows[1].transaction_type, TransactionType::Expense);
        assert_eq!(rows[1].amount, Decimal::new(4520, 2));
        assert_eq!(rows[1].category, IMPORT_CATEGORY);
        assert_eq!(rows[1].description.as_deref(), Some("Groceries"));
    }

    #[test]
    fn test_import_custom_format_and_delimiter() {
        let options = ImportOptions {
            delimiter: parse_delimiter(";").unwrap(),
            has_header: false,
            date_format: Some("%d/%m/%Y".to_string()),
        };
        let rows = parse_import("05/03/2024;Bus;-2.50;Transport\n", &options).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date.unwrap().format("%Y-%m-%d").to_string(), "2024-03-05");
    }

    #[test]
    fn test_import_reports_bad_record() {
        let data = "date,description,amount\n2024-01-01,ok,-1\n2024-01-02,bad,abc\n";
        match parse_import(data, &ImportOptions::default()) {
            Err(MyMoneyError::Validation(msg)) => assert_eq!(msg, "Record 2: invalid amount 'abc'"),
            other => panic!("expected validation error, got {:?}", other),
        }

        let zero = "date,description,amount\n2024-01-01,nothing,0\n";
        assert!(parse_import(zero, &ImportOptions::default()).is_err());

        let huge = "date,description,amount\n2024-01-01,a,-79228162514264337593543950335\n";
        match parse_import(huge, &ImportOptions::default()) {
            Err(MyMoneyError::Validation(msg)) => assert!(msg.starts_with("Record 1: Amount cannot be greater")),
            other => panic!("expected validation error, got {:?}", other),
        }

        let bad_date = "date,description,amount\nyesterday,x,-1\n";
        assert!(parse_import(bad_date, &ImportOptions::default()).is_err());
    }

    #[test]
    fn test_export_reimports() {
        let txns = vec![
            Transaction {
                id: 1,
                user_id: 1,
                amount: Decimal::new(1250, 2),
                category: "Food".to_string(),
                description: Some("Lunch, with tip".to_string()),
                transaction_type: TransactionType::Expense,
                date: parse_datetime("2024-01-05T12:30:00Z").unwrap(),
            },
            Transaction {
                id: 2,
                user_id: 1,
                amount: Decimal::new(100, 0),
                category: "Gift".to_string(),
                description: None,
                transaction_type: TransactionType::Income,
                date: parse_datetime("2024-01-06").unwrap(),
            },
            Transaction {
                id: 3,
                user_id: 1,
                amount: Decimal::ONE,
                category: "Food".to_string(),
                description: None,
                transaction_type: TransactionType::Expense,
                date: parse_datetime("2024-01-01T10:00:00.750Z").unwrap(),
            },
        ];
        let csv = export_transactions(&txns).unwrap();
        assert!(csv.starts_with("date,description,amount,category,type,id\n"));
        assert!(csv.contains("\"Lunch, with tip\",-12.50,Food,expense,1"));

        let back = parse_import(&csv, &ImportOptions::default()).unwrap();
        assert_eq!(back.len(), 3);
        assert_eq!(back[0].amount, Decimal::new(1250, 2));
        assert_eq!(back[0].transaction_type, TransactionType::Expense);
        assert_eq!(back[0].date, Some(txns[0].date));
        assert_eq!(back[1].transaction_type, TransactionType::Income);
        assert!(csv.contains("2024-01-01T10:00:00.750Z,,-1,Food,expense,3"));
        assert_eq!(back[2].date, Some(txns[2].date));
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter("tab").unwrap(), b'\t');
        assert_eq!(parse_delimiter("|").unwrap(), b'|');
        assert!(parse_delimiter("::").is_err());
    }
}
