// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Display helpers for the command-line client

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// `$1,234.50`, negatives as `-$12.00`
pub fn currency(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let fixed = format!("{:.2}", rounded.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{}${}.{}", sign, group_thousands(whole), cents)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// One decimal place, e.g. `12.3%`
pub fn percentage(value: Decimal) -> String {
    format!("{:.1}%", value.round_dp(1))
}

pub fn date(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

/// Left-aligned columns separated by ` | `, header underlined
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .fold(header.chars().count(), usize::max)
        })
        .collect();

    let render = |cells: Vec<&str>| {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:width$}", cell, width = widths.get(i).copied().unwrap_or(0)))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let header_line = render(headers.to_vec());
    let mut out = String::new();
    out.push_str(&header_line);
    out.push('\n');
    out.push_str(&"-".repeat(header_line.chars().count()));
    out.push('\n');
    for row in rows {
        out.push_str(&render(row.iter().map(String::as_str).collect()));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_currency() {
        assert_eq!(currency(d("1234.5")), "$1,234.50");
        assert_eq!(currency(d("-12")), "-$12.00");
        assert_eq!(currency(d("0")), "$0.00");
        assert_eq!(currency(d("999.999")), "$1,000.00");
        assert_eq!(currency(d("1234567.891")), "$1,234,567.89");
        assert_eq!(currency(d("-0.001")), "$0.00");
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(d("12.34")), "12.3%");
        assert_eq!(percentage(d("80")), "80.0%");
        assert_eq!(percentage(d("-50")), "-50.0%");
    }

    #[test]
    fn test_table() {
        let rows = vec![
            vec!["Food".to_string(), "$200.00".to_string()],
            vec!["Transport".to_string(), "$60.00".to_string()],
        ];
        let out = table(&["Category", "Total"], &rows);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Category  | Total");
        assert_eq!(lines[1], "-----------------");
        assert_eq!(lines[2], "Food      | $200.00");
        assert_eq!(lines[3], "Transport | $60.00");
    }
}
