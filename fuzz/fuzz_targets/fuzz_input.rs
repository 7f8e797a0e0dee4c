// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use mymoney::csv_io::{parse_import, ImportOptions};
use mymoney::models::{parse_datetime, Month};
use mymoney::validation;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    text: &'a str,
    csv: &'a str,
    has_header: bool,
}

fuzz_target!(|input: Input<'_>| {
    if let Ok(month) = input.text.parse::<Month>() {
        assert_eq!(month.to_string().parse::<Month>().ok(), Some(month));
        if let Some(next) = month.next() {
            assert_eq!(next.prev(), Some(month));
        }
    }
    if let Some(dt) = parse_datetime(input.text) {
        assert_eq!(Month::of(&dt).to_string().parse::<Month>().ok(), Some(Month::of(&dt)));
    }
    let _ = validation::validate_email(input.text);
    let _ = validation::validate_username(input.text);
    let _ = validation::validate_password(input.text);
    let _ = validation::validate_category(input.text);

    let options = ImportOptions { has_header: input.has_header, ..ImportOptions::default() };
    if let Ok(rows) = parse_import(input.csv, &options) {
        assert!(rows.iter().all(|row| !row.amount.is_sign_negative() && !row.amount.is_zero()));
    }
});
