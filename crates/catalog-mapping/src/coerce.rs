//! Lenient coercion of raw text into typed values
//!
//! Each parser returns `None` instead of failing; the mapper decides what
//! zero value to substitute.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a decimal number written with `.` as the decimal separator.
///
/// Accepts an optional sign and exponent notation (`1.5e2`). Thousands
/// separators (`,` or `_`) and `,` decimal separators are rejected.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() || raw.contains([',', '_']) {
        return None;
    }
    Decimal::from_str(raw)
        .ok()
        .or_else(|| Decimal::from_scientific(raw).ok())
}

/// Parse a whole number.
pub fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// Parse a boolean flag.
///
/// Recognizes `true/false`, `yes/no`, `y/n` and `1/0`, ignoring case.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}
