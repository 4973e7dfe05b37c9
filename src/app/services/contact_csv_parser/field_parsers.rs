//! Per-column coercion of raw cells into typed contact fields
//!
//! Every parser is culture-invariant: dates come from a fixed list of
//! numeric layouts, salaries always use `.` as the decimal point and `,` as
//! the thousands separator.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::constants::{
    CURRENCY_SYMBOLS, DATE_FORMATS, DECIMAL_SEPARATOR, DateFormat, MARRIED_FALSE_VALUES,
    MARRIED_TRUE_VALUES, THOUSANDS_SEPARATOR,
};
use crate::error::FieldError;

/// Strip surrounding quote characters, then surrounding whitespace
pub fn clean_cell(raw: &str) -> &str {
    raw.trim_matches('"').trim()
}

/// Parse the contact name column
pub fn parse_name(raw: &str) -> Result<String, FieldError> {
    let name = clean_cell(raw);
    if name.is_empty() {
        return Err(FieldError::EmptyName);
    }
    Ok(name.to_string())
}

/// Parse the date of birth using the first layout in [`DATE_FORMATS`] that
/// matches exactly
pub fn parse_date_of_birth(raw: &str) -> Result<NaiveDate, FieldError> {
    let text = clean_cell(raw);

    DATE_FORMATS
        .iter()
        .find_map(|format| parse_date_exact(text, format))
        .ok_or_else(|| FieldError::InvalidDate(text.to_string()))
}

/// Try a single layout.
///
/// The text must have the layout's exact shape (one digit per `y`/`M`/`d`,
/// separators in place) before chrono validates the calendar date, so
/// `1/2/2020` or `2020-1-05` never match.
pub fn parse_date_exact(text: &str, format: &DateFormat) -> Option<NaiveDate> {
    if text.chars().count() != format.layout.chars().count() {
        return None;
    }

    let shape_matches = text
        .chars()
        .zip(format.layout.chars())
        .all(|(actual, expected)| match expected {
            'y' | 'M' | 'd' => actual.is_ascii_digit(),
            literal => actual == literal,
        });

    if !shape_matches {
        return None;
    }

    NaiveDate::parse_from_str(text, format.chrono_format).ok()
}

/// Parse the married column against the fixed vocabularies.
///
/// The diagnostic echoes the cell exactly as received.
pub fn parse_married(raw: &str) -> Result<bool, FieldError> {
    let normalized = clean_cell(raw).to_lowercase();

    if MARRIED_TRUE_VALUES.contains(&normalized.as_str()) {
        Ok(true)
    } else if MARRIED_FALSE_VALUES.contains(&normalized.as_str()) {
        Ok(false)
    } else {
        Err(FieldError::InvalidMarried(raw.to_string()))
    }
}

/// Parse the phone column; format rules are applied downstream
pub fn parse_phone(raw: &str) -> Result<String, FieldError> {
    let phone = clean_cell(raw);
    if phone.is_empty() {
        return Err(FieldError::EmptyPhone);
    }
    Ok(phone.to_string())
}

/// Parse the salary column. Negative amounts are accepted here.
pub fn parse_salary(raw: &str) -> Result<Decimal, FieldError> {
    let text = clean_cell(raw);
    parse_invariant_amount(text).ok_or_else(|| FieldError::InvalidSalary(text.to_string()))
}

/// Parse a monetary amount written with invariant conventions.
///
/// Accepts an optional sign and an optional currency symbol on either side
/// (each at most once), parentheses for negatives, and thousands separators
/// in the integer part. Exponents are rejected.
pub fn parse_invariant_amount(text: &str) -> Option<Decimal> {
    let mut body = text.trim();
    let mut parenthesized = false;

    if let Some(inner) = body.strip_prefix('(').and_then(|rest| rest.strip_suffix(')')) {
        parenthesized = true;
        body = inner;
    }

    let mut sign: Option<char> = None;
    let mut has_currency = false;

    loop {
        let trimmed = body.trim_start();
        let mut chars = trimmed.chars();
        match chars.next() {
            Some(c @ ('+' | '-')) if sign.is_none() => sign = Some(c),
            Some(c) if !has_currency && CURRENCY_SYMBOLS.contains(&c) => has_currency = true,
            _ => {
                body = trimmed;
                break;
            }
        }
        body = chars.as_str();
    }

    loop {
        let trimmed = body.trim_end();
        let mut chars = trimmed.chars();
        match chars.next_back() {
            Some(c @ ('+' | '-')) if sign.is_none() => sign = Some(c),
            Some(c) if !has_currency && CURRENCY_SYMBOLS.contains(&c) => has_currency = true,
            _ => {
                body = trimmed;
                break;
            }
        }
        body = chars.as_str();
    }

    if parenthesized && sign.is_some() {
        return None;
    }

    let digits = normalize_digits(body)?;
    let value = Decimal::from_str(&digits).ok()?;

    if parenthesized || sign == Some('-') {
        Some(-value)
    } else {
        Some(value)
    }
}

/// Remove thousands separators and validate the digit layout
fn normalize_digits(body: &str) -> Option<String> {
    let (integer, fraction) = match body.split_once(DECIMAL_SEPARATOR) {
        Some((integer, fraction)) => (integer, fraction),
        None => (body, ""),
    };

    if integer.starts_with(THOUSANDS_SEPARATOR) {
        return None;
    }

    if !integer
        .chars()
        .all(|c| c.is_ascii_digit() || c == THOUSANDS_SEPARATOR)
        || !fraction.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }

    let integer: String = integer
        .chars()
        .filter(|c| *c != THOUSANDS_SEPARATOR)
        .collect();

    if integer.is_empty() && fraction.is_empty() {
        return None;
    }

    let integer = if integer.is_empty() { "0".to_string() } else { integer };

    if fraction.is_empty() {
        Some(integer)
    } else {
        Some(format!("{}{}{}", integer, DECIMAL_SEPARATOR, fraction))
    }
}
