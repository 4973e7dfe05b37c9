//! Data models for contact ingestion
//!
//! This module contains the record shape handed to the persistence layer and
//! the line-scoped diagnostics reported back to the user.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Parsed Contact Record
// =============================================================================

/// A contact that passed syntactic and type-level validation
///
/// Fields are private so a record cannot change after the parser built it.
/// Business rules (length limits, age range, phone pattern, salary range) are
/// not applied here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedContact {
    name: String,
    date_of_birth: NaiveDate,
    married: bool,
    phone: String,
    /// Serialized as a string to keep full decimal precision
    #[serde(with = "rust_decimal::serde::str")]
    salary: Decimal,
}

impl ParsedContact {
    pub fn new(
        name: impl Into<String>,
        date_of_birth: NaiveDate,
        married: bool,
        phone: impl Into<String>,
        salary: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            date_of_birth,
            married,
            phone: phone.into(),
            salary,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    pub fn married(&self) -> bool {
        self.married
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn salary(&self) -> Decimal {
        self.salary
    }
}

// =============================================================================
// Diagnostics
// =============================================================================

/// A human-readable parsing problem, scoped to one input line
///
/// Stream-level problems (read failures, cancellation) carry no line number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// 1-based data line number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,

    /// Column-specific description of what was wrong
    pub message: String,
}

impl Diagnostic {
    /// Diagnostic attached to a data line
    pub fn at_line(line: usize, message: impl Into<String>) -> Self {
        Self {
            line: Some(line),
            message: message.into(),
        }
    }

    /// Diagnostic describing the stream as a whole
    pub fn stream(message: impl Into<String>) -> Self {
        Self {
            line: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "Line {}: {}", line, self.message),
            None => f.write_str(&self.message),
        }
    }
}
