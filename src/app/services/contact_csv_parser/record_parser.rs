//! Individual line processing for contact CSV files
//!
//! Turns one data line into either a contact or the complete list of
//! problems found on it. Every column is coerced before deciding, so a user
//! sees all problems of a line in a single pass.

use super::field_parsers::{
    parse_date_of_birth, parse_married, parse_name, parse_phone, parse_salary,
};
use super::line_reader::RawLine;
use super::tokenizer::split_fields;
use crate::app::models::{Diagnostic, ParsedContact};
use crate::constants::EXPECTED_FIELD_COUNT;
use crate::error::FieldError;

/// Result of processing one data line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Parsed(ParsedContact),
    /// One diagnostic per failing field, in column order
    Rejected(Vec<Diagnostic>),
}

/// Parse a single data line
pub fn parse_line(line: &RawLine) -> LineOutcome {
    let fields = split_fields(&line.text);

    let [name, date_of_birth, married, phone, salary] = fields.as_slice() else {
        let error = FieldError::FieldCount {
            expected: EXPECTED_FIELD_COUNT,
            found: fields.len(),
        };
        return LineOutcome::Rejected(vec![Diagnostic::at_line(line.number, error.to_string())]);
    };

    let name = parse_name(name);
    let date_of_birth = parse_date_of_birth(date_of_birth);
    let married = parse_married(married);
    let phone = parse_phone(phone);
    let salary = parse_salary(salary);

    match (name, date_of_birth, married, phone, salary) {
        (Ok(name), Ok(date_of_birth), Ok(married), Ok(phone), Ok(salary)) => LineOutcome::Parsed(
            ParsedContact::new(name, date_of_birth, married, phone, salary),
        ),
        (name, date_of_birth, married, phone, salary) => {
            let diagnostics = [
                name.err(),
                date_of_birth.err(),
                married.err(),
                phone.err(),
                salary.err(),
            ]
            .into_iter()
            .flatten()
            .map(|error| Diagnostic::at_line(line.number, error.to_string()))
            .collect();

            LineOutcome::Rejected(diagnostics)
        }
    }
}
