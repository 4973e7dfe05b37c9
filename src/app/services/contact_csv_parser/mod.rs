//! Contact CSV parser
//!
//! Converts a possibly malformed comma-separated stream into validated
//! contact records plus line-numbered diagnostics. Invalid lines never stop
//! the import; they are reported and skipped.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`line_reader`] - Line reading, header detection and numbering
//! - [`tokenizer`] - Quote-aware field splitting
//! - [`field_parsers`] - Per-column coercion (name, date, married, phone, salary)
//! - [`record_parser`] - Single line processing
//! - [`parser`] - Batch orchestration, cancellation and parallel coercion
//! - [`stats`] - Parse outcome and statistics
//!
//! ## Usage
//!
//! ```rust
//! use contact_importer::app::services::contact_csv_parser::ContactCsvParser;
//! use contact_importer::config::ImportConfig;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() {
//! let parser = ContactCsvParser::new(ImportConfig::sequential());
//! let csv = "Name,DateOfBirth,Married,Phone,Salary\nJane,1990-01-01,yes,+15551234567,\"50,000\"\n";
//! let outcome = parser.parse_stream(csv.as_bytes(), &CancellationToken::new()).await;
//!
//! assert!(outcome.success);
//! assert_eq!(outcome.records.len(), 1);
//! # }
//! ```

pub mod field_parsers;
pub mod line_reader;
pub mod parser;
pub mod record_parser;
pub mod stats;
pub mod tokenizer;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use line_reader::{LineReader, RawLine};
pub use parser::ContactCsvParser;
pub use record_parser::{LineOutcome, parse_line};
pub use stats::{ParseOutcome, ParseStats};
