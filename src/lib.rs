//! Contact Importer Library
//!
//! Bulk ingestion of contact records from comma-separated text.
//!
//! This library provides tools for:
//! - Reading CSV streams line by line with optional header detection
//! - Quote-aware field splitting with doubled-quote escapes
//! - Culture-invariant coercion of dates, booleans and currency amounts
//! - Partial-success imports: invalid lines are reported, valid ones kept
//! - Line-numbered diagnostics that point at the offending field

pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services;
}

pub mod cli;

// Re-export commonly used types
pub use app::models::{Diagnostic, ParsedContact};
pub use app::services::contact_csv_parser::{ContactCsvParser, ParseOutcome, ParseStats};
pub use app::services::contact_import::{
    ContactImporter, ContactStore, ImportSummary, InMemoryContactStore,
};
pub use config::ImportConfig;
pub use error::{FieldError, ImportError, Result};
