//! Import workflow: parse a stream, hand accepted contacts to storage and
//! summarise the run for the user.
//!
//! Storage is reached through the [`ContactStore`] trait. Accepted contacts
//! are stored even when other lines were rejected; a partially valid upload
//! still imports its valid part.

use serde::Serialize;
use std::future::Future;
use std::path::Path;
use tokio::io::AsyncRead;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::contact_csv_parser::{ContactCsvParser, ParseOutcome, ParseStats};
use crate::app::models::{Diagnostic, ParsedContact};
use crate::error::Result;

/// Batch persistence boundary
///
/// Implementors are expected to insert a batch atomically.
pub trait ContactStore {
    /// Insert all contacts, returning how many were stored
    fn insert_batch(
        &self,
        contacts: Vec<ParsedContact>,
    ) -> impl Future<Output = Result<usize>> + Send;
}

/// Store keeping contacts in memory
#[derive(Debug, Default)]
pub struct InMemoryContactStore {
    contacts: Mutex<Vec<ParsedContact>>,
}

impl InMemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything stored so far
    pub async fn contacts(&self) -> Vec<ParsedContact> {
        self.contacts.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.contacts.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.contacts.lock().await.is_empty()
    }
}

impl ContactStore for InMemoryContactStore {
    async fn insert_batch(&self, contacts: Vec<ParsedContact>) -> Result<usize> {
        let count = contacts.len();
        self.contacts.lock().await.extend(contacts);
        Ok(count)
    }
}

/// User-facing result of one import
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportSummary {
    pub success: bool,
    /// Contacts accepted by the parser
    pub parsed: usize,
    /// Contacts the store reported as written
    pub stored: usize,
    pub message: String,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: ParseStats,
}

impl ImportSummary {
    pub fn new(outcome: &ParseOutcome, stored: usize) -> Self {
        Self {
            success: outcome.success,
            parsed: outcome.records.len(),
            stored,
            message: summary_message(outcome),
            diagnostics: outcome.diagnostics.clone(),
            stats: outcome.stats.clone(),
        }
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }
}

/// One-line summary shown after an upload
pub fn summary_message(outcome: &ParseOutcome) -> String {
    if outcome.success {
        format!("Imported {} contacts successfully.", outcome.records.len())
    } else {
        format!(
            "Imported {} contacts with {} errors.",
            outcome.records.len(),
            outcome.diagnostics.len()
        )
    }
}

/// Parses uploads and forwards accepted contacts to a store
#[derive(Debug)]
pub struct ContactImporter<S> {
    parser: ContactCsvParser,
    store: S,
}

impl<S: ContactStore> ContactImporter<S> {
    pub fn new(parser: ContactCsvParser, store: S) -> Self {
        Self { parser, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Import from any byte stream
    pub async fn import_stream<R: AsyncRead + Unpin>(
        &self,
        reader: R,
        cancellation_token: &CancellationToken,
    ) -> Result<ImportSummary> {
        let outcome = self.parser.parse_stream(reader, cancellation_token).await;
        self.store_outcome(outcome).await
    }

    /// Import from a file on disk
    pub async fn import_file(
        &self,
        file_path: &Path,
        cancellation_token: &CancellationToken,
    ) -> Result<ImportSummary> {
        let outcome = self.parser.parse_file(file_path, cancellation_token).await?;
        self.store_outcome(outcome).await
    }

    async fn store_outcome(&self, outcome: ParseOutcome) -> Result<ImportSummary> {
        let stored = if outcome.records.is_empty() {
            0
        } else {
            self.store.insert_batch(outcome.records.clone()).await?
        };

        let summary = ImportSummary::new(&outcome, stored);
        info!("{}", summary.message);
        Ok(summary)
    }
}
