//! Core contact CSV parser implementation
//!
//! This module drives reading, per-line coercion and batch aggregation. Lines
//! are independent: with more than one worker configured, coercion of a
//! buffered batch is fanned out over a `JoinSet` and the results are put back
//! into line order before aggregation.

use std::path::Path;
use tokio::io::AsyncRead;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::line_reader::{LineReader, RawLine};
use super::record_parser::{LineOutcome, parse_line};
use super::stats::ParseOutcome;
use crate::config::ImportConfig;
use crate::error::{ImportError, Result};

/// Diagnostic text used when a cancellation request stops reading
pub const CANCELLED_MESSAGE: &str = "Import cancelled before end of input";

/// Parser for contact CSV streams
///
/// Holds only configuration, so one parser can serve concurrent parses of
/// different streams.
#[derive(Debug, Clone, Default)]
pub struct ContactCsvParser {
    config: ImportConfig,
}

impl ContactCsvParser {
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Open and parse a CSV file.
    ///
    /// Only failing to open the file is an error; everything after that is
    /// reported through the outcome's diagnostics.
    pub async fn parse_file(
        &self,
        file_path: &Path,
        cancellation_token: &CancellationToken,
    ) -> Result<ParseOutcome> {
        info!("Parsing contact CSV file: {}", file_path.display());

        let file = tokio::fs::File::open(file_path)
            .await
            .map_err(|e| ImportError::file_open(file_path, e))?;

        Ok(self.parse_stream(file, cancellation_token).await)
    }

    /// Parse a stream of CSV text.
    ///
    /// Never fails for malformed input. A read error or a cancellation stops
    /// reading, keeps everything parsed so far and adds one diagnostic without
    /// a line number.
    pub async fn parse_stream<R: AsyncRead + Unpin>(
        &self,
        reader: R,
        cancellation_token: &CancellationToken,
    ) -> ParseOutcome {
        let mut lines = LineReader::new(reader, self.config.detect_header);
        let mut outcome = ParseOutcome::new();
        let mut pending: Vec<RawLine> = Vec::new();

        let stop_reason = loop {
            if cancellation_token.is_cancelled() {
                warn!(
                    "Cancellation requested after {} lines",
                    lines.lines_emitted()
                );
                outcome.stats.cancelled = true;
                break Some(CANCELLED_MESSAGE.to_string());
            }

            match lines.next_line().await {
                Ok(Some(line)) if self.config.is_parallel() => {
                    pending.push(line);
                    if pending.len() >= self.config.batch_size {
                        let batch = std::mem::take(&mut pending);
                        self.coerce_batch(batch, &mut outcome).await;
                    }
                }
                Ok(Some(line)) => record(&mut outcome, line.number, parse_line(&line)),
                Ok(None) => break None,
                Err(e) => {
                    warn!(
                        "Read failure after {} lines: {}",
                        lines.lines_emitted(),
                        e
                    );
                    break Some(format!("Error reading CSV file: {}", e));
                }
            }
        };

        if !pending.is_empty() {
            self.coerce_batch(pending, &mut outcome).await;
        }

        if let Some(message) = stop_reason {
            outcome.push_stream_diagnostic(message);
        }

        outcome.stats.header_skipped = lines.header_skipped();
        outcome.stats.blank_lines_skipped = lines.blank_lines_skipped();
        drop(lines);

        info!(
            "Parsed {} contacts from {} lines ({} diagnostics)",
            outcome.stats.records_parsed,
            outcome.stats.lines_read,
            outcome.diagnostics.len()
        );

        outcome
    }

    /// Coerce a batch of lines concurrently and aggregate in line order
    async fn coerce_batch(&self, batch: Vec<RawLine>, outcome: &mut ParseOutcome) {
        let chunk_size = batch.len().div_ceil(self.config.workers).max(1);
        let mut tasks = JoinSet::new();
        let mut remaining = batch;
        let mut chunk_count = 0;

        while !remaining.is_empty() {
            let rest = remaining.split_off(chunk_size.min(remaining.len()));
            let chunk = std::mem::replace(&mut remaining, rest);
            let chunk_index = chunk_count;
            chunk_count += 1;

            tasks.spawn(async move {
                let outcomes: Vec<(usize, LineOutcome)> = chunk
                    .iter()
                    .map(|line| (line.number, parse_line(line)))
                    .collect();
                (chunk_index, outcomes)
            });
        }

        debug!("Dispatched {} coercion chunks", chunk_count);

        let mut results = Vec::with_capacity(chunk_count);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(result) => results.push(result),
                Err(error) if error.is_panic() => std::panic::resume_unwind(error.into_panic()),
                Err(error) => {
                    warn!("Coercion task did not complete: {}", error);
                    outcome.push_stream_diagnostic(format!("Coercion task failed: {}", error));
                }
            }
        }

        results.sort_by_key(|(chunk_index, _)| *chunk_index);
        for (line_number, line_outcome) in results.into_iter().flat_map(|(_, chunk)| chunk) {
            record(outcome, line_number, line_outcome);
        }
    }
}

fn record(outcome: &mut ParseOutcome, line_number: usize, line_outcome: LineOutcome) {
    if let LineOutcome::Rejected(diagnostics) = &line_outcome {
        debug!(
            "Rejected line {} with {} problem(s)",
            line_number,
            diagnostics.len()
        );
    }
    outcome.push_line(line_outcome);
}
