//! Parse results and statistics for contact CSV processing
//!
//! [`ParseOutcome`] is the complete result of one parse: accepted contacts in
//! line order plus every diagnostic in the order it was found.

use serde::{Deserialize, Serialize};

use super::record_parser::LineOutcome;
use crate::app::models::{Diagnostic, ParsedContact};

/// Complete result of parsing one stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOutcome {
    /// True when no diagnostic was collected
    pub success: bool,

    /// Successfully parsed contacts, in source line order
    pub records: Vec<ParsedContact>,

    /// All diagnostics, grouped by line in source order
    pub diagnostics: Vec<Diagnostic>,

    /// Counters describing the run
    pub stats: ParseStats,
}

impl ParseOutcome {
    pub(crate) fn new() -> Self {
        Self {
            success: true,
            records: Vec::new(),
            diagnostics: Vec::new(),
            stats: ParseStats::new(),
        }
    }

    /// Fold one line's outcome into the batch
    pub(crate) fn push_line(&mut self, outcome: LineOutcome) {
        self.stats.lines_read += 1;
        match outcome {
            LineOutcome::Parsed(contact) => {
                self.records.push(contact);
                self.stats.records_parsed += 1;
            }
            LineOutcome::Rejected(diagnostics) => {
                self.stats.lines_rejected += 1;
                self.push_diagnostics(diagnostics);
            }
        }
    }

    /// Record a problem that belongs to the stream rather than a line
    pub(crate) fn push_stream_diagnostic(&mut self, message: impl Into<String>) {
        self.push_diagnostics([Diagnostic::stream(message)]);
    }

    fn push_diagnostics(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
        self.success = self.diagnostics.is_empty();
    }

    /// Human-readable diagnostic lines, e.g. `Line 2: Name cannot be empty`
    pub fn error_messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }
}

impl Default for ParseOutcome {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple parsing statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Data lines handed to the tokenizer
    pub lines_read: usize,

    /// Lines that produced a contact
    pub records_parsed: usize,

    /// Lines that produced diagnostics instead of a contact
    pub lines_rejected: usize,

    /// Whether the first line was recognised as a header and dropped
    pub header_skipped: bool,

    /// Blank or whitespace-only lines ignored
    pub blank_lines_skipped: usize,

    /// Reading stopped early because of a cancellation request
    pub cancelled: bool,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            lines_read: 0,
            records_parsed: 0,
            lines_rejected: 0,
            header_skipped: false,
            blank_lines_skipped: 0,
            cancelled: false,
        }
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.lines_read == 0 {
            0.0
        } else {
            (self.records_parsed as f64 / self.lines_read as f64) * 100.0
        }
    }
}

impl Default for ParseStats {
    fn default() -> Self {
        Self::new()
    }
}
