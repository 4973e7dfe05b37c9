//! Line reading, header detection and line numbering
//!
//! The reader hands out trimmed, non-blank lines one at a time. Line numbers
//! count only the lines that reach the tokenizer: the header (when detected)
//! and blank lines never consume a number, so the first data line is line 1
//! regardless of what precedes it.
//!
//! Lines end at `\n`, `\r\n` or a lone `\r`. Bytes that are not valid UTF-8
//! are replaced with U+FFFD so one damaged line cannot hide the rest of the
//! file; only genuine I/O failures stop reading.

use std::io;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use crate::constants::{HEADER_KEYWORDS, UTF8_BOM};

/// One non-blank data line and its 1-based number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub number: usize,
    pub text: String,
}

impl RawLine {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// Check whether a line is the column header.
///
/// All whitespace is removed and the line lowercased; it is a header when
/// every keyword occurs somewhere in it, in any order.
pub fn is_header_line(line: &str) -> bool {
    let normalized: String = line
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    HEADER_KEYWORDS
        .iter()
        .all(|keyword| normalized.contains(keyword))
}

/// Lazy, single-pass reader over the data lines of a stream
///
/// Owns the underlying stream; dropping the reader releases it.
pub struct LineReader<R> {
    reader: BufReader<R>,
    /// Previous line ended with `\r`; a following `\n` belongs to it
    skip_line_feed: bool,
    detect_header: bool,
    first_line_seen: bool,
    lines_emitted: usize,
    header_skipped: bool,
    blank_lines_skipped: usize,
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    pub fn new(reader: R, detect_header: bool) -> Self {
        Self {
            reader: BufReader::new(reader),
            skip_line_feed: false,
            detect_header,
            first_line_seen: false,
            lines_emitted: 0,
            header_skipped: false,
            blank_lines_skipped: 0,
        }
    }

    /// Next data line, `Ok(None)` at end of stream.
    ///
    /// A read error is returned as-is; the reader should not be polled again
    /// afterwards.
    pub async fn next_line(&mut self) -> io::Result<Option<RawLine>> {
        while let Some(line) = self.next_physical_line().await? {
            let mut text = line.as_str();

            // Only the first physical line may be a header, even when blank
            if !self.first_line_seen {
                self.first_line_seen = true;
                text = text.strip_prefix(UTF8_BOM).unwrap_or(text);
                if self.detect_header && is_header_line(text) {
                    self.header_skipped = true;
                    continue;
                }
            }

            let text = text.trim();
            if text.is_empty() {
                self.blank_lines_skipped += 1;
                continue;
            }

            self.lines_emitted += 1;
            return Ok(Some(RawLine::new(self.lines_emitted, text)));
        }

        Ok(None)
    }

    /// Next physical line without its terminator, decoded lossily
    async fn next_physical_line(&mut self) -> io::Result<Option<String>> {
        let mut bytes = Vec::new();

        loop {
            let available = self.reader.fill_buf().await?;
            if available.is_empty() {
                self.skip_line_feed = false;
                if bytes.is_empty() {
                    return Ok(None);
                }
                break;
            }

            if std::mem::take(&mut self.skip_line_feed) && available[0] == b'\n' {
                self.reader.consume(1);
                continue;
            }

            match available.iter().position(|b| matches!(b, b'\n' | b'\r')) {
                Some(end) => {
                    bytes.extend_from_slice(&available[..end]);
                    self.skip_line_feed = available[end] == b'\r';
                    self.reader.consume(end + 1);
                    break;
                }
                None => {
                    let consumed = available.len();
                    bytes.extend_from_slice(available);
                    self.reader.consume(consumed);
                }
            }
        }

        Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
    }

    /// Number of data lines handed out so far
    pub fn lines_emitted(&self) -> usize {
        self.lines_emitted
    }

    pub fn header_skipped(&self) -> bool {
        self.header_skipped
    }

    pub fn blank_lines_skipped(&self) -> usize {
        self.blank_lines_skipped
    }
}
