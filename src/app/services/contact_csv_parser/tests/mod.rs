//! Test utilities for contact CSV parser testing
//!
//! Shared helpers: canned CSV content, a scripted async reader for read
//! failures and cancellation, and shortcuts for running a parse.

use std::collections::VecDeque;
use std::io::Write;
use std::pin::Pin;
use std::task::{Context, Poll};
use tempfile::NamedTempFile;
use tokio::io::{AsyncRead, ReadBuf};
use tokio_util::sync::CancellationToken;

use super::{ContactCsvParser, ParseOutcome};
use crate::config::ImportConfig;


pub const HEADER: &str = "Name,DateOfBirth,Married,Phone,Salary";

/// Three valid contacts behind a header
pub fn create_valid_csv() -> String {
    format!(
        "{}\n{}\n{}\n{}\n",
        HEADER,
        "John Smith,1985-04-12,true,+15551234567,52000",
        r#""Doe, Jane",03/15/1990,no,+15559876543,"61,250.75""#,
        "Ann Lee,21.07.1978,Married,+441632960961,$48000"
    )
}

/// Mix of valid and invalid lines without a header
pub fn create_mixed_csv(lines: usize) -> String {
    (1..=lines)
        .map(|n| match n % 4 {
            0 => format!("Person {},not-a-date,maybe,,{}", n, n),
            1 => format!("Person {},1990-01-{:02},yes,+1555000{:04},{}", n, (n % 28) + 1, n, n * 100),
            2 => format!("Person {},A,B", n),
            _ => format!(",1991/02/03,0,+1555,{}.50", n),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn sequential_parser() -> ContactCsvParser {
    ContactCsvParser::new(ImportConfig::sequential())
}

/// Parse a string with the sequential parser
pub async fn parse(content: &str) -> ParseOutcome {
    sequential_parser()
        .parse_stream(content.as_bytes(), &CancellationToken::new())
        .await
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}

/// One step of a [`ScriptedReader`]
pub enum Step {
    Data(Vec<u8>),
    Fail(&'static str),
    Cancel(CancellationToken),
}

impl Step {
    pub fn data(text: &str) -> Self {
        Self::Data(text.as_bytes().to_vec())
    }
}

/// Async reader that replays data, failures and cancellations in order.
///
/// Each data step is delivered by its own read call, so a `BufReader` only
/// sees the next step once the previous bytes were consumed.
pub struct ScriptedReader {
    steps: VecDeque<Step>,
}

impl ScriptedReader {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }
}

impl AsyncRead for ScriptedReader {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        let this = self.get_mut();
        loop {
            match this.steps.pop_front() {
                None => return Poll::Ready(Ok(())),
                Some(Step::Cancel(token)) => token.cancel(),
                Some(Step::Fail(message)) => {
                    return Poll::Ready(Err(std::io::Error::other(message)));
                }
                Some(Step::Data(bytes)) => {
                    let n = bytes.len().min(buf.remaining());
                    buf.put_slice(&bytes[..n]);
                    if n < bytes.len() {
                        this.steps.push_front(Step::Data(bytes[n..].to_vec()));
                    }
                    return Poll::Ready(Ok(()));
                }
            }
        }
    }
}
