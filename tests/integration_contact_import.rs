//! Integration tests for the contact import workflow
//!
//! These tests drive the public API end to end: a CSV file on disk is parsed,
//! accepted contacts are handed to a store and the summary is checked.

use clap::Parser;
use contact_importer::cli::{Args, OutputFormat};
use contact_importer::{
    ContactCsvParser, ContactImporter, ContactStore, ImportConfig, ImportError,
    InMemoryContactStore, ParsedContact,
};
use rust_decimal::Decimal;
use std::io::Write;
use std::str::FromStr;
use tempfile::NamedTempFile;
use tokio_util::sync::CancellationToken;

const UPLOAD: &str = "\u{feff}Name,DateOfBirth,Married,Phone,Salary\r\n\
John Smith,1985-04-12,yes,+15551234567,\"$52,000.00\"\r\n\
\r\n\
\"Doe, Jane\",12/25/1990,single,+15557654321,61250.75\r\n\
Bad Row,31/02/1990,perhaps,,lots\r\n\
Too,Few,Fields\r\n\
Ann Lee,21.07.1978,Married,+447700900123,(1500)\r\n";

fn write_upload(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file
}

/// Store that counts calls and refuses every batch
#[derive(Default)]
struct UnavailableStore {
    calls: std::sync::atomic::AtomicUsize,
}

impl ContactStore for UnavailableStore {
    async fn insert_batch(&self, contacts: Vec<ParsedContact>) -> contact_importer::Result<usize> {
        self.calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Err(ImportError::store(contacts.len(), "connection refused"))
    }
}

/// Test a realistic upload with a mix of valid and broken lines
///
/// Purpose: Validate that valid lines are imported while every problem is
/// reported with the right data line number
#[tokio::test]
async fn test_import_file_with_partial_success() {
    let file = write_upload(UPLOAD);
    let importer = ContactImporter::new(
        ContactCsvParser::new(ImportConfig::sequential()),
        InMemoryContactStore::new(),
    );

    let summary = importer
        .import_file(file.path(), &CancellationToken::new())
        .await
        .expect("Import should complete");

    assert!(!summary.success);
    assert_eq!(summary.parsed, 3);
    assert_eq!(summary.stored, 3);
    assert_eq!(summary.message, "Imported 3 contacts with 5 errors.");

    let messages: Vec<String> = summary.diagnostics.iter().map(|d| d.to_string()).collect();
    assert_eq!(
        messages,
        vec![
            "Line 3: Invalid date format '31/02/1990'",
            "Line 3: Invalid married field 'perhaps'",
            "Line 3: Phone cannot be empty",
            "Line 3: Invalid salary format 'lots'",
            "Line 4: Expected 5 fields, found 3",
        ]
    );

    assert!(summary.stats.header_skipped);
    assert_eq!(summary.stats.blank_lines_skipped, 1);
    assert_eq!(summary.stats.lines_read, 5);
    assert_eq!(summary.stats.lines_rejected, 2);

    let stored = importer.store().contacts().await;
    let names: Vec<&str> = stored.iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["John Smith", "Doe, Jane", "Ann Lee"]);
    assert_eq!(stored[0].salary(), Decimal::from(52000));
    assert_eq!(stored[1].salary(), Decimal::from_str("61250.75").unwrap());
    assert_eq!(stored[2].salary(), Decimal::from(-1500));
}

/// Test that worker count does not change what gets imported
///
/// Purpose: Parallel coercion must keep input order and diagnostics identical
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_import_matches_sequential() {
    let file = write_upload(UPLOAD);
    let token = CancellationToken::new();

    let sequential = ContactImporter::new(
        ContactCsvParser::new(ImportConfig::sequential()),
        InMemoryContactStore::new(),
    );
    let parallel = ContactImporter::new(
        ContactCsvParser::new(ImportConfig::sequential().with_workers(4).with_batch_size(2)),
        InMemoryContactStore::new(),
    );

    let first = sequential.import_file(file.path(), &token).await.unwrap();
    let second = parallel.import_file(file.path(), &token).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(
        sequential.store().contacts().await,
        parallel.store().contacts().await
    );
}

/// Test that a failing store aborts the import with a store error
#[tokio::test]
async fn test_store_failure_surfaces_as_error() {
    let file = write_upload(UPLOAD);
    let importer = ContactImporter::new(
        ContactCsvParser::new(ImportConfig::sequential()),
        UnavailableStore::default(),
    );

    let error = importer
        .import_file(file.path(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(error, ImportError::Store { batch_size: 3, .. }));
    assert_eq!(
        importer
            .store()
            .calls
            .load(std::sync::atomic::Ordering::SeqCst),
        1
    );
}

/// Test that a file with only a header imports nothing and succeeds
#[tokio::test]
async fn test_header_only_file() {
    let file = write_upload("Name,DateOfBirth,Married,Phone,Salary\n");
    let importer = ContactImporter::new(
        ContactCsvParser::new(ImportConfig::sequential()),
        UnavailableStore::default(),
    );

    let summary = importer
        .import_file(file.path(), &CancellationToken::new())
        .await
        .expect("An empty import never reaches the store");

    assert!(summary.success);
    assert_eq!(summary.message, "Imported 0 contacts successfully.");
    assert_eq!(
        importer
            .store()
            .calls
            .load(std::sync::atomic::Ordering::SeqCst),
        0
    );
}

/// Test that a missing file is reported before any parsing happens
#[tokio::test]
async fn test_missing_file() {
    let importer = ContactImporter::new(ContactCsvParser::default(), InMemoryContactStore::new());
    let result = importer
        .import_file(
            std::path::Path::new("/no/such/upload.csv"),
            &CancellationToken::new(),
        )
        .await;

    assert!(matches!(result, Err(ImportError::FileNotFound { .. })));
    assert!(importer.store().is_empty().await);
}

/// Test command-line parsing and configuration layering
#[test]
fn test_cli_arguments_build_config() {
    let args = Args::try_parse_from([
        "contact-importer",
        "upload.csv",
        "--format",
        "json",
        "-j",
        "3",
        "--batch-size",
        "16",
        "--no-header-detection",
        "-vv",
    ])
    .expect("Arguments should parse");

    assert_eq!(args.output_format, OutputFormat::Json);
    assert_eq!(args.get_log_level(), "debug");

    let config = args.to_config().expect("Configuration should be valid");
    assert_eq!(config.workers, 3);
    assert_eq!(config.batch_size, 16);
    assert!(!config.detect_header);
}

#[test]
fn test_cli_rejects_invalid_worker_count() {
    let args = Args::try_parse_from(["contact-importer", "upload.csv", "-j", "0"]).unwrap();
    assert!(matches!(
        args.to_config(),
        Err(ImportError::Configuration { .. })
    ));

    // --quiet and --verbose cannot be combined
    assert!(Args::try_parse_from(["contact-importer", "upload.csv", "-q", "-v"]).is_err());
}
