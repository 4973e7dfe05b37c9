//! Application constants for the contact importer
//!
//! Column vocabulary, header keywords, accepted date layouts and boolean
//! vocabularies shared by the parser and the CLI.

// =============================================================================
// Column Layout
// =============================================================================

/// Number of cells every data line must contain
pub const EXPECTED_FIELD_COUNT: usize = 5;

/// Keywords that identify the optional header line.
///
/// Matched by substring containment after whitespace removal and lowercasing.
pub const HEADER_KEYWORDS: &[&str] = &["name", "dateofbirth", "married", "phone", "salary"];

/// Byte-order mark that some spreadsheet exports prepend to the first line
pub const UTF8_BOM: char = '\u{feff}';

// =============================================================================
// Date Formats
// =============================================================================

/// A single accepted date layout.
///
/// `layout` is the user-facing pattern: `y`, `M` and `d` each stand for one
/// ASCII digit, every other character must appear literally. `chrono_format`
/// is the equivalent chrono pattern used once the shape has matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFormat {
    pub layout: &'static str,
    pub chrono_format: &'static str,
}

/// Accepted date layouts in priority order.
///
/// The first layout that matches wins, so `01/02/2020` is read as
/// January 2nd (`MM/dd/yyyy`) and never reaches `dd/MM/yyyy`.
pub const DATE_FORMATS: &[DateFormat] = &[
    DateFormat {
        layout: "yyyy-MM-dd",
        chrono_format: "%Y-%m-%d",
    },
    DateFormat {
        layout: "MM/dd/yyyy",
        chrono_format: "%m/%d/%Y",
    },
    DateFormat {
        layout: "dd/MM/yyyy",
        chrono_format: "%d/%m/%Y",
    },
    DateFormat {
        layout: "yyyy/MM/dd",
        chrono_format: "%Y/%m/%d",
    },
    DateFormat {
        layout: "dd.MM.yyyy",
        chrono_format: "%d.%m.%Y",
    },
];

// =============================================================================
// Married Vocabulary
// =============================================================================

/// Lowercased values accepted as `married = true`
pub const MARRIED_TRUE_VALUES: &[&str] = &["true", "1", "yes", "married"];

/// Lowercased values accepted as `married = false`
pub const MARRIED_FALSE_VALUES: &[&str] = &["false", "0", "no", "single"];

// =============================================================================
// Salary Parsing
// =============================================================================

/// Currency symbols tolerated before or after a salary amount
pub const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥', '¤'];

/// Thousands separator accepted in the integer part of a salary
pub const THOUSANDS_SEPARATOR: char = ',';

/// Decimal separator for salaries (invariant, never locale dependent)
pub const DECIMAL_SEPARATOR: char = '.';

// =============================================================================
// Processing Defaults
// =============================================================================

/// Upper bound for the default worker count
pub const DEFAULT_MAX_WORKERS: usize = 8;

/// Hard limit accepted by configuration validation
pub const MAX_WORKERS: usize = 64;

/// Lines buffered before a parallel coercion batch is dispatched
pub const DEFAULT_BATCH_SIZE: usize = 1024;

/// Environment variable overriding the worker count
pub const WORKERS_ENV_VAR: &str = "CONTACT_IMPORT_WORKERS";
