//! Error types for the denpyo-core library.

use thiserror::Error;

/// Main error type for the denpyo library.
#[derive(Error, Debug)]
pub enum DenpyoError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Calendar conversion error.
    #[error("calendar error: {0}")]
    Calendar(#[from] CalendarError),

    /// Rejected manual override.
    #[error("override error: {0}")]
    Override(#[from] OverrideError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to reading the PDF text layer.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors from converting a Japanese era year to a Gregorian year.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// The era name is not in the era table.
    #[error("unknown era: {0}")]
    UnknownEra(String),

    /// Era years start at 1.
    #[error("invalid year {year} for era {era}")]
    InvalidEraYear { era: String, year: i32 },
}

/// Errors from validating user-supplied field overrides.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OverrideError {
    /// Issue date is not a valid YYMMDD date.
    #[error("issue date must be a valid YYMMDD date: {0}")]
    InvalidIssueDate(String),

    /// Total amount is not a number.
    #[error("total amount must be digits with optional thousands separators: {0}")]
    InvalidTotalAmount(String),
}

/// Result type for the denpyo library.
pub type Result<T> = std::result::Result<T, DenpyoError>;
