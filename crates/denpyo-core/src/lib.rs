//! Core library for Japanese business document field extraction.
//!
//! This crate provides:
//! - Normalization of noisy OCR and PDF text-layer output
//! - Field extraction for quotations, delivery notes and invoices
//!   (document type, counterparty, issue date with era support, total amount)
//! - Per-document sessions with manual overrides and file naming
//! - PDF text-layer reading

pub mod error;
pub mod extract;
pub mod models;
pub mod pdf;

pub use error::{CalendarError, DenpyoError, OverrideError, PdfError, Result};
pub use extract::rules::{convert_era, Era, NormalizedText, UNRECOGNIZED_COUNTERPARTY};
pub use extract::{extract, DocumentExtractor, ExtractionEngine, ExtractionResult};
pub use models::{DenpyoConfig, DocumentRecord, DocumentSession, RecordOverrides};
pub use pdf::{PdfExtractor, PdfProcessor};
