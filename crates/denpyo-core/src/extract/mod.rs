//! Document field extraction module.

mod engine;
pub mod rules;

pub use engine::{extract, ExtractionEngine, ExtractionResult};

use crate::models::record::DocumentRecord;

/// Trait for document field extractors.
///
/// Extraction never fails: fields that cannot be determined come back empty
/// or as the unrecognized-counterparty sentinel.
pub trait DocumentExtractor {
    /// Extract document fields from raw text.
    fn extract(&self, raw_text: &str) -> DocumentRecord;
}
