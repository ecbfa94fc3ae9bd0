//! Rule-based field extractors for Japanese business documents.

pub mod normalize;
pub mod era;
pub mod dates;
pub mod doc_type;
pub mod counterparty;
pub mod amounts;
pub mod patterns;

pub use normalize::{normalize, NormalizedText, DELIMITER};
pub use era::{convert_era, Era};
pub use dates::{extract_issue_date, DateExtractor, IssueDate};
pub use doc_type::{classify_document_type, DocumentTypeClassifier, DOCUMENT_TYPES};
pub use counterparty::{
    extract_counterparty, CounterpartyCandidate, CounterpartyExtractor, SuffixForm,
    ENTITY_SUFFIXES, UNRECOGNIZED_COUNTERPARTY,
};
pub use amounts::{extract_total_amount, parse_amount, TotalAmountExtractor};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from normalized text.
    fn extract(&self, text: &NormalizedText) -> Option<Self::Output>;
}

/// An extracted value together with where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range in the normalized text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
