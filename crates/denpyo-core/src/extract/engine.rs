//! Extraction engine combining the field rules into one document record.

use std::time::Instant;

use tracing::{debug, info};

use crate::models::config::ExtractionConfig;
use crate::models::record::DocumentRecord;

use super::rules::{
    counterparty::{CounterpartyExtractor, UNRECOGNIZED_COUNTERPARTY},
    dates::DateExtractor,
    doc_type::DocumentTypeClassifier,
    amounts::TotalAmountExtractor,
    normalize::NormalizedText,
    FieldExtractor,
};
use super::DocumentExtractor;

/// Result of one extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted fields.
    pub record: DocumentRecord,
    /// Text the rules ran against.
    pub normalized_text: NormalizedText,
    /// One entry per field that could not be determined.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Rule-based document field extraction.
///
/// Holds only read-only settings, so one engine can serve any number of
/// threads.
#[derive(Debug, Clone)]
pub struct ExtractionEngine {
    counterparty: CounterpartyExtractor,
    unrecognized_counterparty: String,
}

impl ExtractionEngine {
    /// Create an engine that excludes `self_company_name` from counterparty matches.
    pub fn new(self_company_name: &str) -> Self {
        Self {
            counterparty: CounterpartyExtractor::new(self_company_name),
            unrecognized_counterparty: UNRECOGNIZED_COUNTERPARTY.to_string(),
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(&config.self_company_name)
            .with_unrecognized_counterparty(&config.unrecognized_counterparty)
    }

    /// Set the counterparty text used when no company name is found.
    pub fn with_unrecognized_counterparty(mut self, sentinel: &str) -> Self {
        self.unrecognized_counterparty = sentinel.to_string();
        self
    }

    /// Extract with diagnostics.
    pub fn parse(&self, raw_text: &str) -> ExtractionResult {
        let start = Instant::now();
        let mut warnings = Vec::new();

        info!(
            "Extracting fields from {} characters of text, excluding {:?}",
            raw_text.chars().count(),
            self.counterparty.self_company_name()
        );

        let text = NormalizedText::new(raw_text);

        let doc_type = DocumentTypeClassifier::new()
            .extract(&text)
            .map(str::to_string)
            .unwrap_or_default();
        if doc_type.is_empty() {
            warnings.push("Could not determine document type".to_string());
        }

        let counterparty_name = match self.counterparty.extract(&text) {
            Some(candidate) => {
                debug!(
                    "Counterparty {:?} found next to {} in fragment {}",
                    candidate.name, candidate.suffix, candidate.word_index
                );
                candidate.name
            }
            None => {
                warnings.push("Could not extract counterparty name".to_string());
                self.unrecognized_counterparty.clone()
            }
        };

        let issue_date = match DateExtractor::new().extract(&text) {
            Some(date) => {
                match date.value.to_naive_date() {
                    Some(day) => debug!("Issue date {} from {:?}", day, date.source),
                    None => warnings.push(format!(
                        "Issue date {:?} is not a calendar date",
                        date.source
                    )),
                }
                date.value.yymmdd()
            }
            None => {
                warnings.push("Could not extract issue date".to_string());
                String::new()
            }
        };

        let total_amount = match TotalAmountExtractor::new().extract(&text) {
            Some(amount) => amount.value,
            None => {
                warnings.push("Could not extract total amount".to_string());
                String::new()
            }
        };

        let record = DocumentRecord {
            doc_type,
            counterparty_name,
            issue_date,
            total_amount,
        };

        debug!("Extracted {:?} with {} warnings", record, warnings.len());

        ExtractionResult {
            record,
            normalized_text: text,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

impl Default for ExtractionEngine {
    fn default() -> Self {
        Self::new("")
    }
}

impl DocumentExtractor for ExtractionEngine {
    fn extract(&self, raw_text: &str) -> DocumentRecord {
        self.parse(raw_text).record
    }
}

/// Extract a document record from raw text, excluding `self_company_name`.
pub fn extract(raw_text: &str, self_company_name: &str) -> DocumentRecord {
    ExtractionEngine::new(self_company_name).extract(raw_text)
}
