//! Per-document session: the extracted record plus manual corrections.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::record::{parse_yymmdd, DocumentRecord};
use crate::error::OverrideError;
use crate::extract::rules::amounts::parse_amount;

/// Replacement values for individual record fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub counterparty_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<String>,
}

impl RecordOverrides {
    pub fn is_empty(&self) -> bool {
        self.doc_type.is_none()
            && self.counterparty_name.is_none()
            && self.issue_date.is_none()
            && self.total_amount.is_none()
    }

    /// Check that overridden dates and amounts are well-formed. Empty values clear a field.
    pub fn validate(&self) -> Result<(), OverrideError> {
        if let Some(date) = self.issue_date.as_deref() {
            if !date.is_empty() && parse_yymmdd(date).is_none() {
                return Err(OverrideError::InvalidIssueDate(date.to_string()));
            }
        }
        if let Some(amount) = self.total_amount.as_deref() {
            if !amount.is_empty() && parse_amount(amount).is_none() {
                return Err(OverrideError::InvalidTotalAmount(amount.to_string()));
            }
        }
        Ok(())
    }

    /// A new record with the overridden fields replaced.
    pub fn apply(&self, record: &DocumentRecord) -> DocumentRecord {
        let pick = |value: &Option<String>, extracted: &String| {
            value.clone().unwrap_or_else(|| extracted.clone())
        };
        DocumentRecord {
            doc_type: pick(&self.doc_type, &record.doc_type),
            counterparty_name: pick(&self.counterparty_name, &record.counterparty_name),
            issue_date: pick(&self.issue_date, &record.issue_date),
            total_amount: pick(&self.total_amount, &record.total_amount),
        }
    }
}

/// One source document being renamed.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSession {
    source_name: String,
    extracted: DocumentRecord,
    overrides: RecordOverrides,
}

impl DocumentSession {
    pub fn new(source_name: impl Into<String>, extracted: DocumentRecord) -> Self {
        Self {
            source_name: source_name.into(),
            extracted,
            overrides: RecordOverrides::default(),
        }
    }

    /// Replace the overrides after validating them.
    pub fn set_overrides(&mut self, overrides: RecordOverrides) -> Result<(), OverrideError> {
        overrides.validate()?;
        self.overrides = overrides;
        Ok(())
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// The record as produced by the engine.
    pub fn extracted(&self) -> &DocumentRecord {
        &self.extracted
    }

    pub fn overrides(&self) -> &RecordOverrides {
        &self.overrides
    }

    /// The extracted record with overrides applied.
    pub fn effective(&self) -> DocumentRecord {
        self.overrides.apply(&self.extracted)
    }

    /// New file name, keeping the source extension (or `default_extension` if it has none).
    pub fn file_name(&self, default_extension: &str) -> String {
        let extension = Path::new(&self.source_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or(default_extension);
        self.effective().file_name(extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extracted() -> DocumentRecord {
        DocumentRecord {
            doc_type: "請求書".to_string(),
            counterparty_name: "unrecognized company name".to_string(),
            issue_date: String::new(),
            total_amount: "1,100".to_string(),
        }
    }

    #[test]
    fn test_overrides_replace_named_fields_only() {
        let overrides = RecordOverrides {
            counterparty_name: Some("XYZ".to_string()),
            issue_date: Some("240131".to_string()),
            ..Default::default()
        };
        let effective = overrides.apply(&extracted());
        assert_eq!(effective.doc_type, "請求書");
        assert_eq!(effective.counterparty_name, "XYZ");
        assert_eq!(effective.issue_date, "240131");
        assert_eq!(effective.total_amount, "1,100");
    }

    #[test]
    fn test_extracted_record_is_untouched() {
        let mut session = DocumentSession::new("scan.pdf", extracted());
        session
            .set_overrides(RecordOverrides {
                doc_type: Some("見積書".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(session.extracted(), &extracted());
        assert_eq!(session.effective().doc_type, "見積書");
    }

    #[test]
    fn test_invalid_overrides_rejected() {
        let mut session = DocumentSession::new("scan.pdf", extracted());
        let err = session
            .set_overrides(RecordOverrides {
                issue_date: Some("2024-01-31".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err, OverrideError::InvalidIssueDate("2024-01-31".to_string()));

        let err = RecordOverrides {
            total_amount: Some("¥1,000".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, OverrideError::InvalidTotalAmount("¥1,000".to_string()));
        assert!(session.overrides().is_empty());
    }

    #[test]
    fn test_empty_override_clears_field() {
        let overrides = RecordOverrides {
            total_amount: Some(String::new()),
            ..Default::default()
        };
        assert!(overrides.validate().is_ok());
        assert_eq!(overrides.apply(&extracted()).total_amount, "");
    }

    #[test]
    fn test_file_name_keeps_source_extension() {
        let session = DocumentSession::new("scans/0001.PDF", extracted());
        assert_eq!(session.file_name("pdf"), "請求書_unrecognized company name_.PDF");

        let session = DocumentSession::new("0001", extracted());
        assert_eq!(session.file_name("pdf"), "請求書_unrecognized company name_.pdf");
    }
}
