//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{DenpyoError, Result};
use crate::extract::rules::UNRECOGNIZED_COUNTERPARTY;

/// Main configuration for denpyo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DenpyoConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// PDF text-layer configuration.
    pub pdf: PdfConfig,

    /// Output naming configuration.
    pub output: OutputConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// The operator's own company, never reported as the counterparty.
    /// Empty disables the exclusion.
    pub self_company_name: String,

    /// Counterparty value used when no company name is recognized.
    pub unrecognized_counterparty: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            self_company_name: String::new(),
            unrecognized_counterparty: UNRECOGNIZED_COUNTERPARTY.to_string(),
        }
    }
}

/// PDF text-layer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to read (0 = unlimited).
    pub max_pages: usize,

    /// Below this many characters the PDF is reported as having no usable text layer.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_pages: 0,
            min_text_length: 10,
        }
    }
}

/// Output naming configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Extension for renamed files whose source has none.
    pub default_extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_extension: "pdf".to_string(),
        }
    }
}

impl DenpyoConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| DenpyoError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| DenpyoError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
