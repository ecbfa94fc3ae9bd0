//! CLI subcommands and the helpers they share.

pub mod config;
pub mod extract;
pub mod rename;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use denpyo_core::models::config::{DenpyoConfig, PdfConfig};
use denpyo_core::pdf::{PdfExtractor, PdfProcessor};
use denpyo_core::ExtractionEngine;

/// Extensions accepted as document inputs.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "txt"];

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("denpyo")
        .join("config.json")
}

/// Load the config from `--config`, else from the default path if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<DenpyoConfig> {
    if let Some(path) = config_path {
        return Ok(DenpyoConfig::from_file(Path::new(path))?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Using config file {}", path.display());
        Ok(DenpyoConfig::from_file(&path)?)
    } else {
        Ok(DenpyoConfig::default())
    }
}

/// Build the extraction engine, letting `--self-company`/`MY_COMPANY_NAME` win over the config.
pub fn build_engine(config: &DenpyoConfig, self_company: Option<&str>) -> ExtractionEngine {
    let mut extraction = config.extraction.clone();
    if let Some(name) = self_company {
        extraction.self_company_name = name.to_string();
    }
    ExtractionEngine::from_config(&extraction)
}

pub fn is_supported(path: &Path) -> bool {
    let extension = file_extension(path);
    SUPPORTED_EXTENSIONS.contains(&extension.as_str())
}

fn file_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Read the raw text of a document: the PDF text layer, or a plain text file.
pub fn read_document_text(path: &Path, config: &PdfConfig) -> anyhow::Result<String> {
    let extension = file_extension(path);

    let text = match extension.as_str() {
        "pdf" => {
            let data = fs::read(path)?;
            let mut extractor = PdfExtractor::new().with_max_pages(config.max_pages);
            extractor.load(&data)?;
            debug!("PDF has {} pages", extractor.page_count());

            let text = extractor.extract_text()?;
            let length = text.chars().filter(|c| !c.is_whitespace()).count();
            if length < config.min_text_length {
                warn!(
                    "{} has only {} characters of text layer; run OCR on it first for better results",
                    path.display(),
                    length
                );
            }
            text
        }
        "txt" => fs::read_to_string(path)?,
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    };

    if text.trim().is_empty() {
        anyhow::bail!("No text could be extracted from {}", path.display());
    }

    Ok(text)
}
