//! PDF text-layer module.
//!
//! Only the embedded text layer is read. Scanned PDFs without one need an
//! external OCR step before their text can be extracted.

mod extractor;

pub use extractor::PdfExtractor;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF text readers.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Text of every page, in page order.
    fn extract_pages(&self) -> Result<Vec<String>>;

    /// Text of the whole document, pages concatenated without separators.
    fn extract_text(&self) -> Result<String> {
        Ok(self.extract_pages()?.concat())
    }
}
