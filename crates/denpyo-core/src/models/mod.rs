//! Data models.

pub mod config;
pub mod record;
pub mod session;

pub use config::{DenpyoConfig, ExtractionConfig, OutputConfig, PdfConfig};
pub use record::DocumentRecord;
pub use session::{DocumentSession, RecordOverrides};
