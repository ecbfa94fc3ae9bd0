//! Total amount extraction.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::normalize::NormalizedText;
use super::patterns::TOTAL_AMOUNT;
use super::{ExtractionMatch, FieldExtractor};

/// Total amount extractor.
///
/// Takes the first 合計 in the document, so a subtotal printed above the grand
/// total is what gets reported.
pub struct TotalAmountExtractor;

impl TotalAmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TotalAmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TotalAmountExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &NormalizedText) -> Option<Self::Output> {
        let caps = TOTAL_AMOUNT.captures(text.as_str())?;
        let full_match = caps.get(0)?;
        Some(
            ExtractionMatch::new(caps[1].to_string(), full_match.as_str())
                .with_position(full_match.start(), full_match.end()),
        )
    }
}

/// Extract the total amount as printed (thousands separators kept), or an empty string.
pub fn extract_total_amount(text: &NormalizedText) -> String {
    TotalAmountExtractor::new()
        .extract(text)
        .map(|m| m.value)
        .unwrap_or_default()
}

/// Parse a yen amount such as "98,000" into a decimal.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s.chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}
