//! Document type classification.

use super::normalize::NormalizedText;
use super::patterns::DOCUMENT_TYPE_PATTERNS;
use super::FieldExtractor;

/// Recognized document types. Earlier labels win when several occur.
pub const DOCUMENT_TYPES: [&str; 3] = ["見積書", "納品書", "請求書"];

/// Matches the document type vocabulary by the first two characters of each
/// label, tolerating OCR spacing between them.
pub struct DocumentTypeClassifier;

impl DocumentTypeClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocumentTypeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DocumentTypeClassifier {
    type Output = &'static str;

    fn extract(&self, text: &NormalizedText) -> Option<Self::Output> {
        DOCUMENT_TYPE_PATTERNS
            .iter()
            .find(|(_, pattern)| pattern.is_match(text.as_str()))
            .map(|(label, _)| *label)
    }
}

/// Classify the document, returning an empty string when no label matches.
pub fn classify_document_type(text: &NormalizedText) -> String {
    DocumentTypeClassifier::new()
        .extract(text)
        .map(str::to_string)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::rules::normalize;

    fn classify(raw: &str) -> String {
        classify_document_type(&normalize(raw))
    }

    #[test]
    fn test_exact_labels() {
        assert_eq!(classify("御見積書"), "見積書");
        assert_eq!(classify("納品書 No.123"), "納品書");
        assert_eq!(classify("請求書"), "請求書");
    }

    #[test]
    fn test_spaced_label() {
        assert_eq!(classify("見\u{3000}積\u{3000}書"), "見積書");
        assert_eq!(classify("請 求\n書"), "請求書");
    }

    #[test]
    fn test_label_prefix_is_enough() {
        assert_eq!(classify("御見積り\n株式会社ABC\n合計 1,000円"), "見積書");
        assert_eq!(classify("ご請求金額 1,000円"), "請求書");
        assert_eq!(classify("納 品\n明細"), "納品書");
    }

    #[test]
    fn test_vocabulary_order_wins() {
        // An invoice that mentions the quotation it refers to.
        assert_eq!(classify("請求書 見積書番号 Q-1"), "見積書");
        assert_eq!(classify("請求書 納品書兼用"), "納品書");
    }

    #[test]
    fn test_no_label() {
        assert_eq!(classify("注文書"), "");
        assert_eq!(classify(""), "");
    }
}
