//! Common regex patterns for Japanese business document extraction.
//!
//! All patterns run against [`NormalizedText`](super::normalize::NormalizedText),
//! so whitespace is always a single ASCII space and digits are ASCII.

use lazy_static::lazy_static;
use regex::Regex;

use super::doc_type::DOCUMENT_TYPES;
use super::era::Era;

lazy_static! {
    // 2024年10月9日, 2024/10/9, 2024-10-09
    pub static ref GREGORIAN_DATE: Regex = Regex::new(
        r"([0-9]{4}) *[年/\-] *([0-9]{1,2}) *[月/\-] *([0-9]{1,2}) *日?"
    ).unwrap();

    // 令和6年10月9日, 平成元年4月1日
    pub static ref ERA_DATE: Regex = Regex::new(&format!(
        r"({}) *([0-9]{{1,2}}|元) *年 *([0-9]{{1,2}}) *月 *([0-9]{{1,2}}) *日",
        Era::ALL.map(Era::name).join("|")
    )).unwrap();

    // 合計 98,000円, 合計金額（税込） 123,456 円
    pub static ref TOTAL_AMOUNT: Regex = Regex::new(
        r"合 *計.*?([0-9]{1,3}(?:,[0-9]{3})+|[0-9]+) *円"
    ).unwrap();

    // One pattern per document type, in vocabulary order. Only the first two
    // characters of a label are matched, so 御見積り and ご請求金額 count too.
    pub static ref DOCUMENT_TYPE_PATTERNS: Vec<(&'static str, Regex)> = DOCUMENT_TYPES
        .iter()
        .map(|label| (*label, delimiter_tolerant(&label_prefix(label))))
        .collect();
}

/// The leading characters of a label that identify its document type.
fn label_prefix(label: &str) -> String {
    label.chars().take(2).collect()
}

/// Build a pattern matching `word` with any number of delimiters between its characters.
pub fn delimiter_tolerant(word: &str) -> Regex {
    let pattern = word
        .chars()
        .map(|c| regex::escape(c.encode_utf8(&mut [0; 4])))
        .collect::<Vec<_>>()
        .join(" *");
    Regex::new(&pattern).unwrap()
}
