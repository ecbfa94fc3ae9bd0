//! The structured result of one extraction.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::extract::rules::amounts::parse_amount;

/// Fields extracted from one business document.
///
/// Missing fields are empty strings; an unrecognized counterparty carries the
/// engine's sentinel text instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// One of the document type labels, or empty.
    pub doc_type: String,

    /// Counterparty name without its entity suffix, or the sentinel.
    pub counterparty_name: String,

    /// Issue date as YYMMDD, or empty.
    pub issue_date: String,

    /// Total amount as printed, e.g. "98,000", or empty.
    pub total_amount: String,
}

impl DocumentRecord {
    /// `{doc_type}_{counterparty_name}_{issue_date}`. Empty fields stay empty segments.
    ///
    /// Characters that cannot appear in a file name are replaced, see
    /// [`file_name_safe`].
    pub fn file_stem(&self) -> String {
        format!(
            "{}_{}_{}",
            file_name_safe(&self.doc_type),
            file_name_safe(&self.counterparty_name),
            file_name_safe(&self.issue_date)
        )
    }

    /// File stem plus extension (given without the dot).
    pub fn file_name(&self, extension: &str) -> String {
        if extension.is_empty() {
            self.file_stem()
        } else {
            format!("{}.{}", self.file_stem(), extension)
        }
    }

    /// The issue date as a calendar date, if it is a valid YYMMDD date.
    pub fn issue_date_value(&self) -> Option<NaiveDate> {
        parse_yymmdd(&self.issue_date)
    }

    /// The total amount as a number.
    pub fn total_amount_value(&self) -> Option<Decimal> {
        parse_amount(&self.total_amount)
    }
}

/// Replace path separators and other characters reserved in file names with
/// their full-width forms. Control characters are dropped.
pub fn file_name_safe(segment: &str) -> String {
    segment
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '/' => '／',
            '\\' => '＼',
            ':' => '：',
            '*' => '＊',
            '?' => '？',
            '"' => '＂',
            '<' => '＜',
            '>' => '＞',
            '|' => '｜',
            other => other,
        })
        .collect()
}

/// Parse a six-digit YYMMDD date.
pub fn parse_yymmdd(s: &str) -> Option<NaiveDate> {
    if s.len() != 6 || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%y%m%d").ok()
}
