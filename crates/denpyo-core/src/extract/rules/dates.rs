//! Issue date extraction for Gregorian and Japanese era dates.

use chrono::NaiveDate;
use tracing::debug;

use super::era::{parse_era_year, Era};
use super::normalize::NormalizedText;
use super::patterns::{ERA_DATE, GREGORIAN_DATE};
use super::{ExtractionMatch, FieldExtractor};

/// A calendar date as printed on a document. Not validated against the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl IssueDate {
    /// Six-character YYMMDD form used in file names.
    pub fn yymmdd(&self) -> String {
        format!(
            "{:02}{:02}{:02}",
            self.year.rem_euclid(100),
            self.month,
            self.day
        )
    }

    /// The date as a chrono date, if it exists in the calendar.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

/// Issue date extractor.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }

    fn gregorian(&self, text: &str) -> Option<ExtractionMatch<IssueDate>> {
        let caps = GREGORIAN_DATE.captures(text)?;
        let full_match = caps.get(0)?;
        let date = IssueDate {
            year: caps[1].parse().ok()?,
            month: caps[2].parse().ok()?,
            day: caps[3].parse().ok()?,
        };
        Some(
            ExtractionMatch::new(date, full_match.as_str())
                .with_position(full_match.start(), full_match.end()),
        )
    }

    fn era(&self, text: &str) -> Option<ExtractionMatch<IssueDate>> {
        let caps = ERA_DATE.captures(text)?;
        let full_match = caps.get(0)?;
        let era_year = parse_era_year(&caps[2])?;

        let year = match caps[1].parse::<Era>().and_then(|era| era.to_gregorian(era_year)) {
            Ok(year) => year,
            Err(e) => {
                debug!("Ignoring era date {:?}: {}", full_match.as_str(), e);
                return None;
            }
        };

        let date = IssueDate {
            year,
            month: caps[3].parse().ok()?,
            day: caps[4].parse().ok()?,
        };
        Some(
            ExtractionMatch::new(date, full_match.as_str())
                .with_position(full_match.start(), full_match.end()),
        )
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<IssueDate>;

    /// The leftmost Gregorian date wins over any era date. An era date is only
    /// consulted when no Gregorian date is present.
    fn extract(&self, text: &NormalizedText) -> Option<Self::Output> {
        let text = text.as_str();
        if GREGORIAN_DATE.is_match(text) {
            return self.gregorian(text);
        }
        self.era(text)
    }
}

/// Extract the issue date as YYMMDD, or an empty string when none is found.
pub fn extract_issue_date(text: &NormalizedText) -> String {
    DateExtractor::new()
        .extract(text)
        .map(|m| m.value.yymmdd())
        .unwrap_or_default()
}
