//! Japanese imperial era to Gregorian year conversion.

use std::fmt;
use std::str::FromStr;

use crate::error::CalendarError;

/// A named era of the Japanese calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Era {
    /// 令和, from 2019.
    Reiwa,
    /// 平成, from 1989.
    Heisei,
    /// 昭和, from 1926.
    Showa,
    /// 大正, from 1912.
    Taisho,
    /// 明治, from 1868.
    Meiji,
}

impl Era {
    /// Every supported era, newest first.
    pub const ALL: [Era; 5] = [Era::Reiwa, Era::Heisei, Era::Showa, Era::Taisho, Era::Meiji];

    /// The era name as written in documents.
    pub fn name(self) -> &'static str {
        match self {
            Era::Reiwa => "令和",
            Era::Heisei => "平成",
            Era::Showa => "昭和",
            Era::Taisho => "大正",
            Era::Meiji => "明治",
        }
    }

    /// Gregorian year of era year 1.
    pub fn base_year(self) -> i32 {
        match self {
            Era::Reiwa => 2019,
            Era::Heisei => 1989,
            Era::Showa => 1926,
            Era::Taisho => 1912,
            Era::Meiji => 1868,
        }
    }

    /// Convert an era-relative year to a Gregorian year.
    pub fn to_gregorian(self, era_year: i32) -> Result<i32, CalendarError> {
        if era_year <= 0 {
            return Err(CalendarError::InvalidEraYear {
                era: self.name().to_string(),
                year: era_year,
            });
        }
        Ok(self.base_year() + era_year - 1)
    }
}

impl FromStr for Era {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Era::ALL
            .into_iter()
            .find(|era| era.name() == s)
            .ok_or_else(|| CalendarError::UnknownEra(s.to_string()))
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Convert a named era and era year to a Gregorian year.
pub fn convert_era(era_name: &str, era_year: i32) -> Result<i32, CalendarError> {
    era_name.parse::<Era>()?.to_gregorian(era_year)
}

/// Parse an era year as written after the era name. 元 marks the first year.
pub fn parse_era_year(s: &str) -> Option<i32> {
    if s == "元" {
        return Some(1);
    }
    s.parse().ok()
}
