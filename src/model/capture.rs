// File: src/model/capture.rs
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The structured result of one capture: the text left once the date token
/// and every tag have been removed, plus what was recognized.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CaptureRecord {
    pub description: String,
    pub date: Option<NaiveDate>,
    pub tags: Vec<String>,
}

/// Year a capture session was opened in.
///
/// Kept as text because two-digit years are resolved by prefixing the first
/// two characters of this string, so a session that spans New Year keeps the
/// prefix it started with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceYear {
    year: i32,
    text: String,
}

impl ReferenceYear {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            text: year.to_string(),
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::new(date.year())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Leading two characters ("20" for 2025).
    pub fn century_prefix(&self) -> &str {
        match self.text.char_indices().nth(2) {
            Some((idx, _)) => &self.text[..idx],
            None => &self.text,
        }
    }

    /// Expands a matched two-digit year against this reference ("27" -> 2027).
    pub fn expand(&self, two_digit: &str) -> i32 {
        format!("{}{}", self.century_prefix(), two_digit)
            .parse()
            .unwrap_or(self.year)
    }
}

impl fmt::Display for ReferenceYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Human readable echo of a recognized date, e.g. "Fri Jun 05 2026".
pub fn format_preview(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_century_prefix() {
        assert_eq!(ReferenceYear::new(2025).century_prefix(), "20");
        assert_eq!(ReferenceYear::new(7).century_prefix(), "7");
    }

    #[test]
    fn test_expand_two_digit_year() {
        let year = ReferenceYear::new(2025);
        assert_eq!(year.expand("27"), 2027);
        assert_eq!(year.expand("05"), 2005);
    }

    #[test]
    fn test_preview_format() {
        let date = NaiveDate::from_ymd_opt(2026, 6, 5).unwrap();
        assert_eq!(format_preview(date), "Fri Jun 05 2026");
    }
}
