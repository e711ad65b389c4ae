// File: src/model/parser.rs
use crate::model::{CaptureRecord, ReferenceYear};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use regex::{Captures, Regex};
use std::sync::LazyLock;

// D/M or D/M/YY, delimited by whitespace or the ends of the input.
// The delimiting whitespace is part of the match and is removed with it.
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:^|\s)(?P<day>[0-9]{1,2})/(?P<month>[0-9]{1,2})(?:/(?P<year>[0-9]{2}))?(?:$|\s)",
    )
    .unwrap()
});

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([a-z0-9]+?)(?:$|\s)").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMatch {
    /// Input with the matched date token removed (unchanged when nothing matched).
    pub cleaned: String,
    pub date: Option<NaiveDate>,
}

/// Builds a date the way calendar arithmetic does: months past December and
/// days past the end of a month carry into the next unit, zero and negative
/// values borrow from the previous one. `month0` is zero-based.
pub fn normalize_date(year: i32, month0: i32, day: i32) -> Option<NaiveDate> {
    let total_months = year.checked_mul(12)?.checked_add(month0)?;
    let first = NaiveDate::from_ymd_opt(
        total_months.div_euclid(12),
        total_months.rem_euclid(12) as u32 + 1,
        1,
    )?;
    first.checked_add_signed(Duration::days(i64::from(day) - 1))
}

fn group_number(caps: &Captures, name: &str) -> i32 {
    caps.name(name)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or_default()
}

/// Finds the first `D/M[/YY]` token in `input`.
///
/// Years default to `reference_year`; two-digit years borrow its first two
/// digits. A date earlier than `now` keeps its day and month but moves to the
/// year after `now`. Day and month are not range checked, so "31/2" lands in
/// March.
pub fn recognize_date(
    input: &str,
    reference_year: &ReferenceYear,
    now: NaiveDateTime,
) -> DateMatch {
    let Some(caps) = DATE_RE.captures(input) else {
        return DateMatch {
            cleaned: input.to_string(),
            date: None,
        };
    };
    let whole = caps.get_match();

    let day = group_number(&caps, "day");
    let month0 = group_number(&caps, "month") - 1;
    let year = match caps.name("year") {
        Some(yy) => reference_year.expand(yy.as_str()),
        None => reference_year.year(),
    };

    let Some(mut date) = normalize_date(year, month0, day) else {
        log::warn!("Date token '{}' is outside the supported range", whole.as_str());
        return DateMatch {
            cleaned: input.to_string(),
            date: None,
        };
    };

    if date.and_time(NaiveTime::MIN) < now
        && let Some(next) = normalize_date(now.year() + 1, date.month0() as i32, date.day() as i32)
    {
        date = next;
    }

    log::debug!("Recognized '{}' as {}", whole.as_str().trim(), date);

    let mut cleaned = String::with_capacity(input.len());
    cleaned.push_str(&input[..whole.start()]);
    cleaned.push_str(&input[whole.end()..]);

    DateMatch {
        cleaned,
        date: Some(date),
    }
}

/// Pulls every `#tag` (lowercase letters and digits, ended by whitespace or
/// the end of the text) out of `text`, left to right.
///
/// Returns the text with each tag and its trailing separator removed, and the
/// tags in the order found. Duplicates are kept.
pub fn extract_tags(text: &str) -> (String, Vec<String>) {
    let mut description = String::with_capacity(text.len());
    let mut tags = Vec::new();
    let mut cursor = 0;

    for caps in TAG_RE.captures_iter(text) {
        let whole = caps.get_match();
        description.push_str(&text[cursor..whole.start()]);
        cursor = whole.end();
        if let Some(tag) = caps.get(1) {
            tags.push(tag.as_str().to_string());
        }
    }
    description.push_str(&text[cursor..]);

    (description, tags)
}

/// Date recognition followed by tag extraction, in one call.
pub fn parse_capture(
    input: &str,
    reference_year: &ReferenceYear,
    now: NaiveDateTime,
) -> CaptureRecord {
    let DateMatch { cleaned, date } = recognize_date(input, reference_year, now);
    let (description, tags) = extract_tags(&cleaned);
    CaptureRecord {
        description,
        date,
        tags,
    }
}
