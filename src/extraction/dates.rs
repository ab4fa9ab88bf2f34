use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // DD/MM/YYYY or DD-MM-YYYY, either separator on both positions
    static ref DATE_PATTERN: Regex =
        Regex::new(r"\b(\d{2})[/\-](\d{2})[/\-](\d{4})\b").unwrap();
}

/// A date literal found in OCR text, kept verbatim alongside its parsed parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMatch {
    pub text: String,
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

/// First `DD/MM/YYYY` or `DD-MM-YYYY` substring in the text.
pub fn first_date(text: &str) -> Option<DateMatch> {
    let caps = DATE_PATTERN.captures(text)?;
    let day = caps.get(1)?.as_str().parse().ok()?;
    let month = caps.get(2)?.as_str().parse().ok()?;
    let year = caps.get(3)?.as_str().parse().ok()?;
    Some(DateMatch {
        text: caps.get(0)?.as_str().to_string(),
        day,
        month,
        year,
    })
}

/// Age in completed years on `today` for someone born on day/month/year.
///
/// Calendar subtraction: current year minus birth year, minus one when the
/// current month/day precedes the birth month/day. `None` when the components
/// do not form a real calendar date or the birth date lies in the future.
pub fn age_on(day: u32, month: u32, year: i32, today: NaiveDate) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, month, day)?;
    let mut age = today.year() - year;
    if (today.month(), today.day()) < (month, day) {
        age -= 1;
    }
    u32::try_from(age).ok()
}

/// Age from a bare year of birth, no day precision.
pub fn age_from_year(year: i32, today: NaiveDate) -> Option<u32> {
    u32::try_from(today.year() - year).ok()
}
