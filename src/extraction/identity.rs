use chrono::{Local, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

use super::dates;
use super::DocumentExtractor;
use crate::models::IdentityCardRecord;

lazy_static! {
    // 12 digits, optionally grouped 4-4-4 with single spaces
    static ref ID_NUMBER_PATTERN: Regex =
        Regex::new(r"\b\d{4}\s?\d{4}\s?\d{4}\b").unwrap();
    static ref YEAR_OF_BIRTH_PATTERN: Regex =
        Regex::new(r"(?i)Year of Birth\s*[:\-]?\s*(\d{4})").unwrap();
    static ref GENDER_PATTERN: Regex =
        Regex::new(r"(?i)\b(Male|Female|Transgender)\b").unwrap();
    static ref AGE_PATTERN: Regex =
        Regex::new(r"(?i)Age\s*[:\-]?\s*(\d+)").unwrap();
    // A line that plausibly holds a personal name: letters, spaces, periods
    static ref NAME_LINE_PATTERN: Regex =
        Regex::new(r"^[A-Za-z][A-Za-z\s\.]+$").unwrap();
}

/// Extractor for national identity cards.
pub struct IdentityCardExtractor {
    reference_date: NaiveDate,
}

impl IdentityCardExtractor {
    pub fn new() -> Self {
        Self {
            reference_date: Local::now().naive_local().date(),
        }
    }

    /// Pin the date used for age computation. Tests use this.
    pub fn with_reference_date(reference_date: NaiveDate) -> Self {
        Self { reference_date }
    }

    fn find_name(
        lines: &[&str],
        dob: Option<&dates::DateMatch>,
        year_of_birth: Option<i32>,
    ) -> Option<String> {
        let mut name = None;

        // The line right before a standalone date-of-birth line, or failing
        // that, the line before a standalone year-of-birth line. Positional
        // and fragile, but it matches how these cards lay out the holder name.
        if let Some(dob) = dob {
            if let Some(idx) = lines.iter().position(|l| *l == dob.text) {
                if idx > 0 {
                    name = Some(lines[idx - 1].to_string());
                }
            }
        } else if let Some(yob) = year_of_birth {
            let yob_str = yob.to_string();
            if let Some(idx) = lines.iter().position(|l| *l == yob_str) {
                if idx > 0 {
                    name = Some(lines[idx - 1].to_string());
                }
            }
        }

        // Last resort: first line that looks like a personal name
        if name.is_none() {
            name = lines
                .iter()
                .find(|l| NAME_LINE_PATTERN.is_match(l) && l.len() > 3)
                .map(|l| l.to_string());
        }

        name
    }
}

impl Default for IdentityCardExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentExtractor for IdentityCardExtractor {
    type Record = IdentityCardRecord;

    fn extract(&self, text: &str) -> IdentityCardRecord {
        let id_number = ID_NUMBER_PATTERN
            .find(text)
            .map(|m| m.as_str().replace(' ', ""));

        let dob = dates::first_date(text);

        let year_of_birth = YEAR_OF_BIRTH_PATTERN
            .captures(text)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<i32>().ok());

        let gender = GENDER_PATTERN.find(text).map(|m| {
            let s = m.as_str();
            let mut chars = s.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
                None => s.to_string(),
            }
        });

        // Explicit "Age:" label, overridden by a computed age whenever the
        // birth date (or at least the birth year) is known
        let mut age = AGE_PATTERN
            .captures(text)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok());
        if let Some(d) = &dob {
            if let Some(computed) = dates::age_on(d.day, d.month, d.year, self.reference_date) {
                age = Some(computed);
            }
        } else if let Some(yob) = year_of_birth {
            if let Some(computed) = dates::age_from_year(yob, self.reference_date) {
                age = Some(computed);
            }
        }

        let lines: Vec<&str> = text
            .split('\n')
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect();
        let name = Self::find_name(&lines, dob.as_ref(), year_of_birth);

        // A bare year of birth stands in for the date when only it was read
        let date_of_birth = dob
            .as_ref()
            .map(|d| d.text.clone())
            .or_else(|| year_of_birth.map(|y| y.to_string()));

        IdentityCardRecord {
            name,
            id_number,
            date_of_birth,
            age,
            gender,
        }
    }
}
