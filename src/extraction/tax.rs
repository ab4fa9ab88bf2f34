use chrono::{Local, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

use super::dates;
use super::DocumentExtractor;
use crate::models::TaxCardRecord;

// Boilerplate header lines printed on every card, dropped before matching
const HEADER_LINES: [&str; 3] = [
    "INCOME TAX DEPARTMENT",
    "GOVT. OF INDIA",
    "PERMANENT ACCOUNT NUMBER CARD",
];

lazy_static! {
    // Five letters, four digits, one letter
    static ref TAX_ID_PATTERN: Regex = Regex::new(r"\b([A-Z]{5}\d{4}[A-Z])\b").unwrap();
}

/// Extractor for tax identity cards.
pub struct TaxCardExtractor {
    reference_date: NaiveDate,
}

impl TaxCardExtractor {
    pub fn new() -> Self {
        Self {
            reference_date: Local::now().naive_local().date(),
        }
    }

    pub fn with_reference_date(reference_date: NaiveDate) -> Self {
        Self { reference_date }
    }
}

impl Default for TaxCardExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentExtractor for TaxCardExtractor {
    type Record = TaxCardRecord;

    fn extract(&self, text: &str) -> TaxCardRecord {
        let lines: Vec<String> = text
            .split('\n')
            .map(|l| l.trim().to_uppercase())
            .filter(|l| !l.is_empty() && !HEADER_LINES.contains(&l.as_str()))
            .collect();

        let joined = lines.join(" ");

        let tax_id_number = TAX_ID_PATTERN
            .captures(&joined.replace(' ', ""))
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string());

        let dob = dates::first_date(&joined);
        let age = dob
            .as_ref()
            .and_then(|d| dates::age_on(d.day, d.month, d.year, self.reference_date));

        // The card prints holder name, then father's name, then the birth
        // date, so the two lines above the date literal are taken verbatim.
        // Without a date, the first two remaining lines stand in.
        let mut name = None;
        let mut father_name = None;
        let dob_line_idx = dob
            .as_ref()
            .and_then(|d| lines.iter().position(|l| *l == d.text));
        match dob_line_idx {
            Some(idx) if idx >= 2 => {
                name = Some(lines[idx - 2].clone());
                father_name = Some(lines[idx - 1].clone());
            }
            Some(_) => {}
            None => {
                if lines.len() >= 3 {
                    name = Some(lines[0].clone());
                    father_name = Some(lines[1].clone());
                }
            }
        }

        TaxCardRecord {
            name,
            tax_id_number,
            date_of_birth: dob.map(|d| d.text),
            age,
            father_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn extractor() -> TaxCardExtractor {
        TaxCardExtractor::with_reference_date(NaiveDate::from_ymd_opt(2026, 8, 30).unwrap())
    }

    #[test]
    fn test_positional_extraction_around_dob() {
        let text = "INCOME TAX DEPARTMENT\nGOVT. OF INDIA\nRAVI KUMAR\nSURESH KUMAR\n12/05/1987\nNo: ABCDE1234F\n";
        let record = extractor().extract(text);
        assert_eq!(record.name.as_deref(), Some("RAVI KUMAR"));
        assert_eq!(record.father_name.as_deref(), Some("SURESH KUMAR"));
        assert_eq!(record.date_of_birth.as_deref(), Some("12/05/1987"));
        assert_eq!(record.tax_id_number.as_deref(), Some("ABCDE1234F"));
        assert_eq!(record.age, Some(39));
    }

    #[test]
    fn test_first_two_lines_fallback_without_dob() {
        let text = "INCOME TAX DEPARTMENT\nRAVI KUMAR\nSURESH KUMAR\nABCDE1234F\n";
        let record = extractor().extract(text);
        assert_eq!(record.name.as_deref(), Some("RAVI KUMAR"));
        assert_eq!(record.father_name.as_deref(), Some("SURESH KUMAR"));
        assert_eq!(record.date_of_birth, None);
        assert_eq!(record.age, None);
    }

    #[test]
    fn test_tax_id_matched_across_split_groups() {
        // OCR sometimes inserts spaces inside the number
        let record = extractor().extract("ABCDE 1234 F\n");
        assert_eq!(record.tax_id_number.as_deref(), Some("ABCDE1234F"));
    }

    #[test]
    fn test_header_lines_discarded() {
        let text = "PERMANENT ACCOUNT NUMBER CARD\nRAVI KUMAR\nSURESH KUMAR\nXYZAB9876K\n";
        let record = extractor().extract(text);
        assert_eq!(record.name.as_deref(), Some("RAVI KUMAR"));
    }

    #[test]
    fn test_too_few_lines_leaves_names_absent() {
        let record = extractor().extract("RAVI KUMAR\nNo: ABCDE1234F\n");
        assert_eq!(record.name, None);
        assert_eq!(record.father_name, None);
        assert_eq!(record.tax_id_number.as_deref(), Some("ABCDE1234F"));
    }
}
