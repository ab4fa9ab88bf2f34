use std::path::Path;

use serde::Serialize;

use crate::utils::ExtractError;

/// Writes one extracted record as a single-row CSV file.
///
/// The header row carries the record's field names in declaration order;
/// absent fields become empty cells. An existing file at the destination is
/// overwritten.
pub struct CsvSink;

impl CsvSink {
    pub fn write_record<T: Serialize>(record: &T, path: &Path) -> Result<(), ExtractError> {
        let mut writer = csv::Writer::from_path(path).map_err(|e| {
            ExtractError::SinkError(format!("Failed to open {}: {}", path.display(), e))
        })?;

        writer
            .serialize(record)
            .map_err(|e| ExtractError::SinkError(format!("Failed to write record: {}", e)))?;

        writer
            .flush()
            .map_err(|e| ExtractError::IoError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IdentityCardRecord, TaxCardRecord};

    fn read_back<T: for<'de> serde::Deserialize<'de>>(path: &Path) -> T {
        let mut reader = csv::Reader::from_path(path).unwrap();
        reader.deserialize().next().unwrap().unwrap()
    }

    #[test]
    fn test_round_trip_preserves_present_fields() {
        let record = IdentityCardRecord {
            name: Some("JOHN DOE".to_string()),
            id_number: Some("123456789012".to_string()),
            date_of_birth: Some("15/08/1990".to_string()),
            age: Some(36),
            gender: Some("Male".to_string()),
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("identity_card_data.csv");
        CsvSink::write_record(&record, &path).unwrap();

        let restored: IdentityCardRecord = read_back(&path);
        assert_eq!(restored, record);
    }

    #[test]
    fn test_absent_fields_round_trip_as_missing() {
        let record = TaxCardRecord {
            name: None,
            tax_id_number: Some("ABCDE1234F".to_string()),
            date_of_birth: None,
            age: None,
            father_name: None,
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tax_card_data.csv");
        CsvSink::write_record(&record, &path).unwrap();

        let restored: TaxCardRecord = read_back(&path);
        assert_eq!(restored, record);
    }

    #[test]
    fn test_existing_file_is_overwritten() {
        let record = IdentityCardRecord {
            name: Some("SECOND RUN".to_string()),
            id_number: None,
            date_of_birth: None,
            age: None,
            gender: None,
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("identity_card_data.csv");
        std::fs::write(&path, "stale contents from an earlier run\n").unwrap();
        CsvSink::write_record(&record, &path).unwrap();

        let restored: IdentityCardRecord = read_back(&path);
        assert_eq!(restored.name.as_deref(), Some("SECOND RUN"));
    }
}
