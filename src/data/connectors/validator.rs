use crate::data::record::Record;
use crate::error::{Result, SymgpError};
use crate::types::{MISSING_FEATURE, NUM_FEATURES};
use super::types::FEATURE_NAMES;

pub struct DataValidator;

impl DataValidator {
    /// Check for minimum required records
    pub fn validate_minimum_records(records: &[Record], min_records: usize) -> Result<()> {
        if records.len() < min_records {
            return Err(SymgpError::Validation(format!(
                "Insufficient data: {} records, minimum {} required",
                records.len(),
                min_records
            )));
        }
        Ok(())
    }

    /// A diagnosis dataset without both classes cannot produce a useful F1 score
    pub fn validate_both_classes(records: &[Record]) -> Result<()> {
        let benign = records.iter().filter(|r| r.is_benign()).count();
        if benign == 0 || benign == records.len() {
            return Err(SymgpError::Validation(format!(
                "Dataset must contain both classes: {} benign out of {} records",
                benign,
                records.len()
            )));
        }
        Ok(())
    }

    /// Count missing measurements per feature
    pub fn check_missing(records: &[Record]) -> Vec<(String, usize)> {
        let mut counts = [0usize; NUM_FEATURES];
        for record in records {
            for (slot, &value) in record.features().iter().enumerate() {
                if value == MISSING_FEATURE {
                    counts[slot] += 1;
                }
            }
        }

        counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(slot, &count)| (FEATURE_NAMES[slot].to_string(), count))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, bare_nuclei: i32, label: i32) -> Record {
        Record::new(id, &[5, 1, 1, 1, 2, bare_nuclei, 3, 1, 1], label).unwrap()
    }

    #[test]
    fn test_minimum_records() {
        let records = vec![record(1, 1, 2)];
        assert!(DataValidator::validate_minimum_records(&records, 1).is_ok());
        assert!(DataValidator::validate_minimum_records(&records, 2).is_err());
    }

    #[test]
    fn test_single_class_rejected() {
        let records = vec![record(1, 1, 2), record(2, 1, 2)];
        assert!(DataValidator::validate_both_classes(&records).is_err());

        let records = vec![record(1, 1, 2), record(2, 1, 4)];
        assert!(DataValidator::validate_both_classes(&records).is_ok());
    }

    #[test]
    fn test_check_missing() {
        let records = vec![record(1, -1, 2), record(2, -1, 4), record(3, 10, 4)];
        let report = DataValidator::check_missing(&records);
        assert_eq!(report, vec![("bare_nuclei".to_string(), 2)]);
    }
}
