use crate::error::{Result, SymgpError};
use crate::types::{Diagnosis, FEATURE_RANGE, MISSING_FEATURE, NUM_FEATURES};
use std::fmt;

/// One row of the diagnosis dataset
///
/// Records are only obtainable through [`Record::new`] or [`Record::from_line`],
/// so every value in circulation has exactly nine features in
/// `{-1} ∪ [1, 10]` and a label of 2 or 4. Zero is not a valid measurement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    id: i64,
    features: [i32; NUM_FEATURES],
    label: Diagnosis,
}

impl Record {
    pub fn new(id: i64, features: &[i32], label: i32) -> Result<Self> {
        match Diagnosis::from_code(label) {
            Some(diagnosis)
                if features.len() == NUM_FEATURES
                    && features.iter().all(|&v| is_valid_feature(v)) =>
            {
                let mut fixed = [0; NUM_FEATURES];
                fixed.copy_from_slice(features);
                Ok(Self {
                    id,
                    features: fixed,
                    label: diagnosis,
                })
            }
            _ => Err(SymgpError::Validation(format!(
                "Wrong values. Label: {}, Features: {:?}",
                label, features
            ))),
        }
    }

    /// Parse a comma-separated row: id, nine feature tokens, label.
    /// A `?` feature token stands for a missing measurement.
    pub fn from_line(line: &str) -> Result<Self> {
        let tokens: Vec<&str> = line.trim().split(',').map(str::trim).collect();
        if tokens.len() < 2 {
            return Err(SymgpError::Validation(format!(
                "Expected id, features and label, got '{}'",
                line.trim()
            )));
        }

        let id = parse_token::<i64>(tokens[0], "id")?;
        let label = parse_token::<i32>(tokens[tokens.len() - 1], "label")?;
        let features = tokens[1..tokens.len() - 1]
            .iter()
            .map(|&token| {
                if token == "?" {
                    Ok(MISSING_FEATURE)
                } else {
                    parse_token::<i32>(token, "feature")
                }
            })
            .collect::<Result<Vec<i32>>>()?;

        Self::new(id, &features, label)
    }

    /// Comma-joined form used by the persisted split files
    pub fn to_file_line(&self) -> String {
        let mut parts = Vec::with_capacity(NUM_FEATURES + 2);
        parts.push(self.id.to_string());
        parts.extend(self.features.iter().map(|v| v.to_string()));
        parts.push(self.label.code().to_string());
        parts.join(",")
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn features(&self) -> &[i32; NUM_FEATURES] {
        &self.features
    }

    pub fn label(&self) -> Diagnosis {
        self.label
    }

    pub fn is_benign(&self) -> bool {
        self.label == Diagnosis::Benign
    }

    pub fn is_malignant(&self) -> bool {
        self.label == Diagnosis::Malignant
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<#{}: {:?}>", self.label, self.features)
    }
}

fn is_valid_feature(value: i32) -> bool {
    value == MISSING_FEATURE || (FEATURE_RANGE.0..=FEATURE_RANGE.1).contains(&value)
}

fn parse_token<T: std::str::FromStr>(token: &str, what: &str) -> Result<T> {
    token.parse::<T>().map_err(|_| {
        SymgpError::Validation(format!("Invalid {} token '{}'", what, token))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: [i32; 9] = [5, 1, 1, 1, 2, 1, 3, 1, 1];

    #[test]
    fn test_valid_record() {
        let record = Record::new(1000025, &VALID, 2).unwrap();
        assert_eq!(record.id(), 1000025);
        assert!(record.is_benign());
        assert!(!record.is_malignant());
    }

    #[test]
    fn test_missing_marker_accepted() {
        let mut features = VALID;
        features[5] = -1;
        assert!(Record::new(1, &features, 4).is_ok());
    }

    #[test]
    fn test_zero_feature_rejected() {
        let mut features = VALID;
        features[0] = 0;
        assert!(Record::new(1, &features, 2).is_err());
    }

    #[test]
    fn test_out_of_range_features_rejected() {
        for bad in [-2, 11, 100] {
            let mut features = VALID;
            features[8] = bad;
            assert!(Record::new(1, &features, 2).is_err(), "{} accepted", bad);
        }
    }

    #[test]
    fn test_wrong_feature_count_rejected() {
        assert!(Record::new(1, &VALID[..8], 2).is_err());
        let mut ten = VALID.to_vec();
        ten.push(1);
        assert!(Record::new(1, &ten, 2).is_err());
    }

    #[test]
    fn test_bad_label_rejected() {
        for label in [0, 1, 3, 5] {
            assert!(Record::new(1, &VALID, label).is_err());
        }
    }

    #[test]
    fn test_error_reports_offending_values() {
        let err = Record::new(1, &VALID, 3).unwrap_err().to_string();
        assert!(err.contains("Label: 3"));
        assert!(err.contains("[5, 1, 1, 1, 2, 1, 3, 1, 1]"));
    }

    #[test]
    fn test_from_line_with_missing_token() {
        let record = Record::from_line("1057013,8,4,5,1,2,?,7,3,1,4").unwrap();
        assert_eq!(record.features()[5], -1);
        assert!(record.is_malignant());
    }

    #[test]
    fn test_from_line_non_numeric() {
        assert!(Record::from_line("1,a,1,1,1,1,1,1,1,1,2").is_err());
        assert!(Record::from_line("").is_err());
    }

    #[test]
    fn test_file_line_round_trip() {
        let line = "1057013,8,4,5,1,2,-1,7,3,1,4";
        let record = Record::from_line(line).unwrap();
        assert_eq!(record.to_file_line(), line);
        assert_eq!(Record::from_line(&record.to_file_line()).unwrap(), record);
    }

    #[test]
    fn test_display() {
        let record = Record::new(7, &VALID, 4).unwrap();
        assert_eq!(record.to_string(), "<#Malignant: [5, 1, 1, 1, 2, 1, 3, 1, 1]>");
    }
}
