use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Number of measurements carried by every diagnosis record
pub const NUM_FEATURES: usize = 9;

/// Value substituted for a `?` token in the source data
pub const MISSING_FEATURE: i32 = -1;

/// Inclusive bounds for a recorded (non-missing) measurement
pub const FEATURE_RANGE: (i32, i32) = (1, 10);

/// Class label of a diagnosis record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Diagnosis {
    Benign,
    Malignant,
}

impl Diagnosis {
    pub const BENIGN_CODE: i32 = 2;
    pub const MALIGNANT_CODE: i32 = 4;

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            Self::BENIGN_CODE => Some(Self::Benign),
            Self::MALIGNANT_CODE => Some(Self::Malignant),
            _ => None,
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::Benign => Self::BENIGN_CODE,
            Self::Malignant => Self::MALIGNANT_CODE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Benign => "Benign",
            Self::Malignant => "Malignant",
        }
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Defines whether a fitness score should be maximized or minimized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptimizationDirection {
    Maximize,
    Minimize,
}

impl OptimizationDirection {
    /// Orders two scores so that `Ordering::Greater` means `a` is the better one.
    /// NaN is worse than every number in both directions.
    pub fn compare(&self, a: f64, b: f64) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => {
                let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
                match self {
                    Self::Maximize => ord,
                    Self::Minimize => ord.reverse(),
                }
            }
        }
    }

    pub fn is_better(&self, a: f64, b: f64) -> bool {
        self.compare(a, b) == Ordering::Greater
    }

    /// Score every other score beats
    pub fn worst(&self) -> f64 {
        match self {
            Self::Maximize => f64::NEG_INFINITY,
            Self::Minimize => f64::INFINITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnosis_codes() {
        assert_eq!(Diagnosis::from_code(2), Some(Diagnosis::Benign));
        assert_eq!(Diagnosis::from_code(4), Some(Diagnosis::Malignant));
        assert_eq!(Diagnosis::from_code(3), None);
        assert_eq!(Diagnosis::Malignant.code(), 4);
    }

    #[test]
    fn test_direction_maximize() {
        let dir = OptimizationDirection::Maximize;
        assert!(dir.is_better(10.0, 5.0));
        assert!(!dir.is_better(5.0, 10.0));
        assert!(!dir.is_better(5.0, 5.0));
    }

    #[test]
    fn test_direction_minimize() {
        let dir = OptimizationDirection::Minimize;
        assert!(dir.is_better(0.0, 3.5));
        assert!(dir.is_better(1.0, f64::MAX));
    }

    #[test]
    fn test_nan_is_always_worst() {
        for dir in [OptimizationDirection::Maximize, OptimizationDirection::Minimize] {
            assert!(dir.is_better(0.0, f64::NAN));
            assert!(dir.is_better(f64::MAX, f64::NAN));
            assert!(!dir.is_better(f64::NAN, -1.0));
            assert_eq!(dir.compare(f64::NAN, f64::NAN), Ordering::Equal);
        }
    }
}
