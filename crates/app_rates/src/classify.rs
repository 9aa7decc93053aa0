//! Change classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction and size of a rate change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeClass {
    /// First observation, nothing to compare against
    None,
    /// Unchanged
    Normal,
    Increase,
    Decrease,
    SignificantIncrease,
    SignificantDecrease,
}

impl ChangeClass {
    pub fn is_significant(self) -> bool {
        matches!(self, Self::SignificantIncrease | Self::SignificantDecrease)
    }
}

/// Status column of the history table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateStatus {
    Normal,
    Sudden,
}

impl fmt::Display for RateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Sudden => write!(f, "sudden change"),
        }
    }
}

/// Classify `change` (none for the first observation) against `threshold`
pub fn classify(change: Option<f64>, threshold: f64) -> (ChangeClass, RateStatus) {
    let Some(change) = change else {
        return (ChangeClass::None, RateStatus::Normal);
    };

    let sudden = change.abs() >= threshold;
    let class = if change > 0.0 {
        if sudden {
            ChangeClass::SignificantIncrease
        } else {
            ChangeClass::Increase
        }
    } else if change < 0.0 {
        if sudden {
            ChangeClass::SignificantDecrease
        } else {
            ChangeClass::Decrease
        }
    } else {
        ChangeClass::Normal
    };

    let status = if sudden { RateStatus::Sudden } else { RateStatus::Normal };
    (class, status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify(None, 0.5), (ChangeClass::None, RateStatus::Normal));
        assert_eq!(classify(Some(0.0), 0.5), (ChangeClass::Normal, RateStatus::Normal));
        assert_eq!(classify(Some(0.3), 0.5), (ChangeClass::Increase, RateStatus::Normal));
        assert_eq!(classify(Some(-0.3), 0.5), (ChangeClass::Decrease, RateStatus::Normal));
        assert_eq!(
            classify(Some(0.5), 0.5),
            (ChangeClass::SignificantIncrease, RateStatus::Sudden)
        );
        assert_eq!(
            classify(Some(-1.2), 0.5),
            (ChangeClass::SignificantDecrease, RateStatus::Sudden)
        );
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(RateStatus::Sudden.to_string(), "sudden change");
        assert_eq!(
            serde_json::to_string(&ChangeClass::SignificantIncrease).unwrap(),
            "\"significant-increase\""
        );
    }
}
