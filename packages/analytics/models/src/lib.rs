#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Result and configuration types for region analytics.
//!
//! [`ClassBreaks`] bins a continuous value into named classes the way the
//! choropleth legends do. [`RankedRegion`] and [`ScenarioDensities`] are
//! the outputs of ranking and the fire-multiplier scenario.

use firescape_region_models::{Metric, RegionLabel};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ascending thresholds splitting a value range into named classes.
///
/// `n` thresholds define `n + 1` classes. A value belongs to the class
/// whose index equals the number of thresholds less than or equal to it,
/// so each threshold is the inclusive lower bound of the class above it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassBreaks {
    /// Class boundaries, strictly ascending.
    pub thresholds: Vec<f64>,
    /// One label per class, `thresholds.len() + 1` in total.
    pub labels: Vec<String>,
}

/// Errors found when validating [`ClassBreaks`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassBreaksError {
    /// Label count does not match the threshold count.
    #[error("{thresholds} thresholds need {} labels, found {labels}", .thresholds + 1)]
    LabelCount {
        /// Number of thresholds.
        thresholds: usize,
        /// Number of labels supplied.
        labels: usize,
    },

    /// A threshold is NaN or infinite.
    #[error("threshold {index} is not finite: {value}")]
    NonFinite {
        /// Position of the offending threshold.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// A threshold is not greater than its predecessor.
    #[error("threshold {index} ({value}) is not greater than the one before it")]
    NotAscending {
        /// Position of the offending threshold.
        index: usize,
        /// The offending value.
        value: f64,
    },
}

/// One legend row: a class label and its value bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRange {
    /// Class index, 0 for the lowest class.
    pub index: usize,
    /// Class label.
    pub label: String,
    /// Inclusive lower bound, `None` for the lowest class.
    pub lower: Option<f64>,
    /// Exclusive upper bound, `None` for the highest class.
    pub upper: Option<f64>,
}

impl ClassBreaks {
    /// Builds validated class breaks.
    ///
    /// # Errors
    ///
    /// Returns [`ClassBreaksError`] if the labels and thresholds do not
    /// line up or the thresholds are not finite and strictly ascending.
    pub fn new(thresholds: Vec<f64>, labels: Vec<String>) -> Result<Self, ClassBreaksError> {
        let breaks = Self { thresholds, labels };
        breaks.validate()?;
        Ok(breaks)
    }

    /// Default precipitation classes, in mm.
    #[must_use]
    pub fn precipitation() -> Self {
        Self {
            thresholds: vec![50.0, 100.0, 150.0, 200.0],
            labels: ["Very Low", "Low", "Moderate", "High", "Very High"]
                .map(String::from)
                .to_vec(),
        }
    }

    /// Default fire density classes, in fires per 100 km².
    #[must_use]
    pub fn fire_density() -> Self {
        Self {
            thresholds: vec![0.005, 0.05, 0.5, 1.5],
            labels: ["Very Low", "Low", "Medium", "High", "Extreme"]
                .map(String::from)
                .to_vec(),
        }
    }

    /// Checks the invariants described on [`ClassBreaks`].
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ClassBreaksError> {
        if self.labels.len() != self.thresholds.len() + 1 {
            return Err(ClassBreaksError::LabelCount {
                thresholds: self.thresholds.len(),
                labels: self.labels.len(),
            });
        }

        for (index, &value) in self.thresholds.iter().enumerate() {
            if !value.is_finite() {
                return Err(ClassBreaksError::NonFinite { index, value });
            }
            if index > 0 && value <= self.thresholds[index - 1] {
                return Err(ClassBreaksError::NotAscending { index, value });
            }
        }

        Ok(())
    }

    /// Returns the class index for a value, or `None` for NaN.
    #[must_use]
    pub fn class_index(&self, value: f64) -> Option<usize> {
        if value.is_nan() {
            return None;
        }
        Some(self.thresholds.partition_point(|threshold| *threshold <= value))
    }

    /// Returns the class label for a value, or `None` for NaN.
    #[must_use]
    pub fn label_for(&self, value: f64) -> Option<&str> {
        self.class_index(value)
            .and_then(|index| self.labels.get(index))
            .map(String::as_str)
    }

    /// Returns one row per class, lowest first.
    #[must_use]
    pub fn legend(&self) -> Vec<ClassRange> {
        self.labels
            .iter()
            .enumerate()
            .map(|(index, label)| ClassRange {
                index,
                label: label.clone(),
                lower: index.checked_sub(1).and_then(|i| self.thresholds.get(i)).copied(),
                upper: self.thresholds.get(index).copied(),
            })
            .collect()
    }
}

/// Sort direction for rankings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    /// Highest value first.
    #[default]
    Descending,
    /// Lowest value first.
    Ascending,
}

/// A region's position in a ranking by one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedRegion {
    /// 1-based rank.
    pub rank: usize,
    /// The ranked region.
    pub region: RegionLabel,
    /// Metric that was ranked.
    pub metric: Metric,
    /// The region's value for the metric.
    pub value: f64,
    /// `value` divided by the global maximum, clamped to `[0, 1]`.
    pub fraction_of_max: f64,
}

/// Region densities after applying a fire multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioDensities {
    /// Multiplier that was applied.
    pub multiplier: f64,
    /// Adjusted fires per 100 km².
    pub fire_density: f64,
    /// Adjusted burned km² per 100 km².
    pub burned_density: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(ClassBreaks::precipitation().validate(), Ok(()));
        assert_eq!(ClassBreaks::fire_density().validate(), Ok(()));
    }

    #[test]
    fn thresholds_are_inclusive_lower_bounds() {
        let breaks = ClassBreaks::precipitation();
        assert_eq!(breaks.label_for(0.0), Some("Very Low"));
        assert_eq!(breaks.label_for(49.9), Some("Very Low"));
        assert_eq!(breaks.label_for(50.0), Some("Low"));
        assert_eq!(breaks.label_for(199.9), Some("High"));
        assert_eq!(breaks.label_for(200.0), Some("Very High"));
        assert_eq!(breaks.label_for(10_000.0), Some("Very High"));
        assert_eq!(breaks.label_for(-3.0), Some("Very Low"));
        assert_eq!(breaks.label_for(f64::NAN), None);
    }

    #[test]
    fn rejects_label_count_mismatch() {
        let err = ClassBreaks::new(vec![1.0, 2.0], vec!["a".to_string()]).unwrap_err();
        assert_eq!(
            err,
            ClassBreaksError::LabelCount {
                thresholds: 2,
                labels: 1
            }
        );
    }

    #[test]
    fn rejects_unsorted_and_non_finite_thresholds() {
        let labels = || vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert!(matches!(
            ClassBreaks::new(vec![2.0, 2.0], labels()),
            Err(ClassBreaksError::NotAscending { index: 1, .. })
        ));
        assert!(matches!(
            ClassBreaks::new(vec![1.0, f64::INFINITY], labels()),
            Err(ClassBreaksError::NonFinite { index: 1, .. })
        ));
    }

    #[test]
    fn legend_rows() {
        let legend = ClassBreaks::fire_density().legend();
        assert_eq!(legend.len(), 5);
        assert_eq!(legend[0].lower, None);
        assert_eq!(legend[0].upper, Some(0.005));
        assert_eq!(legend[2].label, "Medium");
        assert_eq!(legend[2].lower, Some(0.05));
        assert_eq!(legend[2].upper, Some(0.5));
        assert_eq!(legend[4].lower, Some(1.5));
        assert_eq!(legend[4].upper, None);
    }

    #[test]
    fn breaks_deserialize_from_toml() {
        let breaks: ClassBreaks = toml::from_str(
            r#"
            thresholds = [10.0, 20.0]
            labels = ["dry", "mid", "wet"]
            "#,
        )
        .unwrap();
        assert_eq!(breaks.validate(), Ok(()));
        assert_eq!(breaks.label_for(15.0), Some("mid"));
    }
}
