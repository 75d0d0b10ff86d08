//! Error types for metric evaluation
//!
//! This module defines the failures that can occur while validating a dataset
//! or assembling a report, along with a convenient `Result` alias.
//!
//! Non-finite *scores* are not errors: a zero in `y_true` produces an infinite
//! percentage error, which is carried into the report as-is.

/// Errors that can occur while evaluating regression metrics.
///
/// Dataset-level variants carry the name of the offending dataset when raised
/// while building a report. When raised by [`crate::Observations::new`] directly,
/// the name is empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The observed and predicted sequences have different lengths.
    #[error("Found input variables with inconsistent numbers of samples in `{dataset}`: [{y_true}, {y_pred}]")]
    LengthMismatch {
        /// Name of the dataset
        dataset: String,
        /// Number of observed values
        y_true: usize,
        /// Number of predicted values
        y_pred: usize,
    },

    /// Cannot compute metrics because there is no data.
    #[error("Found array with 0 samples in `{dataset}`; a minimum of 1 is required")]
    NoData {
        /// Name of the dataset
        dataset: String,
    },

    /// An input value is `NaN` or infinite.
    ///
    /// Only the inputs are checked. Scores are allowed to be non-finite.
    #[error("Input contains NaN or infinity in `{dataset}` at index {index}")]
    NonFinite {
        /// Name of the dataset
        dataset: String,
        /// Position of the first offending pair
        index: usize,
    },

    /// A metric label did not match any known metric.
    #[error("Unknown metric `{0}`")]
    UnknownMetric(String),

    /// A numeric value could not be cast to the target type. This is usually a custom type much smaller than f64/f32
    #[error("Failed to cast value to target type")]
    CastFailed,
}

impl Error {
    /// Attaches a dataset name to a dataset-level error.
    ///
    /// Errors without a dataset are returned unchanged.
    #[must_use]
    pub fn in_dataset(self, name: &str) -> Self {
        match self {
            Self::LengthMismatch { y_true, y_pred, .. } => Self::LengthMismatch {
                dataset: name.to_string(),
                y_true,
                y_pred,
            },
            Self::NoData { .. } => Self::NoData {
                dataset: name.to_string(),
            },
            Self::NonFinite { index, .. } => Self::NonFinite {
                dataset: name.to_string(),
                index,
            },
            other => other,
        }
    }
}

/// Result type for metric evaluation
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_dataset_renames() {
        let err = Error::NoData {
            dataset: String::new(),
        }
        .in_dataset("train");
        assert_eq!(
            err,
            Error::NoData {
                dataset: "train".to_string()
            }
        );
        assert!(err.to_string().contains("`train`"));
    }

    #[test]
    fn in_dataset_keeps_cast_failures() {
        assert_eq!(Error::CastFailed.in_dataset("test"), Error::CastFailed);
    }
}
