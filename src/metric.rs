use crate::{
    dataset::Observations,
    error::Error,
    statistics,
    value::Value,
};

/// A regression-quality metric that can appear as a row of a [`crate::MetricsReport`].
///
/// [`Metric::ALL`] lists every metric in report row order.
///
/// | Metric | Label | Better |
/// |---|---|---|
/// | [`Metric::RSquared`] | `R2` | higher |
/// | [`Metric::ExplainedVariance`] | `Explained variance` | higher |
/// | [`Metric::MaxError`] | `Max error` | lower |
/// | [`Metric::MeanAbsoluteError`] | `Mean absolute error` | lower |
/// | [`Metric::MedianAbsoluteError`] | `Median absolute error` | lower |
/// | [`Metric::MeanAbsolutePercentageError`] | `Mean absolute percentage error` | lower |
/// | [`Metric::MeanSquaredError`] | `Mean squared error` | lower |
/// | [`Metric::RootMeanSquaredError`] | `Root mean squared error` | lower |
///
/// # Example
/// ```rust
/// # use scorecard::Metric;
/// let metric: Metric = "max error".parse().unwrap();
/// assert_eq!(metric, Metric::MaxError);
/// assert_eq!(metric.to_string(), "Max error");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum Metric {
    /// Coefficient of determination. See [`statistics::r_squared`].
    #[serde(rename = "R2")]
    RSquared,

    /// See [`statistics::explained_variance`].
    #[serde(rename = "Explained variance")]
    ExplainedVariance,

    /// See [`statistics::max_error`].
    #[serde(rename = "Max error")]
    MaxError,

    /// See [`statistics::mean_absolute_error`].
    #[serde(rename = "Mean absolute error")]
    MeanAbsoluteError,

    /// See [`statistics::median_absolute_error`].
    #[serde(rename = "Median absolute error")]
    MedianAbsoluteError,

    /// See [`statistics::mean_absolute_percentage_error`].
    ///
    /// Non-finite if any observed value is zero.
    #[serde(rename = "Mean absolute percentage error")]
    MeanAbsolutePercentageError,

    /// See [`statistics::mean_squared_error`].
    #[serde(rename = "Mean squared error")]
    MeanSquaredError,

    /// See [`statistics::root_mean_squared_error`].
    #[serde(rename = "Root mean squared error")]
    RootMeanSquaredError,
}

impl Metric {
    /// Every metric, in report row order
    pub const ALL: [Metric; 8] = [
        Metric::RSquared,
        Metric::ExplainedVariance,
        Metric::MaxError,
        Metric::MeanAbsoluteError,
        Metric::MedianAbsoluteError,
        Metric::MeanAbsolutePercentageError,
        Metric::MeanSquaredError,
        Metric::RootMeanSquaredError,
    ];

    /// The row label used in reports
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Metric::RSquared => "R2",
            Metric::ExplainedVariance => "Explained variance",
            Metric::MaxError => "Max error",
            Metric::MeanAbsoluteError => "Mean absolute error",
            Metric::MedianAbsoluteError => "Median absolute error",
            Metric::MeanAbsolutePercentageError => "Mean absolute percentage error",
            Metric::MeanSquaredError => "Mean squared error",
            Metric::RootMeanSquaredError => "Root mean squared error",
        }
    }

    /// Computes this metric over a set of observations.
    ///
    /// The result is not rounded.
    pub fn evaluate<T: Value>(self, observations: &Observations<'_, T>) -> T {
        let (y, y_fit) = (observations.y_true_iter(), observations.y_pred_iter());
        match self {
            Metric::RSquared => statistics::r_squared(y, y_fit),
            Metric::ExplainedVariance => statistics::explained_variance(y, y_fit),
            Metric::MaxError => statistics::max_error(y, y_fit),
            Metric::MeanAbsoluteError => statistics::mean_absolute_error(y, y_fit),
            Metric::MedianAbsoluteError => statistics::median_absolute_error(y, y_fit),
            Metric::MeanAbsolutePercentageError => {
                statistics::mean_absolute_percentage_error(y, y_fit)
            }
            Metric::MeanSquaredError => statistics::mean_squared_error(y, y_fit),
            Metric::RootMeanSquaredError => statistics::root_mean_squared_error(y, y_fit),
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Metric {
    type Err = Error;

    /// Parses a report label, ignoring case and surrounding whitespace
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        Metric::ALL
            .into_iter()
            .find(|metric| metric.label().eq_ignore_ascii_case(label))
            .ok_or_else(|| Error::UnknownMetric(s.to_string()))
    }
}
