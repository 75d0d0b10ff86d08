use nalgebra::DMatrix;

use crate::{
    dataset::{Datasets, Observations},
    display::{self, Table},
    error::Result,
    metric::Metric,
    value::Value,
};

/// Minimum total number of observations before datasets are scored in parallel
#[cfg(feature = "parallel")]
const MIN_SAMPLES_TO_PARALLEL: usize = 100_000;

/// Builds a [`MetricsReport`] from a collection of named datasets.
///
/// Defaults:
/// - Every metric in [`Metric::ALL`], in that order
/// - Scores rounded to [`display::DEFAULT_PRECISION`] (4) decimal places
///
/// # Example
/// ```rust
/// # use scorecard::{Datasets, Metric, ReportBuilder};
/// let datasets = Datasets::new()
///     .with("train", [1.0, 2.0, 4.0], [1.0, 2.0, 5.0])
///     .with("test", [3.0, 5.0], [2.5, 5.5]);
///
/// let report = ReportBuilder::new()
///     .precision(2)
///     .metrics(&[Metric::MeanAbsoluteError, Metric::RSquared])
///     .build(&datasets)
///     .unwrap();
///
/// assert_eq!(report.shape(), (2, 2));
/// assert_eq!(report.get(Metric::MeanAbsoluteError, "test"), Some(0.5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportBuilder {
    precision: usize,
    metrics: Vec<Metric>,
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self {
            precision: display::DEFAULT_PRECISION,
            metrics: Metric::ALL.to_vec(),
        }
    }
}

impl ReportBuilder {
    /// Creates a builder with the default metrics and precision
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of decimal places scores are rounded to
    #[must_use]
    pub fn precision(mut self, decimals: usize) -> Self {
        self.precision = decimals;
        self
    }

    /// Sets the metrics to compute, in row order
    #[must_use]
    pub fn metrics(mut self, metrics: &[Metric]) -> Self {
        self.metrics = metrics.to_vec();
        self
    }

    /// Builds the report for every dataset in the collection, in insertion order.
    ///
    /// # Errors
    /// Returns the error for the first dataset that cannot be scored. See [`Observations::new`].
    pub fn build<T: Value>(&self, datasets: &Datasets<T>) -> Result<MetricsReport<T>> {
        self.build_from(datasets.iter())
    }

    /// Builds the report from `(name, y_true, y_pred)` triples, in iteration order.
    ///
    /// A repeated name replaces the earlier dataset's values but keeps its column position,
    /// the same as [`Datasets::insert`].
    ///
    /// # Errors
    /// Returns the error for the first dataset that cannot be scored. See [`Observations::new`].
    pub fn build_from<'a, T, S, I>(&self, datasets: I) -> Result<MetricsReport<T>>
    where
        T: Value,
        S: Into<String>,
        I: IntoIterator<Item = (S, &'a [T], &'a [T])>,
    {
        let mut names: Vec<String> = Vec::new();
        let mut samples: Vec<Observations<'a, T>> = Vec::new();
        for (name, y_true, y_pred) in datasets {
            let name: String = name.into();
            let observations =
                Observations::new(y_true, y_pred).map_err(|e| e.in_dataset(&name))?;
            match names.iter().position(|existing| *existing == name) {
                Some(column) => samples[column] = observations,
                None => {
                    names.push(name);
                    samples.push(observations);
                }
            }
        }

        tracing::debug!(
            datasets = names.len(),
            metrics = self.metrics.len(),
            precision = self.precision,
            "building metrics report"
        );

        //
        // One row per dataset, then transpose so metrics become the rows
        let rows = self.score_all(&names, &samples);
        let by_dataset = DMatrix::from_row_slice(names.len(), self.metrics.len(), &rows.concat());
        let scores = by_dataset.transpose();

        tracing::debug!(
            rows = scores.nrows(),
            columns = scores.ncols(),
            "metrics report built"
        );

        Ok(MetricsReport {
            metrics: self.metrics.clone(),
            datasets: names,
            scores,
            precision: self.precision,
        })
    }

    fn score_all<T: Value>(&self, names: &[String], samples: &[Observations<'_, T>]) -> Vec<Vec<T>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let total: usize = samples.iter().map(Observations::len).sum();
            if samples.len() > 1 && total >= MIN_SAMPLES_TO_PARALLEL {
                return names
                    .par_iter()
                    .zip(samples.par_iter())
                    .map(|(name, observations)| self.score_dataset(name, observations))
                    .collect();
            }
        }

        names
            .iter()
            .zip(samples)
            .map(|(name, observations)| self.score_dataset(name, observations))
            .collect()
    }

    /// Computes and rounds every metric for one dataset
    fn score_dataset<T: Value>(&self, name: &str, observations: &Observations<'_, T>) -> Vec<T> {
        tracing::trace!(dataset = name, samples = observations.len(), "scoring dataset");

        self.metrics
            .iter()
            .map(|&metric| {
                let score = metric.evaluate(observations);
                if !nalgebra::ComplexField::is_finite(&score) {
                    tracing::warn!(dataset = name, %metric, ?score, "non-finite score");
                }
                Value::round_to(score, self.precision)
            })
            .collect()
    }
}

/// The scores of every metric for a single dataset, as returned by [`MetricsReport::column`].
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MetricRow<T: Value> {
    /// Name of the dataset
    pub dataset: String,

    /// `(metric, rounded score)` pairs, in report row order
    pub scores: Vec<(Metric, T)>,
}
impl<T: Value> MetricRow<T> {
    /// Returns the score for a metric, if it was computed
    #[must_use]
    pub fn get(&self, metric: Metric) -> Option<T> {
        self.scores
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, score)| *score)
    }
}

/// A table of rounded regression-quality scores.
///
/// Rows are metrics, in the order they were requested (by default [`Metric::ALL`]).
/// Columns are datasets, in the order they were supplied. Dataset names are unique.
///
/// - `Display` renders an aligned text table, every cell with exactly
///   [`MetricsReport::precision`] decimals.
/// - `Serialize` writes a map of `dataset -> { metric label -> score }`.
///
/// # Example
/// ```rust
/// # use scorecard::{Datasets, Metric, MetricsReport};
/// let datasets = Datasets::new()
///     .with("train", [1.0, 2.0, 4.0], [1.0, 2.0, 5.0])
///     .with("test", [2.0, 3.0], [2.0, 3.5]);
///
/// let report = MetricsReport::from_datasets(&datasets).unwrap();
/// assert_eq!(report.datasets(), ["train", "test"]);
/// assert_eq!(report.get(Metric::MeanAbsolutePercentageError, "train"), Some(8.3333));
///
/// println!("{report}");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsReport<T: Value> {
    metrics: Vec<Metric>,
    datasets: Vec<String>,
    scores: DMatrix<T>,
    precision: usize,
}

impl<T: Value> MetricsReport<T> {
    /// Builds a report with every metric at the default precision.
    ///
    /// Shorthand for `ReportBuilder::new().build(datasets)`.
    ///
    /// # Errors
    /// Returns the error for the first dataset that cannot be scored. See [`Observations::new`].
    pub fn from_datasets(datasets: &Datasets<T>) -> Result<Self> {
        ReportBuilder::new().build(datasets)
    }

    /// The row labels
    #[must_use]
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// The column labels
    #[must_use]
    pub fn datasets(&self) -> &[String] {
        &self.datasets
    }

    /// Number of decimal places scores were rounded to
    #[must_use]
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// `(rows, columns)`, i.e. `(metrics, datasets)`
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.scores.shape()
    }

    /// True if the report has no datasets
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// The raw score matrix, metrics by datasets
    #[must_use]
    pub fn scores(&self) -> &DMatrix<T> {
        &self.scores
    }

    fn metric_index(&self, metric: Metric) -> Option<usize> {
        self.metrics.iter().position(|m| *m == metric)
    }

    fn dataset_index(&self, dataset: &str) -> Option<usize> {
        self.datasets.iter().position(|d| d == dataset)
    }

    /// Returns a single score
    #[must_use]
    pub fn get(&self, metric: Metric, dataset: &str) -> Option<T> {
        let row = self.metric_index(metric)?;
        let column = self.dataset_index(dataset)?;
        Some(self.scores[(row, column)])
    }

    /// Returns the scores of one metric across every dataset, in column order
    #[must_use]
    pub fn row(&self, metric: Metric) -> Option<Vec<(&str, T)>> {
        let row = self.metric_index(metric)?;
        Some(
            self.datasets
                .iter()
                .zip(self.scores.row(row).iter())
                .map(|(dataset, score)| (dataset.as_str(), *score))
                .collect(),
        )
    }

    /// Returns every score for one dataset
    #[must_use]
    pub fn column(&self, dataset: &str) -> Option<MetricRow<T>> {
        let column = self.dataset_index(dataset)?;
        Some(self.column_at(column))
    }

    /// Iterates the datasets' scores, in column order
    pub fn columns(&self) -> impl Iterator<Item = MetricRow<T>> + '_ {
        (0..self.datasets.len()).map(|column| self.column_at(column))
    }

    fn column_at(&self, column: usize) -> MetricRow<T> {
        MetricRow {
            dataset: self.datasets[column].clone(),
            scores: self
                .metrics
                .iter()
                .copied()
                .zip(self.scores.column(column).iter().copied())
                .collect(),
        }
    }

    /// Renders the report as a [`Table`]
    #[must_use]
    pub fn to_table(&self) -> Table {
        let header = std::iter::once(String::new()).chain(self.datasets.iter().cloned());
        let mut table = Table::new(header);
        for (metric, scores) in self.metrics.iter().zip(self.scores.row_iter()) {
            let cells = scores
                .iter()
                .map(|&score| display::score(score, self.precision))
                .collect::<Vec<_>>();
            table.push_row(std::iter::once(metric.label().to_string()).chain(cells));
        }
        table
    }
}

impl<T: Value> std::fmt::Display for MetricsReport<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_table())
    }
}

/// One dataset's scores, serialized as `{ metric label -> score }`
struct ColumnScores<'r, T: Value> {
    report: &'r MetricsReport<T>,
    column: usize,
}

impl<T: Value + serde::Serialize> serde::Serialize for ColumnScores<'_, T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let metrics = &self.report.metrics;
        let mut map = serializer.serialize_map(Some(metrics.len()))?;
        for (metric, score) in metrics.iter().zip(self.report.scores.column(self.column).iter()) {
            map.serialize_entry(metric.label(), score)?;
        }
        map.end()
    }
}

impl<T: Value + serde::Serialize> serde::Serialize for MetricsReport<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.datasets.len()))?;
        for (column, dataset) in self.datasets.iter().enumerate() {
            map.serialize_entry(
                dataset,
                &ColumnScores {
                    report: self,
                    column,
                },
            )?;
        }
        map.end()
    }
}
