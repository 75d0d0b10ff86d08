//! # Scorecard
//! ## Regression metrics, one table
//!
//! Scoring a regression model means computing the same handful of numbers for the training set,
//! the test set, and whatever else you held out; then squinting at them side by side.
//!
//! This library does that in one call:
//! - Computes eight standard regression-quality metrics for any number of named datasets
//! - Rounds every score to a fixed number of decimals (4 by default)
//! - Lays the scores out as a table: one row per metric, one column per dataset
//! - Prints it, serializes it, or hands you the raw matrix
//!
//! ```rust
//! # use scorecard::{Datasets, Metric, MetricsReport};
//! let datasets = Datasets::new()
//!     .with("train", [1.0, 2.0, 4.0], [1.0, 2.0, 5.0])
//!     .with("test", [3.0, -0.5, 2.0, 7.0], [2.5, 0.0, 2.0, 8.0]);
//!
//! let report = MetricsReport::from_datasets(&datasets).expect("Failed to score datasets");
//! assert_eq!(report.get(Metric::RSquared, "test"), Some(0.9486));
//!
//! println!("{report}");
//! ```
//!
//! # Core Concepts
//! - [`Datasets`] is an ordered collection of named `(y_true, y_pred)` pairs.
//!     - Insertion order becomes the column order of the report.
//! - [`Observations`] is a single pair, checked to be scoreable:
//!     - Same length, at least one value, and no `NaN` or infinite inputs.
//! - A [`Metric`] is one row of the report. [`Metric::ALL`] lists them in row order:
//!     - `R2`, `Explained variance`, `Max error`, `Mean absolute error`, `Median absolute error`,
//!       `Mean absolute percentage error`, `Mean squared error`, `Root mean squared error`
//! - [`ReportBuilder`] chooses the metrics and precision, then builds a [`MetricsReport`].
//!
//! Metrics follow the conventions of scikit-learn's `sklearn.metrics`:
//! variances are population variances, and a constant `y_true` scores `1.0` on `R2` only for a perfect prediction.
//!
//! A zero in `y_true` makes the percentage error infinite. That score is reported as-is rather than treated as an error.
//!
//! # Features
//! - `parallel`: Scores datasets concurrently with `rayon` for large inputs
//!
//! # Testing utilities
//!
//! This crate includes a few assertion macros for floating-point scores. See [`test`].
//!
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)] // I don't care about this one
#![allow(clippy::similar_names)] //       Clippy does not get to decide what names are similar
#![cfg_attr(docsrs, feature(doc_cfg))]


pub mod display;
pub mod error;
pub mod statistics;
pub mod value;

mod dataset;
mod metric;
mod report;

pub use dataset::{Datasets, Observations};
pub use error::{Error, Result};
pub use metric::Metric;
pub use report::{MetricRow, MetricsReport, ReportBuilder};

pub use nalgebra;
