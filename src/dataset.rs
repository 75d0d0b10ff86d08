use crate::{
    error::{Error, Result},
    value::Value,
};

/// A pair of observed and predicted values, checked to be scoreable.
///
/// Holding an `Observations` guarantees:
/// - `y_true` and `y_pred` have the same length
/// - there is at least one pair
/// - every input value is finite
///
/// Zeros in `y_true` are allowed, even though they make the percentage error
/// non-finite. See [`crate::statistics::mean_absolute_percentage_error`].
///
/// # Example
/// ```rust
/// # use scorecard::{Observations, Metric};
/// let y_true = [1.0_f64, 2.0, 4.0];
/// let y_pred = [1.0_f64, 2.0, 5.0];
/// let observations = Observations::new(&y_true, &y_pred).unwrap();
///
/// let mse = Metric::MeanSquaredError.evaluate(&observations);
/// assert!((mse - 1.0 / 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observations<'a, T: Value> {
    y_true: &'a [T],
    y_pred: &'a [T],
}
impl<'a, T: Value> Observations<'a, T> {
    /// Checks a pair of sequences and wraps them for scoring.
    ///
    /// # Errors
    /// - [`Error::LengthMismatch`] if the sequences differ in length
    /// - [`Error::NoData`] if they are empty
    /// - [`Error::NonFinite`] if any value is `NaN` or infinite
    ///
    /// The returned errors name no dataset; see [`Error::in_dataset`].
    pub fn new(y_true: &'a [T], y_pred: &'a [T]) -> Result<Self> {
        if y_true.len() != y_pred.len() {
            return Err(Error::LengthMismatch {
                dataset: String::new(),
                y_true: y_true.len(),
                y_pred: y_pred.len(),
            });
        }

        if y_true.is_empty() {
            return Err(Error::NoData {
                dataset: String::new(),
            });
        }

        let non_finite = y_true.iter().zip(y_pred).position(|(t, p)| {
            !nalgebra::ComplexField::is_finite(t) || !nalgebra::ComplexField::is_finite(p)
        });
        if let Some(index) = non_finite {
            return Err(Error::NonFinite {
                dataset: String::new(),
                index,
            });
        }

        Ok(Self { y_true, y_pred })
    }

    /// The observed values
    #[must_use]
    pub fn y_true(&self) -> &'a [T] {
        self.y_true
    }

    /// The predicted values
    #[must_use]
    pub fn y_pred(&self) -> &'a [T] {
        self.y_pred
    }

    /// Number of observation pairs
    #[must_use]
    pub fn len(&self) -> usize {
        self.y_true.len()
    }

    /// Always false; an `Observations` cannot be empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.y_true.is_empty()
    }

    /// Iterator over the observed values
    pub fn y_true_iter(&self) -> impl Iterator<Item = T> + 'a {
        self.y_true.iter().copied()
    }

    /// Iterator over the predicted values
    pub fn y_pred_iter(&self) -> impl Iterator<Item = T> + 'a {
        self.y_pred.iter().copied()
    }

    /// Iterator over the residuals, `y_true - y_pred`
    pub fn residuals(&self) -> impl Iterator<Item = T> + 'a {
        self.y_true
            .iter()
            .zip(self.y_pred)
            .map(|(&t, &p)| t - p)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Entry<T> {
    name: String,
    y_true: Vec<T>,
    y_pred: Vec<T>,
}

/// An ordered collection of named datasets, each a pair of observed and predicted values.
///
/// Iteration order is insertion order, and becomes the column order of a
/// [`crate::MetricsReport`].
///
/// Names are unique. Inserting under an existing name replaces that dataset's values
/// but keeps its original position.
///
/// Values are not checked on insertion; that happens when a report is built.
///
/// # Example
/// ```rust
/// # use scorecard::Datasets;
/// let mut datasets = Datasets::new();
/// datasets.insert("train", vec![1.0, 2.0, 3.0], vec![1.1, 1.9, 3.2]);
/// datasets.insert("test", vec![4.0, 5.0], vec![4.4, 4.5]);
///
/// assert_eq!(datasets.names().collect::<Vec<_>>(), ["train", "test"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Datasets<T: Value> {
    entries: Vec<Entry<T>>,
}
impl<T: Value> Default for Datasets<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}
impl<T: Value> Datasets<T> {
    /// Creates an empty collection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a dataset, and returns `self` for chaining
    ///
    /// # Example
    /// ```rust
    /// # use scorecard::Datasets;
    /// let datasets = Datasets::new()
    ///     .with("train", [1.0, 2.0], [1.0, 2.5])
    ///     .with("test", [3.0], [2.0]);
    /// assert_eq!(datasets.len(), 2);
    /// ```
    #[must_use]
    pub fn with(
        mut self,
        name: impl Into<String>,
        y_true: impl Into<Vec<T>>,
        y_pred: impl Into<Vec<T>>,
    ) -> Self {
        self.insert(name, y_true, y_pred);
        self
    }

    /// Adds a dataset.
    ///
    /// If the name is already present, its values are replaced in place and the
    /// previous `(y_true, y_pred)` are returned.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        y_true: impl Into<Vec<T>>,
        y_pred: impl Into<Vec<T>>,
    ) -> Option<(Vec<T>, Vec<T>)> {
        let name = name.into();
        let (y_true, y_pred) = (y_true.into(), y_pred.into());

        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => {
                let y_true = std::mem::replace(&mut entry.y_true, y_true);
                let y_pred = std::mem::replace(&mut entry.y_pred, y_pred);
                Some((y_true, y_pred))
            }
            None => {
                self.entries.push(Entry {
                    name,
                    y_true,
                    y_pred,
                });
                None
            }
        }
    }

    /// Returns the `(y_true, y_pred)` pair stored under a name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<(&[T], &[T])> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| (entry.y_true.as_slice(), entry.y_pred.as_slice()))
    }

    /// Number of datasets
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no datasets
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dataset names, in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Iterates `(name, y_true, y_pred)` in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T], &[T])> {
        self.entries.iter().map(|entry| {
            (
                entry.name.as_str(),
                entry.y_true.as_slice(),
                entry.y_pred.as_slice(),
            )
        })
    }
}

impl<T: Value, S: Into<String>> Extend<(S, (Vec<T>, Vec<T>))> for Datasets<T> {
    fn extend<I: IntoIterator<Item = (S, (Vec<T>, Vec<T>))>>(&mut self, iter: I) {
        for (name, (y_true, y_pred)) in iter {
            self.insert(name, y_true, y_pred);
        }
    }
}

impl<T: Value, S: Into<String>> FromIterator<(S, (Vec<T>, Vec<T>))> for Datasets<T> {
    fn from_iter<I: IntoIterator<Item = (S, (Vec<T>, Vec<T>))>>(iter: I) -> Self {
        let mut datasets = Self::new();
        datasets.extend(iter);
        datasets
    }
}
