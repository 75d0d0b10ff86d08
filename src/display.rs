//! Utilities for displaying scores and report tables
//!
//! # Helpers
//! - [`score`]: Formats a score with a fixed number of decimals, non-finite values as-is.
//! - [`Table`]: A plain-text table with a left-aligned label column and right-aligned value columns.
//!
//! [`crate::MetricsReport`] implements `Display` on top of these.
use std::fmt::Write;

use crate::value::Value;

/// Default number of decimals scores are rounded to
pub const DEFAULT_PRECISION: usize = 4;

/// Separator between table columns
const COLUMN_GAP: &str = "  ";

/// Format a score with exactly `precision` decimal places
///
/// `NaN` and infinities are written as `NaN`, `inf` and `-inf`.
///
/// # Example
/// ```rust
/// # use scorecard::display::score;
/// assert_eq!(score(8.3333, 4), "8.3333");
/// assert_eq!(score(2.0, 4), "2.0000");
/// assert_eq!(score(f64::INFINITY, 4), "inf");
/// ```
pub fn score<T: Value>(n: T, precision: usize) -> String {
    format!("{n:.precision$}")
}

/// A plain-text table.
///
/// The first column holds row labels and is left-aligned; every other column is
/// right-aligned to its widest cell. Rows shorter than the header are padded with
/// empty cells.
///
/// # Example
/// ```rust
/// # use scorecard::display::Table;
/// let mut table = Table::new(["", "train", "test"]);
/// table.push_row(["R2", "0.9000", "0.8000"]);
/// assert_eq!(table.to_string(), "     train    test\nR2  0.9000  0.8000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}
impl Table {
    /// Creates a table with the given header cells
    pub fn new<S: Into<String>>(header: impl IntoIterator<Item = S>) -> Self {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row of cells
    pub fn push_row<S: Into<String>>(&mut self, row: impl IntoIterator<Item = S>) {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    /// Number of rows, not counting the header
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if there are no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_widths(&self) -> Vec<usize> {
        let columns = self
            .rows
            .iter()
            .map(Vec::len)
            .fold(self.header.len(), usize::max);

        let mut widths = vec![0; columns];
        for row in std::iter::once(&self.header).chain(&self.rows) {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }

    fn write_row(f: &mut impl Write, row: &[String], widths: &[usize]) -> std::fmt::Result {
        for (i, &width) in widths.iter().enumerate() {
            let cell = row.get(i).map_or("", String::as_str);
            if i == 0 {
                write!(f, "{cell:<width$}")?;
            } else {
                write!(f, "{COLUMN_GAP}{cell:>width$}")?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let widths = self.column_widths();
        Self::write_row(f, &self.header, &widths)?;
        for row in &self.rows {
            writeln!(f)?;
            Self::write_row(f, row, &widths)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_has_fixed_decimals() {
        assert_eq!(score(0.5_f64, 4), "0.5000");
        assert_eq!(score(-1.23456_f64, 2), "-1.23");
        assert_eq!(score(f64::NAN, 4), "NaN");
        assert_eq!(score(f64::NEG_INFINITY, 4), "-inf");
        assert_eq!(score(1.5_f32, 1), "1.5");
    }

    #[test]
    fn table_aligns_columns() {
        let mut table = Table::new(["", "a", "long name"]);
        table.push_row(["Mean squared error", "1.0000", "2.0000"]);
        table.push_row(["R2", "-10.5000", "NaN"]);

        let expected = [
            "                           a  long name",
            "Mean squared error    1.0000     2.0000",
            "R2                  -10.5000        NaN",
        ]
        .join("\n");
        assert_eq!(table.to_string(), expected);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn table_pads_short_rows() {
        let mut table = Table::new(["x", "y"]);
        table.push_row(["1"]);
        assert_eq!(table.to_string(), "x  y\n1   ");
    }
}
