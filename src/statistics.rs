//! Functions for evaluating how well predictions match observed values
//!
//! Every function takes the observed (`y`) and predicted (`y_fit`) values as iterators and
//! returns a single score. No validation is done here: sequences are zipped, so the shorter
//! one wins. Use [`crate::Observations`] to check inputs before scoring.
//!
//! # Goodness-of-fit
//! - [`r_squared`]: Proportion of variance explained by the predictions. Higher is better (at most 1).
//! - [`explained_variance`]: Like R², but ignores a constant bias in the predictions. Higher is better.
//!
//! # Error Metrics
//! - [`max_error`]: Largest absolute residual. Lower is better.
//! - [`mean_absolute_error`]: Average absolute difference between observed and predicted values. Lower is better.
//! - [`median_absolute_error`]: Median absolute difference. Robust to outliers. Lower is better.
//! - [`mean_absolute_percentage_error`]: Average absolute residual relative to the observed value, in percent. Lower is better.
//! - [`mean_squared_error`]: Average squared difference between observed and predicted values. Lower is better.
//! - [`root_mean_squared_error`]: Square root of MSE, giving error in same units as observed values. Lower is better.
//!
//! # Descriptive Statistics
//! - [`mean`]: Arithmetic mean of a dataset.
//! - [`median`]: Middle value of a dataset.
//!
//! # Examples
//!
//! ```rust
//! use scorecard::statistics::{r_squared, mean_absolute_percentage_error};
//!
//! let y = vec![1.0_f64, 2.0, 4.0];
//! let y_fit = vec![1.0_f64, 2.0, 5.0];
//!
//! let r2 = r_squared(y.iter().copied(), y_fit.iter().copied());
//! println!("R² = {r2}");
//!
//! let mape = mean_absolute_percentage_error(y.into_iter(), y_fit.into_iter());
//! assert!((mape - 25.0 / 3.0).abs() < 1e-12);
//! ```
use crate::value::Value;

/// Calculate the R-squared value (coefficient of determination) for a set of data.
///
/// R-squared tells you how well the predictions explain the data:
/// - `1` means the predictions explain all the variation.
/// - `0` means they do no better than always predicting the mean.
/// - Negative values mean they do worse than the mean.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// R-squared is calculated as:
/// ```math
/// R² = 1 - (SS_res / SS_tot)
/// where
///   SS_res = Σ (y_i - y_fit_i)²
///   SS_tot = Σ (y_i - y_mean)²
/// ```
/// - With fewer than 2 observations, R² is not well-defined and `NaN` is returned.
/// - If `SS_tot` is zero (constant `y`), the result is `1` for a perfect prediction and `0` otherwise.
/// </div>
///
/// # Parameters
/// - `y`: The actual (observed) values.
/// - `y_fit`: The predicted values.
///
/// # Returns
/// The proportion of variance explained by the predictions.
///
/// # Example
/// ```rust
/// # use scorecard::statistics::r_squared;
/// let y = vec![1.0, 2.0, 3.0];
/// let y_fit = vec![1.1, 1.9, 3.05];
/// let r2 = r_squared(y.into_iter(), y_fit.into_iter());
/// ```
pub fn r_squared<T: Value>(y: impl Iterator<Item = T>, y_fit: impl Iterator<Item = T>) -> T {
    let y: Vec<T> = y.collect();
    let y_fit: Vec<T> = y_fit.collect();
    if y.len().min(y_fit.len()) < 2 {
        return T::nan();
    }

    let y_mean = mean(y.iter().copied());

    //
    // Sum of (y - y_fit)^2
    // Sum of (y - y_mean)^2
    let mut ss_total = T::zero();
    let mut ss_residual = T::zero();
    for (y, y_fit) in y.into_iter().zip(y_fit) {
        ss_total += Value::powi(y - y_mean, 2);
        ss_residual += Value::powi(y - y_fit, 2);
    }

    unexplained_ratio(ss_residual, ss_total)
}

/// Computes the explained variance score between two sets of values.
///
/// Similar to [`r_squared`], but the residuals are centred first, so a prediction that is off
/// by a constant amount everywhere still scores `1`.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// EV = 1 - Var(y - y_fit) / Var(y)
/// where
///   Var = population variance (divides by N)
/// ```
/// If `Var(y)` is zero, the result is `1` when `Var(y - y_fit)` is also zero, and `0` otherwise.
/// </div>
///
/// # Example
/// ```rust
/// # use scorecard::statistics::explained_variance;
/// // Biased by +1 everywhere
/// let y = vec![1.0, 2.0, 3.0];
/// let y_fit = vec![2.0, 3.0, 4.0];
/// assert_eq!(explained_variance(y.into_iter(), y_fit.into_iter()), 1.0);
/// ```
pub fn explained_variance<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> T {
    let (y, residuals): (Vec<T>, Vec<T>) = y.zip(y_fit).map(|(y, y_fit)| (y, y - y_fit)).unzip();

    let residual_variance = variance(&residuals);
    let y_variance = variance(&y);
    unexplained_ratio(residual_variance, y_variance)
}

/// `1 - numerator / denominator`, with a zero denominator mapped to `1` (zero numerator) or `0`
fn unexplained_ratio<T: Value>(numerator: T, denominator: T) -> T {
    if denominator == T::zero() {
        if numerator == T::zero() {
            T::one()
        } else {
            T::zero()
        }
    } else {
        T::one() - numerator / denominator
    }
}

/// Population variance
fn variance<T: Value>(data: &[T]) -> T {
    let average = mean(data.iter().copied());
    mean(data.iter().map(|v| Value::powi(*v - average, 2)))
}

/// Computes the largest absolute residual between two sets of values.
///
/// Captures the worst-case error of the predictions.
///
/// ```math
/// MaxError = max( |y_i - y_fit_i| )
/// ```
///
/// Returns zero if there is no data.
///
/// # Example
/// ```rust
/// # use scorecard::statistics::max_error;
/// let y = vec![3.0, 2.0, 7.0, 1.0];
/// let y_fit = vec![9.0, 2.0, 7.0, 1.0];
/// assert_eq!(max_error(y.into_iter(), y_fit.into_iter()), 6.0);
/// ```
pub fn max_error<T: Value>(y: impl Iterator<Item = T>, y_fit: impl Iterator<Item = T>) -> T {
    y.zip(y_fit).fold(T::zero(), |worst, (y, y_fit)| {
        nalgebra::RealField::max(worst, Value::abs_sub(y, y_fit))
    })
}

/// Computes the mean absolute error (MAE) between two sets of values.
///
/// MAE measures the average absolute difference between observed (`y`)
/// and predicted (`y_fit`) values. Lower values indicate a closer fit.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// MAE = (Σ |y_i - y_fit_i|) / N
/// where
///   y_i = observed values, y_fit_i = predicted values,
///   N = number of observations
/// ```
/// </div>
///
/// # Type Parameters
/// - `T`: A numeric type implementing the `Value` trait.
///
/// # Parameters
/// - `y`: Iterator over observed values.
/// - `y_fit`: Iterator over predicted values.
///
/// # Returns
/// The mean absolute error as a `T`.
///
/// # Example
/// ```rust
/// # use scorecard::statistics::mean_absolute_error;
/// let y = vec![1.0, 2.0, 3.0];
/// let y_fit = vec![1.1, 1.9, 3.05];
/// let mae = mean_absolute_error(y.into_iter(), y_fit.into_iter());
/// ```
pub fn mean_absolute_error<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> T {
    mean(y.zip(y_fit).map(|(y, y_fit)| Value::abs_sub(y, y_fit)))
}

/// Computes the median absolute error between two sets of values.
/// - Robust to outliers: a handful of very bad predictions do not move it.
/// - For an even number of observations, the two middle residuals are averaged.
///
/// ```math
/// MedAE = median( |y_i - y_fit_i| )
/// ```
///
/// # Example
/// ```rust
/// # use scorecard::statistics::median_absolute_error;
/// let y = vec![3.0, -0.5, 2.0, 7.0];
/// let y_fit = vec![2.5, 0.0, 2.0, 8.0];
/// assert_eq!(median_absolute_error(y.into_iter(), y_fit.into_iter()), 0.5);
/// ```
pub fn median_absolute_error<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> T {
    median(y.zip(y_fit).map(|(y, y_fit)| Value::abs_sub(y, y_fit)))
}

/// Computes the mean absolute percentage error (MAPE) between two sets of values.
///
/// Each residual is divided by its observed value, so errors are measured relative
/// to the size of what was being predicted. The result is a percentage.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// MAPE = (Σ |(y_i - y_fit_i) / y_i|) / N * 100
/// where
///   y_i = observed values, y_fit_i = predicted values,
///   N = number of observations
/// ```
/// No element of `y` may be zero. This is not checked: a zero produces an
/// infinite (or, for `0 / 0`, `NaN`) term, and the result is non-finite.
/// </div>
///
/// # Example
/// ```rust
/// # use scorecard::statistics::mean_absolute_percentage_error;
/// let y = vec![1.0_f64, 2.0, 4.0];
/// let y_fit = vec![1.0_f64, 2.0, 5.0];
/// let mape = mean_absolute_percentage_error(y.into_iter(), y_fit.into_iter());
/// assert!((mape - 8.333_333).abs() < 1e-6);
///
/// let mape = mean_absolute_percentage_error([0.0_f64, 1.0].into_iter(), [1.0, 1.0].into_iter());
/// assert!(mape.is_infinite());
/// ```
pub fn mean_absolute_percentage_error<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> T {
    let hundred = T::from_positive_int(100);
    mean(y.zip(y_fit).map(|(y, y_fit)| Value::abs((y - y_fit) / y))) * hundred
}

/// Computes the root mean squared error (RMSE) between two sets of values.
///
/// RMSE is the square root of the mean squared error, giving the error
/// in the same units as the observed values. Lower values indicate a better fit.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// RMSE = √( (Σ (y_i - y_fit_i)²) / N )
/// where
///   y_i = observed values, y_fit_i = predicted values,
///   N = number of observations
/// ```
/// </div>
///
/// # Example
/// ```
/// # use scorecard::statistics::root_mean_squared_error;
/// let y = vec![1.0, 2.0, 3.0];
/// let y_fit = vec![1.1, 1.9, 3.05];
/// let rmse = root_mean_squared_error(y.into_iter(), y_fit.into_iter());
/// ```
pub fn root_mean_squared_error<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> T {
    mean_squared_error(y, y_fit).sqrt()
}

/// Computes the mean squared error (MSE) between two sets of values.
///
/// MSE is a measure of the average squared difference between the
/// observed (`y`) and predicted (`y_fit`) values. Squaring punishes
/// large residuals more than [`mean_absolute_error`] does.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// MSE = (Σ (y_i - y_fit_i)²) / N
/// where
///   y_i = observed values, y_fit_i = predicted values,
///   N = number of observations
/// ```
/// </div>
///
/// # Example
/// ```
/// # use scorecard::statistics::mean_squared_error;
/// let y = vec![1.0, 2.0, 3.0];
/// let y_fit = vec![1.1, 1.9, 3.05];
/// let mse = mean_squared_error(y.into_iter(), y_fit.into_iter());
/// ```
pub fn mean_squared_error<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> T {
    mean(y.zip(y_fit).map(|(y, y_fit)| Value::powi(y - y_fit, 2)))
}

/// Computes the arithmetic mean of a sequence of values.
///
/// ```math
/// Mean = (Σ x_i) / N
/// ```
///
/// Returns `NaN` if the iterator yields no elements.
///
/// # Examples
/// ```rust
/// let values = vec![1.0, 2.0, 3.0];
/// let m = scorecard::statistics::mean(values.into_iter());
/// assert_eq!(m, 2.0);
/// ```
pub fn mean<T: Value>(data: impl Iterator<Item = T>) -> T {
    let mut sum = T::zero();
    let mut count = T::zero();
    for value in data {
        sum += value;
        count += T::one();
    }
    sum / count
}

/// Computes the median of a sequence of values.
/// - For an even count, the two middle values are averaged.
/// - Returns `NaN` if the iterator yields no elements.
///
/// # Examples
/// ```rust
/// let values = vec![4.0, 1.0, 3.0, 2.0];
/// assert_eq!(scorecard::statistics::median(values.into_iter()), 2.5);
/// ```
pub fn median<T: Value>(data: impl Iterator<Item = T>) -> T {
    let mut values: Vec<T> = data.collect();
    if values.is_empty() {
        return T::nan();
    }

    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let midpoint = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[midpoint - 1] + values[midpoint]) / T::two()
    } else {
        values[midpoint]
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::assert_close;

    #[test]
    fn r_squared_perfect_fit() {
        let y = vec![1.0, 2.0, 3.0];
        let y_fit = vec![1.0, 2.0, 3.0];
        let r2 = r_squared::<f64>(y.into_iter(), y_fit.into_iter());
        assert_eq!(r2, 1.0);
    }

    #[test]
    fn r_squared_bad_fit() {
        // y = [1, 2, 3], y_fit = [2, 2, 2]
        // mean(y) = 2
        // SST = (1-2)² + (2-2)² + (3-2)² = 2
        // SSE = same, 2
        // R² = 1 - SSE/SST = 0
        let y = vec![1.0, 2.0, 3.0];
        let y_fit = vec![2.0, 2.0, 2.0];
        let r2 = r_squared::<f64>(y.into_iter(), y_fit.into_iter());
        assert_eq!(r2, 0.0);
    }

    #[test]
    fn r_squared_negative_case() {
        // y = [1, 2, 3], y_fit = [10, 10, 10]
        // mean(y) = 2, SST = 2
        // SSE = 9² + 8² + 7² = 194
        // R² = 1 - 194/2 = -96
        let y = vec![1.0, 2.0, 3.0];
        let y_fit = vec![10.0, 10.0, 10.0];
        let r2 = r_squared::<f64>(y.into_iter(), y_fit.into_iter());
        assert_eq!(r2, -96.0);
    }

    #[test]
    fn r_squared_constant_y() {
        let y = vec![2.0, 2.0, 2.0];
        let r2 = r_squared::<f64>(y.clone().into_iter(), y.clone().into_iter());
        assert_eq!(r2, 1.0);

        let y_fit = vec![2.0, 2.0, 3.0];
        let r2 = r_squared::<f64>(y.into_iter(), y_fit.into_iter());
        assert_eq!(r2, 0.0);
    }

    #[test]
    fn r_squared_single_sample_is_nan() {
        let r2 = r_squared::<f64>([1.0].into_iter(), [1.0].into_iter());
        assert!(r2.is_nan());
    }

    #[test]
    fn explained_variance_ignores_bias() {
        // Residuals are all -1, so their variance is zero
        let y = vec![1.0, 2.0, 3.0];
        let y_fit = vec![2.0, 3.0, 4.0];
        let ev = explained_variance::<f64>(y.clone().into_iter(), y_fit.clone().into_iter());
        let r2 = r_squared::<f64>(y.into_iter(), y_fit.into_iter());
        assert_eq!(ev, 1.0);
        assert_eq!(r2, -0.5);
    }

    #[test]
    fn explained_variance_simple_case() {
        // residuals = [0.5, -0.5, 0, -1], mean = -0.25
        // Var(res) = (0.5625 + 0.0625 + 0.0625 + 0.5625) / 4 = 0.3125
        // Var(y) = 7.296875
        let y = vec![3.0, -0.5, 2.0, 7.0];
        let y_fit = vec![2.5, 0.0, 2.0, 8.0];
        let ev = explained_variance::<f64>(y.into_iter(), y_fit.into_iter());
        assert_close!(ev, 1.0 - 0.3125 / 7.296_875);
    }

    #[test]
    fn explained_variance_constant_y() {
        let y = vec![5.0, 5.0];
        assert_eq!(
            explained_variance::<f64>(y.clone().into_iter(), [5.0, 5.0].into_iter()),
            1.0
        );
        assert_eq!(
            explained_variance::<f64>(y.into_iter(), [4.0, 6.0].into_iter()),
            0.0
        );
    }

    #[test]
    fn max_error_picks_largest_residual() {
        let y = vec![1.0, 2.0, 3.0];
        let y_fit = vec![2.0, 2.0, 5.0];
        assert_eq!(max_error::<f64>(y.into_iter(), y_fit.into_iter()), 2.0);

        let y = vec![-4.0, 0.0];
        let y_fit = vec![1.0, 0.5];
        assert_eq!(max_error::<f64>(y.into_iter(), y_fit.into_iter()), 5.0);
    }

    #[test]
    fn mae_zero_error() {
        let y = vec![1.0, 2.0, 3.0];
        let y_fit = vec![1.0, 2.0, 3.0];
        let mae = mean_absolute_error::<f64>(y.into_iter(), y_fit.into_iter());
        assert_eq!(mae, 0.0);
    }

    #[test]
    fn mae_simple_case() {
        // y = [1, 2, 3], y_fit = [2, 2, 2]
        // abs diffs = [1, 0, 1], sum = 2, mean = 2/3
        let y = vec![1.0, 2.0, 3.0];
        let y_fit = vec![2.0, 2.0, 2.0];
        let mae = mean_absolute_error::<f64>(y.into_iter(), y_fit.into_iter());
        assert!((mae - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn mae_with_negatives() {
        // y = [-1, -2], y_fit = [1, 2]
        // diffs = [2, 4], mean = 3
        let y = vec![-1.0, -2.0];
        let y_fit = vec![1.0, 2.0];
        let mae = mean_absolute_error::<f64>(y.into_iter(), y_fit.into_iter());
        assert_eq!(mae, 3.0);
    }

    #[test]
    fn mae_empty_input() {
        let y: Vec<f64> = vec![];
        let y_fit: Vec<f64> = vec![];
        let mae = mean_absolute_error::<f64>(y.into_iter(), y_fit.into_iter());
        assert!(mae.is_nan());
    }

    #[test]
    fn median_absolute_error_odd_and_even() {
        // abs = [1, 0, 2] -> 1
        let y = vec![1.0, 2.0, 3.0];
        let y_fit = vec![2.0, 2.0, 5.0];
        assert_eq!(median_absolute_error::<f64>(y.into_iter(), y_fit.into_iter()), 1.0);

        // abs = [0, 1, 3, 0] -> sorted [0, 0, 1, 3] -> 0.5
        let y = vec![1.0, 2.0, 3.0, 4.0];
        let y_fit = vec![1.0, 3.0, 6.0, 4.0];
        assert_eq!(median_absolute_error::<f64>(y.into_iter(), y_fit.into_iter()), 0.5);
    }

    #[test]
    fn mape_identical_is_zero() {
        let y = vec![1.5, -2.0, 40.0, 0.25];
        let mape = mean_absolute_percentage_error::<f64>(y.clone().into_iter(), y.into_iter());
        assert_eq!(mape, 0.0);
    }

    #[test]
    fn mape_simple_case() {
        // |0/1|, |0/2|, |-1/4| -> (0 + 0 + 0.25) / 3 * 100
        let y = vec![1.0, 2.0, 4.0];
        let y_fit = vec![1.0, 2.0, 5.0];
        let mape = mean_absolute_percentage_error::<f64>(y.into_iter(), y_fit.into_iter());
        assert!((mape - 25.0 / 3.0).abs() < 1e-12);
        assert_eq!(Value::round_to(mape, 4), 8.3333);
    }

    #[test]
    fn mape_negative_observations() {
        // |(-2 - -1) / -2| = 0.5
        let mape = mean_absolute_percentage_error::<f64>([-2.0].into_iter(), [-1.0].into_iter());
        assert_eq!(mape, 50.0);
    }

    #[test]
    fn mape_zero_observation_is_not_finite() {
        let y = vec![0.0, 1.0];
        let mape = mean_absolute_percentage_error::<f64>(y.clone().into_iter(), [1.0, 1.0].into_iter());
        assert_eq!(mape, f64::INFINITY);

        // 0 / 0
        let mape = mean_absolute_percentage_error::<f64>(y.into_iter(), [0.0, 1.0].into_iter());
        assert!(mape.is_nan());
    }

    #[test]
    fn mse_zero_error() {
        let y = vec![1.0, 2.0, 3.0];
        let y_fit = vec![1.0, 2.0, 3.0];
        let mse = mean_squared_error::<f64>(y.into_iter(), y_fit.into_iter());
        assert_eq!(mse, 0.0);
    }

    #[test]
    fn mse_with_negatives() {
        // y = [-1, -2], y_fit = [1, 2]
        // diffs = [-2, -4], squared = [4, 16], mean = 10
        let y = vec![-1.0, -2.0];
        let y_fit = vec![1.0, 2.0];
        let mse = mean_squared_error::<f64>(y.into_iter(), y_fit.into_iter());
        assert_eq!(mse, 10.0);
    }

    #[test]
    fn mse_symmetric() {
        let y = vec![1.0, 2.0, 3.0];
        let y_fit = vec![2.0, 2.0, 2.0];
        let mse1 = mean_squared_error::<f64>(y.clone().into_iter(), y_fit.clone().into_iter());
        let mse2 = mean_squared_error::<f64>(y_fit.into_iter(), y.into_iter());
        assert_eq!(mse1, mse2);
    }

    #[test]
    fn rmse_is_root_of_mse() {
        let y = vec![-1.0, -2.0];
        let y_fit = vec![1.0, 2.0];
        let rmse = root_mean_squared_error::<f64>(y.into_iter(), y_fit.into_iter());
        assert_close!(rmse, 10.0_f64.sqrt());
    }

    #[test]
    fn median_and_mean() {
        assert_eq!(median::<f64>([3.0, 1.0, 2.0].into_iter()), 2.0);
        assert_eq!(median::<f64>([4.0, 1.0, 3.0, 2.0].into_iter()), 2.5);
        assert!(median::<f64>(std::iter::empty()).is_nan());
        assert_eq!(mean::<f64>([1.0, 2.0, 3.0, 6.0].into_iter()), 3.0);
    }
}
