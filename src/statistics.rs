//! Functions for evaluating how well a polynomial fits a dataset
//!
//! # Model Fit / Regression Diagnostics
//! - [`r_squared`]: Proportion of variance explained by the model. Higher is better (0 to 1).
//! - [`residual_variance`]: Unbiased estimate of variance of errors after fitting.
//!
//! # Error Metrics
//! - [`mean_squared_error`]: Average squared difference between observed and predicted values. Lower is better.
//! - [`root_mean_squared_error`]: Square root of MSE, giving error in same units as observed values. Lower is better.
//!
//! # Descriptive Statistics
//! - [`mean`]: Arithmetic mean of a dataset.
//!
//! # Normalization
//! - [`DomainNormalizer`]: Affine map of x values onto a working range, and back for coefficients.
//!
//! # Examples
//!
//! ```rust
//! use powerfit::statistics::{mean_squared_error, r_squared};
//!
//! let y = vec![1.0, 2.0, 3.0];
//! let y_fit = vec![1.1, 1.9, 3.05];
//!
//! let r2 = r_squared(y.iter().copied(), y_fit.iter().copied());
//! assert!(r2 > 0.9);
//!
//! let mse = mean_squared_error(y.into_iter(), y_fit.into_iter());
//! assert!(mse < 0.01);
//! ```
use crate::value::Value;

/// Computes the residual variance of a model's predictions.
///
/// Residual variance is the unbiased estimate of the variance of the
/// errors (σ²) after fitting a model.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// σ² = Σ (y_i - y_fit_i)² / (n - k)
/// where
///   y_i = observed values, y_fit_i = predicted values,
///   n = number of observations, k = number of model parameters
/// ```
/// </div>
///
/// Returns zero when there are no degrees of freedom left (`n <= k`), which is the
/// case for an interpolating fit.
pub fn residual_variance<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
    k: T,
) -> T {
    let mut ss_residual = T::zero();
    let mut n = T::zero();
    for (y, y_fit) in y.zip(y_fit) {
        ss_residual += Value::powi(y - y_fit, 2);
        n += T::one();
    }

    if n <= k {
        return T::zero();
    }
    ss_residual / (n - k)
}

/// Calculate the R-squared value for a set of data.
///
/// R-squared is a number between 0 and 1 that tells you how well the model explains the data:
/// - `0` means the model explains none of the variation.
/// - `1` means the model explains all the variation.
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
/// </div>
///
/// When every observed value is the same, `SS_tot` is zero. The result is then `1` if the
/// model reproduces the data exactly and `0` otherwise, rather than a division by zero.
///
/// # Example
/// ```rust
/// # use powerfit::statistics::r_squared;
/// let y = vec![3.0, 3.0, 3.0];
/// assert_eq!(r_squared(y.iter().copied(), y.iter().copied()), 1.0);
/// ```
pub fn r_squared<T: Value>(y: impl Iterator<Item = T>, y_fit: impl Iterator<Item = T>) -> T {
    let y: Vec<T> = y.collect();
    let y_mean = mean(y.iter().copied());

    let mut ss_total = T::zero();
    let mut ss_residual = T::zero();
    for (y, y_fit) in y.into_iter().zip(y_fit) {
        ss_total += Value::powi(y - y_mean, 2);
        ss_residual += Value::powi(y - y_fit, 2);
    }

    if ss_total.is_zero() {
        return if ss_residual <= T::epsilon() {
            T::one()
        } else {
            T::zero()
        };
    }

    T::one() - (ss_residual / ss_total)
}

/// Computes the arithmetic mean of a sequence of values.
///
/// ```math
/// Mean = (Σ x_i) / N
/// ```
///
/// Returns zero if the iterator yields no elements.
///
/// # Examples
/// ```rust
/// let values = vec![1.0, 2.0, 3.0];
/// let m = powerfit::statistics::mean(values.into_iter());
/// assert_eq!(m, 2.0);
/// ```
pub fn mean<T: Value>(data: impl Iterator<Item = T>) -> T {
    let mut sum = T::zero();
    let mut count = T::zero();
    for value in data {
        sum += value;
        count += T::one();
    }

    if count.is_zero() {
        return T::zero();
    }
    sum / count
}

/// Computes the mean squared error (MSE) between two sets of values.
///
/// MSE is the average squared difference between the observed (`y`) and
/// predicted (`y_fit`) values. Lower values indicate a better fit.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// MSE = (Σ (y_i - y_fit_i)²) / N
/// ```
/// </div>
///
/// Returns zero for empty input.
///
/// # Example
/// ```rust
/// # use powerfit::statistics::mean_squared_error;
/// let y = vec![1.0, 2.0];
/// let y_fit = vec![2.0, 4.0];
/// assert_eq!(mean_squared_error(y.into_iter(), y_fit.into_iter()), 2.5);
/// ```
pub fn mean_squared_error<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> T {
    mean(y.zip(y_fit).map(|(y, y_fit)| Value::powi(y - y_fit, 2)))
}

/// Square root of [`mean_squared_error`], in the same units as `y`.
pub fn root_mean_squared_error<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> T {
    nalgebra::ComplexField::sqrt(mean_squared_error(y, y_fit))
}

/// Maps values from a source range onto a destination range.
///
/// The fitter uses it to move x onto `[-1, 1]` before building the normal equations,
/// then [`DomainNormalizer::denormalize_coefs`] maps the solved coefficients back.
///
/// A zero-width source range (every x equal) is shifted onto the middle of the
/// destination without scaling.
///
/// # Example
/// ```rust
/// # use powerfit::statistics::DomainNormalizer;
/// let normalizer = DomainNormalizer::new((2.0, 6.0), (-1.0, 1.0));
/// assert_eq!(normalizer.normalize(2.0), -1.0);
/// assert_eq!(normalizer.normalize(4.0), 0.0);
///
/// // y = x' in the normalized domain is y = 0.5x - 2 in the original one
/// assert_eq!(normalizer.denormalize_coefs(&[0.0, 1.0]), vec![-2.0, 0.5]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainNormalizer<T: Value> {
    src_range: (T, T),
    dst_range: (T, T),
}
impl<T: Value> DomainNormalizer<T> {
    /// Creates a new `DomainNormalizer` for the given source and destination ranges.
    pub fn new(src_range: (T, T), dst_range: (T, T)) -> Self {
        Self {
            src_range,
            dst_range,
        }
    }

    /// Creates a new `DomainNormalizer` from the range of the given data and a destination range.
    pub fn from_data(data: impl Iterator<Item = T>, dst_range: (T, T)) -> Self {
        let (min, max) = data.fold((T::infinity(), T::neg_infinity()), |(lo, hi), v| {
            (
                nalgebra::RealField::min(lo, v),
                nalgebra::RealField::max(hi, v),
            )
        });

        Self::new((min, max), dst_range)
    }

    /// `(alpha, beta)` such that `normalize(x) = alpha * x + beta`.
    fn affine(&self) -> (T, T) {
        let (src_min, src_max) = self.src_range;
        let (dst_min, dst_max) = self.dst_range;

        if src_max > src_min {
            let alpha = (dst_max - dst_min) / (src_max - src_min);
            (alpha, dst_min - alpha * src_min)
        } else {
            (T::one(), (dst_min + dst_max) / T::two() - src_min)
        }
    }

    /// Normalizes a value from the source range to the destination range.
    pub fn normalize(&self, x: T) -> T {
        let (alpha, beta) = self.affine();
        alpha * x + beta
    }

    /// Rewrites coefficients of a polynomial in the normalized variable as coefficients
    /// in the source variable.
    ///
    /// The coefficients are in ascending order (constant term first).
    ///
    /// <div class="warning">
    ///
    /// **Technical Details**
    ///
    /// ```math
    /// Σ_i c_i (αx + β)^i = Σ_j x^j Σ_{i≥j} c_i C(i, j) α^j β^(i-j)
    /// ```
    /// </div>
    #[must_use]
    pub fn denormalize_coefs(&self, coefs: &[T]) -> Vec<T> {
        let (alpha, beta) = self.affine();
        let powers = |base: T| -> Vec<T> {
            std::iter::successors(Some(T::one()), |&p| Some(p * base))
                .take(coefs.len())
                .collect()
        };
        let alpha_pows = powers(alpha);
        let beta_pows = powers(beta);

        let mut unnorm = vec![T::zero(); coefs.len()];
        let mut binom = vec![T::one()];
        for (i, &c) in coefs.iter().enumerate() {
            for j in 0..=i {
                unnorm[j] += c * binom[j] * alpha_pows[j] * beta_pows[i - j];
            }

            // Next row of Pascal's triangle
            binom.push(T::one());
            for j in (1..=i).rev() {
                let prev = binom[j - 1];
                binom[j] += prev;
            }
        }
        unnorm
    }
}
