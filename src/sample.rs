//! Sampling a polynomial over a fixed domain to produce a plottable curve.
//!
//! The chart draws the best-fit line by evaluating the fitted polynomial at evenly
//! spaced positions across the whole chart domain, not just the range of the data.
//!
//! ```rust
//! use powerfit::sample::{sample_curve, SamplingDomain};
//!
//! let curve = sample_curve(&[1.0, 0.0, 1.0], &SamplingDomain::default());
//! assert_eq!(curve.len(), 51);
//! assert_eq!(curve[0], (0.0, 1.0));
//! assert_eq!(curve[50], (10.0, 101.0));
//! ```
use crate::{
    error::{Error, Result},
    value::{SteppedValues, Value},
    Polynomial,
};

/// Evenly spaced x positions at which a curve is sampled.
///
/// Positions are `start + i * step` for as long as they stay within `end`; the end
/// itself is included when it lies on the grid.
///
/// Deserializes from `{ "start": 0.0, "end": 10.0, "step": 0.2 }`. Values read this way
/// are not validated; pass them through [`SamplingDomain::new`] or [`SamplingDomain::validate`].
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SamplingDomain<T: Value = f64> {
    /// First sample position
    pub start: T,

    /// Last permitted sample position
    pub end: T,

    /// Distance between samples
    pub step: T,
}
impl<T: Value> SamplingDomain<T> {
    /// Creates a validated sampling domain.
    ///
    /// # Errors
    /// Returns [`Error::InvalidDomain`] if any bound is not finite, `step <= 0`, or `start > end`.
    pub fn new(start: T, end: T, step: T) -> Result<Self> {
        let domain = Self { start, end, step };
        domain.validate()?;
        Ok(domain)
    }

    /// Checks that the domain produces at least one sample.
    ///
    /// # Errors
    /// Returns [`Error::InvalidDomain`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        use num_traits::float::FloatCore;

        if !FloatCore::is_finite(self.start) || !FloatCore::is_finite(self.end) {
            return Err(Error::InvalidDomain(format!(
                "bounds must be finite, got {}..={}",
                self.start, self.end
            )));
        }

        if !FloatCore::is_finite(self.step) || self.step <= T::zero() {
            return Err(Error::InvalidDomain(format!(
                "step must be positive, got {}",
                self.step
            )));
        }

        if self.start > self.end {
            return Err(Error::InvalidDomain(format!(
                "start {} is past end {}",
                self.start, self.end
            )));
        }

        Ok(())
    }

    /// The sample positions, in ascending order.
    pub fn positions(&self) -> SteppedValues<T> {
        SteppedValues::new(self.start..=self.end, self.step)
    }

    /// Number of samples the domain produces.
    pub fn len(&self) -> usize {
        self.positions().len()
    }

    /// True if the domain produces no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Value> Default for SamplingDomain<T> {
    /// The chart domain: `[0, 10]` in steps of `0.2`.
    fn default() -> Self {
        Self {
            start: T::zero(),
            end: T::try_cast(10.0).unwrap_or(T::one()),
            step: T::try_cast(0.2).unwrap_or(T::one()),
        }
    }
}

/// Evaluates a monomial coefficient vector at every position in `domain`.
///
/// `coefficients[i]` multiplies `x^i`. Output is in ascending x order; an empty
/// coefficient vector samples the zero function.
pub fn sample_curve<T: Value>(coefficients: &[T], domain: &SamplingDomain<T>) -> Vec<(T, T)> {
    Polynomial::borrowed(coefficients).solve(domain.positions())
}

#[cfg(test)]
mod tests {
    use crate::{assert_close, function};

    use super::*;

    #[test]
    fn test_default_domain() {
        let domain = SamplingDomain::<f64>::default();
        assert_eq!(domain.len(), 51);

        let xs: Vec<_> = domain.positions().collect();
        assert_eq!(xs.first(), Some(&0.0));
        assert_eq!(xs.last(), Some(&10.0));
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
        assert_close!(xs[1], 0.2);
    }

    #[test]
    fn test_sample_curve() {
        function!(parabola(x) = 1.0 x^2 + 1.0);
        let curve = sample_curve(parabola.coefficients(), &SamplingDomain::default());
        assert_eq!(curve.len(), 51);
        for &(x, y) in &curve {
            assert_close!(y, x * x + 1.0, tol = 1e-9);
        }
        assert_eq!(curve[50], (10.0, 101.0));
    }

    #[test]
    fn test_sample_curve_empty_coefficients() {
        let domain = SamplingDomain::new(0.0, 1.0, 0.5).unwrap();
        assert_eq!(
            sample_curve(&[], &domain),
            vec![(0.0, 0.0), (0.5, 0.0), (1.0, 0.0)]
        );
    }

    #[test]
    fn test_single_sample_domain() {
        let domain = SamplingDomain::new(3.0, 3.0, 1.0).unwrap();
        assert_eq!(sample_curve(&[2.0, 1.0], &domain), vec![(3.0, 5.0)]);
    }

    #[test]
    fn test_invalid_domains() {
        assert!(matches!(
            SamplingDomain::new(0.0, 10.0, 0.0),
            Err(Error::InvalidDomain(_))
        ));
        assert!(SamplingDomain::new(0.0, 10.0, -0.2).is_err());
        assert!(SamplingDomain::new(5.0, 1.0, 0.2).is_err());
        assert!(SamplingDomain::new(f64::NAN, 1.0, 0.2).is_err());
        assert!(SamplingDomain::new(0.0, f64::INFINITY, 0.2).is_err());
    }

    #[test]
    fn test_domain_from_json() {
        let domain: SamplingDomain = serde_json::from_str(r#"{"start": -1.0, "end": 1.0, "step": 0.5}"#).unwrap();
        assert!(domain.validate().is_ok());
        assert_eq!(domain.len(), 5);
    }
}
