use std::{borrow::Cow, ops::RangeInclusive};

use crate::{
    display::{self, DEFAULT_PRECISION},
    statistics,
    value::{CoordExt, SteppedValues, Value},
};

/// A polynomial function in the monomial basis `1, x, x², …, xᵈ`.
///
/// Unlike [`crate::CurveFit`], this struct is **not tied to any dataset**, making it a canonical
/// function that can be evaluated for **any x-value** without range restrictions.
///
/// Coefficients are stored constant term first:
/// `[c0, c1, ..., cd]` represents `f(x) = c0 + c1*x + ... + cd*x^d`.
///
/// # Type Parameters
/// - `'a`: Lifetime for borrowed coefficients, if used.
/// - `T`: Numeric type for the coefficients, default is `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial<'a, T: Value = f64> {
    coefficients: Cow<'a, [T]>,
}
impl<'a, T: Value> Polynomial<'a, T> {
    /// Creates a polynomial borrowing a static or external coefficient slice.
    ///
    /// This is `const` so that polynomials can be declared as constants; see [`crate::function!`].
    ///
    /// # Example
    /// ```
    /// # use powerfit::Polynomial;
    /// let poly = Polynomial::borrowed(&[1.0, 0.0, 1.0]); // 1 + x^2
    /// assert_eq!(poly.y(3.0), 10.0);
    /// ```
    #[must_use]
    pub const fn borrowed(coefficients: &'a [T]) -> Self {
        Self {
            coefficients: Cow::Borrowed(coefficients),
        }
    }

    /// Creates a polynomial owning its coefficients.
    ///
    /// An empty vector is the zero polynomial.
    #[must_use]
    pub fn owned(coefficients: Vec<T>) -> Polynomial<'static, T> {
        Polynomial {
            coefficients: Cow::Owned(coefficients),
        }
    }

    /// Returns a reference to the polynomial’s coefficients, constant term first.
    ///
    /// For example in `y(x) = 2x^2 - 3x + 1`; coefficients = [1.0, -3.0, 2.0]
    #[must_use]
    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }

    /// Returns the degree of the polynomial, as stored.
    ///
    /// This is `coefficients.len() - 1`; a leading zero coefficient still counts.
    /// The zero polynomial has degree 0.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Evaluates the polynomial at a given x-value.
    ///
    /// <div class="warning">
    ///
    /// **Technical Details**
    ///
    /// Uses Horner's rule, which is equivalent to `y(x) = Σ c_i * x^i`:
    /// ```math
    /// y(x) = c0 + x(c1 + x(c2 + ... + x(cd)))
    /// ```
    /// </div>
    ///
    /// # Example
    /// ```
    /// # use powerfit::Polynomial;
    /// let poly = Polynomial::borrowed(&[1.0, 2.0, 3.0]); // 1 + 2x + 3x^2
    /// assert_eq!(poly.y(2.0), 17.0);
    /// ```
    pub fn y(&self, x: T) -> T {
        self.coefficients
            .iter()
            .rev()
            .fold(T::zero(), |acc, &c| acc * x + c)
    }

    /// Evaluates the polynomial at multiple x-values.
    ///
    /// # Returns
    /// A `Vec` of `(x, y)` pairs corresponding to each input value, in input order.
    ///
    /// # Example
    /// ```
    /// # use powerfit::Polynomial;
    /// let poly = Polynomial::borrowed(&[1.0, 2.0, 3.0]); // 1 + 2x + 3x^2
    /// let points = poly.solve(vec![0.0, 1.0, 2.0]);
    /// assert_eq!(points, vec![(0.0, 1.0), (1.0, 6.0), (2.0, 17.0)]);
    /// ```
    pub fn solve(&self, x: impl IntoIterator<Item = T>) -> Vec<(T, T)> {
        x.into_iter().map(|x| (x, self.y(x))).collect()
    }

    /// Evaluates the polynomial over a range of x-values with a fixed step.
    ///
    /// See [`SteppedValues`] for how the sample positions are generated.
    ///
    /// # Example
    /// ```
    /// # use powerfit::Polynomial;
    /// let poly = Polynomial::borrowed(&[1.0, 2.0, 3.0]); // 1 + 2x + 3x^2
    /// let points = poly.solve_range(0.0..=2.0, 1.0);
    /// assert_eq!(points, vec![(0.0, 1.0), (1.0, 6.0), (2.0, 17.0)]);
    /// ```
    pub fn solve_range(&self, range: RangeInclusive<T>, step: T) -> Vec<(T, T)> {
        self.solve(SteppedValues::new(range, step))
    }

    /// Calculates the R-squared value for the polynomial compared to provided data.
    ///
    /// See [`statistics::r_squared`] for more details.
    pub fn r_squared(&self, data: &[(T, T)]) -> T {
        let y = data.y_iter();
        let y_fit = data.x_iter().map(|x| self.y(x));
        statistics::r_squared(y, y_fit)
    }

    /// Returns true if every coefficient is finite.
    pub fn is_finite(&self) -> bool {
        self.coefficients
            .iter()
            .all(|c| num_traits::float::FloatCore::is_finite(*c))
    }

    /// Returns a human-readable string of the polynomial equation.
    ///
    /// ```text
    /// y(x) = x² + 1.00
    /// ```
    ///
    /// # Example
    /// ```
    /// # use powerfit::Polynomial;
    /// let poly = Polynomial::borrowed(&[1.0, 0.0, 1.0]);
    /// assert_eq!(poly.equation(), "y(x) = x² + 1.00");
    /// ```
    #[expect(clippy::missing_panics_doc, reason = "Infallible operation")]
    #[must_use]
    pub fn equation(&self) -> String {
        let mut output = String::new();
        display::format_polynomial(&mut output, self.coefficients(), DEFAULT_PRECISION)
            .expect("String should be infallible");
        output
    }
}

impl<'a, T: Value> AsRef<Polynomial<'a, T>> for Polynomial<'a, T> {
    fn as_ref(&self) -> &Polynomial<'a, T> {
        self
    }
}

impl<T: Value> std::fmt::Display for Polynomial<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        display::format_polynomial(f, self.coefficients(), DEFAULT_PRECISION)
    }
}

#[cfg(test)]
mod tests {
    use crate::{assert_all_close, assert_close, assert_y, function, value::CoordExt};

    use super::*;

    #[test]
    fn test_y() {
        function!(test(x) = 8.0 + 7.0 x^1 + 6.0 x^2);
        assert_y!(test, 0.0, 8.0);
        assert_y!(test, 1.0, 21.0);
        assert_y!(test, 2.0, 46.0);
    }

    #[test]
    fn test_y_matches_power_sum() {
        function!(test(x) = 0.5 - 1.25 x + 3.0 x^3 + 0.125 x^5);
        for x in [-2.0, -0.5, 0.0, 1.5, 7.0] {
            let expected: f64 = test
                .coefficients()
                .iter()
                .enumerate()
                .map(|(i, c)| c * Value::powi(x, i as i32))
                .sum();
            assert_close!(test.y(x), expected, tol = 1e-9);
        }
    }

    #[test]
    fn test_solve() {
        function!(test(x) = 8.0 + 7.0 x^1 + 6.0 x^2);
        let points: Vec<_> = test.solve(vec![0.0, 1.0, 2.0]).y();
        assert_all_close!(points, &[8.0, 21.0, 46.0]);
    }

    #[test]
    fn test_solve_range() {
        function!(test(x) = 8.0 + 7.0 x^1 + 6.0 x^2);
        let points = test.solve_range(0.0..=3.0, 1.0).y();
        assert_all_close!(points, &[8.0, 21.0, 46.0, 83.0]);
    }

    #[test]
    fn test_zero_polynomial() {
        let zero = Polynomial::<f64>::owned(vec![]);
        assert_eq!(zero.degree(), 0);
        assert_eq!(zero.y(12.0), 0.0);
        assert_eq!(zero.to_string(), "y(x) = 0");
    }

    #[test]
    fn test_degree_and_owned() {
        let poly = Polynomial::borrowed(&[1.0, 2.0, 0.0]);
        assert_eq!(poly.degree(), 2);

        let owned = Polynomial::owned(poly.coefficients().to_vec());
        assert_eq!(owned, poly);
        assert_eq!(owned.coefficients(), &[1.0, 2.0, 0.0]);
    }

    #[test]
    fn test_is_finite() {
        assert!(Polynomial::borrowed(&[1.0, 2.0]).is_finite());
        assert!(!Polynomial::borrowed(&[1.0, f64::NAN]).is_finite());
        assert!(!Polynomial::borrowed(&[f64::INFINITY]).is_finite());
    }

    #[test]
    fn test_r_squared_exact() {
        function!(test(x) = 1.0 + 1.0 x^2);
        let data = test.solve_range(0.0..=4.0, 1.0);
        assert_close!(test.r_squared(&data), 1.0);
    }

    #[test]
    fn test_equation() {
        function!(test(x) = 1.0 + 1.0 x^2);
        assert_eq!(test.equation(), "y(x) = x² + 1.00");
        assert_eq!(format!("{test}"), test.equation());
    }
}
