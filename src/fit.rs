use std::{borrow::Cow, ops::RangeInclusive};

use crate::{
    error::{Error, Result},
    sample::SamplingDomain,
    statistics::{self, DomainNormalizer},
    value::{CoordExt, Value},
    Polynomial,
};

pub(crate) mod gauss;
pub(crate) mod normal;

use normal::NormalEquations;

/// Represents a least-squares polynomial fit for a set of data points.
///
/// `CurveFit` computes the monomial polynomial that best fits a given dataset.
/// It stores both the original data and the resulting coefficients.
///
/// # How it works
/// - Clamps the requested degree to `min(degree, n - 1)`, so there are never more
///   unknowns than points.
/// - Maps x onto `[-1, 1]` with a [`DomainNormalizer`], which keeps the system well
///   conditioned for data far from the origin.
/// - Builds the **normal equations** `M * c = v` with `M[i][j] = Σ x^(i+j)` and
///   `v[i] = Σ x^i * y`.
/// - Solves them by Gaussian elimination with partial pivoting.
/// - Maps the solution back to the original x, giving the coefficients constant term first.
///
/// With exactly `degree + 1` points the fit interpolates: it passes through every point.
///
/// # Example
/// ```
/// # use powerfit::CurveFit;
/// let data = &[(0.0, 1.0), (1.0, 2.0), (2.0, 5.0)];
/// let fit = CurveFit::new(data, 2).unwrap();
/// println!("Coefficients: {:?}", fit.coefficients());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CurveFit<'data, T: Value = f64> {
    data: Cow<'data, [(T, T)]>,
    x_range: RangeInclusive<T>,
    function: Polynomial<'static, T>,
    requested_degree: usize,
}
impl<'data, T: Value> CurveFit<'data, T> {
    /// Rejects data the fitter cannot work with.
    fn validate(data: &[(T, T)]) -> Result<()> {
        match data.len() {
            0 => return Err(Error::NoData),
            1 => {
                return Err(Error::InsufficientData {
                    got: 1,
                    required: 2,
                })
            }
            _ => {}
        }

        let bad = data.iter().position(|&(x, y)| {
            !num_traits::float::FloatCore::is_finite(x) || !num_traits::float::FloatCore::is_finite(y)
        });
        match bad {
            Some(index) => Err(Error::NonFiniteInput { index }),
            None => Ok(()),
        }
    }

    /// Creates a new polynomial curve fit for the given data and degree.
    ///
    /// # Parameters
    /// - `data`: Slice of `(x, y)` points to fit. Order does not matter.
    /// - `degree`: Requested polynomial degree. Values above `data.len() - 1` are clamped.
    ///
    /// # Errors
    /// Returns an [`Error`] in the following cases:
    /// - `Error::NoData`: `data` is empty.
    /// - `Error::InsufficientData`: `data` has a single point.
    /// - `Error::NonFiniteInput`: a coordinate is NaN or infinite.
    /// - `Error::SingularMatrix`: the x values cannot support the degree, e.g. they are all equal.
    /// - `Error::NonFiniteCoefficients`: the solution overflowed.
    ///
    /// # Example
    /// ```
    /// # use powerfit::CurveFit;
    /// let data = &[(0.0, 1.0), (1.0, 3.0)];
    /// let fit = CurveFit::new(data, 4).unwrap();
    /// assert_eq!(fit.degree(), 1);
    /// assert!(fit.was_clamped());
    /// ```
    pub fn new(data: impl Into<Cow<'data, [(T, T)]>>, degree: usize) -> Result<Self> {
        let data: Cow<_> = data.into();
        Self::validate(&data)?;

        let effective = degree.min(data.len() - 1);
        if effective < degree {
            log::debug!(
                "clamping degree {degree} to {effective} for {} points",
                data.len()
            );
        }

        let normalizer = DomainNormalizer::from_data(data.x_iter(), (-T::one(), T::one()));
        let scaled: Vec<_> = data
            .iter()
            .map(|&(x, y)| (normalizer.normalize(x), y))
            .collect();

        let equations = NormalEquations::build(&scaled, effective)?;
        let coefficients = gauss::solve(equations.matrix, equations.rhs)?;
        let function = Polynomial::owned(normalizer.denormalize_coefs(&coefficients));
        if !function.is_finite() {
            return Err(Error::NonFiniteCoefficients);
        }
        log::debug!(
            "fit {} points: requested degree {degree}, effective degree {effective}",
            data.len()
        );

        let x_range = data.x_range().ok_or(Error::NoData)?;

        Ok(Self {
            x_range: x_range.start..=x_range.end,
            function,
            requested_degree: degree,
            data,
        })
    }

    /// Returns the effective degree of the polynomial.
    ///
    /// This is `min(requested_degree, n - 1)`.
    pub fn degree(&self) -> usize {
        self.function.degree()
    }

    /// The degree originally asked for.
    pub fn requested_degree(&self) -> usize {
        self.requested_degree
    }

    /// True if there were too few points for the requested degree.
    pub fn was_clamped(&self) -> bool {
        self.requested_degree > self.degree()
    }

    /// Returns a reference to the polynomial’s coefficients.
    ///
    /// For example in `y(x) = 2x^2 - 3x + 1`; coefficients = [1.0, -3.0, 2.0]
    pub fn coefficients(&self) -> &[T] {
        self.function.coefficients()
    }

    /// Returns a reference to the data points used for fitting.
    pub fn data(&self) -> &[(T, T)] {
        &self.data
    }

    /// Returns the inclusive range of x-values in the dataset.
    pub fn x_range(&self) -> RangeInclusive<T> {
        self.x_range.clone()
    }

    /// Evaluates the fitted polynomial at `x`.
    ///
    /// No range check is made; see [`CurveFit::sample`].
    pub fn y(&self, x: T) -> T {
        self.function.y(x)
    }

    /// Evaluates the fit at the x values of the source data.
    pub fn solution(&self) -> Vec<(T, T)> {
        self.function.solve(self.data.x_iter())
    }

    /// Samples the fitted polynomial across `domain`.
    ///
    /// This extrapolates freely outside the data's x range, which is how the chart
    /// draws the curve edge to edge.
    ///
    /// # Example
    /// ```
    /// # use powerfit::{CurveFit, sample::SamplingDomain};
    /// let fit = CurveFit::new(&[(0.0, 1.0), (1.0, 2.0), (2.0, 5.0)], 2).unwrap();
    /// let curve = fit.sample(&SamplingDomain::default());
    /// assert_eq!(curve.len(), 51);
    /// ```
    pub fn sample(&self, domain: &SamplingDomain<T>) -> Vec<(T, T)> {
        self.function.solve(domain.positions())
    }

    /// Computes the residuals of the fit.
    ///
    /// <div class="warning">
    ///
    /// **Technical Details**
    ///
    /// ```math
    /// residual_i = y_i - f(x_i)
    /// ```
    /// </div>
    ///
    /// # Returns
    /// `(x, residual)` for each data point, in data order.
    pub fn residuals(&self) -> Vec<(T, T)> {
        self.data
            .iter()
            .map(|&(x, y)| (x, y - self.function.y(x)))
            .collect()
    }

    /// Computes the residual variance of the model's predictions.
    ///
    /// See [`statistics::residual_variance`].
    pub fn residual_variance(&self) -> T {
        let y = self.data.y_iter();
        let y_fit = self.solution().into_iter().map(|(_, y)| y);
        let k = T::from_positive_int(self.coefficients().len());
        statistics::residual_variance(y, y_fit, k)
    }

    /// Computes the mean squared error (MSE) of this fit against its source data.
    ///
    /// See [`statistics::mean_squared_error`].
    pub fn mean_squared_error(&self) -> T {
        let y = self.data.y_iter();
        let y_fit = self.solution().into_iter().map(|(_, y)| y);
        statistics::mean_squared_error(y, y_fit)
    }

    /// Computes the root mean squared error (RMSE) of this fit against its source data.
    pub fn root_mean_squared_error(&self) -> T {
        let y = self.data.y_iter();
        let y_fit = self.solution().into_iter().map(|(_, y)| y);
        statistics::root_mean_squared_error(y, y_fit)
    }

    /// Calculates the R-squared value for the model compared to provided data.
    ///
    /// Values closer to 1 indicate a better fit. See [`statistics::r_squared`].
    ///
    /// # Example
    /// ```
    /// # use powerfit::CurveFit;
    /// let data: &[(f64, f64)] = &[(0.0, 1.0), (1.0, 3.0), (2.0, 7.0)];
    /// let fit = CurveFit::new(data, 2).unwrap();
    /// assert!((fit.r_squared(data) - 1.0).abs() < 1e-9);
    /// ```
    pub fn r_squared(&self, data: &[(T, T)]) -> T {
        self.function.r_squared(data)
    }

    /// Returns a pure polynomial representation of the curve fit.
    ///
    /// The [`Polynomial`] form is a canonical function, not tied to the data.
    pub fn as_polynomial(&self) -> &Polynomial<'static, T> {
        &self.function
    }

    /// Consumes the fit, dropping the data and keeping the [`Polynomial`].
    pub fn into_polynomial(self) -> Polynomial<'static, T> {
        self.function
    }

    /// Returns a human-readable string of the polynomial equation.
    ///
    /// ```text
    /// y(x) = x² + 1.00
    /// ```
    pub fn equation(&self) -> String {
        self.function.equation()
    }

    /// Packages the coefficients and the curve sampled over `domain`.
    ///
    /// The domain is not validated here; see [`fit_curve`].
    pub fn output(&self, domain: &SamplingDomain<T>) -> FitOutput<T> {
        FitOutput {
            coefficients: self.coefficients().to_vec(),
            effective_degree: self.degree(),
            curve: self.sample(domain),
        }
    }

    /// Returns the properties of the curve fit.
    ///
    /// This is a serializable summary of the fit's characteristics.
    pub fn properties(&self) -> FitProperties<T> {
        FitProperties {
            degree: self.degree(),
            requested_degree: self.requested_degree,
            data_points: self.data.len(),
            coefficients: self.coefficients().to_vec(),
            mse: self.mean_squared_error(),
            r_squared: self.r_squared(self.data()),
        }
    }
}

impl<T: Value> AsRef<Polynomial<'static, T>> for CurveFit<'_, T> {
    fn as_ref(&self) -> &Polynomial<'static, T> {
        &self.function
    }
}

impl<T: Value> std::fmt::Display for CurveFit<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.function)
    }
}

/// A set of diagnostic properties for a curve fit.
///
/// Can be serialize to JSON or other formats.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct FitProperties<T: Value> {
    /// The effective degree of the fitted polynomial.
    pub degree: usize,

    /// The degree that was asked for.
    pub requested_degree: usize,

    /// The number of data points used in the fit.
    pub data_points: usize,

    /// The coefficients of the fitted polynomial, constant term first.
    pub coefficients: Vec<T>,

    /// The mean squared error of the fit.
    pub mse: T,

    /// The R² value of the fit.
    pub r_squared: T,
}

/// The result of [`fit_curve`]: coefficients plus the sampled curve.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct FitOutput<T: Value = f64> {
    /// `[c0, c1, ..., cd]`, constant term first.
    pub coefficients: Vec<T>,

    /// `min(requested, n - 1)`
    pub effective_degree: usize,

    /// `(x, f(x))` at each position of the sampling domain, ascending.
    pub curve: Vec<(T, T)>,
}

/// Fits `points` with a polynomial of (at most) `degree` and samples it over `domain`.
///
/// This is a pure function: nothing is retained between calls.
///
/// # Errors
/// - [`Error::InvalidDomain`] if `domain` is unusable.
/// - Any error from [`CurveFit::new`].
///
/// # Example
/// ```
/// # use powerfit::{fit_curve, sample::SamplingDomain};
/// let out = fit_curve(&[(0.0, 1.0), (1.0, 2.0), (2.0, 5.0)], 2, &SamplingDomain::default()).unwrap();
/// assert_eq!(out.effective_degree, 2);
/// assert_eq!(out.curve.len(), 51);
/// ```
pub fn fit_curve<T: Value>(
    points: &[(T, T)],
    degree: usize,
    domain: &SamplingDomain<T>,
) -> Result<FitOutput<T>> {
    domain.validate()?;

    let fit = CurveFit::new(points, degree)?;
    Ok(fit.output(domain))
}
