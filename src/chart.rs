//! State behind the power → process → policy chart.
//!
//! [`PolicyChart`] owns the plotted policies and the degree selector, and keeps the
//! best-fit curve up to date as they change. It has no rendering of its own; a UI layer
//! reads [`PolicyChart::points`] for the scatter and [`PolicyChart::overlay`] for the line.
//!
//! ```rust
//! use powerfit::chart::PolicyChart;
//!
//! let mut chart: PolicyChart = PolicyChart::new();
//! assert_eq!(chart.points().len(), 6);
//! assert_eq!(chart.overlay().map(<[_]>::len), Some(51));
//!
//! chart.add_policy("Climate Accord", 7.0, 8.0).unwrap();
//! chart.set_degree(3).unwrap();
//! assert_eq!(chart.current_fit().unwrap().degree(), 3);
//! ```
use crate::{
    error::{Error, Result},
    points::{Color, PointSet, SamplePoint},
    sample::SamplingDomain,
    value::Value,
    CurveFit,
};

/// Lowest degree the selector offers.
pub const MIN_DEGREE: usize = 1;

/// Highest degree the selector offers.
pub const MAX_DEGREE: usize = 5;

/// Degree selected on a fresh chart.
pub const DEFAULT_DEGREE: usize = 2;

/// The policies a new chart starts with: `(name, power, policy, colour)`.
pub const DEFAULT_POLICIES: [(&str, f64, f64, &str); 6] = [
    ("Healthcare Reform", 3.0, 7.0, "#3b82f6"),
    ("Tax Policy", 8.0, 2.0, "#ef4444"),
    ("Education Bill", 5.0, 9.0, "#22c55e"),
    ("Infrastructure", 2.0, 4.0, "#f59e0b"),
    ("Defense Budget", 9.0, 6.0, "#8b5cf6"),
    ("Trade Agreement", 6.0, 3.0, "#ec4899"),
];

/// Chart state: the plotted policies, the fit settings, and the last good curve.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyChart<T: Value = f64> {
    points: PointSet<T>,
    degree: usize,
    show_function: bool,
    domain: SamplingDomain<T>,
    curve: Vec<(T, T)>,
}

impl<T: Value> PolicyChart<T> {
    /// A chart seeded with the default policies, already fitted.
    #[must_use]
    pub fn new() -> Self {
        let points = DEFAULT_POLICIES
            .iter()
            .filter_map(|&(name, power, policy, color)| {
                let x = T::try_cast(power).ok()?;
                let y = T::try_cast(policy).ok()?;
                Some(SamplePoint::labelled(x, y, name, Color::new(color)))
            })
            .collect();
        Self::with_points(points)
    }

    /// A chart with no policies and no curve.
    #[must_use]
    pub fn empty() -> Self {
        Self::with_points(PointSet::new())
    }

    /// A chart over the given points, fitted at the default degree.
    ///
    /// A failed initial fit leaves the curve empty.
    pub fn with_points(points: PointSet<T>) -> Self {
        let mut chart = Self {
            points,
            degree: DEFAULT_DEGREE,
            show_function: true,
            domain: SamplingDomain::default(),
            curve: Vec::new(),
        };
        if let Err(e) = chart.refit() {
            log::debug!("starting without a curve: {e}");
        }
        chart
    }

    /// The plotted policies, in the order they were added.
    pub fn points(&self) -> &PointSet<T> {
        &self.points
    }

    /// The selected degree, always within `MIN_DEGREE..=MAX_DEGREE`.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Whether the best-fit line is shown.
    pub fn show_function(&self) -> bool {
        self.show_function
    }

    /// The domain the curve is sampled over.
    pub fn domain(&self) -> &SamplingDomain<T> {
        &self.domain
    }

    /// The last successfully fitted curve, whether or not it is shown.
    pub fn curve(&self) -> &[(T, T)] {
        &self.curve
    }

    /// The curve to draw, if the line is switched on and there is one.
    pub fn overlay(&self) -> Option<&[(T, T)]> {
        if self.show_function && !self.curve.is_empty() {
            Some(&self.curve)
        } else {
            None
        }
    }

    /// Adds a policy and refits.
    ///
    /// The name is trimmed, power and policy are clamped into the `[0, 10]` slider range,
    /// and the point gets a random colour.
    ///
    /// # Errors
    /// - [`Error::BlankLabel`] if the name is empty after trimming. Nothing is added.
    /// - Any fit error from [`PolicyChart::refit`]. The point is still added.
    pub fn add_policy(&mut self, name: &str, power: T, policy: T) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::BlankLabel);
        }

        let lo = T::zero();
        let hi = T::try_cast(10.0)?;
        let clamp = |v: T| nalgebra::RealField::clamp(v, lo, hi);

        let point = SamplePoint::labelled(clamp(power), clamp(policy), name, Color::random());
        self.points.push(point);
        self.refit()
    }

    /// Removes the policy at `index` and refits.
    ///
    /// # Errors
    /// - [`Error::IndexOutOfRange`] if there is no such policy. Nothing changes.
    /// - Any fit error from [`PolicyChart::refit`].
    pub fn remove_policy(&mut self, index: usize) -> Result<SamplePoint<T>> {
        let removed = self.points.remove(index)?;
        self.refit()?;
        Ok(removed)
    }

    /// Selects a degree, clamped to `MIN_DEGREE..=MAX_DEGREE`, and refits.
    ///
    /// # Errors
    /// Any fit error from [`PolicyChart::refit`].
    pub fn set_degree(&mut self, degree: usize) -> Result<()> {
        self.degree = degree.clamp(MIN_DEGREE, MAX_DEGREE);
        self.refit()
    }

    /// Shows or hides the best-fit line. The curve itself is kept either way.
    pub fn set_show_function(&mut self, show: bool) {
        self.show_function = show;
    }

    /// Changes the sampling domain and refits.
    ///
    /// # Errors
    /// - [`Error::InvalidDomain`] if `domain` is unusable. The old domain is kept.
    /// - Any fit error from [`PolicyChart::refit`].
    pub fn set_domain(&mut self, domain: SamplingDomain<T>) -> Result<()> {
        domain.validate()?;
        self.domain = domain;
        self.refit()
    }

    /// Recomputes the curve from the current points and degree.
    ///
    /// - With fewer than two points there is nothing to fit, and the curve is cleared.
    /// - If the fit fails, the previous curve is kept and the error returned.
    ///
    /// # Errors
    /// Any error from [`CurveFit::new`].
    pub fn refit(&mut self) -> Result<()> {
        if self.points.len() < 2 {
            self.curve.clear();
            return Ok(());
        }

        let data = self.points.sorted_by_x();
        match CurveFit::new(data, self.degree) {
            Ok(fit) => {
                self.curve = fit.sample(&self.domain);
                Ok(())
            }
            Err(e) => {
                log::warn!("keeping previous curve, fit failed: {e}");
                Err(e)
            }
        }
    }

    /// Fits the current points afresh, for diagnostics.
    ///
    /// # Errors
    /// Any error from [`CurveFit::new`].
    pub fn current_fit(&self) -> Result<CurveFit<'static, T>> {
        CurveFit::new(self.points.sorted_by_x(), self.degree)
    }
}

impl<T: Value> Default for PolicyChart<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::{assert_close, assert_interpolates};

    use super::*;

    #[test]
    fn test_new_chart() {
        let chart = PolicyChart::<f64>::new();
        assert_eq!(chart.points().len(), 6);
        assert_eq!(chart.degree(), DEFAULT_DEGREE);
        assert!(chart.show_function());

        let first = chart.points().get(0).unwrap();
        assert_eq!(first.label.as_deref(), Some("Healthcare Reform"));
        assert_eq!(first.color, Some(Color::new("#3b82f6")));

        let curve = chart.overlay().unwrap();
        assert_eq!(curve.len(), 51);
        assert_eq!(curve[0].0, 0.0);
        assert_eq!(curve[50].0, 10.0);
    }

    #[test]
    fn test_curve_matches_fit() {
        let chart = PolicyChart::<f64>::new();
        let fit = chart.current_fit().unwrap();
        for &(x, y) in chart.curve() {
            assert_close!(y, fit.y(x), tol = 1e-9);
        }
    }

    #[test]
    fn test_empty_chart() {
        let mut chart = PolicyChart::<f64>::empty();
        assert!(chart.curve().is_empty());
        assert!(chart.overlay().is_none());

        chart.add_policy("Solo", 4.0, 4.0).unwrap();
        assert!(chart.curve().is_empty());

        chart.add_policy("Pair", 6.0, 8.0).unwrap();
        assert_eq!(chart.curve().len(), 51);

        // A line through (4, 4) and (6, 8)
        assert_close!(chart.curve()[0].1, -4.0, tol = 1e-9);
    }

    #[test]
    fn test_with_points_unfittable() {
        let points = [(4.0, 1.0), (4.0, 2.0)].into_iter().map(SamplePoint::from).collect();
        let chart = PolicyChart::<f64>::with_points(points);
        assert_eq!(chart.points().len(), 2);
        assert!(chart.curve().is_empty());
        assert!(chart.overlay().is_none());
    }

    #[test]
    fn test_add_policy() {
        let mut chart = PolicyChart::<f64>::new();
        chart.add_policy("  Climate Accord ", 12.0, -3.0).unwrap();

        let added = chart.points().get(6).unwrap();
        assert_eq!(added.label.as_deref(), Some("Climate Accord"));
        assert_eq!(added.coords(), (10.0, 0.0));
        assert!(added.color.as_ref().unwrap().as_str().starts_with("hsl("));

        assert_eq!(chart.add_policy("   ", 1.0, 1.0), Err(Error::BlankLabel));
        assert_eq!(chart.points().len(), 7);
    }

    #[test]
    fn test_remove_policy() {
        let mut chart = PolicyChart::<f64>::new();
        let removed = chart.remove_policy(1).unwrap();
        assert_eq!(removed.label.as_deref(), Some("Tax Policy"));
        assert_eq!(chart.points().len(), 5);

        assert_eq!(
            chart.remove_policy(5),
            Err(Error::IndexOutOfRange { index: 5, len: 5 })
        );

        while !chart.points().is_empty() {
            chart.remove_policy(0).unwrap();
        }
        assert!(chart.overlay().is_none());
    }

    #[test]
    fn test_set_degree_clamps() {
        let mut chart = PolicyChart::<f64>::new();
        chart.set_degree(0).unwrap();
        assert_eq!(chart.degree(), 1);

        chart.set_degree(9).unwrap();
        assert_eq!(chart.degree(), 5);
        assert_eq!(chart.current_fit().unwrap().degree(), 5);
    }

    #[test]
    fn test_failed_refit_keeps_curve() {
        let mut chart = PolicyChart::<f64>::empty();
        chart.add_policy("A", 6.0, 1.0).unwrap();
        chart.add_policy("B", 2.0, 3.0).unwrap();
        let good = chart.curve().to_vec();
        assert_eq!(good.len(), 51);

        // Two distinct x values cannot support a quadratic
        assert!(matches!(
            chart.add_policy("C", 6.0, 5.0),
            Err(Error::SingularMatrix { .. })
        ));
        assert_eq!(chart.points().len(), 3);
        assert_eq!(chart.curve(), good.as_slice());

        // Dropping to a line recovers: y = 3 everywhere
        chart.set_degree(1).unwrap();
        assert_ne!(chart.curve(), good.as_slice());
        for &(_, y) in chart.curve() {
            assert_close!(y, 3.0, tol = 1e-9);
        }
    }

    #[test]
    fn test_high_degree_near_slider_end() {
        let mut chart = PolicyChart::<f64>::empty();
        let policies = [(7.5, 4.0), (8.0, 7.0), (8.5, 2.0), (9.0, 9.0), (9.5, 5.0), (10.0, 6.0)];
        for (i, &(power, policy)) in policies.iter().enumerate() {
            chart.add_policy(&format!("Policy {i}"), power, policy).unwrap();
        }

        chart.set_degree(5).unwrap();
        let fit = chart.current_fit().unwrap();
        assert_eq!(fit.degree(), 5);
        assert_interpolates!(fit);

        // Samples at x = 8, 9, 10 land on the policies there
        let curve = chart.overlay().unwrap();
        assert_close!(curve[40].1, 7.0, tol = 1e-6);
        assert_close!(curve[45].1, 9.0, tol = 1e-6);
        assert_close!(curve[50].1, 6.0, tol = 1e-6);
    }

    #[test]
    fn test_toggle_overlay() {
        let mut chart = PolicyChart::<f64>::new();
        chart.set_show_function(false);
        assert!(chart.overlay().is_none());
        assert_eq!(chart.curve().len(), 51);

        chart.set_show_function(true);
        assert!(chart.overlay().is_some());
    }

    #[test]
    fn test_set_domain() {
        let mut chart = PolicyChart::<f64>::new();
        chart
            .set_domain(SamplingDomain::new(0.0, 10.0, 1.0).unwrap())
            .unwrap();
        assert_eq!(chart.curve().len(), 11);

        let bad = SamplingDomain {
            start: 1.0,
            end: 0.0,
            step: 1.0,
        };
        assert!(matches!(chart.set_domain(bad), Err(Error::InvalidDomain(_))));
        assert_eq!(chart.curve().len(), 11);
    }
}
