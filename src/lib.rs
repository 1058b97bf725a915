//! # Powerfit
//! ## Best-fit curves for the power → process → policy chart
//!
//! The chart plots policies by how much power backed them (x) against how far they
//! got as policy (y), and draws a best-fit polynomial through them. This crate is the
//! computational core behind that line:
//! - A least-squares polynomial fitter, solving the normal equations by Gaussian elimination
//! - A sampler that turns the fitted coefficients into a dense, plottable curve
//! - The chart state that owns the points, the degree selector, and the last good curve
//!
//! The simplest use-case is to fit some points and draw the result:
//! ```rust
//! use powerfit::{fit_curve, sample::SamplingDomain};
//!
//! let points: [(f64, f64); 3] = [(0.0, 1.0), (1.0, 2.0), (2.0, 5.0)];
//! let out = fit_curve(&points, 2, &SamplingDomain::default()).expect("Failed to create fit");
//!
//! // y = x² + 1, sampled at x = 0.0, 0.2, ..., 10.0
//! assert_eq!(out.curve.len(), 51);
//! assert!((out.curve[50].1 - 101.0).abs() < 1e-6);
//! ```
//!
//! # Core Concepts
//! - A [`Polynomial`] is a mathematical function returning a value `y` for a given input `x`.
//!     - Coefficients are stored constant term first: `[c0, c1, ..., cd]`
//! - A [`CurveFit`] is the least-squares polynomial through a set of data points.
//!     - The degree is clamped to `n - 1`, so a fit never has more unknowns than points
//!     - Degenerate data, such as every point sharing one x, is an [`error::Error`], never NaN
//! - A [`chart::PolicyChart`] is the state a UI binds to: add and remove policies, pick a
//!   degree between 1 and 5, toggle the line.
//! - The **degree** of a polynomial is the highest power of the variable `x` in the polynomial expression.
//!     - It is how wiggly the line is
//!
//! # Implementation Details
//!
//! This crate makes use of the `nalgebra` library for its matrix types, and logs through the
//! `log` facade. Nothing is logged unless the application installs a logger.
//!
//! # Testing utilities
//!
//! This crate includes a set of testing macros for writing readable assertions about fits. See [`test`].
//!
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::needless_range_loop)] // The worst clippy lint
#![allow(clippy::cast_precision_loss)] // I don't care about this one
#![allow(clippy::similar_names)] //       Clippy does not get to decide what names are similar


pub mod chart;
pub mod display;
pub mod error;
pub mod points;
pub mod sample;
pub mod statistics;
pub mod value;

mod fit;
mod polynomial;

pub use fit::*;
pub use polynomial::Polynomial;

pub use nalgebra;
