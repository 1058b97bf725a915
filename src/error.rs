//! Error types for polynomial curve fitting
//!
//! This module defines the failures that can occur while fitting, sampling,
//! or editing the chart state, along with a convenient `Result` alias.
//!
//! None of these are fatal: a failed fit is expected to be recovered locally
//! by keeping the previous curve, or by drawing no curve at all.

/// Errors that can occur during polynomial curve fitting.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Cannot perform curve fitting because there is no data.
    #[error("No data available for fitting")]
    NoData,

    /// Too few points to fit a curve.
    ///
    /// A best-fit line needs at least two points; callers should not invoke the
    /// fitter below that, but if they do this is what they get.
    #[error("Insufficient data for fitting: got {got} point(s), need at least {required}")]
    InsufficientData {
        /// Number of points supplied
        got: usize,
        /// Minimum number of points required
        required: usize,
    },

    /// A point has a NaN or infinite coordinate.
    #[error("Point {index} has a non-finite coordinate")]
    NonFiniteInput {
        /// Index of the offending point
        index: usize,
    },

    /// The normal equations could not be solved because the matrix is singular.
    ///
    /// Usually all points share the same x value, or there are fewer distinct
    /// x values than the degree requires.
    #[error(
        "Normal equations matrix is singular; cannot fit. [size: {size}, failed at column: {column}]"
    )]
    SingularMatrix {
        /// Dimension of the square system
        size: usize,
        /// Pivot column at which elimination failed
        column: usize,
    },

    /// The solver produced NaN or infinite coefficients.
    ///
    /// Happens when intermediate powers overflow, e.g. very high degrees far from zero.
    #[error("Solving produced non-finite coefficients")]
    NonFiniteCoefficients,

    /// The linear system is not square, or the right-hand side has the wrong length.
    #[error("Cannot solve a {rows}x{cols} system against a vector of length {len}")]
    DimensionMismatch {
        /// Matrix rows
        rows: usize,
        /// Matrix columns
        cols: usize,
        /// Right-hand side length
        len: usize,
    },

    /// The sampling domain is unusable.
    #[error("Invalid sampling domain: {0}")]
    InvalidDomain(String),

    /// A policy was added with an empty name.
    #[error("Policy name must not be blank")]
    BlankLabel,

    /// Tried to remove a point that does not exist.
    #[error("Index {index} is out of range for {len} point(s)")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of points present
        len: usize,
    },

    /// A numeric value could not be cast to the target type.
    #[error("Failed to cast value to target type")]
    CastFailed,
}

/// Result type for the polynomial curve fitting
pub type Result<T> = std::result::Result<T, Error>;
