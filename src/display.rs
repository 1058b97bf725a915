//! Utilities for displaying and formatting polynomials
//!
//! This module converts coefficient vectors into human-readable equations such as
//! `y(x) = 0.27x³ - 4.49x² + 22.22x - 25.19`.
//!
//! # Key Concepts
//! - **[`Term`]**: Represents a single polynomial term with a sign and body.
//! - **[`Sign`]**: Tracks whether a term is positive or negative.
//!
//! # Helpers
//! - [`format_polynomial`]: Renders a full monomial polynomial as `"y(x) = ..."`.
//! - [`format_coefficient`]: Formats a numeric coefficient, skipping zeros.
//! - [`format_variable`]: Renders `x`, `x²`, `xₖ³`, ...
#![allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]

use crate::value::Value;

pub mod unicode;

/// Default precision for formatting coefficients
pub const DEFAULT_PRECISION: usize = 2;

/// Default range in which scientific notation is not used
#[must_use]
pub fn default_fixed_range<T: Value>() -> Option<std::ops::Range<T>> {
    const RANGE: std::ops::Range<f64> = 1e-3..1e3;
    let s = T::try_cast(RANGE.start).ok()?;
    let e = T::try_cast(RANGE.end).ok()?;
    Some(s..e)
}

/// Represents the sign of a polynomial term.
///
/// Used when formatting polynomial expressions to determine how a term
/// should be connected to the rest of the polynomial (e.g., with `+` or `-`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Positive sign (`+` when displayed).
    Positive,

    /// Negative sign (`-` when displayed).
    Negative,
}

impl Sign {
    /// Determines the sign from a numeric coefficient.
    ///
    /// # Example
    /// ```
    /// # use powerfit::display::Sign;
    /// assert_eq!(Sign::from_coef(3.0), Sign::Positive);
    /// assert_eq!(Sign::from_coef(-2.0), Sign::Negative);
    /// ```
    pub fn from_coef<T: Value>(coef: T) -> Self {
        if coef.is_sign_negative() {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    /// Returns the character representation of the sign.
    #[must_use]
    pub fn char(&self) -> char {
        match self {
            Sign::Positive => '+',
            Sign::Negative => '-',
        }
    }
}

/// A single term of a polynomial, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// The sign of the term (positive or negative).
    pub sign: Sign,

    /// The body of the term without its sign (e.g., `"2.00x²"`, `"3.14"`, `"x"`).
    pub body: String,
}

impl Term {
    /// Creates a new polynomial term with the given sign and body.
    #[must_use]
    pub fn new(sign: Sign, body: String) -> Self {
        Self { sign, body }
    }

    /// Formats the monomial term `coef * x^degree`.
    ///
    /// Returns `None` if the coefficient is zero, so the term is skipped.
    pub fn monomial<T: Value>(degree: i32, coef: T, precision: usize) -> Option<Self> {
        let sign = Sign::from_coef(coef);
        let coef = format_coefficient(coef, degree, precision)?;
        let var = format_variable("x", None, degree);
        Some(Self::new(sign, format!("{coef}{var}")))
    }
}

/// Formats a numeric coefficient for display in a polynomial term.
///
/// - Returns `None` if the coefficient is zero or effectively zero (≤ epsilon).
/// - Returns an empty string for a unit coefficient on a non-constant term (`x²`, not `1.00x²`).
/// - Formats as a decimal if the absolute value is between `1e-3` and `1e3`.
/// - Formats in scientific notation otherwise.
///
/// The sign is not included; see [`Sign::from_coef`].
///
/// # Example
/// ```
/// # use powerfit::display::format_coefficient;
/// assert_eq!(format_coefficient(0.0, 1, 2), None);
/// assert_eq!(format_coefficient(2.5, 1, 2), Some("2.50".to_string()));
/// assert_eq!(format_coefficient(1e5, 1, 2), Some("1.00e5".to_string()));
/// ```
pub fn format_coefficient<T: Value>(coef: T, degree: i32, precision: usize) -> Option<String> {
    let abs = Value::abs(coef);

    if coef.is_zero() || abs <= T::epsilon() {
        return None;
    }

    if Value::abs_sub(abs, T::one()) <= T::epsilon() && degree != 0 {
        return Some(String::new());
    }

    Some(unicode::float(abs, default_fixed_range(), precision))
}

/// Formats the variable part of a polynomial term.
///
/// # Behavior
/// - If `exp == 0`, returns an empty string (`""`).
/// - If `exp == 1`, returns the base string unchanged.
/// - Otherwise, appends the Unicode superscript version of `exp` to `base`.
///
/// # Examples
/// ```
/// # use powerfit::display::format_variable;
/// assert_eq!(format_variable("x", None, 0), "");
/// assert_eq!(format_variable("x", None, 1), "x");
/// assert_eq!(format_variable("x", Some("1"), 2), "x₁²");
/// ```
#[must_use]
pub fn format_variable(base: &str, subscript: Option<&str>, exp: i32) -> String {
    match exp {
        0 => String::new(),
        1 => base.to_string(),
        _ => {
            let lbl = unicode::subscript(subscript.unwrap_or_default());
            let sup = unicode::superscript(&exp.to_string());
            format!("{base}{lbl}{sup}")
        }
    }
}

/// Writes a monomial polynomial as `y(x) = ...` into the provided buffer.
///
/// - `coefficients[i]` is the coefficient of `x^i`; terms are written highest power first.
/// - Zero coefficients are skipped; an all-zero polynomial renders as `y(x) = 0`.
/// - The first term is written without a leading `+`.
///
/// # Errors
/// Returns an error if writing to `buffer` fails.
pub fn format_polynomial<W: std::fmt::Write, T: Value>(
    buffer: &mut W,
    coefficients: &[T],
    precision: usize,
) -> std::fmt::Result {
    let mut terms: Vec<Term> = coefficients
        .iter()
        .enumerate()
        .rev()
        .filter_map(|(degree, &coef)| Term::monomial(degree as i32, coef, precision))
        .collect();

    write!(buffer, "y(x) = ")?;
    if terms.is_empty() {
        return write!(buffer, "0");
    }

    // Extract the first term to avoid leading '+'
    let term_n = terms.remove(0);
    if term_n.sign == Sign::Negative {
        write!(buffer, "{}", term_n.sign.char())?;
    }
    write!(buffer, "{}", term_n.body)?;

    for term in terms {
        let sign = term.sign.char();
        let body = term.body;
        write!(buffer, " {sign} {body}")?;
    }

    Ok(())
}
