//! Human-readable equations for interpolants
//!
//! A basis implements [`PolynomialDisplay`] to describe how one weighted basis function is
//! written out; the provided [`PolynomialDisplay::format_polynomial`] assembles the terms,
//! highest degree first, behind the domain scaling they are expressed in:
//!
//! ```text
//! xₛ = T[ 0..2 -> -1..1 ], y(x) = xₛ² + 2.00xₛ + 2.00
//! ```
#![allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]

use crate::value::Value;

pub mod unicode;

/// Digits after the decimal point used by the provided implementations of [`PolynomialDisplay`]
pub const DEFAULT_PRECISION: usize = 2;

/// Magnitudes written in fixed notation; anything else uses scientific notation
fn fixed_notation_range<T: Value>() -> Option<std::ops::Range<T>> {
    Some(T::try_cast(1e-3).ok()?..T::try_cast(1e3).ok()?)
}

/// Formatting of an expansion in some basis.
pub trait PolynomialDisplay<T: Value> {
    /// Formats the term `coef·φ_degree`.
    ///
    /// Returns `None` if the term should be left out, typically because `coef` is zero.
    fn format_term(&self, degree: i32, coef: T) -> Option<Term>;

    /// Describes the change of variable the coefficients are expressed in, if any.
    fn format_scaling_formula(&self) -> Option<String> {
        None
    }

    /// Writes `[scaling, ]y(x) = …` into `buffer`.
    ///
    /// `coefficients[j]` weights basis function `j`; terms are written from the highest
    /// degree down and zero terms are skipped.
    ///
    /// # Errors
    /// Returns an error if writing to `buffer` fails.
    fn format_polynomial<B: std::fmt::Write>(
        &self,
        buffer: &mut B,
        coefficients: &[T],
    ) -> std::fmt::Result {
        if let Some(scaling) = self.format_scaling_formula() {
            write!(buffer, "{scaling}, ")?;
        }
        write!(buffer, "y(x) = ")?;

        let mut terms = coefficients
            .iter()
            .enumerate()
            .rev()
            .filter_map(|(degree, &coef)| self.format_term(degree as i32, coef));

        let Some(first) = terms.next() else {
            return write!(buffer, "0");
        };

        if first.sign == Sign::Negative {
            write!(buffer, "-")?;
        }
        write!(buffer, "{}", first.body)?;

        for term in terms {
            write!(buffer, " {} {}", term.sign.char(), term.body)?;
        }

        Ok(())
    }
}

/// Sign joining a term to the rest of an equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// `+`
    Positive,

    /// `-`
    Negative,
}
impl Sign {
    /// Sign of a coefficient; zero counts as positive.
    pub fn from_coef<T: Value>(coef: T) -> Self {
        if coef.is_sign_negative() {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    /// Returns `+` or `-`.
    #[must_use]
    pub fn char(&self) -> char {
        match self {
            Sign::Positive => '+',
            Sign::Negative => '-',
        }
    }
}

/// One term of an equation: its sign and its unsigned body, e.g. `2.00xₛ²`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// Sign of the term
    pub sign: Sign,

    /// Unsigned text of the term
    pub body: String,
}
impl Term {
    /// Creates a new term.
    #[must_use]
    pub fn new(sign: Sign, body: String) -> Self {
        Self { sign, body }
    }
}

/// Formats the magnitude of a coefficient.
///
/// - `None` if the coefficient is zero (or within epsilon of it).
/// - An empty string for a unit coefficient on a non-constant term, so `1·x²` reads `x²`.
/// - Fixed notation within `1e-3..1e3`, scientific notation otherwise.
///
/// ```
/// # use polyinterp::display::format_coefficient;
/// assert_eq!(format_coefficient(0.0, 1, 2), None);
/// assert_eq!(format_coefficient(-2.5, 1, 2), Some("2.50".to_string()));
/// assert_eq!(format_coefficient(1.0, 2, 2), Some(String::new()));
/// assert_eq!(format_coefficient(1e5, 1, 2), Some("1.00e5".to_string()));
/// ```
pub fn format_coefficient<T: Value>(coef: T, degree: i32, precision: usize) -> Option<String> {
    let abs = Value::abs(coef);
    if abs <= T::epsilon() {
        return None;
    }

    if degree != 0 && abs.abs_sub(T::one()) <= T::epsilon() {
        return Some(String::new());
    }

    Some(unicode::float(abs, fixed_notation_range(), precision))
}

/// Formats a variable raised to `exp`, with an optional subscript.
///
/// ```
/// # use polyinterp::display::format_variable;
/// assert_eq!(format_variable("x", Some("s"), 0), "");
/// assert_eq!(format_variable("x", Some("s"), 1), "xₛ");
/// assert_eq!(format_variable("x", Some("s"), 3), "xₛ³");
/// assert_eq!(format_variable("x", None, 2), "x²");
/// ```
#[must_use]
pub fn format_variable(base: &str, subscript: Option<&str>, exp: i32) -> String {
    let lbl = unicode::subscript(subscript.unwrap_or_default());
    match exp {
        0 => String::new(),
        1 => format!("{base}{lbl}"),
        _ => format!("{base}{lbl}{}", unicode::superscript(&exp.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PlainPowers;
    impl PolynomialDisplay<f64> for PlainPowers {
        fn format_term(&self, degree: i32, coef: f64) -> Option<Term> {
            let coef_str = format_coefficient(coef, degree, DEFAULT_PRECISION)?;
            let body = format!("{coef_str}{}", format_variable("x", None, degree));
            Some(Term::new(Sign::from_coef(coef), body))
        }
    }

    fn render(coefs: &[f64]) -> String {
        let mut buf = String::new();
        PlainPowers.format_polynomial(&mut buf, coefs).unwrap();
        buf
    }

    #[test]
    fn test_sign() {
        assert_eq!(Sign::from_coef(1.0), Sign::Positive);
        assert_eq!(Sign::from_coef(0.0), Sign::Positive);
        assert_eq!(Sign::from_coef(-1.0), Sign::Negative);
        assert_eq!(Sign::Negative.char(), '-');
    }

    #[test]
    fn test_format_coefficient() {
        assert_eq!(format_coefficient(1e-20, 1, 2), None);
        assert_eq!(format_coefficient(1.0, 0, 2), Some("1.00".to_string()));
        assert_eq!(format_coefficient(1e-5, 2, 2), Some("1.00e-5".to_string()));
    }

    #[test]
    fn test_format_polynomial() {
        assert_eq!(render(&[2.0, -3.0, 0.0, 4.0]), "y(x) = 4.00x³ - 3.00x + 2.00");
        assert_eq!(render(&[-1.0, 2.0]), "y(x) = 2.00x - 1.00");
        assert_eq!(render(&[-1.0, -2.0]), "y(x) = -2.00x - 1.00");
        assert_eq!(render(&[0.0, 0.0, 1.0]), "y(x) = x²");
        assert_eq!(render(&[0.0, 0.0]), "y(x) = 0");
    }
}
