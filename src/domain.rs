//! Affine scaling of sample coordinates into `[-1, 1]`.
//!
//! Fitting in the raw x variable produces badly conditioned matrices as soon as the samples
//! sit far from the origin or span a wide range. Every fit in this crate therefore maps its
//! domain bounds `(a, b)` onto `[-1, 1]` first:
//!
//! ```math
//! s(t) = (2t - (a + b)) / (b - a)
//! ```
//!
//! The monomial basis writes the same map in centered form, `(t - c) / d` with
//! `c = (a + b) / 2` and `d = (b - a) / 2`. Both forms are exposed and agree to rounding.
use crate::{
    error::{Error, Result},
    value::{self, Value},
};

/// Maps raw x values from the domain `[a, b]` onto `[-1, 1]`.
///
/// Values outside `[a, b]` extrapolate linearly; nothing is clamped.
///
/// Deserializing goes through [`DomainScaler::new`], so stored bounds are validated the same
/// way as new ones.
///
/// # Example
/// ```
/// # use polyinterp::domain::DomainScaler;
/// let scaler = DomainScaler::new(0.0, 2.0).unwrap();
/// assert_eq!(scaler.scale(0.0), -1.0);
/// assert_eq!(scaler.scale(1.0), 0.0);
/// assert_eq!(scaler.scale(2.0), 1.0);
/// assert_eq!(scaler.scale(4.0), 3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "DomainBounds<T>")]
pub struct DomainScaler<T: Value = f64> {
    a: T,
    b: T,
}

/// Unvalidated bounds, as read from a serialized [`DomainScaler`]
#[derive(serde::Deserialize)]
struct DomainBounds<T> {
    a: T,
    b: T,
}
impl<T: Value> TryFrom<DomainBounds<T>> for DomainScaler<T> {
    type Error = Error;

    fn try_from(bounds: DomainBounds<T>) -> Result<Self> {
        Self::new(bounds.a, bounds.b)
    }
}
impl<T: Value> DomainScaler<T> {
    /// Creates a scaler for the domain `[a, b]`.
    ///
    /// # Errors
    /// Returns [`Error::DegenerateDomain`] unless both bounds are finite and `a < b`.
    pub fn new(a: T, b: T) -> Result<Self> {
        if !a.finite() || !b.finite() || a >= b {
            return Err(Error::DegenerateDomain(a.to_string(), b.to_string()));
        }

        Ok(Self { a, b })
    }

    /// Creates a scaler spanning `min(x)..=max(x)` of the given samples.
    ///
    /// # Errors
    /// - [`Error::NoData`] if `x` is empty.
    /// - [`Error::DegenerateDomain`] if all values are equal.
    pub fn from_samples(x: &[T]) -> Result<Self> {
        let (a, b) = value::bounds(x.iter().copied()).ok_or(Error::NoData)?;
        Self::new(a, b)
    }

    /// Returns the domain bounds `(a, b)`.
    pub fn bounds(&self) -> (T, T) {
        (self.a, self.b)
    }

    /// Midpoint of the domain, `(a + b) / 2`.
    pub fn center(&self) -> T {
        (self.a + self.b) / T::two()
    }

    /// Half the width of the domain, `(b - a) / 2`.
    pub fn half_width(&self) -> T {
        (self.b - self.a) / T::two()
    }

    /// Returns true if `t` lies within `[a, b]`.
    pub fn contains(&self, t: T) -> bool {
        (self.a..=self.b).contains(&t)
    }

    /// Maps `t` into the scaled variable, `(2t - (a + b)) / (b - a)`.
    ///
    /// Evaluated as `((t - a) - (b - t)) / (b - a)`, which maps the endpoints to exactly ±1
    /// however far the domain sits from the origin.
    pub fn scale(&self, t: T) -> T {
        ((t - self.a) - (self.b - t)) / (self.b - self.a)
    }

    /// Maps `t` into the scaled variable using the centered form, `(t - c) / d`.
    pub fn scale_centered(&self, t: T) -> T {
        (t - self.center()) / self.half_width()
    }

    /// Maps a scaled value back into the domain, `c + d·u`.
    pub fn unscale(&self, u: T) -> T {
        self.center() + self.half_width() * u
    }

    /// Expands coefficients of a power series in the scaled variable into powers of raw `x`.
    ///
    /// The coefficients are in ascending order (constant term first).
    /// Uses `s = αx + β` with `α = 1/d` and `β = -c/d`, expanding each `(αx + β)^i` binomially.
    #[must_use]
    pub fn expand_scaled_powers(&self, coefs: &[T]) -> Vec<T> {
        let alpha = T::one() / self.half_width();
        let beta = -self.center() * alpha;

        let mut raw = vec![T::zero(); coefs.len()];

        // Row i of the expansion holds the coefficients of (αx + β)^i
        let mut row = vec![T::one()];
        for (i, &c) in coefs.iter().enumerate() {
            if i > 0 {
                let mut next = vec![T::zero(); i + 1];
                for (j, &r) in row.iter().enumerate() {
                    next[j] += r * beta;
                    next[j + 1] += r * alpha;
                }
                row = next;
            }

            for (j, &r) in row.iter().enumerate() {
                raw[j] += c * r;
            }
        }

        raw
    }
}

impl<T: Value> std::fmt::Display for DomainScaler<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "T[ {}..{} -> -1..1 ]", self.a, self.b)
    }
}
