//! Basis families for interpolation
//!
//! This module defines the [`Basis`] trait, which abstracts a family of basis functions
//! evaluated in the scaled variable of a [`DomainScaler`]. A fit builds one row of the
//! design matrix per sample from these functions, and an [`crate::Interpolant`] sums
//! them weighted by its coefficients.
//!
//! # Provided Bases
//! - [`MonomialBasis`]: Powers of the scaled variable, i.e., 1, s, s², … sⁿ⁻¹. Defined
//!   everywhere, so interpolants built on it extrapolate.
//! - [`ChebyshevBasis`]: Chebyshev polynomials of the first kind, `Tⱼ(s) = cos(j·arccos(s))`.
//!   Only defined on `[-1, 1]`, so interpolants built on it refuse to extrapolate.
//!
//! # Selecting a Basis
//! - Both bases work in the scaled variable, so conditioning does not depend on where the
//!   samples sit on the x axis.
//! - [`ChebyshevBasis`] oscillates less between samples at higher degrees, especially when
//!   the samples are taken at Chebyshev nodes (see [`crate::nodes`]).
use nalgebra::MatrixViewMut;

use crate::{domain::DomainScaler, error::Result, value::Value};

pub(crate) mod monomial;
pub use monomial::MonomialBasis;

pub(crate) mod chebyshev;
pub use chebyshev::ChebyshevBasis;

/// A family of basis functions over a scaled domain.
///
/// Implementations carry the [`DomainScaler`] captured at fit time, so the same basis
/// value is used to build the design matrix and, later, to evaluate the interpolant.
///
/// # Type Parameters
/// - `T`: The numeric type used for coefficients and evaluation (e.g., `f64`).
pub trait Basis<T: Value>: Sized + Clone + std::fmt::Debug + Send + Sync {
    /// Short human-readable name of the family, used in logs and reports
    const NAME: &'static str;

    /// Create a new basis over the given domain
    fn from_scaler(scaler: DomainScaler<T>) -> Self;

    /// Returns the domain scaler captured by this basis
    fn scaler(&self) -> &DomainScaler<T>;

    /// Maps a raw x value into the scaled variable used by the basis functions.
    fn normalize_x(&self, x: T) -> T {
        self.scaler().scale(x)
    }

    /// Validates a raw sample before it is written into a design matrix and returns its
    /// scaled value.
    ///
    /// Membership in the domain is decided on `x`, not on the scaled value, so a sample
    /// inside `[a, b]` is never rejected because scaling rounded it past ±1.
    ///
    /// # Errors
    /// Returns [`crate::error::Error::OutOfDomain`] if the basis is undefined at `x`.
    fn check_sample(&self, x: T) -> Result<T> {
        Ok(self.normalize_x(x))
    }

    /// Validates a raw query point before evaluation and returns its scaled value.
    ///
    /// # Errors
    /// Returns [`crate::error::Error::Extrapolation`] if the basis cannot be evaluated at `x`.
    fn check_query(&self, x: T) -> Result<T> {
        Ok(self.normalize_x(x))
    }

    /// Populates a row of the design matrix with every basis function evaluated at `u`.
    ///
    /// `u` is already scaled and validated by the caller.
    fn fill_matrix_row<R: nalgebra::Dim, C: nalgebra::Dim, RS: nalgebra::Dim, CS: nalgebra::Dim>(
        &self,
        u: T,
        row: MatrixViewMut<T, R, C, RS, CS>,
    );

    /// Evaluates the jth basis function at the scaled value `u`.
    ///
    /// This is the only evaluation path; [`Basis::solve`] sums over it.
    fn solve_function(&self, j: usize, u: T) -> T;

    /// Evaluates `Σ cⱼ·φⱼ(u)` at the scaled value `u`.
    fn solve(&self, u: T, coefficients: &[T]) -> T {
        coefficients
            .iter()
            .enumerate()
            .fold(T::zero(), |acc, (j, &c)| acc + c * self.solve_function(j, u))
    }
}
