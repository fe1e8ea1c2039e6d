//! Chebyshev fits through resampled data.
//!
//! Measurements are rarely taken at Chebyshev nodes. This module fits an auxiliary
//! interpolant (a natural cubic spline by default) through the raw samples, evaluates it at
//! `n` Chebyshev nodes over the same bounds, and fits a Chebyshev interpolant of degree
//! `n - 1` through those synthetic samples, as if the data had been measured at the nodes.
//!
//! The result is only as good as the auxiliary interpolant, so it no longer passes exactly
//! through the original samples. Use [`crate::fit_chebyshev_direct`] when it must.
use std::ops::RangeInclusive;

use crate::{
    domain::DomainScaler,
    error::{Error, Result},
    fit::{validate_samples, ChebyshevInterpolant, Interpolator, NodeCount},
    nodes::chebyshev_nodes,
    spline::{NaturalSplineFitter, SplineFitter},
    value::Value,
};

/// A Chebyshev interpolant fitted through values resampled at Chebyshev nodes.
///
/// Keeps the nodes and the synthetic values alongside the interpolant, so callers can
/// report where the data was resampled.
#[derive(Debug, Clone, PartialEq)]
pub struct ResampledFit<T: Value = f64> {
    nodes: Vec<T>,
    samples: Vec<T>,
    interpolant: ChebyshevInterpolant<T>,
}
impl<T: Value> ResampledFit<T> {
    /// Chebyshev nodes the data was resampled at, in decreasing order.
    pub fn nodes(&self) -> &[T] {
        &self.nodes
    }

    /// Values of the auxiliary interpolant at each node.
    pub fn samples(&self) -> &[T] {
        &self.samples
    }

    /// The fitted Chebyshev interpolant.
    pub fn interpolant(&self) -> &ChebyshevInterpolant<T> {
        &self.interpolant
    }

    /// Consumes the fit, returning only the Chebyshev interpolant.
    pub fn into_interpolant(self) -> ChebyshevInterpolant<T> {
        self.interpolant
    }

    /// Chebyshev coefficients, lowest order first.
    pub fn coefficients(&self) -> &[T] {
        self.interpolant.coefficients()
    }

    /// Evaluates the Chebyshev interpolant at `x`.
    ///
    /// # Errors
    /// Returns [`Error::Extrapolation`] if `x` is outside the bounds of the original samples.
    pub fn y(&self, x: T) -> Result<T> {
        self.interpolant.y(x)
    }
}

impl<T: Value> Interpolator<T> for ResampledFit<T> {
    fn y(&self, x: T) -> Result<T> {
        self.interpolant.y(x)
    }

    fn x_range(&self) -> RangeInclusive<T> {
        self.interpolant.x_range()
    }
}

impl<T: Value> std::fmt::Display for ResampledFit<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.interpolant)
    }
}

/// Fits a Chebyshev interpolant through a natural cubic spline resampled at `n` nodes.
///
/// `n` is the number of Chebyshev nodes; [`NodeCount::Samples`] (or `None`) uses one per
/// sample. Any `n ≥ 1` is accepted, since the resampled system is always square.
///
/// # Errors
/// - [`Error::ShapeMismatch`], [`Error::NoData`] or [`Error::NonFiniteValue`] for bad input
/// - [`Error::DimensionMismatch`] if `n` is zero
/// - [`Error::DegenerateDomain`] if all x values are equal
/// - [`Error::SingularMatrix`] if the spline cannot be built, e.g. two samples share an x value
///
/// # Example
/// ```
/// # use polyinterp::fit_chebyshev_resampled;
/// let fit = fit_chebyshev_resampled(&[0.0_f64, 1.0, 2.0], &[1.0, 2.0, 5.0], 3_usize).unwrap();
/// assert_eq!(fit.nodes().len(), 3);
/// assert!((fit.y(1.0).unwrap() - 2.0).abs() < 0.25);
/// ```
pub fn fit_chebyshev_resampled<T: Value>(
    x: &[T],
    y: &[T],
    n: impl Into<NodeCount>,
) -> Result<ResampledFit<T>> {
    fit_chebyshev_resampled_with(&NaturalSplineFitter, x, y, n)
}

/// Fits a Chebyshev interpolant through any auxiliary interpolant resampled at `n` nodes.
///
/// See [`fit_chebyshev_resampled`]; this variant lets the caller choose how the raw samples
/// are interpolated before resampling.
///
/// # Errors
/// As [`fit_chebyshev_resampled`], plus any error from `fitter`.
pub fn fit_chebyshev_resampled_with<T: Value, F: SplineFitter<T>>(
    fitter: &F,
    x: &[T],
    y: &[T],
    n: impl Into<NodeCount>,
) -> Result<ResampledFit<T>> {
    validate_samples(x, y)?;

    let n = n.into().count(x.len());
    if n == 0 {
        return Err(Error::DimensionMismatch {
            requested: 0,
            min: 1,
            max: None,
        });
    }

    let scaler = DomainScaler::from_samples(x)?;
    let (a, b) = scaler.bounds();

    let auxiliary = fitter.fit(x, y)?;
    let nodes = chebyshev_nodes(a, b, n)?;
    let samples = auxiliary.y_all(&nodes)?;
    log::debug!("Resampled {} samples onto {n} Chebyshev nodes over {scaler}", x.len());

    // The nodes sit strictly inside [a, b]; keep the original bounds so the result is
    // defined over the whole sampled range
    let interpolant = ChebyshevInterpolant::new_on(scaler, &nodes, &samples)?;

    Ok(ResampledFit {
        nodes,
        samples,
        interpolant,
    })
}
