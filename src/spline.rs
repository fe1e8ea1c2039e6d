//! Natural cubic splines.
//!
//! A spline interpolates each pair of neighbouring samples with its own cubic, joined so the
//! curve and its first two derivatives are continuous. The natural boundary condition sets
//! the second derivative to zero at both ends.
//!
//! Splines are the third basis offered for comparison, and the default auxiliary interpolant
//! when resampling data onto Chebyshev nodes (see [`crate::resample`]).
use std::ops::RangeInclusive;

use nalgebra::{DMatrix, DVector};

use crate::{
    domain::DomainScaler,
    error::{Error, Result},
    fit::{solve_square, validate_samples, Interpolator},
    value::Value,
};

/// Builds an interpolator from a set of samples.
///
/// The resampling bridge is generic over this trait, so any interpolator that can be fitted
/// to raw samples can stand in for the default [`NaturalSplineFitter`].
pub trait SplineFitter<T: Value> {
    /// Interpolator produced by the fit
    type Output: Interpolator<T>;

    /// Fits an interpolator through the samples.
    ///
    /// # Errors
    /// Returns an error if the samples cannot be interpolated.
    fn fit(&self, x: &[T], y: &[T]) -> Result<Self::Output>;
}

/// Fits [`NaturalCubicSpline`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalSplineFitter;
impl<T: Value> SplineFitter<T> for NaturalSplineFitter {
    type Output = NaturalCubicSpline<T>;

    fn fit(&self, x: &[T], y: &[T]) -> Result<Self::Output> {
        NaturalCubicSpline::new(x, y)
    }
}

/// Piecewise cubic interpolant with zero curvature at both ends.
///
/// Stores the sorted knots, their values, and the second derivative `Mᵢ` at each knot.
/// Between knots `xᵢ` and `xᵢ₊₁`, with `h = xᵢ₊₁ - xᵢ`, `A = (xᵢ₊₁ - x)/h` and `B = 1 - A`:
///
/// ```math
/// S(x) = A·yᵢ + B·yᵢ₊₁ + ((A³ - A)·Mᵢ + (B³ - B)·Mᵢ₊₁)·h²/6
/// ```
///
/// # Example
/// ```
/// # use polyinterp::{fit_cubic_spline, Interpolator};
/// let s = fit_cubic_spline(&[0.0_f64, 1.0, 2.0], &[1.0, 2.0, 5.0]).unwrap();
/// assert_eq!(s.y(1.0).unwrap(), 2.0);
/// assert!((s.y(0.5).unwrap() - 1.3125).abs() < 1e-12);
/// ```
///
/// A deserialized spline is refitted from its knots and values, so it is held to the same
/// checks as [`NaturalCubicSpline::new`] and its curvature always matches them.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "SplineKnots<T>")]
pub struct NaturalCubicSpline<T: Value = f64> {
    knots: Vec<T>,
    values: Vec<T>,
    curvature: Vec<T>,
}

/// Knots and values read from a serialized [`NaturalCubicSpline`]
#[derive(serde::Deserialize)]
struct SplineKnots<T> {
    knots: Vec<T>,
    values: Vec<T>,
}
impl<T: Value> TryFrom<SplineKnots<T>> for NaturalCubicSpline<T> {
    type Error = Error;

    fn try_from(stored: SplineKnots<T>) -> Result<Self> {
        Self::new(&stored.knots, &stored.values)
    }
}
impl<T: Value> NaturalCubicSpline<T> {
    /// Fits a natural cubic spline through the samples, which need not be sorted.
    ///
    /// # Errors
    /// - [`Error::ShapeMismatch`], [`Error::NoData`] or [`Error::NonFiniteValue`] for bad input
    /// - [`Error::DegenerateDomain`] if all x values are equal
    /// - [`Error::SingularMatrix`] if two samples share an x value
    pub fn new(x: &[T], y: &[T]) -> Result<Self> {
        validate_samples(x, y)?;
        DomainScaler::from_samples(x)?;

        let n = x.len();
        let mut pairs: Vec<(T, T)> = x.iter().copied().zip(y.iter().copied()).collect();
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        if pairs.windows(2).any(|w| w[0].0 == w[1].0) {
            return Err(Error::SingularMatrix { n, k: n });
        }

        let (knots, values): (Vec<T>, Vec<T>) = pairs.into_iter().unzip();
        let curvature = Self::natural_curvature(&knots, &values)?;
        log::debug!("Fitted natural cubic spline through {n} knots");

        Ok(Self {
            knots,
            values,
            curvature,
        })
    }

    /// Solves the tridiagonal system for the interior second derivatives.
    fn natural_curvature(x: &[T], y: &[T]) -> Result<Vec<T>> {
        let n = x.len();
        let mut curvature = vec![T::zero(); n];
        if n < 3 {
            return Ok(curvature);
        }

        let six = T::from_positive_int(6);
        let m = n - 2;
        let mut matrix = DMatrix::zeros(m, m);
        let mut rhs = DVector::zeros(m);
        for r in 0..m {
            let i = r + 1;
            let h0 = x[i] - x[i - 1];
            let h1 = x[i + 1] - x[i];

            matrix[(r, r)] = T::two() * (h0 + h1);
            if r > 0 {
                matrix[(r, r - 1)] = h0;
            }
            if r + 1 < m {
                matrix[(r, r + 1)] = h1;
            }

            rhs[r] = six * ((y[i + 1] - y[i]) / h1 - (y[i] - y[i - 1]) / h0);
        }

        let interior = solve_square(matrix, &rhs)?;
        curvature[1..=m].copy_from_slice(&interior);
        Ok(curvature)
    }

    /// Sorted knot positions.
    pub fn knots(&self) -> &[T] {
        &self.knots
    }

    /// Values at the knots, in knot order.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Second derivative at each knot; zero at both ends.
    pub fn curvature(&self) -> &[T] {
        &self.curvature
    }

    fn segment(&self, x: T) -> usize {
        let last = self.knots.len() - 1;
        let idx = self.knots.partition_point(|&k| k <= x);
        idx.clamp(1, last) - 1
    }
}

impl<T: Value> Interpolator<T> for NaturalCubicSpline<T> {
    fn y(&self, x: T) -> Result<T> {
        if !x.finite() {
            return Err(Error::NonFiniteValue { index: 0 });
        }

        let (a, b) = (self.knots[0], self.knots[self.knots.len() - 1]);
        if !(a..=b).contains(&x) {
            return Err(Error::Extrapolation(a.to_string(), b.to_string()));
        }

        let i = self.segment(x);
        let (x0, x1) = (self.knots[i], self.knots[i + 1]);
        let h = x1 - x0;
        let wa = (x1 - x) / h;
        let wb = (x - x0) / h;

        let linear = wa * self.values[i] + wb * self.values[i + 1];
        let bend = (Value::powi(wa, 3) - wa) * self.curvature[i]
            + (Value::powi(wb, 3) - wb) * self.curvature[i + 1];
        Ok(linear + bend * h * h / T::from_positive_int(6))
    }

    fn x_range(&self) -> RangeInclusive<T> {
        self.knots[0]..=self.knots[self.knots.len() - 1]
    }
}

/// Fits a natural cubic spline through the samples.
///
/// # Errors
/// See [`NaturalCubicSpline::new`].
pub fn fit_cubic_spline<T: Value>(x: &[T], y: &[T]) -> Result<NaturalCubicSpline<T>> {
    NaturalCubicSpline::new(x, y)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::{assert_all_close, assert_close, assert_interpolates, value::SteppedValues};

    #[test]
    fn test_three_points() {
        // M₁ = 3, so S(x) = 0.5x³ + 1 + 0.5x on [0, 1]
        let s = fit_cubic_spline(&[0.0, 1.0, 2.0], &[1.0, 2.0, 5.0]).unwrap();
        assert_all_close!(s.curvature(), [0.0, 3.0, 0.0], tol = 1e-12);
        assert_close!(s.y(0.5).unwrap(), 1.3125, tol = 1e-12);
        assert_close!(s.y(1.5).unwrap(), 3.3125, tol = 1e-12);
    }

    #[test]
    fn test_passes_through_knots() {
        let x = [3.0, -1.0, 0.5, 7.0, 2.0, 4.5];
        let y = [2.0, 0.0, -1.5, 4.0, 3.5, 1.0];
        let s = fit_cubic_spline(&x, &y).unwrap();
        assert_interpolates!(s, &x, &y, 1e-12);
        assert_eq!(s.knots(), &[-1.0, 0.5, 2.0, 3.0, 4.5, 7.0]);
        assert_eq!(s.x_range(), -1.0..=7.0);
    }

    #[test]
    fn test_reproduces_lines() {
        let x = [0.0, 1.0, 3.0, 4.0, 8.0];
        let y: Vec<f64> = x.iter().map(|x| 2.0 * x - 1.0).collect();
        let s = fit_cubic_spline(&x, &y).unwrap();
        for t in SteppedValues::linspace(0.0..=8.0, 33) {
            assert_close!(s.y(t).unwrap(), 2.0 * t - 1.0, tol = 1e-12);
        }
    }

    #[test]
    fn test_two_points_is_linear() {
        let s = fit_cubic_spline(&[1.0, 3.0], &[10.0, 20.0]).unwrap();
        assert_close!(s.y(2.0).unwrap(), 15.0, tol = 1e-12);
    }

    #[test]
    fn test_continuous_at_knots() {
        let s = fit_cubic_spline(&[0.0, 1.0, 2.0, 4.0], &[0.0, 1.0, 0.0, 2.0]).unwrap();
        for knot in [1.0, 2.0] {
            let left = s.y(knot - 1e-9).unwrap();
            let right = s.y(knot + 1e-9).unwrap();
            assert_close!(left, right, tol = 1e-6);
        }
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            fit_cubic_spline(&[0.0, 1.0, 2.0], &[1.0, 2.0, 5.0]).unwrap().y(2.5),
            Err(Error::Extrapolation(_, _))
        ));
        assert_eq!(
            fit_cubic_spline(&[0.0, 1.0, 1.0], &[1.0, 2.0, 3.0]),
            Err(Error::SingularMatrix { n: 3, k: 3 })
        );
        assert!(matches!(
            fit_cubic_spline(&[2.0, 2.0], &[1.0, 2.0]),
            Err(Error::DegenerateDomain(_, _))
        ));
        assert_eq!(fit_cubic_spline::<f64>(&[], &[]), Err(Error::NoData));

        let s = fit_cubic_spline(&[0.0, 1.0, 2.0], &[1.0, 2.0, 5.0]).unwrap();
        assert_eq!(s.y(f64::NAN), Err(Error::NonFiniteValue { index: 0 }));
        assert_eq!(
            s.y_all(&[0.5, 1.0, f64::INFINITY]),
            Err(Error::NonFiniteValue { index: 2 })
        );
    }

    #[test]
    fn test_serde_refits() {
        let s = fit_cubic_spline(&[0.0, 1.0, 2.0], &[1.0, 2.0, 5.0]).unwrap();
        let json = serde_json::to_string(&s).unwrap();
        let back: NaturalCubicSpline = serde_json::from_str(&json).unwrap();
        assert_eq!(back.knots(), s.knots());
        assert_eq!(back.values(), s.values());
        assert_all_close!(back.curvature(), [0.0, 3.0, 0.0], tol = 1e-12);
        assert_close!(back.y(0.5).unwrap(), 1.3125, tol = 1e-12);

        // Stored curvature is ignored in favour of a refit
        let tampered = r#"{"knots":[0.0,1.0,2.0],"values":[1.0,2.0,5.0],"curvature":[9.0]}"#;
        let back: NaturalCubicSpline = serde_json::from_str(tampered).unwrap();
        assert_all_close!(back.curvature(), [0.0, 3.0, 0.0], tol = 1e-12);
    }

    #[test]
    fn test_serde_rejects_invalid_knots() {
        for (bad, message) in [
            (r#"{"knots":[],"values":[],"curvature":[]}"#, "No samples"),
            (r#"{"knots":[0.0,1.0],"values":[1.0],"curvature":[0.0,0.0]}"#, "same length"),
            (r#"{"knots":[1.0,1.0],"values":[1.0,2.0],"curvature":[0.0,0.0]}"#, "Cannot scale"),
        ] {
            let err = serde_json::from_str::<NaturalCubicSpline>(bad).unwrap_err();
            assert!(err.to_string().contains(message), "{err}");
        }
    }

    #[test]
    fn test_fitter() {
        let s = NaturalSplineFitter.fit(&[0.0, 1.0, 2.0], &[1.0, 2.0, 5.0]).unwrap();
        assert_eq!(s.y(2.0).unwrap(), 5.0);
    }
}
