//! Chebyshev nodes of the first kind.
//!
//! The nodes of order `n` are the roots of `Tₙ`:
//!
//! ```math
//! uₖ = cos((2k - 1)π / 2n)      for k = 1..=n
//! ```
//!
//! mapped from `[-1, 1]` onto `[a, b]` with `x = (a + b)/2 + (b - a)/2 · u`. Sampling at these
//! points instead of evenly spaced ones keeps high-degree interpolants from oscillating near
//! the ends of the domain.
use crate::{
    domain::DomainScaler,
    error::{Error, Result},
    value::Value,
};

/// Generates `n` Chebyshev nodes over `[a, b]`.
///
/// The nodes come out in decreasing order, from just below `b` to just above `a`. They
/// depend only on `a`, `b` and `n`, never on any sample set. For odd `n` the middle node is
/// exactly the midpoint of the domain.
///
/// # Errors
/// - [`Error::DegenerateDomain`] unless `a < b` and both are finite
/// - [`Error::DimensionMismatch`] if `n` is zero
///
/// # Example
/// ```
/// # use polyinterp::chebyshev_nodes;
/// let nodes = chebyshev_nodes(0.0, 2.0, 3).unwrap();
/// assert_eq!(nodes.len(), 3);
/// assert_eq!(nodes[1], 1.0);
/// assert!(nodes[0] > nodes[1] && nodes[1] > nodes[2]);
/// ```
pub fn chebyshev_nodes<T: Value>(a: T, b: T, n: usize) -> Result<Vec<T>> {
    let scaler = DomainScaler::new(a, b)?;
    if n == 0 {
        return Err(Error::DimensionMismatch {
            requested: 0,
            min: 1,
            max: None,
        });
    }

    let two_n = T::from_positive_int(2 * n);
    let nodes = (1..=n)
        .map(|k| {
            let tk1 = 2 * k - 1;

            // cos(π/2) is not exactly zero
            let u = if tk1 == n {
                T::zero()
            } else {
                (T::pi() * T::from_positive_int(tk1) / two_n).cos()
            };

            nalgebra::RealField::clamp(scaler.unscale(u), a, b)
        })
        .collect::<Vec<_>>();

    log::trace!("{n} Chebyshev nodes over {scaler}: {nodes:?}");
    Ok(nodes)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::{assert_all_close, assert_close};

    #[test]
    fn test_count_and_bounds() {
        for n in 1..=40 {
            let nodes = chebyshev_nodes::<f64>(-3.5, 12.0, n).unwrap();
            assert_eq!(nodes.len(), n);
            assert!(nodes.iter().all(|x| (-3.5..=12.0).contains(x)));
        }
    }

    #[test]
    fn test_decreasing() {
        let nodes = chebyshev_nodes(0.0, 1.0, 9).unwrap();
        assert!(nodes.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_symmetric() {
        for n in [1, 2, 5, 8, 11] {
            let nodes = chebyshev_nodes::<f64>(10.0, 20.0, n).unwrap();
            for (lo, hi) in nodes.iter().zip(nodes.iter().rev()) {
                assert_close!(lo + hi, 30.0, tol = 1e-12);
            }

            if n % 2 == 1 {
                assert_eq!(nodes[n / 2], 15.0);
            }
        }
    }

    #[test]
    fn test_known_values() {
        // ±√3/2 and 0 on [-1, 1]
        let half_root3 = 3.0_f64.sqrt() / 2.0;
        let nodes = chebyshev_nodes(-1.0, 1.0, 3).unwrap();
        assert_all_close!(nodes, [half_root3, 0.0, -half_root3], tol = 1e-15);

        // Single node is the midpoint
        assert_eq!(chebyshev_nodes(0.0, 2.0, 1).unwrap(), vec![1.0]);
    }

    #[test]
    fn test_roots_of_tn() {
        let n = 6;
        let scaler = DomainScaler::<f64>::new(0.0, 2.0).unwrap();
        for x in chebyshev_nodes(0.0, 2.0, n).unwrap() {
            let u: f64 = scaler.scale(x);
            let tn = (n as f64 * u.acos()).cos();
            assert_close!(tn, 0.0, tol = 1e-12);
        }
    }

    #[test]
    fn test_invalid() {
        assert!(matches!(
            chebyshev_nodes(1.0, 1.0, 3),
            Err(Error::DegenerateDomain(_, _))
        ));
        assert!(matches!(
            chebyshev_nodes(2.0, 1.0, 3),
            Err(Error::DegenerateDomain(_, _))
        ));
        assert!(matches!(
            chebyshev_nodes(0.0, f64::INFINITY, 3),
            Err(Error::DegenerateDomain(_, _))
        ));
        assert!(matches!(
            chebyshev_nodes(0.0, 1.0, 0),
            Err(Error::DimensionMismatch { requested: 0, .. })
        ));
    }
}
