//! # Polyinterp
//! ## Estimating sensor values between measurements
//!
//! Sensors hand you a handful of `(x, y)` readings; you usually want to know what they would
//! have read somewhere in between. This crate fits an interpolating function through those
//! readings with one of several competing bases, so the results can be compared:
//!
//! - A polynomial in the monomial basis: [`fit_polynomial`]
//! - A polynomial in the Chebyshev basis, solved directly on the samples: [`fit_chebyshev_direct`]
//! - A Chebyshev polynomial fitted after resampling the data at Chebyshev nodes: [`fit_chebyshev_resampled`]
//! - A natural cubic spline: [`fit_cubic_spline`]
//!
//! ```rust
//! # use polyinterp::{fit_polynomial, fit_chebyshev_direct, fit_chebyshev_resampled};
//! let x = [0.0_f64, 1.0, 2.0];
//! let y = [1.0, 2.0, 5.0];
//!
//! let mono = fit_polynomial(&x, &y).unwrap();
//! let cheb = fit_chebyshev_direct(&x, &y, None).unwrap();
//! let resampled = fit_chebyshev_resampled(&x, &y, 3_usize).unwrap();
//!
//! assert!((mono.y(0.5).unwrap() - 1.25).abs() < 1e-12);
//! assert!((cheb.y(0.5).unwrap() - 1.25).abs() < 1e-12);
//! println!("Resampled at {:?}: {resampled}", resampled.nodes());
//! ```
//!
//! # Core Concepts
//! - An [`Interpolant`] is a fitted function: a [`basis::Basis`] over a captured domain plus
//!   one coefficient per basis function.
//!     - It passes through every sample it was fitted on.
//!     - It never changes once built, and the same samples always give the same coefficients.
//! - Every fit first maps its domain `[a, b]` onto `[-1, 1]` with a [`domain::DomainScaler`].
//!     - Raw powers of `x` are badly conditioned as soon as the samples sit far from zero;
//!       the scaled variable keeps the linear system well behaved.
//! - [`MonomialInterpolant`]s can be evaluated anywhere, including outside the samples.
//! - [`ChebyshevInterpolant`]s refuse to extrapolate; see [`Error::Extrapolation`].
//! - [`chebyshev_nodes`] generates near-optimal sample positions for a domain.
//!
//! # Implementation Details
//!
//! Linear algebra is done with `nalgebra`. Square systems are solved by LU decomposition;
//! least-squares fits use the SVD. Failures are reported through [`Error`], and progress is
//! logged through the `log` facade, so install any logger to see it.
//!
//! # Features
//! - `parallel`: fit many sample sets at once on the rayon thread pool, see [`batch`].
//!
//! # Testing utilities
//!
//! This crate includes assertion macros for checking interpolants. See [`test`].
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::needless_range_loop)] // The worst clippy lint
#![allow(clippy::cast_precision_loss)] // Sample counts are small
#![allow(clippy::similar_names)]
#![allow(clippy::must_use_candidate)]


pub mod basis;
pub mod batch;
pub mod display;
pub mod domain;
pub mod error;
pub mod fit;
pub mod nodes;
pub mod resample;
pub mod spline;
pub mod value;

pub use error::{Error, Result};
pub use fit::{
    fit_chebyshev_direct, fit_chebyshev_least_squares, fit_polynomial, ChebyshevInterpolant,
    FitProperties, Interpolant, Interpolator, MonomialInterpolant, NodeCount,
};
pub use nodes::chebyshev_nodes;
pub use resample::{fit_chebyshev_resampled, fit_chebyshev_resampled_with, ResampledFit};
pub use spline::{fit_cubic_spline, NaturalCubicSpline, NaturalSplineFitter, SplineFitter};

pub use nalgebra;
