use std::ops::RangeInclusive;

use nalgebra::{DMatrix, DVector, SVD};

use crate::{
    basis::{Basis, ChebyshevBasis, MonomialBasis},
    display::PolynomialDisplay,
    domain::DomainScaler,
    error::{Error, Result},
    value::{SteppedValues, Value},
};

/// Interpolant in the monomial basis of the scaled variable.
///
/// Uses the powers `1, s, s², …` where `s = (x - c) / d`, `c` is the midpoint of the sampled
/// range and `d` its half-width. Can be evaluated anywhere, including outside the samples.
pub type MonomialInterpolant<T = f64> = Interpolant<MonomialBasis<T>, T>;

/// Interpolant in the Chebyshev basis of the first kind.
///
/// Uses `Tⱼ(s) = cos(j·arccos(s))` where `s = (2x - (a + b)) / (b - a)`. Only defined inside
/// the fitted range; evaluating outside it fails with [`Error::Extrapolation`].
pub type ChebyshevInterpolant<T = f64> = Interpolant<ChebyshevBasis<T>, T>;

/// Anything that can be evaluated as a function of one variable.
///
/// Implemented by every fitted interpolant in this crate, and by the spline used to
/// resample data onto Chebyshev nodes, so callers can treat them interchangeably.
pub trait Interpolator<T: Value> {
    /// Evaluates the function at `x`.
    ///
    /// # Errors
    /// Returns an error if the function cannot be evaluated at `x`, typically
    /// [`Error::Extrapolation`].
    fn y(&self, x: T) -> Result<T>;

    /// Range of x values the function was built from.
    fn x_range(&self) -> RangeInclusive<T>;

    /// Evaluates the function at every x in order.
    ///
    /// # Errors
    /// Fails on the first x that cannot be evaluated. A NaN or infinite x is reported as
    /// [`Error::NonFiniteValue`] with its position in `x`.
    fn y_all(&self, x: &[T]) -> Result<Vec<T>> {
        x.iter()
            .enumerate()
            .map(|(i, &x)| self.y(x).map_err(|e| at_index(e, i)))
            .collect()
    }
}

/// Points a [`Error::NonFiniteValue`] from a single evaluation at its position in a sequence.
fn at_index(error: Error, index: usize) -> Error {
    match error {
        Error::NonFiniteValue { .. } => Error::NonFiniteValue { index },
        other => other,
    }
}

/// How many basis functions (or nodes) a fit should use.
///
/// Converts from `usize` and from `Option<usize>`, where `None` means one per sample:
///
/// ```
/// # use polyinterp::NodeCount;
/// assert_eq!(NodeCount::from(None), NodeCount::Samples);
/// assert_eq!(NodeCount::from(4_usize), NodeCount::Exact(4));
/// assert_eq!(NodeCount::Samples.count(7), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum NodeCount {
    /// One per sample
    #[default]
    Samples,

    /// A fixed count
    Exact(usize),
}
impl NodeCount {
    /// Resolves the count for a dataset of `samples` points.
    #[must_use]
    pub fn count(self, samples: usize) -> usize {
        match self {
            Self::Samples => samples,
            Self::Exact(n) => n,
        }
    }
}
impl From<usize> for NodeCount {
    fn from(n: usize) -> Self {
        Self::Exact(n)
    }
}
impl From<Option<usize>> for NodeCount {
    fn from(n: Option<usize>) -> Self {
        n.map_or(Self::Samples, Self::Exact)
    }
}

/// Checks a pair of sample sequences before anything is built from them.
///
/// Checks run in order, and the first failure wins:
/// - [`Error::ShapeMismatch`] if the lengths differ
/// - [`Error::NoData`] if there are no samples
/// - [`Error::NonFiniteValue`] if any x or y is NaN or infinite
///
/// # Errors
/// See above.
pub fn validate_samples<T: Value>(x: &[T], y: &[T]) -> Result<()> {
    if x.len() != y.len() {
        return Err(Error::ShapeMismatch {
            x: x.len(),
            y: y.len(),
        });
    }

    if x.is_empty() {
        return Err(Error::NoData);
    }

    let bad = x
        .iter()
        .zip(y)
        .position(|(x, y)| !x.finite() || !y.finite());
    match bad {
        Some(index) => Err(Error::NonFiniteValue { index }),
        None => Ok(()),
    }
}

/// Builds the `len(x)` by `k` design matrix for a basis.
///
/// Row `i` holds the first `k` basis functions evaluated at the scaled value of `x[i]`.
///
/// # Errors
/// - [`Error::DimensionMismatch`] if `k` is not in `1..=len(x)`
/// - [`Error::OutOfDomain`] if a sample is outside the domain of the basis
///
/// # Example
/// ```
/// # use polyinterp::{basis::{Basis, MonomialBasis}, domain::DomainScaler, fit::design_matrix};
/// let basis = MonomialBasis::from_scaler(DomainScaler::new(0.0, 2.0).unwrap());
/// let m = design_matrix(&basis, &[0.0, 1.0, 2.0], 3).unwrap();
/// assert_eq!(m.row(0).iter().copied().collect::<Vec<_>>(), vec![1.0, -1.0, 1.0]);
/// ```
pub fn design_matrix<B: Basis<T>, T: Value>(basis: &B, x: &[T], k: usize) -> Result<DMatrix<T>> {
    if k == 0 || k > x.len() {
        return Err(Error::DimensionMismatch {
            requested: k,
            min: 1,
            max: Some(x.len()),
        });
    }

    let mut matrix = DMatrix::zeros(x.len(), k);
    for (row, &x) in matrix.row_iter_mut().zip(x) {
        let u = basis.check_sample(x)?;
        basis.fill_matrix_row(u, row);
    }

    Ok(matrix)
}

/// Solves the square system `A·c = b` by LU decomposition with partial pivoting.
///
/// A pivot at or below `ε·n·max|pivot|` is treated as zero, so nearly-coincident samples
/// are reported instead of producing enormous coefficients.
///
/// # Errors
/// - [`Error::DimensionMismatch`] if `matrix` is not square or does not match `b`
/// - [`Error::SingularMatrix`] if the system has no unique, finite solution
pub fn solve_square<T: Value>(matrix: DMatrix<T>, b: &DVector<T>) -> Result<Vec<T>> {
    let (n, k) = matrix.shape();
    if n != k || b.len() != n {
        return Err(Error::DimensionMismatch {
            requested: k,
            min: n,
            max: Some(n),
        });
    }

    let lu = matrix.lu();
    let pivots = lu.u().diagonal();
    let largest = pivots
        .iter()
        .fold(T::zero(), |acc, p| nalgebra::RealField::max(acc, Value::abs(*p)));
    let cutoff = T::epsilon() * T::try_cast(n)? * largest;
    if largest == T::zero() || pivots.iter().any(|p| Value::abs(*p) <= cutoff) {
        log::debug!("Rejecting {n}x{k} system; largest pivot {largest:e}, cutoff {cutoff:e}");
        return Err(Error::SingularMatrix { n, k });
    }

    let solution = lu.solve(b).ok_or(Error::SingularMatrix { n, k })?;
    let coefficients: Vec<T> = solution.iter().copied().collect();
    if coefficients.iter().any(|c| !c.finite()) {
        return Err(Error::SingularMatrix { n, k });
    }

    Ok(coefficients)
}

/// Solves `A·c ≈ b` in the least-squares sense using the SVD of `A`.
///
/// Singular values below `ε·max(n, k)·σ_max` are discarded; if that leaves fewer than `k`
/// the columns are dependent and the fit is rejected.
///
/// # Errors
/// - [`Error::SingularMatrix`] if `A` does not have full column rank
/// - [`Error::Algebra`] if the decomposition cannot be used to solve the system
pub fn solve_least_squares<T: Value>(matrix: DMatrix<T>, b: &DVector<T>) -> Result<Vec<T>> {
    let (n, k) = matrix.shape();

    let decomp = SVD::new_unordered(matrix, true, true);

    // ~= machine_epsilon * max(size) * max_singular
    let sigma_max = decomp.singular_values.max();
    let epsilon = T::epsilon() * T::try_cast(n.max(k))? * sigma_max;
    if decomp.rank(epsilon) < k {
        return Err(Error::SingularMatrix { n, k });
    }

    let big_x = decomp.solve(b, epsilon).map_err(Error::Algebra)?;
    let coefficients: Vec<T> = big_x.iter().copied().collect();
    if coefficients.iter().any(|c| !c.finite()) {
        return Err(Error::Algebra("non-finite value in coefficients"));
    }

    Ok(coefficients)
}

/// A fitted interpolant: a basis over a captured domain, plus one coefficient per
/// basis function.
///
/// The value is immutable once built; evaluation never changes it, and the same inputs
/// always produce the same coefficients.
///
/// # Type parameters
/// - `B`: The basis, implementing [`Basis<T>`].
/// - `T`: Numeric type (default `f64`) implementing [`Value`].
///
/// # Example
/// ```
/// # use polyinterp::MonomialInterpolant;
/// let f = MonomialInterpolant::new(&[0.0_f64, 1.0, 2.0], &[1.0, 2.0, 5.0]).unwrap();
/// assert_eq!(f.coefficients().len(), 3);
/// assert!((f.y(0.5).unwrap() - 1.25).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolant<B, T: Value = f64>
where
    B: Basis<T>,
{
    basis: B,
    coefficients: Vec<T>,
    samples: usize,
}
impl<B, T: Value> Interpolant<B, T>
where
    B: Basis<T>,
{
    /// Fits an exact interpolant through every sample.
    ///
    /// The domain is taken from the smallest and largest x, and one basis function is used
    /// per sample, so the design matrix is square and the result passes through each
    /// `(x[i], y[i])`.
    ///
    /// # Errors
    /// - [`Error::ShapeMismatch`], [`Error::NoData`] or [`Error::NonFiniteValue`] for bad input
    /// - [`Error::DegenerateDomain`] if all x values are equal
    /// - [`Error::SingularMatrix`] if two samples share an x value
    pub fn new(x: &[T], y: &[T]) -> Result<Self> {
        validate_samples(x, y)?;
        let scaler = DomainScaler::from_samples(x)?;
        Self::new_on(scaler, x, y)
    }

    /// Fits an exact interpolant through every sample, over an explicit domain.
    ///
    /// Used when the samples do not reach the ends of the domain they describe, such as
    /// values taken at Chebyshev nodes, which lie strictly inside `[a, b]`.
    ///
    /// # Errors
    /// As [`Interpolant::new`], plus [`Error::OutOfDomain`] if the basis is undefined at a
    /// sample outside `scaler`.
    pub fn new_on(scaler: DomainScaler<T>, x: &[T], y: &[T]) -> Result<Self> {
        validate_samples(x, y)?;

        let basis = B::from_scaler(scaler);
        log::debug!(
            "Fitting {} interpolant through {} samples over {}",
            B::NAME,
            x.len(),
            basis.scaler()
        );

        let matrix = design_matrix(&basis, x, x.len())?;
        let b = DVector::from_column_slice(y);
        let coefficients = solve_square(matrix, &b)?;
        log::trace!("{} coefficients: {coefficients:?}", B::NAME);

        Ok(Self {
            basis,
            coefficients,
            samples: x.len(),
        })
    }

    /// Fits `k` basis functions to the samples in the least-squares sense.
    ///
    /// With `k == len(x)` this agrees with [`Interpolant::new`]; with fewer terms the result
    /// smooths the samples instead of passing through them.
    ///
    /// # Errors
    /// - [`Error::ShapeMismatch`], [`Error::NoData`] or [`Error::NonFiniteValue`] for bad input
    /// - [`Error::DimensionMismatch`] if `k` is not in `1..=len(x)`
    /// - [`Error::DegenerateDomain`] if all x values are equal
    /// - [`Error::SingularMatrix`] if fewer than `k` distinct x values exist
    pub fn least_squares(x: &[T], y: &[T], k: usize) -> Result<Self> {
        validate_samples(x, y)?;
        if k == 0 || k > x.len() {
            return Err(Error::DimensionMismatch {
                requested: k,
                min: 1,
                max: Some(x.len()),
            });
        }

        let basis = B::from_scaler(DomainScaler::from_samples(x)?);
        log::debug!(
            "Fitting {k} {} terms to {} samples over {}",
            B::NAME,
            x.len(),
            basis.scaler()
        );

        let matrix = design_matrix(&basis, x, k)?;
        let b = DVector::from_column_slice(y);
        let coefficients = solve_least_squares(matrix, &b)?;

        Ok(Self {
            basis,
            coefficients,
            samples: x.len(),
        })
    }

    /// Builds an interpolant from known coefficients.
    ///
    /// # Errors
    /// Returns [`Error::DimensionMismatch`] if `coefficients` is empty, or
    /// [`Error::NonFiniteValue`] if one of them is NaN or infinite.
    pub fn from_coefficients(scaler: DomainScaler<T>, coefficients: Vec<T>) -> Result<Self> {
        if coefficients.is_empty() {
            return Err(Error::DimensionMismatch {
                requested: 0,
                min: 1,
                max: None,
            });
        }

        if let Some(index) = coefficients.iter().position(|c| !c.finite()) {
            return Err(Error::NonFiniteValue { index });
        }

        Ok(Self {
            basis: B::from_scaler(scaler),
            samples: coefficients.len(),
            coefficients,
        })
    }

    /// Evaluates the interpolant at `x`.
    ///
    /// ```math
    /// y(x) = Σ cⱼ·φⱼ(s(x))
    /// ```
    ///
    /// # Errors
    /// - [`Error::NonFiniteValue`] if `x` is NaN or infinite
    /// - [`Error::Extrapolation`] if the basis cannot be evaluated at `x`. Monomial
    ///   interpolants accept any x; Chebyshev interpolants only accept the fitted range.
    /// - [`Error::Overflow`] if the result is too large for `T`, which can happen when a
    ///   monomial interpolant is evaluated far outside its range
    ///
    /// # Example
    /// ```
    /// # use polyinterp::{fit_chebyshev_direct, NodeCount};
    /// let f = fit_chebyshev_direct(&[0.0_f64, 1.0, 2.0], &[1.0, 2.0, 5.0], NodeCount::Samples).unwrap();
    /// assert!((f.y(1.0).unwrap() - 2.0).abs() < 1e-12);
    /// assert!(f.y(3.0).is_err());
    /// ```
    pub fn y(&self, x: T) -> Result<T> {
        if !x.finite() {
            return Err(Error::NonFiniteValue { index: 0 });
        }

        let u = self.basis.check_query(x)?;
        let y = self.basis.solve(u, &self.coefficients);
        if !y.finite() {
            return Err(Error::Overflow(x.to_string()));
        }

        Ok(y)
    }

    /// Evaluates the interpolant at multiple x values, returning `(x, y)` pairs.
    ///
    /// # Errors
    /// Fails on the first x that [`Interpolant::y`] rejects. A NaN or infinite x is reported
    /// as [`Error::NonFiniteValue`] with its position in the sequence.
    pub fn solve(&self, x: impl IntoIterator<Item = T>) -> Result<Vec<(T, T)>> {
        x.into_iter()
            .enumerate()
            .map(|(i, x)| Ok((x, self.y(x).map_err(|e| at_index(e, i))?)))
            .collect()
    }

    /// Evaluates the interpolant at evenly spaced points over a range.
    ///
    /// # Errors
    /// - [`Error::InvalidStep`] unless `step` is positive and finite
    /// - Otherwise fails on the first x that [`Interpolant::y`] rejects.
    pub fn solve_range(&self, range: RangeInclusive<T>, step: T) -> Result<Vec<(T, T)>> {
        if !step.finite() || step <= T::zero() {
            return Err(Error::InvalidStep(step.to_string()));
        }

        self.solve(SteppedValues::new(range, step))
    }

    /// Coefficients of the basis functions, lowest order first.
    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }

    /// Highest order of basis function used; one less than the number of coefficients.
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Basis the coefficients are expressed in.
    pub fn basis(&self) -> &B {
        &self.basis
    }

    /// Domain scaling captured at fit time.
    pub fn scaler(&self) -> &DomainScaler<T> {
        self.basis.scaler()
    }

    /// Range of x values the interpolant was fitted on.
    pub fn x_range(&self) -> RangeInclusive<T> {
        let (a, b) = self.scaler().bounds();
        a..=b
    }
}

impl<B, T: Value> Interpolant<B, T>
where
    B: Basis<T> + PolynomialDisplay<T>,
{
    /// Returns a human-readable equation for the interpolant.
    ///
    /// ```
    /// # use polyinterp::fit_polynomial;
    /// let f = fit_polynomial(&[0.0, 1.0, 2.0], &[1.0, 2.0, 5.0]).unwrap();
    /// assert_eq!(f.equation(), "xₛ = T[ 0..2 -> -1..1 ], y(x) = xₛ² + 2.00xₛ + 2.00");
    /// ```
    pub fn equation(&self) -> String {
        self.to_string()
    }

    /// Returns a serializable summary of the interpolant.
    pub fn properties(&self) -> FitProperties<T> {
        let (a, b) = self.scaler().bounds();
        FitProperties {
            basis: B::NAME.to_string(),
            domain: (a, b),
            degree: self.degree(),
            data_points: self.samples,
            coefficients: self.coefficients.clone(),
            equation: self.equation(),
        }
    }
}

impl<T: Value> MonomialInterpolant<T> {
    /// Coefficients of the same polynomial in powers of raw `x`, lowest order first.
    ///
    /// Expands `Σ cⱼ·((x - c) / d)ʲ`. Useful for display or for handing the polynomial to
    /// code that knows nothing about scaling, but the raw form is badly conditioned for
    /// wide or offset domains, so [`Interpolant::y`] never uses it.
    ///
    /// ```
    /// # use polyinterp::{assert_all_close, fit_polynomial};
    /// let f = fit_polynomial(&[0.0, 1.0, 2.0], &[1.0, 2.0, 5.0]).unwrap();
    /// assert_all_close!(f.raw_coefficients(), [1.0, 0.0, 1.0], tol = 1e-12);
    /// ```
    pub fn raw_coefficients(&self) -> Vec<T> {
        self.scaler().expand_scaled_powers(&self.coefficients)
    }
}

impl<B, T: Value> Interpolator<T> for Interpolant<B, T>
where
    B: Basis<T>,
{
    fn y(&self, x: T) -> Result<T> {
        Interpolant::y(self, x)
    }

    fn x_range(&self) -> RangeInclusive<T> {
        Interpolant::x_range(self)
    }
}

impl<B, T: Value> std::fmt::Display for Interpolant<B, T>
where
    B: Basis<T> + PolynomialDisplay<T>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.basis.format_polynomial(f, &self.coefficients)
    }
}

/// A summary of a fitted interpolant.
///
/// Can be serialized to JSON or other formats.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct FitProperties<T: Value> {
    /// Name of the basis family
    pub basis: String,

    /// Bounds of the fitted x range
    pub domain: (T, T),

    /// Highest order of basis function used
    pub degree: usize,

    /// Number of samples fitted
    pub data_points: usize,

    /// Coefficients of the basis functions, lowest order first
    pub coefficients: Vec<T>,

    /// Human-readable equation
    pub equation: String,
}

/// Fits an interpolating polynomial in the monomial basis of the scaled variable.
///
/// Uses one coefficient per sample, so the result passes through every `(x[i], y[i])`.
/// Samples need not be sorted.
///
/// # Errors
/// - [`Error::ShapeMismatch`] if `x` and `y` differ in length
/// - [`Error::NoData`] if there are no samples
/// - [`Error::NonFiniteValue`] if a sample is NaN or infinite
/// - [`Error::DegenerateDomain`] if all x values are equal
/// - [`Error::SingularMatrix`] if two samples share an x value
///
/// # Example
/// ```
/// # use polyinterp::fit_polynomial;
/// let f = fit_polynomial(&[0.0_f64, 1.0, 2.0], &[1.0, 2.0, 5.0]).unwrap();
/// // In the scaled variable s = x - 1 the polynomial is 2 + 2s + s²
/// assert_eq!(f.coefficients().len(), 3);
/// assert!((f.y(0.5).unwrap() - 1.25).abs() < 1e-12);
/// ```
pub fn fit_polynomial<T: Value>(x: &[T], y: &[T]) -> Result<MonomialInterpolant<T>> {
    MonomialInterpolant::new(x, y)
}

/// Fits an interpolant in the Chebyshev basis directly on the given samples.
///
/// `n` is the number of Chebyshev terms; [`NodeCount::Samples`] (or `None`) uses one per
/// sample. The system is solved exactly, so `n` must equal the number of samples; use
/// [`fit_chebyshev_least_squares`] for fewer terms.
///
/// # Errors
/// - [`Error::ShapeMismatch`], [`Error::NoData`] or [`Error::NonFiniteValue`] for bad input
/// - [`Error::DimensionMismatch`] if `n` differs from the number of samples
/// - [`Error::DegenerateDomain`] if all x values are equal
/// - [`Error::SingularMatrix`] if two samples share an x value
///
/// # Example
/// ```
/// # use polyinterp::fit_chebyshev_direct;
/// let f = fit_chebyshev_direct(&[0.0_f64, 1.0, 2.0], &[1.0, 2.0, 5.0], None).unwrap();
/// // 2.5·T₀ + 2·T₁ + 0.5·T₂
/// assert!((f.coefficients()[2] - 0.5).abs() < 1e-12);
/// ```
pub fn fit_chebyshev_direct<T: Value>(
    x: &[T],
    y: &[T],
    n: impl Into<NodeCount>,
) -> Result<ChebyshevInterpolant<T>> {
    validate_samples(x, y)?;

    let k = n.into().count(x.len());
    if k != x.len() {
        return Err(Error::DimensionMismatch {
            requested: k,
            min: x.len(),
            max: Some(x.len()),
        });
    }

    ChebyshevInterpolant::new(x, y)
}

/// Fits `n` Chebyshev terms to the samples in the least-squares sense.
///
/// # Errors
/// - [`Error::ShapeMismatch`], [`Error::NoData`] or [`Error::NonFiniteValue`] for bad input
/// - [`Error::DimensionMismatch`] if `n` is not in `1..=len(x)`
/// - [`Error::DegenerateDomain`] if all x values are equal
/// - [`Error::SingularMatrix`] if fewer than `n` distinct x values exist
pub fn fit_chebyshev_least_squares<T: Value>(
    x: &[T],
    y: &[T],
    n: impl Into<NodeCount>,
) -> Result<ChebyshevInterpolant<T>> {
    let k = n.into().count(x.len());
    ChebyshevInterpolant::least_squares(x, y, k)
}
