use nalgebra::MatrixViewMut;

use crate::{
    basis::Basis,
    display::{self, Sign, DEFAULT_PRECISION},
    domain::DomainScaler,
    error::{Error, Result},
    value::Value,
};

/// Chebyshev basis of the first kind over a scaled domain.
///
/// The basis functions are the Chebyshev polynomials evaluated in closed form:
///
/// ```text
/// Tⱼ(s) = cos(j·arccos(s))      where s = (2x - (a + b)) / (b - a)
/// ```
///
/// They form an orthogonal family on `[-1, 1]` and are the natural partner of Chebyshev
/// nodes, which minimise the interpolation error bound and suppress Runge's phenomenon.
///
/// The closed form is undefined for `|s| > 1`, so:
/// - building a design matrix from a sample outside the domain fails with [`Error::OutOfDomain`]
/// - evaluating outside the fitted domain fails with [`Error::Extrapolation`]
///
/// Points inside `[a, b]` are always accepted; their scaled value is clamped onto `[-1, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChebyshevBasis<T: Value = f64> {
    scaler: DomainScaler<T>,
}
impl<T: Value> ChebyshevBasis<T> {
    /// Scales a point already known to lie in `[a, b]`.
    fn scale_inside(&self, x: T) -> T {
        let u = self.normalize_x(x);
        if Value::abs(u) > T::one() {
            log::trace!("Clamping scaled value {u} of x = {x} onto [-1, 1]");
        }

        nalgebra::RealField::clamp(u, -T::one(), T::one())
    }
}
impl<T: Value> Basis<T> for ChebyshevBasis<T> {
    const NAME: &'static str = "chebyshev";

    fn from_scaler(scaler: DomainScaler<T>) -> Self {
        Self { scaler }
    }

    fn scaler(&self) -> &DomainScaler<T> {
        &self.scaler
    }

    fn check_sample(&self, x: T) -> Result<T> {
        if !self.scaler.contains(x) {
            return Err(Error::OutOfDomain(self.normalize_x(x).to_string()));
        }

        Ok(self.scale_inside(x))
    }

    fn check_query(&self, x: T) -> Result<T> {
        if !self.scaler.contains(x) {
            let (a, b) = self.scaler.bounds();
            return Err(Error::Extrapolation(a.to_string(), b.to_string()));
        }

        Ok(self.scale_inside(x))
    }

    #[inline(always)]
    fn fill_matrix_row<R: nalgebra::Dim, C: nalgebra::Dim, RS: nalgebra::Dim, CS: nalgebra::Dim>(
        &self,
        u: T,
        mut row: MatrixViewMut<'_, T, R, C, RS, CS>,
    ) {
        let theta = u.acos();
        for j in 0..row.ncols() {
            row[j] = match j {
                0 => T::one(),
                _ => (T::from_positive_int(j) * theta).cos(),
            }
        }
    }

    #[inline(always)]
    fn solve_function(&self, j: usize, u: T) -> T {
        match j {
            0 => T::one(),
            _ => (T::from_positive_int(j) * u.acos()).cos(),
        }
    }
}

impl<T: Value> display::PolynomialDisplay<T> for ChebyshevBasis<T> {
    fn format_term(&self, degree: i32, coef: T) -> Option<display::Term> {
        let sign = Sign::from_coef(coef);

        let x = display::unicode::subscript("s");
        let x = format!("x{x}");

        let rank = display::unicode::subscript(&degree.to_string());
        let func = if degree > 0 {
            format!("T{rank}({x})")
        } else {
            String::new()
        };
        let coef = display::format_coefficient(coef, degree, DEFAULT_PRECISION)?;

        let glue = if coef.is_empty() || func.is_empty() {
            ""
        } else {
            "·"
        };

        let body = format!("{coef}{glue}{func}");
        Some(display::Term::new(sign, body))
    }

    fn format_scaling_formula(&self) -> Option<String> {
        let x = display::unicode::subscript("s");
        Some(format!("x{x} = {}", self.scaler))
    }
}
