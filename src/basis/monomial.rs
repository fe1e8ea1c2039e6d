use nalgebra::MatrixViewMut;

use crate::{
    basis::Basis,
    display::{self, Sign, DEFAULT_PRECISION},
    domain::DomainScaler,
    value::Value,
};

/// Monomial basis in the scaled variable.
///
/// The basis functions are powers of the centered, scaled coordinate:
///
/// ```text
/// 1, s, s², …, sⁿ⁻¹      where s = (x - c) / d
/// ```
///
/// The design matrix built from it is a Vandermonde matrix in `s` rather than in `x`, which
/// keeps it well conditioned regardless of where the samples sit on the x axis.
///
/// Polynomials are defined everywhere, so evaluating outside the fitted domain is allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct MonomialBasis<T: Value = f64> {
    scaler: DomainScaler<T>,
}
impl<T: Value> Basis<T> for MonomialBasis<T> {
    const NAME: &'static str = "monomial";

    fn from_scaler(scaler: DomainScaler<T>) -> Self {
        Self { scaler }
    }

    fn scaler(&self) -> &DomainScaler<T> {
        &self.scaler
    }

    #[inline(always)]
    fn normalize_x(&self, x: T) -> T {
        self.scaler.scale_centered(x)
    }

    #[inline(always)]
    fn fill_matrix_row<R: nalgebra::Dim, C: nalgebra::Dim, RS: nalgebra::Dim, CS: nalgebra::Dim>(
        &self,
        u: T,
        mut row: MatrixViewMut<T, R, C, RS, CS>,
    ) {
        for j in 0..row.ncols() {
            row[j] = match j {
                0 => T::one(),
                _ => row[j - 1] * u,
            };
        }
    }

    #[inline(always)]
    fn solve_function(&self, j: usize, u: T) -> T {
        (0..j).fold(T::one(), |acc, _| acc * u)
    }
}

impl<T: Value> display::PolynomialDisplay<T> for MonomialBasis<T> {
    fn format_term(&self, degree: i32, coef: T) -> Option<display::Term> {
        let sign = Sign::from_coef(coef);

        let base = display::format_variable("x", Some("s"), degree);
        let coef = display::format_coefficient(coef, degree, DEFAULT_PRECISION)?;

        let body = format!("{coef}{base}");
        Some(display::Term::new(sign, body))
    }

    fn format_scaling_formula(&self) -> Option<String> {
        let x = display::unicode::subscript("s");
        Some(format!("x{x} = {}", self.scaler))
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::{assert_close, display::PolynomialDisplay};

    fn basis() -> MonomialBasis {
        MonomialBasis::from_scaler(DomainScaler::new(0.0, 2.0).unwrap())
    }

    #[test]
    fn test_matrix_row() {
        let basis = basis();
        let u = basis.normalize_x(1.5);
        assert_eq!(u, 0.5);

        let mut matrix = nalgebra::DMatrix::<f64>::zeros(1, 4);
        basis.fill_matrix_row(u, matrix.row_mut(0));
        for j in 0..4 {
            assert_close!(matrix[(0, j)], basis.solve_function(j, u));
        }
        assert_eq!(matrix[(0, 3)], 0.125);
    }

    #[test]
    fn test_solve_known_polynomial() {
        // 2 - u + 0.5u² + 3u³
        let basis = basis();
        let coefs = [2.0, -1.0, 0.5, 3.0];
        for u in [-1.0_f64, -0.3, 0.0, 0.7, 1.0, 4.0] {
            let expected = 2.0 - u + 0.5 * u * u + 3.0 * u * u * u;
            assert_close!(basis.solve(u, &coefs), expected, tol = 1e-12);
        }
    }

    #[test]
    fn test_query_extrapolates() {
        let basis = basis();
        assert_eq!(basis.check_query(10.0), Ok(9.0));
    }

    #[test]
    fn test_display() {
        let mut buf = String::new();
        basis().format_polynomial(&mut buf, &[2.0, 2.0, 1.0]).unwrap();
        assert_eq!(buf, "xₛ = T[ 0..2 -> -1..1 ], y(x) = xₛ² + 2.00xₛ + 2.00");
    }
}
