//! Error types for interpolation
//!
//! This module defines the failures that can occur while validating samples,
//! building a design matrix, solving for coefficients or evaluating an
//! interpolant, along with a convenient `Result` alias.
//!
//! Every condition aborts the current fit or evaluation; nothing here is a warning.

/// Errors that can occur while fitting or evaluating an interpolant.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The x and y sequences have different lengths.
    #[error("x and y must have the same length (x: {x}, y: {y})")]
    ShapeMismatch {
        /// Number of x values
        x: usize,
        /// Number of y values
        y: usize,
    },

    /// Cannot interpolate because there is no data.
    #[error("No samples available for fitting")]
    NoData,

    /// A sample or query point is NaN or infinite.
    #[error("Value at position {index} is not a finite number")]
    NonFiniteValue {
        /// Position of the offending sample or query
        index: usize,
    },

    /// The domain bounds do not span a non-empty interval, so the affine scaling is undefined.
    ///
    /// Usually all x values are equal.
    #[error("Cannot scale the domain {0}..{1}; the bounds must be finite and strictly increasing")]
    DegenerateDomain(String, String),

    /// The requested number of basis functions (or nodes) is not usable here.
    #[error("Cannot use {requested} basis functions; expected {}", expected_count(.min, .max))]
    DimensionMismatch {
        /// Number of basis functions requested
        requested: usize,
        /// Smallest usable count
        min: usize,
        /// Largest usable count, if bounded
        max: Option<usize>,
    },

    /// The linear system has no unique solution.
    ///
    /// Usually two samples share the same x value after scaling.
    #[error(
        "Design matrix is singular; samples may share an x value after scaling. [n: {n}, k: {k}]"
    )]
    SingularMatrix {
        /// Number of samples
        n: usize,
        /// Number of basis functions
        k: usize,
    },

    /// A Chebyshev basis was constructed from a scaled value outside `[-1, 1]`.
    #[error("Scaled value {0} is outside the Chebyshev domain [-1, 1]")]
    OutOfDomain(String),

    /// The interpolant was evaluated outside the range it was fitted on.
    #[error("This interpolant is only defined within the x-value range {0}..{1}")]
    Extrapolation(String, String),

    /// An evaluation step is zero, negative or not a finite number.
    #[error("Step {0} must be a positive, finite number")]
    InvalidStep(String),

    /// Evaluation produced a result too large to represent.
    #[error("Evaluating at x = {0} overflowed")]
    Overflow(String),

    /// A numeric value could not be cast to the target type.
    #[error("Failed to cast value to target type")]
    CastFailed,

    /// Failed to solve the algebraic system during a least-squares fit.
    ///
    /// Contains a static string describing the solver error.
    #[error("Failed to solve: {0}")]
    Algebra(&'static str),
}

fn expected_count(min: &usize, max: &Option<usize>) -> String {
    match max {
        Some(max) if max == min => format!("exactly {min}"),
        Some(max) => format!("{min}..={max}"),
        None => format!("at least {min}"),
    }
}

/// Result type for interpolation
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_message() {
        let exact = Error::DimensionMismatch {
            requested: 2,
            min: 3,
            max: Some(3),
        };
        assert_eq!(
            exact.to_string(),
            "Cannot use 2 basis functions; expected exactly 3"
        );

        let ranged = Error::DimensionMismatch {
            requested: 5,
            min: 1,
            max: Some(4),
        };
        assert_eq!(
            ranged.to_string(),
            "Cannot use 5 basis functions; expected 1..=4"
        );

        let open = Error::DimensionMismatch {
            requested: 0,
            min: 1,
            max: None,
        };
        assert_eq!(
            open.to_string(),
            "Cannot use 0 basis functions; expected at least 1"
        );
    }
}
