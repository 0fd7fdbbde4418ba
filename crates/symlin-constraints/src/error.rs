//! Error types for ordered sets and linear extraction.

use thiserror::Error;

/// Errors from positional access to an [`OrderedSet`](crate::OrderedSet).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum OrderedSetError {
    /// The position is past the end of the set.
    #[error("index {index} out of range for ordered set of length {len}")]
    IndexOutOfRange {
        /// The requested position.
        index: usize,
        /// The length of the set at the time of the call.
        len: usize,
    },
}

/// Failures reported by a [`SymbolicAlgebra`](crate::SymbolicAlgebra).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AlgebraError {
    /// The expression is not affine in `symbol`.
    #[error("expression is not affine in `{symbol}`")]
    NotAffine {
        /// Label of the offending symbol.
        symbol: String,
    },

    /// A denominator evaluated to zero.
    #[error("division by zero")]
    DivisionByZero,

    /// An exponent exceeded the supported range.
    #[error("exponent overflow")]
    ExponentOverflow,
}

/// Errors from converting a constraint system into a linear system.
///
/// Every variant names the index of the offending constraint; extraction
/// stops at the first failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// The constraint is not affine in one of the requested unknowns.
    #[error("constraint {constraint} is not linear in unknown `{unknown}` (column {column})")]
    NonLinearConstraint {
        /// Index of the constraint.
        constraint: usize,
        /// Column of the unknown in the ordering.
        column: usize,
        /// Label of the unknown.
        unknown: String,
    },

    /// The constraint does not involve any requested unknown.
    #[error("constraint {constraint} does not involve any requested unknown")]
    DegenerateConstraint {
        /// Index of the constraint.
        constraint: usize,
    },

    /// The algebra failed for a reason other than nonlinearity.
    #[error("constraint {constraint}: {source}")]
    Algebra {
        /// Index of the constraint.
        constraint: usize,
        /// The underlying failure.
        #[source]
        source: AlgebraError,
    },
}

impl ExtractionError {
    /// Returns the index of the constraint that failed.
    #[must_use]
    pub fn constraint(&self) -> usize {
        match self {
            Self::NonLinearConstraint { constraint, .. }
            | Self::DegenerateConstraint { constraint }
            | Self::Algebra { constraint, .. } => *constraint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_constraint() {
        let err = ExtractionError::NonLinearConstraint {
            constraint: 2,
            column: 1,
            unknown: "y".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "constraint 2 is not linear in unknown `y` (column 1)"
        );
        assert_eq!(err.constraint(), 2);

        let err = ExtractionError::Algebra {
            constraint: 0,
            source: AlgebraError::DivisionByZero,
        };
        assert_eq!(err.to_string(), "constraint 0: division by zero");
        assert!(std::error::Error::source(&err).is_some());
    }
}
