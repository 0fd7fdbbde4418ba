//! Linear system extraction.
//!
//! For a constraint `L == R` and unknowns `u_0 .. u_{n-1}` the residual
//! `D = L - R` is split as `D = Σ coef_i * u_i + P`, where `P` is `D` with
//! every unknown set to zero. The row is `coef` and the constant is `-P`.
//! Symbols outside the ordering are parameters and stay symbolic.

use log::{debug, trace, warn};

use crate::algebra::{Sign, SymbolicAlgebra};
use crate::config::{ExtractionConfig, SignConvention};
use crate::constraint::{EqualityConstraint, EqualityConstraintSystem};
use crate::error::{AlgebraError, ExtractionError};
use crate::linear_system::LinearSystem;
use crate::ordered_set::OrderedSet;

impl<E: Clone> EqualityConstraintSystem<E> {
    /// Extracts the linear system of these constraints with respect to
    /// `unknowns`, using the default [`ExtractionConfig`].
    ///
    /// # Errors
    ///
    /// See [`EqualityConstraintSystem::convert_to_linear_system_with`].
    pub fn convert_to_linear_system<A>(
        &self,
        algebra: &mut A,
        unknowns: &OrderedSet<A::Symbol>,
    ) -> Result<LinearSystem<E>, ExtractionError>
    where
        A: SymbolicAlgebra<Expr = E>,
    {
        self.convert_to_linear_system_with(algebra, unknowns, &ExtractionConfig::default())
    }

    /// Extracts the linear system of these constraints with respect to
    /// `unknowns`.
    ///
    /// Row `k` corresponds to constraint `k` and column `i` to
    /// `unknowns[i]`. Neither the constraints nor the ordering are
    /// modified.
    ///
    /// # Errors
    ///
    /// Stops at the first constraint that fails and returns:
    /// - [`ExtractionError::NonLinearConstraint`] if it is not affine in an
    ///   unknown, or a coefficient depends on an unknown;
    /// - [`ExtractionError::DegenerateConstraint`] if every coefficient is
    ///   zero;
    /// - [`ExtractionError::Algebra`] for any other failure of `algebra`.
    pub fn convert_to_linear_system_with<A>(
        &self,
        algebra: &mut A,
        unknowns: &OrderedSet<A::Symbol>,
        config: &ExtractionConfig,
    ) -> Result<LinearSystem<E>, ExtractionError>
    where
        A: SymbolicAlgebra<Expr = E>,
    {
        let mut system = LinearSystem::with_capacity(self.len(), unknowns.len());
        let mut extractor = RowExtractor {
            algebra,
            unknowns,
            config,
        };

        for (index, constraint) in self.iter().enumerate() {
            let (row, constant) = extractor.extract(index, constraint)?;
            system.push_row(row, constant);
        }

        debug!(
            "extracted {}x{} linear system",
            system.num_rows(),
            system.num_cols()
        );
        Ok(system)
    }
}

struct RowExtractor<'a, A: SymbolicAlgebra> {
    algebra: &'a mut A,
    unknowns: &'a OrderedSet<A::Symbol>,
    config: &'a ExtractionConfig,
}

impl<A: SymbolicAlgebra> RowExtractor<'_, A> {
    fn extract(
        &mut self,
        index: usize,
        constraint: &EqualityConstraint<A::Expr>,
    ) -> Result<(Vec<A::Expr>, A::Expr), ExtractionError> {
        let unknowns = self.unknowns;
        let residual = self.algebra.sub(constraint.left(), constraint.right());

        let mut row = Vec::with_capacity(unknowns.len());
        for (column, unknown) in unknowns.iter().enumerate() {
            row.push(self.coefficient(index, column, unknown, &residual)?);
        }

        let remainder = self
            .algebra
            .substitute_zero(&residual, unknowns.as_slice())
            .map_err(|source| ExtractionError::Algebra {
                constraint: index,
                source,
            })?;

        let Some(leading) = row.iter().position(|c| !self.algebra.is_zero(c)) else {
            return Err(ExtractionError::DegenerateConstraint { constraint: index });
        };

        if self.should_flip(index, leading, &row[leading]) {
            debug!("constraint {index}: negating row, leading coefficient in column {leading}");
            let row = row
                .iter()
                .map(|c| self.algebra.neg(c))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|source| ExtractionError::Algebra {
                    constraint: index,
                    source,
                })?;
            return Ok((row, remainder));
        }

        let constant = self
            .algebra
            .neg(&remainder)
            .map_err(|source| ExtractionError::Algebra {
                constraint: index,
                source,
            })?;
        debug!(
            "constraint {index}: constant {}",
            self.algebra.render(&constant)
        );
        Ok((row, constant))
    }

    /// Extracts the coefficient of one unknown and checks that it is free of
    /// every unknown.
    fn coefficient(
        &mut self,
        index: usize,
        column: usize,
        unknown: &A::Symbol,
        residual: &A::Expr,
    ) -> Result<A::Expr, ExtractionError> {
        let coefficient = match self.algebra.linear_coefficient(residual, unknown) {
            Ok(coefficient) => coefficient,
            Err(AlgebraError::NotAffine { .. }) => {
                return Err(self.nonlinear(index, column, unknown));
            }
            Err(source) => {
                return Err(ExtractionError::Algebra {
                    constraint: index,
                    source,
                })
            }
        };

        if self
            .algebra
            .free_symbols(&coefficient)
            .iter()
            .any(|symbol| self.unknowns.contains(symbol))
        {
            return Err(self.nonlinear(index, column, unknown));
        }

        trace!(
            "constraint {index}, column {column} ({}): {}",
            self.algebra.symbol_label(unknown),
            self.algebra.render(&coefficient)
        );
        Ok(coefficient)
    }

    fn nonlinear(&self, index: usize, column: usize, unknown: &A::Symbol) -> ExtractionError {
        ExtractionError::NonLinearConstraint {
            constraint: index,
            column,
            unknown: self.algebra.symbol_label(unknown),
        }
    }

    fn should_flip(&self, index: usize, column: usize, leading: &A::Expr) -> bool {
        match self.config.sign {
            SignConvention::AsWritten => false,
            SignConvention::LeadingPositive => match self.algebra.sign(leading) {
                Sign::Negative => true,
                Sign::Zero | Sign::Positive => false,
                Sign::Unknown => {
                    warn!(
                        "constraint {index}: leading coefficient {} in column {column} has no \
                         determinable sign, keeping the row as written",
                        self.algebra.render(leading)
                    );
                    false
                }
            },
        }
    }
}
