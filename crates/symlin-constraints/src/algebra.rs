//! The symbolic algebra seen by the extraction algorithm.
//!
//! Extraction never inspects expressions itself. It needs exactly the
//! operations of [`SymbolicAlgebra`], so any engine that can extract linear
//! coefficients and substitute zeros can drive it. The implementation for
//! [`ExprConverter`] over a symlin [`ExprArena`](symlin_core::ExprArena)
//! lives here as well.

use std::hash::Hash;

use symlin_core::{ExprHandle, SymbolId};
use symlin_poly::{ConvertError, ExprConverter};

use crate::error::AlgebraError;

/// The sign of an expression, when it can be decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sign {
    /// Strictly negative.
    Negative,
    /// Identically zero.
    Zero,
    /// Strictly positive.
    Positive,
    /// Depends on free symbols.
    Unknown,
}

/// Operations a symbolic engine provides to linear extraction.
///
/// Methods take `&mut self` because engines typically intern new
/// expressions while computing.
pub trait SymbolicAlgebra {
    /// Symbol identity.
    type Symbol: Clone + Eq + Hash;
    /// Expression value.
    type Expr: Clone;

    /// Returns `lhs - rhs`.
    fn sub(&mut self, lhs: &Self::Expr, rhs: &Self::Expr) -> Self::Expr;

    /// Returns `-expr` in the engine's normal form.
    ///
    /// # Errors
    ///
    /// Returns an error if `expr` cannot be normalized.
    fn neg(&mut self, expr: &Self::Expr) -> Result<Self::Expr, AlgebraError>;

    /// Returns the coefficient of `symbol` in `expr`.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::NotAffine`] when `expr` is not of the form
    /// `c * symbol + r` with `c` and `r` free of `symbol`.
    fn linear_coefficient(
        &mut self,
        expr: &Self::Expr,
        symbol: &Self::Symbol,
    ) -> Result<Self::Expr, AlgebraError>;

    /// Returns `expr` with every symbol of `symbols` replaced by zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the substitution is undefined, e.g. it zeroes a
    /// denominator.
    fn substitute_zero(
        &mut self,
        expr: &Self::Expr,
        symbols: &[Self::Symbol],
    ) -> Result<Self::Expr, AlgebraError>;

    /// Returns true if `expr` is structurally zero.
    fn is_zero(&self, expr: &Self::Expr) -> bool;

    /// Returns the sign of `expr`.
    fn sign(&self, expr: &Self::Expr) -> Sign;

    /// Returns the symbols of `expr` in order of first appearance.
    fn free_symbols(&self, expr: &Self::Expr) -> Vec<Self::Symbol>;

    /// Returns a printable name for `symbol`.
    fn symbol_label(&self, symbol: &Self::Symbol) -> String;

    /// Renders `expr` for diagnostics.
    fn render(&self, expr: &Self::Expr) -> String;
}

impl SymbolicAlgebra for ExprConverter<'_> {
    type Symbol = SymbolId;
    type Expr = ExprHandle;

    fn sub(&mut self, lhs: &ExprHandle, rhs: &ExprHandle) -> ExprHandle {
        self.arena_mut().sub(*lhs, *rhs)
    }

    fn neg(&mut self, expr: &ExprHandle) -> Result<ExprHandle, AlgebraError> {
        let negated = self.arena_mut().neg(*expr);
        let result = self.canonical(negated);
        result.map_err(|err| self.algebra_error(err))
    }

    fn linear_coefficient(
        &mut self,
        expr: &ExprHandle,
        symbol: &SymbolId,
    ) -> Result<ExprHandle, AlgebraError> {
        let result = ExprConverter::linear_coefficient(self, *expr, *symbol);
        result.map_err(|err| self.algebra_error(err))
    }

    fn substitute_zero(
        &mut self,
        expr: &ExprHandle,
        symbols: &[SymbolId],
    ) -> Result<ExprHandle, AlgebraError> {
        let result = ExprConverter::substitute_zero(self, *expr, symbols.iter().copied());
        result.map_err(|err| self.algebra_error(err))
    }

    fn is_zero(&self, expr: &ExprHandle) -> bool {
        self.sign(expr) == Sign::Zero
    }

    fn sign(&self, expr: &ExprHandle) -> Sign {
        match self.arena().number_value(*expr).map(symlin_core::Rational::signum) {
            Some(-1) => Sign::Negative,
            Some(0) => Sign::Zero,
            Some(_) => Sign::Positive,
            None => Sign::Unknown,
        }
    }

    fn free_symbols(&self, expr: &ExprHandle) -> Vec<SymbolId> {
        self.arena().free_symbols(*expr)
    }

    fn symbol_label(&self, symbol: &SymbolId) -> String {
        self.arena()
            .symbol_name(*symbol)
            .map_or_else(|| format!("{symbol:?}"), str::to_owned)
    }

    fn render(&self, expr: &ExprHandle) -> String {
        self.arena().display(*expr).to_string()
    }
}

trait ConvertErrorExt {
    fn algebra_error(&self, err: ConvertError) -> AlgebraError;
}

impl ConvertErrorExt for ExprConverter<'_> {
    fn algebra_error(&self, err: ConvertError) -> AlgebraError {
        match err {
            ConvertError::NotAffine { symbol, .. } => AlgebraError::NotAffine {
                symbol: self.symbol_label(&symbol),
            },
            ConvertError::DivisionByZero => AlgebraError::DivisionByZero,
            ConvertError::ExponentOverflow => AlgebraError::ExponentOverflow,
        }
    }
}
