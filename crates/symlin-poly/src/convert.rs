//! Conversion between arena expressions and polynomial normal form.
//!
//! Every expression expands to a [`SparsePoly`] over atoms. Rebuilding a
//! polynomial produces a canonical expression, so two expressions that agree
//! as polynomials canonicalize to the same handle. The two primitives linear
//! extraction needs, coefficient extraction and zero substitution, are
//! implemented on top of that normal form.

use hashbrown::HashMap;
use log::trace;
use num_traits::One;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thiserror::Error;

use symlin_core::{ExprArena, ExprHandle, ExprNode, Rational, SymbolId};

use crate::monomial::Monomial;
use crate::sparse::SparsePoly;

/// Highest power of a multi-term denominator expanded to try cancellation.
const MAX_CANCEL_POWER: i64 = 8;

/// Errors raised while normalizing an expression.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// A denominator normalized to zero.
    #[error("division by zero")]
    DivisionByZero,

    /// The expression is not affine in `symbol`.
    ///
    /// `exponent` is the offending power when the symbol appears as a bare
    /// factor, and `None` when it appears inside a non-polynomial atom such
    /// as `sin(x)` or `1/(x + 1)`.
    #[error("expression is not affine in {symbol:?} (exponent {exponent:?})")]
    NotAffine {
        /// The symbol in question.
        symbol: SymbolId,
        /// The offending exponent, if any.
        exponent: Option<i32>,
    },

    /// An exponent left the `i32` range.
    #[error("exponent overflow")]
    ExponentOverflow,
}

/// Expands, canonicalizes and inspects expressions of one arena.
///
/// Expansions are cached per handle for the converter's lifetime.
pub struct ExprConverter<'a> {
    arena: &'a mut ExprArena,
    cache: FxHashMap<ExprHandle, SparsePoly>,
}

impl<'a> ExprConverter<'a> {
    /// Creates a converter over `arena`.
    pub fn new(arena: &'a mut ExprArena) -> Self {
        Self {
            arena,
            cache: FxHashMap::default(),
        }
    }

    /// Returns the underlying arena.
    #[must_use]
    pub fn arena(&self) -> &ExprArena {
        self.arena
    }

    /// Returns the underlying arena for building new expressions.
    pub fn arena_mut(&mut self) -> &mut ExprArena {
        self.arena
    }

    // === ExprHandle -> SparsePoly ===

    /// Expands an expression into its polynomial normal form.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::DivisionByZero`] when a denominator normalizes
    /// to zero and [`ConvertError::ExponentOverflow`] on exponent overflow.
    pub fn expand(&mut self, expr: ExprHandle) -> Result<SparsePoly, ConvertError> {
        if let Some(poly) = self.cache.get(&expr) {
            return Ok(poly.clone());
        }

        let poly = match self.arena.get(expr).clone() {
            ExprNode::Number(value) => SparsePoly::constant(value),

            ExprNode::Symbol(_) => SparsePoly::atom(expr),

            ExprNode::Add(args) => {
                let mut sum = SparsePoly::zero();
                for arg in args {
                    sum = sum.add(&self.expand(arg)?);
                }
                sum
            }

            ExprNode::Mul(args) => {
                // Denominators are divided out after the numerators are
                // multiplied so that `(x + 1) * (x + 1)^-1` cancels.
                let mut product = SparsePoly::constant(Rational::one());
                let mut denominators = Vec::new();
                for arg in args {
                    let factor = match self.as_quotient(arg)? {
                        Some((num, den, n)) => {
                            denominators.push((den, n));
                            num
                        }
                        None => self.expand(arg)?,
                    };
                    product = product
                        .mul(&factor)
                        .ok_or(ConvertError::ExponentOverflow)?;
                }
                for (den, n) in &denominators {
                    product = self.divide(&product, den, *n)?;
                }
                product
            }

            ExprNode::Neg(arg) => self.expand(arg)?.neg(),

            ExprNode::Div { num, den } => {
                let num = self.expand(num)?;
                let den = self.expand(den)?;
                self.divide(&num, &den, 1)?
            }

            ExprNode::Pow { base, exp } => self.expand_pow(base, exp)?,

            ExprNode::Function { id, args } => {
                let args = args
                    .iter()
                    .map(|&arg| self.canonical(arg))
                    .collect::<Result<SmallVec<[ExprHandle; 2]>, _>>()?;
                let atom = self.arena.intern(ExprNode::Function { id, args });
                SparsePoly::atom(atom)
            }
        };

        self.cache.insert(expr, poly.clone());
        Ok(poly)
    }

    fn expand_pow(
        &mut self,
        base: ExprHandle,
        exp: ExprHandle,
    ) -> Result<SparsePoly, ConvertError> {
        let exponent = self.expand(exp)?;
        if let Some(n) = exponent.as_constant().and_then(|c| c.to_i64()) {
            let base = self.expand(base)?;
            return self.integer_power(&base, n);
        }

        // Non-integer or symbolic exponent: keep the power as an atom.
        let base = self.canonical(base)?;
        let exp = self.rebuild(&exponent);
        Ok(SparsePoly::atom(self.arena.pow(base, exp)))
    }

    /// Splits a factor of the form `num / den` or `den^-n` into its
    /// numerator, denominator and the positive power of the denominator.
    fn as_quotient(
        &mut self,
        expr: ExprHandle,
    ) -> Result<Option<(SparsePoly, SparsePoly, i64)>, ConvertError> {
        match *self.arena.get(expr) {
            ExprNode::Div { num, den } => {
                let num = self.expand(num)?;
                let den = self.expand(den)?;
                Ok(Some((num, den, 1)))
            }
            ExprNode::Pow { base, exp } => {
                let exponent = self.expand(exp)?;
                match exponent.as_constant().and_then(|c| c.to_i64()) {
                    Some(n) if n < 0 => {
                        let den = self.expand(base)?;
                        let n = n.checked_neg().ok_or(ConvertError::ExponentOverflow)?;
                        Ok(Some((SparsePoly::constant(Rational::one()), den, n)))
                    }
                    _ => Ok(None),
                }
            }
            _ => Ok(None),
        }
    }

    /// Returns `num / den^n` for `n > 0`.
    ///
    /// A multi-term denominator cancels when `den^n` divides `num` exactly.
    /// Otherwise it becomes the reciprocal atom `(den)^-1`; no polynomial
    /// GCD is taken, so partial common factors are left in place.
    fn divide(
        &mut self,
        num: &SparsePoly,
        den: &SparsePoly,
        n: i64,
    ) -> Result<SparsePoly, ConvertError> {
        if !den.is_zero() && den.single_term().is_none() && n <= MAX_CANCEL_POWER {
            let power = u32::try_from(n).map_err(|_| ConvertError::ExponentOverflow)?;
            let divisor = den.pow(power).ok_or(ConvertError::ExponentOverflow)?;
            if let Some(quotient) = num.div_exact(&divisor) {
                trace!("cancelled a {}-term denominator", den.len());
                return Ok(quotient);
            }
        }
        let inverse = self.integer_power(den, -n)?;
        num.mul(&inverse).ok_or(ConvertError::ExponentOverflow)
    }

    /// Raises a normal form to an integer power.
    ///
    /// Single-term bases use signed monomial exponents. Negative powers of
    /// a multi-term base go through the reciprocal atom `(base)^-1`.
    fn integer_power(
        &mut self,
        base: &SparsePoly,
        n: i64,
    ) -> Result<SparsePoly, ConvertError> {
        if n == 0 {
            return Ok(SparsePoly::constant(Rational::one()));
        }
        if base.is_zero() {
            return if n > 0 {
                Ok(SparsePoly::zero())
            } else {
                Err(ConvertError::DivisionByZero)
            };
        }

        let n32 = i32::try_from(n).map_err(|_| ConvertError::ExponentOverflow)?;

        if let Some((m, c)) = base.single_term() {
            let c = c.powi(n32).ok_or(ConvertError::DivisionByZero)?;
            let m = m.pow(n32).ok_or(ConvertError::ExponentOverflow)?;
            return Ok(SparsePoly::monomial(m, c));
        }

        let magnitude = n32.unsigned_abs();
        if n32 > 0 {
            return base.pow(magnitude).ok_or(ConvertError::ExponentOverflow);
        }

        let canonical_base = self.rebuild(base);
        let minus_one = self.arena.integer(-1);
        let reciprocal = self.arena.pow(canonical_base, minus_one);
        SparsePoly::atom(reciprocal)
            .pow(magnitude)
            .ok_or(ConvertError::ExponentOverflow)
    }

    // === SparsePoly -> ExprHandle ===

    /// Rebuilds the canonical expression of a polynomial.
    pub fn rebuild(&mut self, poly: &SparsePoly) -> ExprHandle {
        let terms: SmallVec<[ExprHandle; 4]> = poly
            .terms()
            .iter()
            .map(|(m, c)| self.rebuild_term(m, c))
            .collect();
        self.arena.add(terms)
    }

    fn rebuild_term(&mut self, m: &Monomial, c: &Rational) -> ExprHandle {
        let mut factors: SmallVec<[ExprHandle; 4]> = SmallVec::new();
        if m.is_one() || !c.is_one() {
            factors.push(self.arena.number(c.clone()));
        }
        for &(atom, exp) in m.factors() {
            let factor = if exp == 1 {
                atom
            } else {
                self.arena.powi(atom, i64::from(exp))
            };
            factors.push(factor);
        }
        self.arena.mul(factors)
    }

    /// Returns the canonical form of an expression.
    ///
    /// # Errors
    ///
    /// Same as [`ExprConverter::expand`].
    pub fn canonical(&mut self, expr: ExprHandle) -> Result<ExprHandle, ConvertError> {
        let poly = self.expand(expr)?;
        Ok(self.rebuild(&poly))
    }

    // === Extraction primitives ===

    /// Returns the canonical coefficient of `symbol` in an expression that
    /// is affine in it.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::NotAffine`] if `symbol` occurs with an
    /// exponent other than 0 or 1, or inside any non-symbol atom.
    pub fn linear_coefficient(
        &mut self,
        expr: ExprHandle,
        symbol: SymbolId,
    ) -> Result<ExprHandle, ConvertError> {
        let poly = self.expand(expr)?;
        let var = self.arena.symbol_expr(symbol);

        for (m, _) in poly.terms() {
            for &(atom, exp) in m.factors() {
                if atom == var {
                    if exp != 1 {
                        return Err(ConvertError::NotAffine {
                            symbol,
                            exponent: Some(exp),
                        });
                    }
                } else if self.arena.depends_on(atom, |s| s == symbol) {
                    return Err(ConvertError::NotAffine {
                        symbol,
                        exponent: None,
                    });
                }
            }
        }

        let coefficient = poly.coefficient(var, 1);
        trace!(
            "coefficient of {} in {}: {} term(s)",
            self.arena.display(var),
            self.arena.display(expr),
            coefficient.len()
        );
        Ok(self.rebuild(&coefficient))
    }

    /// Returns the canonical form of `expr` with every symbol in `symbols`
    /// replaced by zero. Other symbols are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::DivisionByZero`] if the substitution zeroes a
    /// denominator.
    pub fn substitute_zero(
        &mut self,
        expr: ExprHandle,
        symbols: impl IntoIterator<Item = SymbolId>,
    ) -> Result<ExprHandle, ConvertError> {
        let zero = self.arena.zero();
        let replacements: HashMap<SymbolId, ExprHandle> =
            symbols.into_iter().map(|symbol| (symbol, zero)).collect();
        // Substitute into the normal form so cancelled denominators such as
        // the `x` of `x^2 / x` are never evaluated at zero.
        let canonical = self.canonical(expr)?;
        let replaced = self.arena.substitute(canonical, &replacements);
        self.canonical(replaced)
    }
}
