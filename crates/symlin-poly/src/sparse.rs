//! Sparse Laurent polynomials with exact rational coefficients.

use num_traits::{One, Zero};
use rustc_hash::FxHashMap;
use std::cmp::Ordering;

use symlin_core::{ExprHandle, Rational};

use crate::monomial::Monomial;

/// A sparse polynomial over expression atoms.
///
/// Terms are sorted by monomial, have nonzero coefficients and distinct
/// monomials. Two polynomials built over the same arena are equal exactly
/// when they are the same mathematical polynomial.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct SparsePoly {
    terms: Vec<(Monomial, Rational)>,
}

impl SparsePoly {
    /// The zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self { terms: Vec::new() }
    }

    /// A constant polynomial.
    #[must_use]
    pub fn constant(c: Rational) -> Self {
        Self::monomial(Monomial::one(), c)
    }

    /// The polynomial `c * m`.
    #[must_use]
    pub fn monomial(m: Monomial, c: Rational) -> Self {
        if c.is_zero() {
            Self::zero()
        } else {
            Self {
                terms: vec![(m, c)],
            }
        }
    }

    /// The polynomial consisting of a single atom.
    #[must_use]
    pub fn atom(atom: ExprHandle) -> Self {
        Self::monomial(Monomial::atom(atom), Rational::one())
    }

    /// Builds a polynomial from arbitrary terms, combining like monomials.
    #[must_use]
    pub fn from_terms(mut terms: Vec<(Monomial, Rational)>) -> Self {
        terms.sort_by(|a, b| a.0.cmp(&b.0));

        let mut merged: Vec<(Monomial, Rational)> = Vec::with_capacity(terms.len());
        for (m, c) in terms {
            if let Some((last, acc)) = merged.last_mut() {
                if *last == m {
                    *acc = &*acc + &c;
                    continue;
                }
            }
            merged.push((m, c));
        }
        merged.retain(|(_, c)| !c.is_zero());

        Self { terms: merged }
    }

    /// Returns true for the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if there are no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the terms in canonical order.
    #[must_use]
    pub fn terms(&self) -> &[(Monomial, Rational)] {
        &self.terms
    }

    /// Returns the value of a constant polynomial.
    #[must_use]
    pub fn as_constant(&self) -> Option<Rational> {
        match self.terms.as_slice() {
            [] => Some(Rational::zero()),
            [(m, c)] if m.is_one() => Some(c.clone()),
            _ => None,
        }
    }

    /// Returns the only term of a single-term polynomial.
    #[must_use]
    pub fn single_term(&self) -> Option<(&Monomial, &Rational)> {
        match self.terms.as_slice() {
            [(m, c)] => Some((m, c)),
            _ => None,
        }
    }

    /// Returns the terms in which `atom` has exponent `exp`, with `atom`
    /// divided out.
    #[must_use]
    pub fn coefficient(&self, atom: ExprHandle, exp: i32) -> Self {
        // Removing one atom keeps the remaining factors sorted and distinct.
        let terms = self
            .terms
            .iter()
            .filter(|(m, _)| m.exponent(atom) == exp)
            .map(|(m, c)| (m.without(atom), c.clone()))
            .collect();
        Self::from_terms(terms)
    }

    /// Adds two polynomials.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let mut terms = Vec::with_capacity(self.len() + other.len());
        let (mut i, mut j) = (0, 0);

        while i < self.terms.len() && j < other.terms.len() {
            let (ma, ca) = &self.terms[i];
            let (mb, cb) = &other.terms[j];
            match ma.cmp(mb) {
                Ordering::Less => {
                    terms.push((ma.clone(), ca.clone()));
                    i += 1;
                }
                Ordering::Greater => {
                    terms.push((mb.clone(), cb.clone()));
                    j += 1;
                }
                Ordering::Equal => {
                    let c = ca + cb;
                    if !c.is_zero() {
                        terms.push((ma.clone(), c));
                    }
                    i += 1;
                    j += 1;
                }
            }
        }
        terms.extend_from_slice(&self.terms[i..]);
        terms.extend_from_slice(&other.terms[j..]);

        Self { terms }
    }

    /// Negates a polynomial.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self {
            terms: self.terms.iter().map(|(m, c)| (m.clone(), -c)).collect(),
        }
    }

    /// Subtracts two polynomials.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Multiplies by a scalar.
    #[must_use]
    pub fn scale(&self, c: &Rational) -> Self {
        if c.is_zero() {
            return Self::zero();
        }
        Self {
            terms: self.terms.iter().map(|(m, x)| (m.clone(), x * c)).collect(),
        }
    }

    /// Multiplies two polynomials; `None` if an exponent overflows.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Option<Self> {
        let mut terms = Vec::with_capacity(self.len() * other.len());
        for (m1, c1) in &self.terms {
            for (m2, c2) in &other.terms {
                terms.push((m1.mul(m2)?, c1 * c2));
            }
        }
        Some(Self::from_terms(terms))
    }

    /// Raises to a non-negative power by repeated squaring; `None` if an
    /// exponent overflows.
    #[must_use]
    pub fn pow(&self, mut n: u32) -> Option<Self> {
        let mut result = Self::constant(Rational::one());
        let mut base = self.clone();

        while n > 0 {
            if n & 1 == 1 {
                result = result.mul(&base)?;
            }
            n >>= 1;
            if n > 0 {
                base = base.mul(&base)?;
            }
        }

        Some(result)
    }

    /// Returns the term with the largest monomial under [`Monomial::lex_cmp`].
    fn leading_term(&self) -> Option<&(Monomial, Rational)> {
        self.terms.iter().max_by(|a, b| a.0.lex_cmp(&b.0))
    }

    /// Divides by `divisor` when it divides `self` exactly.
    ///
    /// Multivariate division by the leading term, with the Laurent
    /// exponents of every candidate quotient term confined to the box the
    /// two Newton polytopes allow. Returns `None` when the division leaves a
    /// remainder, `divisor` is zero or an exponent overflows.
    #[must_use]
    pub fn div_exact(&self, divisor: &Self) -> Option<Self> {
        let (lead_m, lead_c) = divisor.leading_term()?;
        if self.is_zero() {
            return Some(Self::zero());
        }

        let bounds = QuotientBounds::new(self, divisor);
        let lead_inv = lead_m.pow(-1)?;
        let mut remainder = self.clone();
        let mut quotient = Vec::new();

        while let Some((m, c)) = remainder.leading_term() {
            let qm = m.mul(&lead_inv)?;
            if !bounds.contains(&qm) {
                return None;
            }
            let qc = c.checked_div(lead_c)?;
            let step = Self::monomial(qm.clone(), qc.clone()).mul(divisor)?;
            remainder = remainder.sub(&step);
            quotient.push((qm, qc));
        }

        Some(Self::from_terms(quotient))
    }
}

/// Per-atom exponent range of an exact quotient `num / den`.
///
/// For each atom `a`, every term of the quotient has an exponent between
/// `min_a(num) - min_a(den)` and `max_a(num) - max_a(den)`.
struct QuotientBounds(FxHashMap<ExprHandle, (i64, i64)>);

impl QuotientBounds {
    fn new(num: &SparsePoly, den: &SparsePoly) -> Self {
        let mut atoms: Vec<ExprHandle> = num
            .terms
            .iter()
            .chain(&den.terms)
            .flat_map(|(m, _)| m.factors().iter().map(|&(atom, _)| atom))
            .collect();
        atoms.sort_unstable();
        atoms.dedup();

        let range = |p: &SparsePoly, atom: ExprHandle| {
            p.terms
                .iter()
                .map(|(m, _)| i64::from(m.exponent(atom)))
                .fold((i64::MAX, i64::MIN), |(lo, hi), e| (lo.min(e), hi.max(e)))
        };

        let bounds = atoms
            .into_iter()
            .map(|atom| {
                let (num_lo, num_hi) = range(num, atom);
                let (den_lo, den_hi) = range(den, atom);
                (atom, (num_lo - den_lo, num_hi - den_hi))
            })
            .collect();
        Self(bounds)
    }

    fn contains(&self, m: &Monomial) -> bool {
        let factors_known = m
            .factors()
            .iter()
            .all(|(atom, _)| self.0.contains_key(atom));
        factors_known
            && self.0.iter().all(|(&atom, &(lo, hi))| {
                let e = i64::from(m.exponent(atom));
                lo <= e && e <= hi
            })
    }
}
