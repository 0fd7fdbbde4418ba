//! Monomials over expression atoms.
//!
//! An atom is any arena expression the normal form treats as an
//! indeterminate: a symbol, a function application, a reciprocal of a sum or
//! a non-integer power. Exponents are signed so that single-term
//! denominators such as `1/x` stay inside the monomial.

use smallvec::SmallVec;
use std::cmp::Ordering;

use symlin_core::ExprHandle;

/// A product of atoms raised to nonzero integer powers.
///
/// Factors are kept sorted by atom handle with no zero exponents, so derived
/// equality, hashing and ordering are canonical within one arena. The empty
/// monomial is `1` and orders before every other monomial.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
pub struct Monomial(SmallVec<[(ExprHandle, i32); 4]>);

impl Monomial {
    /// The monomial `1`.
    #[must_use]
    pub fn one() -> Self {
        Self(SmallVec::new())
    }

    /// The monomial `atom^exp`; `1` when `exp` is zero.
    #[must_use]
    pub fn power(atom: ExprHandle, exp: i32) -> Self {
        if exp == 0 {
            Self::one()
        } else {
            Self(smallvec::smallvec![(atom, exp)])
        }
    }

    /// The monomial `atom`.
    #[must_use]
    pub fn atom(atom: ExprHandle) -> Self {
        Self::power(atom, 1)
    }

    /// Returns true for the monomial `1`.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the `(atom, exponent)` factors in canonical order.
    #[must_use]
    pub fn factors(&self) -> &[(ExprHandle, i32)] {
        &self.0
    }

    /// Returns the exponent of `atom` (zero when absent).
    #[must_use]
    pub fn exponent(&self, atom: ExprHandle) -> i32 {
        self.0
            .binary_search_by(|(a, _)| a.cmp(&atom))
            .map_or(0, |i| self.0[i].1)
    }

    /// Returns this monomial with `atom` removed.
    #[must_use]
    pub fn without(&self, atom: ExprHandle) -> Self {
        Self(self.0.iter().filter(|(a, _)| *a != atom).copied().collect())
    }

    /// Multiplies two monomials; `None` if an exponent overflows.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Option<Self> {
        let mut out = SmallVec::with_capacity(self.0.len() + other.0.len());
        let (mut i, mut j) = (0, 0);

        while i < self.0.len() && j < other.0.len() {
            let (a, ea) = self.0[i];
            let (b, eb) = other.0[j];
            match a.cmp(&b) {
                Ordering::Less => {
                    out.push((a, ea));
                    i += 1;
                }
                Ordering::Greater => {
                    out.push((b, eb));
                    j += 1;
                }
                Ordering::Equal => {
                    let e = ea.checked_add(eb)?;
                    if e != 0 {
                        out.push((a, e));
                    }
                    i += 1;
                    j += 1;
                }
            }
        }
        out.extend_from_slice(&self.0[i..]);
        out.extend_from_slice(&other.0[j..]);

        Some(Self(out))
    }

    /// Compares exponent vectors lexicographically, atoms in handle order.
    ///
    /// Unlike the derived `Ord`, this order respects multiplication: if
    /// `a < b` then `a * c < b * c`. Exact division relies on that.
    #[must_use]
    pub fn lex_cmp(&self, other: &Self) -> Ordering {
        let (mut i, mut j) = (0, 0);
        loop {
            match (self.0.get(i), other.0.get(j)) {
                (None, None) => return Ordering::Equal,
                (Some(&(_, e)), None) => return e.cmp(&0),
                (None, Some(&(_, e))) => return 0.cmp(&e),
                (Some(&(a, ea)), Some(&(b, eb))) => match a.cmp(&b) {
                    Ordering::Less => return ea.cmp(&0),
                    Ordering::Greater => return 0.cmp(&eb),
                    Ordering::Equal if ea != eb => return ea.cmp(&eb),
                    Ordering::Equal => {
                        i += 1;
                        j += 1;
                    }
                },
            }
        }
    }

    /// Raises to an integer power; `None` if an exponent overflows.
    #[must_use]
    pub fn pow(&self, n: i32) -> Option<Self> {
        if n == 0 {
            return Some(Self::one());
        }
        self.0
            .iter()
            .map(|&(a, e)| e.checked_mul(n).map(|e| (a, e)))
            .collect::<Option<SmallVec<_>>>()
            .map(Self)
    }
}
