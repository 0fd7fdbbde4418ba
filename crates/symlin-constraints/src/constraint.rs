//! Equality constraints and constraint systems.

use crate::algebra::SymbolicAlgebra;
use crate::ordered_set::OrderedSet;

/// The equation `left == right`.
///
/// Nothing is normalized at construction; the residual `left - right` is
/// only formed during extraction.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EqualityConstraint<E> {
    left: E,
    right: E,
}

impl<E> EqualityConstraint<E> {
    /// Creates the constraint `left == right`.
    pub fn new(left: E, right: E) -> Self {
        Self { left, right }
    }

    /// Returns the left-hand side.
    pub fn left(&self) -> &E {
        &self.left
    }

    /// Returns the right-hand side.
    pub fn right(&self) -> &E {
        &self.right
    }

    /// Returns the same equation with its sides swapped.
    #[must_use]
    pub fn swapped(self) -> Self {
        Self {
            left: self.right,
            right: self.left,
        }
    }
}

/// An ordered collection of equality constraints.
///
/// Insertion order is the row order of every extracted linear system.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EqualityConstraintSystem<E> {
    constraints: Vec<EqualityConstraint<E>>,
}

impl<E> EqualityConstraintSystem<E> {
    /// Creates an empty system.
    #[must_use]
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
        }
    }

    /// Appends a constraint and returns its index.
    pub fn append_constraint(&mut self, constraint: EqualityConstraint<E>) -> usize {
        self.constraints.push(constraint);
        self.constraints.len() - 1
    }

    /// Appends the constraint `left == right` and returns its index.
    pub fn append_equation(&mut self, left: E, right: E) -> usize {
        self.append_constraint(EqualityConstraint::new(left, right))
    }

    /// Returns the number of constraints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Returns true if the system has no constraints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Returns the constraint at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&EqualityConstraint<E>> {
        self.constraints.get(index)
    }

    /// Iterates over the constraints in row order.
    pub fn iter(&self) -> std::slice::Iter<'_, EqualityConstraint<E>> {
        self.constraints.iter()
    }

    /// Returns every symbol referenced by the system, in order of first
    /// appearance (constraint order, left side before right side).
    pub fn symbols<A>(&self, algebra: &A) -> OrderedSet<A::Symbol>
    where
        A: SymbolicAlgebra<Expr = E>,
    {
        self.constraints
            .iter()
            .flat_map(|c| [c.left(), c.right()])
            .flat_map(|side| algebra.free_symbols(side))
            .collect()
    }

    /// Returns the symbols referenced by the system that are not in
    /// `unknowns`. These stay symbolic in extracted constants.
    pub fn parameters<A>(
        &self,
        algebra: &A,
        unknowns: &OrderedSet<A::Symbol>,
    ) -> OrderedSet<A::Symbol>
    where
        A: SymbolicAlgebra<Expr = E>,
    {
        self.symbols(algebra)
            .into_iter()
            .filter(|symbol| !unknowns.contains(symbol))
            .collect()
    }
}

impl<E> Default for EqualityConstraintSystem<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> FromIterator<EqualityConstraint<E>> for EqualityConstraintSystem<E> {
    fn from_iter<I: IntoIterator<Item = EqualityConstraint<E>>>(iter: I) -> Self {
        Self {
            constraints: iter.into_iter().collect(),
        }
    }
}

impl<E> Extend<EqualityConstraint<E>> for EqualityConstraintSystem<E> {
    fn extend<I: IntoIterator<Item = EqualityConstraint<E>>>(&mut self, iter: I) {
        self.constraints.extend(iter);
    }
}

impl<'a, E> IntoIterator for &'a EqualityConstraintSystem<E> {
    type Item = &'a EqualityConstraint<E>;
    type IntoIter = std::slice::Iter<'a, EqualityConstraint<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.constraints.iter()
    }
}
