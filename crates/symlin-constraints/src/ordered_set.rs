//! Insertion-ordered sets without duplicates.
//!
//! An [`OrderedSet`] is a dense vector of elements plus a reverse index from
//! element to position. The two are updated together by every mutation, and
//! only the entries whose position actually moves are rewritten.

use rustc_hash::FxHashMap;
use std::fmt;
use std::hash::Hash;

use symlin_core::SymbolId;

use crate::error::OrderedSetError;

/// An ordered set of unknowns; the column order of an extracted system.
pub type OrderedVariableSet = OrderedSet<SymbolId>;

/// An insertion-ordered set with O(1) membership and position lookup.
#[derive(Clone)]
pub struct OrderedSet<T> {
    items: Vec<T>,
    index: FxHashMap<T, usize>,
}

impl<T: Clone + Eq + Hash> OrderedSet<T> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Creates an empty set with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the set has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends `value` unless it is already present.
    ///
    /// Returns true if the value was added.
    pub fn append(&mut self, value: T) -> bool {
        if self.index.contains_key(&value) {
            return false;
        }
        self.index.insert(value.clone(), self.items.len());
        self.items.push(value);
        true
    }

    /// Inserts `value` at `position`, shifting later elements right.
    ///
    /// Returns `Ok(false)` and leaves the set unchanged if the value is
    /// already present.
    ///
    /// # Errors
    ///
    /// Returns [`OrderedSetError::IndexOutOfRange`] if `position > len()`.
    pub fn insert(&mut self, position: usize, value: T) -> Result<bool, OrderedSetError> {
        if position > self.items.len() {
            return Err(self.out_of_range(position));
        }
        if self.index.contains_key(&value) {
            return Ok(false);
        }
        self.items.insert(position, value);
        self.reindex_from(position);
        Ok(true)
    }

    /// Removes and returns the element at `position`, shifting later
    /// elements left.
    ///
    /// # Errors
    ///
    /// Returns [`OrderedSetError::IndexOutOfRange`] if `position >= len()`.
    pub fn remove(&mut self, position: usize) -> Result<T, OrderedSetError> {
        if position >= self.items.len() {
            return Err(self.out_of_range(position));
        }
        let removed = self.items.remove(position);
        self.index.remove(&removed);
        self.reindex_from(position);
        Ok(removed)
    }

    /// Returns the element at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderedSetError::IndexOutOfRange`] if `position >= len()`.
    pub fn at(&self, position: usize) -> Result<&T, OrderedSetError> {
        self.items
            .get(position)
            .ok_or_else(|| self.out_of_range(position))
    }

    /// Returns the element at `position`, if any.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&T> {
        self.items.get(position)
    }

    /// Returns true if `value` is in the set.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.index.contains_key(value)
    }

    /// Returns the position of `value`.
    #[must_use]
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.index.get(value).copied()
    }

    /// Iterates over the elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Returns the elements in order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Appends every element of `other` not already present, in `other`'s
    /// order.
    pub fn union_with(&mut self, other: &Self) {
        for value in other {
            self.append(value.clone());
        }
    }

    /// Returns true if every element of `self` is in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.len() <= other.len() && self.items.iter().all(|value| other.contains(value))
    }

    /// Returns true if both sets hold the same elements, in any order.
    #[must_use]
    pub fn same_elements(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_subset(other)
    }

    /// Checks that the reverse index agrees with the element order.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.items.len() == self.index.len()
            && self
                .items
                .iter()
                .enumerate()
                .all(|(position, value)| self.index.get(value) == Some(&position))
    }

    fn reindex_from(&mut self, start: usize) {
        for (position, value) in self.items.iter().enumerate().skip(start) {
            self.index.insert(value.clone(), position);
        }
    }

    fn out_of_range(&self, index: usize) -> OrderedSetError {
        OrderedSetError::IndexOutOfRange {
            index,
            len: self.items.len(),
        }
    }
}

impl<T: Clone + Eq + Hash> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sets are equal when they hold the same elements in the same order.
impl<T: Eq> PartialEq for OrderedSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Eq> Eq for OrderedSet<T> {}

impl<T: fmt::Debug> fmt::Debug for OrderedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.items).finish()
    }
}

impl<T: Clone + Eq + Hash> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Clone + Eq + Hash> Extend<T> for OrderedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.append(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for OrderedSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
