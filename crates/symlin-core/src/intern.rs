//! Interning tables.
//!
//! Backs both node hash-consing and the symbol table of the arena.

use hashbrown::HashMap;
use std::borrow::Borrow;
use std::hash::Hash;
use std::ops::Index;

/// Maps each distinct value to a dense `u32` id, in first-seen order.
#[derive(Debug, Clone)]
pub struct InternTable<T> {
    ids: HashMap<T, u32>,
    values: Vec<T>,
}

impl<T> Default for InternTable<T> {
    fn default() -> Self {
        Self {
            ids: HashMap::new(),
            values: Vec::new(),
        }
    }
}

impl<T: Clone + Eq + Hash> InternTable<T> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table with room for `capacity` values.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: HashMap::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    /// Interns an owned value and returns its id.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` values are interned.
    pub fn intern(&mut self, value: T) -> u32 {
        if let Some(&id) = self.ids.get(&value) {
            return id;
        }
        self.push(value)
    }

    /// Interns a borrowed value, cloning it only when it is new.
    ///
    /// # Panics
    ///
    /// Same as [`InternTable::intern`].
    pub fn intern_ref<Q>(&mut self, value: &Q) -> u32
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq + ToOwned<Owned = T>,
    {
        if let Some(&id) = self.ids.get(value) {
            return id;
        }
        self.push(value.to_owned())
    }

    fn push(&mut self, value: T) -> u32 {
        let id = u32::try_from(self.values.len()).expect("intern table capacity exceeded");
        self.ids.insert(value.clone(), id);
        self.values.push(value);
        id
    }

    /// Returns the value with the given id.
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&T> {
        self.values.get(id as usize)
    }

    /// Returns the id of a value that has already been interned.
    #[must_use]
    pub fn lookup<Q>(&self, value: &Q) -> Option<u32>
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.ids.get(value).copied()
    }

    /// Returns the number of interned values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing has been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<T> Index<u32> for InternTable<T> {
    type Output = T;

    fn index(&self, id: u32) -> &T {
        &self.values[id as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_dense_and_stable() {
        let mut table = InternTable::new();

        let x = table.intern_ref("x");
        let y = table.intern("y".to_string());
        let x_again = table.intern_ref("x");

        assert_eq!((x, y), (0, 1));
        assert_eq!(x, x_again);
        assert_eq!(table.len(), 2);
        assert_eq!(table[y], "y");
        assert_eq!(table.lookup("x"), Some(0));
        assert_eq!(table.lookup("z"), None);
    }
}
