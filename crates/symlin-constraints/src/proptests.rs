//! Property-based tests for ordered sets.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::OrderedSet;

    // Small alphabet so that repeats are common
    fn values() -> impl Strategy<Value = Vec<u8>> {
        prop::collection::vec(0u8..16, 0..32)
    }

    fn distinct_in_order(values: &[u8]) -> Vec<u8> {
        let mut seen = Vec::new();
        for &v in values {
            if !seen.contains(&v) {
                seen.push(v);
            }
        }
        seen
    }

    proptest! {
        #[test]
        fn append_keeps_first_appearance(values in values()) {
            let mut set = OrderedSet::new();
            for &v in &values {
                set.append(v);
                prop_assert!(set.is_consistent());
            }
            let expected = distinct_in_order(&values);
            prop_assert_eq!(set.as_slice(), expected.as_slice());
        }

        #[test]
        fn remove_shifts_later_positions(values in values(), pick in any::<prop::sample::Index>()) {
            let original: OrderedSet<u8> = values.into_iter().collect();
            prop_assume!(!original.is_empty());
            let i = pick.index(original.len());

            let mut set = original.clone();
            let removed = set.remove(i).unwrap();
            prop_assert_eq!(Some(&removed), original.get(i));
            prop_assert!(set.is_consistent());
            prop_assert_eq!(set.len(), original.len() - 1);

            for j in 0..set.len() {
                let expected = if j < i { original.at(j) } else { original.at(j + 1) };
                prop_assert_eq!(set.at(j), expected);
            }
        }

        #[test]
        fn insert_then_remove_restores(values in values(), v in 16u8..32, pick in any::<prop::sample::Index>()) {
            let original: OrderedSet<u8> = values.into_iter().collect();
            let position = pick.index(original.len() + 1);

            let mut set = original.clone();
            prop_assert_eq!(set.insert(position, v), Ok(true));
            prop_assert!(set.is_consistent());
            prop_assert_eq!(set.index_of(&v), Some(position));
            prop_assert_eq!(set.remove(position), Ok(v));
            prop_assert_eq!(set, original);
        }

        #[test]
        fn union_is_idempotent(a in values(), b in values()) {
            let mut once: OrderedSet<u8> = a.into_iter().collect();
            let other: OrderedSet<u8> = b.into_iter().collect();
            once.union_with(&other);
            let mut twice = once.clone();
            twice.union_with(&other);

            prop_assert_eq!(&once, &twice);
            prop_assert!(once.is_consistent());
            prop_assert!(other.is_subset(&once));
        }

        #[test]
        fn subset_reflexive_and_antisymmetric(a in values(), b in values()) {
            let a: OrderedSet<u8> = a.into_iter().collect();
            let b: OrderedSet<u8> = b.into_iter().collect();
            prop_assert!(a.is_subset(&a));
            if a.is_subset(&b) && b.is_subset(&a) {
                let mut sa = a.as_slice().to_vec();
                let mut sb = b.as_slice().to_vec();
                sa.sort_unstable();
                sb.sort_unstable();
                prop_assert_eq!(sa, sb);
                prop_assert!(a.same_elements(&b));
            }
        }
    }
}
