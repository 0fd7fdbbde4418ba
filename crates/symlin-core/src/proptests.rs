//! Property-based tests for exact arithmetic and hash-consing.

#[cfg(test)]
mod tests {
    use num_traits::{One, Zero};
    use proptest::prelude::*;
    use smallvec::smallvec;

    use crate::{ExprArena, Rational};

    fn rational() -> impl Strategy<Value = Rational> {
        (-1000i64..1000, prop_oneof![(-50i64..=-1), (1i64..=50)])
            .prop_map(|(n, d)| Rational::new(n, d).unwrap())
    }

    proptest! {
        #[test]
        fn rational_add_commutative(a in rational(), b in rational()) {
            prop_assert_eq!(&a + &b, &b + &a);
        }

        #[test]
        fn rational_distributive(a in rational(), b in rational(), c in rational()) {
            prop_assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
        }

        #[test]
        fn rational_inverse(a in rational()) {
            match a.checked_recip() {
                Some(inv) => prop_assert!((&a * &inv).is_one()),
                None => prop_assert!(a.is_zero()),
            }
        }

        #[test]
        fn rational_sign_matches_negation(a in rational()) {
            prop_assert_eq!(a.signum(), -(-&a).signum());
            prop_assert_eq!(a.abs(), (-&a).abs());
        }

        #[test]
        fn interning_is_structural(n in -100i64..100, name in "[a-z]{1,3}") {
            let mut arena = ExprArena::new();
            let s = arena.symbol(&name);
            let k = arena.integer(n);
            let first = arena.mul(smallvec![k, s]);
            let before = arena.len();
            let k2 = arena.integer(n);
            let s2 = arena.symbol(&name);
            let second = arena.mul(smallvec![k2, s2]);
            prop_assert_eq!(first, second);
            prop_assert_eq!(arena.len(), before);
        }
    }
}
