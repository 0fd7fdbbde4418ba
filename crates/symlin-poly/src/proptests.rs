//! Property-based tests for canonical forms.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use smallvec::smallvec;
    use symlin_core::{functions, ExprArena, ExprHandle, Rational};

    use crate::{ExprConverter, Monomial, SparsePoly};

    const SYMBOLS: [&str; 3] = ["x", "y", "a"];

    /// A small expression tree, materialized into an arena per case.
    #[derive(Clone, Debug)]
    enum Tree {
        Int(i64),
        Sym(usize),
        Add(Box<Tree>, Box<Tree>),
        Mul(Box<Tree>, Box<Tree>),
        Neg(Box<Tree>),
        Square(Box<Tree>),
        Sin(Box<Tree>),
    }

    fn tree() -> impl Strategy<Value = Tree> {
        let leaf = prop_oneof![
            (-5i64..=5).prop_map(Tree::Int),
            (0..SYMBOLS.len()).prop_map(Tree::Sym),
        ];
        leaf.prop_recursive(4, 24, 2, |inner| {
            prop_oneof![
                (inner.clone(), inner.clone())
                    .prop_map(|(l, r)| Tree::Add(Box::new(l), Box::new(r))),
                (inner.clone(), inner.clone())
                    .prop_map(|(l, r)| Tree::Mul(Box::new(l), Box::new(r))),
                inner.clone().prop_map(|t| Tree::Neg(Box::new(t))),
                inner.clone().prop_map(|t| Tree::Square(Box::new(t))),
                inner.prop_map(|t| Tree::Sin(Box::new(t))),
            ]
        })
    }

    fn build(arena: &mut ExprArena, tree: &Tree) -> ExprHandle {
        match tree {
            Tree::Int(n) => arena.integer(*n),
            Tree::Sym(i) => arena.symbol(SYMBOLS[*i]),
            Tree::Add(l, r) => {
                let l = build(arena, l);
                let r = build(arena, r);
                arena.add(smallvec![l, r])
            }
            Tree::Mul(l, r) => {
                let l = build(arena, l);
                let r = build(arena, r);
                arena.mul(smallvec![l, r])
            }
            Tree::Neg(t) => {
                let t = build(arena, t);
                arena.neg(t)
            }
            Tree::Square(t) => {
                let t = build(arena, t);
                arena.powi(t, 2)
            }
            Tree::Sin(t) => {
                let t = build(arena, t);
                arena.apply(functions::SIN, t)
            }
        }
    }

    /// A Laurent polynomial in two atoms with small exponents.
    fn laurent() -> impl Strategy<Value = SparsePoly> {
        prop::collection::vec((-2i32..=2, -2i32..=2, -4i64..=4), 1..5).prop_map(|terms| {
            let terms = terms
                .into_iter()
                .map(|(ex, ey, c)| {
                    let m = Monomial::power(ExprHandle::new(0), ex)
                        .mul(&Monomial::power(ExprHandle::new(1), ey))
                        .unwrap();
                    (m, Rational::integer(c))
                })
                .collect();
            SparsePoly::from_terms(terms)
        })
    }

    proptest! {
        #[test]
        fn div_exact_inverts_mul(p in laurent(), q in laurent()) {
            prop_assume!(!q.is_zero());
            let product = p.mul(&q).unwrap();
            prop_assert_eq!(product.div_exact(&q), Some(p));
        }

        #[test]
        fn canonical_idempotent(t in tree()) {
            let mut arena = ExprArena::new();
            let e = build(&mut arena, &t);
            let mut conv = ExprConverter::new(&mut arena);
            let once = conv.canonical(e).unwrap();
            prop_assert_eq!(conv.canonical(once).unwrap(), once);
        }

        #[test]
        fn canonical_add_commutative(a in tree(), b in tree()) {
            let mut arena = ExprArena::new();
            let a = build(&mut arena, &a);
            let b = build(&mut arena, &b);
            let ab = arena.add(smallvec![a, b]);
            let ba = arena.add(smallvec![b, a]);
            let mut conv = ExprConverter::new(&mut arena);
            prop_assert_eq!(conv.canonical(ab).unwrap(), conv.canonical(ba).unwrap());
        }

        #[test]
        fn canonical_mul_commutative(a in tree(), b in tree()) {
            let mut arena = ExprArena::new();
            let a = build(&mut arena, &a);
            let b = build(&mut arena, &b);
            let ab = arena.mul(smallvec![a, b]);
            let ba = arena.mul(smallvec![b, a]);
            let mut conv = ExprConverter::new(&mut arena);
            prop_assert_eq!(conv.canonical(ab).unwrap(), conv.canonical(ba).unwrap());
        }

        #[test]
        fn canonical_distributive(a in tree(), b in tree(), c in tree()) {
            let mut arena = ExprArena::new();
            let a = build(&mut arena, &a);
            let b = build(&mut arena, &b);
            let c = build(&mut arena, &c);
            let sum = arena.add(smallvec![b, c]);
            let lhs = arena.mul(smallvec![a, sum]);
            let ab = arena.mul(smallvec![a, b]);
            let ac = arena.mul(smallvec![a, c]);
            let rhs = arena.add(smallvec![ab, ac]);
            let mut conv = ExprConverter::new(&mut arena);
            prop_assert_eq!(conv.canonical(lhs).unwrap(), conv.canonical(rhs).unwrap());
        }

        #[test]
        fn difference_with_self_is_zero(t in tree()) {
            let mut arena = ExprArena::new();
            let e = build(&mut arena, &t);
            let diff = arena.sub(e, e);
            let zero = arena.zero();
            let mut conv = ExprConverter::new(&mut arena);
            prop_assert_eq!(conv.canonical(diff).unwrap(), zero);
        }

        #[test]
        fn affine_split_recombines(t in tree(), k in -5i64..=5) {
            // e = t + k*x where t is free of x: coef_x(e) = k, e|x=0 = t
            let mut arena = ExprArena::new();
            let x = arena.symbol("z");
            let z_id = arena.as_symbol(x).unwrap();
            let body = build(&mut arena, &t);
            let k_handle = arena.integer(k);
            let kx = arena.mul(smallvec![k_handle, x]);
            let e = arena.add(smallvec![body, kx]);
            let mut conv = ExprConverter::new(&mut arena);
            let coef = conv.linear_coefficient(e, z_id).unwrap();
            let expected = conv.canonical(k_handle).unwrap();
            prop_assert_eq!(coef, expected);
            let rest = conv.substitute_zero(e, [z_id]).unwrap();
            prop_assert_eq!(rest, conv.canonical(body).unwrap());
        }
    }
}
