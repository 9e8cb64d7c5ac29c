//! Property-based tests for multivariate polynomial arithmetic.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use tertius_integers::Integer;

    use crate::codec::ExpLayout;
    use crate::context::MPolyContext;
    use crate::ordering::MonomialOrder;
    use crate::poly::MPoly;
    use crate::random::{exp_bits_limit, random_context, random_poly};

    const NVARS: usize = 3;

    type RawTerms = Vec<(i64, Vec<u64>)>;

    fn order() -> impl Strategy<Value = MonomialOrder> {
        prop_oneof![
            Just(MonomialOrder::Lex),
            Just(MonomialOrder::Grlex),
            Just(MonomialOrder::Grevlex),
        ]
    }

    // Small exponents keep products inside the initial width most of the time
    fn raw_terms() -> impl Strategy<Value = RawTerms> {
        proptest::collection::vec(
            (-20i64..20i64, proptest::collection::vec(0u64..6u64, NVARS)),
            0..=6,
        )
    }

    // Occasionally large exponents, to exercise width growth
    fn wide_terms() -> impl Strategy<Value = RawTerms> {
        proptest::collection::vec(
            (
                -20i64..20i64,
                proptest::collection::vec(prop_oneof![0u64..4u64, 200u64..70_000u64], NVARS),
            ),
            0..=4,
        )
    }

    fn build<'c>(ctx: &'c MPolyContext, raw: &RawTerms) -> MPoly<'c> {
        MPoly::from_terms(ctx, raw.iter().map(|(c, e)| (Integer::new(*c), e.clone()))).unwrap()
    }

    proptest! {
        #[test]
        fn pack_unpack_round_trip(
            order in order(),
            bits in 22u32..=63u32,
            exps in proptest::collection::vec(0u64..(1 << 20), NVARS)
        ) {
            let layout = ExpLayout::new(NVARS, order, bits).unwrap();
            let m = layout.pack(&exps).unwrap();
            prop_assert_eq!(layout.unpack(&m), exps);
        }

        #[test]
        fn packed_compare_agrees_with_order(
            order in order(),
            a in proptest::collection::vec(0u64..50u64, NVARS),
            b in proptest::collection::vec(0u64..50u64, NVARS)
        ) {
            let layout = ExpLayout::new(NVARS, order, 8).unwrap();
            let pa = layout.pack(&a).unwrap();
            let pb = layout.pack(&b).unwrap();
            prop_assert_eq!(layout.compare(&pa, &pb), order.compare_exponents(&a, &b));
        }

        #[test]
        fn packed_ops_agree_across_words(
            order in order(),
            bits in 12u32..=40u32,
            (a, b) in (2usize..=12).prop_flat_map(|n| (
                proptest::collection::vec(0u64..128u64, n),
                proptest::collection::vec(0u64..128u64, n),
            ))
        ) {
            // Up to 13 fields of 12..40 bits span between one and thirteen words
            let layout = ExpLayout::new(a.len(), order, bits).unwrap();
            let pa = layout.pack(&a).unwrap();
            let pb = layout.pack(&b).unwrap();

            prop_assert_eq!(layout.compare(&pa, &pb), order.compare_exponents(&a, &b));
            prop_assert_eq!(layout.compare(&pb, &pa), order.compare_exponents(&b, &a));

            let sum: Vec<u64> = a.iter().zip(&b).map(|(x, y)| x + y).collect();
            prop_assert_eq!(layout.unpack(&pa.mul(&pb)), sum);
        }

        #[test]
        fn add_and_mul_are_canonical(order in order(), a in wide_terms(), b in wide_terms()) {
            let ctx = MPolyContext::new(NVARS, order).unwrap();
            let a = build(&ctx, &a);
            let b = build(&ctx, &b);
            prop_assert!(a.add(&b).unwrap().is_canonical());
            prop_assert!(a.mul(&b).unwrap().is_canonical());
        }

        #[test]
        fn add_identity_and_inverse(order in order(), a in raw_terms()) {
            let ctx = MPolyContext::new(NVARS, order).unwrap();
            let a = build(&ctx, &a);
            prop_assert_eq!(a.add(&MPoly::zero(&ctx)).unwrap(), a.clone());
            prop_assert!(a.add(&a.neg()).unwrap().is_zero());
        }

        #[test]
        fn add_commutative(order in order(), a in raw_terms(), b in raw_terms()) {
            let ctx = MPolyContext::new(NVARS, order).unwrap();
            let a = build(&ctx, &a);
            let b = build(&ctx, &b);
            prop_assert_eq!(a.add(&b).unwrap(), b.add(&a).unwrap());
        }

        #[test]
        fn mul_distributes_over_add(
            order in order(),
            a in raw_terms(),
            b in raw_terms(),
            c in wide_terms()
        ) {
            let ctx = MPolyContext::new(NVARS, order).unwrap();
            let a = build(&ctx, &a);
            let b = build(&ctx, &b);
            let c = build(&ctx, &c);

            let left = a.add(&b).unwrap().mul(&c).unwrap();
            let right = a.mul(&c).unwrap().add(&b.mul(&c).unwrap()).unwrap();
            prop_assert_eq!(left, right);
        }

        #[test]
        fn mul_matches_schoolbook(order in order(), a in wide_terms(), b in raw_terms()) {
            let ctx = MPolyContext::new(NVARS, order).unwrap();
            let pa = build(&ctx, &a);
            let pb = build(&ctx, &b);

            let mut products = Vec::new();
            for (ca, ea) in pa.terms() {
                for (cb, eb) in pb.terms() {
                    let e: Vec<u64> = ea.iter().zip(&eb).map(|(x, y)| x + y).collect();
                    products.push((ca * cb, e));
                }
            }
            let expected = MPoly::from_terms(&ctx, products).unwrap();
            prop_assert_eq!(pa.mul(&pb).unwrap(), expected);
        }

        #[test]
        fn evaluation_eliminates_variable(
            order in order(),
            a in wide_terms(),
            var in 0..NVARS,
            value in -5i64..5i64
        ) {
            let ctx = MPolyContext::new(NVARS, order).unwrap();
            let p = build(&ctx, &a);
            let r = p.evaluate_one(var, &Integer::new(value)).unwrap();
            prop_assert!(r.is_canonical());
            prop_assert!(r.degree(var).unwrap() <= 0);
        }

        #[test]
        fn evaluation_is_a_ring_map(
            order in order(),
            a in raw_terms(),
            b in raw_terms(),
            var in 0..NVARS,
            value in -5i64..5i64
        ) {
            let ctx = MPolyContext::new(NVARS, order).unwrap();
            let a = build(&ctx, &a);
            let b = build(&ctx, &b);
            let v = Integer::new(value);

            let sum_then_eval = a.add(&b).unwrap().evaluate_one(var, &v).unwrap();
            let eval_then_sum = a.evaluate_one(var, &v).unwrap().add(&b.evaluate_one(var, &v).unwrap()).unwrap();
            prop_assert_eq!(sum_then_eval, eval_then_sum);

            let prod_then_eval = a.mul(&b).unwrap().evaluate_one(var, &v).unwrap();
            let eval_then_prod = a.evaluate_one(var, &v).unwrap().mul(&b.evaluate_one(var, &v).unwrap()).unwrap();
            prop_assert_eq!(prod_then_eval, eval_then_prod);
        }

        #[test]
        fn used_vars_agree_with_degree(order in order(), a in wide_terms()) {
            let ctx = MPolyContext::new(NVARS, order).unwrap();
            let p = build(&ctx, &a);
            let used = p.used_vars();
            for var in 0..NVARS {
                prop_assert_eq!(used[var], p.degree(var).unwrap() > 0);
            }
        }

        #[test]
        fn random_evaluation_keeps_used_vars_consistent(seed in any::<u64>()) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let ctx = random_context(&mut rng, 8).unwrap();
            let nvars = ctx.nvars();
            let one = Integer::new(1);

            for _ in 0..nvars {
                let len = rand::Rng::gen_range(&mut rng, 0..60);
                let exp_bits = rand::Rng::gen_range(&mut rng, 2u32..70).min(exp_bits_limit(&ctx));
                let coeff_bits = rand::Rng::gen_range(&mut rng, 0..100);
                let mut f = random_poly(&mut rng, &ctx, len, coeff_bits, exp_bits).unwrap();

                for _ in 0..rand::Rng::gen_range(&mut rng, 0..nvars) {
                    let var = rand::Rng::gen_range(&mut rng, 0..nvars);
                    f = f.evaluate_one(var, &one).unwrap();
                }

                let used = f.used_vars();
                for var in 0..nvars {
                    prop_assert_eq!(used[var], f.degree(var).unwrap() > 0);
                }
            }
        }
    }
}
