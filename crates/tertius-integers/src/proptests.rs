//! Property-based tests for arbitrary precision arithmetic.

#[cfg(test)]
mod tests {
    use num_traits::{One, Zero};
    use proptest::prelude::*;

    use crate::Integer;

    // Strategy for generating small integers
    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    proptest! {
        // Integer ring axioms

        #[test]
        fn integer_add_commutative(a in small_int(), b in small_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            prop_assert_eq!(a.clone() + b.clone(), b + a);
        }

        #[test]
        fn integer_mul_associative(a in small_int(), b in small_int(), c in small_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let c = Integer::new(c);
            prop_assert_eq!(
                (a.clone() * b.clone()) * c.clone(),
                a * (b * c)
            );
        }

        #[test]
        fn integer_distributive(a in small_int(), b in small_int(), c in small_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let c = Integer::new(c);
            prop_assert_eq!(
                a.clone() * (b.clone() + c.clone()),
                a.clone() * b + a * c
            );
        }

        #[test]
        fn integer_additive_inverse(a in small_int()) {
            let a = Integer::new(a);
            let neg_a = -a.clone();
            prop_assert!((a + neg_a).is_zero());
        }

        #[test]
        fn integer_assign_ops_match_binary(a in small_int(), b in small_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);

            let mut sum = a.clone();
            sum += &b;
            prop_assert_eq!(sum, &a + &b);

            let mut product = a.clone();
            product *= &b;
            prop_assert_eq!(product, &a * &b);
        }

        #[test]
        fn pow_matches_repeated_mul(a in -50i64..50i64, e in 0u32..6u32) {
            let base = Integer::new(a);
            let mut expected = Integer::one();
            for _ in 0..e {
                expected = expected * base.clone();
            }
            prop_assert_eq!(base.pow(e), expected);
        }

        #[test]
        fn signum_matches_ordering(a in small_int()) {
            let x = Integer::new(a);
            prop_assert_eq!(i64::from(x.signum()), a.signum());
            prop_assert_eq!(x.is_negative(), a < 0);
        }
    }
}
