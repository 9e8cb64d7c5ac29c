//! Random contexts and polynomials for randomized testing.
//!
//! Every generator takes the random source as an argument, so a seeded
//! generator reproduces the same polynomials.

use num_traits::Zero;
use rand::Rng;
use tertius_integers::Integer;

use crate::codec::{bits_for, MAX_EXP_BITS};
use crate::context::MPolyContext;
use crate::error::{MPolyError, Result};
use crate::ordering::MonomialOrder;
use crate::poly::MPoly;

/// Creates a context with between 1 and `max_vars` variables and a random ordering.
///
/// # Errors
///
/// Returns [`MPolyError::InvalidArgument`] if `max_vars` is zero.
pub fn random_context<R: Rng + ?Sized>(rng: &mut R, max_vars: usize) -> Result<MPolyContext> {
    if max_vars == 0 {
        return Err(MPolyError::InvalidArgument(
            "number of variables must be positive".to_string(),
        ));
    }
    let nvars = rng.gen_range(1..=max_vars);
    let order = MonomialOrder::ALL[rng.gen_range(0..MonomialOrder::ALL.len())];
    MPolyContext::new(nvars, order)
}

/// Returns a random integer with at most `bits` bits and a random sign.
pub fn random_integer<R: Rng + ?Sized>(rng: &mut R, bits: u32) -> Integer {
    let mut value = Integer::zero();
    let mut remaining = bits;
    while remaining > 0 {
        let take = remaining.min(u64::BITS);
        let word = if take == u64::BITS {
            rng.gen::<u64>()
        } else {
            rng.gen::<u64>() >> (u64::BITS - take)
        };
        value = value.shl(take as usize) + Integer::from(word);
        remaining -= take;
    }

    if rng.gen_bool(0.5) {
        -value
    } else {
        value
    }
}

/// Returns the widest exponent, in bits, that [`random_poly`] accepts for `ctx`.
///
/// Under graded orderings the total degree of `nvars` such exponents must
/// also fit the widest field, which costs `bits_for(nvars)` bits.
#[must_use]
pub fn exp_bits_limit(ctx: &MPolyContext) -> u32 {
    if ctx.order().is_graded() {
        MAX_EXP_BITS - bits_for(ctx.nvars() as u64)
    } else {
        MAX_EXP_BITS
    }
}

/// Creates a random polynomial with up to `len` terms.
///
/// Coefficients have at most `coeff_bits` bits and exponents at most
/// `exp_bits` bits. Duplicate monomials are combined and zero coefficients
/// dropped, so the result may have fewer than `len` terms.
///
/// # Errors
///
/// Returns [`MPolyError::Overflow`] if `exp_bits` exceeds
/// [`exp_bits_limit`] for `ctx`.
pub fn random_poly<'ctx, R: Rng + ?Sized>(
    rng: &mut R,
    ctx: &'ctx MPolyContext,
    len: usize,
    coeff_bits: u32,
    exp_bits: u32,
) -> Result<MPoly<'ctx>> {
    let limit = exp_bits_limit(ctx);
    if exp_bits > limit {
        return Err(MPolyError::Overflow(format!(
            "{exp_bits}-bit exponents exceed the {limit}-bit limit for {ctx}"
        )));
    }
    let nvars = ctx.nvars();

    let terms: Vec<(Integer, Vec<u64>)> = (0..len)
        .map(|_| {
            let exps = (0..nvars)
                .map(|_| {
                    if exp_bits == 0 {
                        0
                    } else {
                        rng.gen::<u64>() >> (u64::BITS - exp_bits)
                    }
                })
                .collect();
            (random_integer(rng, coeff_bits), exps)
        })
        .collect();

    MPoly::from_terms(ctx, terms)
}
