//! Term arithmetic: addition, scalar combination and multiplication.
//!
//! Sums are two-pointer merges of canonical term sequences and stay
//! canonical by construction. Products size the exponent field from the
//! operands' maxima before multiplying, growing the context and
//! re-encoding both operands when the current width is too narrow.

use std::borrow::Cow;
use std::cmp::Ordering;

use num_traits::Zero;
use tertius_integers::Integer;
use tracing::{debug, trace};

use crate::algorithms::geobucket::geobucket_multiply;
use crate::codec::{bits_for, ExpLayout, MAX_EXP_BITS};
use crate::error::{MPolyError, Result};
use crate::poly::{MPoly, Term};

/// Merges `a + f(b)` where both runs are descending, dropping zero sums.
fn merge_terms(layout: &ExpLayout, a: &[Term], b: &[Term], f: impl Fn(&Integer) -> Integer) -> Vec<Term> {
    let mut result = Vec::with_capacity(a.len() + b.len());
    let mut i = 0;
    let mut j = 0;

    while i < a.len() && j < b.len() {
        match layout.compare(&a[i].0, &b[j].0) {
            Ordering::Greater => {
                result.push(a[i].clone());
                i += 1;
            }
            Ordering::Less => {
                result.push((b[j].0.clone(), f(&b[j].1)));
                j += 1;
            }
            Ordering::Equal => {
                let sum = a[i].1.clone() + f(&b[j].1);
                if !sum.is_zero() {
                    result.push((a[i].0.clone(), sum));
                }
                i += 1;
                j += 1;
            }
        }
    }

    // Append remaining terms
    result.extend_from_slice(&a[i..]);
    result.extend(b[j..].iter().map(|(m, c)| (m.clone(), f(c))));

    result
}

impl<'ctx> MPoly<'ctx> {
    /// Brings both operands to a common layout at least `min_bits` wide.
    fn aligned<'a>(
        &'a self,
        other: &'a Self,
        min_bits: u32,
    ) -> Result<(ExpLayout, Cow<'a, [Term]>, Cow<'a, [Term]>)> {
        self.context().check_compatible(other.context())?;

        let bits = min_bits.max(self.bits()).max(other.bits());
        let layout = self.context().layout_for(bits)?;
        let a = self.terms_in(&layout)?;
        let b = other.terms_in(&layout)?;
        Ok((layout, a, b))
    }

    /// Adds two polynomials.
    ///
    /// # Errors
    ///
    /// Returns [`MPolyError::ContextMismatch`] if the contexts differ in
    /// variable count or ordering.
    pub fn add(&self, other: &Self) -> Result<Self> {
        let (layout, a, b) = self.aligned(other, 0)?;
        let terms = merge_terms(&layout, &a, &b, Integer::clone);
        Ok(Self::from_raw(self.context(), layout, terms))
    }

    /// Subtracts two polynomials.
    ///
    /// # Errors
    ///
    /// Returns [`MPolyError::ContextMismatch`] if the contexts differ in
    /// variable count or ordering.
    pub fn sub(&self, other: &Self) -> Result<Self> {
        let (layout, a, b) = self.aligned(other, 0)?;
        let terms = merge_terms(&layout, &a, &b, |c| -c);
        Ok(Self::from_raw(self.context(), layout, terms))
    }

    /// Computes `self + scale * other`.
    ///
    /// # Errors
    ///
    /// Returns [`MPolyError::ContextMismatch`] if the contexts differ in
    /// variable count or ordering.
    pub fn add_scaled(&self, other: &Self, scale: &Integer) -> Result<Self> {
        if scale.is_zero() {
            self.context().check_compatible(other.context())?;
            return Ok(self.clone());
        }
        let (layout, a, b) = self.aligned(other, 0)?;
        let terms = merge_terms(&layout, &a, &b, |c| c * scale);
        Ok(Self::from_raw(self.context(), layout, terms))
    }

    /// Negates a polynomial.
    #[must_use]
    pub fn neg(&self) -> Self {
        let terms = self.packed_terms().iter().map(|(m, c)| (m.clone(), -c)).collect();
        Self::from_raw(self.context(), self.layout().clone(), terms)
    }

    /// Multiplies by a scalar.
    #[must_use]
    pub fn scale(&self, c: &Integer) -> Self {
        if c.is_zero() {
            return Self::zero(self.context());
        }
        let terms = self
            .packed_terms()
            .iter()
            .map(|(m, x)| (m.clone(), x * c))
            .collect();
        Self::from_raw(self.context(), self.layout().clone(), terms)
    }

    /// Multiplies two polynomials.
    ///
    /// # Errors
    ///
    /// Returns [`MPolyError::ContextMismatch`] if the contexts differ, and
    /// [`MPolyError::Overflow`] if a product exponent needs more than the
    /// widest field.
    pub fn mul(&self, other: &Self) -> Result<Self> {
        self.context().check_compatible(other.context())?;

        if self.is_zero() || other.is_zero() {
            return Ok(Self::zero(self.context()));
        }

        let bits = self.product_bits(other)?;
        if bits > self.context().exp_bits() {
            debug!(
                needed = bits,
                current = self.context().exp_bits(),
                "product exponents overflow the context width"
            );
        }

        let (layout, a, b) = self.aligned(other, bits)?;
        trace!(lhs = a.len(), rhs = b.len(), bits = layout.bits(), "multiplying");

        let terms = geobucket_multiply(&a, &b, &layout);
        Ok(Self::from_raw(self.context(), layout, terms))
    }

    /// Raises a polynomial to a non-negative power by repeated squaring.
    ///
    /// # Errors
    ///
    /// Returns [`MPolyError::Overflow`] if an exponent of the result needs
    /// more than the widest field.
    pub fn pow(&self, k: u32) -> Result<Self> {
        let mut result = Self::one(self.context());
        if k == 0 {
            return Ok(result);
        }

        let mut base = self.clone();
        let mut exp = k;
        loop {
            if exp & 1 == 1 {
                result = result.mul(&base)?;
            }
            exp >>= 1;
            if exp == 0 {
                break;
            }
            base = base.mul(&base)?;
        }

        Ok(result)
    }

    /// Returns the field width the product with `other` needs.
    fn product_bits(&self, other: &Self) -> Result<u32> {
        let (max_a, total_a) = self.max_exponents();
        let (max_b, total_b) = other.max_exponents();

        let mut widest = max_a
            .iter()
            .zip(&max_b)
            .map(|(&x, &y)| u128::from(x) + u128::from(y))
            .max()
            .unwrap_or(0);
        if self.order().is_graded() {
            widest = widest.max(total_a + total_b);
        }

        let widest = u64::try_from(widest)
            .map_err(|_| MPolyError::Overflow(format!("product exponent {widest} exceeds u64")))?;
        let bits = bits_for(widest);
        if bits > MAX_EXP_BITS {
            return Err(MPolyError::Overflow(format!(
                "product exponent {widest} needs {bits} bits, limit is {MAX_EXP_BITS}"
            )));
        }
        Ok(bits)
    }
}
