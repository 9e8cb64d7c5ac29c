//! Sparse multivariate polynomials with integer coefficients.
//!
//! Terms are stored as (packed monomial, coefficient) pairs in strictly
//! decreasing monomial order, with no duplicate monomials and no zero
//! coefficients. The zero polynomial has no terms.

use std::borrow::Cow;
use std::fmt;

use num_traits::{One, Zero};
use tertius_integers::Integer;
use tracing::trace;

use crate::codec::{required_bits, ExpLayout};
use crate::context::MPolyContext;
use crate::error::{MPolyError, Result};
use crate::monomial::PackedMonomial;
use crate::ordering::MonomialOrder;

/// A packed term.
pub(crate) type Term = (PackedMonomial, Integer);

/// A sparse multivariate polynomial over the integers.
///
/// Each polynomial remembers the layout its monomials were packed with.
/// That width never exceeds the context's current width, but may lag
/// behind it after the context grows.
#[derive(Clone, Debug)]
pub struct MPoly<'ctx> {
    ctx: &'ctx MPolyContext,
    layout: ExpLayout,
    terms: Vec<Term>,
}

impl<'ctx> MPoly<'ctx> {
    /// Creates the zero polynomial.
    #[must_use]
    pub fn zero(ctx: &'ctx MPolyContext) -> Self {
        Self {
            ctx,
            layout: ctx.layout(),
            terms: Vec::new(),
        }
    }

    /// Creates the constant polynomial 1.
    #[must_use]
    pub fn one(ctx: &'ctx MPolyContext) -> Self {
        Self::constant(ctx, Integer::one())
    }

    /// Creates a constant polynomial.
    #[must_use]
    pub fn constant(ctx: &'ctx MPolyContext, c: Integer) -> Self {
        let mut poly = Self::zero(ctx);
        if !c.is_zero() {
            let words = poly.layout.words();
            poly.terms.push((PackedMonomial::one(words), c));
        }
        poly
    }

    /// Creates the polynomial x_i.
    ///
    /// # Errors
    ///
    /// Returns [`MPolyError::InvalidArgument`] if `i` is not a variable of `ctx`.
    pub fn var(ctx: &'ctx MPolyContext, i: usize) -> Result<Self> {
        ctx.check_var(i)?;
        let mut exps = vec![0; ctx.nvars()];
        exps[i] = 1;
        Self::from_term(ctx, Integer::one(), &exps)
    }

    /// Creates the single term `coeff * x^exps`.
    ///
    /// # Errors
    ///
    /// Returns [`MPolyError::InvalidArgument`] if `exps` has the wrong length,
    /// and [`MPolyError::Overflow`] if an exponent exceeds the widest field.
    pub fn from_term(ctx: &'ctx MPolyContext, coeff: Integer, exps: &[u64]) -> Result<Self> {
        Self::from_terms(ctx, [(coeff, exps.to_vec())])
    }

    /// Creates a polynomial from (coefficient, exponent vector) pairs in any order.
    ///
    /// Like terms are combined and zero coefficients dropped. The context
    /// grows if an exponent needs a wider field than it currently has.
    ///
    /// # Errors
    ///
    /// Returns [`MPolyError::InvalidArgument`] if an exponent vector has the
    /// wrong length, and [`MPolyError::Overflow`] if an exponent exceeds the
    /// widest field.
    pub fn from_terms<I>(ctx: &'ctx MPolyContext, terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Integer, Vec<u64>)>,
    {
        let terms: Vec<(Integer, Vec<u64>)> = terms.into_iter().collect();

        let mut bits = ctx.exp_bits();
        for (_, exps) in &terms {
            if exps.len() != ctx.nvars() {
                return Err(MPolyError::InvalidArgument(format!(
                    "expected {} exponents, got {}",
                    ctx.nvars(),
                    exps.len()
                )));
            }
            bits = bits.max(required_bits(exps, ctx.order())?);
        }

        let layout = ctx.layout_for(bits)?;
        let packed = terms
            .into_iter()
            .map(|(c, exps)| Ok((layout.pack(&exps)?, c)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_unsorted(ctx, layout, packed))
    }

    /// Wraps terms already in canonical form.
    pub(crate) fn from_raw(ctx: &'ctx MPolyContext, layout: ExpLayout, terms: Vec<Term>) -> Self {
        let poly = Self { ctx, layout, terms };
        debug_assert!(poly.is_canonical());
        poly
    }

    /// Wraps arbitrary packed terms and canonicalizes them.
    pub(crate) fn from_unsorted(ctx: &'ctx MPolyContext, layout: ExpLayout, terms: Vec<Term>) -> Self {
        let mut poly = Self { ctx, layout, terms };
        poly.canonicalize();
        poly
    }

    /// Sorts terms, combines like terms and drops zero coefficients.
    fn canonicalize(&mut self) {
        // Descending, so the leading term comes first
        self.terms.sort_by(|a, b| self.layout.compare(&b.0, &a.0));

        let mut combined: Vec<Term> = Vec::with_capacity(self.terms.len());
        for (m, c) in self.terms.drain(..) {
            if let Some((last, acc)) = combined.last_mut() {
                if *last == m {
                    *acc += &c;
                    continue;
                }
            }
            combined.push((m, c));
        }
        combined.retain(|(_, c)| !c.is_zero());

        self.terms = combined;
    }

    /// Returns the context this polynomial was built under.
    #[must_use]
    pub fn context(&self) -> &'ctx MPolyContext {
        self.ctx
    }

    /// Returns the packed layout of the terms.
    #[must_use]
    pub fn layout(&self) -> &ExpLayout {
        &self.layout
    }

    /// Returns the exponent field width the terms are packed with.
    #[must_use]
    pub fn bits(&self) -> u32 {
        self.layout.bits()
    }

    /// Returns the number of variables.
    #[must_use]
    pub fn nvars(&self) -> usize {
        self.ctx.nvars()
    }

    /// Returns the monomial ordering.
    #[must_use]
    pub fn order(&self) -> MonomialOrder {
        self.ctx.order()
    }

    /// Returns true if this is the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns true if this polynomial has no variable of positive degree.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        match self.terms.as_slice() {
            [] => true,
            [(m, _)] => m.is_one(),
            _ => false,
        }
    }

    /// Returns the number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if there are no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the coefficient of the i-th term.
    #[must_use]
    pub fn coeff(&self, i: usize) -> Option<&Integer> {
        self.terms.get(i).map(|(_, c)| c)
    }

    /// Returns the exponent vector of the i-th term.
    #[must_use]
    pub fn exponents(&self, i: usize) -> Option<Vec<u64>> {
        self.terms.get(i).map(|(m, _)| self.layout.unpack(m))
    }

    /// Returns the leading coefficient.
    #[must_use]
    pub fn leading_coeff(&self) -> Option<&Integer> {
        self.coeff(0)
    }

    /// Returns the exponent vector of the leading term.
    #[must_use]
    pub fn leading_exponents(&self) -> Option<Vec<u64>> {
        self.exponents(0)
    }

    /// Iterates over (coefficient, exponent vector) pairs in canonical order.
    pub fn terms(&self) -> impl Iterator<Item = (&Integer, Vec<u64>)> + '_ {
        self.terms.iter().map(|(m, c)| (c, self.layout.unpack(m)))
    }

    pub(crate) fn packed_terms(&self) -> &[Term] {
        &self.terms
    }

    /// Checks the canonical-form invariants.
    ///
    /// Terms must be strictly decreasing, coefficients nonzero, every
    /// monomial must span the layout's word count, and graded layouts
    /// must carry the true total degree.
    #[must_use]
    pub fn is_canonical(&self) -> bool {
        let words = self.layout.words();
        for (m, c) in &self.terms {
            if c.is_zero() || m.words().len() != words {
                return false;
            }
            if self.order().is_graded() {
                let exps = self.layout.unpack(m);
                let total: u128 = exps.iter().map(|&e| u128::from(e)).sum();
                if total != self.layout.total_degree(m) {
                    return false;
                }
            }
        }
        self.terms
            .windows(2)
            .all(|w| self.layout.compare(&w[0].0, &w[1].0).is_gt())
    }

    /// Re-encodes the polynomial with a `bits`-wide exponent field.
    ///
    /// Widening also grows the context.
    ///
    /// # Errors
    ///
    /// Returns [`MPolyError::Overflow`] if an exponent does not fit in `bits`
    /// or `bits` exceeds the widest field.
    pub fn repack(&self, bits: u32) -> Result<Self> {
        let layout = if bits > self.ctx.exp_bits() {
            self.ctx.layout_for(bits)?
        } else {
            ExpLayout::new(self.nvars(), self.order(), bits)?
        };
        let terms = self.terms_in(&layout)?.into_owned();
        Ok(Self::from_raw(self.ctx, layout, terms))
    }

    /// Returns the terms packed under `layout`, re-encoding when it differs.
    ///
    /// Order is preserved: the ordering does not depend on the width.
    pub(crate) fn terms_in(&self, layout: &ExpLayout) -> Result<Cow<'_, [Term]>> {
        if *layout == self.layout {
            return Ok(Cow::Borrowed(&self.terms));
        }
        trace!(from = self.layout.bits(), to = layout.bits(), terms = self.len(), "repacking terms");
        self.terms
            .iter()
            .map(|(m, c)| Ok((layout.repack(m, &self.layout)?, c.clone())))
            .collect::<Result<Vec<_>>>()
            .map(Cow::Owned)
    }

    /// Returns the largest exponent of each variable and the largest total degree.
    pub(crate) fn max_exponents(&self) -> (Vec<u64>, u128) {
        let mut maxima = vec![0u64; self.nvars()];
        let mut max_total = 0u128;
        for (m, _) in &self.terms {
            for (var, max) in maxima.iter_mut().enumerate() {
                *max = (*max).max(self.layout.exponent(m, var));
            }
            max_total = max_total.max(self.layout.total_degree(m));
        }
        (maxima, max_total)
    }
}

impl PartialEq for MPoly<'_> {
    fn eq(&self, other: &Self) -> bool {
        if !self.ctx.is_compatible(other.ctx) || self.len() != other.len() {
            return false;
        }
        if self.layout == other.layout {
            return self.terms == other.terms;
        }
        self.terms
            .iter()
            .zip(&other.terms)
            .all(|((ma, ca), (mb, cb))| ca == cb && self.layout.unpack(ma) == other.layout.unpack(mb))
    }
}

impl Eq for MPoly<'_> {}

fn monomial_to_string(exps: &[u64]) -> String {
    let parts: Vec<String> = exps
        .iter()
        .enumerate()
        .filter(|(_, e)| **e > 0)
        .map(|(i, &e)| if e == 1 { format!("x{i}") } else { format!("x{i}^{e}") })
        .collect();

    if parts.is_empty() {
        "1".to_string()
    } else {
        parts.join("*")
    }
}

impl fmt::Display for MPoly<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        for (i, (c, exps)) in self.terms().enumerate() {
            let mon = monomial_to_string(&exps);
            let (sign, abs) = if c.is_negative() { ("-", c.abs()) } else { ("+", c.clone()) };

            if i == 0 {
                if sign == "-" {
                    write!(f, "-")?;
                }
            } else {
                write!(f, " {sign} ")?;
            }

            if mon == "1" {
                write!(f, "{abs}")?;
            } else if abs.is_one() {
                write!(f, "{mon}")?;
            } else {
                write!(f, "{abs}*{mon}")?;
            }
        }
        Ok(())
    }
}
