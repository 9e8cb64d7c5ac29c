//! Polynomial contexts.
//!
//! A context fixes the number of variables and the monomial ordering
//! for a family of polynomials, and tracks the exponent width new
//! polynomials are packed with. The width only ever grows.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering as AtomicOrdering};

use tracing::debug;

use crate::codec::{ExpLayout, MAX_EXP_BITS, MIN_EXP_BITS};
use crate::error::{MPolyError, Result};
use crate::ordering::MonomialOrder;

/// Options for building a context.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContextOptions {
    /// Number of variables.
    pub nvars: usize,
    /// Monomial ordering.
    pub order: MonomialOrder,
    /// Initial exponent field width.
    pub min_bits: u32,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            nvars: 1,
            order: MonomialOrder::default(),
            min_bits: MIN_EXP_BITS,
        }
    }
}

/// Shared description of a family of multivariate polynomials.
///
/// Polynomials borrow their context, so a context always outlives the
/// polynomials built under it. Width growth goes through an atomic
/// maximum and is safe to call while other threads read the context.
#[derive(Debug)]
pub struct MPolyContext {
    nvars: usize,
    order: MonomialOrder,
    exp_bits: AtomicU32,
}

impl MPolyContext {
    /// Creates a context with the minimum exponent width.
    ///
    /// # Errors
    ///
    /// Returns [`MPolyError::InvalidArgument`] if `nvars` is zero.
    pub fn new(nvars: usize, order: MonomialOrder) -> Result<Self> {
        Self::with_options(ContextOptions {
            nvars,
            order,
            min_bits: MIN_EXP_BITS,
        })
    }

    /// Creates a context from options.
    ///
    /// # Errors
    ///
    /// Returns [`MPolyError::InvalidArgument`] if `nvars` is zero, and
    /// [`MPolyError::Overflow`] if `min_bits` exceeds the widest field.
    pub fn with_options(options: ContextOptions) -> Result<Self> {
        if options.nvars == 0 {
            return Err(MPolyError::InvalidArgument(
                "number of variables must be positive".to_string(),
            ));
        }
        if options.min_bits > MAX_EXP_BITS {
            return Err(MPolyError::Overflow(format!(
                "field width {} exceeds limit {MAX_EXP_BITS}",
                options.min_bits
            )));
        }

        let bits = options.min_bits.max(MIN_EXP_BITS);
        debug!(nvars = options.nvars, order = %options.order, bits, "creating polynomial context");

        Ok(Self {
            nvars: options.nvars,
            order: options.order,
            exp_bits: AtomicU32::new(bits),
        })
    }

    /// Returns the number of variables.
    #[must_use]
    pub fn nvars(&self) -> usize {
        self.nvars
    }

    /// Returns the monomial ordering.
    #[must_use]
    pub fn order(&self) -> MonomialOrder {
        self.order
    }

    /// Returns the current exponent field width.
    #[must_use]
    pub fn exp_bits(&self) -> u32 {
        self.exp_bits.load(AtomicOrdering::Acquire)
    }

    /// Raises the exponent width to at least `min_bits` and returns the new width.
    ///
    /// Polynomials packed at a narrower width stay valid; they are
    /// re-encoded when they next meet a wider operand.
    ///
    /// # Errors
    ///
    /// Returns [`MPolyError::Overflow`] if `min_bits` exceeds [`MAX_EXP_BITS`].
    pub fn ensure_bits(&self, min_bits: u32) -> Result<u32> {
        if min_bits > MAX_EXP_BITS {
            return Err(MPolyError::Overflow(format!(
                "field width {min_bits} exceeds limit {MAX_EXP_BITS}"
            )));
        }

        let target = min_bits.max(MIN_EXP_BITS);
        let previous = self.exp_bits.fetch_max(target, AtomicOrdering::AcqRel);
        if target > previous {
            debug!(from = previous, to = target, "growing exponent width");
        }
        Ok(previous.max(target))
    }

    /// Returns the packed layout at the current width.
    #[must_use]
    pub fn layout(&self) -> ExpLayout {
        ExpLayout::build(self.nvars, self.order, self.exp_bits())
    }

    /// Returns the packed layout at `bits` (at least [`MIN_EXP_BITS`]),
    /// growing the context to at least that width.
    ///
    /// # Errors
    ///
    /// Returns [`MPolyError::Overflow`] if `bits` exceeds [`MAX_EXP_BITS`].
    pub fn layout_for(&self, bits: u32) -> Result<ExpLayout> {
        self.ensure_bits(bits)?;
        Ok(ExpLayout::build(self.nvars, self.order, bits.max(MIN_EXP_BITS)))
    }

    /// Returns true if polynomials of both contexts can be combined.
    #[must_use]
    pub fn is_compatible(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || (self.nvars == other.nvars && self.order == other.order)
    }

    /// Checks that polynomials of both contexts can be combined.
    ///
    /// # Errors
    ///
    /// Returns [`MPolyError::ContextMismatch`] if variable count or ordering differ.
    pub fn check_compatible(&self, other: &Self) -> Result<()> {
        if self.is_compatible(other) {
            Ok(())
        } else {
            Err(MPolyError::ContextMismatch {
                left: self.to_string(),
                right: other.to_string(),
            })
        }
    }

    pub(crate) fn check_var(&self, var: usize) -> Result<()> {
        if var < self.nvars {
            Ok(())
        } else {
            Err(MPolyError::InvalidArgument(format!(
                "variable index {var} out of range for {} variables",
                self.nvars
            )))
        }
    }
}

impl fmt::Display for MPolyContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} variables, {} order, {} bits",
            self.nvars,
            self.order,
            self.exp_bits()
        )
    }
}
