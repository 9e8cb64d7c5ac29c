//! Degree queries and used-variable analysis.
//!
//! Degrees are reported as `i64` with `-1` meaning "the variable does not
//! occur". Exponents are below 2^63, so every degree fits.

use crate::error::{MPolyError, Result};
use crate::poly::MPoly;

fn to_degree(e: u64) -> Result<i64> {
    i64::try_from(e).map_err(|_| MPolyError::Overflow(format!("degree {e} exceeds i64")))
}

impl MPoly<'_> {
    /// Returns the largest exponent of `var` over all terms.
    ///
    /// Returns -1 for the zero polynomial and whenever `var` has exponent
    /// zero in every term.
    ///
    /// # Errors
    ///
    /// Returns [`MPolyError::InvalidArgument`] if `var` is out of range.
    pub fn degree(&self, var: usize) -> Result<i64> {
        self.context().check_var(var)?;

        let layout = self.layout();
        let max = self
            .packed_terms()
            .iter()
            .map(|(m, _)| layout.exponent(m, var))
            .max()
            .unwrap_or(0);

        if max == 0 {
            Ok(-1)
        } else {
            to_degree(max)
        }
    }

    /// Returns [`MPoly::degree`] for every variable.
    ///
    /// # Errors
    ///
    /// Returns [`MPolyError::Overflow`] if a degree does not fit an `i64`.
    pub fn degrees(&self) -> Result<Vec<i64>> {
        let (maxima, _) = self.max_exponents();
        maxima
            .into_iter()
            .map(|max| if max == 0 { Ok(-1) } else { to_degree(max) })
            .collect()
    }

    /// Returns the largest total degree over all terms, or -1 for zero.
    ///
    /// Unlike [`MPoly::degree`], a nonzero constant has total degree 0.
    ///
    /// # Errors
    ///
    /// Returns [`MPolyError::Overflow`] if the total degree does not fit an `i64`.
    pub fn total_degree(&self) -> Result<i64> {
        if self.is_zero() {
            return Ok(-1);
        }
        let (_, total) = self.max_exponents();
        i64::try_from(total).map_err(|_| MPolyError::Overflow(format!("total degree {total} exceeds i64")))
    }

    /// Returns, for each variable, whether it occurs with positive degree.
    #[must_use]
    pub fn used_vars(&self) -> Vec<bool> {
        let layout = self.layout();
        let nvars = self.nvars();
        let mut used = vec![false; nvars];
        let mut remaining = nvars;

        for (m, _) in self.packed_terms() {
            for (var, flag) in used.iter_mut().enumerate() {
                if !*flag && layout.exponent(m, var) > 0 {
                    *flag = true;
                    remaining -= 1;
                }
            }
            if remaining == 0 {
                break;
            }
        }

        used
    }
}
