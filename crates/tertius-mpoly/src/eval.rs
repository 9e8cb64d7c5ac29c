//! Evaluation of polynomials at integer points.

use num_traits::{One, Zero};
use rustc_hash::FxHashMap;
use tertius_integers::Integer;
use tracing::debug;

use crate::error::{MPolyError, Result};
use crate::poly::{MPoly, Term};

/// Caches powers of one base by exponent.
struct PowerCache<'a> {
    base: &'a Integer,
    powers: FxHashMap<u64, Integer>,
}

impl<'a> PowerCache<'a> {
    fn new(base: &'a Integer) -> Self {
        Self {
            base,
            powers: FxHashMap::default(),
        }
    }

    /// Returns base^exp.
    ///
    /// Exponents beyond `u32::MAX` only have a representable power for
    /// the bases 0, 1 and -1.
    fn get(&mut self, exp: u64) -> Result<Integer> {
        if exp == 0 {
            return Ok(Integer::one());
        }
        if let Some(p) = self.powers.get(&exp) {
            return Ok(p.clone());
        }

        let power = match u32::try_from(exp) {
            Ok(e) => self.base.pow(e),
            Err(_) if self.base.is_zero() || self.base.is_unit() => {
                if self.base.is_negative() && exp % 2 == 1 {
                    self.base.clone()
                } else {
                    self.base.abs()
                }
            }
            Err(_) => {
                return Err(MPolyError::Overflow(format!(
                    "power {exp} of {} is too large",
                    self.base
                )))
            }
        };

        self.powers.insert(exp, power.clone());
        Ok(power)
    }
}

impl<'ctx> MPoly<'ctx> {
    /// Substitutes `value` for variable `var`.
    ///
    /// Every term's coefficient is multiplied by `value^e` where `e` is its
    /// exponent of `var`, which then becomes zero. Terms that land on the
    /// same monomial are combined and zero coefficients dropped, so the
    /// result is canonical and independent of `var`.
    ///
    /// # Errors
    ///
    /// Returns [`MPolyError::InvalidArgument`] if `var` is out of range, and
    /// [`MPolyError::Overflow`] if a power has an exponent beyond `u32::MAX`
    /// and `value` is not 0, 1 or -1.
    pub fn evaluate_one(&self, var: usize, value: &Integer) -> Result<Self> {
        self.context().check_var(var)?;

        let layout = self.layout();
        let mut powers = PowerCache::new(value);
        let mut terms: Vec<Term> = Vec::with_capacity(self.len());

        for (m, c) in self.packed_terms() {
            let e = layout.exponent(m, var);
            let coeff = if e == 0 || value.is_one() {
                c.clone()
            } else {
                c * &powers.get(e)?
            };
            terms.push((layout.clear_var(m, var), coeff));
        }

        let result = Self::from_unsorted(self.context(), layout.clone(), terms);
        if result.len() < self.len() {
            debug!(var, before = self.len(), after = result.len(), "evaluation collapsed terms");
        }
        Ok(result)
    }

    /// Evaluates the polynomial at a point, one value per variable.
    ///
    /// # Errors
    ///
    /// Returns [`MPolyError::InvalidArgument`] if `values.len()` differs from
    /// the number of variables, and [`MPolyError::Overflow`] under the same
    /// condition as [`MPoly::evaluate_one`].
    pub fn evaluate_all(&self, values: &[Integer]) -> Result<Integer> {
        if values.len() != self.nvars() {
            return Err(MPolyError::InvalidArgument(format!(
                "expected {} values, got {}",
                self.nvars(),
                values.len()
            )));
        }

        let layout = self.layout();
        let mut caches: Vec<PowerCache<'_>> = values.iter().map(PowerCache::new).collect();
        let mut sum = Integer::zero();

        for (m, c) in self.packed_terms() {
            let mut term = c.clone();
            for (var, cache) in caches.iter_mut().enumerate() {
                let e = layout.exponent(m, var);
                if e > 0 {
                    term *= &cache.get(e)?;
                }
            }
            sum += &term;
        }

        Ok(sum)
    }
}
