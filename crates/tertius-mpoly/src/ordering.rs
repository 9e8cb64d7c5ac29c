//! Monomial orderings for multivariate polynomials.
//!
//! The ordering fixes the canonical term order of every polynomial
//! built under a context, and the field layout of packed exponents.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::MPolyError;

/// A monomial ordering.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MonomialOrder {
    /// Lexicographic order.
    ///
    /// x > y > z means x^a y^b z^c > x^d y^e z^f iff
    /// the first nonzero difference (a-d, b-e, c-f) is positive.
    Lex,

    /// Graded lexicographic order.
    ///
    /// First compares total degree, then uses lex as tiebreaker.
    Grlex,

    /// Graded reverse lexicographic order.
    ///
    /// First compares total degree, then uses reverse lex (last variable first)
    /// with the comparison reversed.
    #[default]
    Grevlex,
}

impl MonomialOrder {
    /// All supported orderings.
    pub const ALL: [MonomialOrder; 3] = [MonomialOrder::Lex, MonomialOrder::Grlex, MonomialOrder::Grevlex];

    /// Returns true if the ordering compares total degree first.
    ///
    /// Graded orderings reserve an extra packed field for the total degree.
    #[must_use]
    pub const fn is_graded(&self) -> bool {
        matches!(self, MonomialOrder::Grlex | MonomialOrder::Grevlex)
    }

    /// Compares two unpacked exponent vectors according to this ordering.
    ///
    /// Packed comparison under an [`ExpLayout`](crate::codec::ExpLayout)
    /// always agrees with this.
    #[must_use]
    pub fn compare_exponents(&self, a: &[u64], b: &[u64]) -> Ordering {
        match self {
            MonomialOrder::Lex => cmp_lex(a, b),
            MonomialOrder::Grlex => cmp_grlex(a, b),
            MonomialOrder::Grevlex => cmp_grevlex(a, b),
        }
    }

    /// Returns a short name for the ordering.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            MonomialOrder::Lex => "lex",
            MonomialOrder::Grlex => "grlex",
            MonomialOrder::Grevlex => "grevlex",
        }
    }
}

fn total_degree(exps: &[u64]) -> u128 {
    exps.iter().map(|&e| u128::from(e)).sum()
}

fn cmp_lex(a: &[u64], b: &[u64]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        match x.cmp(y) {
            Ordering::Equal => continue,
            ord => return ord,
        }
    }
    Ordering::Equal
}

fn cmp_grlex(a: &[u64], b: &[u64]) -> Ordering {
    match total_degree(a).cmp(&total_degree(b)) {
        Ordering::Equal => cmp_lex(a, b),
        ord => ord,
    }
}

fn cmp_grevlex(a: &[u64], b: &[u64]) -> Ordering {
    match total_degree(a).cmp(&total_degree(b)) {
        Ordering::Equal => {}
        ord => return ord,
    }

    // Last variable first, smaller exponent wins
    for (x, y) in a.iter().zip(b).rev() {
        match y.cmp(x) {
            Ordering::Equal => continue,
            ord => return ord,
        }
    }
    Ordering::Equal
}

impl fmt::Display for MonomialOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for MonomialOrder {
    type Err = MPolyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lex" => Ok(MonomialOrder::Lex),
            "grlex" | "deglex" => Ok(MonomialOrder::Grlex),
            "grevlex" | "degrevlex" => Ok(MonomialOrder::Grevlex),
            other => Err(MPolyError::InvalidArgument(format!(
                "unknown monomial ordering '{other}'"
            ))),
        }
    }
}
