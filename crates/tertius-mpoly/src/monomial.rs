//! Bit-packed monomials.
//!
//! A monomial is stored as a short vector of machine words whose layout
//! (field width, field order, word count) is described by an
//! [`ExpLayout`](crate::codec::ExpLayout). The words alone carry no layout
//! information, so two packed monomials are only comparable under the
//! same layout.

use smallvec::SmallVec;

/// Inline capacity in words; one or two words cover the common cases.
const INLINE_WORDS: usize = 2;

/// A bit-packed monomial.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct PackedMonomial(SmallVec<[u64; INLINE_WORDS]>);

impl PackedMonomial {
    /// Creates the monomial 1 (all exponents zero) spanning `words` words.
    #[must_use]
    pub fn one(words: usize) -> Self {
        Self(SmallVec::from_elem(0, words))
    }

    #[cfg(test)]
    pub(crate) fn from_words(words: &[u64]) -> Self {
        Self(SmallVec::from_slice(words))
    }

    /// Returns the raw packed words, most significant first.
    #[must_use]
    pub fn words(&self) -> &[u64] {
        &self.0
    }

    pub(crate) fn words_mut(&mut self) -> &mut [u64] {
        &mut self.0
    }

    /// Returns true if every exponent is zero.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.0.iter().all(|&w| w == 0)
    }

    /// Multiplies two monomials by adding their packed words.
    ///
    /// Exact only when every field of the product fits in its width;
    /// callers size the layout from the operands' maxima first.
    #[must_use]
    pub(crate) fn mul(&self, other: &Self) -> Self {
        debug_assert_eq!(self.0.len(), other.0.len());
        Self(
            self.0
                .iter()
                .zip(other.0.iter())
                .map(|(a, b)| a.wrapping_add(*b))
                .collect(),
        )
    }
}
