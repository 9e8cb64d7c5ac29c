//! Exponent codec: packing exponent vectors into machine words.
//!
//! Fields are `bits` wide and never straddle a word. The most significant
//! field sits in the high bits of word 0, so comparing words in order
//! compares fields in order. Field layout per ordering:
//!
//! ```text
//! Lex      [x0, x1, ..., xn-1]
//! Grlex    [deg, x0, x1, ..., xn-1]
//! Grevlex  [deg, xn-1, ..., x1, x0]   (variable fields complemented when comparing)
//! ```
//!
//! With this layout every ordering reduces to an unsigned word-by-word
//! comparison of `a ^ mask` against `b ^ mask`.

use std::cmp::Ordering;

use smallvec::SmallVec;

use crate::error::{MPolyError, Result};
use crate::monomial::PackedMonomial;
use crate::ordering::MonomialOrder;

/// Smallest field width handed out by a context.
pub const MIN_EXP_BITS: u32 = 8;

/// Widest supported field. Every exponent stays below 2^63 and so fits an `i64`.
pub const MAX_EXP_BITS: u32 = 63;

/// Returns the number of bits needed to hold `value` (at least 1).
#[must_use]
pub fn bits_for(value: u64) -> u32 {
    (u64::BITS - value.leading_zeros()).max(1)
}

/// Returns the field width an exponent vector needs under `order`.
///
/// Graded orderings also store the total degree, so its width counts too.
///
/// # Errors
///
/// Returns [`MPolyError::Overflow`] if the total degree overflows `u64` or
/// the width exceeds [`MAX_EXP_BITS`].
pub fn required_bits(exps: &[u64], order: MonomialOrder) -> Result<u32> {
    let mut widest = exps.iter().copied().max().unwrap_or(0);
    if order.is_graded() {
        let total = checked_total(exps)?;
        widest = widest.max(total);
    }
    let bits = bits_for(widest);
    if bits > MAX_EXP_BITS {
        return Err(MPolyError::Overflow(format!(
            "exponent {widest} needs {bits} bits, limit is {MAX_EXP_BITS}"
        )));
    }
    Ok(bits)
}

fn checked_total(exps: &[u64]) -> Result<u64> {
    exps.iter().try_fold(0u64, |acc, &e| {
        acc.checked_add(e)
            .ok_or_else(|| MPolyError::Overflow("total degree exceeds u64".to_string()))
    })
}

/// The packed layout of monomials for one `(nvars, order, bits)` triple.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ExpLayout {
    nvars: usize,
    order: MonomialOrder,
    bits: u32,
    fields_per_word: usize,
    words: usize,
    cmp_mask: SmallVec<[u64; 2]>,
}

impl ExpLayout {
    /// Creates a layout.
    ///
    /// # Errors
    ///
    /// Returns [`MPolyError::InvalidArgument`] if `nvars` is zero or `bits` is
    /// zero, and [`MPolyError::Overflow`] if `bits` exceeds [`MAX_EXP_BITS`].
    pub fn new(nvars: usize, order: MonomialOrder, bits: u32) -> Result<Self> {
        if nvars == 0 {
            return Err(MPolyError::InvalidArgument(
                "number of variables must be positive".to_string(),
            ));
        }
        if bits == 0 {
            return Err(MPolyError::InvalidArgument(
                "field width must be positive".to_string(),
            ));
        }
        if bits > MAX_EXP_BITS {
            return Err(MPolyError::Overflow(format!(
                "field width {bits} exceeds limit {MAX_EXP_BITS}"
            )));
        }
        Ok(Self::build(nvars, order, bits))
    }

    /// Builds a layout from parameters already validated by the caller.
    pub(crate) fn build(nvars: usize, order: MonomialOrder, bits: u32) -> Self {
        let fields = nvars + usize::from(order.is_graded());
        let fields_per_word = (u64::BITS / bits) as usize;
        let words = fields.div_ceil(fields_per_word);

        let mut layout = Self {
            nvars,
            order,
            bits,
            fields_per_word,
            words,
            cmp_mask: SmallVec::from_elem(0, words),
        };

        if order == MonomialOrder::Grevlex {
            let field_mask = layout.field_mask();
            for var in 0..nvars {
                let (word, shift) = layout.position(layout.var_field(var));
                layout.cmp_mask[word] |= field_mask << shift;
            }
        }

        layout
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

    /// Returns the width of each field in bits.
    #[must_use]
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Returns the number of words per packed monomial.
    #[must_use]
    pub fn words(&self) -> usize {
        self.words
    }

    /// Returns the largest value a single field can hold.
    #[must_use]
    pub fn max_field(&self) -> u64 {
        self.field_mask()
    }

    fn field_mask(&self) -> u64 {
        (1u64 << self.bits) - 1
    }

    fn var_field(&self, var: usize) -> usize {
        match self.order {
            MonomialOrder::Lex => var,
            MonomialOrder::Grlex => var + 1,
            MonomialOrder::Grevlex => self.nvars - var,
        }
    }

    fn position(&self, field: usize) -> (usize, u32) {
        let word = field / self.fields_per_word;
        let slot = self.fields_per_word - 1 - field % self.fields_per_word;
        (word, slot as u32 * self.bits)
    }

    fn get_field(&self, m: &PackedMonomial, field: usize) -> u64 {
        let (word, shift) = self.position(field);
        (m.words()[word] >> shift) & self.field_mask()
    }

    fn set_field(&self, words: &mut [u64], field: usize, value: u64) {
        let (word, shift) = self.position(field);
        let mask = self.field_mask() << shift;
        words[word] = (words[word] & !mask) | ((value << shift) & mask);
    }

    /// Packs an exponent vector.
    ///
    /// # Errors
    ///
    /// Returns [`MPolyError::InvalidArgument`] if `exps.len() != nvars`, and
    /// [`MPolyError::Overflow`] if an exponent (or the total degree, for graded
    /// orderings) does not fit in a field.
    pub fn pack(&self, exps: &[u64]) -> Result<PackedMonomial> {
        if exps.len() != self.nvars {
            return Err(MPolyError::InvalidArgument(format!(
                "expected {} exponents, got {}",
                self.nvars,
                exps.len()
            )));
        }

        let max = self.max_field();
        let mut m = PackedMonomial::one(self.words);
        for (var, &e) in exps.iter().enumerate() {
            if e > max {
                return Err(MPolyError::Overflow(format!(
                    "exponent {e} of x{var} does not fit in {} bits",
                    self.bits
                )));
            }
            self.set_field(m.words_mut(), self.var_field(var), e);
        }

        if self.order.is_graded() {
            let total = checked_total(exps)?;
            if total > max {
                return Err(MPolyError::Overflow(format!(
                    "total degree {total} does not fit in {} bits",
                    self.bits
                )));
            }
            self.set_field(m.words_mut(), 0, total);
        }

        Ok(m)
    }

    /// Unpacks a monomial into its exponent vector.
    ///
    /// The monomial must have been packed under this layout.
    #[must_use]
    pub(crate) fn unpack(&self, m: &PackedMonomial) -> Vec<u64> {
        (0..self.nvars).map(|var| self.exponent(m, var)).collect()
    }

    /// Returns the exponent of variable `var`. Callers check `var < nvars`.
    #[must_use]
    pub(crate) fn exponent(&self, m: &PackedMonomial, var: usize) -> u64 {
        self.get_field(m, self.var_field(var))
    }

    /// Returns the total degree of a monomial.
    #[must_use]
    pub(crate) fn total_degree(&self, m: &PackedMonomial) -> u128 {
        if self.order.is_graded() {
            u128::from(self.get_field(m, 0))
        } else {
            (0..self.nvars).map(|var| u128::from(self.exponent(m, var))).sum()
        }
    }

    /// Returns the monomial with the exponent of `var` set to zero.
    #[must_use]
    pub(crate) fn clear_var(&self, m: &PackedMonomial, var: usize) -> PackedMonomial {
        let e = self.exponent(m, var);
        let mut out = m.clone();
        if e == 0 {
            return out;
        }
        self.set_field(out.words_mut(), self.var_field(var), 0);
        if self.order.is_graded() {
            let total = self.get_field(m, 0);
            self.set_field(out.words_mut(), 0, total - e);
        }
        out
    }

    /// Compares two monomials packed under this layout.
    #[must_use]
    pub(crate) fn compare(&self, a: &PackedMonomial, b: &PackedMonomial) -> Ordering {
        for ((x, y), mask) in a.words().iter().zip(b.words()).zip(&self.cmp_mask) {
            match (x ^ mask).cmp(&(y ^ mask)) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }

    /// Re-encodes a monomial packed under `from` into this layout.
    ///
    /// # Errors
    ///
    /// Returns [`MPolyError::Overflow`] if an exponent does not fit this
    /// layout's width.
    pub(crate) fn repack(&self, m: &PackedMonomial, from: &ExpLayout) -> Result<PackedMonomial> {
        if from == self {
            return Ok(m.clone());
        }
        self.pack(&from.unpack(m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for order in MonomialOrder::ALL {
            let layout = ExpLayout::new(3, order, 8).unwrap();
            let exps = [5, 0, 17];
            let m = layout.pack(&exps).unwrap();
            assert_eq!(layout.unpack(&m), exps);
            assert_eq!(layout.total_degree(&m), 22);
        }
    }

    #[test]
    fn test_word_count() {
        // 8 fields of 8 bits fit in one word, the degree field spills over
        assert_eq!(ExpLayout::new(8, MonomialOrder::Lex, 8).unwrap().words(), 1);
        assert_eq!(ExpLayout::new(8, MonomialOrder::Grlex, 8).unwrap().words(), 2);
        assert_eq!(ExpLayout::new(2, MonomialOrder::Lex, 63).unwrap().words(), 2);
    }

    #[test]
    fn test_pack_overflow() {
        let layout = ExpLayout::new(2, MonomialOrder::Lex, 8).unwrap();
        assert!(matches!(layout.pack(&[256, 0]), Err(MPolyError::Overflow(_))));
        assert!(layout.pack(&[255, 255]).is_ok());

        // The total degree must fit too under graded orderings
        let graded = ExpLayout::new(2, MonomialOrder::Grlex, 8).unwrap();
        assert!(matches!(graded.pack(&[200, 100]), Err(MPolyError::Overflow(_))));
    }

    #[test]
    fn test_pack_wrong_length() {
        let layout = ExpLayout::new(2, MonomialOrder::Lex, 8).unwrap();
        assert!(matches!(layout.pack(&[1, 2, 3]), Err(MPolyError::InvalidArgument(_))));
    }

    #[test]
    fn test_invalid_layouts() {
        assert!(matches!(
            ExpLayout::new(0, MonomialOrder::Lex, 8),
            Err(MPolyError::InvalidArgument(_))
        ));
        assert!(matches!(
            ExpLayout::new(2, MonomialOrder::Lex, 64),
            Err(MPolyError::Overflow(_))
        ));
    }

    #[test]
    fn test_packed_compare_matches_unpacked() {
        let samples: [[u64; 3]; 6] = [
            [2, 0, 0],
            [1, 1, 0],
            [1, 0, 2],
            [0, 3, 0],
            [0, 0, 1],
            [0, 0, 0],
        ];
        for order in MonomialOrder::ALL {
            let layout = ExpLayout::new(3, order, 9).unwrap();
            for a in &samples {
                for b in &samples {
                    let pa = layout.pack(a).unwrap();
                    let pb = layout.pack(b).unwrap();
                    assert_eq!(
                        layout.compare(&pa, &pb),
                        order.compare_exponents(a, b),
                        "{order}: {a:?} vs {b:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_compare_spans_words() {
        // 10 variables at 13 bits: four fields per word, three words
        let samples: [[u64; 10]; 5] = [
            [0, 0, 0, 0, 0, 0, 0, 0, 0, 9],
            [0, 0, 0, 0, 0, 0, 0, 0, 1, 8],
            [1, 0, 0, 0, 0, 0, 0, 0, 0, 8],
            [0, 0, 0, 0, 9, 0, 0, 0, 0, 0],
            [3, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        ];
        for order in MonomialOrder::ALL {
            let layout = ExpLayout::new(10, order, 13).unwrap();
            assert_eq!(layout.words(), 3);
            for a in &samples {
                for b in &samples {
                    let pa = layout.pack(a).unwrap();
                    let pb = layout.pack(b).unwrap();
                    assert_eq!(
                        layout.compare(&pa, &pb),
                        order.compare_exponents(a, b),
                        "{order}: {a:?} vs {b:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_mul_is_word_addition() {
        let layout = ExpLayout::new(3, MonomialOrder::Grevlex, 8).unwrap();
        let a = layout.pack(&[1, 2, 3]).unwrap();
        let b = layout.pack(&[4, 0, 1]).unwrap();
        let product = a.mul(&b);
        assert_eq!(layout.unpack(&product), vec![5, 2, 4]);
        assert_eq!(layout.total_degree(&product), 11);
    }

    #[test]
    fn test_clear_var() {
        let layout = ExpLayout::new(3, MonomialOrder::Grlex, 8).unwrap();
        let m = layout.pack(&[2, 5, 1]).unwrap();
        let cleared = layout.clear_var(&m, 1);
        assert_eq!(layout.unpack(&cleared), vec![2, 0, 1]);
        assert_eq!(cleared, layout.pack(&[2, 0, 1]).unwrap());
    }

    #[test]
    fn test_repack_wider() {
        let narrow = ExpLayout::new(4, MonomialOrder::Grevlex, 8).unwrap();
        let wide = ExpLayout::new(4, MonomialOrder::Grevlex, 40).unwrap();
        let m = narrow.pack(&[1, 2, 3, 4]).unwrap();
        let r = wide.repack(&m, &narrow).unwrap();
        assert_eq!(wide.unpack(&r), vec![1, 2, 3, 4]);
        assert_eq!(r.words().len(), wide.words());
    }

    #[test]
    fn test_required_bits() {
        assert_eq!(required_bits(&[0, 0], MonomialOrder::Lex).unwrap(), 1);
        assert_eq!(required_bits(&[255, 1], MonomialOrder::Lex).unwrap(), 8);
        assert_eq!(required_bits(&[255, 1], MonomialOrder::Grlex).unwrap(), 9);
        assert!(matches!(
            required_bits(&[u64::MAX, 1], MonomialOrder::Grevlex),
            Err(MPolyError::Overflow(_))
        ));
        assert!(matches!(
            required_bits(&[1 << 63], MonomialOrder::Lex),
            Err(MPolyError::Overflow(_))
        ));
    }
}
