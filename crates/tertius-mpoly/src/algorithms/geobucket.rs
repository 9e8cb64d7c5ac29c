//! Geobucket-based sparse polynomial multiplication.
//!
//! Geobuckets provide efficient accumulation of sparse polynomial products
//! with O(log n) amortized time per term insertion.
//!
//! Reference: Yan, "Geobuckets for Polynomial Multiplication" (1998)

use std::cmp::Ordering;
use std::mem;

use num_traits::Zero;

use crate::codec::ExpLayout;
use crate::poly::Term;

/// A geobucket for accumulating sorted runs of packed terms.
///
/// Uses geometrically increasing bucket sizes for efficient merging.
/// Every bucket is kept in canonical (descending) order with like terms
/// combined and zero coefficients dropped.
pub(crate) struct Geobucket<'a> {
    /// Bucket i can hold up to 2^(i+1) terms.
    buckets: Vec<Vec<Term>>,
    layout: &'a ExpLayout,
}

impl<'a> Geobucket<'a> {
    /// Creates a new empty geobucket.
    pub(crate) fn new(layout: &'a ExpLayout) -> Self {
        Self {
            buckets: Vec::new(),
            layout,
        }
    }

    /// Returns the capacity of bucket i.
    #[inline]
    fn bucket_capacity(i: usize) -> usize {
        1 << (i + 1) // 2, 4, 8, 16, ...
    }

    /// Adds a run of terms already in descending order.
    pub(crate) fn add_sorted(&mut self, mut chunk: Vec<Term>) {
        if chunk.is_empty() {
            return;
        }

        // Find the appropriate bucket based on size
        let mut i = 0;
        while Self::bucket_capacity(i) < chunk.len() {
            i += 1;
        }

        // Carry-propagate from that bucket
        loop {
            while self.buckets.len() <= i {
                self.buckets.push(Vec::new());
            }

            if self.buckets[i].is_empty() {
                self.buckets[i] = chunk;
                break;
            }

            let existing = mem::take(&mut self.buckets[i]);
            chunk = merge_sorted(self.layout, existing, chunk);

            if chunk.len() <= Self::bucket_capacity(i) {
                self.buckets[i] = chunk;
                break;
            }

            i += 1;
        }
    }

    /// Extracts the final sorted terms from the geobucket.
    pub(crate) fn extract(self) -> Vec<Term> {
        let layout = self.layout;
        self.buckets
            .into_iter()
            .filter(|bucket| !bucket.is_empty())
            .fold(Vec::new(), |acc, bucket| merge_sorted(layout, acc, bucket))
    }
}

/// Merges two descending term runs, combining like terms.
pub(crate) fn merge_sorted(layout: &ExpLayout, a: Vec<Term>, b: Vec<Term>) -> Vec<Term> {
    let mut result = Vec::with_capacity(a.len() + b.len());
    let mut a = a.into_iter().peekable();
    let mut b = b.into_iter().peekable();

    loop {
        let ord = match (a.peek(), b.peek()) {
            (Some(x), Some(y)) => layout.compare(&x.0, &y.0),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => break,
        };

        match ord {
            Ordering::Greater => result.extend(a.next()),
            Ordering::Less => result.extend(b.next()),
            Ordering::Equal => {
                if let (Some((m, mut c)), Some((_, d))) = (a.next(), b.next()) {
                    c += &d;
                    if !c.is_zero() {
                        result.push((m, c));
                    }
                }
            }
        }
    }

    result
}

/// Multiplies two canonical term sequences packed under `layout`.
///
/// The layout must be wide enough for every product monomial. Each
/// term of the shorter operand times the longer operand is already a
/// descending run, since monomial orders are compatible with
/// multiplication, so whole rows go into the geobucket at once.
pub(crate) fn geobucket_multiply(a: &[Term], b: &[Term], layout: &ExpLayout) -> Vec<Term> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    // Choose the smaller polynomial to iterate over
    let (smaller, larger) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let mut bucket = Geobucket::new(layout);

    for (mono_a, coeff_a) in smaller {
        let row: Vec<Term> = larger
            .iter()
            .map(|(mono_b, coeff_b)| (mono_a.mul(mono_b), coeff_a * coeff_b))
            .collect();
        bucket.add_sorted(row);
    }

    bucket.extract()
}
