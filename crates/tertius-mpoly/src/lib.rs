//! # tertius-mpoly
//!
//! Sparse multivariate polynomials over the integers with packed exponents.
//!
//! A polynomial is a list of (monomial, coefficient) terms kept sorted in
//! strictly decreasing monomial order with no zero coefficients. Exponent
//! vectors are packed into machine words so that comparing two monomials
//! and multiplying them are word-wise operations.
//!
//! ## Components
//!
//! - [`MonomialOrder`]: lex, graded lex and graded reverse lex orderings
//! - [`ExpLayout`]: the packing of exponent vectors at a given field width
//! - [`MPolyContext`]: variable count, ordering and shared exponent width
//! - [`MPoly`]: canonical polynomials with arithmetic, evaluation and
//!   degree queries
//!
//! ## Example
//!
//! ```rust
//! use tertius_integers::Integer;
//! use tertius_mpoly::{MPoly, MPolyContext, MonomialOrder};
//!
//! let ctx = MPolyContext::new(2, MonomialOrder::Lex).unwrap();
//! let p = MPoly::from_terms(
//!     &ctx,
//!     [(Integer::new(3), vec![2, 1]), (Integer::new(2), vec![0, 1])],
//! )
//! .unwrap();
//!
//! let q = p.evaluate_one(0, &Integer::new(5)).unwrap();
//! assert_eq!(q.to_string(), "77*x1");
//! assert_eq!(q.used_vars(), vec![false, true]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod algorithms;
pub mod analysis;
pub mod arith;
pub mod codec;
pub mod context;
pub mod error;
pub mod eval;
pub mod monomial;
pub mod ordering;
pub mod poly;
pub mod random;

#[cfg(test)]
mod proptests;

pub use codec::{ExpLayout, MAX_EXP_BITS, MIN_EXP_BITS};
pub use context::{ContextOptions, MPolyContext};
pub use error::{MPolyError, Result};
pub use monomial::PackedMonomial;
pub use ordering::MonomialOrder;
pub use poly::MPoly;
