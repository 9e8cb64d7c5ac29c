//! # Tertius
//!
//! Sparse multivariate polynomial arithmetic over the integers.
//!
//! This crate re-exports the component crates under one name:
//!
//! - [`integers`]: arbitrary precision integer coefficients
//! - [`mpoly`]: packed sparse multivariate polynomials
//!
//! ## Quick Start
//!
//! ```rust
//! use tertius::prelude::*;
//!
//! let ctx = MPolyContext::new(2, MonomialOrder::Grevlex).unwrap();
//! let x = MPoly::var(&ctx, 0).unwrap();
//! let y = MPoly::var(&ctx, 1).unwrap();
//!
//! let f = x.add(&y).unwrap().pow(3).unwrap();
//! assert_eq!(f.len(), 4);
//! assert_eq!(f.evaluate_all(&[Integer::new(1), Integer::new(2)]).unwrap(), Integer::new(27));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use tertius_integers as integers;
pub use tertius_mpoly as mpoly;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use tertius_integers::Integer;
    pub use tertius_mpoly::{ContextOptions, MPoly, MPolyContext, MPolyError, MonomialOrder};
}
