//! # tertius-integers
//!
//! Arbitrary precision integer arithmetic for Tertius CAS.
//!
//! This crate wraps `dashu` to provide `Integer`, the coefficient type
//! of sparse multivariate polynomials.
//!
//! ## Performance Notes
//!
//! - Small integers (fitting in a machine word) use stack allocation
//! - Large integers are heap-allocated with GMP-like performance

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod integer;

#[cfg(test)]
mod proptests;

pub use integer::Integer;
