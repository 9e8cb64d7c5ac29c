//! Errors raised by multivariate polynomial operations.

use thiserror::Error;

/// Errors that can occur while building or combining polynomials.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MPolyError {
    /// A variable index, variable count or vector length is out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An exponent does not fit in the widest supported packing.
    #[error("exponent overflow: {0}")]
    Overflow(String),

    /// The operands were built under incompatible contexts.
    #[error("context mismatch: {left} vs {right}")]
    ContextMismatch {
        /// Description of the left operand's context.
        left: String,
        /// Description of the right operand's context.
        right: String,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MPolyError>;
