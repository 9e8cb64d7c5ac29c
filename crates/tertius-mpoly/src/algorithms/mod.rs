//! Polynomial algorithms.
//!
//! - Geobucket-based sparse multiplication

pub(crate) mod geobucket;
