//! ldist - Levenshtein distance over codepoints
//!
//! A small Rust library, with optional Python bindings, computing the edit
//! distance used for "did you mean" hints.
//!
//! # Features
//! - Wagner-Fischer distance compared by codepoint, never by storage unit
//! - Validating decoders for UTF-8 bytes and UTF-16 buffers
//! - Fallible working memory: allocation failure is an error, not an abort
//! - Suggestion helpers that turn distances into readable hints
//!
//! # Example
//! ```
//! use ldist::distance;
//!
//! assert_eq!(distance("kitten", "sitting").unwrap(), 3);
//! assert_eq!(distance("flaw", "lawn").unwrap(), 2);
//! ```

pub mod algorithms;
pub mod error;
pub mod suggest;
pub mod text;

// Python extension module (enabled with the python feature)
#[cfg(feature = "python")]
mod python;

pub use algorithms::{
    levenshtein as levenshtein_mod, levenshtein_codepoints, levenshtein_utf16, levenshtein_utf8,
    DistanceMatrix, EditDistance, Levenshtein,
};
pub use error::{DistanceError, Result};
pub use text::{Codepoints, Limits};

/// Levenshtein distance between two strings, counted in codepoints.
///
/// Errors only when working memory for the matrix cannot be allocated.
#[inline]
pub fn distance(a: &str, b: &str) -> Result<usize> {
    algorithms::levenshtein::levenshtein(a, b)
}
