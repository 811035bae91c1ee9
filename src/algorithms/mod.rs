//! Edit distance algorithms
//!
//! Each algorithm is implemented as a standalone function for composability,
//! plus a trait-based interface for extensibility.

pub mod levenshtein;
pub mod matrix;

pub use levenshtein::*;
pub use matrix::DistanceMatrix;

use crate::error::Result;

/// Trait for edit distance algorithms that return integer distances
pub trait EditDistance: Send + Sync {
    /// Distance in codepoint edits. Fails only on invalid input or when
    /// working memory cannot be allocated.
    fn distance(&self, a: &str, b: &str) -> Result<usize>;

    /// Convert to normalized similarity score (0.0 to 1.0)
    fn similarity(&self, a: &str, b: &str) -> Result<f64> {
        let dist = self.distance(a, b)?;
        let max_len = a.chars().count().max(b.chars().count());
        if max_len == 0 {
            Ok(1.0)
        } else {
            Ok(1.0 - (dist as f64 / max_len as f64))
        }
    }

    /// Name of the algorithm for debugging/logging
    fn name(&self) -> &'static str;
}
