//! Levenshtein (edit) distance implementation
//!
//! Classic Wagner-Fischer dynamic program over a full `(m+1) x (n+1)` matrix.
//! - Codepoint-exact: inputs are decoded before comparison, so multi-byte and
//!   surrogate-pair characters count as one position
//! - Fallible: matrix allocation failure is reported, never aborts
//! - No state survives a call; safe to use from many threads at once

use super::matrix::DistanceMatrix;
use super::EditDistance;
use crate::error::Result;
use crate::text::{Codepoints, Limits};

// ============================================================================
// Levenshtein Calculator
// ============================================================================

/// Levenshtein distance calculator with optional input limits
///
/// # Complexity
/// - Time: O(m*n) where m and n are codepoint counts
/// - Space: O(m*n) for the working matrix, released before returning
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Levenshtein {
    /// Limits checked against each input before any matrix is built
    pub limits: Limits,
}

impl Levenshtein {
    #[must_use]
    pub fn new() -> Self {
        Self {
            limits: Limits::unbounded(),
        }
    }

    #[must_use]
    pub fn with_limits(limits: Limits) -> Self {
        Self { limits }
    }
}

impl EditDistance for Levenshtein {
    fn distance(&self, a: &str, b: &str) -> Result<usize> {
        let (a, b) = Codepoints::pair(a, b, &self.limits)?;
        levenshtein_codepoints(&a, &b)
    }

    fn name(&self) -> &'static str {
        "levenshtein"
    }
}

// ============================================================================
// Wagner-Fischer Recurrence
// ============================================================================

/// Levenshtein distance between two codepoint sequences.
///
/// Fills the matrix column by column (outer loop over `b`, inner over `a`);
/// every cell depends only on its upper, left and upper-left neighbours.
pub fn levenshtein_codepoints(a: &[char], b: &[char]) -> Result<usize> {
    let m = a.len();
    let n = b.len();
    log::trace!("levenshtein: {}x{} matrix", m.saturating_add(1), n.saturating_add(1));

    let mut d = DistanceMatrix::with_base_cases(m, n)?;

    for j in 1..=n {
        for i in 1..=m {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            let val = (d.get(i - 1, j) + 1) // deletion
                .min(d.get(i, j - 1) + 1) // insertion
                .min(d.get(i - 1, j - 1) + cost); // substitution
            d.set(i, j, val);
        }
    }

    Ok(d.last())
}

// ============================================================================
// Convenience Functions
// ============================================================================

/// Compute the Levenshtein distance between two strings.
///
/// # Example
/// ```
/// use ldist::algorithms::levenshtein::levenshtein;
///
/// assert_eq!(levenshtein("kitten", "sitting").unwrap(), 3);
/// assert_eq!(levenshtein("", "abc").unwrap(), 3);
/// // One codepoint each, despite 4 bytes in UTF-8
/// assert_eq!(levenshtein("😀", "😁").unwrap(), 1);
/// ```
#[inline]
pub fn levenshtein(a: &str, b: &str) -> Result<usize> {
    Levenshtein::new().distance(a, b)
}

/// Levenshtein distance between two UTF-8 byte buffers.
///
/// Malformed UTF-8 is a validation error; bytes are never compared raw.
pub fn levenshtein_utf8(a: &[u8], b: &[u8]) -> Result<usize> {
    let (a, b) = Codepoints::pair_utf8(a, b, &Limits::unbounded())?;
    levenshtein_codepoints(&a, &b)
}

/// Levenshtein distance between two UTF-16 buffers.
///
/// # Example
/// ```
/// use ldist::algorithms::levenshtein::levenshtein_utf16;
///
/// let a: Vec<u16> = "a😀".encode_utf16().collect();
/// let b: Vec<u16> = "a".encode_utf16().collect();
/// assert_eq!(levenshtein_utf16(&a, &b).unwrap(), 1);
/// ```
pub fn levenshtein_utf16(a: &[u16], b: &[u16]) -> Result<usize> {
    let (a, b) = Codepoints::pair_utf16(a, b, &Limits::unbounded())?;
    levenshtein_codepoints(&a, &b)
}

/// Convenience function for normalized similarity (0.0 to 1.0)
#[inline]
pub fn levenshtein_similarity(a: &str, b: &str) -> Result<f64> {
    Levenshtein::new().similarity(a, b)
}

// ============================================================================
// Tests
// ============================================================================
