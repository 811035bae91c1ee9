//! Text decoding into codepoint sequences
//!
//! Distances are defined over codepoints, never over storage units. A UTF-8
//! string stores one codepoint in 1 to 4 bytes and UTF-16 stores one in 1 or 2
//! units, so both are decoded into a flat `char` buffer before comparison.
//!
//! Validation always happens before the buffer is allocated.

use crate::error::{DistanceError, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::Deref;

/// Size limits applied to each input before decoding.
///
/// Callers exposed to untrusted input should set `max_codepoints`: the work
/// matrix grows with the product of both lengths and cannot be interrupted.
///
/// # Example
/// ```
/// use ldist::text::Limits;
///
/// let limits = Limits::with_max_codepoints(4);
/// assert!(limits.check(4).is_ok());
/// assert!(limits.check(5).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum number of codepoints per input (None = unbounded)
    pub max_codepoints: Option<usize>,
}

impl Limits {
    #[must_use]
    pub fn unbounded() -> Self {
        Self { max_codepoints: None }
    }

    #[must_use]
    pub fn with_max_codepoints(max_codepoints: usize) -> Self {
        Self {
            max_codepoints: Some(max_codepoints),
        }
    }

    /// Check a codepoint count against the configured limit.
    pub fn check(&self, len: usize) -> Result<()> {
        match self.max_codepoints {
            Some(max) if len > max => Err(DistanceError::validation(format!(
                "input has {} codepoints, limit is {}",
                len, max
            ))),
            _ => Ok(()),
        }
    }
}

/// An owned, validated sequence of codepoints.
///
/// Short inputs (the common case for identifiers) stay on the stack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Codepoints {
    chars: SmallVec<[char; 64]>,
}

impl Codepoints {
    /// Decode an already validated string.
    pub fn decode(s: &str) -> Result<Self> {
        Self::decode_limited(s, &Limits::unbounded())
    }

    pub fn decode_limited(s: &str, limits: &Limits) -> Result<Self> {
        let len = s.chars().count();
        limits.check(len)?;
        Self::collect(len, s.chars())
    }

    /// Validate and decode UTF-8 bytes.
    ///
    /// # Example
    /// ```
    /// use ldist::text::Codepoints;
    ///
    /// assert_eq!(Codepoints::from_utf8("né".as_bytes()).unwrap().len(), 2);
    /// assert!(Codepoints::from_utf8(&[0x66, 0xff]).is_err());
    /// ```
    pub fn from_utf8(bytes: &[u8]) -> Result<Self> {
        Self::from_utf8_limited(bytes, &Limits::unbounded())
    }

    pub fn from_utf8_limited(bytes: &[u8], limits: &Limits) -> Result<Self> {
        Self::decode_limited(validate_utf8(bytes)?, limits)
    }

    /// Validate and decode UTF-16 code units. Surrogate pairs become one
    /// codepoint; an unpaired surrogate is rejected.
    pub fn from_utf16(units: &[u16]) -> Result<Self> {
        Self::from_utf16_limited(units, &Limits::unbounded())
    }

    pub fn from_utf16_limited(units: &[u16], limits: &Limits) -> Result<Self> {
        let len = utf16_len(units)?;
        limits.check(len)?;
        Self::collect_utf16(len, units)
    }

    /// Decode two strings. Both are checked against `limits` before either
    /// buffer is allocated.
    pub fn pair(a: &str, b: &str, limits: &Limits) -> Result<(Self, Self)> {
        let len_a = a.chars().count();
        let len_b = b.chars().count();
        limits.check(len_a)?;
        limits.check(len_b)?;
        Ok((Self::collect(len_a, a.chars())?, Self::collect(len_b, b.chars())?))
    }

    /// Validate two UTF-8 buffers, then decode them.
    pub fn pair_utf8(a: &[u8], b: &[u8], limits: &Limits) -> Result<(Self, Self)> {
        let a = validate_utf8(a)?;
        let b = validate_utf8(b)?;
        Self::pair(a, b, limits)
    }

    /// Validate two UTF-16 buffers, then decode them.
    pub fn pair_utf16(a: &[u16], b: &[u16], limits: &Limits) -> Result<(Self, Self)> {
        let len_a = utf16_len(a)?;
        let len_b = utf16_len(b)?;
        limits.check(len_a)?;
        limits.check(len_b)?;
        Ok((Self::collect_utf16(len_a, a)?, Self::collect_utf16(len_b, b)?))
    }

    fn collect_utf16(len: usize, units: &[u16]) -> Result<Self> {
        // Callers validate first, nothing is dropped here
        Self::collect(len, char::decode_utf16(units.iter().copied()).filter_map(|c| c.ok()))
    }

    fn collect(len: usize, chars: impl Iterator<Item = char>) -> Result<Self> {
        let mut buf: SmallVec<[char; 64]> = SmallVec::new();
        buf.try_reserve_exact(len)
            .map_err(DistanceError::from_reserve("codepoint buffer", len))?;
        buf.extend(chars);
        Ok(Self { chars: buf })
    }

    #[must_use]
    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }
}

impl Deref for Codepoints {
    type Target = [char];

    fn deref(&self) -> &[char] {
        &self.chars
    }
}

fn validate_utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| {
        DistanceError::validation(format!("invalid UTF-8 at byte {}", e.valid_up_to()))
    })
}

/// Codepoint count of a UTF-16 buffer, or the first unpaired surrogate.
fn utf16_len(units: &[u16]) -> Result<usize> {
    let mut len = 0;
    for decoded in char::decode_utf16(units.iter().copied()) {
        if let Err(e) = decoded {
            return Err(DistanceError::validation(format!(
                "unpaired surrogate 0x{:04X} after {} codepoints",
                e.unpaired_surrogate(),
                len
            )));
        }
        len += 1;
    }
    Ok(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_counts_codepoints_not_bytes() {
        // 1, 2, 3 and 4 byte characters
        let s = "aé€😀";
        assert_eq!(s.len(), 10);
        let cps = Codepoints::decode(s).unwrap();
        assert_eq!(cps.len(), 4);
        assert_eq!(cps.as_slice(), &['a', 'é', '€', '😀']);
    }

    #[test]
    fn test_from_utf8_rejects_malformed() {
        let err = Codepoints::from_utf8(b"ab\xc3").unwrap_err();
        assert_eq!(
            err,
            DistanceError::Validation {
                reason: "invalid UTF-8 at byte 2".to_string()
            }
        );
    }

    #[test]
    fn test_from_utf16_surrogate_pairs() {
        let units: Vec<u16> = "x😀y".encode_utf16().collect();
        assert_eq!(units.len(), 4);
        let cps = Codepoints::from_utf16(&units).unwrap();
        assert_eq!(cps.as_slice(), &['x', '😀', 'y']);
    }

    #[test]
    fn test_from_utf16_rejects_lone_surrogate() {
        let err = Codepoints::from_utf16(&[0x0061, 0xD800, 0x0062]).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("0xD800"));

        // Trailing high surrogate with nothing after it
        assert!(Codepoints::from_utf16(&[0xD83D]).is_err());
    }

    #[test]
    fn test_empty_inputs() {
        assert!(Codepoints::decode("").unwrap().is_empty());
        assert!(Codepoints::from_utf8(b"").unwrap().is_empty());
        assert!(Codepoints::from_utf16(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_limits() {
        let limits = Limits::with_max_codepoints(3);
        // 3 codepoints, 9 bytes
        assert!(Codepoints::decode_limited("日本語", &limits).is_ok());
        let err = Codepoints::decode_limited("日本語!", &limits).unwrap_err();
        assert_eq!(err.to_string(), "Invalid text: input has 4 codepoints, limit is 3");

        let units: Vec<u16> = "😀😀😀".encode_utf16().collect();
        assert!(Codepoints::from_utf16_limited(&units, &limits).is_ok());
        assert!(Limits::unbounded().check(usize::MAX).is_ok());
    }

    #[test]
    fn test_pair_validates_both_before_decoding() {
        let limits = Limits::unbounded();
        let (a, b) = Codepoints::pair("né", "日本語", &limits).unwrap();
        assert_eq!((a.len(), b.len()), (2, 3));

        let err = Codepoints::pair_utf8(b"fine", b"\xff", &limits).unwrap_err();
        assert_eq!(err.to_string(), "Invalid text: invalid UTF-8 at byte 0");

        let err = Codepoints::pair_utf16(&[0x61], &[0x62, 0xDFFF], &limits).unwrap_err();
        assert!(err.to_string().contains("0xDFFF after 1 codepoints"));

        let err = Codepoints::pair("abc", "abcd", &Limits::with_max_codepoints(3)).unwrap_err();
        assert_eq!(err.to_string(), "Invalid text: input has 4 codepoints, limit is 3");
    }

    #[test]
    fn test_limits_deserialize() {
        let limits: Limits = serde_json::from_str(r#"{"max_codepoints": 128}"#).unwrap();
        assert_eq!(limits, Limits::with_max_codepoints(128));

        let limits: Limits = serde_json::from_str("{}").unwrap();
        assert_eq!(limits, Limits::unbounded());
    }
}
