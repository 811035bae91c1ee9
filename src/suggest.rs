//! "Did you mean" suggestions built on the edit distance
//!
//! Given a misspelled name and the names that were actually available,
//! pick the closest candidates and phrase them as a hint:
//! - candidates are grouped by distance and the nearest group wins
//! - "extras" that relate to the word in another way (substring, same
//!   characters) are merged in even when they are not the nearest
//! - a distance larger than `max_differences(word)` is not worth suggesting
//!
//! Non-strict matching ignores underscores, so `is_digit` finds `isdigit`.

use crate::algorithms::levenshtein_codepoints;
use crate::error::{DistanceError, Result};
use crate::text::{Codepoints, Limits};
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::str::FromStr;

/// Largest distance still worth suggesting for `word`: `len/2 + len/4`.
///
/// # Example
/// ```
/// use ldist::suggest::max_differences;
///
/// assert_eq!(max_differences("colections"), 7);
/// assert_eq!(max_differences("ab"), 1);
/// ```
#[must_use]
pub fn max_differences(word: &str) -> usize {
    let len = word.chars().count();
    len / 2 + len / 4
}

/// Cheap upper bound of the edit distance: length difference plus the number
/// of mismatching codepoints at equal positions. Needs no working memory.
#[must_use]
pub fn positional_differences(a: &str, b: &str) -> usize {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    let mismatched = a.chars().zip(b.chars()).filter(|(ca, cb)| ca != cb).count();
    len_a.abs_diff(len_b) + mismatched
}

/// Phrase a list of options as a question.
///
/// # Example
/// ```
/// use ldist::suggest::format_options;
///
/// assert_eq!(format_options(&["os"]).as_deref(), Some("Did you mean os?"));
/// assert_eq!(
///     format_options(&["sys", "site", "six"]).as_deref(),
///     Some("Did you mean one of sys, site or six?")
/// );
/// assert_eq!(format_options::<&str>(&[]), None);
/// ```
#[must_use]
pub fn format_options<S: AsRef<str>>(options: &[S]) -> Option<String> {
    match options {
        [] => None,
        [only] => Some(format!("Did you mean {}?", only.as_ref())),
        [head @ .., last] => {
            let head: Vec<&str> = head.iter().map(|s| s.as_ref()).collect();
            Some(format!(
                "Did you mean one of {} or {}?",
                head.join(", "),
                last.as_ref()
            ))
        }
    }
}

/// Rule deciding which candidates are suggested regardless of distance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraRule {
    /// Only the nearest group is suggested
    NearestOnly,
    /// The word contains the candidate or the candidate contains the word
    #[default]
    Substring,
    /// Like `Substring`, but a candidate containing the word must be shorter
    /// than twice the word's length
    BoundedSubstring,
    /// Candidate uses exactly the same set of characters (anagram-like typos)
    CharacterSet,
}

impl ExtraRule {
    fn matches(self, word: &str, candidate: &str) -> bool {
        match self {
            ExtraRule::NearestOnly => false,
            ExtraRule::Substring => word.contains(candidate) || candidate.contains(word),
            ExtraRule::BoundedSubstring => {
                let word_len = word.chars().count();
                let candidate_len = candidate.chars().count();
                word.contains(candidate)
                    || (candidate.contains(word) && word_len + candidate_len < word_len * 3)
            }
            ExtraRule::CharacterSet => {
                let word_set: AHashSet<char> = word.chars().collect();
                let candidate_set: AHashSet<char> = candidate.chars().collect();
                word_set == candidate_set
            }
        }
    }
}

impl FromStr for ExtraRule {
    type Err = DistanceError;

    fn from_str(rule: &str) -> Result<Self> {
        match rule.to_lowercase().as_str() {
            "none" | "nearest_only" => Ok(ExtraRule::NearestOnly),
            "substring" => Ok(ExtraRule::Substring),
            "bounded_substring" => Ok(ExtraRule::BoundedSubstring),
            "character_set" | "charset" => Ok(ExtraRule::CharacterSet),
            _ => Err(DistanceError::validation(format!(
                "unknown extras rule '{}', expected one of: none, substring, bounded_substring, character_set",
                rule
            ))),
        }
    }
}

/// Configuration for `Suggester`
///
/// The default retries without underscores when a strict search finds
/// nothing; every binding of `Suggester` shares this default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestConfig {
    /// Which candidates are suggested besides the nearest ones
    pub extras: ExtraRule,
    /// When false, a search that finds nothing is retried with underscores
    /// removed from the word and every candidate
    pub strict: bool,
    /// Limits applied to the word and each candidate
    pub limits: Limits,
}

/// Picks the closest candidates for a misspelled word.
///
/// # Example
/// ```
/// use ldist::suggest::{Suggester, SuggestConfig};
///
/// let suggester = Suggester::new(SuggestConfig::default());
/// let found = suggester
///     .suggest("apend", &["append", "extend", "insert"])
///     .unwrap();
/// assert_eq!(found, Some(vec!["append"]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Suggester {
    config: SuggestConfig,
}

impl Suggester {
    #[must_use]
    pub fn new(config: SuggestConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &SuggestConfig {
        &self.config
    }

    /// Suggest candidates for `word`, or `None` when nothing is close enough.
    ///
    /// Results keep the order in which candidates were given, without
    /// duplicates, and are the original (unstripped) candidate names.
    pub fn suggest<'c, S: AsRef<str>>(
        &self,
        word: &str,
        candidates: &'c [S],
    ) -> Result<Option<Vec<&'c str>>> {
        if let Some(found) = self.closest(word, candidates, false)? {
            return Ok(Some(found));
        }
        if self.config.strict {
            return Ok(None);
        }
        log::debug!("no strict match for {:?}, retrying without underscores", word);
        self.closest(word, candidates, true)
    }

    fn closest<'c, S: AsRef<str>>(
        &self,
        word: &str,
        candidates: &'c [S],
        relaxed: bool,
    ) -> Result<Option<Vec<&'c str>>> {
        let word = comparable(word, relaxed);
        let word_cps = Codepoints::decode_limited(&word, &self.config.limits)?;

        let mut groups: AHashMap<usize, Vec<&'c str>> = AHashMap::new();
        let mut extras: Vec<&'c str> = Vec::new();

        for candidate in candidates {
            let original = candidate.as_ref();
            let name = comparable(original, relaxed);
            let cps = match Codepoints::decode_limited(&name, &self.config.limits) {
                Ok(cps) => cps,
                Err(e @ DistanceError::Validation { .. }) => {
                    log::debug!("skipping candidate {:?}: {}", original, e);
                    continue;
                }
                Err(e) => return Err(e),
            };
            let distance = levenshtein_codepoints(&word_cps, &cps)?;
            groups.entry(distance).or_default().push(original);
            if self.config.extras.matches(&word, &name) {
                extras.push(original);
            }
        }

        let Some(likely) = groups.keys().min().copied() else {
            return Ok(None);
        };

        let threshold = max_differences(&word);
        if likely > threshold {
            if extras.is_empty() {
                return Ok(None);
            }
            log::trace!("nearest distance {} over {}, using extras", likely, threshold);
            return Ok(Some(dedup(extras)));
        }

        let mut best = groups.remove(&likely).unwrap_or_default();
        best.extend(extras);
        Ok(Some(dedup(best)))
    }
}

fn comparable(s: &str, relaxed: bool) -> Cow<'_, str> {
    if relaxed && s.contains('_') {
        Cow::Owned(s.replace('_', ""))
    } else {
        Cow::Borrowed(s)
    }
}

fn dedup(names: Vec<&str>) -> Vec<&str> {
    let mut seen = AHashSet::with_capacity(names.len());
    names.into_iter().filter(|name| seen.insert(*name)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggester(extras: ExtraRule, strict: bool) -> Suggester {
        Suggester::new(SuggestConfig {
            extras,
            strict,
            limits: Limits::unbounded(),
        })
    }

    #[test]
    fn test_max_differences() {
        assert_eq!(max_differences(""), 0);
        assert_eq!(max_differences("a"), 0);
        assert_eq!(max_differences("abcd"), 3);
        // Codepoints, not bytes
        assert_eq!(max_differences("日本語日"), 3);
    }

    #[test]
    fn test_positional_differences() {
        assert_eq!(positional_differences("", ""), 0);
        assert_eq!(positional_differences("abc", "abd"), 1);
        assert_eq!(positional_differences("abc", "abcde"), 2);
        // Shift penalizes every position, unlike the edit distance
        assert_eq!(positional_differences("flaw", "lawn"), 4);
        assert_eq!(positional_differences("😀a", "😀b"), 1);
    }

    #[test]
    fn test_format_options() {
        assert_eq!(
            format_options(&["a", "b"]).as_deref(),
            Some("Did you mean one of a or b?")
        );
        assert_eq!(
            format_options(&["x".to_string()]).as_deref(),
            Some("Did you mean x?")
        );
    }

    #[test]
    fn test_nearest_group_wins() {
        let s = suggester(ExtraRule::NearestOnly, true);
        let names = ["collections", "contextlib", "colorsys"];
        assert_eq!(s.suggest("colections", &names).unwrap(), Some(vec!["collections"]));
    }

    #[test]
    fn test_ties_are_all_reported_in_order() {
        let s = suggester(ExtraRule::NearestOnly, true);
        let names = ["cat", "bat", "hat", "cat"];
        assert_eq!(s.suggest("rat", &names).unwrap(), Some(vec!["cat", "bat", "hat"]));
    }

    #[test]
    fn test_too_far_without_extras() {
        let s = suggester(ExtraRule::Substring, true);
        assert_eq!(s.suggest("abcd", &["wxyz", "qrst"]).unwrap(), None);
        assert_eq!(s.suggest("abcd", &[] as &[&str]).unwrap(), None);
    }

    #[test]
    fn test_too_far_falls_back_to_extras() {
        let s = suggester(ExtraRule::Substring, true);
        let names = ["pattern_matching", "xyz"];
        assert_eq!(s.suggest("pat", &names).unwrap(), Some(vec!["pattern_matching"]));
    }

    #[test]
    fn test_extras_merged_with_nearest() {
        let s = suggester(ExtraRule::Substring, true);
        let names = ["values", "value_count", "valves"];
        assert_eq!(
            s.suggest("value", &names).unwrap(),
            Some(vec!["values", "value_count"])
        );
    }

    #[test]
    fn test_bounded_substring() {
        assert!(ExtraRule::BoundedSubstring.matches("ab", "abc"));
        assert!(!ExtraRule::BoundedSubstring.matches("ab", "abcdefg"));
        assert!(ExtraRule::BoundedSubstring.matches("abcdefg", "ab"));
        assert!(ExtraRule::Substring.matches("ab", "abcdefg"));
    }

    #[test]
    fn test_character_set_rule() {
        let s = suggester(ExtraRule::CharacterSet, true);
        // Distance 2 > max_differences(3) = 1, but same characters
        assert_eq!(s.suggest("sys", &["ssy", "six"]).unwrap(), Some(vec!["ssy"]));
    }

    #[test]
    fn test_relaxed_retry_ignores_underscores() {
        let _ = env_logger::builder().is_test(true).try_init();
        let names = ["a__b_"];
        assert_eq!(
            suggester(ExtraRule::NearestOnly, true).suggest("a_b", &names).unwrap(),
            None
        );
        assert_eq!(
            suggester(ExtraRule::NearestOnly, false).suggest("a_b", &names).unwrap(),
            Some(vec!["a__b_"])
        );
    }

    #[test]
    fn test_oversized_candidates_are_skipped() {
        let s = Suggester::new(SuggestConfig {
            extras: ExtraRule::NearestOnly,
            strict: true,
            limits: Limits::with_max_codepoints(8),
        });
        let names = ["a_really_long_identifier", "lenght"];
        assert_eq!(s.suggest("length", &names).unwrap(), Some(vec!["lenght"]));

        let err = s.suggest("way_too_long_word", &names).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_default_config_retries_relaxed() {
        assert!(!SuggestConfig::default().strict);
        let found = Suggester::default().suggest("a_b", &["a__b_"]).unwrap();
        assert_eq!(found, Some(vec!["a__b_"]));
    }

    #[test]
    fn test_extra_rule_from_str() {
        assert_eq!("none".parse::<ExtraRule>().unwrap(), ExtraRule::NearestOnly);
        assert_eq!("Substring".parse::<ExtraRule>().unwrap(), ExtraRule::Substring);
        assert_eq!("charset".parse::<ExtraRule>().unwrap(), ExtraRule::CharacterSet);
        assert_eq!(
            "bounded_substring".parse::<ExtraRule>().unwrap(),
            ExtraRule::BoundedSubstring
        );
        assert!("fuzzy".parse::<ExtraRule>().unwrap_err().is_validation());
    }

    #[test]
    fn test_config_deserialize() {
        let config: SuggestConfig =
            serde_json::from_str(r#"{"extras": "character_set", "strict": true}"#).unwrap();
        assert_eq!(config.extras, ExtraRule::CharacterSet);
        assert!(config.strict);
        assert_eq!(config.limits, Limits::unbounded());

        let config: SuggestConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SuggestConfig::default());
    }
}
