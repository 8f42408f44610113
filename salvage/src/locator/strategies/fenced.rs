//! Code-fence extraction strategies.

use once_cell::sync::Lazy;
use regex::Regex;

use super::LocateStrategy;
use crate::locator::candidate::{Candidate, Origin};

/// Matches input that is exactly one fenced block, nothing around it.
static EXACT_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*```([A-Za-z0-9]*)[ \t]*\r?\n?(.*?)\r?\n?```\s*$")
        .expect("exact fence regex is valid")
});

/// Matches the first fenced block anywhere; trailing narration after the
/// closing fence is discarded.
static LOOSE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```([A-Za-z0-9]*)[ \t]*\r?\n?(.*?)\r?\n?```")
        .expect("loose fence regex is valid")
});

/// Strategy that unwraps content from a triple-backtick code fence.
///
/// An exact whole-string match is tried first, then a looser match that
/// tolerates prose before and after the fence.
///
/// # Examples
///
/// ```
/// use salvage::locator::strategies::{FencedBlockStrategy, LocateStrategy};
///
/// let strategy = FencedBlockStrategy::default();
/// let candidate = strategy.locate("```json\n{\"a\": 1}\n```").unwrap();
/// assert_eq!(candidate.text, "{\"a\": 1}");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FencedBlockStrategy;

impl FencedBlockStrategy {
    fn unwrap_fence(input: &str, regex: &Regex) -> Option<Candidate> {
        let captures = regex.captures(input)?;
        let lang = captures
            .get(1)
            .map(|m| m.as_str())
            .filter(|tag| !tag.is_empty())
            .map(str::to_string);
        let body = captures.get(2)?.as_str().trim();
        if body.is_empty() {
            return None;
        }
        Some(Candidate::new(body, Origin::Fenced { lang }))
    }
}

impl LocateStrategy for FencedBlockStrategy {
    #[inline]
    fn name(&self) -> &'static str {
        "fenced_block"
    }

    fn locate(&self, input: &str) -> Option<Candidate> {
        Self::unwrap_fence(input, &EXACT_FENCE).or_else(|| Self::unwrap_fence(input, &LOOSE_FENCE))
    }

    #[inline]
    fn priority(&self) -> u8 {
        1
    }
}

/// Strategy that strips fence tokens by hand when the regexes failed.
///
/// This covers fences the regexes reject, such as a block that was cut off
/// before its closing fence. The remainder is only accepted when it begins
/// with an opening brace.
#[derive(Debug, Clone, Copy, Default)]
pub struct FenceStripStrategy;

impl LocateStrategy for FenceStripStrategy {
    #[inline]
    fn name(&self) -> &'static str {
        "fence_strip"
    }

    fn locate(&self, input: &str) -> Option<Candidate> {
        let trimmed = input.trim();
        let after_fence = trimmed.strip_prefix("```")?;

        // Drop the language tag: everything up to the first newline, or the
        // leading alphanumeric run when the fence is a single line.
        let body = match after_fence.find('\n') {
            Some(newline) => &after_fence[newline + 1..],
            None => after_fence.trim_start_matches(|c: char| c.is_alphanumeric()),
        };

        let body = body.trim_end().trim_end_matches("```").trim();
        if body.starts_with('{') {
            Some(Candidate::new(body, Origin::FenceStripped))
        } else {
            None
        }
    }

    #[inline]
    fn priority(&self) -> u8 {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_fence_with_tag() {
        let strategy = FencedBlockStrategy;
        let candidate = strategy.locate("```json\n{\"a\":1}\n```").unwrap();

        assert_eq!(candidate.text, r#"{"a":1}"#);
        assert_eq!(
            candidate.origin,
            Origin::Fenced {
                lang: Some("json".to_string())
            }
        );
    }

    #[test]
    fn test_exact_fence_without_tag() {
        let strategy = FencedBlockStrategy;
        let candidate = strategy.locate("```\n{\"a\": 1}\n```").unwrap();

        assert_eq!(candidate.text, r#"{"a": 1}"#);
        assert_eq!(candidate.origin, Origin::Fenced { lang: None });
    }

    #[test]
    fn test_loose_fence_discards_narration() {
        let strategy = FencedBlockStrategy;
        let input = "Here you go: ```json\n{\"a\": 1}\n``` Hope that helps!";
        let candidate = strategy.locate(input).unwrap();

        assert_eq!(candidate.text, r#"{"a": 1}"#);
    }

    #[test]
    fn test_no_fence_returns_none() {
        let strategy = FencedBlockStrategy;
        assert!(strategy.locate(r#"{"a": 1}"#).is_none());
    }

    #[test]
    fn test_empty_fence_returns_none() {
        let strategy = FencedBlockStrategy;
        assert!(strategy.locate("```json\n\n```").is_none());
    }

    #[test]
    fn test_manual_strip_unterminated_fence() {
        let strategy = FenceStripStrategy;
        let candidate = strategy.locate("```json\n{\"a\": 1}").unwrap();

        assert_eq!(candidate.text, r#"{"a": 1}"#);
        assert_eq!(candidate.origin, Origin::FenceStripped);
    }

    #[test]
    fn test_manual_strip_requires_brace() {
        let strategy = FenceStripStrategy;
        assert!(strategy.locate("```\nnot json at all").is_none());
    }

    #[test]
    fn test_manual_strip_with_trailing_fence() {
        let strategy = FenceStripStrategy;
        let candidate = strategy.locate("```json\n{\"a\": 1}\n```").unwrap();
        assert_eq!(candidate.text, r#"{"a": 1}"#);
    }

    #[test]
    fn test_manual_strip_requires_fence_prefix() {
        let strategy = FenceStripStrategy;
        assert!(strategy.locate(r#"{"a": 1}"#).is_none());
    }
}
