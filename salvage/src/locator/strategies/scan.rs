//! Delimiter-scanning strategies.

use serde_json::Value;

use super::LocateStrategy;
use crate::locator::candidate::{Candidate, Origin};

/// Scans forward from the first `open` delimiter, tracking nesting depth.
///
/// Braces and brackets inside double-quoted strings are ignored, with
/// backslash-escape awareness, so quoted content never terminates the scan
/// early. Returns the balanced span including both delimiters, or `None`
/// when the input ends before depth returns to zero.
fn scan_balanced(input: &str, open: char, close: char) -> Option<&str> {
    let start = input.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (offset, ch) in input[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&input[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Strategy that extracts the first balanced object or array span.
///
/// The array scan runs first when the first `[` in the text appears before
/// the first `{`, so callers expecting a list are not misled by an object
/// that happens to appear later. Spans are trial-parsed before acceptance.
///
/// # Examples
///
/// ```
/// use salvage::locator::strategies::{BalancedScanStrategy, LocateStrategy};
///
/// let strategy = BalancedScanStrategy;
/// let candidate = strategy
///     .locate(r#"Sure! The data is {"name": "Alice"} hope this helps"#)
///     .unwrap();
/// assert_eq!(candidate.text, r#"{"name": "Alice"}"#);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BalancedScanStrategy;

impl BalancedScanStrategy {
    fn scan_kind(input: &str, origin: &Origin) -> Option<Candidate> {
        let (open, close) = match origin {
            Origin::ArrayScan => ('[', ']'),
            _ => ('{', '}'),
        };
        let span = scan_balanced(input, open, close)?;
        if serde_json::from_str::<Value>(span).is_err() {
            return None;
        }
        Some(Candidate::new(span, origin.clone()))
    }
}

impl LocateStrategy for BalancedScanStrategy {
    #[inline]
    fn name(&self) -> &'static str {
        "balanced_scan"
    }

    fn locate(&self, input: &str) -> Option<Candidate> {
        let first_brace = input.find('{');
        let first_bracket = input.find('[');

        let array_first = match (first_bracket, first_brace) {
            (Some(bracket), Some(brace)) => bracket < brace,
            (Some(_), None) => true,
            _ => false,
        };

        if array_first {
            Self::scan_kind(input, &Origin::ArrayScan)
                .or_else(|| Self::scan_kind(input, &Origin::ObjectScan))
        } else {
            Self::scan_kind(input, &Origin::ObjectScan)
                .or_else(|| Self::scan_kind(input, &Origin::ArrayScan))
        }
    }

    #[inline]
    fn priority(&self) -> u8 {
        3
    }
}

/// Strategy that takes the first `{` through the last `}` in the whole
/// input. Lower confidence than the balanced scan; accepted only when the
/// span trial-parses.
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketSpanStrategy;

impl LocateStrategy for BracketSpanStrategy {
    #[inline]
    fn name(&self) -> &'static str {
        "bracket_span"
    }

    fn locate(&self, input: &str) -> Option<Candidate> {
        let first = input.find('{')?;
        let last = input.rfind('}')?;
        if last < first {
            return None;
        }

        let span = &input[first..=last];
        if serde_json::from_str::<Value>(span).is_err() {
            return None;
        }
        Some(Candidate::new(span, Origin::Bracketed))
    }

    #[inline]
    fn priority(&self) -> u8 {
        4
    }
}
