//! Heuristic repair of truncated JSON candidates.
//!
//! Length-limited generation often cuts a value off mid-structure. When
//! the initial parse fails with a premature-end-of-input error, this
//! module walks the candidate with string/escape awareness, trims a
//! dangling half-written key if one is found, and closes whatever
//! delimiters remain open. It is best-effort: a candidate truncated at an
//! unlucky spot can still fail the reparse, and that failure is reported
//! as [`RepairError`] for the caller to fold into its fallback decision.

use serde_json::Value;

use crate::error::RepairError;

/// Returns true when a parse error belongs to the truncation class that
/// repair can plausibly fix (premature end of input, unterminated string).
#[inline]
pub fn is_truncation(err: &serde_json::Error) -> bool {
    err.is_eof()
}

/// Attempts to repair a truncated candidate and reparse it.
///
/// Steps:
/// 1. Walk the text tracking string state and unmatched `{` / `[`.
/// 2. If the walk ends inside a string that starts a new, half-written
///    object key, trim from the preceding comma onward; otherwise
///    terminate the string, keeping the truncated content.
/// 3. Drop a trailing comma left between fields.
/// 4. Append one `]` per unmatched `[`, then one `}` per unmatched `{`
///    (arrays closed before objects).
/// 5. Reparse.
///
/// # Examples
///
/// ```
/// use salvage::repair::repair_truncated;
/// use serde_json::json;
///
/// let repaired = repair_truncated(r#"{"a": "x", "b": {"c": "y"#).unwrap();
/// assert_eq!(repaired, json!({"a": "x", "b": {"c": "y"}}));
/// ```
pub fn repair_truncated(candidate: &str) -> Result<Value, RepairError> {
    let walk = Walk::scan(candidate);

    let mut text = if walk.in_string {
        match dangling_key_cut(candidate, &walk) {
            Some(cut) => candidate[..cut].to_string(),
            None => {
                // The string is a value; accept the truncated content.
                let mut text = candidate.to_string();
                text.push('"');
                text
            }
        }
    } else {
        candidate.to_string()
    };

    let trimmed_len = text.trim_end().len();
    text.truncate(trimmed_len);
    if text.ends_with(',') {
        text.pop();
    }

    let walk = Walk::scan(&text);
    for _ in 0..walk.open_brackets() {
        text.push(']');
    }
    for _ in 0..walk.open_braces() {
        text.push('}');
    }

    Ok(serde_json::from_str(&text)?)
}

/// Escape-aware pass over a candidate, recording string state and the
/// stack of unmatched opening delimiters.
#[derive(Debug, Default)]
struct Walk {
    in_string: bool,
    /// Byte offset of the opening quote of the unterminated string, valid
    /// only when `in_string` is set at the end of the walk.
    string_start: usize,
    stack: Vec<char>,
}

impl Walk {
    fn scan(text: &str) -> Self {
        let mut walk = Self::default();
        let mut escape_next = false;

        for (idx, ch) in text.char_indices() {
            if escape_next {
                escape_next = false;
                continue;
            }

            match ch {
                '\\' if walk.in_string => escape_next = true,
                '"' => {
                    if walk.in_string {
                        walk.in_string = false;
                    } else {
                        walk.in_string = true;
                        walk.string_start = idx;
                    }
                }
                '{' if !walk.in_string => walk.stack.push('{'),
                '[' if !walk.in_string => walk.stack.push('['),
                '}' if !walk.in_string => {
                    if walk.stack.last() == Some(&'{') {
                        walk.stack.pop();
                    }
                }
                ']' if !walk.in_string => {
                    if walk.stack.last() == Some(&'[') {
                        walk.stack.pop();
                    }
                }
                _ => {}
            }
        }

        walk
    }

    fn open_braces(&self) -> usize {
        self.stack.iter().filter(|c| **c == '{').count()
    }

    fn open_brackets(&self) -> usize {
        self.stack.iter().filter(|c| **c == '[').count()
    }
}

/// Finds where to cut when the unterminated string starts a new object key.
///
/// Only applies when the innermost open container is an object and the
/// dangling quote follows a comma (a complete `"key": value` pair precedes
/// it) or immediately follows the opening brace. String values truncated
/// mid-content return `None` and are closed instead.
fn dangling_key_cut(text: &str, walk: &Walk) -> Option<usize> {
    if walk.stack.last() != Some(&'{') {
        return None;
    }

    let before = text[..walk.string_start].trim_end();
    if before.ends_with(',') {
        // Cut the comma too so the preceding pair stays well-formed.
        Some(before.len() - 1)
    } else if before.ends_with('{') {
        Some(walk.string_start)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_is_truncation_classifies_eof() {
        let err = serde_json::from_str::<Value>(r#"{"a": 1"#).unwrap_err();
        assert!(is_truncation(&err));

        let err = serde_json::from_str::<Value>(r#"{"a": "x"#).unwrap_err();
        assert!(is_truncation(&err));

        let err = serde_json::from_str::<Value>(r#"{"a": zzz}"#).unwrap_err();
        assert!(!is_truncation(&err));
    }

    #[test]
    fn test_repair_missing_braces() {
        let repaired = repair_truncated(r#"{"a": "x", "b": {"c": "y"#).unwrap();
        assert_eq!(repaired, json!({"a": "x", "b": {"c": "y"}}));
    }

    #[test]
    fn test_repair_dangling_key_trimmed() {
        // "na is the start of a new key; trim back to the complete pair.
        let repaired = repair_truncated(r#"{"age": 30, "na"#).unwrap();
        assert_eq!(repaired, json!({"age": 30}));
    }

    #[test]
    fn test_repair_truncated_string_value_kept() {
        let repaired = repair_truncated(r#"{"text": "partial conten"#).unwrap();
        assert_eq!(repaired, json!({"text": "partial conten"}));
    }

    #[test]
    fn test_repair_truncated_array() {
        let repaired = repair_truncated("[1, 2, 3").unwrap();
        assert_eq!(repaired, json!([1, 2, 3]));
    }

    #[test]
    fn test_repair_array_inside_object() {
        let repaired = repair_truncated(r#"{"tags": ["x", "y"#).unwrap();
        assert_eq!(repaired, json!({"tags": ["x", "y"]}));
    }

    #[test]
    fn test_repair_trailing_comma_dropped() {
        let repaired = repair_truncated(r#"{"a": 1,"#).unwrap();
        assert_eq!(repaired, json!({"a": 1}));
    }

    #[test]
    fn test_repair_first_key_truncated() {
        let repaired = repair_truncated(r#"{"na"#).unwrap();
        assert_eq!(repaired, json!({}));
    }

    #[test]
    fn test_repair_string_in_array_closed_not_trimmed() {
        let repaired = repair_truncated(r#"["alpha", "bet"#).unwrap();
        assert_eq!(repaired, json!(["alpha", "bet"]));
    }

    #[test]
    fn test_repair_failure_reported() {
        // Object truncated inside an array: the fixed arrays-then-objects
        // closing order cannot produce valid JSON here.
        let result = repair_truncated(r#"[{"a": 1"#);
        assert!(matches!(result, Err(RepairError::StillInvalid(_))));
    }

    #[test]
    fn test_repair_ignores_delimiters_inside_strings() {
        let repaired = repair_truncated(r#"{"text": "open { and [ inside"#).unwrap();
        assert_eq!(repaired, json!({"text": "open { and [ inside"}));
    }
}
