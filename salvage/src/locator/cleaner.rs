//! Noise stripping applied before candidate location.

use std::borrow::Cow;

/// Zero-width and bidi-control code points that break parsing while being
/// invisible in logs.
const INVISIBLE: [char; 11] = [
    '\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}', '\u{200E}', '\u{200F}', '\u{202A}', '\u{202B}',
    '\u{202C}', '\u{202D}', '\u{202E}',
];

/// Removes byte-order marks, zero-width characters, and non-printable
/// control characters wherever they appear.
///
/// Newline, tab, and carriage return are preserved: they can be legitimate
/// content inside string fields. Empty input flows through unchanged.
///
/// # Examples
///
/// ```
/// use salvage::locator::strip_noise;
///
/// let cleaned = strip_noise("\u{FEFF}{\"a\": 1}\u{0000}");
/// assert_eq!(cleaned, "{\"a\": 1}");
/// ```
pub fn strip_noise(input: &str) -> Cow<'_, str> {
    let needs_cleaning = input.chars().any(is_noise);
    if !needs_cleaning {
        return Cow::Borrowed(input);
    }

    let mut cleaned = String::with_capacity(input.len());
    for ch in input.chars() {
        if !is_noise(ch) {
            cleaned.push(ch);
        }
    }
    Cow::Owned(cleaned)
}

fn is_noise(ch: char) -> bool {
    if matches!(ch, '\n' | '\t' | '\r') {
        return false;
    }
    ch.is_control() || INVISIBLE.contains(&ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_leading_bom() {
        let result = strip_noise("\u{FEFF}{\"a\": 1}");
        assert_eq!(result, "{\"a\": 1}");
    }

    #[test]
    fn test_strips_control_chars() {
        let result = strip_noise("{\"a\":\u{0001} 1}\u{0007}");
        assert_eq!(result, "{\"a\": 1}");
    }

    #[test]
    fn test_preserves_whitespace_controls() {
        let input = "{\"text\": \"line one\\nline two\"}\n\t\r";
        let result = strip_noise(input);
        assert_eq!(result, input);
    }

    #[test]
    fn test_strips_zero_width_chars() {
        let result = strip_noise("{\u{200B}\"a\"\u{200D}: 1}");
        assert_eq!(result, "{\"a\": 1}");
    }

    #[test]
    fn test_empty_input_passes_through() {
        assert_eq!(strip_noise(""), "");
    }

    #[test]
    fn test_clean_input_borrows() {
        let input = r#"{"a": 1}"#;
        assert!(matches!(strip_noise(input), Cow::Borrowed(_)));
    }
}
