//! Array-mode sanitization for callers expecting a bare list.

use serde_json::{json, Value};

use super::Sanitizer;
use crate::diagnostics::DiagnosticEvent;

impl Sanitizer {
    /// Sanitizes raw generated text into a list.
    ///
    /// Runs the same strip → locate → parse → repair pipeline as object
    /// mode, then shapes the result with [`sanitize_array_value`]. Any
    /// parse failure returns the caller's fallback.
    ///
    /// [`sanitize_array_value`]: Sanitizer::sanitize_array_value
    ///
    /// # Examples
    ///
    /// ```
    /// use salvage::Sanitizer;
    /// use serde_json::json;
    ///
    /// let sanitizer = Sanitizer::new();
    /// let items = sanitizer.sanitize_array_text(r#"{"items": [1, 2, 3]}"#, &[]);
    /// assert_eq!(items, vec![json!(1), json!(2), json!(3)]);
    /// ```
    pub fn sanitize_array_text(&self, raw: &str, fallback: &[Value]) -> Vec<Value> {
        match self.parse_candidate(raw) {
            Ok(value) => self.sanitize_array_value(value),
            Err(err) => {
                self.record(DiagnosticEvent::failure(format!(
                    "no usable list candidate: {err}"
                )));
                fallback.to_vec()
            }
        }
    }

    /// Shapes an already-parsed value into a list.
    ///
    /// - A list is returned as-is.
    /// - A mapping with exactly one key whose value is a list is
    ///   unwrapped: generators often wrap a requested list in a named
    ///   envelope like `{"items": [...]}`.
    /// - Null is filtered out, yielding an empty list.
    /// - Any other value is wrapped in a one-element list as a last
    ///   resort.
    pub fn sanitize_array_value(&self, value: Value) -> Vec<Value> {
        match value {
            Value::Array(items) => items,
            Value::Object(map) if map.len() == 1 && map.values().all(Value::is_array) => {
                match map.into_iter().next() {
                    Some((name, Value::Array(items))) => {
                        self.record(
                            DiagnosticEvent::info("unwrapped single-key list envelope")
                                .with_context(json!({"key": name})),
                        );
                        items
                    }
                    // Unreachable: the guard checked a single array entry.
                    _ => Vec::new(),
                }
            }
            Value::Null => Vec::new(),
            other => {
                self.record(DiagnosticEvent::warning(
                    "wrapped single value in a one-element list",
                ));
                vec![other]
            }
        }
    }
}
