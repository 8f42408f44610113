//! Schema-guided sanitization of parsed values.
//!
//! The sanitizer ties the pipeline together: strip noise, locate a
//! candidate, parse it (repairing truncation when the parse fails with a
//! premature-end error), then validate the result against a schema and a
//! fallback value of matching shape. It never errors outward; the only
//! caller-visible failure mode is a field or subtree receiving its
//! fallback, observable through the diagnostic sink.

mod array;

use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::{
    diagnostics::{DiagnosticEvent, DiagnosticSink, NullSink},
    error::CandidateError,
    locator::CandidateLocator,
    repair,
    schema::{ScalarKind, Schema, SchemaMap},
};

/// Sanitization engine.
///
/// Stateless across calls: each invocation is independent, so a single
/// `Sanitizer` can be shared freely between threads.
///
/// # Examples
///
/// ```
/// use salvage::{Sanitizer, Schema};
/// use serde_json::json;
///
/// let sanitizer = Sanitizer::new();
/// let schema = vec![
///     ("name".to_string(), Schema::string()),
///     ("age".to_string(), Schema::number()),
/// ];
/// let fallback = json!({"name": "", "age": 0});
///
/// let result = sanitizer.sanitize_text(
///     r#"Sure! {"name": "Alice", "age": 30} there you go"#,
///     &schema,
///     &fallback,
/// );
/// assert_eq!(result, json!({"name": "Alice", "age": 30}));
/// ```
#[derive(Debug)]
pub struct Sanitizer {
    locator: CandidateLocator,
    sink: Arc<dyn DiagnosticSink>,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sanitizer {
    /// Creates a sanitizer with no diagnostic sink.
    pub fn new() -> Self {
        Self::with_sink(Arc::new(NullSink))
    }

    /// Creates a sanitizer that reports events to the given sink.
    ///
    /// The sink is fire-and-forget; it never changes sanitization output.
    pub fn with_sink(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            locator: CandidateLocator::new(),
            sink,
        }
    }

    /// Sanitizes raw generated text against a schema and fallback.
    ///
    /// Always returns a value shaped like the fallback. Empty input and
    /// unparseable candidates yield the fallback itself.
    pub fn sanitize_text(&self, raw: &str, schema: &SchemaMap, fallback: &Value) -> Value {
        match self.parse_candidate(raw) {
            Ok(value) => self.sanitize_value(value, schema, fallback),
            Err(err) => {
                self.record(
                    DiagnosticEvent::failure(format!("no usable candidate: {err}"))
                        .with_context(json!({"input_len": raw.len()})),
                );
                fallback.clone()
            }
        }
    }

    /// Sanitizes an already-parsed value, bypassing text extraction.
    ///
    /// The top-level exception applies here: when the value is not an
    /// object but both it and the fallback are arrays, the array is
    /// returned as-is.
    pub fn sanitize_value(&self, value: Value, schema: &SchemaMap, fallback: &Value) -> Value {
        match value {
            Value::Object(incoming) => {
                Value::Object(self.sanitize_object(incoming, schema, fallback))
            }
            Value::Array(items) if fallback.is_array() => Value::Array(items),
            other => {
                self.record(
                    DiagnosticEvent::warning("top-level value does not match expected shape")
                        .with_context(json!({"found": type_name(&other)})),
                );
                fallback.clone()
            }
        }
    }

    /// Runs the strip → locate → parse → repair pipeline.
    pub(crate) fn parse_candidate(&self, raw: &str) -> Result<Value, CandidateError> {
        if raw.trim().is_empty() {
            return Err(CandidateError::Empty);
        }

        let candidate = self.locator.locate(raw);
        match serde_json::from_str(&candidate.text) {
            Ok(value) => Ok(value),
            Err(err) if repair::is_truncation(&err) => {
                match repair::repair_truncated(&candidate.text) {
                    Ok(value) => {
                        self.record(
                            DiagnosticEvent::warning("repaired truncated candidate")
                                .with_context(json!({"origin": format!("{:?}", candidate.origin)})),
                        );
                        Ok(value)
                    }
                    Err(repair_err) => {
                        self.record(DiagnosticEvent::failure(format!(
                            "truncation repair failed: {repair_err}"
                        )));
                        Err(CandidateError::Unparseable(err))
                    }
                }
            }
            Err(err) => Err(CandidateError::Unparseable(err)),
        }
    }

    /// Validates an object field-by-field in schema declaration order.
    ///
    /// Every key of the fallback ends up in the result: declared fields
    /// are validated, and fallback keys the schema never touched are
    /// copied over verbatim.
    fn sanitize_object(
        &self,
        incoming: Map<String, Value>,
        schema: &SchemaMap,
        fallback: &Value,
    ) -> Map<String, Value> {
        let fallback_fields = fallback.as_object();
        let mut result = Map::new();

        for (name, node) in schema {
            let field_fallback = fallback_fields
                .and_then(|fields| fields.get(name))
                .cloned()
                .unwrap_or(Value::Null);
            let sanitized = self.sanitize_field(name, incoming.get(name), node, &field_fallback);
            result.insert(name.clone(), sanitized);
        }

        if let Some(fields) = fallback_fields {
            for (name, value) in fields {
                if !result.contains_key(name) {
                    result.insert(name.clone(), value.clone());
                }
            }
        }

        result
    }

    fn sanitize_field(
        &self,
        name: &str,
        incoming: Option<&Value>,
        node: &Schema,
        fallback: &Value,
    ) -> Value {
        let value = match incoming {
            None | Some(Value::Null) => {
                self.record(
                    DiagnosticEvent::info("missing or null field, fallback inserted")
                        .with_context(json!({"field": name})),
                );
                return fallback.clone();
            }
            Some(value) => value,
        };

        match node {
            Schema::Nested(inner) => match value {
                Value::Object(map) => {
                    Value::Object(self.sanitize_object(map.clone(), inner, fallback))
                }
                // A field that should be a nested object sometimes arrives
                // as an escaped blob of text; parse and recurse.
                Value::String(text) => match serde_json::from_str::<Value>(text) {
                    Ok(Value::Object(map)) => {
                        self.record(
                            DiagnosticEvent::info("nested object recovered from string field")
                                .with_context(json!({"field": name})),
                        );
                        Value::Object(self.sanitize_object(map, inner, fallback))
                    }
                    _ => self.mismatch(name, "object", value, fallback),
                },
                _ => self.mismatch(name, "object", value, fallback),
            },
            Schema::UntypedArray => match value {
                Value::Array(_) => value.clone(),
                Value::String(text) => match serde_json::from_str::<Value>(text) {
                    Ok(Value::Array(items)) => {
                        self.record(
                            DiagnosticEvent::info("array recovered from string field")
                                .with_context(json!({"field": name})),
                        );
                        Value::Array(items)
                    }
                    _ => self.mismatch(name, "array", value, fallback),
                },
                _ => self.mismatch(name, "array", value, fallback),
            },
            Schema::Scalar(ScalarKind::String) => match value {
                Value::String(_) => value.clone(),
                Value::Number(number) => Value::String(number.to_string()),
                Value::Bool(flag) => Value::String(flag.to_string()),
                _ => self.mismatch(name, "string", value, fallback),
            },
            // No string-to-number coercion: "abc" parsed as 0 would be
            // worse than an honest fallback.
            Schema::Scalar(ScalarKind::Number) => {
                if value.is_number() {
                    value.clone()
                } else {
                    self.mismatch(name, "number", value, fallback)
                }
            }
            Schema::Scalar(ScalarKind::Boolean) => {
                if value.is_boolean() {
                    value.clone()
                } else {
                    self.mismatch(name, "boolean", value, fallback)
                }
            }
        }
    }

    /// Records a localized type mismatch and returns the field fallback.
    fn mismatch(&self, name: &str, expected: &str, found: &Value, fallback: &Value) -> Value {
        self.record(
            DiagnosticEvent::warning(format!(
                "field type mismatch: expected {expected}, found {}",
                type_name(found)
            ))
            .with_context(json!({"field": name})),
        );
        fallback.clone()
    }

    #[inline]
    fn record(&self, event: DiagnosticEvent) {
        self.sink.record(event);
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
