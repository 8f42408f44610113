//! # salvage
//!
//! A schema-guided sanitizer that turns noisy generated text into typed,
//! shape-conformant JSON with graceful degradation.
//!
//! Generative text services routinely return structured data wrapped in
//! prose, fenced in markdown, truncated mid-object, or with the wrong
//! types in individual fields. This library copes with all of that:
//! - Strips invisible noise (BOM, control characters)
//! - Locates the most likely JSON candidate using ordered strategies
//! - Repairs truncated structures heuristically
//! - Validates and coerces the result against a declarative schema,
//!   substituting caller-supplied defaults wherever validation fails
//!
//! The engine never errors outward: malformed input always produces a
//! value shaped like the fallback, and the only way to observe a failure
//! is through an optional diagnostic sink.
//!
//! ## Quick Start
//!
//! ```rust
//! use salvage::{sanitize, Schema};
//! use serde_json::json;
//!
//! let schema = vec![
//!     ("name".to_string(), Schema::string()),
//!     ("tags".to_string(), Schema::untyped_array()),
//! ];
//! let fallback = json!({"name": "", "tags": []});
//!
//! let raw = "Here you go: ```json\n{\"name\": \"A\", \"tags\": [\"x\",\"y\"]}\n``` Hope that helps!";
//! let result = sanitize(raw, &schema, &fallback);
//!
//! assert_eq!(result, json!({"name": "A", "tags": ["x", "y"]}));
//! ```
//!
//! ## Degradation, not errors
//!
//! ```rust
//! use salvage::{sanitize, Schema};
//! use serde_json::json;
//!
//! let schema = vec![("age".to_string(), Schema::number())];
//! let fallback = json!({"age": 0});
//!
//! // The field has the wrong type; its fallback is used, nothing throws.
//! let result = sanitize(r#"{"age": "abc"}"#, &schema, &fallback);
//! assert_eq!(result, json!({"age": 0}));
//! ```
//!
//! ## Observability
//!
//! Inject a [`DiagnosticSink`] to see which fields fell back:
//!
//! ```rust
//! use std::sync::Arc;
//! use salvage::{MemorySink, Sanitizer, Schema, Severity};
//! use serde_json::json;
//!
//! let sink = Arc::new(MemorySink::new());
//! let sanitizer = Sanitizer::with_sink(sink.clone());
//!
//! let schema = vec![("age".to_string(), Schema::number())];
//! sanitizer.sanitize_text(r#"{"age": "abc"}"#, &schema, &json!({"age": 0}));
//!
//! assert_eq!(sink.count(Severity::Warning), 1);
//! ```

pub mod diagnostics;
pub mod error;
pub mod locator;
pub mod repair;
pub mod sanitizer;
pub mod schema;

pub use diagnostics::{
    DiagnosticEvent, DiagnosticSink, MemorySink, NullSink, Severity, TracingSink,
};
pub use sanitizer::Sanitizer;
pub use schema::{schema_map, ScalarKind, Schema, SchemaMap};

use serde_json::Value;

/// Sanitizes raw generated text against a schema and fallback.
///
/// This is the main entry point. It runs the full pipeline — noise
/// stripping, candidate location, parsing with truncation repair, and
/// recursive schema validation — and always returns a value shaped like
/// the fallback.
///
/// # Examples
///
/// ```
/// use salvage::{sanitize, Schema};
/// use serde_json::json;
///
/// let schema = vec![("name".to_string(), Schema::string())];
/// let fallback = json!({"name": "unknown"});
///
/// let result = sanitize("total garbage", &schema, &fallback);
/// assert_eq!(result, fallback);
/// ```
pub fn sanitize(raw: &str, schema: &SchemaMap, fallback: &Value) -> Value {
    Sanitizer::new().sanitize_text(raw, schema, fallback)
}

/// Sanitizes an already-structured value, bypassing text parsing.
///
/// # Examples
///
/// ```
/// use salvage::{sanitize_value, Schema};
/// use serde_json::json;
///
/// let schema = vec![("age".to_string(), Schema::string())];
/// let result = sanitize_value(json!({"age": 30}), &schema, &json!({"age": ""}));
///
/// // The number is coerced to its printed form for a string field.
/// assert_eq!(result, json!({"age": "30"}));
/// ```
pub fn sanitize_value(value: Value, schema: &SchemaMap, fallback: &Value) -> Value {
    Sanitizer::new().sanitize_value(value, schema, fallback)
}

/// Sanitizes raw generated text into a bare list.
///
/// # Examples
///
/// ```
/// use salvage::sanitize_array;
/// use serde_json::json;
///
/// let items = sanitize_array(r#"{"items": [1, 2, 3]}"#, &[]);
/// assert_eq!(items, vec![json!(1), json!(2), json!(3)]);
/// ```
pub fn sanitize_array(raw: &str, fallback: &[Value]) -> Vec<Value> {
    Sanitizer::new().sanitize_array_text(raw, fallback)
}
