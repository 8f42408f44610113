//! Declarative descriptions of the shape a caller expects back.
//!
//! A [`Schema`] is a small recursive tree: scalar kinds, an untyped array,
//! or a nested field map. Callers pair a schema with a fallback
//! `serde_json::Value` of the same shape; wherever validation fails, the
//! fallback value for that position is substituted.
//!
//! The schema is an explicit, exhaustively-matchable enum rather than a
//! set of sentinel values, so `match` covers every case at compile time.
//!
//! # Examples
//!
//! ```
//! use salvage::schema::Schema;
//!
//! let schema = Schema::nested([
//!     ("name", Schema::string()),
//!     ("age", Schema::number()),
//!     ("tags", Schema::untyped_array()),
//! ]);
//! assert!(matches!(schema, Schema::Nested(_)));
//! ```

/// Scalar kinds a field can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// A JSON string. Numbers and booleans are coerced to their printed form.
    String,
    /// A JSON number. No string-to-number coercion is attempted.
    Number,
    /// A JSON boolean.
    Boolean,
}

/// An ordered field-name → schema mapping.
///
/// Declaration order is iteration order; fields are validated in the order
/// they appear here.
pub type SchemaMap = Vec<(String, Schema)>;

/// The expected shape of one value, possibly nested.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// A scalar leaf.
    Scalar(ScalarKind),
    /// A JSON array with no constraint on element types.
    UntypedArray,
    /// A nested object described by its own field map.
    Nested(SchemaMap),
}

impl Schema {
    /// Declares a string field.
    #[inline]
    pub const fn string() -> Self {
        Self::Scalar(ScalarKind::String)
    }

    /// Declares a numeric field.
    #[inline]
    pub const fn number() -> Self {
        Self::Scalar(ScalarKind::Number)
    }

    /// Declares a boolean field.
    #[inline]
    pub const fn boolean() -> Self {
        Self::Scalar(ScalarKind::Boolean)
    }

    /// Declares an array field with untyped elements.
    #[inline]
    pub const fn untyped_array() -> Self {
        Self::UntypedArray
    }

    /// Declares a nested object from `(name, schema)` pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use salvage::schema::Schema;
    ///
    /// let address = Schema::nested([("city", Schema::string())]);
    /// let person = Schema::nested([
    ///     ("name", Schema::string()),
    ///     ("address", address),
    /// ]);
    /// # let _ = person;
    /// ```
    pub fn nested<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Schema)>,
    {
        Self::Nested(
            fields
                .into_iter()
                .map(|(name, schema)| (name.into(), schema))
                .collect(),
        )
    }

    /// Returns the field map if this schema is a nested object.
    #[inline]
    pub fn as_nested(&self) -> Option<&SchemaMap> {
        match self {
            Self::Nested(fields) => Some(fields),
            _ => None,
        }
    }
}

/// Builds a [`SchemaMap`] from `(name, schema)` pairs.
pub fn schema_map<K, I>(fields: I) -> SchemaMap
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Schema)>,
{
    fields
        .into_iter()
        .map(|(name, schema)| (name.into(), schema))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_constructors() {
        assert_eq!(Schema::string(), Schema::Scalar(ScalarKind::String));
        assert_eq!(Schema::number(), Schema::Scalar(ScalarKind::Number));
        assert_eq!(Schema::boolean(), Schema::Scalar(ScalarKind::Boolean));
        assert_eq!(Schema::untyped_array(), Schema::UntypedArray);
    }

    #[test]
    fn test_nested_preserves_declaration_order() {
        let schema = Schema::nested([
            ("z", Schema::string()),
            ("a", Schema::number()),
            ("m", Schema::boolean()),
        ]);

        let fields = schema.as_nested().unwrap();
        let names: Vec<&str> = fields.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_schema_map_builder() {
        let map = schema_map([("one", Schema::string()), ("two", Schema::untyped_array())]);
        assert_eq!(map.len(), 2);
        assert_eq!(map[0].0, "one");
    }

    #[test]
    fn test_as_nested_on_scalar() {
        assert!(Schema::string().as_nested().is_none());
    }
}
