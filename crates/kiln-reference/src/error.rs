//! Error types for reference handling
//!
//! Absent segments (no component marker, no instance, no version) are not
//! errors; they are reported as `None` by the resolver.

/// Errors raised at untyped or configuration boundaries
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceError {
    /// A non-string value was supplied where a reference was expected
    #[error("reference must be a string, not {actual}")]
    InvalidArgument {
        /// Type name of the value actually received
        actual: &'static str,
    },

    /// Resolver configuration could not be loaded
    #[error("invalid resolver configuration: {0}")]
    Config(String),
}

impl ReferenceError {
    /// Invalid-argument error for a JSON value of the wrong type
    #[must_use]
    pub fn invalid_argument(value: &serde_json::Value) -> Self {
        Self::InvalidArgument {
            actual: json_type_name(value),
        }
    }
}

/// JSON type name used in diagnostics
#[must_use]
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
