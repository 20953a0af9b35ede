use thiserror::Error;

/// Shape failures found while validating an API response body.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("expected a JSON array of {what}, got {found}")]
    NotAnArray { what: &'static str, found: &'static str },

    #[error("malformed repository record: {0}")]
    Repository(#[source] serde_json::Error),

    #[error("push event #{index} is missing `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("push event #{index} has an invalid timestamp {value:?}")]
    Timestamp {
        index: usize,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Name of a JSON value's kind, for error messages.
pub fn kind_of(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
