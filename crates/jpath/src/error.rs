use std::fmt;
use thiserror::Error;

/// A JSON-path expression that could not be compiled.
///
/// Positions are byte offsets into the expression after surrounding
/// whitespace has been trimmed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("expression is empty")]
    Empty,

    #[error("expression must start with the root marker '$'")]
    MissingRoot,

    #[error("empty path segment at position {position}")]
    EmptySegment { position: usize },

    #[error("empty brackets at position {position}")]
    EmptyBracket { position: usize },

    #[error("unterminated bracket opened at position {position}")]
    UnterminatedBracket { position: usize },

    #[error("invalid bracket selector '{content}' at position {position}")]
    InvalidBracket { position: usize, content: String },

    #[error("index '{content}' at position {position} is out of range")]
    InvalidIndex { position: usize, content: String },

    #[error("unexpected character '{found}' at position {position}")]
    InvalidCharacter { position: usize, found: char },
}

/// The kind of a JSON value, used to describe type mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        })
    }
}

/// A compiled path that could not be applied to a document.
///
/// `path` is the canonical text of the steps consumed before the failing one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("cannot apply '{step}' at '{path}': expected {expected}, found {found}")]
    TypeMismatch {
        step: String,
        path: String,
        expected: &'static str,
        found: ValueKind,
    },

    #[error("key '{key}' not found at '{path}'")]
    NotFound { key: String, path: String },

    #[error("index {index} out of range at '{path}' (length {len})")]
    IndexOutOfRange {
        index: i64,
        len: usize,
        path: String,
    },
}
