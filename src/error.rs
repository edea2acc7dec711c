// src/error.rs
use get_env_jpath::{CompileError, EvalError};
use get_env_source::SourceError;
use thiserror::Error;

/// A comprehensive error type for a single get-env invocation.
#[derive(Error, Debug)]
pub enum GetEnvError {
    #[error("Failed to parse argument '{expression}' as valid JSON-path: {source}")]
    InvalidPath {
        expression: String,
        #[source]
        source: CompileError,
    },

    #[error("Failed to apply JSON path: {0}")]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Failed to render selected value: {0}")]
    Render(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
