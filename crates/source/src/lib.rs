//! Environment source abstractions.
//!
//! This crate provides the `EnvironmentSource` trait and the implementations
//! that fetch an application's environment document.
//!
//! ## Available Sources
//!
//! - `CfCliSource`: Asks the platform through the `cf` executable
//! - `FileSource`: Reads a document saved on disk
//! - `StaticSource`: In-memory documents keyed by app name
//!
//! ## Example
//!
//! ```ignore
//! use get_env_source::{EnvironmentSource, StaticSource};
//! use serde_json::json;
//!
//! let source = StaticSource::new().with_app("my-app", json!({"VCAP_APPLICATION": {}}));
//! let env = source.fetch("my-app")?;
//! ```

mod cf;

pub use cf::{ApiVersion, CfCliSource};

use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for environment retrieval.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to retrieve environment for '{app}'. App not found")]
    AppNotFound { app: String },

    #[error("Failed to retrieve environment for '{app}'. Could not run '{program}': {source}")]
    Spawn {
        app: String,
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to retrieve environment for '{app}'. '{command}' failed: {detail}")]
    Command {
        app: String,
        command: String,
        detail: String,
    },

    #[error("Failed to retrieve environment for '{app}'. {message}")]
    Api { app: String, message: String },

    #[error("Failed to read environment file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to retrieve environment for '{app}'. Response is not valid JSON: {source}")]
    InvalidJson {
        app: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A trait for anything that can produce an application's environment document.
///
/// Implementations are free to do I/O; the document they return is treated
/// as immutable input by the path evaluator.
pub trait EnvironmentSource: Send + Sync {
    /// Fetch the environment of `app_name` as a parsed JSON document.
    fn fetch(&self, app_name: &str) -> Result<Value, SourceError>;
}

impl EnvironmentSource for Box<dyn EnvironmentSource> {
    fn fetch(&self, app_name: &str) -> Result<Value, SourceError> {
        (**self).fetch(app_name)
    }
}

pub(crate) fn parse_document(app_name: &str, text: &str) -> Result<Value, SourceError> {
    serde_json::from_str(text).map_err(|source| SourceError::InvalidJson {
        app: app_name.to_string(),
        source,
    })
}

/// Reads the environment document from a JSON file.
///
/// The same document is returned for every app name, which makes this
/// source useful for offline inspection of a saved `cf curl` response.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EnvironmentSource for FileSource {
    fn fetch(&self, app_name: &str) -> Result<Value, SourceError> {
        log::debug!(
            "Reading environment for '{}' from {}",
            app_name,
            self.path.display()
        );
        let text = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_document(app_name, &text)
    }
}

/// A source backed by in-memory documents.
///
/// This is the simplest source, useful for testing and embedding.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    apps: HashMap<String, Value>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the environment document for an app.
    pub fn with_app(mut self, app_name: impl Into<String>, env: Value) -> Self {
        self.apps.insert(app_name.into(), env);
        self
    }
}

impl EnvironmentSource for StaticSource {
    fn fetch(&self, app_name: &str) -> Result<Value, SourceError> {
        self.apps
            .get(app_name)
            .cloned()
            .ok_or_else(|| SourceError::AppNotFound {
                app: app_name.to_string(),
            })
    }
}
