pub mod fixtures;

use get_env::source::{EnvironmentSource, SourceError};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wraps a document and counts how often it was fetched.
pub struct CountingSource {
    env: Value,
    fetches: AtomicUsize,
}

impl CountingSource {
    pub fn new(env: Value) -> Self {
        Self {
            env,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl EnvironmentSource for CountingSource {
    fn fetch(&self, _app_name: &str) -> Result<Value, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.env.clone())
    }
}

/// Runs one invocation and returns what it printed.
pub fn run_to_string(
    app: &str,
    expression: &str,
    source: &dyn EnvironmentSource,
    format: get_env::OutputFormat,
) -> Result<String, get_env::GetEnvError> {
    let config = get_env::Config {
        format,
        ..Default::default()
    };
    let mut out = Vec::new();
    get_env::run(&config, app, expression, source, &mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}
