//! # get-env
//!
//! Prints a value from a platform application's environment, selected by a
//! JSON-path expression.
//!
//! The expression is compiled before the environment is fetched, so a
//! malformed expression never triggers a call to the platform.
//!
//! ```ignore
//! use get_env::{Config, run};
//! use get_env::source::StaticSource;
//! use serde_json::json;
//!
//! let source = StaticSource::new().with_app("my-app", json!({"a": {"b": 5}}));
//! let mut out = Vec::new();
//! run(&Config::default(), "my-app", "$.a.b", &source, &mut out)?;
//! assert_eq!(out, b"5\n");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod render;

pub use config::{Config, SourceConfig};
pub use error::GetEnvError;
pub use get_env_jpath as jpath;
pub use get_env_source as source;
pub use render::{OutputFormat, render};

use get_env_jpath::parse_path;
use get_env_source::EnvironmentSource;
use serde_json::Value;
use std::io::Write;

/// Compiles `expression`, fetches the environment of `app_name` and applies the path to it.
pub fn select_value(
    app_name: &str,
    expression: &str,
    source: &dyn EnvironmentSource,
) -> Result<Value, GetEnvError> {
    let path = parse_path(expression).map_err(|err| GetEnvError::InvalidPath {
        expression: expression.to_string(),
        source: err,
    })?;
    log::debug!("Compiled '{}' into {} step(s): {}", expression, path.steps().len(), path);

    let env = source.fetch(app_name)?;
    let selected = path.apply(&env)?;
    log::debug!("Selected a {} value", get_env_jpath::ValueKind::of(&selected));
    Ok(selected)
}

/// Runs one invocation and writes the rendered selection, followed by a newline, to `out`.
///
/// `source` is passed separately from `config.source` so callers can supply
/// their own implementation; [`SourceConfig::build`] makes one from the config.
pub fn run<W: Write>(
    config: &Config,
    app_name: &str,
    expression: &str,
    source: &dyn EnvironmentSource,
    out: &mut W,
) -> Result<(), GetEnvError> {
    let selected = select_value(app_name, expression, source)?;
    let text = render(&selected, config.format)?;
    writeln!(out, "{}", text)?;
    out.flush()?;
    Ok(())
}
