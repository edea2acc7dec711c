//! Fetches environments through the `cf` command-line client.
//!
//! Authentication, target selection and HTTP transport all stay with `cf`;
//! this source only resolves the app GUID and issues `cf curl` against the
//! env endpoint.
use crate::{EnvironmentSource, SourceError, parse_document};
use serde_json::Value;
use std::path::PathBuf;
use std::process::Command;

/// Which control-plane API version to query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApiVersion {
    #[default]
    V2,
    V3,
}

impl ApiVersion {
    pub fn env_endpoint(self, guid: &str) -> String {
        match self {
            ApiVersion::V2 => format!("/v2/apps/{guid}/env"),
            ApiVersion::V3 => format!("/v3/apps/{guid}/env"),
        }
    }
}

impl std::str::FromStr for ApiVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "v2" | "2" => Ok(ApiVersion::V2),
            "v3" | "3" => Ok(ApiVersion::V3),
            other => Err(format!("unsupported API version '{other}', expected v2 or v3")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CfCliSource {
    program: PathBuf,
    api_version: ApiVersion,
}

impl Default for CfCliSource {
    fn default() -> Self {
        Self {
            program: PathBuf::from("cf"),
            api_version: ApiVersion::default(),
        }
    }
}

impl CfCliSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different `cf` executable.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_api_version(mut self, api_version: ApiVersion) -> Self {
        self.api_version = api_version;
        self
    }

    /// Resolve an app name to its GUID in the currently targeted space.
    pub fn app_guid(&self, app_name: &str) -> Result<String, SourceError> {
        let output = match self.run(app_name, &["app", app_name, "--guid"]) {
            Err(SourceError::Command { detail, .. }) if names_missing_app(&detail, app_name) => {
                return Err(SourceError::AppNotFound {
                    app: app_name.to_string(),
                });
            }
            other => other?,
        };
        let guid = output.trim();
        if guid.is_empty() {
            return Err(SourceError::AppNotFound {
                app: app_name.to_string(),
            });
        }
        Ok(guid.to_string())
    }

    fn run(&self, app_name: &str, args: &[&str]) -> Result<String, SourceError> {
        let program = self.program.display().to_string();
        log::debug!("Running {} {}", program, args.join(" "));

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|source| SourceError::Spawn {
                app: app_name.to_string(),
                program: program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if output.status.success() {
            return Ok(stdout);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = [stdout.trim(), stderr.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Err(SourceError::Command {
            app: app_name.to_string(),
            command: format!("{} {}", program, args.join(" ")),
            detail: match output.status.code() {
                Some(code) if detail.is_empty() => format!("exit status {code}"),
                _ => detail,
            },
        })
    }
}

impl EnvironmentSource for CfCliSource {
    fn fetch(&self, app_name: &str) -> Result<Value, SourceError> {
        let guid = self.app_guid(app_name)?;
        let endpoint = self.api_version.env_endpoint(&guid);
        log::info!("Fetching environment for '{}' from {}", app_name, endpoint);

        let body = self.run(app_name, &["curl", &endpoint])?;
        let env = parse_document(app_name, &body)?;
        if let Some(message) = api_error(&env) {
            return Err(SourceError::Api {
                app: app_name.to_string(),
                message,
            });
        }
        Ok(env)
    }
}

/// `cf app` reports an unknown app as `App '<name>' not found.`
fn names_missing_app(detail: &str, app_name: &str) -> bool {
    detail
        .to_ascii_lowercase()
        .contains(&format!("app '{}' not found", app_name.to_ascii_lowercase()))
}

/// `cf curl` exits successfully even when the API answers with an error body.
fn api_error(body: &Value) -> Option<String> {
    let object = body.as_object()?;

    if let Some(code) = object.get("error_code").and_then(Value::as_str) {
        let description = object
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("no description");
        return Some(format!("{description} ({code})"));
    }

    let first = object.get("errors")?.as_array()?.first()?;
    let detail = first
        .get("detail")
        .and_then(Value::as_str)
        .unwrap_or("no detail");
    Some(match first.get("title").and_then(Value::as_str) {
        Some(title) => format!("{detail} ({title})"),
        None => detail.to_string(),
    })
}
