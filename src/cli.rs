use crate::config::{Config, SourceConfig};
use crate::render::OutputFormat;
use clap::Parser;
use get_env_source::ApiVersion;
use std::path::PathBuf;

/// Get a value from an app's environment by a JSON path expression.
#[derive(Parser, Debug)]
#[command(name = "get-env", version, about, long_about = None)]
pub struct Args {
    /// Name of the application.
    pub app_name: String,

    /// JSON-path expression, e.g. '$.VCAP_APPLICATION.application_uris[0]'.
    pub json_path: String,

    /// The cf executable used to reach the platform.
    #[arg(long, env = "GET_ENV_CF_BIN", default_value = "cf")]
    pub cf_bin: PathBuf,

    /// Control-plane API version of the env endpoint (v2 or v3).
    #[arg(long = "api", env = "GET_ENV_API_VERSION", default_value = "v2")]
    pub api_version: ApiVersion,

    /// Read the environment from a JSON file instead of the platform.
    #[arg(long, env = "GET_ENV_FILE")]
    pub env_file: Option<PathBuf>,

    /// Print the selection as JSON, quoting strings.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn config(&self) -> Config {
        let source = match &self.env_file {
            Some(path) => SourceConfig::File(path.clone()),
            None => SourceConfig::Cf {
                program: self.cf_bin.clone(),
                api_version: self.api_version,
            },
        };
        let format = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Raw
        };
        Config { source, format }
    }

    /// The default `env_logger` filter for the requested verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "get_env=warn",
            1 => "get_env=info",
            2 => "get_env=debug",
            _ => "get_env=trace",
        }
    }
}
