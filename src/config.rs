use crate::render::OutputFormat;
use get_env_source::{ApiVersion, CfCliSource, EnvironmentSource, FileSource};
use std::path::PathBuf;

/// Everything `run` needs to know besides the app name and expression.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub source: SourceConfig,
    pub format: OutputFormat,
}

/// Where the environment document comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceConfig {
    /// Ask the platform through the `cf` executable.
    Cf {
        program: PathBuf,
        api_version: ApiVersion,
    },
    /// Read a saved document from disk.
    File(PathBuf),
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Cf {
            program: PathBuf::from("cf"),
            api_version: ApiVersion::default(),
        }
    }
}

impl SourceConfig {
    pub fn build(&self) -> Box<dyn EnvironmentSource> {
        match self {
            SourceConfig::Cf {
                program,
                api_version,
            } => Box::new(
                CfCliSource::new()
                    .with_program(program.clone())
                    .with_api_version(*api_version),
            ),
            SourceConfig::File(path) => Box::new(FileSource::new(path.clone())),
        }
    }
}
