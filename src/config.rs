//! Configuration management for the Autoblo plan runner
//!
//! Layers built-in defaults, an optional `autoblo.toml`, and `AUTOBLO_*`
//! environment variables. Command-line flags override the result.

use std::path::Path;
use std::str::FromStr;

use clap::ValueEnum;
use config::{Config, ConfigError, Environment, File};
use log::LevelFilter;
use serde::Deserialize;

/// Default configuration file name, looked up in the working directory
const DEFAULT_CONFIG_NAME: &str = "autoblo";

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ConfigError::Message(format!(
                "output_format must be `text` or `json`, got `{}`",
                other
            ))),
        }
    }
}

/// Runner configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Keep running after a failed step
    /// Environment: AUTOBLO_CONTINUE_ON_FAIL
    pub continue_on_fail: bool,

    /// `text` or `json`
    /// Environment: AUTOBLO_OUTPUT_FORMAT
    pub output_format: String,

    /// Default log level; `RUST_LOG` still wins
    /// Environment: AUTOBLO_LOG_LEVEL
    pub log_level: String,
}

impl AppConfig {
    /// Load configuration, reading `path` if given or `autoblo.toml` if present
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let settings = Self::defaults()?
            .add_source(file)
            .add_source(Environment::with_prefix("AUTOBLO"))
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("continue_on_fail", false)?
            .set_default("output_format", "text")?
            .set_default("log_level", "info")
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.output_format()?;
        self.log_level()?;
        Ok(())
    }

    pub fn output_format(&self) -> Result<OutputFormat, ConfigError> {
        self.output_format.parse()
    }

    pub fn log_level(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level).map_err(|_| {
            ConfigError::Message(format!("unknown log_level `{}`", self.log_level))
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            continue_on_fail: false,
            output_format: "text".to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.output_format().unwrap(), OutputFormat::Text);
        assert_eq!(config.log_level().unwrap(), LevelFilter::Info);
    }

    #[test]
    fn rejects_unknown_values() {
        let config = AppConfig {
            output_format: "yaml".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AppConfig {
            log_level: "loud".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn loads_explicit_toml_file() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "continue_on_fail = true\noutput_format = \"json\"").unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert!(config.continue_on_fail);
        assert_eq!(config.output_format().unwrap(), OutputFormat::Json);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        assert!(AppConfig::load(Some(Path::new("/definitely/not/here.toml"))).is_err());
    }
}
