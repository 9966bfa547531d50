use std::fs;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;

#[derive(Deserialize)]
pub struct Files {
    /// Glob pattern matching provider documents, the newest match is used
    pub input_pattern: String,
    pub output: String,
}

#[derive(Deserialize)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

#[derive(Deserialize)]
pub struct Worker {
    #[serde(default = "default_interval")]
    pub interval_secs: u64,
    #[serde(default)]
    pub run_once: bool,
}

impl Default for Worker {
    fn default() -> Self {
        Worker { interval_secs: default_interval(), run_once: false }
    }
}

#[derive(Deserialize)]
pub struct Config {
    pub files: Files,
    pub general: General,
    #[serde(default)]
    pub worker: Worker,
}

fn default_interval() -> u64 {
    300
}

/// Loads the configuration file and returns a struct with all configuration items
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(config_path)?;
    parse_config(&toml)
}

/// Parses and validates a configuration document
///
/// # Arguments
///
/// * 'toml' - the configuration as a TOML string
pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(toml)?;

    if config.worker.interval_secs == 0 {
        return Err(ConfigError::from("worker interval must be at least one second"));
    }
    if config.files.input_pattern.is_empty() || config.files.output.is_empty() {
        return Err(ConfigError::from("input pattern and output file must be given"));
    }

    Ok(config)
}
