use thiserror::Error;

/// Errors that abort a classification run. The caller must skip the display
/// update entirely when one of these is returned.
#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("ForecastError::MalformedInput: {0}")]
    MalformedInput(String),
}
impl From<serde_json::Error> for ForecastError {
    fn from(e: serde_json::Error) -> Self {
        ForecastError::MalformedInput(format!("json document error: {}", e))
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("ConfigError::File: {0}")]
    File(#[from] std::io::Error),
    #[error("ConfigError::Document: {0}")]
    Document(#[from] toml::de::Error),
    #[error("ConfigError::Value: {0}")]
    Value(String),
}
impl From<&str> for ConfigError {
    fn from(e: &str) -> Self { ConfigError::Value(e.to_string()) }
}

#[derive(Error, Debug)]
pub enum InitError {
    #[error("InitError::Config: {0}")]
    Config(#[from] ConfigError),
    #[error("InitError::Logging: {0}")]
    Logging(String),
}
impl From<std::io::Error> for InitError {
    fn from(e: std::io::Error) -> Self { InitError::Logging(e.to_string()) }
}
impl From<log4rs::config::runtime::ConfigErrors> for InitError {
    fn from(e: log4rs::config::runtime::ConfigErrors) -> Self { InitError::Logging(e.to_string()) }
}
impl From<log::SetLoggerError> for InitError {
    fn from(e: log::SetLoggerError) -> Self { InitError::Logging(e.to_string()) }
}

#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("WorkerError::Pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("WorkerError::File: {0}")]
    File(#[from] std::io::Error),
    #[error("WorkerError::Document: {0}")]
    Document(#[from] serde_json::Error),
}
