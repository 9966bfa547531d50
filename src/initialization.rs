use std::env;
use std::path::Path;
use log::info;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use crate::config::{load_config, Config, General};
use crate::errors::{ConfigError, InitError};

/// Environment variable consulted when no config path is given on the command line
const CONFIG_ENV: &str = "WEATHER_NEXT_CONFIG";

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l:<5} {m}{n}";

/// Loads configuration and sets up logging
///
/// # Arguments
///
/// * 'config_path' - path given on the command line, if any
pub fn init(config_path: Option<String>) -> Result<Config, InitError> {
    let config_path = config_path
        .or_else(|| env::var(CONFIG_ENV).ok())
        .ok_or(ConfigError::Value(format!("no config file given and {} is not set", CONFIG_ENV)))?;

    let config = load_config(&config_path)?;
    setup_logger(&config.general)?;

    info!("weather-next version: {}", env!("CARGO_PKG_VERSION"));
    info!("config loaded from {}", config_path);

    Ok(config)
}

/// Sets up log4rs with a file appender and, if configured, a console appender
///
/// # Arguments
///
/// * 'general' - general configuration holding log path and level
fn setup_logger(general: &General) -> Result<(), InitError> {
    let log_file = Path::new(&general.log_path).join("weather-next.log");

    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(log_file)?;

    let mut builder = log4rs::Config::builder()
        .appender(Appender::builder().build("file", Box::new(file)));
    let mut root = Root::builder().appender("file");

    if general.log_to_stdout {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();
        builder = builder.appender(Appender::builder().build("stdout", Box::new(stdout)));
        root = root.appender("stdout");
    }

    let config = builder.build(root.build(general.log_level))?;
    log4rs::init_config(config)?;

    Ok(())
}
