use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use chrono::{DateTime, Local};
use glob::Pattern;
use log::{error, info, warn};
use crate::classify;
use crate::config::Config;
use crate::errors::WorkerError;
use crate::files::{latest_input, load_record, save_record};
use crate::presenter::DisplayRecord;

/// The last display record that was successfully produced and written, and
/// which provider document it came from.
#[derive(Default)]
pub struct LastGood {
    pub record: Option<DisplayRecord>,
    pub source: Option<PathBuf>,
    pub updated: Option<DateTime<Local>>,
}

impl LastGood {
    /// Returns true if the record differs from the last good one
    ///
    /// # Arguments
    ///
    /// * 'record' - a freshly produced record
    pub fn is_changed(&self, record: &DisplayRecord) -> bool {
        self.record.as_ref() != Some(record)
    }

    /// Stores a record as the last good one
    ///
    /// # Arguments
    ///
    /// * 'record' - the record that was written
    /// * 'source' - the provider document it was produced from
    /// * 'date_time' - when it was produced
    pub fn update(&mut self, record: DisplayRecord, source: PathBuf, date_time: DateTime<Local>) {
        self.record = Some(record);
        self.source = Some(source);
        self.updated = Some(date_time);
    }

    /// Returns where the last good record came from, for log messages
    pub fn describe(&self) -> String {
        match (&self.source, &self.updated) {
            (Some(source), Some(updated)) => format!("record from {} produced {}",
                                                     source.display(), updated.format("%Y-%m-%d %H:%M:%S")),
            _ if self.record.is_some() => "record from previous run".to_string(),
            _ => "no record yet".to_string(),
        }
    }
}

/// Outcome of one update attempt
#[derive(Debug, PartialEq, Eq)]
pub enum Update {
    Written,
    Unchanged,
    NoInput,
    Skipped,
}

/// Main loop, runs an update every configured interval (or just once).
/// Only an input pattern that can't be compiled stops it; errors within a
/// pass are logged and the loop carries on.
///
/// # Arguments
///
/// * 'config' - the configuration
pub fn run(config: &Config) -> Result<(), WorkerError> {
    Pattern::new(&config.files.input_pattern)?;

    let mut last_good = LastGood {
        record: load_record(&config.files.output).unwrap_or_else(|e| {
            warn!("ignoring previous output: {}", e);
            None
        }),
        ..Default::default()
    };

    loop {
        match poll(config, &mut last_good, Local::now()) {
            Update::Written => info!("display record written to {}", config.files.output),
            Update::Unchanged => info!("display record unchanged"),
            Update::NoInput => warn!("no provider document matches {}", config.files.input_pattern),
            Update::Skipped => warn!("display update skipped, keeping {}", last_good.describe()),
        }

        if config.worker.run_once {
            return Ok(());
        }
        thread::sleep(Duration::from_secs(config.worker.interval_secs));
    }
}

/// Runs one update and absorbs any file error, so a document that vanishes or
/// can't be read or written only costs this pass
///
/// # Arguments
///
/// * 'config' - the configuration
/// * 'last_good' - cache of the last written record
/// * 'date_time' - the current time
pub fn poll(config: &Config, last_good: &mut LastGood, date_time: DateTime<Local>) -> Update {
    match update(config, last_good, date_time) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("{}", e);
            Update::Skipped
        }
    }
}

/// Picks up the newest provider document, classifies it and writes the result.
///
/// A document that can't be classified is logged and skipped so the display
/// keeps showing the last good record. Only file discovery and output errors
/// are returned. An unchanged record is written again if the output file has
/// gone missing.
///
/// # Arguments
///
/// * 'config' - the configuration
/// * 'last_good' - cache of the last written record
/// * 'date_time' - the current time
pub fn update(config: &Config, last_good: &mut LastGood, date_time: DateTime<Local>) -> Result<Update, WorkerError> {
    let Some(source) = latest_input(&config.files.input_pattern)? else {
        return Ok(Update::NoInput);
    };

    let json = fs::read_to_string(&source)?;
    let record = match classify(&json, &Local) {
        Ok(record) => record,
        Err(e) => {
            error!("{}: {}", source.display(), e);
            return Ok(Update::Skipped);
        }
    };

    if !last_good.is_changed(&record) && Path::new(&config.files.output).exists() {
        return Ok(Update::Unchanged);
    }

    save_record(&config.files.output, &record)?;
    last_good.update(record, source, date_time);

    Ok(Update::Written)
}
