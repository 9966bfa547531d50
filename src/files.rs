use std::fs;
use std::path::{Path, PathBuf};
use glob::glob;
use log::warn;
use crate::errors::WorkerError;
use crate::presenter::DisplayRecord;

/// Returns the newest provider document matching the given pattern.
///
/// Document file names are expected to start with a timestamp, e.g.
/// `20250601T1000_forecast.json`, so the lexicographically greatest match
/// is the newest one.
///
/// # Arguments
///
/// * 'pattern' - glob pattern for provider documents
pub fn latest_input(pattern: &str) -> Result<Option<PathBuf>, WorkerError> {
    let mut latest: Option<PathBuf> = None;

    for entry in glob(pattern)? {
        match entry {
            Ok(path) => {
                if latest.as_ref().is_none_or(|l| path.file_name() > l.file_name()) {
                    latest = Some(path);
                }
            }
            Err(e) => warn!("{:?}", e),
        }
    }

    Ok(latest)
}

/// Saves a display record to file. The record is written to a sibling
/// `.tmp` file first and then renamed over the output, so a reader never
/// sees a half written document.
///
/// # Arguments
///
/// * 'output' - the file to write
/// * 'record' - display record to save
pub fn save_record(output: &str, record: &DisplayRecord) -> Result<(), WorkerError> {
    let json = serde_json::to_string_pretty(record)?;
    let tmp = format!("{}.tmp", output);
    fs::write(&tmp, json)?;
    fs::rename(&tmp, output)?;

    Ok(())
}

/// Loads a previously saved display record, if there is one
///
/// # Arguments
///
/// * 'output' - the file the record was written to
pub fn load_record(output: &str) -> Result<Option<DisplayRecord>, WorkerError> {
    if Path::new(output).exists() {
        let json = fs::read_to_string(output)?;
        let record: DisplayRecord = serde_json::from_str(&json)?;
        Ok(Some(record))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use crate::presenter::NowSnapshot;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("weather-next-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn latest_input_picks_newest_name() {
        let dir = scratch_dir("latest");
        for name in ["20250601T0900_forecast.json", "20250601T1100_forecast.json", "20250601T1000_forecast.json", "notes.txt"] {
            fs::write(dir.join(name), "{}").unwrap();
        }

        let pattern = format!("{}/*_forecast.json", dir.display());
        let latest = latest_input(&pattern).unwrap().unwrap();
        assert_eq!(latest.file_name().unwrap(), "20250601T1100_forecast.json");

        let pattern = format!("{}/*.xml", dir.display());
        assert!(latest_input(&pattern).unwrap().is_none());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn bad_pattern_is_an_error() {
        assert!(matches!(latest_input("[unclosed"), Err(WorkerError::Pattern(_))));
    }

    #[test]
    fn record_survives_save_and_load() {
        let dir = scratch_dir("record");
        let output = dir.join("weatherData.json").display().to_string();
        assert!(load_record(&output).unwrap().is_none());

        let record = DisplayRecord {
            now: NowSnapshot { temp: 12, icon: "clear_day".to_string(), uvi: 3.5, urgent: false },
            next: None,
            text: "--".to_string(),
        };
        save_record(&output, &record).unwrap();
        assert_eq!(load_record(&output).unwrap(), Some(record));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn save_replaces_previous_record() {
        let dir = scratch_dir("replace");
        let output = dir.join("weatherData.json").display().to_string();
        fs::write(&output, "stale").unwrap();

        let record = DisplayRecord {
            now: NowSnapshot { temp: -3, icon: "snow_low".to_string(), uvi: 0.0, urgent: false },
            next: None,
            text: "--".to_string(),
        };
        save_record(&output, &record).unwrap();

        assert_eq!(load_record(&output).unwrap(), Some(record));
        assert!(!Path::new(&format!("{}.tmp", output)).exists());

        fs::remove_dir_all(&dir).unwrap();
    }
}
