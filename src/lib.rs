use chrono::TimeZone;
use log::{debug, info};
use crate::errors::ForecastError;
use crate::presenter::DisplayRecord;

pub mod config;
pub mod errors;
pub mod files;
pub mod icons;
pub mod initialization;
pub mod models;
pub mod normalizer;
pub mod presenter;
pub mod sample;
pub mod selector;
pub mod worker;

/// Runs a provider document through normalization, event selection and
/// presentation, returning the record to display.
///
/// # Arguments
///
/// * 'json' - the raw provider document
/// * 'tz' - display timezone
pub fn classify<Tz: TimeZone>(json: &str, tz: &Tz) -> Result<DisplayRecord, ForecastError> {
    let normalized = normalizer::normalize_document(json, tz)?;
    debug!("current: {}", normalized.current);

    let event = selector::select_event(&normalized.current, &normalized.forecast);
    let record = presenter::display_record(&normalized.current, &normalized.forecast, &event);
    info!("{} forecast steps, next event: {} ({})", normalized.forecast.len(), event.reason, record.text);

    Ok(record)
}
