use chrono::{NaiveDateTime, TimeZone, Timelike};
use log::{debug, warn};
use serde_json::Value;
use crate::errors::ForecastError;
use crate::models::met_forecast::{FullForecast, NextHours, TimeStep};
use crate::sample::{clamp_percent, round_value, Sample, Symbol};

/// Current reading and the forecast steps following it, in time order
pub struct Normalized {
    pub current: Sample,
    pub forecast: Vec<Sample>,
}

/// Parses a provider document and normalizes it
///
/// # Arguments
///
/// * 'json' - the raw locationforecast document
/// * 'tz' - the display timezone all sample times are converted into
pub fn normalize_document<Tz: TimeZone>(json: &str, tz: &Tz) -> Result<Normalized, ForecastError> {
    let document: FullForecast = serde_json::from_str(json)?;
    let properties = document.properties
        .ok_or(ForecastError::MalformedInput("document has no properties".to_string()))?;

    normalize(&properties.timeseries, tz)
}

/// Converts a raw time series into one current sample and an ordered forecast.
///
/// The first entry is the current reading and must parse, otherwise the whole
/// run is rejected. Forecast entries lacking a time or an air temperature are
/// skipped, as are entries that don't come strictly after the previous one.
/// A missing or broken next hour block is not an error, it just gives a dry
/// daytime sample.
///
/// # Arguments
///
/// * 'timeseries' - raw time series entries, current reading first
/// * 'tz' - the display timezone all sample times are converted into
pub fn normalize<Tz: TimeZone>(timeseries: &[Value], tz: &Tz) -> Result<Normalized, ForecastError> {
    let (first, rest) = timeseries.split_first()
        .ok_or(ForecastError::MalformedInput("time series is empty".to_string()))?;

    let current_step: TimeStep = serde_json::from_value(first.clone())
        .map_err(|e| ForecastError::MalformedInput(format!("current sample: {}", e)))?;
    let current = to_sample(current_step, tz);

    let mut forecast: Vec<Sample> = Vec::with_capacity(rest.len());
    for (i, entry) in rest.iter().enumerate() {
        let step: TimeStep = match serde_json::from_value(entry.clone()) {
            Ok(step) => step,
            Err(e) => {
                warn!("skipping forecast entry {}: {}", i, e);
                continue;
            }
        };

        let sample = to_sample(step, tz);
        if forecast.last().is_some_and(|last| last.time >= sample.time) {
            warn!("skipping forecast entry {}: {} is out of order", i, sample.time);
            continue;
        }
        forecast.push(sample);
    }

    Ok(Normalized { current, forecast })
}

/// Builds a sample from a parsed time step
///
/// # Arguments
///
/// * 'step' - the time step
/// * 'tz' - display timezone
fn to_sample<Tz: TimeZone>(step: TimeStep, tz: &Tz) -> Sample {
    let time: NaiveDateTime = step.time.with_timezone(tz).naive_local();
    let details = step.data.instant.details;
    let mut sample = Sample::dry(time, details.air_temperature, details.cloud_area_fraction.unwrap_or(0.0));

    let next = match step.data.next_1_hours {
        Some(Value::Null) | None => {
            debug!("no next hour block for {}, using defaults", time);
            return sample;
        }
        Some(value) => value,
    };

    match serde_json::from_value::<NextHours>(next) {
        Ok(next) => {
            let symbol = Symbol::decode(&next.summary.symbol_code);
            sample.precip = round_value(next.details.precipitation_amount.unwrap_or(0.0));
            sample.precip_prob = clamp_percent(round_value(next.details.probability_of_precipitation.unwrap_or(0.0)));
            sample.uvi = round_value(next.details.ultraviolet_index_clear_sky_max.unwrap_or(0.0));
            sample.precip_kind = symbol.precip_kind;
            sample.is_day = symbol.is_day(time.hour());
        }
        Err(e) => debug!("unreadable next hour block for {}, using defaults: {}", time, e),
    }

    sample
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use serde_json::json;
    use crate::sample::PrecipKind;

    fn step(time: &str, temp: f64, next: Option<Value>) -> Value {
        let mut data = json!({ "instant": { "details": { "air_temperature": temp, "cloud_area_fraction": 42.123 } } });
        if let Some(n) = next {
            data["next_1_hours"] = n;
        }
        json!({ "time": time, "data": data })
    }

    fn next(symbol: &str, amount: f64, prob: f64, uvi: f64) -> Value {
        json!({
            "summary": { "symbol_code": symbol },
            "details": {
                "precipitation_amount": amount,
                "probability_of_precipitation": prob,
                "ultraviolet_index_clear_sky_max": uvi
            }
        })
    }

    #[test]
    fn current_and_forecast_are_split() {
        let ts = vec![
            step("2025-06-01T10:00:00Z", 20.456, Some(next("rain", 1.234, 60.0, 5.0))),
            step("2025-06-01T11:00:00Z", 21.0, Some(next("lightsnow_night", 0.3, 20.0, 0.0))),
            step("2025-06-01T12:00:00Z", 22.0, None),
        ];
        let n = normalize(&ts, &Utc).unwrap();

        assert_eq!(n.current.temp, 20.46);
        assert_eq!(n.current.clouds, 42.12);
        assert_eq!(n.current.precip, 1.23);
        assert_eq!(n.current.precip_prob, 60.0);
        assert_eq!(n.current.uvi, 5.0);
        assert!(n.current.is_day);
        assert_eq!(n.forecast.len(), 2);
        assert_eq!(n.forecast[0].precip_kind, PrecipKind::Snow);
        assert!(!n.forecast[0].is_day);
    }

    #[test]
    fn missing_detail_gives_dry_daytime() {
        let ts = vec![step("2025-01-01T23:00:00Z", -3.0, None)];
        let n = normalize(&ts, &Utc).unwrap();

        assert_eq!(n.current.precip, 0.0);
        assert_eq!(n.current.precip_prob, 0.0);
        assert_eq!(n.current.precip_kind, PrecipKind::Rain);
        assert!(n.current.is_day);
        assert!(n.forecast.is_empty());
    }

    #[test]
    fn broken_detail_block_falls_back() {
        let ts = vec![step("2025-01-01T12:00:00Z", 1.0, Some(json!({ "summary": 17 })))];
        let n = normalize(&ts, &Utc).unwrap();

        assert_eq!(n.current.precip, 0.0);
        assert!(n.current.is_day);
    }

    #[test]
    fn day_night_falls_back_on_local_hour() {
        let ts = vec![
            step("2025-01-01T04:00:00Z", 1.0, Some(next("cloudy", 0.0, 0.0, 0.0))),
            step("2025-01-01T05:00:00Z", 1.0, Some(next("cloudy", 0.0, 0.0, 0.0))),
        ];
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

        let n = normalize(&ts, &Utc).unwrap();
        assert!(!n.current.is_day);
        assert!(!n.forecast[0].is_day);

        let n = normalize(&ts, &plus_two).unwrap();
        assert_eq!(n.current.time.hour(), 6);
        assert!(n.current.is_day);
        assert!(n.forecast[0].is_day);
    }

    #[test]
    fn percentages_are_clamped() {
        let ts = vec![step("2025-01-01T12:00:00Z", 1.0, Some(next("rain", 1.0, 140.0, 0.0)))];
        let n = normalize(&ts, &Utc).unwrap();
        assert_eq!(n.current.precip_prob, 100.0);
    }

    #[test]
    fn bad_forecast_entries_are_skipped() {
        let ts = vec![
            step("2025-01-01T12:00:00Z", 1.0, None),
            json!({ "time": "2025-01-01T13:00:00Z", "data": { "instant": { "details": {} } } }),
            step("2025-01-01T14:00:00Z", 2.0, None),
            step("2025-01-01T14:00:00Z", 3.0, None),
            json!("garbage"),
            step("2025-01-01T15:00:00Z", 4.0, None),
        ];
        let n = normalize(&ts, &Utc).unwrap();

        let temps: Vec<f64> = n.forecast.iter().map(|s| s.temp).collect();
        assert_eq!(temps, vec![2.0, 4.0]);
    }

    #[test]
    fn malformed_current_is_an_error() {
        let ts = vec![json!({ "time": "not a time", "data": {} })];
        assert!(matches!(normalize(&ts, &Utc), Err(ForecastError::MalformedInput(_))));
    }

    #[test]
    fn empty_or_absent_time_series_is_an_error() {
        assert!(matches!(normalize(&[], &Utc), Err(ForecastError::MalformedInput(_))));
        assert!(matches!(normalize_document("{}", &Utc), Err(ForecastError::MalformedInput(_))));
        assert!(matches!(normalize_document("{\"properties\": {}}", &Utc), Err(ForecastError::MalformedInput(_))));
        assert!(matches!(normalize_document("not json", &Utc), Err(ForecastError::MalformedInput(_))));
    }
}
