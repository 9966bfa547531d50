use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use serde_json::Value;

/// Top level of a locationforecast document. Only the parts the engine
/// consumes are modelled, everything else is ignored by serde.
#[derive(Deserialize)]
pub struct FullForecast {
    pub properties: Option<Properties>,
}

#[derive(Deserialize)]
pub struct Properties {
    /// Kept raw so that a single broken entry can be skipped instead of
    /// failing the whole document.
    #[serde(default)]
    pub timeseries: Vec<Value>,
}

#[derive(Deserialize)]
pub struct TimeStep {
    pub time: DateTime<FixedOffset>,
    pub data: StepData,
}

#[derive(Deserialize)]
pub struct StepData {
    pub instant: Instant,
    #[serde(default)]
    pub next_1_hours: Option<Value>,
}

#[derive(Deserialize)]
pub struct Instant {
    pub details: InstantDetails,
}

#[derive(Deserialize)]
pub struct InstantDetails {
    pub air_temperature: f64,
    #[serde(default)]
    pub cloud_area_fraction: Option<f64>,
}

#[derive(Deserialize)]
pub struct NextHours {
    pub summary: Summary,
    #[serde(default)]
    pub details: NextHoursDetails,
}

#[derive(Deserialize)]
pub struct Summary {
    pub symbol_code: String,
}

#[derive(Deserialize, Default)]
pub struct NextHoursDetails {
    #[serde(default)]
    pub precipitation_amount: Option<f64>,
    #[serde(default)]
    pub probability_of_precipitation: Option<f64>,
    #[serde(default)]
    pub ultraviolet_index_clear_sky_max: Option<f64>,
}
