use std::fmt;
use std::fmt::Formatter;
use chrono::NaiveDateTime;

/// Type of precipitation as given by the provider symbol code
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrecipKind {
    Rain,
    Sleet,
    Snow,
}

impl PrecipKind {
    /// Share of the precipitation falling as snow
    pub fn snow_fraction(&self) -> f64 {
        match self {
            PrecipKind::Rain => 0.0,
            PrecipKind::Sleet => 0.5,
            PrecipKind::Snow => 1.0,
        }
    }
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for PrecipKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            PrecipKind::Rain  => write!(f, "rain"),
            PrecipKind::Sleet => write!(f, "sleet"),
            PrecipKind::Snow  => write!(f, "snow"),
        }
    }
}

/// Day/night state as encoded in a symbol code
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Daylight {
    Day,
    Night,
    Unspecified,
}

/// A provider symbol code, e.g. `lightsnowshowers_night`, decoded into
/// the two facts the engine cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Symbol {
    pub daylight: Daylight,
    pub precip_kind: PrecipKind,
}

impl Symbol {
    /// Decodes a symbol code by substring, "day" wins over "night" and
    /// "snow" wins over "sleet".
    ///
    /// # Arguments
    ///
    /// * 'code' - the symbol code string from the provider
    pub fn decode(code: &str) -> Symbol {
        let daylight = if code.contains("day") {
            Daylight::Day
        } else if code.contains("night") {
            Daylight::Night
        } else {
            Daylight::Unspecified
        };

        let precip_kind = if code.contains("snow") {
            PrecipKind::Snow
        } else if code.contains("sleet") {
            PrecipKind::Sleet
        } else {
            PrecipKind::Rain
        };

        Symbol { daylight, precip_kind }
    }

    /// Resolves day/night, falling back on the local hour when the code
    /// doesn't say (day is 06:00 up to but not including 18:00)
    ///
    /// # Arguments
    ///
    /// * 'hour' - local hour of the sample
    pub fn is_day(&self, hour: u32) -> bool {
        match self.daylight {
            Daylight::Day => true,
            Daylight::Night => false,
            Daylight::Unspecified => (6..18).contains(&hour),
        }
    }
}

/// One weather observation, either the current reading or a forecast step.
/// Time is local to the display timezone.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    pub time: NaiveDateTime,
    pub temp: f64,
    pub clouds: f64,
    pub precip: f64,
    pub precip_prob: f64,
    pub uvi: f64,
    pub precip_kind: PrecipKind,
    pub is_day: bool,
}

impl Sample {
    /// Returns a dry daytime sample, i.e. what a sample looks like when
    /// the provider has no short range detail for it
    ///
    /// # Arguments
    ///
    /// * 'time' - local time of the sample
    /// * 'temp' - air temperature in °C
    /// * 'clouds' - cloud area fraction in percent
    pub fn dry(time: NaiveDateTime, temp: f64, clouds: f64) -> Sample {
        Sample {
            time,
            temp: round_value(temp),
            clouds: clamp_percent(round_value(clouds)),
            precip: 0.0,
            precip_prob: 0.0,
            uvi: 0.0,
            precip_kind: PrecipKind::Rain,
            is_day: true,
        }
    }
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for Sample {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} temp {:>6.2}, clouds {:>6.2}, {} {:>5.2} mm ({:>3.0}%), uvi {:>4.1}, {}",
               self.time.format("%Y-%m-%d %H:%M"),
               self.temp, self.clouds, self.precip_kind, self.precip, self.precip_prob, self.uvi,
               if self.is_day { "day" } else { "night" })
    }
}

/// Rounds to two decimals so float noise doesn't leak into comparisons
pub fn round_value(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rounds to the nearest integer with halves going up, i.e. -2.5 becomes -2
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Clamps a percentage to 0..=100
pub(crate) fn clamp_percent(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}
