use std::fmt;
use std::fmt::Formatter;
use crate::sample::{round_half_up, Sample};

/// Current temperatures at or above this are considered extreme heat
const HEAT_LIMIT: f64 = 31.0;

/// A forecast temperature at or below this is reported as relief from extreme heat
const RELIEF_LIMIT: f64 = 30.0;

/// Ratio between two intensity indexes that counts as a precipitation change
const RAIN_CHANGE_RATIO: f64 = 2.0;

/// An extremum this many degrees (or more) away from the current temperature is
/// reported if it is the earliest of the two extremes
const TEMP_CHANGE_LIMIT: i64 = 3;

/// Why a forecast step was selected
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reason {
    TempDrop,
    RainStronger,
    RainWeaker,
    TempMax,
    TempMin,
    NoEvent,
}

impl Reason {
    /// True for the precipitation related reasons
    pub fn is_rain(&self) -> bool {
        matches!(self, Reason::RainStronger | Reason::RainWeaker)
    }
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for Reason {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Reason::TempDrop     => write!(f, "temp drop"),
            Reason::RainStronger => write!(f, "rain stronger"),
            Reason::RainWeaker   => write!(f, "rain weaker"),
            Reason::TempMax      => write!(f, "temp max"),
            Reason::TempMin      => write!(f, "temp min"),
            Reason::NoEvent      => write!(f, "none"),
        }
    }
}

/// The most noteworthy upcoming change, an index into the forecast and why
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Event {
    pub index: Option<usize>,
    pub reason: Reason,
}

impl Event {
    fn at(index: usize, reason: Reason) -> Event {
        Event { index: Some(index), reason }
    }

    /// Nothing worth reporting
    pub fn none() -> Event {
        Event { index: None, reason: Reason::NoEvent }
    }

    pub fn is_none(&self) -> bool {
        self.index.is_none()
    }
}

/// Selects the single most significant upcoming change in the forecast.
///
/// Rules are tried in order and the first one that finds something wins:
/// * heat relief, when it is extremely hot now and it is about to cool off
/// * precipitation intensity change, at least doubling or halving the intensity index
/// * temperature extremum, the min or max temperature of the forecast
///
/// # Arguments
///
/// * 'current' - the current reading
/// * 'forecast' - forecast samples in time order
pub fn select_event(current: &Sample, forecast: &[Sample]) -> Event {
    if forecast.is_empty() || !current.temp.is_finite() {
        return Event::none();
    }

    heat_relief(current, forecast)
        .or_else(|| rain_change(current, forecast))
        .or_else(|| temp_extremum(current, forecast))
        .unwrap_or_else(Event::none)
}

/// Returns an ordinal between 1 and 5 telling how intense precipitation is
///
/// # Arguments
///
/// * 'precip' - precipitation amount in mm
/// * 'prob' - probability of precipitation in percent
pub fn precip_intensity_index(precip: f64, prob: f64) -> u8 {
    let likely = prob > 50.0;
    if precip < 0.25 {
        1
    } else if precip < 2.5 {
        if likely { 3 } else { 2 }
    } else if precip <= 7.5 {
        if likely { 4 } else { 3 }
    } else if likely {
        5
    } else {
        4
    }
}

/// Ratio between the larger and the smaller intensity index.
/// The intensity index is never 0, the guard only protects the division should
/// the index function ever change.
///
/// # Arguments
///
/// * 'a' - first intensity index
/// * 'b' - second intensity index
fn change_index(a: u8, b: u8) -> f64 {
    if a == 0 || b == 0 {
        1.0
    } else {
        a.max(b) as f64 / a.min(b) as f64
    }
}

fn heat_relief(current: &Sample, forecast: &[Sample]) -> Option<Event> {
    if current.temp < HEAT_LIMIT {
        return None;
    }

    forecast.iter()
        .position(|s| s.temp <= RELIEF_LIMIT)
        .map(|i| Event::at(i, Reason::TempDrop))
}

fn rain_change(current: &Sample, forecast: &[Sample]) -> Option<Event> {
    let current_index = precip_intensity_index(current.precip, current.precip_prob);

    forecast.iter().enumerate().find_map(|(i, s)| {
        let index = precip_intensity_index(s.precip, s.precip_prob);
        if change_index(current_index, index) >= RAIN_CHANGE_RATIO {
            let reason = if index > current_index { Reason::RainStronger } else { Reason::RainWeaker };
            Some(Event::at(i, reason))
        } else {
            None
        }
    })
}

/// Picks the min or max temperature of the forecast. The earliest of the two is
/// preferred if it differs enough from now, otherwise the one furthest away.
/// Ties on temperature go to the earliest index, ties on distance go to the max.
fn temp_extremum(current: &Sample, forecast: &[Sample]) -> Option<Event> {
    let first = forecast.first()?;
    let (mut min_idx, mut max_idx) = (0, 0);
    let (mut min_temp, mut max_temp) = (first.temp, first.temp);

    for (i, s) in forecast.iter().enumerate().skip(1) {
        if s.temp < min_temp {
            min_temp = s.temp;
            min_idx = i;
        }
        if s.temp > max_temp {
            max_temp = s.temp;
            max_idx = i;
        }
    }

    let now = round_half_up(current.temp);
    let min_diff = (round_half_up(min_temp) - now).abs();
    let max_diff = (round_half_up(max_temp) - now).abs();

    let earlier = if min_idx < max_idx {
        (min_diff, Event::at(min_idx, Reason::TempMin))
    } else {
        (max_diff, Event::at(max_idx, Reason::TempMax))
    };

    if earlier.0 >= TEMP_CHANGE_LIMIT {
        Some(earlier.1)
    } else if min_diff > max_diff {
        Some(Event::at(min_idx, Reason::TempMin))
    } else {
        Some(Event::at(max_idx, Reason::TempMax))
    }
}
