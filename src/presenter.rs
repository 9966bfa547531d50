use std::fmt;
use std::fmt::Formatter;
use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use crate::icons::Icon;
use crate::sample::{round_half_up, Sample};
use crate::selector::{Event, Reason};

/// UV index from where the now temperature is flagged as urgent
const UV_URGENT: f64 = 8.0;

/// Shown in place of the next event when there is nothing to report
const NO_EVENT_TEXT: &str = "--";

/// The next event formatted for display
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DisplayPayload {
    pub arrow: String,
    pub time_label: String,
    pub body: String,
    pub rain: bool,
}

/// Implementation of the Display Trait, e.g. `14: ↗rain_mid_likely` or `06: ↓-3°`
impl fmt::Display for DisplayPayload {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}{}", self.time_label, self.arrow, self.body)
    }
}

/// The weather as it is now
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NowSnapshot {
    pub temp: i64,
    pub icon: String,
    pub uvi: f64,
    pub urgent: bool,
}

impl NowSnapshot {
    /// Label for the now temperature, prefixed with `!` when UV is urgent
    pub fn label(&self) -> String {
        if self.urgent {
            format!("!{}°", self.temp)
        } else {
            format!("{}°", self.temp)
        }
    }
}

/// Everything the rendering side needs for one display update
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DisplayRecord {
    pub now: NowSnapshot,
    pub next: Option<DisplayPayload>,
    pub text: String,
}

/// Formats an event and the forecast sample it points at
///
/// # Arguments
///
/// * 'event' - the selected event
/// * 'sample' - the forecast sample at the event index
pub fn present(event: &Event, sample: &Sample) -> DisplayPayload {
    let body = if event.reason.is_rain() {
        Icon::for_sample(sample).to_string()
    } else {
        format!("{}°", round_half_up(sample.temp))
    };

    DisplayPayload {
        arrow: arrow(event.reason).to_string(),
        time_label: time_label(sample.time),
        body,
        rain: event.reason.is_rain(),
    }
}

/// Builds the now snapshot from the current sample
///
/// # Arguments
///
/// * 'current' - the current reading
pub fn now_snapshot(current: &Sample) -> NowSnapshot {
    NowSnapshot {
        temp: round_half_up(current.temp),
        icon: Icon::for_sample(current).to_string(),
        uvi: current.uvi,
        urgent: current.uvi >= UV_URGENT,
    }
}

/// Builds the complete display record. An event without a matching forecast
/// sample is shown the same way as no event at all.
///
/// # Arguments
///
/// * 'current' - the current reading
/// * 'forecast' - the forecast the event indexes into
/// * 'event' - the selected event
pub fn display_record(current: &Sample, forecast: &[Sample], event: &Event) -> DisplayRecord {
    let next = event.index
        .and_then(|i| forecast.get(i))
        .map(|sample| present(event, sample));

    let text = next.as_ref().map_or(NO_EVENT_TEXT.to_string(), |n| n.to_string());

    DisplayRecord { now: now_snapshot(current), next, text }
}

fn arrow(reason: Reason) -> &'static str {
    match reason {
        Reason::TempMax      => "↑",
        Reason::TempMin      => "↓",
        Reason::RainStronger => "↗",
        Reason::RainWeaker   => "↘",
        Reason::TempDrop     => "↘",
        Reason::NoEvent      => "",
    }
}

/// Hour rounded to the nearest whole hour, past half rolls over to the next
/// (23:45 gives "00")
///
/// # Arguments
///
/// * 'time' - local time of the sample
fn time_label(time: NaiveDateTime) -> String {
    let mut hour = time.hour();
    if time.minute() > 30 {
        hour = (hour + 1) % 24;
    }

    format!("{:0>2}", hour)
}
