use std::fmt;
use std::fmt::Formatter;
use crate::sample::Sample;

/// Least amount of precipitation (mm) shown as precipitation rather than clouds
const PRECIP_VISIBLE: f64 = 0.25;

/// Upper limit (exclusive) for low intensity precipitation in mm
const PRECIP_MID: f64 = 2.5;

/// Upper limit (inclusive) for mid intensity precipitation in mm
const PRECIP_HIGH: f64 = 7.5;

/// Probability (percent) from where rain is shown as likely
const RAIN_LIKELY: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intensity {
    Low,
    Mid,
    High,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloudLevel {
    Low,
    Mid,
    High,
}

/// Weather icon, its Display output is the icon file name stem
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Icon {
    Clear { day: bool },
    Clouds { level: CloudLevel, day: bool },
    CloudsFull,
    Rain { intensity: Intensity, likely: bool },
    Sleet(Intensity),
    Snow(Intensity),
}

impl Icon {
    /// Determines the icon for a sample.
    ///
    /// With visible precipitation the icon shows type and intensity, and for rain
    /// also whether it is likely. Otherwise it shows cloud cover, where all but
    /// full cover are split on day and night. Anything that can't be judged, e.g.
    /// a NaN value, ends up as clear sky.
    ///
    /// # Arguments
    ///
    /// * 'sample' - the sample to get an icon for
    pub fn for_sample(sample: &Sample) -> Icon {
        if sample.precip >= PRECIP_VISIBLE {
            let intensity = if sample.precip < PRECIP_MID {
                Intensity::Low
            } else if sample.precip <= PRECIP_HIGH {
                Intensity::Mid
            } else {
                Intensity::High
            };

            let snow_fraction = sample.precip_kind.snow_fraction();
            return if snow_fraction < 0.25 {
                Icon::Rain { intensity, likely: sample.precip_prob >= RAIN_LIKELY }
            } else if snow_fraction <= 0.75 {
                Icon::Sleet(intensity)
            } else {
                Icon::Snow(intensity)
            };
        }

        let day = sample.is_day;
        match sample.clouds {
            c if c < 10.0 => Icon::Clear { day },
            c if c < 35.0 => Icon::Clouds { level: CloudLevel::Low, day },
            c if c < 60.0 => Icon::Clouds { level: CloudLevel::Mid, day },
            c if c < 85.0 => Icon::Clouds { level: CloudLevel::High, day },
            c if c >= 85.0 => Icon::CloudsFull,
            _ => Icon::Clear { day },
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Intensity::Low  => write!(f, "low"),
            Intensity::Mid  => write!(f, "mid"),
            Intensity::High => write!(f, "high"),
        }
    }
}

impl fmt::Display for CloudLevel {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            CloudLevel::Low  => write!(f, "low"),
            CloudLevel::Mid  => write!(f, "mid"),
            CloudLevel::High => write!(f, "high"),
        }
    }
}

/// Implementation of the Display Trait, gives the icon file name stem
impl fmt::Display for Icon {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let day_night = |day: bool| if day { "day" } else { "night" };
        match self {
            Icon::Clear { day } => write!(f, "clear_{}", day_night(*day)),
            Icon::Clouds { level, day } => write!(f, "clouds_{}_{}", level, day_night(*day)),
            Icon::CloudsFull => write!(f, "clouds_full"),
            Icon::Rain { intensity, likely } => {
                write!(f, "rain_{}_{}", intensity, if *likely { "likely" } else { "unlikely" })
            }
            Icon::Sleet(intensity) => write!(f, "sleet_{}", intensity),
            Icon::Snow(intensity) => write!(f, "snow_{}", intensity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use crate::sample::PrecipKind;

    fn sample(clouds: f64, precip: f64, prob: f64, kind: PrecipKind, is_day: bool) -> Sample {
        let time = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
        let mut s = Sample::dry(time, 5.0, clouds);
        s.precip = precip;
        s.precip_prob = prob;
        s.precip_kind = kind;
        s.is_day = is_day;
        s
    }

    fn stem(clouds: f64, precip: f64, prob: f64, kind: PrecipKind, is_day: bool) -> String {
        Icon::for_sample(&sample(clouds, precip, prob, kind, is_day)).to_string()
    }

    #[test]
    fn dry_cloud_levels() {
        assert_eq!(stem(0.0, 0.0, 0.0, PrecipKind::Rain, true), "clear_day");
        assert_eq!(stem(9.99, 0.0, 0.0, PrecipKind::Rain, false), "clear_night");
        assert_eq!(stem(10.0, 0.0, 0.0, PrecipKind::Rain, true), "clouds_low_day");
        assert_eq!(stem(35.0, 0.0, 0.0, PrecipKind::Rain, false), "clouds_mid_night");
        assert_eq!(stem(84.9, 0.0, 0.0, PrecipKind::Rain, true), "clouds_high_day");
        assert_eq!(stem(85.0, 0.0, 0.0, PrecipKind::Rain, false), "clouds_full");
        assert_eq!(stem(100.0, 0.24, 100.0, PrecipKind::Snow, true), "clouds_full");
    }

    #[test]
    fn rain_intensity_and_probability() {
        assert_eq!(stem(100.0, 0.25, 50.0, PrecipKind::Rain, true), "rain_low_likely");
        assert_eq!(stem(100.0, 2.49, 49.0, PrecipKind::Rain, true), "rain_low_unlikely");
        assert_eq!(stem(100.0, 2.5, 90.0, PrecipKind::Rain, false), "rain_mid_likely");
        assert_eq!(stem(100.0, 7.5, 10.0, PrecipKind::Rain, true), "rain_mid_unlikely");
        assert_eq!(stem(100.0, 7.6, 80.0, PrecipKind::Rain, true), "rain_high_likely");
    }

    #[test]
    fn sleet_and_snow_have_no_probability() {
        assert_eq!(stem(100.0, 1.0, 90.0, PrecipKind::Sleet, true), "sleet_low");
        assert_eq!(stem(100.0, 3.0, 10.0, PrecipKind::Snow, false), "snow_mid");
        assert_eq!(stem(100.0, 9.0, 10.0, PrecipKind::Snow, true), "snow_high");
    }

    #[test]
    fn unjudgeable_sample_is_clear() {
        assert_eq!(stem(f64::NAN, f64::NAN, 0.0, PrecipKind::Rain, true), "clear_day");
    }

    proptest! {
        #[test]
        fn icon_is_idempotent(clouds in 0.0f64..=100.0, precip in 0.0f64..20.0, prob in 0.0f64..=100.0, day: bool) {
            let s = sample(clouds, precip, prob, PrecipKind::Rain, day);
            prop_assert_eq!(Icon::for_sample(&s).to_string(), Icon::for_sample(&s).to_string());
        }
    }
}
