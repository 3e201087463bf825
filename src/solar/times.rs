//! Ordered sun-event boundaries for one day

use serde::Serialize;

use crate::cache::CacheKind;
use crate::error::{DaywallError, Result};
use crate::solar::DayWindow;

/// Fraction of the noon→sunset span after which the afternoon counts as late
pub const LATE_AFTERNOON_FRACTION: f64 = 0.5;

/// Sun events for a single day, as Unix timestamps
///
/// Valid data satisfies
/// `nautical_twilight_begin < civil_twilight_begin < sunrise < solar_noon
///  < late_afternoon < sunset < civil_twilight_end < nautical_twilight_end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SunTimes {
    pub nautical_twilight_begin: i64,
    pub civil_twilight_begin: i64,
    pub sunrise: i64,
    pub solar_noon: i64,
    pub late_afternoon: i64,
    pub sunset: i64,
    pub civil_twilight_end: i64,
    pub nautical_twilight_end: i64,
}

/// The seven events reported by the sun data service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunEvents {
    pub nautical_twilight_begin: i64,
    pub civil_twilight_begin: i64,
    pub sunrise: i64,
    pub solar_noon: i64,
    pub sunset: i64,
    pub civil_twilight_end: i64,
    pub nautical_twilight_end: i64,
}

impl SunTimes {
    /// Derive the day's boundaries, placing late afternoon with [`LATE_AFTERNOON_FRACTION`]
    pub fn from_events(events: SunEvents) -> Self {
        Self::with_fraction(events, LATE_AFTERNOON_FRACTION)
    }

    /// Derive the day's boundaries with an explicit late-afternoon fraction
    pub fn with_fraction(events: SunEvents, fraction: f64) -> Self {
        let span = (events.sunset - events.solar_noon) as f64;
        let late_afternoon = events.solar_noon + (span * fraction).round() as i64;

        Self {
            nautical_twilight_begin: events.nautical_twilight_begin,
            civil_twilight_begin: events.civil_twilight_begin,
            sunrise: events.sunrise,
            solar_noon: events.solar_noon,
            late_afternoon,
            sunset: events.sunset,
            civil_twilight_end: events.civil_twilight_end,
            nautical_twilight_end: events.nautical_twilight_end,
        }
    }

    /// Boundaries in chronological order, labelled
    pub fn boundaries(&self) -> [(&'static str, i64); 8] {
        [
            ("nautical_twilight_begin", self.nautical_twilight_begin),
            ("civil_twilight_begin", self.civil_twilight_begin),
            ("sunrise", self.sunrise),
            ("solar_noon", self.solar_noon),
            ("late_afternoon", self.late_afternoon),
            ("sunset", self.sunset),
            ("civil_twilight_end", self.civil_twilight_end),
            ("nautical_twilight_end", self.nautical_twilight_end),
        ]
    }

    /// Check the data is usable for today
    ///
    /// Rejects data whose day starts before `window.begin` (yesterday's or
    /// placeholder timestamps) and data that is not strictly ordered.
    pub fn validate(&self, window: &DayWindow) -> Result<()> {
        if self.nautical_twilight_begin < window.begin {
            return Err(DaywallError::invalid(
                CacheKind::Sun,
                format!(
                    "nautical twilight begins at {} which is before today ({})",
                    self.nautical_twilight_begin, window.begin
                ),
            ));
        }

        for pair in self.boundaries().windows(2) {
            let (earlier_name, earlier) = pair[0];
            let (later_name, later) = pair[1];
            if earlier >= later {
                return Err(DaywallError::invalid(
                    CacheKind::Sun,
                    format!("{earlier_name} ({earlier}) is not before {later_name} ({later})"),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: i64 = 3600;
    const T: i64 = 1_781_474_400;

    fn events() -> SunEvents {
        SunEvents {
            nautical_twilight_begin: T + 5 * HOUR,
            civil_twilight_begin: T + 5 * HOUR + 1800,
            sunrise: T + 6 * HOUR,
            solar_noon: T + 12 * HOUR,
            sunset: T + 18 * HOUR,
            civil_twilight_end: T + 18 * HOUR + 1800,
            nautical_twilight_end: T + 19 * HOUR,
        }
    }

    fn window() -> DayWindow {
        DayWindow {
            begin: T,
            end: T + 24 * HOUR,
        }
    }

    #[test]
    fn test_late_afternoon_at_half_way() {
        let times = SunTimes::from_events(events());
        assert_eq!(times.late_afternoon, T + 15 * HOUR);
    }

    #[test]
    fn test_late_afternoon_with_three_quarters() {
        let times = SunTimes::with_fraction(events(), 0.75);
        assert_eq!(times.late_afternoon, T + 16 * HOUR + 1800);
    }

    #[test]
    fn test_late_afternoon_strictly_between_noon_and_sunset() {
        for span in [2, 3, 61, 3600, 6 * HOUR + 17] {
            let mut e = events();
            e.sunset = e.solar_noon + span;
            let times = SunTimes::from_events(e);
            assert!(times.late_afternoon > times.solar_noon, "span {span}");
            assert!(times.late_afternoon < times.sunset, "span {span}");
        }
    }

    #[test]
    fn test_validate_accepts_ordered_data() {
        SunTimes::from_events(events()).validate(&window()).unwrap();
    }

    #[test]
    fn test_validate_rejects_twilight_before_today() {
        let mut e = events();
        e.nautical_twilight_begin = T - 1;
        let err = SunTimes::from_events(e).validate(&window()).unwrap_err();

        assert!(err.to_string().contains("before today"));
    }

    #[test]
    fn test_validate_rejects_placeholder_epoch_values() {
        // Polar days come back as 1970-01-01T00:00:01
        let mut e = events();
        e.nautical_twilight_begin = 1;
        e.nautical_twilight_end = 1;

        assert!(SunTimes::from_events(e).validate(&window()).is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_order_data() {
        let mut e = events();
        e.sunrise = e.solar_noon;
        let err = SunTimes::from_events(e).validate(&window()).unwrap_err();

        assert!(err.to_string().contains("sunrise"));
    }

    #[test]
    fn test_boundaries_are_chronological() {
        let times = SunTimes::from_events(events());
        let values: Vec<i64> = times.boundaries().iter().map(|(_, ts)| *ts).collect();
        let mut sorted = values.clone();
        sorted.sort();

        assert_eq!(values, sorted);
    }
}
