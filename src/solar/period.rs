//! Classification of an instant into a named part of the day

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DaywallError, Result};
use crate::solar::SunTimes;

/// One of the eight named parts of the solar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Night,
    NauticalDawn,
    CivilDawn,
    Morning,
    Noon,
    LateAfternoon,
    CivilDusk,
    NauticalDusk,
}

impl Period {
    /// All periods in day order, starting at night
    pub const ALL: [Period; 8] = [
        Period::Night,
        Period::NauticalDawn,
        Period::CivilDawn,
        Period::Morning,
        Period::Noon,
        Period::LateAfternoon,
        Period::CivilDusk,
        Period::NauticalDusk,
    ];

    /// Name used for the wallpaper file (`<name>.jpg`)
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Night => "night",
            Self::NauticalDawn => "nautical_dawn",
            Self::CivilDawn => "civil_dawn",
            Self::Morning => "morning",
            Self::Noon => "noon",
            Self::LateAfternoon => "late_afternoon",
            Self::CivilDusk => "civil_dusk",
            Self::NauticalDusk => "nautical_dusk",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify `t` against the day's sun events
///
/// Intervals are half-open and lower-inclusive: `t == sunrise` is morning,
/// `t == sunset` is civil dusk. With ordered input every `t` matches exactly
/// one branch; unordered input that slips through is an internal error.
pub fn resolve(t: i64, sun: &SunTimes) -> Result<Period> {
    let period = if t >= sun.nautical_twilight_end || t < sun.nautical_twilight_begin {
        Period::Night
    } else if (sun.nautical_twilight_begin..sun.civil_twilight_begin).contains(&t) {
        Period::NauticalDawn
    } else if (sun.civil_twilight_begin..sun.sunrise).contains(&t) {
        Period::CivilDawn
    } else if (sun.sunrise..sun.solar_noon).contains(&t) {
        Period::Morning
    } else if (sun.solar_noon..sun.late_afternoon).contains(&t) {
        Period::Noon
    } else if (sun.late_afternoon..sun.sunset).contains(&t) {
        Period::LateAfternoon
    } else if (sun.sunset..sun.civil_twilight_end).contains(&t) {
        Period::CivilDusk
    } else if (sun.civil_twilight_end..sun.nautical_twilight_end).contains(&t) {
        Period::NauticalDusk
    } else {
        return Err(DaywallError::Internal(format!(
            "no period matches timestamp {t} for sun times {sun:?}"
        )));
    };

    Ok(period)
}

/// Approximate the period from the local wall-clock hour
///
/// Degraded mode for when no valid sun data is available; the table is
/// calibrated for mid latitudes.
pub fn take_a_guess(hour: u32) -> Period {
    match hour {
        4..=5 => Period::NauticalDawn,
        6..=7 => Period::CivilDawn,
        8..=11 => Period::Morning,
        12..=14 => Period::Noon,
        15..=17 => Period::LateAfternoon,
        18 => Period::CivilDusk,
        19..=20 => Period::NauticalDusk,
        _ => Period::Night,
    }
}
