use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::CacheKind;
use crate::error::{DaywallError, Result};
use crate::solar::{DayWindow, SunEvents, SunTimes};

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Create coordinates, rejecting values outside the valid ranges
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(DaywallError::InvalidArgument(format!(
                "latitude {latitude} is outside -90..90"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(DaywallError::InvalidArgument(format!(
                "longitude {longitude} is outside -180..180"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Location reported by the geolocation service
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoLocation {
    pub coordinates: Coordinates,
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
}

impl GeoLocation {
    /// "City, Region, Country" with whatever parts are known
    pub fn place(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.city, &self.region, &self.country]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .filter(|p| !p.is_empty())
            .collect();

        (!parts.is_empty()).then(|| parts.join(", "))
    }
}

/// Geolocation service response
#[derive(Debug, Clone, Deserialize)]
pub struct GeoResponse {
    pub status: String,
    pub message: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub country: Option<String>,
    #[serde(rename = "regionName")]
    pub region_name: Option<String>,
    pub city: Option<String>,
}

impl GeoResponse {
    /// Check status and required fields
    pub fn into_location(self) -> Result<GeoLocation> {
        if self.status != "success" {
            let detail = self.message.map(|m| format!(" ({m})")).unwrap_or_default();
            return Err(DaywallError::invalid(
                CacheKind::Geo,
                format!("status is '{}'{detail}", self.status),
            ));
        }

        let (Some(lat), Some(lon)) = (self.lat, self.lon) else {
            return Err(DaywallError::invalid(
                CacheKind::Geo,
                "response has no coordinates",
            ));
        };

        let coordinates = Coordinates::new(lat, lon)
            .map_err(|e| DaywallError::invalid(CacheKind::Geo, e.to_string()))?;

        Ok(GeoLocation {
            coordinates,
            country: self.country,
            region: self.region_name,
            city: self.city,
        })
    }
}

/// Decode and validate a geolocation payload
pub fn parse_geo(payload: &Value) -> Result<GeoLocation> {
    let response: GeoResponse = serde_json::from_value(payload.clone())
        .map_err(|e| DaywallError::invalid(CacheKind::Geo, format!("malformed response: {e}")))?;

    response.into_location()
}

/// Sun data service response
///
/// `results` stays raw until the status is known to be `OK`; error answers
/// carry an empty string there.
#[derive(Debug, Clone, Deserialize)]
pub struct SunResponse {
    pub status: String,
    #[serde(default)]
    pub results: Value,
}

/// Event times from a successful sun data response
#[derive(Debug, Clone, Deserialize)]
pub struct SunResults {
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub solar_noon: DateTime<Utc>,
    pub civil_twilight_begin: DateTime<Utc>,
    pub civil_twilight_end: DateTime<Utc>,
    pub nautical_twilight_begin: DateTime<Utc>,
    pub nautical_twilight_end: DateTime<Utc>,
}

impl SunResults {
    pub fn events(&self) -> SunEvents {
        SunEvents {
            nautical_twilight_begin: self.nautical_twilight_begin.timestamp(),
            civil_twilight_begin: self.civil_twilight_begin.timestamp(),
            sunrise: self.sunrise.timestamp(),
            solar_noon: self.solar_noon.timestamp(),
            sunset: self.sunset.timestamp(),
            civil_twilight_end: self.civil_twilight_end.timestamp(),
            nautical_twilight_end: self.nautical_twilight_end.timestamp(),
        }
    }
}

/// Decode a sun data payload and validate it against today
pub fn parse_sun(payload: &Value, window: &DayWindow) -> Result<SunTimes> {
    let response: SunResponse = serde_json::from_value(payload.clone())
        .map_err(|e| DaywallError::invalid(CacheKind::Sun, format!("malformed response: {e}")))?;

    if response.status != "OK" {
        return Err(DaywallError::invalid(
            CacheKind::Sun,
            format!("status is '{}'", response.status),
        ));
    }

    let results: SunResults = serde_json::from_value(response.results)
        .map_err(|e| DaywallError::invalid(CacheKind::Sun, format!("malformed results: {e}")))?;

    let times = SunTimes::from_events(results.events());
    times.validate(window)?;
    Ok(times)
}
