use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::types::Coordinates;
use crate::config::ApiSettings;
use crate::error::{DaywallError, Result};

const USER_AGENT: &str = concat!("daywall/", env!("CARGO_PKG_VERSION"));

/// Fields requested from the geolocation service
const GEO_FIELDS: &str = "status,message,lat,lon,country,regionName,city";

/// Source of raw geolocation and sun data responses
pub trait LocationApi {
    /// Locate the caller by IP address
    fn fetch_geo(&self) -> Result<Value>;

    /// Sun events for today at the given coordinates
    fn fetch_sun(&self, coordinates: Coordinates) -> Result<Value>;
}

/// Client for the geolocation and sun data services
pub struct ApiClient {
    client: Client,
    geo_url: String,
    sun_url: String,
}

impl ApiClient {
    /// Create a new client from configuration
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            geo_url: settings.geo_url.trim_end_matches('/').to_string(),
            sun_url: settings.sun_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of the geolocation request
    pub fn geo_request_url(&self) -> Result<Url> {
        Ok(Url::parse_with_params(
            &format!("{}/json/", self.geo_url),
            &[("fields", GEO_FIELDS)],
        )?)
    }

    /// URL of the sun data request for a location
    pub fn sun_request_url(&self, coordinates: Coordinates) -> Result<Url> {
        Ok(Url::parse_with_params(
            &format!("{}/json", self.sun_url),
            &[
                ("lat", coordinates.latitude.to_string()),
                ("lng", coordinates.longitude.to_string()),
                ("formatted", "0".to_string()),
            ],
        )?)
    }

    /// GET a URL and decode the body as JSON
    fn get(&self, service: &'static str, url: Url) -> Result<Value> {
        debug!(service, %url, "requesting");
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(DaywallError::api(service, status.as_u16(), message));
        }

        let body = response.text()?;
        serde_json::from_str(&body).map_err(DaywallError::Json)
    }
}

impl LocationApi for ApiClient {
    fn fetch_geo(&self) -> Result<Value> {
        self.get("Geolocation", self.geo_request_url()?)
    }

    fn fetch_sun(&self, coordinates: Coordinates) -> Result<Value> {
        self.get("Sun data", self.sun_request_url(coordinates)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client_for(server: &mockito::Server) -> ApiClient {
        ApiClient::new(&ApiSettings {
            geo_url: server.url(),
            sun_url: format!("{}/", server.url()),
            timeout_secs: 5,
        })
        .unwrap()
    }

    fn berlin() -> Coordinates {
        Coordinates::new(52.52, 13.405).unwrap()
    }

    #[test]
    fn test_geo_request_url() {
        let client = ApiClient::new(&ApiSettings::default()).unwrap();
        let url = client.geo_request_url().unwrap();

        assert_eq!(url.host_str(), Some("ip-api.com"));
        assert_eq!(url.path(), "/json/");
        let fields: Vec<_> = url.query_pairs().collect();
        assert_eq!(fields[0].0, "fields");
        assert_eq!(fields[0].1, GEO_FIELDS);
    }

    #[test]
    fn test_sun_request_url() {
        let client = ApiClient::new(&ApiSettings::default()).unwrap();
        let url = client.sun_request_url(berlin()).unwrap();

        assert_eq!(url.scheme(), "https");
        assert_eq!(url.path(), "/json");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("lat".to_string(), "52.52".to_string()),
                ("lng".to_string(), "13.405".to_string()),
                ("formatted".to_string(), "0".to_string()),
            ]
        );
    }

    #[test]
    fn test_fetch_geo() {
        let mut server = mockito::Server::new();
        let body = json!({"status": "success", "lat": 52.52, "lon": 13.405, "city": "Berlin"});
        let mock = server
            .mock("GET", "/json/")
            .match_query(Matcher::UrlEncoded("fields".into(), GEO_FIELDS.into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create();

        let payload = client_for(&server).fetch_geo().unwrap();

        mock.assert();
        assert_eq!(payload, body);
    }

    #[test]
    fn test_fetch_sun() {
        let mut server = mockito::Server::new();
        let body = json!({"status": "INVALID_REQUEST", "results": ""});
        let mock = server
            .mock("GET", "/json")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("lat".into(), "52.52".into()),
                Matcher::UrlEncoded("lng".into(), "13.405".into()),
                Matcher::UrlEncoded("formatted".into(), "0".into()),
            ]))
            .with_status(200)
            .with_body(body.to_string())
            .create();

        let payload = client_for(&server).fetch_sun(berlin()).unwrap();

        mock.assert();
        assert_eq!(payload["status"], "INVALID_REQUEST");
    }

    #[test]
    fn test_http_error_status() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/json")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("maintenance")
            .create();

        let err = client_for(&server).fetch_sun(berlin()).unwrap_err();

        match err {
            DaywallError::Api {
                service,
                status,
                message,
            } => {
                assert_eq!(service, "Sun data");
                assert_eq!(status, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_json_body() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/json/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>captive portal</html>")
            .create();

        let err = client_for(&server).fetch_geo().unwrap_err();
        assert!(matches!(err, DaywallError::Json(_)));
    }
}
