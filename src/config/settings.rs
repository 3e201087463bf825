use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use super::paths::{default_cache_dir, expand_home, Paths};
use crate::error::Result;

/// Apply command used when none is configured
pub const DEFAULT_COMMAND: &str = "feh --bg-fill";

/// Contents of the configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Wallpaper images and how to apply them
    #[serde(default)]
    pub wallpaper: WallpaperSettings,

    /// Fixed location (skips geolocation)
    #[serde(default)]
    pub location: LocationSettings,

    /// Remote services
    #[serde(default)]
    pub api: ApiSettings,

    /// Cache location
    #[serde(default)]
    pub cache: CacheSettings,
}

/// Wallpaper-related configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WallpaperSettings {
    /// Folder containing `<period>.jpg` images
    pub folder: Option<PathBuf>,
    /// Command invoked with the image path as its last argument
    pub command: Option<String>,
}

/// Explicit coordinates
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationSettings {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Endpoints of the geolocation and sun data services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_geo_url")]
    pub geo_url: String,
    #[serde(default = "default_sun_url")]
    pub sun_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_geo_url() -> String {
    "http://ip-api.com".to_string()
}

fn default_sun_url() -> String {
    "https://api.sunrise-sunset.org".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            geo_url: default_geo_url(),
            sun_url: default_sun_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Cache-related configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Directory for cached responses (defaults to a per-user temp dir)
    pub dir: Option<PathBuf>,
}

impl Settings {
    /// Load configuration from a specific paths instance
    pub fn load_from(paths: &Paths) -> Result<Self> {
        if !paths.config_exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&paths.config_file)?;
        let settings: Settings = toml::from_str(&contents)?;
        Ok(settings)
    }

    /// Cache directory, preferring an explicit override
    pub fn cache_dir(&self, cli_override: Option<&PathBuf>) -> PathBuf {
        cli_override
            .or(self.cache.dir.as_ref())
            .map(|dir| expand_home(dir))
            .unwrap_or_else(default_cache_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Create a test Paths instance using a temp directory
    fn make_test_paths(temp_dir: &TempDir) -> Paths {
        Paths::with_config_file(temp_dir.path().join("config.toml"))
    }

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert!(settings.wallpaper.folder.is_none());
        assert!(settings.location.latitude.is_none());
        assert_eq!(settings.api.geo_url, "http://ip-api.com");
        assert_eq!(settings.api.sun_url, "https://api.sunrise-sunset.org");
        assert_eq!(settings.api.timeout_secs, 15);
    }

    #[test]
    fn test_load_returns_default_when_no_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = make_test_paths(&temp_dir);

        let settings = Settings::load_from(&paths).unwrap();
        assert!(settings.wallpaper.command.is_none());
    }

    #[test]
    fn test_load_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let paths = make_test_paths(&temp_dir);

        fs::write(
            &paths.config_file,
            r#"
[wallpaper]
folder = "~/Pictures/daywall"

[api]
sun_url = "http://localhost:9000"
"#,
        )
        .unwrap();

        let settings = Settings::load_from(&paths).unwrap();
        assert_eq!(
            settings.wallpaper.folder,
            Some(PathBuf::from("~/Pictures/daywall"))
        );
        assert_eq!(settings.api.sun_url, "http://localhost:9000");
        assert_eq!(settings.api.geo_url, "http://ip-api.com");
    }

    #[test]
    fn test_load_full_config() {
        let temp_dir = TempDir::new().unwrap();
        let paths = make_test_paths(&temp_dir);

        fs::write(
            &paths.config_file,
            r#"
[wallpaper]
folder = "/srv/walls"
command = "swaybg -m fill -i"

[location]
latitude = -33.87
longitude = 151.21

[api]
timeout_secs = 5

[cache]
dir = "/var/tmp/dw"
"#,
        )
        .unwrap();

        let settings = Settings::load_from(&paths).unwrap();
        assert_eq!(settings.wallpaper.command.as_deref(), Some("swaybg -m fill -i"));
        assert_eq!(settings.location.latitude, Some(-33.87));
        assert_eq!(settings.location.longitude, Some(151.21));
        assert_eq!(settings.api.timeout_secs, 5);
        assert_eq!(settings.cache_dir(None), PathBuf::from("/var/tmp/dw"));
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let paths = make_test_paths(&temp_dir);

        fs::write(&paths.config_file, "[location\nlatitude = ").unwrap();

        let err = Settings::load_from(&paths).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_cache_dir_prefers_override() {
        let mut settings = Settings::default();
        settings.cache.dir = Some(PathBuf::from("/from/config"));
        let cli = PathBuf::from("/from/cli");

        assert_eq!(settings.cache_dir(Some(&cli)), cli);
        assert_eq!(settings.cache_dir(None), PathBuf::from("/from/config"));
    }

    #[test]
    fn test_cache_dir_default() {
        assert_eq!(Settings::default().cache_dir(None), default_cache_dir());
    }
}
