mod paths;
mod run;
mod settings;

pub use paths::{default_cache_dir, expand_home, Paths};
pub use run::{RunConfig, RunOverrides};
pub use settings::{ApiSettings, CacheSettings, LocationSettings, Settings, WallpaperSettings, DEFAULT_COMMAND};
