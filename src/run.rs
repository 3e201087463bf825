//! One invocation: load or refresh data, resolve the period, apply the wallpaper

use std::path::PathBuf;

use chrono::{DateTime, Local, Timelike};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cache::{self, CacheKind, CacheStore};
use crate::config::RunConfig;
use crate::error::{DaywallError, Result};
use crate::provider::{parse_geo, parse_sun, Coordinates, GeoLocation, LocationApi};
use crate::retry::{interim_period, Attempt, Attempts, RetryPolicy};
use crate::solar::{resolve, DayWindow, Period, SunTimes};
use crate::wallpaper::Applicator;

/// Result of a successful invocation
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub period: Period,
    pub image: PathBuf,
    /// False for dry runs
    pub applied: bool,
    pub coordinates: Coordinates,
    /// Set when the location came from IP geolocation
    pub location: Option<GeoLocation>,
    pub sun: SunTimes,
}

/// Wires cache, providers, resolver and applicator together
pub struct Orchestrator<'a, A, W> {
    config: &'a RunConfig,
    cache: &'a CacheStore,
    api: &'a A,
    wallpaper: &'a W,
    policy: RetryPolicy,
}

impl<'a, A, W> Orchestrator<'a, A, W>
where
    A: LocationApi,
    W: Applicator,
{
    pub fn new(config: &'a RunConfig, cache: &'a CacheStore, api: &'a A, wallpaper: &'a W) -> Self {
        Self {
            config,
            cache,
            api,
            wallpaper,
            policy: RetryPolicy::default(),
        }
    }

    /// Replace the default retry policy
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run once for the instant `now`
    pub fn run(&self, now: DateTime<Local>) -> Result<Outcome> {
        if self.config.purge {
            cache::clear_all(self.cache)?;
            info!("cache purged");
        }

        let window = DayWindow::containing(now)?;

        let (coordinates, location) = match self.config.location {
            Some(coordinates) => (coordinates, None),
            None => {
                let location = self.locate(&window, now)?;
                (location.coordinates, Some(location))
            }
        };

        let sun = self.sun_times(coordinates, &window, now)?;
        let period = resolve(now.timestamp(), &sun)?;
        debug!(%period, t = now.timestamp(), "resolved period");

        let image = self.wallpaper.apply(period)?;

        Ok(Outcome {
            period,
            image,
            applied: !self.config.dry_run,
            coordinates,
            location,
            sun,
        })
    }

    fn locate(&self, window: &DayWindow, now: DateTime<Local>) -> Result<GeoLocation> {
        let location = self.obtain(CacheKind::Geo, window, now, parse_geo, || {
            self.api.fetch_geo()
        })?;

        if let Some(place) = location.place() {
            debug!(%place, "located by IP");
        }
        Ok(location)
    }

    fn sun_times(
        &self,
        coordinates: Coordinates,
        window: &DayWindow,
        now: DateTime<Local>,
    ) -> Result<SunTimes> {
        self.obtain(
            CacheKind::Sun,
            window,
            now,
            |payload| parse_sun(payload, window),
            || self.api.fetch_sun(coordinates),
        )
    }

    /// Validated data of one kind, from today's cache or the network
    ///
    /// A cached payload counts as the first attempt. Rejected attempts that
    /// will be retried show the hour-based guess; when the budget is spent
    /// the cache for `kind` is purged and the run fails.
    fn obtain<T>(
        &self,
        kind: CacheKind,
        window: &DayWindow,
        now: DateTime<Local>,
        parse: impl Fn(&Value) -> Result<T>,
        mut fetch: impl FnMut() -> Result<Value>,
    ) -> Result<T> {
        let mut cached = self.cache.load(kind, window);

        let attempts = Attempts::new(self.policy, |number| {
            let (payload, fresh) = match cached.take() {
                Some(payload) => (payload, false),
                None => {
                    debug!(%kind, attempt = number, "fetching");
                    (fetch()?, true)
                }
            };
            let value = parse(&payload)?;
            Ok((value, fresh.then_some(payload)))
        });

        for attempt in attempts {
            if let Attempt::Invalid { number, reason, .. } = &attempt {
                warn!(%kind, attempt = number, max = self.policy.max_attempts, %reason, "invalid data");
            }

            if let Some(period) = interim_period(&attempt, now.hour()) {
                warn!(%period, "showing best guess while retrying");
                self.wallpaper.apply(period)?;
            }

            match attempt {
                Attempt::Valid {
                    value: (value, fetched),
                    ..
                } => {
                    if let Some(payload) = fetched {
                        if let Err(e) = self.cache.store_at(kind, &payload, now.timestamp()) {
                            warn!(%kind, error = %e, "could not cache response");
                        }
                    }
                    return Ok(value);
                }
                Attempt::Invalid {
                    number,
                    reason,
                    last: true,
                } => {
                    self.cache.purge(kind)?;
                    return Err(DaywallError::RetriesExhausted {
                        kind,
                        attempts: number,
                        reason: reason.to_string(),
                    });
                }
                Attempt::Invalid { .. } => {}
            }
        }

        Err(DaywallError::RetriesExhausted {
            kind,
            attempts: 0,
            reason: "retry policy allows no attempts".into(),
        })
    }
}
