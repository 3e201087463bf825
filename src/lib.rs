//! Picks and applies a wallpaper for the current part of the solar day.
//!
//! Sun events come from a remote service (optionally after IP geolocation)
//! and are cached on disk for the rest of the local calendar day.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod provider;
pub mod retry;
pub mod run;
pub mod solar;
pub mod wallpaper;
