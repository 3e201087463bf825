mod client;
pub mod types;

pub use client::{ApiClient, LocationApi};
pub use types::*;
