mod apply;
pub mod cache;
mod common;

pub use self::apply::apply;
pub use self::common::{cache_store, load_settings};
