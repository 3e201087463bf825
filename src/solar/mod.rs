//! Solar-day model: day boundaries, sun events and period classification

mod period;
mod times;
mod window;

pub use period::{resolve, take_a_guess, Period};
pub use times::{SunEvents, SunTimes, LATE_AFTERNOON_FRACTION};
pub use window::DayWindow;
