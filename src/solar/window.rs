//! Local calendar-day boundaries

use chrono::{DateTime, Days, Local, NaiveDate, TimeZone};

use crate::error::{DaywallError, Result};

/// Unix timestamps bounding the local calendar day, `[begin, end)`
///
/// `end` is the following local midnight, so the window covers exactly the
/// seconds from 00:00:00 through 23:59:59.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub begin: i64,
    pub end: i64,
}

impl DayWindow {
    /// The local day containing `now`
    pub fn containing(now: DateTime<Local>) -> Result<Self> {
        Self::for_date(now.date_naive())
    }

    /// The local day for a calendar date
    pub fn for_date(date: NaiveDate) -> Result<Self> {
        let next = date
            .checked_add_days(Days::new(1))
            .ok_or_else(|| DaywallError::Internal(format!("no day after {date}")))?;

        Ok(Self {
            begin: local_midnight(date)?,
            end: local_midnight(next)?,
        })
    }

    /// Whether a timestamp falls inside the day
    pub fn contains(&self, ts: i64) -> bool {
        self.begin <= ts && ts < self.end
    }
}

/// First instant of a local date
///
/// Zones that jump over midnight on a DST change start the day at the first
/// valid local time after 00:00.
fn local_midnight(date: NaiveDate) -> Result<i64> {
    for hour in 0..3 {
        let Some(naive) = date.and_hms_opt(hour, 0, 0) else {
            continue;
        };
        if let Some(dt) = Local.from_local_datetime(&naive).earliest() {
            return Ok(dt.timestamp());
        }
    }

    Err(DaywallError::Internal(format!(
        "cannot determine local midnight for {date}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn june_15() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
    }

    #[test]
    fn test_begin_is_local_midnight() {
        let window = DayWindow::for_date(june_15()).unwrap();
        let begin = Local.timestamp_opt(window.begin, 0).unwrap();

        assert_eq!(begin.date_naive(), june_15());
        assert_eq!(begin.hour(), 0);
        assert_eq!(begin.minute(), 0);
    }

    #[test]
    fn test_end_is_next_midnight() {
        let window = DayWindow::for_date(june_15()).unwrap();
        let last_second = Local.timestamp_opt(window.end - 1, 0).unwrap();

        assert_eq!(last_second.date_naive(), june_15());
        assert_eq!(
            (last_second.hour(), last_second.minute(), last_second.second()),
            (23, 59, 59)
        );
    }

    #[test]
    fn test_contains_is_half_open() {
        let window = DayWindow::for_date(june_15()).unwrap();

        assert!(window.contains(window.begin));
        assert!(window.contains(window.end - 1));
        assert!(!window.contains(window.end));
        assert!(!window.contains(window.begin - 1));
    }

    #[test]
    fn test_containing_now_holds_now() {
        let now = Local::now();
        let window = DayWindow::containing(now).unwrap();

        assert!(window.contains(now.timestamp()));
    }
}
