//! Bounded fetch-and-validate attempts
//!
//! [`Attempts`] yields one result per attempt and sleeps the backoff lazily,
//! right before the next fetch. The caller decides what to do in between,
//! which [`interim_period`] captures for wallpapers.

use std::thread;
use std::time::Duration;

use crate::error::{DaywallError, Result};
use crate::solar::{take_a_guess, Period};

/// Attempt budget and the pause between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_secs(10),
        }
    }
}

/// Outcome of a single attempt
#[derive(Debug)]
pub enum Attempt<T> {
    Valid {
        number: u32,
        value: T,
    },
    Invalid {
        number: u32,
        reason: DaywallError,
        /// No further attempt follows
        last: bool,
    },
}

/// Iterator over attempts, stopping after the first valid one or when the budget is spent
pub struct Attempts<F> {
    policy: RetryPolicy,
    fetch: F,
    made: u32,
    done: bool,
}

impl<T, F> Attempts<F>
where
    F: FnMut(u32) -> Result<T>,
{
    /// `fetch` receives the 1-based attempt number
    pub fn new(policy: RetryPolicy, fetch: F) -> Self {
        Self {
            policy,
            fetch,
            made: 0,
            done: false,
        }
    }
}

impl<T, F> Iterator for Attempts<F>
where
    F: FnMut(u32) -> Result<T>,
{
    type Item = Attempt<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.made >= self.policy.max_attempts {
            return None;
        }

        if self.made > 0 && !self.policy.backoff.is_zero() {
            thread::sleep(self.policy.backoff);
        }

        self.made += 1;
        let number = self.made;

        match (self.fetch)(number) {
            Ok(value) => {
                self.done = true;
                Some(Attempt::Valid { number, value })
            }
            Err(reason) => Some(Attempt::Invalid {
                number,
                reason,
                last: number >= self.policy.max_attempts,
            }),
        }
    }
}

/// Wallpaper to show while retrying, if any
///
/// Every invalid attempt that will be retried gets the hour-based guess so
/// the desktop never waits on the network with a stale image.
pub fn interim_period<T>(attempt: &Attempt<T>, hour: u32) -> Option<Period> {
    match attempt {
        Attempt::Invalid { last: false, .. } => Some(take_a_guess(hour)),
        _ => None,
    }
}
