//! Manually driven clock for deterministic time-based behaviour.
//!
//! License windows, advisory resets, inactivity checks and urgent deadlines
//! all read the current instant through [`mockable::Clock`]. [`ManualClock`]
//! lets tests and simulations move that instant explicitly.

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;
use std::sync::{Arc, RwLock};

/// Clock whose current instant only changes when told to.
///
/// Clones share the same instant, so a clone handed to a service observes
/// every [`ManualClock::advance`] made through the original.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<RwLock<DateTime<Utc>>>,
}

impl ManualClock {
    /// Creates a clock frozen at `start`.
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(RwLock::new(start)),
        }
    }

    /// Creates a clock frozen at the current wall-clock instant.
    #[must_use]
    pub fn starting_now() -> Self {
        Self::new(Utc::now())
    }

    /// Moves the clock to `instant`.
    pub fn set(&self, instant: DateTime<Utc>) {
        match self.now.write() {
            Ok(mut guard) => *guard = instant,
            Err(poisoned) => *poisoned.into_inner() = instant,
        }
    }

    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: TimeDelta) {
        let next = self.utc() + delta;
        self.set(next);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::starting_now()
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        match self.now.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ManualClock;
    use chrono::{TimeDelta, TimeZone, Utc};
    use mockable::Clock;

    #[test]
    fn clones_observe_advances() {
        let Some(start) = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).single() else {
            panic!("valid start instant");
        };
        let clock = ManualClock::new(start);
        let shared = clock.clone();

        clock.advance(TimeDelta::hours(5));

        assert_eq!(shared.utc(), start + TimeDelta::hours(5));
    }
}
