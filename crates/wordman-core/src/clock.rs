//! Calendar clock used for every plan comparison.
//!
//! Plans are scheduled by calendar date only. The planner reads "today" once
//! per operation through a [`Clock`] and hands the date down to the store.

use std::fmt;
use std::sync::Mutex;

use jiff::{civil::Date, ToSpan, Zoned};

/// Supplies the learner's current calendar date.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Today's date in the learner's local time zone.
    fn today(&self) -> Date;
}

/// Clock backed by the system time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        Zoned::now().date()
    }
}

/// Clock whose date is set by hand.
///
/// Used for scripted sessions (`--today`) and to walk a schedule forward in
/// tests without waiting for real days to pass.
#[derive(Debug)]
pub struct ManualClock {
    today: Mutex<Date>,
}

impl ManualClock {
    pub fn new(today: Date) -> Self {
        Self {
            today: Mutex::new(today),
        }
    }

    /// Replaces the current date.
    pub fn set(&self, date: Date) {
        *self.lock() = date;
    }

    /// Moves the current date forward by `days`. Saturates at the end of
    /// the supported calendar.
    pub fn advance(&self, days: i32) {
        let mut today = self.lock();
        *today = today.saturating_add(days.days());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Date> {
        // A poisoned lock still holds a valid date.
        self.today.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Clock for ManualClock {
    fn today(&self) -> Date {
        *self.lock()
    }
}
