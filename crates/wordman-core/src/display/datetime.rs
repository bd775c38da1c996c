//! Calendar date display utilities.

use std::fmt;

use jiff::civil::Date;

/// Formats a calendar date with its weekday, e.g. `2024-03-01 (Fri)`.
pub struct CalendarDate<'a>(pub &'a Date);

impl fmt::Display for CalendarDate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%Y-%m-%d (%a)"))
    }
}
