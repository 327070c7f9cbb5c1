//! Weekday and time-of-day models.
//!
//! The weekly grid is six days (Monday to Saturday) of clock time.
//! Times are minutes since midnight; the calendar date plays no role.
//!
//! # Interval Semantics
//! All intervals are half-open `[start, end)`: two sessions that touch
//! (one ends at 11:00, the next starts at 11:00) do not overlap.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Builds a clock time (minutes since midnight) from hours and minutes.
#[inline]
pub const fn hm(hours: u32, minutes: u32) -> u32 {
    hours * 60 + minutes
}

/// A day of the teaching week.
///
/// Indexed 0 (Monday) through 5 (Saturday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// All teaching days in calendar order.
    pub const ALL: [Weekday; 6] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Day index (0 = Monday).
    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        };
        f.write_str(name)
    }
}

/// A clock-time interval [start, end).
///
/// Half-open interval: includes start, excludes end.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    /// Interval start (minutes since midnight, inclusive).
    pub start_min: u32,
    /// Interval end (minutes since midnight, exclusive).
    pub end_min: u32,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start_min: u32, end_min: u32) -> Self {
        Self { start_min, end_min }
    }

    /// Window starting at `start_min` lasting `duration_min` minutes.
    ///
    /// The end saturates at `u32::MAX`, past any day end.
    pub fn starting_at(start_min: u32, duration_min: u32) -> Self {
        Self::new(start_min, start_min.saturating_add(duration_min))
    }

    /// Duration of this window (minutes). Zero for empty or inverted windows.
    #[inline]
    pub fn duration_min(&self) -> u32 {
        self.end_min.saturating_sub(self.start_min)
    }

    /// Whether the window has positive length.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.start_min < self.end_min
    }

    /// Whether two windows overlap: `max(s1, s2) < min(e1, e2)`.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_min.max(other.start_min) < self.end_min.min(other.end_min)
    }

    /// Whether `other` lies entirely inside this window.
    pub fn covers(&self, other: &Self) -> bool {
        self.start_min <= other.start_min && other.end_min <= self.end_min
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}-{:02}:{:02}",
            self.start_min / 60,
            self.start_min % 60,
            self.end_min / 60,
            self.end_min % 60
        )
    }
}
