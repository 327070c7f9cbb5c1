//! Teacher and availability models.
//!
//! # Availability Semantics
//! A teacher with no availability record at all is unrestricted.
//! Once any record exists, the teacher may only be scheduled inside a
//! window marked available on the same day.

use serde::{Deserialize, Serialize};

use super::{TimeWindow, Weekday};

/// A teacher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: String,
    /// Display name.
    pub full_name: String,
}

impl Teacher {
    /// Creates a teacher.
    pub fn new(id: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
        }
    }
}

/// A teacher-declared availability window on one weekday.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherAvailability {
    /// Teacher this record belongs to.
    pub teacher_id: String,
    /// Day of the week.
    pub day: Weekday,
    /// Declared interval.
    pub window: TimeWindow,
    /// `false` marks the window as explicitly unavailable.
    pub is_available: bool,
}

impl TeacherAvailability {
    /// Creates an "available" record.
    pub fn available(teacher_id: impl Into<String>, day: Weekday, window: TimeWindow) -> Self {
        Self {
            teacher_id: teacher_id.into(),
            day,
            window,
            is_available: true,
        }
    }

    /// Creates an "unavailable" record.
    pub fn unavailable(teacher_id: impl Into<String>, day: Weekday, window: TimeWindow) -> Self {
        Self {
            is_available: false,
            ..Self::available(teacher_id, day, window)
        }
    }

    /// Whether this record allows teaching during `window`.
    pub fn permits(&self, window: &TimeWindow) -> bool {
        self.is_available && self.window.covers(window)
    }
}
