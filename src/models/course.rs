//! Course model.
//!
//! A course is taught to every group enrolled in it, a fixed number of
//! times per week, by one of its eligible teachers.

use serde::{Deserialize, Serialize};

/// A course to be placed on the weekly grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Sessions required per week for each enrolled group.
    pub weekly_sessions: u32,
    /// Length of one session (minutes). `None` = configured default.
    pub duration_minutes: Option<u32>,
    /// Whether sessions must take place in a lab room.
    pub requires_lab: bool,
    /// Eligible teacher IDs, in preference order.
    pub teacher_ids: Vec<String>,
}

impl Course {
    /// Creates a course with one weekly session and the default duration.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            weekly_sessions: 1,
            duration_minutes: None,
            requires_lab: false,
            teacher_ids: Vec::new(),
        }
    }

    /// Sets the course name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the number of weekly sessions.
    pub fn with_weekly_sessions(mut self, sessions: u32) -> Self {
        self.weekly_sessions = sessions;
        self
    }

    /// Sets the session duration (minutes).
    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    /// Requires a lab room.
    pub fn with_lab(mut self) -> Self {
        self.requires_lab = true;
        self
    }

    /// Adds an eligible teacher.
    pub fn with_teacher(mut self, teacher_id: impl Into<String>) -> Self {
        self.teacher_ids.push(teacher_id.into());
        self
    }

    /// Session duration, falling back to `default_minutes`.
    pub fn session_minutes(&self, default_minutes: u32) -> u32 {
        self.duration_minutes.unwrap_or(default_minutes)
    }

    /// Whether at least one teacher may teach this course.
    pub fn has_teachers(&self) -> bool {
        !self.teacher_ids.is_empty()
    }
}
