//! Time slot (assignment) model.
//!
//! A time slot records that a course is taught to a group by a teacher
//! in a room, on one weekday, during one clock-time interval.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{TimeWindow, Weekday};

/// One scheduled session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Course taught.
    pub course_id: String,
    /// Attending group. `None` for slots not tied to a group.
    pub group_id: Option<String>,
    /// Hosting room.
    pub room_id: String,
    /// Teaching teacher.
    pub teacher_id: String,
    /// Day of the week.
    pub day: Weekday,
    /// Clock-time interval. Must satisfy `start < end`.
    pub window: TimeWindow,
}

/// The kinds of resource a slot occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Room,
    Teacher,
    Group,
}

impl TimeSlot {
    /// Creates a slot for a group.
    pub fn new(
        course_id: impl Into<String>,
        group_id: impl Into<String>,
        room_id: impl Into<String>,
        teacher_id: impl Into<String>,
        day: Weekday,
        window: TimeWindow,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            group_id: Some(group_id.into()),
            room_id: room_id.into(),
            teacher_id: teacher_id.into(),
            day,
            window,
        }
    }

    /// Detaches the slot from its group.
    pub fn without_group(mut self) -> Self {
        self.group_id = None;
        self
    }

    /// Session length (minutes).
    #[inline]
    pub fn duration_min(&self) -> u32 {
        self.window.duration_min()
    }

    /// ID of the resource of the given kind this slot occupies.
    ///
    /// Returns `None` for [`ResourceKind::Group`] when the slot has no group.
    pub fn resource_id(&self, kind: ResourceKind) -> Option<&str> {
        match kind {
            ResourceKind::Room => Some(self.room_id.as_str()),
            ResourceKind::Teacher => Some(self.teacher_id.as_str()),
            ResourceKind::Group => self.group_id.as_deref(),
        }
    }

    /// Whether this slot occupies `id` of `kind` on `day`.
    pub fn occupies(&self, kind: ResourceKind, id: &str, day: Weekday) -> bool {
        self.day == day && self.resource_id(kind) == Some(id)
    }

    /// Whether two slots share a resource of `kind` at overlapping times.
    pub fn clashes_with(&self, other: &Self, kind: ResourceKind) -> bool {
        match (self.resource_id(kind), other.resource_id(kind)) {
            (Some(a), Some(b)) => a == b && self.day == other.day && self.window.overlaps(&other.window),
            _ => false,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Room => f.write_str("room"),
            ResourceKind::Teacher => f.write_str("teacher"),
            ResourceKind::Group => f.write_str("group"),
        }
    }
}
