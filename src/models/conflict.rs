//! Conflict (constraint violation) model.
//!
//! Each variant carries only the fields relevant to its kind. Names are
//! resolved at detection time so a report can be rendered without going
//! back to the entity store.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{TimeWindow, Weekday};

/// How serious a conflict is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Double booking of a room, teacher or group.
    Critical,
    /// Hard rule broken for a single slot (availability, capacity).
    High,
    /// Soft rule (weekly workload band).
    Medium,
}

/// Classification of conflicts, without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    RoomConflict,
    TeacherConflict,
    GroupConflict,
    AvailabilityConflict,
    WorkloadConflict,
    CapacityConflict,
}

/// A detected constraint violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Conflict {
    /// Two sessions booked in the same room at overlapping times.
    RoomConflict {
        room: String,
        day: Weekday,
        slot1_course: String,
        slot2_course: String,
    },
    /// A teacher booked for two overlapping sessions.
    TeacherConflict {
        teacher: String,
        day: Weekday,
        slot1_course: String,
        slot2_course: String,
    },
    /// A group booked for two overlapping sessions.
    GroupConflict {
        group: String,
        day: Weekday,
        slot1_course: String,
        slot2_course: String,
    },
    /// Session placed outside the teacher's declared availability.
    AvailabilityConflict {
        teacher: String,
        course: String,
        day: Weekday,
        time: TimeWindow,
    },
    /// Group weekly load outside the allowed band.
    WorkloadConflict {
        group: String,
        hours: f64,
        min_hours: f64,
        max_hours: f64,
    },
    /// Room too small for the attending group.
    CapacityConflict {
        room: String,
        required: u32,
        capacity: u32,
    },
}

impl Conflict {
    /// Classification of this conflict.
    pub fn kind(&self) -> ConflictKind {
        match self {
            Conflict::RoomConflict { .. } => ConflictKind::RoomConflict,
            Conflict::TeacherConflict { .. } => ConflictKind::TeacherConflict,
            Conflict::GroupConflict { .. } => ConflictKind::GroupConflict,
            Conflict::AvailabilityConflict { .. } => ConflictKind::AvailabilityConflict,
            Conflict::WorkloadConflict { .. } => ConflictKind::WorkloadConflict,
            Conflict::CapacityConflict { .. } => ConflictKind::CapacityConflict,
        }
    }

    /// Severity tier, fixed per kind.
    pub fn severity(&self) -> Severity {
        self.kind().severity()
    }

    /// Human-readable description.
    pub fn description(&self) -> String {
        match self {
            Conflict::RoomConflict { room, day, .. } => {
                format!("Room {room} is double-booked on {day}")
            }
            Conflict::TeacherConflict { teacher, day, .. } => {
                format!("Teacher {teacher} has two sessions at the same time on {day}")
            }
            Conflict::GroupConflict { group, day, .. } => {
                format!("Group {group} has two sessions at the same time on {day}")
            }
            Conflict::AvailabilityConflict {
                teacher, day, time, ..
            } => format!("Teacher {teacher} is not available on {day} at {time}"),
            Conflict::WorkloadConflict {
                group,
                hours,
                min_hours,
                max_hours,
            } => format!(
                "Group {group}: weekly load {hours:.2}h (required {min_hours}h-{max_hours}h)"
            ),
            Conflict::CapacityConflict {
                room,
                required,
                capacity,
            } => format!(
                "Room {room} capacity ({capacity}) is insufficient for {required} students"
            ),
        }
    }

    /// Flattened record for rendering: payload plus severity and description.
    pub fn to_record(&self) -> ConflictRecord {
        ConflictRecord {
            conflict: self.clone(),
            severity: self.severity(),
            description: self.description(),
        }
    }
}

impl ConflictKind {
    /// Severity tier of this kind.
    pub fn severity(self) -> Severity {
        match self {
            ConflictKind::RoomConflict
            | ConflictKind::TeacherConflict
            | ConflictKind::GroupConflict => Severity::Critical,
            ConflictKind::AvailabilityConflict | ConflictKind::CapacityConflict => Severity::High,
            ConflictKind::WorkloadConflict => Severity::Medium,
        }
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

/// A conflict as rendered for a report consumer.
#[derive(Debug, Clone, Serialize)]
pub struct ConflictRecord {
    #[serde(flatten)]
    pub conflict: Conflict,
    pub severity: Severity,
    pub description: String,
}

/// Summary of a full detection pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConflictReport {
    /// Total number of conflicts.
    pub total: usize,
    /// Number of critical conflicts.
    pub critical: usize,
    /// Number of high-severity conflicts.
    pub high: usize,
    /// Number of medium-severity conflicts.
    pub medium: usize,
    /// Every conflict, in detection order.
    pub conflicts: Vec<Conflict>,
}

impl ConflictReport {
    /// Builds a report, counting conflicts per severity.
    pub fn from_conflicts(conflicts: Vec<Conflict>) -> Self {
        let count = |s: Severity| conflicts.iter().filter(|c| c.severity() == s).count();
        Self {
            total: conflicts.len(),
            critical: count(Severity::Critical),
            high: count(Severity::High),
            medium: count(Severity::Medium),
            conflicts,
        }
    }

    /// Whether no conflict was found.
    pub fn is_clean(&self) -> bool {
        self.total == 0
    }

    /// Conflicts of one kind.
    pub fn of_kind(&self, kind: ConflictKind) -> Vec<&Conflict> {
        self.conflicts.iter().filter(|c| c.kind() == kind).collect()
    }

    /// Rendered records for every conflict.
    pub fn records(&self) -> Vec<ConflictRecord> {
        self.conflicts.iter().map(Conflict::to_record).collect()
    }
}
