//! Room model.
//!
//! Rooms host sessions. A room is either a lab or a standard classroom,
//! and seats a fixed number of students.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A room that can host sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Number of seats.
    pub capacity: u32,
    /// Room classification.
    pub room_type: RoomType,
}

/// Room classification.
///
/// Courses that require a lab may only be placed in `Lab` rooms, and
/// courses that don't may only be placed in `Standard` rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    /// Laboratory (computers, benches, equipment).
    Lab,
    /// Ordinary classroom.
    Standard,
}

impl Room {
    /// Creates a room of the given type with zero capacity.
    pub fn new(id: impl Into<String>, room_type: RoomType) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            capacity: 0,
            room_type,
        }
    }

    /// Creates a lab room.
    pub fn lab(id: impl Into<String>) -> Self {
        Self::new(id, RoomType::Lab)
    }

    /// Creates a standard classroom.
    pub fn standard(id: impl Into<String>) -> Self {
        Self::new(id, RoomType::Standard)
    }

    /// Sets the room name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the capacity.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Whether this is a lab room.
    #[inline]
    pub fn is_lab(&self) -> bool {
        self.room_type == RoomType::Lab
    }

    /// Whether the room type matches a course's lab requirement.
    #[inline]
    pub fn suits(&self, requires_lab: bool) -> bool {
        self.is_lab() == requires_lab
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomType::Lab => f.write_str("lab"),
            RoomType::Standard => f.write_str("standard"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_builder() {
        let r = Room::lab("R1").with_name("Lab 101").with_capacity(24);
        assert_eq!(r.id, "R1");
        assert_eq!(r.name, "Lab 101");
        assert_eq!(r.capacity, 24);
        assert_eq!(r.room_type, RoomType::Lab);
        assert!(r.is_lab());
    }

    #[test]
    fn test_room_suits() {
        let lab = Room::lab("L");
        let std = Room::standard("S");
        assert!(lab.suits(true));
        assert!(!lab.suits(false));
        assert!(std.suits(false));
        assert!(!std.suits(true));
    }
}
