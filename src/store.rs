//! Entity query interface.
//!
//! The surrounding application owns courses, teachers, rooms, groups,
//! availability records and persisted slots. The scheduling core only
//! reads them through [`EntityStore`].
//!
//! [`InMemoryStore`] is a complete implementation backed by vectors,
//! suitable for tests and for embedders that load everything up front.

use crate::error::StoreError;
use crate::models::{
    Course, Group, ResourceKind, Room, Teacher, TeacherAvailability, TimeSlot, Weekday,
};
use crate::persistence::Transaction;
use crate::validation::{
    validate_availability, validate_input, validate_timeslots, ValidationError, ValidationResult,
};

/// Read-only access to scheduling entities.
pub trait EntityStore {
    /// Group by ID.
    fn group(&self, id: &str) -> Option<&Group>;

    /// All groups of a department.
    fn groups_in_department(&self, department_id: &str) -> Vec<&Group>;

    /// All groups.
    fn groups(&self) -> Vec<&Group>;

    /// Course by ID.
    fn course(&self, id: &str) -> Option<&Course>;

    /// Courses a group is enrolled in, in enrollment order.
    ///
    /// Unknown course IDs are skipped.
    fn courses_for_group(&self, group: &Group) -> Vec<&Course> {
        group
            .course_ids
            .iter()
            .filter_map(|id| self.course(id))
            .collect()
    }

    /// All rooms.
    fn rooms(&self) -> Vec<&Room>;

    /// Room by ID.
    fn room(&self, id: &str) -> Option<&Room>;

    /// Teacher by ID.
    fn teacher(&self, id: &str) -> Option<&Teacher>;

    /// Teachers eligible for a course, in the course's order.
    ///
    /// Unknown teacher IDs are skipped.
    fn teachers_for_course(&self, course: &Course) -> Vec<&Teacher> {
        course
            .teacher_ids
            .iter()
            .filter_map(|id| self.teacher(id))
            .collect()
    }

    /// Every persisted slot.
    fn timeslots(&self) -> Vec<&TimeSlot>;

    /// Persisted slots occupying resource `id` of `kind` on `day`.
    fn timeslots_on(&self, kind: ResourceKind, id: &str, day: Weekday) -> Vec<&TimeSlot> {
        self.timeslots()
            .into_iter()
            .filter(|s| s.occupies(kind, id, day))
            .collect()
    }

    /// Availability records of a teacher on one day.
    fn availability_on(&self, teacher_id: &str, day: Weekday) -> Vec<&TeacherAvailability>;

    /// Whether the teacher has any availability record, on any day.
    fn has_availability(&self, teacher_id: &str) -> bool;
}

/// Vector-backed entity store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    pub courses: Vec<Course>,
    pub teachers: Vec<Teacher>,
    pub rooms: Vec<Room>,
    pub groups: Vec<Group>,
    pub availability: Vec<TeacherAvailability>,
    pub timeslots: Vec<TimeSlot>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a course.
    pub fn with_course(mut self, course: Course) -> Self {
        self.courses.push(course);
        self
    }

    /// Adds a teacher.
    pub fn with_teacher(mut self, teacher: Teacher) -> Self {
        self.teachers.push(teacher);
        self
    }

    /// Adds a room.
    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    /// Adds a group.
    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    /// Adds an availability record.
    pub fn with_availability(mut self, record: TeacherAvailability) -> Self {
        self.availability.push(record);
        self
    }

    /// Adds a persisted slot without reference checks.
    pub fn with_timeslot(mut self, slot: TimeSlot) -> Self {
        self.timeslots.push(slot);
        self
    }

    /// Opens a transaction that appends slots on commit.
    pub fn transaction(&mut self) -> StoreTransaction<'_> {
        StoreTransaction {
            store: self,
            staged: Vec::new(),
        }
    }

    /// Runs every catalog, slot and availability check, reporting all problems.
    pub fn validate(&self) -> ValidationResult {
        let errors: Vec<ValidationError> = [
            validate_input(&self.courses, &self.teachers, &self.rooms, &self.groups),
            validate_timeslots(&self.timeslots),
            validate_availability(&self.availability),
        ]
        .into_iter()
        .filter_map(Result::err)
        .flatten()
        .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Checks that a slot references known entities and has a valid interval.
    pub fn check_slot(&self, slot: &TimeSlot) -> Result<(), StoreError> {
        if !slot.window.is_valid() {
            return Err(StoreError::InvalidInterval {
                start_min: slot.window.start_min,
                end_min: slot.window.end_min,
            });
        }
        let unknown = |kind: &'static str, id: &str| StoreError::UnknownReference {
            kind,
            id: id.to_string(),
        };
        if self.course(&slot.course_id).is_none() {
            return Err(unknown("course", &slot.course_id));
        }
        if self.room(&slot.room_id).is_none() {
            return Err(unknown("room", &slot.room_id));
        }
        if self.teacher(&slot.teacher_id).is_none() {
            return Err(unknown("teacher", &slot.teacher_id));
        }
        if let Some(group_id) = &slot.group_id {
            if self.group(group_id).is_none() {
                return Err(unknown("group", group_id));
            }
        }
        Ok(())
    }
}

impl EntityStore for InMemoryStore {
    fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    fn groups_in_department(&self, department_id: &str) -> Vec<&Group> {
        self.groups
            .iter()
            .filter(|g| g.department_id == department_id)
            .collect()
    }

    fn groups(&self) -> Vec<&Group> {
        self.groups.iter().collect()
    }

    fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    fn rooms(&self) -> Vec<&Room> {
        self.rooms.iter().collect()
    }

    fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    fn teacher(&self, id: &str) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.id == id)
    }

    fn timeslots(&self) -> Vec<&TimeSlot> {
        self.timeslots.iter().collect()
    }

    fn availability_on(&self, teacher_id: &str, day: Weekday) -> Vec<&TeacherAvailability> {
        self.availability
            .iter()
            .filter(|a| a.teacher_id == teacher_id && a.day == day)
            .collect()
    }

    fn has_availability(&self, teacher_id: &str) -> bool {
        self.availability.iter().any(|a| a.teacher_id == teacher_id)
    }
}

/// Staging transaction over an [`InMemoryStore`].
///
/// Nothing is visible in the store until [`Transaction::commit`].
#[derive(Debug)]
pub struct StoreTransaction<'a> {
    store: &'a mut InMemoryStore,
    staged: Vec<TimeSlot>,
}

impl StoreTransaction<'_> {
    /// Number of staged slots.
    pub fn staged_len(&self) -> usize {
        self.staged.len()
    }
}

impl Transaction for StoreTransaction<'_> {
    type Error = StoreError;

    fn add(&mut self, slot: &TimeSlot) -> Result<(), StoreError> {
        self.store.check_slot(slot)?;
        self.staged.push(slot.clone());
        Ok(())
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        self.store.timeslots.append(&mut self.staged);
        Ok(())
    }

    fn rollback(&mut self) {
        self.staged.clear();
    }
}
