//! Input validation for timetabling.
//!
//! Checks structural integrity of the entity catalog before generating.
//! Detects:
//! - Duplicate IDs (per entity kind)
//! - Courses referencing unknown teachers
//! - Groups referencing unknown courses
//! - Courses with no weekly session or a zero-length session
//! - Empty or inverted intervals in slots and availability records
//!
//! Every problem is reported, not just the first.

use std::collections::HashSet;

use crate::models::{Course, Group, Room, Teacher, TeacherAvailability, TimeSlot};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities of the same kind share an ID.
    DuplicateId,
    /// A course lists a teacher that doesn't exist.
    InvalidTeacherReference,
    /// A group lists a course that doesn't exist.
    InvalidCourseReference,
    /// A course has zero weekly sessions or a zero-length session.
    EmptyCourse,
    /// An interval has `start >= end`.
    InvalidInterval,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the entity catalog.
///
/// Checks:
/// 1. No duplicate course, teacher, room or group IDs
/// 2. Every course teacher exists
/// 3. Every group course exists
/// 4. Every course has at least one weekly session of positive length
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    courses: &[Course],
    teachers: &[Teacher],
    rooms: &[Room],
    groups: &[Group],
) -> ValidationResult {
    let mut errors = Vec::new();

    let course_ids = collect_ids(courses.iter().map(|c| c.id.as_str()), "course", &mut errors);
    let teacher_ids = collect_ids(teachers.iter().map(|t| t.id.as_str()), "teacher", &mut errors);
    collect_ids(rooms.iter().map(|r| r.id.as_str()), "room", &mut errors);
    collect_ids(groups.iter().map(|g| g.id.as_str()), "group", &mut errors);

    for course in courses {
        if course.weekly_sessions == 0 || course.duration_minutes == Some(0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyCourse,
                format!("Course '{}' has no schedulable session", course.id),
            ));
        }
        for teacher_id in &course.teacher_ids {
            if !teacher_ids.contains(teacher_id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidTeacherReference,
                    format!(
                        "Course '{}' references unknown teacher '{}'",
                        course.id, teacher_id
                    ),
                ));
            }
        }
    }

    for group in groups {
        for course_id in &group.course_ids {
            if !course_ids.contains(course_id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidCourseReference,
                    format!(
                        "Group '{}' references unknown course '{}'",
                        group.id, course_id
                    ),
                ));
            }
        }
    }

    into_result(errors)
}

/// Validates that every slot has `start < end`.
pub fn validate_timeslots(slots: &[TimeSlot]) -> ValidationResult {
    let errors = slots
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.window.is_valid())
        .map(|(i, s)| {
            ValidationError::new(
                ValidationErrorKind::InvalidInterval,
                format!("Time slot {i} ({}) has an empty interval {}", s.course_id, s.window),
            )
        })
        .collect();
    into_result(errors)
}

/// Validates that every availability record has `start < end`.
pub fn validate_availability(records: &[TeacherAvailability]) -> ValidationResult {
    let errors = records
        .iter()
        .filter(|a| !a.window.is_valid())
        .map(|a| {
            ValidationError::new(
                ValidationErrorKind::InvalidInterval,
                format!(
                    "Availability of teacher '{}' on {} has an empty interval {}",
                    a.teacher_id, a.day, a.window
                ),
            )
        })
        .collect();
    into_result(errors)
}

/// Collects IDs into a set, reporting duplicates.
fn collect_ids<'a>(
    ids: impl Iterator<Item = &'a str>,
    entity: &str,
    errors: &mut Vec<ValidationError>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {entity} ID: {id}"),
            ));
        }
    }
    seen
}

fn into_result(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{hm, TimeWindow, Weekday};

    fn sample_teachers() -> Vec<Teacher> {
        vec![Teacher::new("T1", "Ada"), Teacher::new("T2", "Alan")]
    }

    fn sample_courses() -> Vec<Course> {
        vec![
            Course::new("C1").with_teacher("T1"),
            Course::new("C2").with_teacher("T1").with_teacher("T2"),
        ]
    }

    fn sample_rooms() -> Vec<Room> {
        vec![Room::standard("R1"), Room::lab("L1")]
    }

    fn sample_groups() -> Vec<Group> {
        vec![Group::new("G1", "CS").with_course("C1").with_course("C2")]
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(
            &sample_courses(),
            &sample_teachers(),
            &sample_rooms(),
            &sample_groups()
        )
        .is_ok());
    }

    #[test]
    fn test_duplicate_room_id() {
        let rooms = vec![Room::standard("R1"), Room::lab("R1")];
        let errors =
            validate_input(&sample_courses(), &sample_teachers(), &rooms, &sample_groups())
                .unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("room")));
    }

    #[test]
    fn test_unknown_teacher() {
        let courses = vec![Course::new("C1").with_teacher("T404"), Course::new("C2")];
        let errors =
            validate_input(&courses, &sample_teachers(), &sample_rooms(), &sample_groups())
                .unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidTeacherReference));
    }

    #[test]
    fn test_unknown_course() {
        let groups = vec![Group::new("G1", "CS").with_course("C404")];
        let errors =
            validate_input(&sample_courses(), &sample_teachers(), &sample_rooms(), &groups)
                .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidCourseReference);
    }

    #[test]
    fn test_empty_course() {
        let courses = vec![
            Course::new("C1").with_weekly_sessions(0),
            Course::new("C2").with_duration(0),
        ];
        let errors = validate_input(&courses, &[], &[], &[]).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.kind == ValidationErrorKind::EmptyCourse));
    }

    #[test]
    fn test_multiple_errors() {
        let courses = vec![
            Course::new("C1").with_teacher("NOBODY"),
            Course::new("C1"),
        ];
        let groups = vec![Group::new("G1", "CS").with_course("NOTHING")];
        let errors = validate_input(&courses, &[], &[], &groups).unwrap_err();
        assert!(errors.len() >= 3);
    }

    #[test]
    fn test_invalid_timeslot_interval() {
        let slots = vec![
            TimeSlot::new("C1", "G1", "R1", "T1", Weekday::Monday, TimeWindow::new(hm(9, 0), hm(10, 0))),
            TimeSlot::new("C2", "G1", "R1", "T1", Weekday::Monday, TimeWindow::new(hm(10, 0), hm(10, 0))),
        ];
        let errors = validate_timeslots(&slots).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("Time slot 1"));
    }

    #[test]
    fn test_invalid_availability_interval() {
        let records = vec![
            TeacherAvailability::available("T1", Weekday::Monday, TimeWindow::new(hm(8, 0), hm(12, 0))),
            TeacherAvailability::available("T1", Weekday::Friday, TimeWindow::new(hm(12, 0), hm(8, 0))),
        ];
        let errors = validate_availability(&records).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidInterval);
        assert!(errors[0].message.contains("Friday"));
    }
}
