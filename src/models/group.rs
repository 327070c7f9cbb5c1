//! Student group model.

use serde::{Deserialize, Serialize};

/// A cohort of students that attends its courses together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Unique group identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Owning department.
    pub department_id: String,
    /// Enrolled students. `None` = unknown, see [`Group::students_or`].
    pub student_count: Option<u32>,
    /// Enrolled course IDs, in scheduling order.
    pub course_ids: Vec<String>,
}

impl Group {
    /// Creates a group in a department.
    pub fn new(id: impl Into<String>, department_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            department_id: department_id.into(),
            student_count: None,
            course_ids: Vec::new(),
        }
    }

    /// Sets the group name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the enrolled student count.
    pub fn with_students(mut self, count: u32) -> Self {
        self.student_count = Some(count);
        self
    }

    /// Enrolls the group in a course.
    pub fn with_course(mut self, course_id: impl Into<String>) -> Self {
        self.course_ids.push(course_id.into());
        self
    }

    /// Student count, falling back to `default_count` when unknown.
    pub fn students_or(&self, default_count: u32) -> u32 {
        self.student_count.unwrap_or(default_count)
    }
}
