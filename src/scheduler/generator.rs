//! Greedy randomized timetable generator.
//!
//! # Algorithm
//!
//! For every (group, course) pair in scope, once per weekly session:
//! 1. Keep the rooms whose type matches the course's lab requirement.
//! 2. Shuffle those rooms and the day order.
//! 3. Give up immediately if the course has no eligible teacher.
//! 4. For each day, try the candidate starts in shuffled order. Skip a
//!    start if the session is empty, would run past the end of the day, or
//!    the group is busy; otherwise take the first free room and the first eligible
//!    teacher who is free and available.
//! 5. Accept the first complete placement and move on.
//!
//! A session that finds no placement is recorded as a failure; the run
//! never aborts. Placements are never revisited, so an early session can
//! crowd out a later one.
//!
//! # Determinism
//! All shuffles draw from one RNG seeded by the request. Same store,
//! same request, same seed: same timetable.
//!
//! # Complexity
//! O(s * d * t * (r + k)) availability queries, where s = sessions,
//! d = days, t = candidate starts, r = rooms, k = eligible teachers.

use std::fmt;

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::availability::{teacher_is_available, AvailabilityIndex};
use crate::config::GeneratorConfig;
use crate::error::{GenerationError, PersistError};
use crate::models::{Course, Group, ResourceKind, Room, TimeSlot, TimeWindow};
use crate::persistence::{save_timetable, Transaction};
use crate::store::EntityStore;

/// Which groups a run schedules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupScope {
    /// Every group of the request's department.
    Department,
    /// One group.
    Group(String),
}

impl GroupScope {
    /// Maps a numeric group selector, where `0` means the whole department.
    pub fn from_selector(group_id: u64) -> Self {
        if group_id == 0 {
            GroupScope::Department
        } else {
            GroupScope::Group(group_id.to_string())
        }
    }
}

/// Input container for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Department whose groups are scheduled (for [`GroupScope::Department`]).
    pub department_id: String,
    /// Semester label.
    pub semester: String,
    /// Term start. Informational.
    pub start_date: Option<NaiveDate>,
    /// Term end. Informational.
    pub end_date: Option<NaiveDate>,
    /// Groups to schedule.
    pub scope: GroupScope,
    /// RNG seed for day, start-time and room shuffles.
    pub seed: u64,
}

impl GenerationRequest {
    /// Creates a request for a whole department with seed 0.
    pub fn new(department_id: impl Into<String>, semester: impl Into<String>) -> Self {
        Self {
            department_id: department_id.into(),
            semester: semester.into(),
            start_date: None,
            end_date: None,
            scope: GroupScope::Department,
            seed: 0,
        }
    }

    /// Restricts the run to one group.
    pub fn for_group(mut self, group_id: impl Into<String>) -> Self {
        self.scope = GroupScope::Group(group_id.into());
        self
    }

    /// Sets the scope.
    pub fn with_scope(mut self, scope: GroupScope) -> Self {
        self.scope = scope;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the term dates.
    pub fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    fn describe_scope(&self) -> String {
        match &self.scope {
            GroupScope::Department => format!("department '{}'", self.department_id),
            GroupScope::Group(id) => format!("group '{id}'"),
        }
    }
}

/// Why a session could not be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The course lists no (known) teacher.
    NoTeacherAssigned,
    /// Every day, start, room and teacher combination was rejected.
    NoValidSlot,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::NoTeacherAssigned => f.write_str("No teacher assigned to this course"),
            FailureReason::NoValidSlot => f.write_str("Unable to find a valid time slot"),
        }
    }
}

/// One session the run could not place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedSession {
    /// Course name.
    pub course: String,
    /// Group name.
    pub group: String,
    /// Why placement failed.
    pub reason: FailureReason,
}

/// Output of a generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Number of sessions placed.
    pub generated: usize,
    /// Number of sessions not placed.
    pub failed: usize,
    /// Placed sessions, in placement order.
    pub timeslots: Vec<TimeSlot>,
    /// One entry per session not placed.
    pub conflicts: Vec<FailedSession>,
}

impl GenerationResult {
    /// Whether every required session was placed.
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }

    /// Hands the placed sessions to a caller-supplied transaction.
    ///
    /// See [`save_timetable`].
    pub fn save<T: Transaction>(&self, tx: &mut T) -> Result<usize, PersistError> {
        save_timetable(&self.timeslots, tx)
    }
}

/// Greedy randomized timetable generator.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Course, Group, Room, Teacher};
/// use u_timetable::scheduler::{GenerationRequest, TimetableGenerator};
/// use u_timetable::store::InMemoryStore;
///
/// let store = InMemoryStore::new()
///     .with_teacher(Teacher::new("T1", "Ada Lovelace"))
///     .with_course(Course::new("C1").with_name("Algebra").with_teacher("T1"))
///     .with_room(Room::standard("R1").with_capacity(30))
///     .with_group(Group::new("G1", "CS").with_course("C1"));
///
/// let request = GenerationRequest::new("CS", "2024-S1").with_seed(42);
/// let result = TimetableGenerator::new().generate(&store, &request).unwrap();
/// assert_eq!(result.generated, 1);
/// assert_eq!(result.failed, 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimetableGenerator {
    config: GeneratorConfig,
}

impl TimetableGenerator {
    /// Creates a generator on the default weekly grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the weekly grid.
    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds a timetable for the requested scope.
    ///
    /// Slots already in the store are treated as busy. Nothing is written
    /// back; use [`GenerationResult::save`] to persist the result.
    ///
    /// # Errors
    /// [`GenerationError::NoGroupsFound`] if the scope matches no group.
    pub fn generate<S: EntityStore + ?Sized>(
        &self,
        store: &S,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        let groups = match &request.scope {
            GroupScope::Department => store.groups_in_department(&request.department_id),
            GroupScope::Group(id) => store.group(id).into_iter().collect(),
        };
        if groups.is_empty() {
            return Err(GenerationError::NoGroupsFound {
                scope: request.describe_scope(),
            });
        }

        let mut run = Run {
            store,
            config: &self.config,
            index: AvailabilityIndex::new(store),
            rng: StdRng::seed_from_u64(request.seed),
            rooms: store.rooms(),
            slot_starts: self.config.slot_starts(),
        };
        let mut result = GenerationResult::default();

        for group in groups {
            for course in store.courses_for_group(group) {
                for _ in 0..course.weekly_sessions {
                    match run.place_session(group, course) {
                        Ok(slot) => {
                            debug!(
                                course = %course.id,
                                group = %group.id,
                                room = %slot.room_id,
                                teacher = %slot.teacher_id,
                                day = %slot.day,
                                time = %slot.window,
                                "Session placed"
                            );
                            run.index.accept(&slot);
                            result.timeslots.push(slot);
                            result.generated += 1;
                        }
                        Err(reason) => {
                            debug!(course = %course.id, group = %group.id, %reason, "Session not placed");
                            result.failed += 1;
                            result.conflicts.push(FailedSession {
                                course: course.name.clone(),
                                group: group.name.clone(),
                                reason,
                            });
                        }
                    }
                }
            }
        }

        info!(
            semester = %request.semester,
            scope = %request.describe_scope(),
            generated = result.generated,
            failed = result.failed,
            accepted = run.index.accepted_count(),
            "Timetable generation finished"
        );
        Ok(result)
    }
}

/// State of one generation run.
struct Run<'a, S: EntityStore + ?Sized> {
    store: &'a S,
    config: &'a GeneratorConfig,
    index: AvailabilityIndex<'a, S>,
    rng: StdRng,
    rooms: Vec<&'a Room>,
    slot_starts: Vec<u32>,
}

impl<S: EntityStore + ?Sized> Run<'_, S> {
    /// Finds a placement for one session of `course` for `group`.
    fn place_session(&mut self, group: &Group, course: &Course) -> Result<TimeSlot, FailureReason> {
        let duration = course.session_minutes(self.config.default_duration_min);

        let mut rooms: Vec<&Room> = self
            .rooms
            .iter()
            .copied()
            .filter(|r| r.suits(course.requires_lab))
            .collect();
        rooms.shuffle(&mut self.rng);

        let mut days = self.config.days.clone();
        days.shuffle(&mut self.rng);

        let teachers = self.store.teachers_for_course(course);
        if teachers.is_empty() {
            return Err(FailureReason::NoTeacherAssigned);
        }

        for day in days {
            let mut starts = self.slot_starts.clone();
            starts.shuffle(&mut self.rng);

            for start in starts {
                let window = TimeWindow::starting_at(start, duration);
                if !window.is_valid() || window.end_min > self.config.day_end_min {
                    continue;
                }
                if self.index.is_busy(ResourceKind::Group, &group.id, day, &window) {
                    continue;
                }

                let Some(room) = rooms
                    .iter()
                    .find(|r| !self.index.is_busy(ResourceKind::Room, &r.id, day, &window))
                else {
                    continue;
                };

                let Some(teacher) = teachers.iter().find(|t| {
                    !self.index.is_busy(ResourceKind::Teacher, &t.id, day, &window)
                        && teacher_is_available(self.store, &t.id, day, &window)
                }) else {
                    continue;
                };

                return Ok(TimeSlot::new(
                    &course.id,
                    &group.id,
                    &room.id,
                    &teacher.id,
                    day,
                    window,
                ));
            }
        }

        Err(FailureReason::NoValidSlot)
    }
}
