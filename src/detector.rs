//! Conflict detection over a complete set of time slots.
//!
//! Runs six independent checks against the slots currently in the store
//! (queried fresh on every call) and collects every violation found:
//!
//! | Check | Rule | Severity |
//! |-------|------|----------|
//! | Room | two slots, same room, same day, overlapping | critical |
//! | Teacher | two slots, same teacher, same day, overlapping | critical |
//! | Group | two slots, same group, same day, overlapping | critical |
//! | Availability | slot outside the teacher's declared windows | high |
//! | Workload | group weekly load outside the allowed band | medium |
//! | Capacity | group larger than the room | high |
//!
//! No check short-circuits another. The detector never mutates the store.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::availability::teacher_is_available;
use crate::config::DetectorConfig;
use crate::models::{Conflict, ConflictReport, ResourceKind, TimeSlot};
use crate::scheduler::TimetableKpi;
use crate::store::EntityStore;

/// Conflict detector.
///
/// Each `detect_*` method appends its findings to the detector's
/// accumulator and returns only what it found itself.
/// [`ConflictDetector::detect_all`] resets the accumulator first.
///
/// # Example
///
/// ```
/// use u_timetable::detector::ConflictDetector;
/// use u_timetable::models::{hm, Room, TimeSlot, TimeWindow, Weekday};
/// use u_timetable::store::InMemoryStore;
///
/// let window = TimeWindow::new(hm(10, 0), hm(11, 0));
/// let store = InMemoryStore::new()
///     .with_room(Room::standard("R1").with_capacity(40))
///     .with_timeslot(TimeSlot::new("C1", "G1", "R1", "T1", Weekday::Monday, window))
///     .with_timeslot(TimeSlot::new("C2", "G2", "R1", "T2", Weekday::Monday, window));
///
/// let mut detector = ConflictDetector::new(&store);
/// assert_eq!(detector.detect_room_conflicts().len(), 1);
/// ```
#[derive(Debug)]
pub struct ConflictDetector<'a, S: EntityStore + ?Sized> {
    store: &'a S,
    config: DetectorConfig,
    conflicts: Vec<Conflict>,
}

impl<'a, S: EntityStore + ?Sized> ConflictDetector<'a, S> {
    /// Creates a detector with default thresholds.
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            config: DetectorConfig::default(),
            conflicts: Vec::new(),
        }
    }

    /// Sets the thresholds.
    pub fn with_config(mut self, config: DetectorConfig) -> Self {
        self.config = config;
        self
    }

    /// Everything accumulated so far.
    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    /// Runs all six checks in a fixed order and summarizes them.
    ///
    /// Order: room, teacher, group, availability, workload, capacity.
    pub fn detect_all(&mut self) -> ConflictReport {
        self.conflicts.clear();
        self.detect_room_conflicts();
        self.detect_teacher_conflicts();
        self.detect_group_conflicts();
        self.detect_availability_conflicts();
        self.detect_workload_violations();
        self.detect_capacity_conflicts();

        let report = ConflictReport::from_conflicts(self.conflicts.clone());
        info!(
            total = report.total,
            critical = report.critical,
            high = report.high,
            medium = report.medium,
            "Conflict detection finished"
        );
        report
    }

    /// Rooms booked twice at overlapping times.
    pub fn detect_room_conflicts(&mut self) -> Vec<Conflict> {
        self.detect_pairwise(ResourceKind::Room)
    }

    /// Teachers booked twice at overlapping times.
    pub fn detect_teacher_conflicts(&mut self) -> Vec<Conflict> {
        self.detect_pairwise(ResourceKind::Teacher)
    }

    /// Groups booked twice at overlapping times. Slots without a group are ignored.
    pub fn detect_group_conflicts(&mut self) -> Vec<Conflict> {
        self.detect_pairwise(ResourceKind::Group)
    }

    /// Slots placed outside their teacher's declared availability.
    ///
    /// Teachers without any availability record are unrestricted.
    pub fn detect_availability_conflicts(&mut self) -> Vec<Conflict> {
        let store = self.store;
        let found: Vec<Conflict> = store
            .timeslots()
            .into_iter()
            .filter(|s| !teacher_is_available(store, &s.teacher_id, s.day, &s.window))
            .map(|s| Conflict::AvailabilityConflict {
                teacher: self.teacher_name(&s.teacher_id),
                course: self.course_name(&s.course_id),
                day: s.day,
                time: s.window,
            })
            .collect();
        self.record(found)
    }

    /// Groups whose weekly load falls outside the configured band.
    ///
    /// Every group in the store is checked, including groups with no slot.
    pub fn detect_workload_violations(&mut self) -> Vec<Conflict> {
        let store = self.store;
        let kpi = TimetableKpi::calculate(store.timeslots(), 0);
        let min_hours = self.config.min_weekly_minutes as f64 / 60.0;
        let max_hours = self.config.max_weekly_minutes as f64 / 60.0;

        let found: Vec<Conflict> = store
            .groups()
            .into_iter()
            .filter(|g| !self.config.workload_ok(kpi.group_minutes(&g.id)))
            .map(|g| Conflict::WorkloadConflict {
                group: display_name(&g.name, &g.id),
                hours: kpi.weekly_hours(&g.id),
                min_hours,
                max_hours,
            })
            .collect();
        self.record(found)
    }

    /// Slots whose group doesn't fit in the room.
    ///
    /// Unknown group size counts as the configured default; a slot without
    /// a group needs no seat. Slots in unknown rooms are skipped.
    pub fn detect_capacity_conflicts(&mut self) -> Vec<Conflict> {
        let store = self.store;
        let mut found = Vec::new();

        for slot in store.timeslots() {
            let Some(room) = store.room(&slot.room_id) else {
                debug!(room_id = %slot.room_id, "Skipping capacity check for unknown room");
                continue;
            };
            let required = match &slot.group_id {
                Some(group_id) => store
                    .group(group_id)
                    .map(|g| g.students_or(self.config.default_student_count))
                    .unwrap_or(self.config.default_student_count),
                None => 0,
            };
            if required > room.capacity {
                found.push(Conflict::CapacityConflict {
                    room: display_name(&room.name, &room.id),
                    required,
                    capacity: room.capacity,
                });
            }
        }

        self.record(found)
    }

    /// Scans every slot against every other slot sharing a resource of
    /// `kind`. Each unordered pair is reported once, whatever the scan order.
    fn detect_pairwise(&mut self, kind: ResourceKind) -> Vec<Conflict> {
        let store = self.store;
        let slots = store.timeslots();
        let mut checked_pairs: HashSet<(usize, usize)> = HashSet::new();
        let mut found = Vec::new();

        for (i, slot) in slots.iter().enumerate() {
            if slot.resource_id(kind).is_none() {
                continue;
            }
            for (j, other) in slots.iter().enumerate() {
                if i == j || !slot.clashes_with(other, kind) {
                    continue;
                }
                if !checked_pairs.insert((i.min(j), i.max(j))) {
                    continue;
                }
                found.push(self.pair_conflict(kind, slot, other));
            }
        }

        self.record(found)
    }

    fn pair_conflict(&self, kind: ResourceKind, slot: &TimeSlot, other: &TimeSlot) -> Conflict {
        let slot1_course = self.course_name(&slot.course_id);
        let slot2_course = self.course_name(&other.course_id);
        let day = slot.day;
        match kind {
            ResourceKind::Room => Conflict::RoomConflict {
                room: self.room_name(&slot.room_id),
                day,
                slot1_course,
                slot2_course,
            },
            ResourceKind::Teacher => Conflict::TeacherConflict {
                teacher: self.teacher_name(&slot.teacher_id),
                day,
                slot1_course,
                slot2_course,
            },
            ResourceKind::Group => Conflict::GroupConflict {
                group: self.group_name(slot.group_id.as_deref().unwrap_or_default()),
                day,
                slot1_course,
                slot2_course,
            },
        }
    }

    fn record(&mut self, found: Vec<Conflict>) -> Vec<Conflict> {
        self.conflicts.extend(found.iter().cloned());
        found
    }

    fn room_name(&self, id: &str) -> String {
        self.store
            .room(id)
            .map_or_else(|| id.to_string(), |r| display_name(&r.name, id))
    }

    fn teacher_name(&self, id: &str) -> String {
        self.store
            .teacher(id)
            .map_or_else(|| id.to_string(), |t| display_name(&t.full_name, id))
    }

    fn group_name(&self, id: &str) -> String {
        self.store
            .group(id)
            .map_or_else(|| id.to_string(), |g| display_name(&g.name, id))
    }

    fn course_name(&self, id: &str) -> String {
        self.store
            .course(id)
            .map_or_else(|| id.to_string(), |c| display_name(&c.name, id))
    }
}

/// Entity name, or its ID when the name is blank.
fn display_name(name: &str, id: &str) -> String {
    if name.is_empty() {
        id.to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        hm, ConflictKind, Course, Group, Room, Teacher, TeacherAvailability, TimeWindow, Weekday,
    };
    use crate::store::InMemoryStore;

    fn w(start: u32, end: u32) -> TimeWindow {
        TimeWindow::new(start, end)
    }

    fn base_store() -> InMemoryStore {
        InMemoryStore::new()
            .with_course(Course::new("C1").with_name("Algebra"))
            .with_course(Course::new("C2").with_name("Physics"))
            .with_course(Course::new("C3").with_name("History"))
            .with_teacher(Teacher::new("T1", "Ada Lovelace"))
            .with_teacher(Teacher::new("T2", "Alan Turing"))
            .with_room(Room::standard("R1").with_name("A101").with_capacity(40))
            .with_room(Room::standard("R2").with_name("A102").with_capacity(40))
            .with_group(Group::new("G1", "CS").with_name("CS-1A").with_students(25))
            .with_group(Group::new("G2", "CS").with_name("CS-1B").with_students(25))
    }

    fn slot(course: &str, group: &str, room: &str, teacher: &str, window: TimeWindow) -> TimeSlot {
        TimeSlot::new(course, group, room, teacher, Weekday::Monday, window)
    }

    #[test]
    fn test_room_conflict_reported_once() {
        let store = base_store()
            .with_timeslot(slot("C1", "G1", "R1", "T1", w(hm(10, 0), hm(11, 0))))
            .with_timeslot(slot("C2", "G2", "R1", "T2", w(hm(10, 30), hm(11, 30))));
        let mut detector = ConflictDetector::new(&store);

        let found = detector.detect_room_conflicts();
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0],
            Conflict::RoomConflict {
                room: "A101".into(),
                day: Weekday::Monday,
                slot1_course: "Algebra".into(),
                slot2_course: "Physics".into(),
            }
        );
    }

    #[test]
    fn test_three_way_room_clash_is_three_pairs() {
        let store = base_store()
            .with_timeslot(slot("C1", "G1", "R1", "T1", w(hm(10, 0), hm(12, 0))))
            .with_timeslot(slot("C2", "G2", "R1", "T2", w(hm(10, 0), hm(11, 0))))
            .with_timeslot(slot("C3", "G1", "R1", "T2", w(hm(11, 0), hm(12, 0))));
        let mut detector = ConflictDetector::new(&store);
        // (1,2) and (1,3) overlap; (2,3) only touch
        assert_eq!(detector.detect_room_conflicts().len(), 2);
    }

    #[test]
    fn test_touching_slots_do_not_conflict() {
        let store = base_store()
            .with_timeslot(slot("C1", "G1", "R1", "T1", w(hm(10, 0), hm(11, 0))))
            .with_timeslot(slot("C2", "G1", "R1", "T1", w(hm(11, 0), hm(12, 0))));
        let mut detector = ConflictDetector::new(&store);
        assert!(detector.detect_room_conflicts().is_empty());
        assert!(detector.detect_teacher_conflicts().is_empty());
        assert!(detector.detect_group_conflicts().is_empty());
    }

    #[test]
    fn test_teacher_conflict() {
        let store = base_store()
            .with_timeslot(slot("C1", "G1", "R1", "T1", w(hm(9, 0), hm(10, 0))))
            .with_timeslot(slot("C2", "G2", "R2", "T1", w(hm(9, 0), hm(10, 0))));
        let mut detector = ConflictDetector::new(&store);

        let found = detector.detect_teacher_conflicts();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind(), ConflictKind::TeacherConflict);
        assert!(found[0].description().contains("Ada Lovelace"));
        assert!(detector.detect_room_conflicts().is_empty());
    }

    #[test]
    fn test_group_conflict_ignores_groupless_slots() {
        let store = base_store()
            .with_timeslot(slot("C1", "G1", "R1", "T1", w(hm(9, 0), hm(10, 0))))
            .with_timeslot(slot("C2", "G1", "R2", "T2", w(hm(9, 0), hm(10, 0))))
            .with_timeslot(slot("C3", "G1", "R2", "T2", w(hm(14, 0), hm(15, 0))).without_group())
            .with_timeslot(slot("C3", "G1", "R1", "T1", w(hm(14, 0), hm(15, 0))).without_group());
        let mut detector = ConflictDetector::new(&store);

        let found = detector.detect_group_conflicts();
        assert_eq!(found.len(), 1);
        assert!(matches!(&found[0], Conflict::GroupConflict { group, .. } if group == "CS-1A"));
    }

    #[test]
    fn test_availability_conflict() {
        let store = base_store()
            .with_availability(TeacherAvailability::available(
                "T1",
                Weekday::Monday,
                w(hm(8, 0), hm(12, 0)),
            ))
            .with_timeslot(slot("C1", "G1", "R1", "T1", w(hm(9, 0), hm(10, 0))))
            .with_timeslot(slot("C2", "G1", "R1", "T1", w(hm(13, 0), hm(14, 0))))
            // T2 has no records: unrestricted
            .with_timeslot(slot("C3", "G2", "R2", "T2", w(hm(16, 0), hm(17, 0))));
        let mut detector = ConflictDetector::new(&store);

        let found = detector.detect_availability_conflicts();
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0],
            Conflict::AvailabilityConflict {
                teacher: "Ada Lovelace".into(),
                course: "Physics".into(),
                day: Weekday::Monday,
                time: w(hm(13, 0), hm(14, 0)),
            }
        );
    }

    /// Slots for G1 totalling `minutes`, spread over the week in 3-hour blocks.
    fn loaded_store(minutes: u32) -> InMemoryStore {
        let mut store = InMemoryStore::new().with_group(Group::new("G1", "CS").with_name("CS-1A"));
        let mut remaining = minutes;
        let mut i = 0;
        while remaining > 0 {
            let len = remaining.min(180);
            let day = Weekday::ALL[i % 6];
            let start = hm(8 + 4 * (i / 6) as u32, 0);
            store.timeslots.push(TimeSlot::new(
                "C1",
                "G1",
                "R1",
                "T1",
                day,
                TimeWindow::starting_at(start, len),
            ));
            remaining -= len;
            i += 1;
        }
        store
    }

    #[test]
    fn test_workload_boundaries_are_inclusive() {
        for minutes in [18 * 60, 24 * 60] {
            let store = loaded_store(minutes);
            let mut detector = ConflictDetector::new(&store);
            assert!(detector.detect_workload_violations().is_empty(), "{minutes} min");
        }
    }

    #[test]
    fn test_workload_outside_band() {
        for minutes in [18 * 60 - 1, 24 * 60 + 1] {
            let store = loaded_store(minutes);
            let mut detector = ConflictDetector::new(&store);
            let found = detector.detect_workload_violations();
            assert_eq!(found.len(), 1, "{minutes} min");
            assert!(matches!(
                &found[0],
                Conflict::WorkloadConflict { group, hours, .. }
                    if group == "CS-1A" && (hours - minutes as f64 / 60.0).abs() < 1e-10
            ));
        }
    }

    #[test]
    fn test_workload_group_without_slots() {
        let store = InMemoryStore::new().with_group(Group::new("G1", "CS"));
        let mut detector = ConflictDetector::new(&store);
        let found = detector.detect_workload_violations();
        assert_eq!(found.len(), 1);
        assert!(matches!(&found[0], Conflict::WorkloadConflict { group, hours, .. } if group == "G1" && *hours == 0.0));
    }

    #[test]
    fn test_capacity_default_student_count() {
        let store = InMemoryStore::new()
            .with_room(Room::standard("R1").with_name("Small").with_capacity(25))
            .with_group(Group::new("G1", "CS"))
            .with_timeslot(slot("C1", "G1", "R1", "T1", w(hm(8, 0), hm(9, 0))));
        let mut detector = ConflictDetector::new(&store);

        let found = detector.detect_capacity_conflicts();
        assert_eq!(
            found,
            vec![Conflict::CapacityConflict {
                room: "Small".into(),
                required: 30,
                capacity: 25,
            }]
        );
    }

    #[test]
    fn test_capacity_groupless_and_fitting_slots() {
        let store = InMemoryStore::new()
            .with_room(Room::standard("R1").with_capacity(25))
            .with_group(Group::new("G1", "CS").with_students(25))
            .with_timeslot(slot("C1", "G1", "R1", "T1", w(hm(8, 0), hm(9, 0))))
            .with_timeslot(slot("C1", "G1", "R1", "T1", w(hm(9, 0), hm(10, 0))).without_group());
        let mut detector = ConflictDetector::new(&store);
        assert!(detector.detect_capacity_conflicts().is_empty());
    }

    #[test]
    fn test_capacity_uses_configured_default() {
        let store = InMemoryStore::new()
            .with_room(Room::standard("R1").with_capacity(25))
            .with_group(Group::new("G1", "CS"))
            .with_timeslot(slot("C1", "G1", "R1", "T1", w(hm(8, 0), hm(9, 0))));
        let config = DetectorConfig {
            default_student_count: 20,
            ..DetectorConfig::default()
        };
        let mut detector = ConflictDetector::new(&store).with_config(config);
        assert!(detector.detect_capacity_conflicts().is_empty());
    }

    #[test]
    fn test_detect_all_accumulates_and_resets() {
        let store = base_store()
            .with_room(Room::standard("R3").with_name("Closet").with_capacity(10))
            .with_timeslot(slot("C1", "G1", "R3", "T1", w(hm(10, 0), hm(11, 0))))
            .with_timeslot(slot("C2", "G1", "R3", "T1", w(hm(10, 0), hm(11, 0))));
        let mut detector = ConflictDetector::new(&store);

        let report = detector.detect_all();
        // room + teacher + group pairs, two capacity, two groups under load
        assert_eq!(report.critical, 3);
        assert_eq!(report.high, 2);
        assert_eq!(report.medium, 2);
        assert_eq!(report.total, 7);
        assert_eq!(report.conflicts[0].kind(), ConflictKind::RoomConflict);
        assert_eq!(report.conflicts[1].kind(), ConflictKind::TeacherConflict);
        assert_eq!(report.conflicts[2].kind(), ConflictKind::GroupConflict);
        assert_eq!(detector.conflicts().len(), 7);

        // Running again yields the same report, not a doubled one
        let again = detector.detect_all();
        assert_eq!(again, report);
    }

    #[test]
    fn test_individual_checks_return_own_subset() {
        let store = base_store()
            .with_timeslot(slot("C1", "G1", "R1", "T1", w(hm(10, 0), hm(11, 0))))
            .with_timeslot(slot("C2", "G2", "R1", "T2", w(hm(10, 0), hm(11, 0))));
        let mut detector = ConflictDetector::new(&store);

        let rooms = detector.detect_room_conflicts();
        let workload = detector.detect_workload_violations();
        assert!(rooms.iter().all(|c| c.kind() == ConflictKind::RoomConflict));
        assert!(workload.iter().all(|c| c.kind() == ConflictKind::WorkloadConflict));
        assert_eq!(detector.conflicts().len(), rooms.len() + workload.len());
    }

    #[test]
    fn test_unknown_entities_fall_back_to_ids() {
        let store = InMemoryStore::new()
            .with_timeslot(slot("C8", "G8", "R8", "T8", w(hm(10, 0), hm(11, 0))))
            .with_timeslot(slot("C9", "G8", "R8", "T8", w(hm(10, 0), hm(11, 0))));
        let mut detector = ConflictDetector::new(&store);
        let found = detector.detect_room_conflicts();
        assert_eq!(
            found[0],
            Conflict::RoomConflict {
                room: "R8".into(),
                day: Weekday::Monday,
                slot1_course: "C8".into(),
                slot2_course: "C9".into(),
            }
        );
        // Unknown room: capacity can't be checked
        assert!(detector.detect_capacity_conflicts().is_empty());
    }
}
