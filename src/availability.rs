//! Busy/free queries for rooms, teachers and groups.
//!
//! An [`AvailabilityIndex`] answers "is this resource busy at this time?"
//! against two sources at once: slots already persisted in the store,
//! and slots accepted earlier in the current generation run. Callers
//! cannot tell the two apart.
//!
//! # Scope
//! One index per generation run. It borrows the store immutably and is
//! never shared between runs.

use std::collections::HashMap;

use crate::models::{ResourceKind, TimeSlot, TimeWindow, Weekday};
use crate::store::EntityStore;

/// Run-scoped occupancy index.
///
/// Accepted slots are keyed by (resource kind, resource ID, day) and
/// mapped to the windows occupied, in acceptance order.
#[derive(Debug)]
pub struct AvailabilityIndex<'a, S: EntityStore + ?Sized> {
    store: &'a S,
    accepted: HashMap<(ResourceKind, String, Weekday), Vec<TimeWindow>>,
}

impl<'a, S: EntityStore + ?Sized> AvailabilityIndex<'a, S> {
    /// Creates an index with no accepted slots.
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            accepted: HashMap::new(),
        }
    }

    /// Whether the resource has a persisted or accepted slot on `day`
    /// overlapping `window`.
    pub fn is_busy(&self, kind: ResourceKind, id: &str, day: Weekday, window: &TimeWindow) -> bool {
        let accepted_busy = self
            .accepted
            .get(&(kind, id.to_string(), day))
            .is_some_and(|ws| ws.iter().any(|w| w.overlaps(window)));
        if accepted_busy {
            return true;
        }

        self.store
            .timeslots_on(kind, id, day)
            .iter()
            .any(|s| s.window.overlaps(window))
    }

    /// Records a slot so later queries see its room, teacher and group busy.
    pub fn accept(&mut self, slot: &TimeSlot) {
        for kind in [ResourceKind::Room, ResourceKind::Teacher, ResourceKind::Group] {
            if let Some(id) = slot.resource_id(kind) {
                self.accepted
                    .entry((kind, id.to_string(), slot.day))
                    .or_default()
                    .push(slot.window);
            }
        }
    }

    /// Number of slots accepted in this run.
    pub fn accepted_count(&self) -> usize {
        self.accepted
            .iter()
            .filter(|((kind, _, _), _)| *kind == ResourceKind::Room)
            .map(|(_, ws)| ws.len())
            .sum()
    }
}

/// Whether a teacher's declared availability permits teaching during
/// `window` on `day`.
///
/// # Rules
/// 1. Records on `day`: at least one must be available and cover `window`.
/// 2. No record on `day` but records on other days: unavailable.
/// 3. No record at all: unrestricted.
pub fn teacher_is_available<S: EntityStore + ?Sized>(
    store: &S,
    teacher_id: &str,
    day: Weekday,
    window: &TimeWindow,
) -> bool {
    let records = store.availability_on(teacher_id, day);
    if records.is_empty() {
        return !store.has_availability(teacher_id);
    }
    records.iter().any(|a| a.permits(window))
}
