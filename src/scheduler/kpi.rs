//! Timetable load metrics (KPIs).
//!
//! Computes weekly load indicators from a set of slots.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Group load | Sum of session minutes per group |
//! | Teacher load | Sum of session minutes per teacher |
//! | Room load | Sum of session minutes per room |
//! | Room utilization | Room load / weekly grid minutes |
//! | Avg utilization | Mean utilization over rooms in use |

use std::collections::HashMap;

use crate::models::TimeSlot;

/// Weekly load indicators.
///
/// All durations are in minutes.
#[derive(Debug, Clone, Default)]
pub struct TimetableKpi {
    /// Number of slots measured.
    pub slot_count: usize,
    /// Weekly minutes per group.
    pub minutes_by_group: HashMap<String, u32>,
    /// Weekly minutes per teacher.
    pub minutes_by_teacher: HashMap<String, u32>,
    /// Weekly minutes per room.
    pub minutes_by_room: HashMap<String, u32>,
    /// Per-room utilization (0.0..1.0 on a consistent timetable).
    pub utilization_by_room: HashMap<String, f64>,
    /// Average room utilization over rooms hosting at least one slot.
    pub avg_utilization: f64,
}

impl TimetableKpi {
    /// Computes KPIs.
    ///
    /// # Arguments
    /// * `slots` - The slots to measure.
    /// * `grid_minutes` - Teachable minutes per week, the utilization horizon.
    ///   Zero disables utilization.
    pub fn calculate<'a, I>(slots: I, grid_minutes: u32) -> Self
    where
        I: IntoIterator<Item = &'a TimeSlot>,
    {
        let mut kpi = Self::default();

        for slot in slots {
            let minutes = slot.duration_min();
            kpi.slot_count += 1;
            if let Some(group_id) = &slot.group_id {
                *kpi.minutes_by_group.entry(group_id.clone()).or_insert(0) += minutes;
            }
            *kpi.minutes_by_teacher.entry(slot.teacher_id.clone()).or_insert(0) += minutes;
            *kpi.minutes_by_room.entry(slot.room_id.clone()).or_insert(0) += minutes;
        }

        if grid_minutes > 0 {
            kpi.utilization_by_room = kpi
                .minutes_by_room
                .iter()
                .map(|(id, &busy)| (id.clone(), busy as f64 / grid_minutes as f64))
                .collect();
        }

        kpi.avg_utilization = if kpi.utilization_by_room.is_empty() {
            0.0
        } else {
            let sum: f64 = kpi.utilization_by_room.values().sum();
            sum / kpi.utilization_by_room.len() as f64
        };

        kpi
    }

    /// Weekly minutes of a group (0 if it has no slot).
    pub fn group_minutes(&self, group_id: &str) -> u32 {
        self.minutes_by_group.get(group_id).copied().unwrap_or(0)
    }

    /// Weekly hours of a group.
    pub fn weekly_hours(&self, group_id: &str) -> f64 {
        self.group_minutes(group_id) as f64 / 60.0
    }
}
