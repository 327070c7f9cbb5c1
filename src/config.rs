//! Tunable parameters for generation and detection.
//!
//! Both structs deserialize from partial documents: any field left out
//! takes its default value.
//!
//! | Parameter | Default |
//! |-----------|---------|
//! | Daily window | 08:00 to 17:00 |
//! | Candidate starts | every 60 minutes, 08:00 through 17:00 |
//! | Session length | 60 minutes |
//! | Teaching days | Monday to Saturday |
//! | Weekly group load | 18 h to 24 h inclusive |
//! | Unknown group size | 30 students |

use serde::{Deserialize, Serialize};

use crate::models::{hm, Weekday};

/// Weekly grid used by the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// First candidate start (minutes since midnight).
    pub day_start_min: u32,
    /// Latest allowed session end (minutes since midnight).
    pub day_end_min: u32,
    /// Spacing between candidate starts (minutes).
    pub slot_step_min: u32,
    /// Session length for courses without an explicit duration.
    pub default_duration_min: u32,
    /// Days sessions may be placed on.
    pub days: Vec<Weekday>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            day_start_min: hm(8, 0),
            day_end_min: hm(17, 0),
            slot_step_min: 60,
            default_duration_min: 60,
            days: Weekday::ALL.to_vec(),
        }
    }
}

impl GeneratorConfig {
    /// Candidate start times, from the day start through the day end inclusive.
    ///
    /// The last start can never fit a session of positive length; it is
    /// kept so that the candidate set matches the published grid.
    pub fn slot_starts(&self) -> Vec<u32> {
        let step = self.slot_step_min.max(1) as usize;
        (self.day_start_min..=self.day_end_min).step_by(step).collect()
    }

    /// Total teachable minutes per week on this grid.
    pub fn weekly_grid_minutes(&self) -> u32 {
        self.day_end_min.saturating_sub(self.day_start_min) * self.days.len() as u32
    }
}

/// Thresholds used by the conflict detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Minimum weekly minutes per group (inclusive).
    pub min_weekly_minutes: u32,
    /// Maximum weekly minutes per group (inclusive).
    pub max_weekly_minutes: u32,
    /// Student count assumed for groups that don't record one.
    pub default_student_count: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_weekly_minutes: 18 * 60,
            max_weekly_minutes: 24 * 60,
            default_student_count: 30,
        }
    }
}

impl DetectorConfig {
    /// Whether a weekly load lies inside the allowed band.
    pub fn workload_ok(&self, minutes: u32) -> bool {
        (self.min_weekly_minutes..=self.max_weekly_minutes).contains(&minutes)
    }
}
