//! Timetable generation and load metrics.
//!
//! # Generator
//!
//! - **`TimetableGenerator`**: greedy randomized placement of weekly
//!   sessions on the grid, with a seedable RNG.
//!
//! # Metrics
//!
//! - **`TimetableKpi`**: weekly load per group, teacher and room.

mod generator;
mod kpi;

pub use generator::{
    FailedSession, FailureReason, GenerationRequest, GenerationResult, GroupScope,
    TimetableGenerator,
};
pub use kpi::TimetableKpi;
