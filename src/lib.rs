//! Weekly timetabling for schools and universities.
//!
//! Places weekly class sessions (course x group x teacher x room x day x
//! time) on a fixed Monday-to-Saturday grid, and audits any set of
//! sessions for constraint violations.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Course`, `Teacher`, `Room`, `Group`,
//!   `TeacherAvailability`, `TimeSlot`, `TimeWindow`, `Conflict`
//! - **`store`**: Read-only entity queries (`EntityStore`) and an in-memory store
//! - **`availability`**: Run-scoped busy/free index and the teacher availability rule
//! - **`scheduler`**: Greedy randomized generator and load KPIs
//! - **`detector`**: Six-check conflict detector
//! - **`persistence`**: All-or-nothing hand-off of generated sessions
//! - **`validation`**: Catalog integrity checks (duplicate IDs, dangling references)
//! - **`config`**: Grid and threshold parameters
//!
//! # Architecture
//!
//! Entities are owned by the surrounding application and read through
//! [`store::EntityStore`]. Generation never writes to the store: the
//! result is handed to a caller-supplied [`persistence::Transaction`].
//! Detection is independent of generation and never mutates anything.

pub mod availability;
pub mod config;
pub mod detector;
pub mod error;
pub mod models;
pub mod persistence;
pub mod scheduler;
pub mod store;
pub mod validation;
