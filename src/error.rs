//! Error types.
//!
//! Soft scheduling failures and detected conflicts are values, not errors.
//! The types here cover what can actually go wrong: an empty generation
//! scope and a failed hand-off to persistence.

use thiserror::Error;

/// Errors from a generation run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
    /// The requested scope resolved to no group.
    #[error("No group found for {scope}")]
    NoGroupsFound { scope: String },
}

/// Errors from the in-memory store's transactions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A slot references an entity the store doesn't know.
    #[error("Unknown {kind} '{id}'")]
    UnknownReference { kind: &'static str, id: String },

    /// A slot's interval is empty or inverted.
    #[error("Invalid interval {start_min}..{end_min}")]
    InvalidInterval { start_min: u32, end_min: u32 },
}

/// Errors from saving a generated timetable.
///
/// The transaction has always been rolled back when one of these is returned.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Staging a slot failed.
    #[error("Failed to add time slot {index}: {source}")]
    Add {
        index: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The commit itself failed.
    #[error("Commit failed: {source}")]
    Commit {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
