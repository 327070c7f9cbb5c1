//! Hand-off of generated slots to durable storage.
//!
//! The core never opens or owns a transaction. The caller supplies one,
//! and [`save_timetable`] either commits every slot or none of them.

use tracing::{debug, error, info};

use crate::error::PersistError;
use crate::models::TimeSlot;

/// A caller-supplied transactional scope.
pub trait Transaction {
    /// Error raised by the underlying storage.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Stages one slot.
    fn add(&mut self, slot: &TimeSlot) -> Result<(), Self::Error>;

    /// Makes every staged slot durable.
    fn commit(&mut self) -> Result<(), Self::Error>;

    /// Discards every staged slot.
    fn rollback(&mut self);
}

/// Saves a batch of slots atomically.
///
/// # Returns
/// - `Ok(0)` if `slots` is empty (the transaction is not touched).
/// - `Ok(n)` with `n == slots.len()` after a successful commit.
/// - `Err(_)` after rolling back, if any add or the commit fails.
pub fn save_timetable<T: Transaction>(slots: &[TimeSlot], tx: &mut T) -> Result<usize, PersistError> {
    if slots.is_empty() {
        debug!("Nothing to save");
        return Ok(0);
    }

    for (index, slot) in slots.iter().enumerate() {
        if let Err(e) = tx.add(slot) {
            tx.rollback();
            error!(index, error = %e, "Failed to save timetable, rolled back");
            return Err(PersistError::Add {
                index,
                source: Box::new(e),
            });
        }
    }

    if let Err(e) = tx.commit() {
        tx.rollback();
        error!(error = %e, "Failed to commit timetable, rolled back");
        return Err(PersistError::Commit {
            source: Box::new(e),
        });
    }

    info!(count = slots.len(), "Timetable saved");
    Ok(slots.len())
}
