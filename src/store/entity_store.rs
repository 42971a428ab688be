//! EntityStore - abstract storage capability consumed by the engine.

use super::{Record, StoreError, UnitOfWork, Versioned};

/// Abstract storage for records.
///
/// Lookups by id return soft-deleted records too, so historical references
/// stay resolvable; the [`Records`](super::Records) wrapper adds the "live"
/// variants that filter them out.
pub trait EntityStore: Send + Sync {
    /// Allocate the next identifier for a collection. Identifiers are never
    /// reused, even when the write that claimed one is rolled back.
    fn next_id(&self, collection: &str) -> Result<u64, StoreError>;

    /// Get a record by ID. Returns None if it was never stored or was
    /// physically deleted.
    fn get_record<R: Record>(&self, id: u64) -> Result<Option<Versioned<R>>, StoreError>;

    /// Insert a new record, assigning it a fresh identifier.
    fn insert_record<R: Record>(&self, record: R) -> Result<Versioned<R>, StoreError>;

    /// Update an existing record with optimistic concurrency control.
    fn update_record<R: Record>(
        &self,
        record: &R,
        expected_version: u64,
    ) -> Result<Versioned<R>, StoreError>;

    /// Find records matching a predicate, ordered by id. A stored record
    /// that no longer decodes fails the whole lookup.
    fn find_records<R: Record>(
        &self,
        predicate: &dyn Fn(&R) -> bool,
    ) -> Result<Vec<Versioned<R>>, StoreError>;

    /// Count records matching a predicate.
    fn count_records<R: Record>(&self, predicate: &dyn Fn(&R) -> bool)
        -> Result<usize, StoreError>;

    /// Apply every staged write of a unit of work, or none of them.
    fn apply(&self, unit: UnitOfWork) -> Result<(), StoreError>;
}
