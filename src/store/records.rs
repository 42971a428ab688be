//! Records - typed accessor for record CRUD operations.

use std::marker::PhantomData;

use chrono::Utc;

use super::{EntityStore, Record, StoreError, Versioned};

/// Typed repository wrapper for accessing records of a specific type.
///
/// The `*_live` methods skip soft-deleted records; the plain ones do not.
pub struct Records<'a, S, R> {
    store: &'a S,
    _marker: PhantomData<R>,
}

impl<'a, S: EntityStore, R: Record> Records<'a, S, R> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Get a record by ID, soft-deleted or not.
    pub fn get(&self, id: u64) -> Result<Option<Versioned<R>>, StoreError> {
        self.store.get_record(id)
    }

    /// Get a record by ID unless it has been soft-deleted.
    pub fn get_live(&self, id: u64) -> Result<Option<Versioned<R>>, StoreError> {
        Ok(self.get(id)?.filter(|versioned| versioned.data.is_live()))
    }

    /// Insert a new record, assigning it a fresh id.
    pub fn insert(&self, record: R) -> Result<Versioned<R>, StoreError> {
        self.store.insert_record(record)
    }

    /// Update an existing record with optimistic concurrency.
    pub fn update(&self, record: &R, expected_version: u64) -> Result<Versioned<R>, StoreError> {
        self.store.update_record(record, expected_version)
    }

    /// Mark a live record deleted. Returns false when there was no live
    /// record to delete.
    pub fn soft_delete(&self, id: u64) -> Result<bool, StoreError> {
        let Some(mut versioned) = self.get_live(id)? else {
            return Ok(false);
        };
        versioned.data.set_deleted_at(Some(Utc::now()));
        self.update(&versioned.data, versioned.version)?;
        Ok(true)
    }

    /// Find records matching a predicate, ordered by id.
    pub fn find(&self, predicate: &dyn Fn(&R) -> bool) -> Result<Vec<Versioned<R>>, StoreError> {
        self.store.find_records(predicate)
    }

    /// Find live records matching a predicate, ordered by id.
    pub fn find_live(
        &self,
        predicate: &dyn Fn(&R) -> bool,
    ) -> Result<Vec<Versioned<R>>, StoreError> {
        self.store
            .find_records(&|record: &R| record.is_live() && predicate(record))
    }

    /// Count live records matching a predicate.
    pub fn count_live(&self, predicate: &dyn Fn(&R) -> bool) -> Result<usize, StoreError> {
        self.store
            .count_records(&|record: &R| record.is_live() && predicate(record))
    }
}

/// Extension trait for typed record access on any EntityStore.
pub trait RecordsExt: EntityStore + Sized {
    /// Get a typed record repository.
    fn records<R: Record>(&self) -> Records<'_, Self, R> {
        Records::new(self)
    }
}

impl<S: EntityStore> RecordsExt for S {}
