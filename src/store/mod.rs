//! Entity store - durable, versioned storage for scoreline records.
//!
//! Records are serialized to JSON and kept under a `"COLLECTION:id"` key
//! together with a version that increments on every write. The version is
//! what guards concurrent writers: `update_record` and staged updates in a
//! [`UnitOfWork`] only succeed against the version they read.
//!
//! ## Example
//!
//! ```ignore
//! use scoreline::store::{InMemoryStore, RecordsExt};
//! use scoreline::domain::{NewTeam, Team};
//!
//! let store = InMemoryStore::new();
//! let persija = Team::create(NewTeam { name: "Persija".into(), ..Default::default() }, Utc::now())?;
//! let team = store.records::<Team>().insert(persija)?;
//! let live = store.records::<Team>().get_live(team.data.id)?;
//! ```

mod entity_store;
mod in_memory;
mod records;
mod unit_of_work;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Point in time used for record bookkeeping and schedules.
pub type Timestamp = DateTime<Utc>;

/// Trait for types that can be stored in an [`EntityStore`].
///
/// Usually derived with `#[derive(Record)]`.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection name for this record type (e.g. "teams", "goals").
    /// Maps to a table in SQL or a key prefix in KV stores.
    const COLLECTION: &'static str;

    /// Store-assigned identifier. Zero until the record is inserted.
    fn id(&self) -> u64;

    fn set_id(&mut self, id: u64);

    /// Soft-delete marker. Records without one are never soft-deleted.
    fn deleted_at(&self) -> Option<Timestamp> {
        None
    }

    fn set_deleted_at(&mut self, _at: Option<Timestamp>) {}

    /// Whether the record takes part in live lookups.
    fn is_live(&self) -> bool {
        self.deleted_at().is_none()
    }
}

/// A versioned wrapper around record data for optimistic concurrency control.
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
    pub data: T,
    pub version: u64,
}

/// Error type for entity store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Optimistic concurrency conflict.
    #[error("concurrency conflict on {collection}:{id} (expected version {expected}, actual {actual})")]
    ConcurrencyConflict {
        collection: String,
        id: u64,
        expected: u64,
        actual: u64,
    },
    /// Serialization/deserialization error.
    #[error("record serialization error: {0}")]
    Serde(String),
    /// Storage-level error.
    #[error("storage error: {0}")]
    Storage(String),
    /// Record not found.
    #[error("record not found: {collection}:{id}")]
    NotFound { collection: String, id: u64 },
    /// A staged uniqueness guard matched an existing record.
    #[error("unique constraint violated in {collection}")]
    UniqueViolation { collection: String },
}

pub(crate) fn record_key(collection: &str, id: u64) -> String {
    format!("{}:{}", collection, id)
}

pub use entity_store::EntityStore;
pub use in_memory::InMemoryStore;
pub use records::{Records, RecordsExt};
pub use unit_of_work::{Expect, UnitOfWork};
