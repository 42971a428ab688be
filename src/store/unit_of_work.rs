//! UnitOfWork - stage writes across collections for one atomic apply.
//!
//! ## Example
//!
//! ```ignore
//! let unit = UnitOfWork::new()
//!     .update(&fixture, version)
//!     .delete_where::<Goal, _>(move |goal| goal.match_id == match_id)
//!     .insert(&goal);
//!
//! store.apply(unit)?;
//! ```
//!
//! Staged writes are applied in the order they were added. Serialization
//! failures are held back and reported by `apply`, so a builder chain never
//! needs `?` between steps.
//!
//! Uniqueness rules that span records are staged as guards:
//!
//! ```ignore
//! let unit = UnitOfWork::new()
//!     .require_none::<Player, _>(move |p| p.team_id == team_id && p.jersey_number == 9)
//!     .insert(&player);
//! ```

use std::fmt;

use super::{Record, StoreError};

/// Precondition on the stored version of a record when a staged put lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    /// The record must not exist yet.
    Absent,
    /// The stored version must equal this one.
    Version(u64),
}

/// Predicate over a stored record's bytes. Undecodable bytes are an error,
/// not a non-match.
type BytesPredicate = Box<dyn Fn(&[u8]) -> Result<bool, StoreError> + Send + Sync>;

pub(crate) enum StagedWrite {
    Put {
        collection: &'static str,
        id: u64,
        bytes: Vec<u8>,
        expect: Expect,
    },
    DeleteWhere {
        collection: &'static str,
        matches: BytesPredicate,
    },
    RequireNone {
        collection: &'static str,
        matches: BytesPredicate,
    },
}

fn typed_predicate<R, F>(predicate: F) -> BytesPredicate
where
    R: Record + 'static,
    F: Fn(&R) -> bool + Send + Sync + 'static,
{
    Box::new(move |bytes| {
        serde_json::from_slice::<R>(bytes)
            .map(|record| predicate(&record))
            .map_err(|e| StoreError::Serde(e.to_string()))
    })
}

/// Builder collecting writes that must become visible together.
#[derive(Default)]
pub struct UnitOfWork {
    writes: Vec<StagedWrite>,
    error: Option<StoreError>,
}

impl UnitOfWork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a put with an explicit version precondition.
    pub fn put<R: Record>(mut self, record: &R, expect: Expect) -> Self {
        if self.error.is_some() {
            return self;
        }
        match serde_json::to_vec(record) {
            Ok(bytes) => self.writes.push(StagedWrite::Put {
                collection: R::COLLECTION,
                id: record.id(),
                bytes,
                expect,
            }),
            Err(e) => self.error = Some(StoreError::Serde(e.to_string())),
        }
        self
    }

    /// Stage an update guarded by the version the caller read.
    pub fn update<R: Record>(self, record: &R, expected_version: u64) -> Self {
        self.put(record, Expect::Version(expected_version))
    }

    /// Stage an insert. The record must already carry an id from
    /// [`EntityStore::next_id`](super::EntityStore::next_id).
    pub fn insert<R: Record>(mut self, record: &R) -> Self {
        if record.id() == 0 {
            if self.error.is_none() {
                self.error = Some(StoreError::Storage(format!(
                    "staged insert into {} has no id",
                    R::COLLECTION
                )));
            }
            return self;
        }
        self.put(record, Expect::Absent)
    }

    /// Stage a physical delete of every record in `R`'s collection matching
    /// the predicate, evaluated against the state at apply time.
    pub fn delete_where<R, F>(mut self, predicate: F) -> Self
    where
        R: Record + 'static,
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.writes.push(StagedWrite::DeleteWhere {
            collection: R::COLLECTION,
            matches: typed_predicate(predicate),
        });
        self
    }

    /// Stage a guard: when it is reached at apply time, no record in `R`'s
    /// collection may match the predicate, otherwise the whole unit fails
    /// with [`StoreError::UniqueViolation`].
    pub fn require_none<R, F>(mut self, predicate: F) -> Self
    where
        R: Record + 'static,
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.writes.push(StagedWrite::RequireNone {
            collection: R::COLLECTION,
            matches: typed_predicate(predicate),
        });
        self
    }

    /// Number of staged writes.
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub(crate) fn into_writes(self) -> Result<Vec<StagedWrite>, StoreError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.writes),
        }
    }
}

impl fmt::Debug for UnitOfWork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitOfWork")
            .field("writes", &self.writes.len())
            .field("error", &self.error)
            .finish()
    }
}
