//! InMemoryStore - HashMap-backed entity store for tests and single-node use.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock, RwLockWriteGuard};

use super::unit_of_work::StagedWrite;
use super::{record_key, EntityStore, Expect, Record, StoreError, UnitOfWork, Versioned};

/// Internal stored representation of a record.
#[derive(Clone)]
struct StoredRecord {
    bytes: Vec<u8>,
    version: u64,
}

/// Undo entry: the key touched and what it held before.
type JournalEntry = (String, Option<StoredRecord>);

/// In-memory entity store backed by a HashMap.
///
/// Storage key is `"COLLECTION:id"`. Clone-friendly via Arc: clones share
/// storage, id sequences and injected faults.
#[derive(Clone)]
pub struct InMemoryStore {
    storage: Arc<RwLock<HashMap<String, StoredRecord>>>,
    sequences: Arc<Mutex<HashMap<String, u64>>>,
    fault: Arc<Mutex<Option<usize>>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
            sequences: Arc::new(Mutex::new(HashMap::new())),
            fault: Arc::new(Mutex::new(None)),
        }
    }

    /// Make the next [`apply`](EntityStore::apply) fail right before its
    /// `step`-th staged write (zero-based), after the earlier writes have
    /// landed. The fault fires once.
    pub fn fail_apply_at(&self, step: usize) {
        if let Ok(mut fault) = self.fault.lock() {
            *fault = Some(step);
        }
    }

    fn write_storage(
        &self,
    ) -> Result<RwLockWriteGuard<'_, HashMap<String, StoredRecord>>, StoreError> {
        self.storage
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))
    }

    fn take_fault(&self) -> Result<Option<usize>, StoreError> {
        let mut fault = self
            .fault
            .lock()
            .map_err(|_| StoreError::Storage("fault lock poisoned".into()))?;
        Ok(fault.take())
    }

    /// Store raw bytes under a record key, bypassing serialization.
    #[cfg(test)]
    pub(crate) fn put_raw(&self, collection: &str, id: u64, bytes: &[u8]) {
        if let Ok(mut storage) = self.storage.write() {
            storage.insert(
                record_key(collection, id),
                StoredRecord {
                    bytes: bytes.to_vec(),
                    version: 1,
                },
            );
        }
    }

    fn apply_writes(
        storage: &mut HashMap<String, StoredRecord>,
        writes: Vec<StagedWrite>,
        fault: Option<usize>,
        journal: &mut Vec<JournalEntry>,
    ) -> Result<(), StoreError> {
        for (step, write) in writes.into_iter().enumerate() {
            if fault == Some(step) {
                return Err(StoreError::Storage(format!(
                    "injected fault before write {}",
                    step
                )));
            }

            match write {
                StagedWrite::Put {
                    collection,
                    id,
                    bytes,
                    expect,
                } => {
                    let key = record_key(collection, id);
                    let current = storage.get(&key).cloned();
                    check_expectation(collection, id, current.as_ref(), expect)?;

                    let version = current.as_ref().map(|s| s.version + 1).unwrap_or(1);
                    journal.push((key.clone(), current));
                    storage.insert(key, StoredRecord { bytes, version });
                }
                StagedWrite::DeleteWhere {
                    collection,
                    matches,
                } => {
                    let mut doomed = Vec::new();
                    for (key, stored) in collection_rows(storage, collection) {
                        if matches(&stored.bytes)? {
                            doomed.push(key.clone());
                        }
                    }

                    for key in doomed {
                        let previous = storage.remove(&key);
                        journal.push((key, previous));
                    }
                }
                StagedWrite::RequireNone {
                    collection,
                    matches,
                } => {
                    for (_, stored) in collection_rows(storage, collection) {
                        if matches(&stored.bytes)? {
                            return Err(StoreError::UniqueViolation {
                                collection: collection.to_string(),
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

fn collection_rows<'s>(
    storage: &'s HashMap<String, StoredRecord>,
    collection: &str,
) -> impl Iterator<Item = (&'s String, &'s StoredRecord)> {
    let prefix = format!("{}:", collection);
    storage
        .iter()
        .filter(move |(key, _)| key.starts_with(&prefix))
}

fn check_expectation(
    collection: &str,
    id: u64,
    current: Option<&StoredRecord>,
    expect: Expect,
) -> Result<(), StoreError> {
    match (expect, current) {
        (Expect::Absent, None) => Ok(()),
        (Expect::Absent, Some(stored)) => Err(StoreError::ConcurrencyConflict {
            collection: collection.to_string(),
            id,
            expected: 0,
            actual: stored.version,
        }),
        (Expect::Version(_), None) => Err(StoreError::NotFound {
            collection: collection.to_string(),
            id,
        }),
        (Expect::Version(expected), Some(stored)) if stored.version != expected => {
            Err(StoreError::ConcurrencyConflict {
                collection: collection.to_string(),
                id,
                expected,
                actual: stored.version,
            })
        }
        (Expect::Version(_), Some(_)) => Ok(()),
    }
}

fn decode<R: Record>(stored: &StoredRecord) -> Result<Versioned<R>, StoreError> {
    let data: R =
        serde_json::from_slice(&stored.bytes).map_err(|e| StoreError::Serde(e.to_string()))?;
    Ok(Versioned {
        data,
        version: stored.version,
    })
}

impl EntityStore for InMemoryStore {
    fn next_id(&self, collection: &str) -> Result<u64, StoreError> {
        let mut sequences = self
            .sequences
            .lock()
            .map_err(|_| StoreError::Storage("sequence lock poisoned".into()))?;
        let current = sequences.entry(collection.to_string()).or_insert(0);
        *current += 1;
        Ok(*current)
    }

    fn get_record<R: Record>(&self, id: u64) -> Result<Option<Versioned<R>>, StoreError> {
        let key = record_key(R::COLLECTION, id);
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))?;

        storage.get(&key).map(decode::<R>).transpose()
    }

    fn insert_record<R: Record>(&self, mut record: R) -> Result<Versioned<R>, StoreError> {
        let id = self.next_id(R::COLLECTION)?;
        record.set_id(id);
        let bytes = serde_json::to_vec(&record).map_err(|e| StoreError::Serde(e.to_string()))?;

        let mut storage = self.write_storage()?;
        let key = record_key(R::COLLECTION, id);
        if let Some(existing) = storage.get(&key) {
            return Err(StoreError::ConcurrencyConflict {
                collection: R::COLLECTION.to_string(),
                id,
                expected: 0,
                actual: existing.version,
            });
        }

        storage.insert(key, StoredRecord { bytes, version: 1 });

        Ok(Versioned {
            data: record,
            version: 1,
        })
    }

    fn update_record<R: Record>(
        &self,
        record: &R,
        expected_version: u64,
    ) -> Result<Versioned<R>, StoreError> {
        let key = record_key(R::COLLECTION, record.id());
        let bytes = serde_json::to_vec(record).map_err(|e| StoreError::Serde(e.to_string()))?;

        let mut storage = self.write_storage()?;
        check_expectation(
            R::COLLECTION,
            record.id(),
            storage.get(&key),
            Expect::Version(expected_version),
        )?;

        let version = expected_version + 1;
        storage.insert(key, StoredRecord { bytes, version });

        Ok(Versioned {
            data: record.clone(),
            version,
        })
    }

    fn find_records<R: Record>(
        &self,
        predicate: &dyn Fn(&R) -> bool,
    ) -> Result<Vec<Versioned<R>>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))?;

        let mut results = Vec::new();
        for (_, stored) in collection_rows(&storage, R::COLLECTION) {
            let versioned = decode::<R>(stored)?;
            if predicate(&versioned.data) {
                results.push(versioned);
            }
        }

        results.sort_by_key(|versioned| versioned.data.id());
        Ok(results)
    }

    fn count_records<R: Record>(
        &self,
        predicate: &dyn Fn(&R) -> bool,
    ) -> Result<usize, StoreError> {
        Ok(self.find_records(predicate)?.len())
    }

    fn apply(&self, unit: UnitOfWork) -> Result<(), StoreError> {
        let writes = unit.into_writes()?;
        let fault = self.take_fault()?;

        let mut storage = self.write_storage()?;
        let mut journal = Vec::new();

        if let Err(err) = Self::apply_writes(&mut storage, writes, fault, &mut journal) {
            for (key, previous) in journal.into_iter().rev() {
                match previous {
                    Some(stored) => {
                        storage.insert(key, stored);
                    }
                    None => {
                        storage.remove(&key);
                    }
                }
            }
            match err {
                StoreError::UniqueViolation { .. } | StoreError::ConcurrencyConflict { .. } => {
                    tracing::debug!(error = %err, "unit of work rolled back")
                }
                _ => tracing::warn!(error = %err, "unit of work rolled back"),
            }
            return Err(err);
        }

        Ok(())
    }
}
