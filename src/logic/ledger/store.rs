//! Durable Store Interface
//!
//! The ledger only needs put/list/get semantics from its backing store; the
//! physical store (object storage, database, ...) is an external collaborator.
//! Implementations are responsible for their own timeout policy - the core
//! defines none.

use parking_lot::Mutex;
use std::collections::BTreeMap;

use super::types::FraudRecord;

/// Errors at the durable-store boundary.
///
/// Decode failures are a distinct kind so that corrupt stored payloads are
/// visible in logs instead of silently dropped.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(String),
    #[error("failed to decode stored record: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Narrow interface the ledger consumes.
///
/// Keys follow the `<prefix><YYYY>/<MM>/<record_id>.json` convention chosen
/// by the ledger; the store only needs to honor prefix listing.
pub trait FraudStore: Send + Sync {
    /// Persist one record under the given key.
    fn put(&self, key: &str, record: &FraudRecord) -> Result<(), StoreError>;

    /// List up to `max_items` records whose keys start with `prefix`.
    fn list(&self, prefix: &str, max_items: usize) -> Result<Vec<FraudRecord>, StoreError>;

    /// Fetch one record by key.
    fn get(&self, key: &str) -> Result<Option<FraudRecord>, StoreError>;
}

// ============================================================================
// IN-MEMORY REFERENCE IMPLEMENTATION
// ============================================================================

/// In-memory `FraudStore` for tests and embedded use.
///
/// Values are held as serialized JSON so the decode path is exercised the
/// same way it would be against a real object store.
#[derive(Default)]
pub struct InMemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Insert a raw payload directly, bypassing serialization.
    /// Lets tests stage corrupt entries.
    pub fn put_raw(&self, key: &str, payload: &str) {
        self.entries.lock().insert(key.to_string(), payload.to_string());
    }
}

impl FraudStore for InMemoryStore {
    fn put(&self, key: &str, record: &FraudRecord) -> Result<(), StoreError> {
        let payload = serde_json::to_string(record)?;
        self.entries.lock().insert(key.to_string(), payload);
        Ok(())
    }

    fn list(&self, prefix: &str, max_items: usize) -> Result<Vec<FraudRecord>, StoreError> {
        let entries = self.entries.lock();
        let mut records = Vec::new();
        for (key, payload) in entries.range(prefix.to_string()..) {
            if !key.starts_with(prefix) {
                break;
            }
            if records.len() >= max_items {
                break;
            }
            records.push(serde_json::from_str(payload)?);
        }
        Ok(records)
    }

    fn get(&self, key: &str) -> Result<Option<FraudRecord>, StoreError> {
        let entries = self.entries.lock();
        match entries.get(key) {
            Some(payload) => Ok(Some(serde_json::from_str(payload)?)),
            None => Ok(None),
        }
    }
}
