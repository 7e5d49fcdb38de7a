//! In-memory audit store for tests and local runs.

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::audit::{AuditEntry, AuditStore};
use crate::error::AuditStoreError;

/// Keeps entries in a vector behind a mutex. Append-only, like the real
/// store.
#[derive(Default)]
pub struct MemoryAuditStore {
    entries: Mutex<Vec<AuditEntry>>,
}

impl MemoryAuditStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries recorded so far.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("audit store lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AuditStore for MemoryAuditStore {
    async fn append(&self, entry: &AuditEntry) -> Result<Uuid, AuditStoreError> {
        let mut entries = self.entries.lock().expect("audit store lock");
        entries.push(entry.clone());
        Ok(entry.id)
    }

    async fn get(&self, id: Uuid) -> Result<Option<AuditEntry>, AuditStoreError> {
        let entries = self.entries.lock().expect("audit store lock");
        Ok(entries.iter().find(|e| e.id == id).cloned())
    }

    async fn list_for_scope(&self, scope_id: Uuid) -> Result<Vec<AuditEntry>, AuditStoreError> {
        let entries = self.entries.lock().expect("audit store lock");
        Ok(entries
            .iter()
            .filter(|e| e.scope_id == scope_id)
            .cloned()
            .collect())
    }
}
