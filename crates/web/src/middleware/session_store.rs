//! In-memory session store with expiry sweeping.
//!
//! `tower_sessions::MemoryStore` hides expired records on load but never
//! frees them, so sessions abandoned without a logout would stay resident for
//! the life of the process. [`SessionMemoryStore`] keeps the same semantics
//! and adds [`SessionMemoryStore::purge_expired`], which [`sweep_expired`]
//! runs on an interval.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tower_sessions::cookie::time::OffsetDateTime;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, SessionStore};

/// How often expired sessions are dropped.
pub const SWEEP_PERIOD: Duration = Duration::from_secs(10 * 60);

/// Session records held in process memory.
#[derive(Clone, Debug, Default)]
pub struct SessionMemoryStore {
    records: Arc<Mutex<HashMap<Id, Record>>>,
}

impl SessionMemoryStore {
    /// Drop every expired record. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = OffsetDateTime::now_utc();
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|_, record| record.expiry_date > now);
        before - records.len()
    }
}

#[async_trait]
impl SessionStore for SessionMemoryStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        let mut records = self.records.lock().await;
        while records.contains_key(&record.id) {
            record.id = Id::default();
        }
        records.insert(record.id, record.clone());
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.records.lock().await.insert(record.id, record.clone());
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let now = OffsetDateTime::now_utc();
        Ok(self
            .records
            .lock()
            .await
            .get(session_id)
            .filter(|record| record.expiry_date > now)
            .cloned())
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.records.lock().await.remove(session_id);
        Ok(())
    }
}

/// Purge expired sessions every `period`. Runs until the task is dropped.
pub async fn sweep_expired(store: SessionMemoryStore, period: Duration) {
    let mut interval = tokio::time::interval(period);
    // First tick fires immediately
    interval.tick().await;
    loop {
        interval.tick().await;
        let removed = store.purge_expired().await;
        if removed > 0 {
            tracing::debug!(removed, "Purged expired sessions");
        }
    }
}
