use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{KeyLocks, KeyValueStore, StoreError, StoreScope};

/// Process-local store. Everything is lost on restart, durable scope included.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<(StoreScope, String), String>>,
    locks: KeyLocks,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, scope: StoreScope, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().await;
        Ok(entries.get(&(scope, key.to_string())).cloned())
    }

    async fn set(&self, scope: StoreScope, key: &str, value: String) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert((scope, key.to_string()), value);
        Ok(())
    }

    async fn remove(&self, scope: StoreScope, key: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(&(scope, key.to_string()));
        Ok(())
    }

    async fn clear_scope(&self, scope: StoreScope) -> Result<(), StoreError> {
        self.entries.write().await.retain(|(s, _), _| *s != scope);
        Ok(())
    }

    fn locks(&self) -> &KeyLocks {
        &self.locks
    }
}
