use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use super::StoreScope;

/// One async mutex per `(scope, key)`, created on first use.
///
/// Only writers that go through [`super::update_json`] take these locks, so
/// plain reads never wait. The map keeps one entry per key ever updated.
#[derive(Debug, Default)]
pub struct KeyLocks {
    locks: Mutex<HashMap<(StoreScope, String), Arc<AsyncMutex<()>>>>,
}

impl KeyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, scope: StoreScope, key: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.entry((scope, key.to_string())).or_default().clone()
        };
        lock.lock_owned().await
    }
}
