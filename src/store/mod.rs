//! Key-value persistence boundary.
//!
//! Values are JSON documents stored under string keys in one of two scopes.
//! `Durable` entries survive restarts when a database is configured;
//! `Session` entries are wiped every time the server starts.

mod locks;
mod memory;
mod orm;

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

pub use locks::KeyLocks;
pub use memory::MemoryStore;
pub use orm::OrmStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreScope {
    Durable,
    Session,
}

impl StoreScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreScope::Durable => "durable",
            StoreScope::Session => "session",
        }
    }
}

impl fmt::Display for StoreScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(#[from] sea_orm::DbErr),

    #[error("value under {key} could not be (de)serialized: {source}")]
    Serde {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, scope: StoreScope, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, scope: StoreScope, key: &str, value: String) -> Result<(), StoreError>;

    async fn remove(&self, scope: StoreScope, key: &str) -> Result<(), StoreError>;

    /// Drops every entry in `scope`.
    async fn clear_scope(&self, scope: StoreScope) -> Result<(), StoreError>;

    /// Per-key locks serializing read-modify-write cycles within this process.
    fn locks(&self) -> &KeyLocks;
}

pub type SharedStore = Arc<dyn KeyValueStore>;

pub async fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    scope: StoreScope,
    key: &str,
) -> Result<Option<T>, StoreError> {
    let Some(raw) = store.get(scope, key).await? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StoreError::Serde {
            key: key.to_string(),
            source,
        })
}

pub async fn write_json<T: Serialize + ?Sized + Sync>(
    store: &dyn KeyValueStore,
    scope: StoreScope,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value).map_err(|source| StoreError::Serde {
        key: key.to_string(),
        source,
    })?;
    store.set(scope, key, raw).await
}

/// Loads the document under `key` (or its default), lets `f` change it and
/// writes it back, all while holding the key's lock. Nothing is written when
/// `f` fails.
pub async fn update_json<T, R, E, F>(
    store: &dyn KeyValueStore,
    scope: StoreScope,
    key: &str,
    f: F,
) -> Result<R, E>
where
    T: Serialize + DeserializeOwned + Default + Send + Sync,
    F: FnOnce(&mut T) -> Result<R, E> + Send,
    R: Send,
    E: From<StoreError> + Send,
{
    let _guard = store.locks().acquire(scope, key).await;
    let mut value: T = read_json(store, scope, key).await?.unwrap_or_default();
    let out = f(&mut value)?;
    write_json(store, scope, key, &value).await?;
    Ok(out)
}
