use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect, Set,
    sea_query::OnConflict,
};

use super::{KeyLocks, KeyValueStore, StoreError, StoreScope};
use crate::entity::kv_entries::{ActiveModel, Column, Entity as KvEntries};

/// Store backed by the `kv_entries` table. Key locks are process-local, so
/// a single server instance is expected per database.
#[derive(Debug)]
pub struct OrmStore {
    conn: DatabaseConnection,
    locks: KeyLocks,
}

impl OrmStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self {
            conn,
            locks: KeyLocks::new(),
        }
    }
}

#[async_trait]
impl KeyValueStore for OrmStore {
    async fn get(&self, scope: StoreScope, key: &str) -> Result<Option<String>, StoreError> {
        let value = KvEntries::find()
            .select_only()
            .column(Column::Value)
            .filter(Column::Scope.eq(scope.as_str()))
            .filter(Column::EntryKey.eq(key))
            .into_tuple::<String>()
            .one(&self.conn)
            .await?;
        Ok(value)
    }

    async fn set(&self, scope: StoreScope, key: &str, value: String) -> Result<(), StoreError> {
        let entry = ActiveModel {
            scope: Set(scope.as_str().to_string()),
            entry_key: Set(key.to_string()),
            value: Set(value),
            updated_at: Set(Utc::now().into()),
        };
        KvEntries::insert(entry)
            .on_conflict(
                OnConflict::columns([Column::Scope, Column::EntryKey])
                    .update_columns([Column::Value, Column::UpdatedAt])
                    .to_owned(),
            )
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    async fn remove(&self, scope: StoreScope, key: &str) -> Result<(), StoreError> {
        KvEntries::delete_many()
            .filter(Column::Scope.eq(scope.as_str()))
            .filter(Column::EntryKey.eq(key))
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    async fn clear_scope(&self, scope: StoreScope) -> Result<(), StoreError> {
        let result = KvEntries::delete_many()
            .filter(Column::Scope.eq(scope.as_str()))
            .exec(&self.conn)
            .await?;
        tracing::debug!(scope = %scope, removed = result.rows_affected, "store scope cleared");
        Ok(())
    }

    fn locks(&self) -> &KeyLocks {
        &self.locks
    }
}
