use std::collections::BTreeMap;

use uuid::Uuid;

use crate::{
    models::Profile,
    store::{SharedStore, StoreError, StoreScope, read_json, update_json},
};

use super::PROFILES_KEY;

/// Profiles are kept as one map from user id to profile.
#[derive(Clone)]
pub struct ProfileRepository {
    store: SharedStore,
}

impl ProfileRepository {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    async fn all(&self) -> Result<BTreeMap<Uuid, Profile>, StoreError> {
        let profiles = read_json(self.store.as_ref(), StoreScope::Durable, PROFILES_KEY).await?;
        Ok(profiles.unwrap_or_default())
    }

    pub async fn get(&self, user_id: Uuid) -> Result<Option<Profile>, StoreError> {
        Ok(self.all().await?.remove(&user_id))
    }

    pub async fn save(&self, user_id: Uuid, profile: Profile) -> Result<(), StoreError> {
        update_json(
            self.store.as_ref(),
            StoreScope::Durable,
            PROFILES_KEY,
            |profiles: &mut BTreeMap<Uuid, Profile>| {
                profiles.insert(user_id, profile);
                Ok(())
            },
        )
        .await
    }
}
