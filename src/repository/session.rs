use crate::{
    models::{ClientId, CurrentUser},
    store::{SharedStore, StoreError, StoreScope, read_json, write_json},
};

use super::CURRENT_USER_KEY;

/// Signed-in projection per client. "Remember me" keeps it in the durable
/// scope, otherwise it lives in the session scope.
#[derive(Clone)]
pub struct SessionRepository {
    store: SharedStore,
}

impl SessionRepository {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Durable scope wins when both hold a projection.
    pub async fn current(
        &self,
        client: &ClientId,
    ) -> Result<Option<(CurrentUser, StoreScope)>, StoreError> {
        let key = client.key(CURRENT_USER_KEY);
        for scope in [StoreScope::Durable, StoreScope::Session] {
            if let Some(user) = read_json::<CurrentUser>(self.store.as_ref(), scope, &key).await? {
                return Ok(Some((user, scope)));
            }
        }
        Ok(None)
    }

    pub async fn sign_in(
        &self,
        client: &ClientId,
        user: &CurrentUser,
        remember: bool,
    ) -> Result<StoreScope, StoreError> {
        let scope = if remember {
            StoreScope::Durable
        } else {
            StoreScope::Session
        };
        write_json(self.store.as_ref(), scope, &client.key(CURRENT_USER_KEY), user).await?;
        Ok(scope)
    }

    /// Rewrites the projection in whichever scope currently holds it.
    pub async fn refresh(&self, client: &ClientId, user: &CurrentUser) -> Result<bool, StoreError> {
        let Some((_, scope)) = self.current(client).await? else {
            return Ok(false);
        };
        write_json(self.store.as_ref(), scope, &client.key(CURRENT_USER_KEY), user).await?;
        Ok(true)
    }

    pub async fn sign_out(&self, client: &ClientId) -> Result<(), StoreError> {
        let key = client.key(CURRENT_USER_KEY);
        self.store.remove(StoreScope::Durable, &key).await?;
        self.store.remove(StoreScope::Session, &key).await
    }
}
