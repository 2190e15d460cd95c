use uuid::Uuid;

use crate::{
    models::User,
    store::{SharedStore, StoreError, StoreScope, read_json, update_json},
};

use super::USERS_KEY;

/// All accounts live in a single list that is scanned linearly.
#[derive(Clone)]
pub struct UserRepository {
    store: SharedStore,
}

impl UserRepository {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn all(&self) -> Result<Vec<User>, StoreError> {
        let users = read_json(self.store.as_ref(), StoreScope::Durable, USERS_KEY).await?;
        Ok(users.unwrap_or_default())
    }

    /// Emails compare case-insensitively.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.all().await?;
        Ok(users
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(email.trim())))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self.all().await?;
        Ok(users.into_iter().find(|u| u.id == id))
    }

    /// Appends `user` unless its email is taken. Returns whether it was stored.
    /// The duplicate check and the append happen under the list's lock.
    pub async fn insert(&self, user: User) -> Result<bool, StoreError> {
        update_json(
            self.store.as_ref(),
            StoreScope::Durable,
            USERS_KEY,
            |users: &mut Vec<User>| {
                if users
                    .iter()
                    .any(|u| u.email.eq_ignore_ascii_case(&user.email))
                {
                    return Ok(false);
                }
                users.push(user);
                Ok(true)
            },
        )
        .await
    }

    /// Applies `change` to the record with `id` and returns the updated
    /// record, or `None` when it is missing.
    pub async fn modify<F>(&self, id: Uuid, change: F) -> Result<Option<User>, StoreError>
    where
        F: FnOnce(&mut User) + Send,
    {
        update_json(
            self.store.as_ref(),
            StoreScope::Durable,
            USERS_KEY,
            |users: &mut Vec<User>| {
                let Some(user) = users.iter_mut().find(|u| u.id == id) else {
                    return Ok(None);
                };
                change(user);
                Ok(Some(user.clone()))
            },
        )
        .await
    }
}
