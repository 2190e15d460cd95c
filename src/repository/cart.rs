use crate::{
    models::{CartLineItem, ClientId},
    pricing::AppliedCoupon,
    store::{SharedStore, StoreError, StoreScope, read_json, update_json, write_json},
};

use super::{CART_KEY, COUPON_KEY};

/// Line items are durable; the applied coupon only lasts for the session.
#[derive(Clone)]
pub struct CartRepository {
    store: SharedStore,
}

impl CartRepository {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn load(&self, client: &ClientId) -> Result<Vec<CartLineItem>, StoreError> {
        let items = read_json(self.store.as_ref(), StoreScope::Durable, &client.key(CART_KEY)).await?;
        Ok(items.unwrap_or_default())
    }

    /// Runs `change` over the stored line items under the cart's lock and
    /// saves them if it succeeds.
    pub async fn update<R, E, F>(&self, client: &ClientId, change: F) -> Result<R, E>
    where
        F: FnOnce(&mut Vec<CartLineItem>) -> Result<R, E> + Send,
        R: Send,
        E: From<StoreError> + Send,
    {
        update_json(
            self.store.as_ref(),
            StoreScope::Durable,
            &client.key(CART_KEY),
            change,
        )
        .await
    }

    pub async fn clear(&self, client: &ClientId) -> Result<(), StoreError> {
        self.store
            .remove(StoreScope::Durable, &client.key(CART_KEY))
            .await
    }

    pub async fn coupon(&self, client: &ClientId) -> Result<Option<AppliedCoupon>, StoreError> {
        read_json(self.store.as_ref(), StoreScope::Session, &client.key(COUPON_KEY)).await
    }

    pub async fn set_coupon(
        &self,
        client: &ClientId,
        coupon: &AppliedCoupon,
    ) -> Result<(), StoreError> {
        write_json(self.store.as_ref(), StoreScope::Session, &client.key(COUPON_KEY), coupon).await
    }

    pub async fn clear_coupon(&self, client: &ClientId) -> Result<(), StoreError> {
        self.store
            .remove(StoreScope::Session, &client.key(COUPON_KEY))
            .await
    }
}
