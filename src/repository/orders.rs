use uuid::Uuid;

use crate::{
    models::Order,
    store::{SharedStore, StoreError, StoreScope, read_json, write_json},
};

use super::ORDERS_KEY;

#[derive(Clone)]
pub struct OrderRepository {
    store: SharedStore,
}

impl OrderRepository {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn all(&self) -> Result<Vec<Order>, StoreError> {
        let orders = read_json(self.store.as_ref(), StoreScope::Durable, ORDERS_KEY).await?;
        Ok(orders.unwrap_or_default())
    }

    pub async fn for_user(&self, user_id: Uuid) -> Result<Vec<Order>, StoreError> {
        let mut orders: Vec<Order> = self
            .all()
            .await?
            .into_iter()
            .filter(|o| o.user_id == user_id)
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// Order history is written by back-office imports and seeding only.
    pub async fn save_all(&self, orders: &[Order]) -> Result<(), StoreError> {
        write_json(self.store.as_ref(), StoreScope::Durable, ORDERS_KEY, orders).await
    }
}
