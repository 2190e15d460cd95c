mod common;

use std::sync::Arc;

use micado_storefront::{
    db::{create_orm_conn, run_migrations},
    dto::cart::AddToCartRequest,
    services::cart_service,
    state::AppState,
    store::{KeyValueStore, OrmStore, StoreScope},
};

async fn orm_store() -> anyhow::Result<OrmStore> {
    let conn = create_orm_conn("sqlite::memory:").await?;
    run_migrations(&conn).await?;
    Ok(OrmStore::new(conn))
}

#[tokio::test]
async fn entries_round_trip_and_upsert() -> anyhow::Result<()> {
    let store = orm_store().await?;

    assert_eq!(store.get(StoreScope::Durable, "a:micado_cart").await?, None);

    store
        .set(StoreScope::Durable, "a:micado_cart", "[]".to_string())
        .await?;
    store
        .set(StoreScope::Durable, "a:micado_cart", "[1]".to_string())
        .await?;
    assert_eq!(
        store.get(StoreScope::Durable, "a:micado_cart").await?,
        Some("[1]".to_string())
    );

    // Same key, other scope.
    assert_eq!(store.get(StoreScope::Session, "a:micado_cart").await?, None);

    store.remove(StoreScope::Durable, "a:micado_cart").await?;
    assert_eq!(store.get(StoreScope::Durable, "a:micado_cart").await?, None);
    Ok(())
}

#[tokio::test]
async fn clearing_a_scope_leaves_the_other_untouched() -> anyhow::Result<()> {
    let store = orm_store().await?;
    store
        .set(StoreScope::Durable, "user", "\"kept\"".to_string())
        .await?;
    store
        .set(StoreScope::Session, "user", "\"dropped\"".to_string())
        .await?;

    store.clear_scope(StoreScope::Session).await?;

    assert_eq!(
        store.get(StoreScope::Durable, "user").await?,
        Some("\"kept\"".to_string())
    );
    assert_eq!(store.get(StoreScope::Session, "user").await?, None);
    Ok(())
}

#[tokio::test]
async fn migrations_can_run_twice() -> anyhow::Result<()> {
    let conn = create_orm_conn("sqlite::memory:").await?;
    run_migrations(&conn).await?;
    run_migrations(&conn).await?;
    Ok(())
}

#[tokio::test]
async fn cart_persists_through_the_database_store() -> anyhow::Result<()> {
    let store = orm_store().await?;
    let state = AppState::new(
        Arc::new(store),
        common::test_catalog(),
        common::test_config(),
    );
    let client = common::client("browser-a");

    let request = AddToCartRequest {
        product_id: 3,
        quantity: Some(2),
    };
    cart_service::add_to_cart(&state, &client, request).await?;

    let cart = cart_service::get_cart(&state, &client)
        .await?
        .data
        .expect("cart");
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].product_id, 3);
    assert_eq!(cart.summary.subtotal, 360_000);
    Ok(())
}
