use std::sync::Arc;

use chrono::{Duration, Utc};
use micado_storefront::{
    catalog::Catalog,
    db::{create_orm_conn, run_migrations},
    models::{CartLineItem, Order, OrderStatus, ProductId, User},
    pricing::{lookup_coupon, price_summary},
    repository::{OrderRepository, UserRepository},
    services::auth_service::hash_password,
    store::{OrmStore, SharedStore},
};
use uuid::Uuid;

const DEMO_EMAIL: &str = "demo@micado.vn";
const DEMO_PASSWORD: &str = "micado123";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set to seed"))?;
    let catalog_path =
        std::env::var("CATALOG_PATH").unwrap_or_else(|_| "data/products.json".to_string());

    let orm = create_orm_conn(&database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;
    let store: SharedStore = Arc::new(OrmStore::new(orm));
    let catalog = Catalog::load(&catalog_path).await?;

    let user_id = ensure_demo_user(&store).await?;
    seed_orders(&store, &catalog, user_id).await?;

    println!("Seed completed. Demo user {DEMO_EMAIL} ({user_id})");
    Ok(())
}

async fn ensure_demo_user(store: &SharedStore) -> anyhow::Result<Uuid> {
    let users = UserRepository::new(store.clone());
    if let Some(existing) = users.find_by_email(DEMO_EMAIL).await? {
        println!("Demo user already present");
        return Ok(existing.id);
    }

    let password_hash = hash_password(DEMO_PASSWORD)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    let user = User {
        id: Uuid::new_v4(),
        name: "Khách MicaDo".to_string(),
        email: DEMO_EMAIL.to_string(),
        phone: "0901234567".to_string(),
        password_hash,
        created_at: Utc::now(),
    };
    let id = user.id;
    users.insert(user).await?;
    println!("Ensured user {DEMO_EMAIL}");
    Ok(id)
}

async fn seed_orders(store: &SharedStore, catalog: &Catalog, user_id: Uuid) -> anyhow::Result<()> {
    let orders = OrderRepository::new(store.clone());
    let mut all = orders.all().await?;
    if all.iter().any(|o| o.user_id == user_id) {
        println!("Orders already seeded");
        return Ok(());
    }

    let history: [(&[(ProductId, u32)], Option<&str>, OrderStatus, i64); 3] = [
        (&[(1, 2), (9, 1)], None, OrderStatus::Delivered, 30),
        (&[(11, 1)], Some("MICADO10"), OrderStatus::Shipping, 3),
        (&[(8, 1), (5, 2)], Some("FREESHIP"), OrderStatus::Pending, 0),
    ];

    for (lines, code, status, days_ago) in history {
        let items: Vec<CartLineItem> = lines
            .iter()
            .filter_map(|(id, qty)| catalog.find(*id).map(|p| CartLineItem::from_product(p, *qty)))
            .collect();
        if items.is_empty() {
            continue;
        }
        let coupon = code.map(lookup_coupon).transpose()?;
        let summary = price_summary(&items, coupon.as_ref().map(|c| &c.coupon));
        all.push(Order {
            id: Uuid::new_v4(),
            user_id,
            status,
            items,
            summary,
            created_at: Utc::now() - Duration::days(days_ago),
        });
    }

    orders.save_all(&all).await?;
    println!("Seeded orders");
    Ok(())
}
