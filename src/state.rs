use std::sync::Arc;

use crate::{
    catalog::Catalog,
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    repository::{
        CartRepository, OrderRepository, ProfileRepository, SessionRepository, UserRepository,
    },
    store::{MemoryStore, OrmStore, SharedStore},
};

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub catalog: Arc<Catalog>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: SharedStore, catalog: Catalog, config: AppConfig) -> Self {
        Self {
            store,
            catalog: Arc::new(catalog),
            config: Arc::new(config),
        }
    }

    /// Connects the configured store (running migrations) and loads the catalog.
    pub async fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let store: SharedStore = match config.database_url.as_deref() {
            Some(url) => {
                let conn = create_orm_conn(url).await?;
                run_migrations(&conn).await?;
                Arc::new(OrmStore::new(conn))
            }
            None => {
                tracing::warn!("DATABASE_URL is not set, state is kept in memory only");
                Arc::new(MemoryStore::new())
            }
        };
        let catalog = Catalog::load(&config.catalog_path).await?;
        Ok(Self::new(store, catalog, config))
    }

    pub fn carts(&self) -> CartRepository {
        CartRepository::new(self.store.clone())
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.store.clone())
    }

    pub fn sessions(&self) -> SessionRepository {
        SessionRepository::new(self.store.clone())
    }

    pub fn profiles(&self) -> ProfileRepository {
        ProfileRepository::new(self.store.clone())
    }

    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.store.clone())
    }
}
