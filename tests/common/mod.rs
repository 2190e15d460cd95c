#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc};

use micado_storefront::{
    catalog::Catalog, config::AppConfig, models::ClientId, state::AppState, store::MemoryStore,
};

pub const JWT_SECRET: &str = "test-secret";

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: None,
        host: "127.0.0.1".to_string(),
        port: 0,
        catalog_path: PathBuf::from("data/products.json"),
        jwt_secret: JWT_SECRET.to_string(),
    }
}

pub fn test_catalog() -> Catalog {
    Catalog::from_json(include_str!("../../data/products.json"))
        .expect("bundled catalog parses")
        .catalog
}

pub fn test_state() -> AppState {
    AppState::new(Arc::new(MemoryStore::new()), test_catalog(), test_config())
}

pub fn client(id: &str) -> ClientId {
    ClientId::parse(id).expect("valid client id")
}
