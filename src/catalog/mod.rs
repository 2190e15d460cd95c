//! Read-only product catalog, loaded once from a JSON snapshot.
//!
//! Records are validated at load time: unknown categories, unknown status
//! tags, an `originalPrice` below `price`, duplicate ids and malformed
//! records are quarantined instead of reaching the storefront.

pub mod query;

use std::{collections::HashSet, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::models::{Category, Product, ProductId, StatusTag};

pub const FEATURED_LIMIT: usize = 4;
pub const RELATED_LIMIT: usize = 4;
pub const SUGGESTION_LIMIT: usize = 6;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuarantineReason {
    Malformed(String),
    UnknownCategory(String),
    UnknownStatus(String),
    OriginalPriceBelowPrice,
    DuplicateId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quarantined {
    pub id: Option<ProductId>,
    pub reason: QuarantineReason,
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    products: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProduct {
    id: ProductId,
    name: String,
    price: u64,
    #[serde(default)]
    original_price: Option<u64>,
    category: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    status: Vec<String>,
}

impl RawProduct {
    fn into_product(self) -> Result<Product, QuarantineReason> {
        let category: Category = self
            .category
            .parse()
            .map_err(|_| QuarantineReason::UnknownCategory(self.category.clone()))?;

        let mut status = self
            .status
            .iter()
            .map(|tag| {
                tag.parse::<StatusTag>()
                    .map_err(|_| QuarantineReason::UnknownStatus(tag.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        status.sort();
        status.dedup();

        if self.original_price.is_some_and(|original| original < self.price) {
            return Err(QuarantineReason::OriginalPriceBelowPrice);
        }

        Ok(Product {
            id: self.id,
            name: self.name,
            price: self.price,
            original_price: self.original_price,
            category,
            image: self.image,
            status,
        })
    }
}

#[derive(Debug)]
pub struct CatalogLoad {
    pub catalog: Catalog,
    pub quarantined: Vec<Quarantined>,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog from already validated products, keeping their order.
    pub fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn from_json(json: &str) -> Result<CatalogLoad, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        let mut seen = HashSet::new();
        let mut products = Vec::with_capacity(document.products.len());
        let mut quarantined = Vec::new();

        for value in document.products {
            let id = value.get("id").and_then(serde_json::Value::as_u64);
            let raw: RawProduct = match serde_json::from_value(value) {
                Ok(raw) => raw,
                Err(err) => {
                    quarantined.push(Quarantined {
                        id,
                        reason: QuarantineReason::Malformed(err.to_string()),
                    });
                    continue;
                }
            };
            match raw.into_product() {
                Ok(product) if !seen.insert(product.id) => quarantined.push(Quarantined {
                    id: Some(product.id),
                    reason: QuarantineReason::DuplicateId,
                }),
                Ok(product) => products.push(product),
                Err(reason) => quarantined.push(Quarantined { id, reason }),
            }
        }

        Ok(CatalogLoad {
            catalog: Catalog { products },
            quarantined,
        })
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Io {
                path: path.display().to_string(),
                source,
            })?;
        let CatalogLoad {
            catalog,
            quarantined,
        } = Self::from_json(&json)?;

        for entry in &quarantined {
            tracing::warn!(id = ?entry.id, reason = ?entry.reason, "catalog record quarantined");
        }
        tracing::info!(
            products = catalog.len(),
            quarantined = quarantined.len(),
            path = %path.display(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn count_in(&self, category: Category) -> usize {
        self.products.iter().filter(|p| p.category == category).count()
    }

    /// First `limit` products carrying `tag`, in catalog order.
    pub fn tagged(&self, tag: StatusTag, limit: usize) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| p.has_status(tag))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Same-category products first, then the rest of the catalog, never the
    /// product itself.
    pub fn related(&self, id: ProductId, limit: usize) -> Option<Vec<Product>> {
        let product = self.find(id)?;
        let same = self
            .products
            .iter()
            .filter(|p| p.id != id && p.category == product.category);
        let others = self
            .products
            .iter()
            .filter(|p| p.id != id && p.category != product.category);
        Some(same.chain(others).take(limit).cloned().collect())
    }

    pub fn suggestions(&self, keyword: &str, limit: usize) -> Vec<String> {
        let needle = keyword.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .take(limit)
            .map(|p| p.name.clone())
            .collect()
    }
}
