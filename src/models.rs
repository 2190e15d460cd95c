use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{pricing::PriceSummary, validation::ValidationError};

pub type ProductId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum Category {
    #[serde(rename = "mica-custom")]
    MicaCustom,
    #[serde(rename = "moc-chia-khoa")]
    MocChiaKhoa,
    #[serde(rename = "standee")]
    Standee,
    #[serde(rename = "wood-1-layer")]
    Wood1Layer,
    #[serde(rename = "wood-2-layer")]
    Wood2Layer,
    #[serde(rename = "wood-handmade")]
    WoodHandmade,
    #[serde(rename = "uv-led-light")]
    UvLedLight,
    #[serde(rename = "name-night")]
    NameNight,
    #[serde(rename = "accessories")]
    Accessories,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::MicaCustom,
        Category::MocChiaKhoa,
        Category::Standee,
        Category::Wood1Layer,
        Category::Wood2Layer,
        Category::WoodHandmade,
        Category::UvLedLight,
        Category::NameNight,
        Category::Accessories,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::MicaCustom => "mica-custom",
            Category::MocChiaKhoa => "moc-chia-khoa",
            Category::Standee => "standee",
            Category::Wood1Layer => "wood-1-layer",
            Category::Wood2Layer => "wood-2-layer",
            Category::WoodHandmade => "wood-handmade",
            Category::UvLedLight => "uv-led-light",
            Category::NameNight => "name-night",
            Category::Accessories => "accessories",
        }
    }

    /// Storefront heading shown for the category listing.
    pub fn label(&self) -> &'static str {
        match self {
            Category::MicaCustom => "Mẫu Mica Custom",
            Category::MocChiaKhoa => "Móc chìa khóa",
            Category::Standee => "Standee",
            Category::Wood1Layer => "Gỗ 1 lớp",
            Category::Wood2Layer => "Gỗ 2 lớp",
            Category::WoodHandmade => "Đồ gỗ Handmade",
            Category::UvLedLight => "UV LED",
            Category::NameNight => "Name Night",
            Category::Accessories => "Phụ kiện & Hộp quà",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusTag {
    New,
    Hot,
    Sale,
}

impl StatusTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusTag::New => "new",
            StatusTag::Hot => "hot",
            StatusTag::Sale => "sale",
        }
    }
}

impl FromStr for StatusTag {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(StatusTag::New),
            "hot" => Ok(StatusTag::Hot),
            "sale" => Ok(StatusTag::Sale),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }
}

/// Catalog entry. Built only through [`crate::catalog::Catalog`], which
/// guarantees a known category, known tags and `original_price >= price`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<u64>,
    pub category: Category,
    pub image: String,
    /// Sorted and deduplicated.
    pub status: Vec<StatusTag>,
}

impl Product {
    pub fn has_status(&self, tag: StatusTag) -> bool {
        self.status.contains(&tag)
    }

    pub fn is_discounted(&self) -> bool {
        self.original_price.is_some_and(|original| original > self.price)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CartLineItem {
    #[serde(rename = "id")]
    pub product_id: ProductId,
    pub name: String,
    pub price: u64,
    pub image: String,
    pub quantity: u32,
}

impl CartLineItem {
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity,
        }
    }

    pub fn line_total(&self) -> u64 {
        self.price.saturating_mul(u64::from(self.quantity))
    }
}

/// Full account record. Only the argon2 PHC string is kept, never the password.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Reduced projection kept next to the client for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CurrentUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub birthday: String,
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipping,
    Delivered,
    Cancelled,
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "shipping" => Ok(OrderStatus::Shipping),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(ValidationError::UnknownOrderStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: OrderStatus,
    pub items: Vec<CartLineItem>,
    pub summary: PriceSummary,
    pub created_at: DateTime<Utc>,
}

/// Opaque identifier of the browser profile driving the storefront. Carts,
/// applied coupons and the signed-in projection live under it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientId(String);

impl ClientId {
    pub const MAX_LEN: usize = 64;

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let valid = !raw.is_empty()
            && raw.len() <= Self::MAX_LEN
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        valid.then(|| ClientId(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Store key for a per-client entry.
    pub fn key(&self, name: &str) -> String {
        format!("{}:{name}", self.0)
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
