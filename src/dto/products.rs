use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Category, Product};

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

#[derive(Serialize, ToSchema)]
pub struct FeaturedProducts {
    pub hot: Vec<Product>,
    pub new: Vec<Product>,
}

#[derive(Serialize, ToSchema)]
pub struct CategoryInfo {
    pub slug: Category,
    pub label: String,
    pub product_count: usize,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct SuggestionList {
    #[schema(value_type = Vec<String>)]
    pub items: Vec<String>,
}
