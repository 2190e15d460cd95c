use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    models::{CartLineItem, ProductId},
    pricing::{AppliedCoupon, PriceSummary},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    /// Defaults to 1.
    pub quantity: Option<i64>,
}

/// Exactly one of `delta` (relative) or `quantity` (absolute) must be set.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQuantityRequest {
    pub delta: Option<i64>,
    pub quantity: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ApplyCouponRequest {
    pub code: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartView {
    pub items: Vec<CartLineItem>,
    pub item_count: u32,
    pub coupon: Option<AppliedCoupon>,
    pub summary: PriceSummary,
}
