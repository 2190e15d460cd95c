//! Cart pricing: subtotal, shipping, coupon discount and grand total.
//!
//! Everything here is a pure function over line items. Amounts are in the
//! smallest currency unit, so no rounding happens apart from the floor on
//! percentage discounts.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{models::CartLineItem, validation::ValidationError};

pub const SHIPPING_FEE: u64 = 30_000;
pub const FREE_SHIPPING_THRESHOLD: u64 = 500_000;
pub const MIN_QUANTITY: u32 = 1;
pub const MAX_QUANTITY: u32 = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Coupon {
    PercentOff { percent: u32 },
    FreeShipping,
}

const COUPONS: [(&str, Coupon); 3] = [
    ("MICADO10", Coupon::PercentOff { percent: 10 }),
    ("MICADO20", Coupon::PercentOff { percent: 20 }),
    ("FREESHIP", Coupon::FreeShipping),
];

/// A coupon that passed lookup, together with its normalized code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AppliedCoupon {
    pub code: String,
    pub coupon: Coupon,
}

/// Looks a code up case-insensitively. Surrounding whitespace is ignored.
pub fn lookup_coupon(code: &str) -> Result<AppliedCoupon, ValidationError> {
    let normalized = code.trim().to_uppercase();
    if normalized.is_empty() {
        return Err(ValidationError::EmptyCouponCode);
    }
    COUPONS
        .iter()
        .find(|(known, _)| *known == normalized)
        .map(|(known, coupon)| AppliedCoupon {
            code: (*known).to_string(),
            coupon: *coupon,
        })
        .ok_or(ValidationError::UnknownCoupon(normalized))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PriceSummary {
    pub subtotal: u64,
    pub shipping: u64,
    pub discount: u64,
    pub total: u64,
}

pub fn subtotal(items: &[CartLineItem]) -> u64 {
    items
        .iter()
        .fold(0u64, |sum, item| sum.saturating_add(item.line_total()))
}

pub fn shipping_fee(subtotal: u64, coupon: Option<&Coupon>) -> u64 {
    if matches!(coupon, Some(Coupon::FreeShipping)) || subtotal >= FREE_SHIPPING_THRESHOLD {
        0
    } else {
        SHIPPING_FEE
    }
}

pub fn discount(subtotal: u64, coupon: Option<&Coupon>) -> u64 {
    match coupon {
        Some(Coupon::PercentOff { percent }) => {
            let scaled = u128::from(subtotal) * u128::from(*percent) / 100;
            u64::try_from(scaled).unwrap_or(u64::MAX)
        }
        Some(Coupon::FreeShipping) | None => 0,
    }
}

/// Prices the cart. The total never goes below zero, which only matters
/// for coupons of 100 % or more.
pub fn price_summary(items: &[CartLineItem], coupon: Option<&Coupon>) -> PriceSummary {
    let subtotal = subtotal(items);
    let shipping = shipping_fee(subtotal, coupon);
    let discount = discount(subtotal, coupon);
    PriceSummary {
        subtotal,
        shipping,
        discount,
        total: subtotal.saturating_add(shipping).saturating_sub(discount),
    }
}

pub fn clamp_quantity(quantity: i64) -> u32 {
    // MAX_QUANTITY fits in i64 and the clamp keeps the value in u32 range.
    quantity.clamp(i64::from(MIN_QUANTITY), i64::from(MAX_QUANTITY)) as u32
}

pub fn item_count(items: &[CartLineItem]) -> u32 {
    items.iter().map(|item| item.quantity).sum()
}
