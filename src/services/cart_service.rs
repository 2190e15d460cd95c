use crate::{
    dto::cart::{AddToCartRequest, ApplyCouponRequest, CartView, UpdateQuantityRequest},
    error::{AppError, AppResult},
    models::{CartLineItem, ClientId, ProductId},
    pricing::{AppliedCoupon, clamp_quantity, item_count, lookup_coupon, price_summary},
    response::{ApiResponse, Meta},
    state::AppState,
    validation::ValidationError,
};

fn cart_view(items: Vec<CartLineItem>, coupon: Option<AppliedCoupon>) -> CartView {
    let summary = price_summary(&items, coupon.as_ref().map(|c| &c.coupon));
    CartView {
        item_count: item_count(&items),
        items,
        coupon,
        summary,
    }
}

/// Reloads the cart and coupon so the summary is always priced from what is
/// stored.
async fn current_view(state: &AppState, client: &ClientId) -> AppResult<CartView> {
    let carts = state.carts();
    let items = carts.load(client).await?;
    let coupon = carts.coupon(client).await?;
    Ok(cart_view(items, coupon))
}

pub async fn get_cart(state: &AppState, client: &ClientId) -> AppResult<ApiResponse<CartView>> {
    let view = current_view(state, client).await?;
    Ok(ApiResponse::success("OK", view, Some(Meta::empty())))
}

pub async fn add_to_cart(
    state: &AppState,
    client: &ClientId,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartView>> {
    let quantity = payload.quantity.unwrap_or(1);
    if quantity <= 0 {
        return Err(AppError::BadRequest(
            "quantity must be greater than 0".to_string(),
        ));
    }

    let product = state
        .catalog
        .find(payload.product_id)
        .ok_or(AppError::NotFound)?;

    state
        .carts()
        .update(client, |items| {
            match items.iter_mut().find(|item| item.product_id == product.id) {
                Some(item) => {
                    item.quantity =
                        clamp_quantity(i64::from(item.quantity).saturating_add(quantity));
                }
                None => items.push(CartLineItem::from_product(product, clamp_quantity(quantity))),
            }
            Ok::<_, AppError>(())
        })
        .await?;

    tracing::info!(client = %client, product_id = product.id, quantity, "added to cart");
    let view = current_view(state, client).await?;
    Ok(ApiResponse::success("Added to cart", view, None))
}

pub async fn update_quantity(
    state: &AppState,
    client: &ClientId,
    product_id: ProductId,
    payload: UpdateQuantityRequest,
) -> AppResult<ApiResponse<CartView>> {
    let quantity = state
        .carts()
        .update(client, |items| {
            let item = items
                .iter_mut()
                .find(|item| item.product_id == product_id)
                .ok_or(AppError::NotFound)?;

            let requested = match (payload.delta, payload.quantity) {
                (Some(delta), None) => i64::from(item.quantity).saturating_add(delta),
                (None, Some(quantity)) => quantity,
                _ => {
                    return Err(AppError::BadRequest(
                        "exactly one of delta or quantity is required".to_string(),
                    ));
                }
            };
            item.quantity = clamp_quantity(requested);
            Ok(item.quantity)
        })
        .await?;

    tracing::info!(client = %client, product_id, quantity, "cart quantity updated");
    let view = current_view(state, client).await?;
    Ok(ApiResponse::success("Cart updated", view, None))
}

pub async fn remove_item(
    state: &AppState,
    client: &ClientId,
    product_id: ProductId,
) -> AppResult<ApiResponse<CartView>> {
    state
        .carts()
        .update(client, |items| {
            let before = items.len();
            items.retain(|item| item.product_id != product_id);
            if items.len() == before {
                return Err(AppError::NotFound);
            }
            Ok(())
        })
        .await?;

    tracing::info!(client = %client, product_id, "removed from cart");
    let view = current_view(state, client).await?;
    Ok(ApiResponse::success("Removed from cart", view, Some(Meta::empty())))
}

pub async fn clear_cart(state: &AppState, client: &ClientId) -> AppResult<ApiResponse<CartView>> {
    state.carts().clear(client).await?;
    tracing::info!(client = %client, "cart cleared");
    let view = current_view(state, client).await?;
    Ok(ApiResponse::success("Cart cleared", view, Some(Meta::empty())))
}

/// Replaces any coupon already applied. Unknown codes leave state untouched.
pub async fn apply_coupon(
    state: &AppState,
    client: &ClientId,
    payload: ApplyCouponRequest,
) -> AppResult<ApiResponse<CartView>> {
    let applied = lookup_coupon(&payload.code)?;
    state.carts().set_coupon(client, &applied).await?;

    tracing::info!(client = %client, code = %applied.code, "coupon applied");
    let view = current_view(state, client).await?;
    Ok(ApiResponse::success("Coupon applied", view, None))
}

pub async fn remove_coupon(
    state: &AppState,
    client: &ClientId,
) -> AppResult<ApiResponse<CartView>> {
    state.carts().clear_coupon(client).await?;
    let view = current_view(state, client).await?;
    Ok(ApiResponse::success("Coupon removed", view, None))
}

/// Prices the cart for confirmation. The cart itself is left as is.
pub async fn checkout(state: &AppState, client: &ClientId) -> AppResult<ApiResponse<CartView>> {
    let view = current_view(state, client).await?;
    if view.items.is_empty() {
        return Err(ValidationError::EmptyCart.into());
    }

    tracing::info!(
        client = %client,
        items = view.item_count,
        total = view.summary.total,
        "checkout summary"
    );
    Ok(ApiResponse::success("Checkout summary", view, Some(Meta::empty())))
}
