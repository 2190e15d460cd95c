use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch, post},
};

use crate::{
    dto::cart::{AddToCartRequest, ApplyCouponRequest, CartView, UpdateQuantityRequest},
    error::AppResult,
    models::{ClientId, ProductId},
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_cart).delete(clear_cart))
        .route("/items", post(add_to_cart))
        .route(
            "/items/{product_id}",
            patch(update_quantity).delete(remove_item),
        )
        .route("/coupon", post(apply_coupon).delete(remove_coupon))
        .route("/checkout", post(checkout))
}

#[utoipa::path(
    get,
    path = "/api/cart",
    params(
        ("x-client-id" = String, Header, description = "Client namespace")
    ),
    responses(
        (status = 200, description = "Cart with its price summary", body = ApiResponse<CartView>)
    ),
    tag = "Cart"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    client: ClientId,
) -> AppResult<Json<ApiResponse<CartView>>> {
    Ok(Json(cart_service::get_cart(&state, &client).await?))
}

#[utoipa::path(
    post,
    path = "/api/cart/items",
    params(
        ("x-client-id" = String, Header, description = "Client namespace")
    ),
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Add a product or bump its quantity", body = ApiResponse<CartView>),
        (status = 400, description = "Bad request"),
    ),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    client: ClientId,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    Ok(Json(cart_service::add_to_cart(&state, &client, payload).await?))
}

#[utoipa::path(
    patch,
    path = "/api/cart/items/{product_id}",
    params(
        ("x-client-id" = String, Header, description = "Client namespace"),
        ("product_id" = u64, Path, description = "Product ID")
    ),
    request_body = UpdateQuantityRequest,
    responses(
        (status = 200, description = "Quantity updated, clamped to 1..=99", body = ApiResponse<CartView>),
        (status = 404, description = "Item not in cart"),
    ),
    tag = "Cart"
)]
pub async fn update_quantity(
    State(state): State<AppState>,
    client: ClientId,
    Path(product_id): Path<ProductId>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::update_quantity(&state, &client, product_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/cart/items/{product_id}",
    params(
        ("x-client-id" = String, Header, description = "Client namespace"),
        ("product_id" = u64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "OK", body = ApiResponse<CartView>),
        (status = 404, description = "Item not in cart"),
    ),
    tag = "Cart"
)]
pub async fn remove_item(
    State(state): State<AppState>,
    client: ClientId,
    Path(product_id): Path<ProductId>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    Ok(Json(
        cart_service::remove_item(&state, &client, product_id).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/cart",
    params(
        ("x-client-id" = String, Header, description = "Client namespace")
    ),
    responses(
        (status = 200, description = "Cart emptied", body = ApiResponse<CartView>)
    ),
    tag = "Cart"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    client: ClientId,
) -> AppResult<Json<ApiResponse<CartView>>> {
    Ok(Json(cart_service::clear_cart(&state, &client).await?))
}

#[utoipa::path(
    post,
    path = "/api/cart/coupon",
    params(
        ("x-client-id" = String, Header, description = "Client namespace")
    ),
    request_body = ApplyCouponRequest,
    responses(
        (status = 200, description = "Coupon applied", body = ApiResponse<CartView>),
        (status = 400, description = "Empty or unknown coupon code"),
    ),
    tag = "Cart"
)]
pub async fn apply_coupon(
    State(state): State<AppState>,
    client: ClientId,
    Json(payload): Json<ApplyCouponRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    Ok(Json(
        cart_service::apply_coupon(&state, &client, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/cart/coupon",
    params(
        ("x-client-id" = String, Header, description = "Client namespace")
    ),
    responses(
        (status = 200, description = "Coupon removed", body = ApiResponse<CartView>)
    ),
    tag = "Cart"
)]
pub async fn remove_coupon(
    State(state): State<AppState>,
    client: ClientId,
) -> AppResult<Json<ApiResponse<CartView>>> {
    Ok(Json(cart_service::remove_coupon(&state, &client).await?))
}

#[utoipa::path(
    post,
    path = "/api/cart/checkout",
    params(
        ("x-client-id" = String, Header, description = "Client namespace")
    ),
    responses(
        (status = 200, description = "Final price summary", body = ApiResponse<CartView>),
        (status = 400, description = "Cart is empty"),
    ),
    tag = "Cart"
)]
pub async fn checkout(
    State(state): State<AppState>,
    client: ClientId,
) -> AppResult<Json<ApiResponse<CartView>>> {
    Ok(Json(cart_service::checkout(&state, &client).await?))
}
