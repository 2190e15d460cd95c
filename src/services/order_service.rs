use crate::{
    dto::orders::{OrderList, OrderListQuery},
    error::AppResult,
    middleware::auth::AuthUser,
    models::OrderStatus,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let status = match query.status.as_deref().map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(raw) => Some(raw.parse::<OrderStatus>()?),
    };

    let mut orders = state.orders().for_user(user.user_id).await?;
    if let Some(status) = status {
        orders.retain(|order| order.status == status);
    }

    let total = i64::try_from(orders.len()).unwrap_or(i64::MAX);
    let meta = Meta::new(1, total, total);
    Ok(ApiResponse::success(
        "Ok",
        OrderList { items: orders },
        Some(meta),
    ))
}
