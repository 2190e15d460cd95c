use axum::{Json, Router, routing::post};

use crate::{
    dto::contact::{ContactReceipt, ContactRequest},
    error::AppResult,
    response::ApiResponse,
    services::contact_service::submit_contact,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(contact))
}

#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Message accepted", body = ApiResponse<ContactReceipt>),
        (status = 400, description = "Validation failed")
    ),
    tag = "Contact"
)]
pub async fn contact(
    Json(payload): Json<ContactRequest>,
) -> AppResult<Json<ApiResponse<ContactReceipt>>> {
    Ok(Json(submit_contact(payload)?))
}
