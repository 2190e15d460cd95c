use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::profile::{ChangePasswordRequest, ProfileView, UpdateProfileRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::ClientId,
    response::ApiResponse,
    services::profile_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_profile).put(update_profile))
        .route("/password", post(change_password))
}

#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Profile of the authenticated user", body = ApiResponse<ProfileView>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Profile"
)]
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<ProfileView>>> {
    Ok(Json(profile_service::get_profile(&state, &user).await?))
}

#[utoipa::path(
    put,
    path = "/api/profile",
    params(
        ("x-client-id" = String, Header, description = "Client namespace")
    ),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile saved", body = ApiResponse<ProfileView>),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Profile"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    client: ClientId,
    user: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<ApiResponse<ProfileView>>> {
    let resp = profile_service::update_profile(&state, &client, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/profile/password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = ApiResponse<serde_json::Value>),
        (status = 400, description = "Wrong current password or invalid new password"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Profile"
)]
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(
        profile_service::change_password(&state, &user, payload).await?,
    ))
}
