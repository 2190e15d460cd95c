use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::auth::{LoginRequest, LoginResponse, RegisterRequest},
    error::AppResult,
    models::{ClientId, CurrentUser},
    response::ApiResponse,
    services::auth_service::{current_user, login_user, logout_user, register_user},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Register user", body = ApiResponse<CurrentUser>),
        (status = 400, description = "Validation failed or email already registered")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CurrentUser>>)> {
    let resp = register_user(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    params(
        ("x-client-id" = String, Header, description = "Client namespace")
    ),
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login user", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    client: ClientId,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let resp = login_user(&state, &client, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    params(
        ("x-client-id" = String, Header, description = "Client namespace")
    ),
    responses(
        (status = 200, description = "Signed-in projection cleared", body = ApiResponse<serde_json::Value>)
    ),
    tag = "Auth"
)]
pub async fn logout(
    State(state): State<AppState>,
    client: ClientId,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(logout_user(&state, &client).await?))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    params(
        ("x-client-id" = String, Header, description = "Client namespace")
    ),
    responses(
        (status = 200, description = "Signed-in user of this client", body = ApiResponse<CurrentUser>),
        (status = 401, description = "Not signed in")
    ),
    tag = "Auth"
)]
pub async fn me(
    State(state): State<AppState>,
    client: ClientId,
) -> AppResult<Json<ApiResponse<CurrentUser>>> {
    Ok(Json(current_user(&state, &client).await?))
}
