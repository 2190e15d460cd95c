use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use uuid::Uuid;

use crate::{
    dto::auth::{Claims, LoginRequest, LoginResponse, RegisterRequest},
    error::{AppError, AppResult},
    models::{ClientId, CurrentUser, User},
    response::{ApiResponse, Meta},
    state::AppState,
    validation::{
        ValidationError, validate_confirmation, validate_email, validate_name, validate_password,
        validate_phone,
    },
};

pub const TOKEN_TTL_HOURS: i64 = 24;
pub const REMEMBERED_TOKEN_TTL_DAYS: i64 = 30;

/// Argon2 is CPU-bound, so hashing runs on the blocking pool.
pub async fn hash_password(password: &str) -> AppResult<String> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
            .to_string();
        Ok(hash)
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))?
}

pub async fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let password = password.to_owned();
    let password_hash = password_hash.to_owned();
    tokio::task::spawn_blocking(move || {
        let parsed_hash = PasswordHash::new(&password_hash)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))?
}

fn issue_token(user: &User, secret: &str, remember: bool) -> AppResult<String> {
    let ttl = if remember {
        Duration::days(REMEMBERED_TOKEN_TTL_DAYS)
    } else {
        Duration::hours(TOKEN_TTL_HOURS)
    };
    let expiration = Utc::now()
        .checked_add_signed(ttl)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<CurrentUser>> {
    let RegisterRequest {
        name,
        email,
        phone,
        password,
        confirm_password,
        accept_terms,
    } = payload;
    let email = email.trim().to_string();

    validate_name(&name)?;
    validate_email(&email)?;
    validate_phone(&phone)?;
    validate_password(&password)?;
    validate_confirmation(&password, &confirm_password)?;
    if !accept_terms {
        return Err(ValidationError::TermsNotAccepted.into());
    }

    let users = state.users();
    if users.find_by_email(&email).await?.is_some() {
        return Err(ValidationError::DuplicateEmail.into());
    }

    let user = User {
        id: Uuid::new_v4(),
        name: name.trim().to_string(),
        email,
        phone: phone.chars().filter(|c| !c.is_whitespace()).collect(),
        password_hash: hash_password(&password).await?,
        created_at: Utc::now(),
    };
    let projection = CurrentUser::from(&user);

    if !users.insert(user).await? {
        return Err(ValidationError::DuplicateEmail.into());
    }

    tracing::info!(user_id = %projection.id, "user registered");
    Ok(ApiResponse::success("User created", projection, None))
}

pub async fn login_user(
    state: &AppState,
    client: &ClientId,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest {
        email,
        password,
        remember,
    } = payload;

    validate_email(email.trim())?;
    validate_password(&password)?;

    let user = state
        .users()
        .find_by_email(&email)
        .await?
        .ok_or(ValidationError::InvalidCredentials)?;

    if !verify_password(&password, &user.password_hash).await? {
        tracing::debug!(user_id = %user.id, "login rejected");
        return Err(ValidationError::InvalidCredentials.into());
    }

    let token = issue_token(&user, &state.config.jwt_secret, remember)?;
    let projection = CurrentUser::from(&user);
    let scope = state.sessions().sign_in(client, &projection, remember).await?;

    tracing::info!(user_id = %user.id, client = %client, scope = %scope, "user logged in");

    let resp = LoginResponse {
        token: format!("Bearer {}", token),
        user: projection,
        persistence: scope.to_string(),
    };
    Ok(ApiResponse::success("Logged in", resp, Some(Meta::empty())))
}

pub async fn current_user(
    state: &AppState,
    client: &ClientId,
) -> AppResult<ApiResponse<CurrentUser>> {
    let (user, _) = state
        .sessions()
        .current(client)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Not signed in".into()))?;
    Ok(ApiResponse::success("Current user", user, None))
}

pub async fn logout_user(
    state: &AppState,
    client: &ClientId,
) -> AppResult<ApiResponse<serde_json::Value>> {
    state.sessions().sign_out(client).await?;
    tracing::info!(client = %client, "user logged out");
    Ok(ApiResponse::success(
        "Logged out",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
