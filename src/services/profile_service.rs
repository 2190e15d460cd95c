use crate::{
    dto::profile::{ChangePasswordRequest, ProfileView, UpdateProfileRequest},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{ClientId, CurrentUser, Profile, User},
    response::{ApiResponse, Meta},
    services::auth_service::{hash_password, verify_password},
    state::AppState,
    validation::{
        ValidationError, validate_confirmation, validate_name, validate_password, validate_phone,
    },
};

async fn load_user(state: &AppState, auth: &AuthUser) -> AppResult<User> {
    state
        .users()
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Account no longer exists".into()))
}

fn profile_view(user: &User, profile: Profile) -> ProfileView {
    let or_default = |value: String, fallback: &str| {
        if value.is_empty() {
            fallback.to_string()
        } else {
            value
        }
    };
    ProfileView {
        id: user.id,
        email: user.email.clone(),
        name: or_default(profile.name, &user.name),
        phone: or_default(profile.phone, &user.phone),
        birthday: profile.birthday,
        address: profile.address,
    }
}

pub async fn get_profile(state: &AppState, auth: &AuthUser) -> AppResult<ApiResponse<ProfileView>> {
    let user = load_user(state, auth).await?;
    let profile = state.profiles().get(user.id).await?.unwrap_or_default();
    Ok(ApiResponse::success("Profile", profile_view(&user, profile), None))
}

/// Saves the profile, renames the account and refreshes the signed-in
/// projection of this client.
pub async fn update_profile(
    state: &AppState,
    client: &ClientId,
    auth: &AuthUser,
    payload: UpdateProfileRequest,
) -> AppResult<ApiResponse<ProfileView>> {
    validate_name(&payload.name)?;
    if !payload.phone.trim().is_empty() {
        validate_phone(&payload.phone)?;
    }

    load_user(state, auth).await?;
    let profile = Profile {
        name: payload.name.trim().to_string(),
        phone: payload.phone.trim().to_string(),
        birthday: payload.birthday.trim().to_string(),
        address: payload.address.trim().to_string(),
    };
    let name = profile.name.clone();
    let user = state
        .users()
        .modify(auth.user_id, |user| user.name = name)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Account no longer exists".into()))?;
    state.profiles().save(user.id, profile.clone()).await?;

    let refreshed = state
        .sessions()
        .refresh(client, &CurrentUser::from(&user))
        .await?;

    tracing::info!(user_id = %user.id, refreshed, "profile updated");
    Ok(ApiResponse::success(
        "Profile updated",
        profile_view(&user, profile),
        None,
    ))
}

pub async fn change_password(
    state: &AppState,
    auth: &AuthUser,
    payload: ChangePasswordRequest,
) -> AppResult<ApiResponse<serde_json::Value>> {
    validate_confirmation(&payload.new_password, &payload.confirm_password)?;
    validate_password(&payload.new_password)?;

    let user = load_user(state, auth).await?;
    if !verify_password(&payload.current_password, &user.password_hash).await? {
        return Err(ValidationError::WrongCurrentPassword.into());
    }

    let password_hash = hash_password(&payload.new_password).await?;
    state
        .users()
        .modify(user.id, |user| user.password_hash = password_hash)
        .await?;

    tracing::info!(user_id = %user.id, "password changed");
    Ok(ApiResponse::success(
        "Password changed",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
