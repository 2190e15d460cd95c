mod common;

use micado_storefront::{
    dto::{
        auth::{LoginRequest, RegisterRequest},
        orders::OrderListQuery,
        profile::{ChangePasswordRequest, UpdateProfileRequest},
    },
    error::AppError,
    middleware::auth::{AuthUser, decode_token},
    models::ClientId,
    services::{auth_service, order_service, profile_service},
    state::AppState,
    store::StoreScope,
    validation::ValidationError,
};

fn registration(email: &str) -> RegisterRequest {
    RegisterRequest {
        name: "Nguyễn Văn An".to_string(),
        email: email.to_string(),
        phone: "0901 234 567".to_string(),
        password: "secret123".to_string(),
        confirm_password: "secret123".to_string(),
        accept_terms: true,
    }
}

fn credentials(email: &str, password: &str, remember: bool) -> LoginRequest {
    LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
        remember,
    }
}

async fn sign_in(state: &AppState, client: &ClientId, remember: bool) -> anyhow::Result<AuthUser> {
    let resp = auth_service::login_user(
        state,
        client,
        credentials("an@micado.vn", "secret123", remember),
    )
    .await?;
    let login = resp.data.expect("login data");
    let token = login.token.strip_prefix("Bearer ").expect("bearer prefix");
    Ok(decode_token(token, common::JWT_SECRET)?)
}

#[tokio::test]
async fn registration_validates_in_order_and_rejects_duplicates() -> anyhow::Result<()> {
    let state = common::test_state();

    let mut bad = registration("not-an-email");
    bad.name = "A".to_string();
    let err = auth_service::register_user(&state, bad).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(ValidationError::NameTooShort)));

    let mut mismatch = registration("an@micado.vn");
    mismatch.confirm_password = "other123".to_string();
    let err = auth_service::register_user(&state, mismatch)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::PasswordMismatch)
    ));

    let mut no_terms = registration("an@micado.vn");
    no_terms.accept_terms = false;
    let err = auth_service::register_user(&state, no_terms)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::TermsNotAccepted)
    ));

    let created = auth_service::register_user(&state, registration("an@micado.vn"))
        .await?
        .data
        .expect("user");
    assert_eq!(created.email, "an@micado.vn");

    let err = auth_service::register_user(&state, registration("AN@micado.vn"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::DuplicateEmail)
    ));
    assert_eq!(state.users().all().await?.len(), 1);

    let stored = state.users().all().await?.remove(0);
    assert_ne!(stored.password_hash, "secret123");
    assert_eq!(stored.phone, "0901234567");
    Ok(())
}

#[tokio::test]
async fn login_scope_follows_remember_me() -> anyhow::Result<()> {
    let state = common::test_state();
    let client = common::client("browser-a");
    auth_service::register_user(&state, registration("an@micado.vn")).await?;

    let err = auth_service::login_user(
        &state,
        &client,
        credentials("an@micado.vn", "wrong-pass", false),
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::InvalidCredentials)
    ));

    sign_in(&state, &client, false).await?;
    let (user, scope) = state.sessions().current(&client).await?.expect("signed in");
    assert_eq!(user.email, "an@micado.vn");
    assert_eq!(scope, StoreScope::Session);

    state.store.clear_scope(StoreScope::Session).await?;
    assert!(state.sessions().current(&client).await?.is_none());

    sign_in(&state, &client, true).await?;
    state.store.clear_scope(StoreScope::Session).await?;
    let (_, scope) = state.sessions().current(&client).await?.expect("remembered");
    assert_eq!(scope, StoreScope::Durable);

    let me = auth_service::current_user(&state, &client)
        .await?
        .data
        .expect("user");
    assert_eq!(me.name, "Nguyễn Văn An");

    auth_service::logout_user(&state, &client).await?;
    let err = auth_service::current_user(&state, &client)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
    Ok(())
}

#[tokio::test]
async fn tokens_are_checked_against_the_secret() -> anyhow::Result<()> {
    let state = common::test_state();
    let client = common::client("browser-a");
    auth_service::register_user(&state, registration("an@micado.vn")).await?;

    let resp = auth_service::login_user(
        &state,
        &client,
        credentials("an@micado.vn", "secret123", false),
    )
    .await?;
    let token = resp.data.expect("login").token;
    let token = token.trim_start_matches("Bearer ");

    assert!(decode_token(token, common::JWT_SECRET).is_ok());
    assert!(matches!(
        decode_token(token, "another-secret"),
        Err(AppError::Unauthorized(_))
    ));
    Ok(())
}

#[tokio::test]
async fn profile_update_renames_the_signed_in_user() -> anyhow::Result<()> {
    let state = common::test_state();
    let client = common::client("browser-a");
    auth_service::register_user(&state, registration("an@micado.vn")).await?;
    let auth = sign_in(&state, &client, true).await?;

    let profile = profile_service::get_profile(&state, &auth)
        .await?
        .data
        .expect("profile");
    assert_eq!(profile.name, "Nguyễn Văn An");
    assert_eq!(profile.phone, "0901234567");
    assert!(profile.address.is_empty());

    let update = UpdateProfileRequest {
        name: "An Nguyễn".to_string(),
        phone: "0912345678".to_string(),
        birthday: "1995-04-12".to_string(),
        address: "12 Lê Lợi, Quận 1".to_string(),
    };
    let updated = profile_service::update_profile(&state, &client, &auth, update)
        .await?
        .data
        .expect("profile");
    assert_eq!(updated.name, "An Nguyễn");
    assert_eq!(updated.address, "12 Lê Lợi, Quận 1");

    let (current, _) = state.sessions().current(&client).await?.expect("signed in");
    assert_eq!(current.name, "An Nguyễn");
    let stored = state
        .users()
        .find_by_id(auth.user_id)
        .await?
        .expect("user");
    assert_eq!(stored.name, "An Nguyễn");

    let short = UpdateProfileRequest {
        name: "A".to_string(),
        phone: String::new(),
        birthday: String::new(),
        address: String::new(),
    };
    let err = profile_service::update_profile(&state, &client, &auth, short)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(ValidationError::NameTooShort)));
    Ok(())
}

#[tokio::test]
async fn password_change_requires_the_current_password() -> anyhow::Result<()> {
    let state = common::test_state();
    let client = common::client("browser-a");
    auth_service::register_user(&state, registration("an@micado.vn")).await?;
    let auth = sign_in(&state, &client, false).await?;

    let wrong = ChangePasswordRequest {
        current_password: "not-it".to_string(),
        new_password: "fresh-pass".to_string(),
        confirm_password: "fresh-pass".to_string(),
    };
    let err = profile_service::change_password(&state, &auth, wrong)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::WrongCurrentPassword)
    ));

    let change = ChangePasswordRequest {
        current_password: "secret123".to_string(),
        new_password: "fresh-pass".to_string(),
        confirm_password: "fresh-pass".to_string(),
    };
    profile_service::change_password(&state, &auth, change).await?;

    let old = auth_service::login_user(
        &state,
        &client,
        credentials("an@micado.vn", "secret123", false),
    )
    .await;
    assert!(old.is_err());
    auth_service::login_user(
        &state,
        &client,
        credentials("an@micado.vn", "fresh-pass", false),
    )
    .await?;
    Ok(())
}

#[tokio::test]
async fn order_history_is_empty_and_filters_by_status() -> anyhow::Result<()> {
    let state = common::test_state();
    let client = common::client("browser-a");
    auth_service::register_user(&state, registration("an@micado.vn")).await?;
    let auth = sign_in(&state, &client, false).await?;

    let all = order_service::list_orders(&state, &auth, OrderListQuery { status: None })
        .await?
        .data
        .expect("orders");
    assert!(all.items.is_empty());

    let query = OrderListQuery {
        status: Some("delivered".to_string()),
    };
    let delivered = order_service::list_orders(&state, &auth, query)
        .await?
        .data
        .expect("orders");
    assert!(delivered.items.is_empty());

    let query = OrderListQuery {
        status: Some("lost".to_string()),
    };
    let err = order_service::list_orders(&state, &auth, query)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::UnknownOrderStatus(_))
    ));
    Ok(())
}

#[tokio::test(flavor = "current_thread")]
async fn password_hashing_round_trips_on_the_blocking_pool() -> anyhow::Result<()> {
    let hash = auth_service::hash_password("secret123").await?;
    assert_ne!(hash, "secret123");
    assert!(auth_service::verify_password("secret123", &hash).await?);
    assert!(!auth_service::verify_password("secret124", &hash).await?);

    let err = auth_service::verify_password("secret123", "not-a-phc-string")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Internal(_)));
    Ok(())
}
