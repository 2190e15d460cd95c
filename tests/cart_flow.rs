mod common;

use micado_storefront::{
    dto::cart::{AddToCartRequest, ApplyCouponRequest, UpdateQuantityRequest},
    error::AppError,
    pricing::{FREE_SHIPPING_THRESHOLD, MAX_QUANTITY, SHIPPING_FEE},
    services::cart_service,
    store::StoreScope,
    validation::ValidationError,
};

fn add(product_id: u64, quantity: Option<i64>) -> AddToCartRequest {
    AddToCartRequest {
        product_id,
        quantity,
    }
}

#[tokio::test]
async fn adding_twice_merges_the_line_and_prices_it() -> anyhow::Result<()> {
    let state = common::test_state();
    let client = common::client("browser-a");

    cart_service::add_to_cart(&state, &client, add(1, Some(2))).await?;
    let resp = cart_service::add_to_cart(&state, &client, add(1, None)).await?;
    let cart = resp.data.expect("cart");

    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].quantity, 3);
    assert_eq!(cart.item_count, 3);
    assert_eq!(cart.summary.subtotal, 300_000);
    assert_eq!(cart.summary.shipping, SHIPPING_FEE);
    assert_eq!(cart.summary.discount, 0);
    assert_eq!(cart.summary.total, 330_000);
    Ok(())
}

#[tokio::test]
async fn quantities_are_clamped() -> anyhow::Result<()> {
    let state = common::test_state();
    let client = common::client("browser-a");

    let cart = cart_service::add_to_cart(&state, &client, add(4, Some(250)))
        .await?
        .data
        .expect("cart");
    assert_eq!(cart.items[0].quantity, MAX_QUANTITY);

    let lowered = UpdateQuantityRequest {
        delta: Some(-500),
        quantity: None,
    };
    let cart = cart_service::update_quantity(&state, &client, 4, lowered)
        .await?
        .data
        .expect("cart");
    assert_eq!(cart.items[0].quantity, 1);

    let absolute = UpdateQuantityRequest {
        delta: None,
        quantity: Some(7),
    };
    let cart = cart_service::update_quantity(&state, &client, 4, absolute)
        .await?
        .data
        .expect("cart");
    assert_eq!(cart.items[0].quantity, 7);
    Ok(())
}

#[tokio::test]
async fn invalid_cart_requests_are_rejected() -> anyhow::Result<()> {
    let state = common::test_state();
    let client = common::client("browser-a");

    let err = cart_service::add_to_cart(&state, &client, add(999, None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let err = cart_service::add_to_cart(&state, &client, add(1, Some(0)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let missing = UpdateQuantityRequest {
        delta: Some(1),
        quantity: None,
    };
    let err = cart_service::update_quantity(&state, &client, 2, missing)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    cart_service::add_to_cart(&state, &client, add(2, None)).await?;
    let both = UpdateQuantityRequest {
        delta: Some(1),
        quantity: Some(3),
    };
    let err = cart_service::update_quantity(&state, &client, 2, both)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = cart_service::remove_item(&state, &client, 3)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
    Ok(())
}

#[tokio::test]
async fn coupons_apply_and_unknown_codes_leave_state_alone() -> anyhow::Result<()> {
    let state = common::test_state();
    let client = common::client("browser-a");
    cart_service::add_to_cart(&state, &client, add(2, Some(1))).await?;

    let applied = ApplyCouponRequest {
        code: "  micado20 ".to_string(),
    };
    let cart = cart_service::apply_coupon(&state, &client, applied)
        .await?
        .data
        .expect("cart");
    assert_eq!(cart.coupon.as_ref().map(|c| c.code.as_str()), Some("MICADO20"));
    assert_eq!(cart.summary.discount, 50_000);
    assert_eq!(cart.summary.total, 250_000 + SHIPPING_FEE - 50_000);

    let unknown = ApplyCouponRequest {
        code: "HALFOFF".to_string(),
    };
    let err = cart_service::apply_coupon(&state, &client, unknown)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::UnknownCoupon(_))
    ));

    let cart = cart_service::get_cart(&state, &client)
        .await?
        .data
        .expect("cart");
    assert_eq!(cart.coupon.map(|c| c.code), Some("MICADO20".to_string()));

    let free = ApplyCouponRequest {
        code: "FREESHIP".to_string(),
    };
    let cart = cart_service::apply_coupon(&state, &client, free)
        .await?
        .data
        .expect("cart");
    assert_eq!(cart.summary.shipping, 0);
    assert_eq!(cart.summary.discount, 0);
    assert_eq!(cart.summary.total, 250_000);

    let cart = cart_service::remove_coupon(&state, &client)
        .await?
        .data
        .expect("cart");
    assert!(cart.coupon.is_none());
    assert_eq!(cart.summary.shipping, SHIPPING_FEE);
    Ok(())
}

#[tokio::test]
async fn shipping_is_free_from_the_threshold() -> anyhow::Result<()> {
    let state = common::test_state();
    let client = common::client("browser-a");

    cart_service::add_to_cart(&state, &client, add(14, None)).await?;
    let cart = cart_service::add_to_cart(&state, &client, add(9, None))
        .await?
        .data
        .expect("cart");
    assert_eq!(cart.summary.subtotal, FREE_SHIPPING_THRESHOLD);
    assert_eq!(cart.summary.shipping, 0);
    assert_eq!(cart.summary.total, FREE_SHIPPING_THRESHOLD);
    Ok(())
}

#[tokio::test]
async fn checkout_requires_items_and_keeps_the_cart() -> anyhow::Result<()> {
    let state = common::test_state();
    let client = common::client("browser-a");

    let err = cart_service::checkout(&state, &client).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(ValidationError::EmptyCart)));

    cart_service::add_to_cart(&state, &client, add(5, Some(2))).await?;
    let summary = cart_service::checkout(&state, &client)
        .await?
        .data
        .expect("cart");
    assert_eq!(summary.summary.total, 240_000 + SHIPPING_FEE);

    let cart = cart_service::get_cart(&state, &client)
        .await?
        .data
        .expect("cart");
    assert_eq!(cart.items.len(), 1);

    let cleared = cart_service::clear_cart(&state, &client)
        .await?
        .data
        .expect("cart");
    assert!(cleared.items.is_empty());
    assert_eq!(cleared.summary.total, SHIPPING_FEE);
    Ok(())
}

#[tokio::test]
async fn clients_are_isolated_and_coupons_end_with_the_session() -> anyhow::Result<()> {
    let state = common::test_state();
    let first = common::client("browser-a");
    let second = common::client("browser-b");

    cart_service::add_to_cart(&state, &first, add(1, None)).await?;
    let coupon = ApplyCouponRequest {
        code: "MICADO10".to_string(),
    };
    cart_service::apply_coupon(&state, &first, coupon).await?;

    let other = cart_service::get_cart(&state, &second)
        .await?
        .data
        .expect("cart");
    assert!(other.items.is_empty());
    assert!(other.coupon.is_none());

    state.store.clear_scope(StoreScope::Session).await?;

    let cart = cart_service::get_cart(&state, &first)
        .await?
        .data
        .expect("cart");
    assert_eq!(cart.items.len(), 1);
    assert!(cart.coupon.is_none());
    Ok(())
}
