mod common;

use axum::extract::State;
use micado_storefront::routes::health::health_check;

#[tokio::test]
async fn health_check_returns_ok() {
    let state = common::test_state();
    let expected = state.catalog.len();

    let response = health_check(State(state)).await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
    assert_eq!(data.catalog_size, expected);
}
