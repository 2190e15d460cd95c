mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use micado_storefront::routes;
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    routes::app(common::test_state())
}

async fn send(app: &Router, request: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, body))
}

fn json_request(method: &str, uri: &str, client: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(client) = client {
        builder = builder.header("x-client-id", client);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn get(uri: &str, client: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(client) = client {
        builder = builder.header("x-client-id", client);
    }
    builder.body(Body::empty()).expect("request")
}

#[tokio::test]
async fn product_listing_over_http() -> anyhow::Result<()> {
    let app = app();

    let (status, body) = send(&app, get("/api/products?status=new&sort=name-asc", None)).await?;
    assert_eq!(status, StatusCode::OK);
    let items = body["data"].as_array().expect("product array");
    assert!(!items.is_empty());
    assert!(items.iter().all(|p| p["status"]
        .as_array()
        .is_some_and(|tags| tags.contains(&json!("new")))));
    assert_eq!(body["meta"]["per_page"], json!(12));

    let (status, body) = send(&app, get("/api/products?price=9-1", None)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["data"]["error"].is_string());

    let (status, _) = send(&app, get("/api/products/9999", None)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn cart_requires_a_client_id() -> anyhow::Result<()> {
    let app = app();

    let (status, _) = send(&app, get("/api/cart", None)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, get("/api/cart", Some("not a valid id!"))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let add = json_request(
        "POST",
        "/api/cart/items",
        Some("browser-a"),
        json!({ "product_id": 2, "quantity": 2 }),
    );
    let (status, body) = send(&app, add).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["summary"]["subtotal"], json!(500_000));
    assert_eq!(body["data"]["summary"]["shipping"], json!(0));
    assert_eq!(body["data"]["items"][0]["id"], json!(2));

    let unknown = json_request(
        "POST",
        "/api/cart/items",
        Some("browser-a"),
        json!({ "product_id": 999 }),
    );
    let (status, _) = send(&app, unknown).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let coupon = json_request(
        "POST",
        "/api/cart/coupon",
        Some("browser-a"),
        json!({ "code": "micado10" }),
    );
    let (status, body) = send(&app, coupon).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["summary"]["discount"], json!(50_000));
    assert_eq!(body["data"]["summary"]["total"], json!(450_000));
    Ok(())
}

#[tokio::test]
async fn profile_needs_a_bearer_token() -> anyhow::Result<()> {
    let app = app();

    let (status, _) = send(&app, get("/api/profile", None)).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let register = json_request(
        "POST",
        "/api/auth/register",
        None,
        json!({
            "name": "Lê Chi",
            "email": "chi@micado.vn",
            "phone": "0909000111",
            "password": "secret123",
            "confirm_password": "secret123",
            "accept_terms": true
        }),
    );
    let (status, _) = send(&app, register).await?;
    assert_eq!(status, StatusCode::CREATED);

    let login = json_request(
        "POST",
        "/api/auth/login",
        Some("browser-c"),
        json!({ "email": "chi@micado.vn", "password": "secret123" }),
    );
    let (status, body) = send(&app, login).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["persistence"], json!("session"));
    let token = body["data"]["token"].as_str().expect("token").to_string();

    let request = Request::builder()
        .uri("/api/profile")
        .header(header::AUTHORIZATION, token)
        .body(Body::empty())?;
    let (status, body) = send(&app, request).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], json!("chi@micado.vn"));

    let (status, body) = send(&app, get("/api/auth/me", Some("browser-c"))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], json!("Lê Chi"));
    Ok(())
}

#[tokio::test]
async fn unknown_routes_fall_back_to_not_found() -> anyhow::Result<()> {
    let app = app();
    let (status, body) = send(&app, get("/nope", None)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["data"]["path"], json!("/nope"));
    Ok(())
}
