use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dto::products::{CategoryInfo, FeaturedProducts, ProductList, SuggestionList},
    error::AppResult,
    models::{Product, ProductId},
    response::ApiResponse,
    routes::params::{ProductListParams, SuggestionQuery},
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/featured", get(featured_products))
        .route("/suggestions", get(search_suggestions))
        .route("/{id}", get(get_product))
        .route("/{id}/related", get(related_products))
}

pub fn categories_router() -> Router<AppState> {
    Router::new().route("/", get(list_categories))
}

#[utoipa::path(
    get,
    path = "/api/products",
    params(ProductListParams),
    responses(
        (status = 200, description = "Filtered, sorted and paginated products", body = ApiResponse<ProductList>),
        (status = 400, description = "Unknown category, status or malformed price bucket")
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let query = params.into_query()?;
    let resp = product_service::list_products(&state, query)?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/featured",
    responses(
        (status = 200, description = "Hot and new products for the home page", body = ApiResponse<FeaturedProducts>)
    ),
    tag = "Products"
)]
pub async fn featured_products(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<FeaturedProducts>>> {
    Ok(Json(product_service::featured_products(&state)?))
}

#[utoipa::path(
    get,
    path = "/api/products/suggestions",
    params(SuggestionQuery),
    responses(
        (status = 200, description = "Product names matching the keyword", body = ApiResponse<SuggestionList>),
        (status = 400, description = "Empty keyword")
    ),
    tag = "Products"
)]
pub async fn search_suggestions(
    State(state): State<AppState>,
    Query(query): Query<SuggestionQuery>,
) -> AppResult<Json<ApiResponse<SuggestionList>>> {
    let keyword = query.q.unwrap_or_default();
    Ok(Json(product_service::search_suggestions(&state, &keyword)?))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = u64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "OK", body = ApiResponse<Product>),
        (status = 404, description = "Product not found")
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> AppResult<Json<ApiResponse<Product>>> {
    Ok(Json(product_service::get_product(&state, id)?))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}/related",
    params(
        ("id" = u64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Products related to the given one", body = ApiResponse<ProductList>),
        (status = 404, description = "Product not found")
    ),
    tag = "Products"
)]
pub async fn related_products(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    Ok(Json(product_service::related_products(&state, id)?))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Categories with product counts", body = ApiResponse<Vec<CategoryInfo>>)
    ),
    tag = "Products"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<CategoryInfo>>>> {
    Ok(Json(product_service::list_categories(&state)?))
}
