use crate::{
    catalog::{
        FEATURED_LIMIT, RELATED_LIMIT, SUGGESTION_LIMIT,
        query::{ProductQuery, run_query},
    },
    dto::products::{CategoryInfo, FeaturedProducts, ProductList, SuggestionList},
    error::{AppError, AppResult},
    models::{Category, Product, ProductId, StatusTag},
    response::{ApiResponse, Meta},
    state::AppState,
    validation::ValidationError,
};

pub fn list_products(state: &AppState, query: ProductQuery) -> AppResult<ApiResponse<ProductList>> {
    let page = run_query(state.catalog.products(), &query);
    tracing::debug!(
        total = page.total,
        page = page.page,
        sort = ?query.sort,
        "catalog query"
    );

    let meta = Meta::from_page(&page);
    // An empty result is a normal outcome, not an error.
    let message = if page.is_empty() {
        "No products found"
    } else {
        "Products"
    };
    Ok(ApiResponse::success(
        message,
        ProductList { items: page.items },
        Some(meta),
    ))
}

pub fn get_product(state: &AppState, id: ProductId) -> AppResult<ApiResponse<Product>> {
    let product = state.catalog.find(id).cloned().ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Product", product, None))
}

pub fn related_products(state: &AppState, id: ProductId) -> AppResult<ApiResponse<ProductList>> {
    let items = state
        .catalog
        .related(id, RELATED_LIMIT)
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success(
        "Related products",
        ProductList { items },
        Some(Meta::empty()),
    ))
}

pub fn featured_products(state: &AppState) -> AppResult<ApiResponse<FeaturedProducts>> {
    let data = FeaturedProducts {
        hot: state.catalog.tagged(StatusTag::Hot, FEATURED_LIMIT),
        new: state.catalog.tagged(StatusTag::New, FEATURED_LIMIT),
    };
    Ok(ApiResponse::success("Featured products", data, None))
}

pub fn search_suggestions(
    state: &AppState,
    keyword: &str,
) -> AppResult<ApiResponse<SuggestionList>> {
    if keyword.trim().is_empty() {
        return Err(ValidationError::EmptyKeyword.into());
    }
    let items = state.catalog.suggestions(keyword, SUGGESTION_LIMIT);
    Ok(ApiResponse::success(
        "Suggestions",
        SuggestionList { items },
        None,
    ))
}

pub fn list_categories(state: &AppState) -> AppResult<ApiResponse<Vec<CategoryInfo>>> {
    let categories = Category::ALL
        .into_iter()
        .map(|category| CategoryInfo {
            slug: category,
            label: category.label().to_string(),
            product_count: state.catalog.count_in(category),
        })
        .collect();
    Ok(ApiResponse::success("Categories", categories, None))
}
