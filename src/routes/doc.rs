use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    catalog::query::SortKey,
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        cart::{AddToCartRequest, ApplyCouponRequest, CartView, UpdateQuantityRequest},
        contact::{ContactReceipt, ContactRequest},
        orders::OrderList,
        products::{CategoryInfo, FeaturedProducts, ProductList, SuggestionList},
        profile::{ChangePasswordRequest, ProfileView, UpdateProfileRequest},
    },
    models::{CartLineItem, Category, CurrentUser, Order, OrderStatus, Product, StatusTag},
    pricing::{AppliedCoupon, Coupon, PriceSummary},
    response::{ApiResponse, Meta},
    routes::{auth, cart, contact, health, orders, products, profile},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::featured_products,
        products::search_suggestions,
        products::get_product,
        products::related_products,
        products::list_categories,
        cart::get_cart,
        cart::add_to_cart,
        cart::update_quantity,
        cart::remove_item,
        cart::clear_cart,
        cart::apply_coupon,
        cart::remove_coupon,
        cart::checkout,
        auth::register,
        auth::login,
        auth::logout,
        auth::me,
        profile::get_profile,
        profile::update_profile,
        profile::change_password,
        orders::list_orders,
        contact::contact
    ),
    components(
        schemas(
            Product,
            Category,
            StatusTag,
            SortKey,
            CartLineItem,
            CurrentUser,
            Order,
            OrderStatus,
            Coupon,
            AppliedCoupon,
            PriceSummary,
            ProductList,
            FeaturedProducts,
            CategoryInfo,
            SuggestionList,
            CartView,
            AddToCartRequest,
            UpdateQuantityRequest,
            ApplyCouponRequest,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            ProfileView,
            UpdateProfileRequest,
            ChangePasswordRequest,
            OrderList,
            ContactRequest,
            ContactReceipt,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<CartView>,
            ApiResponse<LoginResponse>,
            ApiResponse<ProfileView>,
            ApiResponse<OrderList>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Catalog browsing endpoints"),
        (name = "Cart", description = "Cart and pricing endpoints"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Profile", description = "Account profile endpoints"),
        (name = "Orders", description = "Order history endpoints"),
        (name = "Contact", description = "Contact form endpoint"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
