//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Dashboard (menus, new arrivals, best sellers, reviews)
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /products               - Product listing (?category=<menu id>)
//! GET  /products/{id}          - Product detail with related products and reviews
//! POST /products/{id}/reviews  - Submit a review (requires auth)
//!
//! # Cart (requires auth)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add product (existing line increments)
//! POST /cart/update            - Increment/decrement a line
//! POST /cart/remove            - Remove a line
//!
//! # Favourites (requires auth)
//! GET  /favourites             - Favourite list
//! POST /favourites/add         - Add product (idempotent)
//! POST /favourites/remove      - Remove product
//!
//! # Orders (requires auth)
//! GET  /orders                 - Order history
//! POST /orders                 - Place order from cart
//! GET  /orders/{id}            - Order detail
//! GET  /orders/{id}/shipping   - Shipping address form
//! POST /orders/{id}/shipping   - Save shipping address
//! GET  /orders/{id}/payment    - Payment method form
//! POST /orders/{id}/payment    - Save payment method
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/register          - Register page
//! POST /auth/register          - Register action
//! POST /auth/logout            - Logout action
//!
//! # Account (requires auth)
//! GET  /account                - Profile page
//! POST /account                - Update profile
//!
//! # JSON API (token auth)    - see `api` module
//! # Admin back office (staff) - see `admin` module
//! ```

pub mod account;
pub mod admin;
pub mod api;
pub mod auth;
pub mod cart;
pub mod favourites;
pub mod home;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::{api_rate_limiter, auth_rate_limiter};
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
        .layer(auth_rate_limiter())
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
        .route("/{id}/reviews", post(products::create_review))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
}

/// Create the favourite routes router.
pub fn favourite_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(favourites::index))
        .route("/add", post(favourites::add))
        .route("/remove", post(favourites::remove))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index).post(orders::create))
        .route("/{id}", get(orders::show))
        .route(
            "/{id}/shipping",
            get(orders::shipping_form).post(orders::save_shipping),
        )
        .route(
            "/{id}/payment",
            get(orders::payment_form).post(orders::save_payment),
        )
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new().route("/", get(account::show).post(account::update))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/favourites", favourite_routes())
        .nest("/orders", order_routes())
        .nest("/account", account_routes())
        .nest("/auth", auth_routes())
        .nest("/api", api::routes().layer(api_rate_limiter()))
        .nest("/admin", admin::routes())
}
