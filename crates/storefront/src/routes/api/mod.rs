//! JSON API route handlers.
//!
//! Token-authenticated REST surface mirroring the HTML storefront:
//!
//! ```text
//! POST   /api/auth/register    - Create account, returns user + token
//! POST   /api/auth/login       - Returns user + token
//! POST   /api/auth/logout      - Deletes the caller's token
//!
//! GET    /api/products         - Product listing (?category=<menu id>)
//! POST   /api/products         - Create product (staff only)
//! GET    /api/products/{id}    - Product detail
//! GET    /api/products/{id}/reviews - Product reviews
//! POST   /api/products/{id}/reviews - Submit review
//!
//! GET    /api/cart             - Cart contents
//! POST   /api/cart             - Add product (existing line increments)
//!
//! GET    /api/favourites       - Favourite list
//! POST   /api/favourites       - Add favourite (idempotent)
//! DELETE /api/favourites       - Remove favourite
//!
//! GET    /api/orders           - Order history
//! POST   /api/orders           - Place order from cart
//! GET    /api/orders/{id}      - Order detail
//! POST   /api/orders/{id}/shipping - Save shipping address
//! POST   /api/orders/{id}/payment  - Save payment method
//! ```
//!
//! All endpoints except register/login require `Authorization: Token <key>`.

pub mod auth;
pub mod cart;
pub mod favourites;
pub mod orders;
pub mod products;
pub mod reviews;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Serialize;

use crate::models::User;
use crate::state::AppState;

/// Create the JSON API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/products", get(products::index).post(products::create))
        .route("/products/{id}", get(products::show))
        .route(
            "/products/{id}/reviews",
            get(reviews::index).post(reviews::create),
        )
        .route("/cart", get(cart::show).post(cart::add))
        .route(
            "/favourites",
            get(favourites::index)
                .post(favourites::add)
                .delete(favourites::remove),
        )
        .route("/orders", get(orders::index).post(orders::create))
        .route("/orders/{id}", get(orders::show))
        .route("/orders/{id}/shipping", post(orders::save_shipping))
        .route("/orders/{id}/payment", post(orders::save_payment))
}

/// User shape returned by auth endpoints.
#[derive(Debug, Serialize)]
pub struct UserBody {
    pub id: orchard_core::UserId,
    pub email: String,
    pub is_staff: bool,
}

impl From<&User> for UserBody {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.to_string(),
            is_staff: user.is_staff,
        }
    }
}
