//! Admin back office route handlers.
//!
//! All handlers take the `RequireStaff` extractor: anonymous visitors are
//! sent to login, logged-in non-staff get 403.
//!
//! ```text
//! GET  /admin                        - Dashboard with entity counts
//!
//! GET  /admin/products               - Product list (?q= name search)
//! GET  /admin/products/new           - New product form
//! POST /admin/products               - Create product
//! GET  /admin/products/{id}/edit     - Edit product form
//! POST /admin/products/{id}          - Update product
//! POST /admin/products/{id}/delete   - Delete product
//!
//! GET  /admin/menus                  - Menu list + create form
//! POST /admin/menus                  - Create menu (optionally under parent)
//! POST /admin/menus/{id}/delete      - Delete menu
//!
//! GET  /admin/orders                 - All orders
//! GET  /admin/orders/{id}            - Order detail
//! POST /admin/orders/{id}/status     - Update order status
//!
//! GET  /admin/users                  - User list
//! GET  /admin/reviews                - Review list
//! POST /admin/reviews/{id}/delete    - Delete review
//! ```

pub mod dashboard;
pub mod menus;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the admin router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/products", get(products::index).post(products::create))
        .route("/products/new", get(products::new_form))
        .route("/products/{id}", post(products::update))
        .route("/products/{id}/edit", get(products::edit_form))
        .route("/products/{id}/delete", post(products::delete))
        .route("/menus", get(menus::index).post(menus::create))
        .route("/menus/{id}/delete", post(menus::delete))
        .route("/orders", get(orders::index))
        .route("/orders/{id}", get(orders::show))
        .route("/orders/{id}/status", post(orders::update_status))
        .route("/users", get(users::index))
        .route("/reviews", get(reviews::index))
        .route("/reviews/{id}/delete", post(reviews::delete))
}
