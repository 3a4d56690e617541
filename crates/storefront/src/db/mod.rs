//! Database operations for the Orchard Market `PostgreSQL` database.
//!
//! # Tables (schema `shop`)
//!
//! - `user`, `user_password`, `profile`, `api_token` - accounts and auth
//! - `menu`, `product` - catalog
//! - `cart`, `cart_item` - shopping carts
//! - `favourite`, `review` - user-product relations
//! - `order`, `order_item`, `shipping`, `payment` - orders
//!
//! Sessions live in `tower_sessions.session` (managed by tower-sessions).
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p orchard-cli -- migrate
//! ```
//!
//! All queries are runtime-checked (`sqlx::query_as` with `FromRow` models),
//! so the workspace builds without a live database.

pub mod carts;
pub mod favourites;
pub mod menus;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use carts::CartRepository;
pub use favourites::FavouriteRepository;
pub use menus::MenuRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use reviews::ReviewRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Attempted to place an order from an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Ordered quantity exceeds available stock.
    #[error("insufficient stock for {product}: {requested} requested, {available} available")]
    InsufficientStock {
        product: String,
        requested: i32,
        available: i32,
    },
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Row counts shown on the admin dashboard.
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct EntityCounts {
    pub users: i64,
    pub menus: i64,
    pub products: i64,
    pub orders: i64,
    pub reviews: i64,
}

/// Count every back-office entity in one round trip.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn entity_counts(pool: &PgPool) -> Result<EntityCounts, RepositoryError> {
    let counts = sqlx::query_as::<_, EntityCounts>(
        r#"
        SELECT (SELECT count(*) FROM shop."user") AS users,
               (SELECT count(*) FROM shop.menu) AS menus,
               (SELECT count(*) FROM shop.product) AS products,
               (SELECT count(*) FROM shop."order") AS orders,
               (SELECT count(*) FROM shop.review) AS reviews
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(counts)
}

/// Map a sqlx error to `Conflict` when it is a unique violation.
pub(crate) fn conflict_on_unique(e: sqlx::Error, message: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(message.to_owned());
    }
    RepositoryError::Database(e)
}

/// Map a sqlx error to `NotFound` when it is a foreign key violation.
///
/// Inserts referencing a client-supplied ID (cart and favourite adds) hit
/// the FK constraint when the product doesn't exist; that is a missing
/// record, not a server fault.
pub(crate) fn not_found_on_fk(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_foreign_key_violation()
    {
        return RepositoryError::NotFound;
    }
    RepositoryError::Database(e)
}
