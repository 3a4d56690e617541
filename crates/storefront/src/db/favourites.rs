//! Favourite (wishlist) repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use orchard_core::{FavouriteId, ProductId, UserId};

use super::RepositoryError;

/// A favourite joined with its product, as shown on the favourites page.
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct FavouriteEntry {
    pub id: FavouriteId,
    pub product_id: ProductId,
    pub product_name: String,
    pub price: Decimal,
    pub stock: i32,
    pub image_path: Option<String>,
    pub added_at: DateTime<Utc>,
}

/// Repository for favourite database operations.
pub struct FavouriteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FavouriteRepository<'a> {
    /// Create a new favourite repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's favourites with their products, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<FavouriteEntry>, RepositoryError> {
        let entries = sqlx::query_as::<_, FavouriteEntry>(
            r"
            SELECT f.id, p.id AS product_id, p.name AS product_name,
                   p.price, p.stock, p.image_path, f.added_at
            FROM shop.favourite f
            JOIN shop.product p ON p.id = f.product_id
            WHERE f.user_id = $1
            ORDER BY f.id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }

    /// The product IDs a user has favourited, for marking catalog listings.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn product_ids(&self, user_id: UserId) -> Result<Vec<ProductId>, RepositoryError> {
        let ids = sqlx::query_scalar::<_, ProductId>(
            "SELECT product_id FROM shop.favourite WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(ids)
    }

    /// Add a product to the user's favourites. Adding an existing favourite
    /// is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other query failures.
    pub async fn add(&self, user_id: UserId, product_id: ProductId) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO shop.favourite (user_id, product_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, product_id) DO NOTHING
            ",
        )
        .bind(user_id)
        .bind(product_id)
        .execute(self.pool)
        .await
        .map_err(super::not_found_on_fk)?;

        Ok(())
    }

    /// Remove a product from the user's favourites.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product wasn't favourited.
    pub async fn remove(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("DELETE FROM shop.favourite WHERE user_id = $1 AND product_id = $2")
                .bind(user_id)
                .bind(product_id)
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
