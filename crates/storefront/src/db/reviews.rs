//! Review repository.

use sqlx::PgPool;

use orchard_core::{ProductId, ReviewId, UserId};

use super::RepositoryError;
use crate::models::{ProductReview, Review};

const JOINED_COLUMNS: &str = r"
    r.id, r.product_id, p.name AS product_name, u.email AS author_email,
    r.rating, r.comment, r.created_at
";

/// Repository for review database operations.
pub struct ReviewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// A product's reviews with author emails, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<ProductReview>, RepositoryError> {
        let reviews = sqlx::query_as::<_, ProductReview>(&format!(
            r#"
            SELECT {JOINED_COLUMNS}
            FROM shop.review r
            JOIN shop.product p ON p.id = r.product_id
            JOIN shop."user" u ON u.id = r.user_id
            WHERE r.product_id = $1
            ORDER BY r.id DESC
            "#
        ))
        .bind(product_id)
        .fetch_all(self.pool)
        .await?;

        Ok(reviews)
    }

    /// The latest reviews across all products, for the dashboard.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn latest(&self, limit: i64) -> Result<Vec<ProductReview>, RepositoryError> {
        let reviews = sqlx::query_as::<_, ProductReview>(&format!(
            r#"
            SELECT {JOINED_COLUMNS}
            FROM shop.review r
            JOIN shop.product p ON p.id = r.product_id
            JOIN shop."user" u ON u.id = r.user_id
            ORDER BY r.id DESC
            LIMIT $1
            "#
        ))
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(reviews)
    }

    /// Create a review.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails (including a
    /// nonexistent product, surfaced as a foreign key violation, and an
    /// out-of-range rating, rejected by a CHECK constraint).
    pub async fn create(
        &self,
        user_id: UserId,
        product_id: ProductId,
        rating: i32,
        comment: Option<&str>,
    ) -> Result<Review, RepositoryError> {
        let review = sqlx::query_as::<_, Review>(
            r"
            INSERT INTO shop.review (user_id, product_id, rating, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, product_id, rating, comment, created_at
            ",
        )
        .bind(user_id)
        .bind(product_id)
        .bind(rating)
        .bind(comment)
        .fetch_one(self.pool)
        .await?;

        Ok(review)
    }

    /// Delete a review (admin back office).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the review doesn't exist.
    pub async fn delete(&self, id: ReviewId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM shop.review WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
