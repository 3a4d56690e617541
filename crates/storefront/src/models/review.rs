//! Review models.

use chrono::{DateTime, Utc};
use serde::Serialize;

use orchard_core::{ProductId, ReviewId, UserId};

/// A review left by a user on a product.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Review {
    pub id: ReviewId,
    pub user_id: UserId,
    pub product_id: ProductId,
    /// 1 to 5 stars.
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A review joined with the author's email and product name, for the
/// dashboard and product detail pages.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProductReview {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub product_name: String,
    pub author_email: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Inclusive rating bounds.
pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Whether a submitted rating is within bounds.
#[must_use]
pub const fn rating_in_range(rating: i32) -> bool {
    rating >= MIN_RATING && rating <= MAX_RATING
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_in_range() {
        assert!(rating_in_range(1));
        assert!(rating_in_range(5));
        assert!(!rating_in_range(0));
        assert!(!rating_in_range(6));
        assert!(!rating_in_range(-3));
    }
}
