//! JSON API review handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use orchard_core::ProductId;

use crate::db::{ProductRepository, ReviewRepository};
use crate::error::{AppError, Result};
use crate::middleware::ApiUser;
use crate::models::{ProductReview, rating_in_range};
use crate::state::AppState;

/// Review creation request body.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
    pub rating: i32,
    pub comment: Option<String>,
}

/// List a product's reviews, newest first.
pub async fn index(
    State(state): State<AppState>,
    _auth: ApiUser,
    Path(id): Path<ProductId>,
) -> Result<Json<Vec<ProductReview>>> {
    let reviews = ReviewRepository::new(state.pool())
        .list_for_product(id)
        .await?;

    Ok(Json(reviews))
}

/// Submit a review for a product.
pub async fn create(
    State(state): State<AppState>,
    ApiUser(user): ApiUser,
    Path(id): Path<ProductId>,
    Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse> {
    if !rating_in_range(body.rating) {
        return Err(AppError::BadRequest(
            "rating must be between 1 and 5".to_owned(),
        ));
    }

    let pool = state.pool();
    if ProductRepository::new(pool).get(id).await?.is_none() {
        return Err(AppError::NotFound(format!("product {id}")));
    }

    let comment = body.comment.as_deref().map(str::trim).filter(|c| !c.is_empty());
    let review = ReviewRepository::new(pool)
        .create(user.id, id, body.rating, comment)
        .await?;

    Ok((StatusCode::CREATED, Json(review)))
}
