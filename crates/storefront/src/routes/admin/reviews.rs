//! Admin review moderation handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};

use orchard_core::ReviewId;

use crate::db::ReviewRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireStaff;
use crate::models::{CurrentUser, ProductReview};
use crate::state::AppState;

/// Number of reviews shown on the moderation page.
const REVIEW_PAGE_SIZE: i64 = 100;

/// Review list template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/reviews.html")]
pub struct AdminReviewsTemplate {
    pub user: CurrentUser,
    pub reviews: Vec<ProductReview>,
}

/// List the latest reviews.
pub async fn index(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
) -> Result<AdminReviewsTemplate> {
    let reviews = ReviewRepository::new(state.pool())
        .latest(REVIEW_PAGE_SIZE)
        .await?;

    Ok(AdminReviewsTemplate { user, reviews })
}

/// Delete a review.
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<ReviewId>,
) -> Result<Response> {
    ReviewRepository::new(state.pool()).delete(id).await?;

    Ok(Redirect::to("/admin/reviews").into_response())
}
