//! JSON API favourite handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use orchard_core::ProductId;

use crate::db::FavouriteRepository;
use crate::db::favourites::FavouriteEntry;
use crate::error::Result;
use crate::middleware::ApiUser;
use crate::state::AppState;

/// Favourite add/remove request body.
#[derive(Debug, Deserialize)]
pub struct FavouriteBody {
    pub product_id: ProductId,
}

/// List the caller's favourites.
pub async fn index(
    State(state): State<AppState>,
    ApiUser(user): ApiUser,
) -> Result<Json<Vec<FavouriteEntry>>> {
    let favourites = FavouriteRepository::new(state.pool()).list(user.id).await?;

    Ok(Json(favourites))
}

/// Add a product to the caller's favourites. Idempotent.
pub async fn add(
    State(state): State<AppState>,
    ApiUser(user): ApiUser,
    Json(body): Json<FavouriteBody>,
) -> Result<StatusCode> {
    FavouriteRepository::new(state.pool())
        .add(user.id, body.product_id)
        .await?;

    Ok(StatusCode::CREATED)
}

/// Remove a product from the caller's favourites.
pub async fn remove(
    State(state): State<AppState>,
    ApiUser(user): ApiUser,
    Json(body): Json<FavouriteBody>,
) -> Result<StatusCode> {
    FavouriteRepository::new(state.pool())
        .remove(user.id, body.product_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
