//! Favourites route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use orchard_core::ProductId;

use crate::db::FavouriteRepository;
use crate::db::favourites::FavouriteEntry;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireUser;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Favourite add/remove form data.
#[derive(Debug, Deserialize)]
pub struct FavouriteForm {
    pub product_id: ProductId,
}

/// Favourites page template.
#[derive(Template, WebTemplate)]
#[template(path = "favourites/index.html")]
pub struct FavouritesTemplate {
    pub user: Option<CurrentUser>,
    pub favourites: Vec<FavouriteEntry>,
}

/// Display the favourites page.
pub async fn index(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<FavouritesTemplate> {
    let favourites = FavouriteRepository::new(state.pool()).list(user.id).await?;

    Ok(FavouritesTemplate {
        user: Some(user),
        favourites,
    })
}

/// Add a product to the favourites. Adding twice is a no-op.
pub async fn add(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Form(form): Form<FavouriteForm>,
) -> Result<Response> {
    FavouriteRepository::new(state.pool())
        .add(user.id, form.product_id)
        .await?;

    Ok(Redirect::to("/favourites").into_response())
}

/// Remove a product from the favourites.
pub async fn remove(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Form(form): Form<FavouriteForm>,
) -> Result<Response> {
    FavouriteRepository::new(state.pool())
        .remove(user.id, form.product_id)
        .await?;

    Ok(Redirect::to("/favourites").into_response())
}
