//! Admin menu management handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use orchard_core::MenuId;

use crate::db::MenuRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireStaff;
use crate::models::{CurrentUser, MenuTree};
use crate::state::AppState;

/// Menu creation form data. An empty `parent_id` means top-level.
#[derive(Debug, Deserialize)]
pub struct MenuForm {
    pub name: String,
    pub parent_id: Option<String>,
}

/// Menu list template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/menus.html")]
pub struct AdminMenusTemplate {
    pub user: CurrentUser,
    pub navigation: Vec<MenuTree>,
}

/// List menus grouped by parent.
pub async fn index(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
) -> Result<AdminMenusTemplate> {
    let navigation = MenuRepository::new(state.pool()).navigation().await?;

    Ok(AdminMenusTemplate { user, navigation })
}

/// Create a menu, optionally under a parent.
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Form(form): Form<MenuForm>,
) -> Result<Response> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name is required".to_owned()));
    }

    let parent_id = match form.parent_id.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(
            raw.parse::<MenuId>()
                .map_err(|_| AppError::BadRequest("invalid parent menu".to_owned()))?,
        ),
    };

    MenuRepository::new(state.pool()).create(name, parent_id).await?;

    Ok(Redirect::to("/admin/menus").into_response())
}

/// Delete a menu. Its submenus go with it; products are detached.
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<MenuId>,
) -> Result<Response> {
    MenuRepository::new(state.pool()).delete(id).await?;

    Ok(Redirect::to("/admin/menus").into_response())
}
