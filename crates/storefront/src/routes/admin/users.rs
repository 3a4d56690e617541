//! Admin user list handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use crate::db::UserRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireStaff;
use crate::models::{CurrentUser, User};
use crate::state::AppState;

/// User list template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/users.html")]
pub struct AdminUsersTemplate {
    pub user: CurrentUser,
    pub users: Vec<User>,
}

/// List all users, newest first.
pub async fn index(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
) -> Result<AdminUsersTemplate> {
    let users = UserRepository::new(state.pool()).list().await?;

    Ok(AdminUsersTemplate { user, users })
}
