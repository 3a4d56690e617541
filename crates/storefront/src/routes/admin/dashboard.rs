//! Admin dashboard handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use crate::db::{EntityCounts, entity_counts};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireStaff;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Admin dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub user: CurrentUser,
    pub counts: EntityCounts,
}

/// Display the admin dashboard.
pub async fn index(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
) -> Result<DashboardTemplate> {
    let counts = entity_counts(state.pool()).await?;

    Ok(DashboardTemplate { user, counts })
}
