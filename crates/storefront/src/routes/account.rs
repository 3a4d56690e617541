//! Account profile route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use orchard_core::Email;

use crate::db::{RepositoryError, UserRepository};
use crate::error::Result;
use crate::filters;
use crate::middleware::{RequireUser, set_current_user};
use crate::models::{CurrentUser, Profile};
use crate::routes::auth::MessageQuery;
use crate::state::AppState;

/// Profile form data. Empty strings are treated as "not provided",
/// except for the email which is always required.
#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    pub email: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/profile.html")]
pub struct ProfileTemplate {
    pub user: Option<CurrentUser>,
    pub email: Email,
    pub profile: Profile,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Display the profile page.
pub async fn show(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Query(query): Query<MessageQuery>,
) -> Result<ProfileTemplate> {
    let profile = UserRepository::new(state.pool())
        .get_profile(user.id)
        .await?
        .unwrap_or_default();

    Ok(ProfileTemplate {
        email: user.email.clone(),
        user: Some(user),
        profile,
        error: query.error,
        success: query.success,
    })
}

/// Save the profile form, including an email change.
pub async fn update(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    session: Session,
    Form(form): Form<ProfileForm>,
) -> Result<Response> {
    let users = UserRepository::new(state.pool());

    let Ok(email) = Email::parse(&form.email) else {
        return Ok(Redirect::to("/account?error=Invalid+email+address").into_response());
    };

    if email != user.email {
        match users.update_email(user.id, &email).await {
            Ok(()) => {
                let updated = CurrentUser {
                    id: user.id,
                    email,
                    is_staff: user.is_staff,
                };
                set_current_user(&session, &updated).await?;
            }
            Err(RepositoryError::Conflict(_)) => {
                return Ok(
                    Redirect::to("/account?error=Email+already+in+use").into_response()
                );
            }
            Err(e) => return Err(e.into()),
        }
    }

    let profile = Profile {
        full_name: form.full_name.filter(|s| !s.trim().is_empty()),
        phone: form.phone.filter(|s| !s.trim().is_empty()),
        address: form.address.filter(|s| !s.trim().is_empty()),
    };

    users.upsert_profile(user.id, &profile).await?;

    Ok(Redirect::to("/account?success=Profile+saved").into_response())
}
