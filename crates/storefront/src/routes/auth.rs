//! Authentication route handlers.
//!
//! Handles registration, login, and logout for the HTML storefront.
//! Sessions hold a [`CurrentUser`]; failures redirect back to the form with
//! a message in the query string.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error,
        success: query.success,
    }
}

/// Handle login form submission.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let user = match AuthService::new(state.pool())
        .login(&form.email, &form.password)
        .await
    {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!("Login failed: {}", e);
            return Redirect::to("/auth/login?error=Invalid+email+or+password").into_response();
        }
    };

    let current_user = CurrentUser::from(&user);
    if let Err(e) = set_current_user(&session, &current_user).await {
        tracing::error!("Failed to set session: {}", e);
        return Redirect::to("/auth/login?error=session").into_response();
    }

    set_sentry_user(&user.id, Some(user.email.as_str()));
    Redirect::to("/").into_response()
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    RegisterTemplate { error: query.error }
}

/// Handle registration form submission.
///
/// Creates the account and logs the user straight in.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    if form.password != form.password_confirm {
        return Redirect::to("/auth/register?error=Passwords+do+not+match").into_response();
    }

    let user = match AuthService::new(state.pool())
        .register(&form.email, &form.password)
        .await
    {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!("Registration failed: {}", e);
            let message = match e {
                AuthError::UserAlreadyExists => "An account with this email already exists",
                AuthError::InvalidEmail(_) => "Invalid email address",
                AuthError::WeakPassword(_) => "Password must be at least 8 characters",
                _ => "Registration failed, please try again",
            };
            let target = format!("/auth/register?error={}", urlencoding::encode(message));
            return Redirect::to(&target).into_response();
        }
    };

    let current_user = CurrentUser::from(&user);
    if let Err(e) = set_current_user(&session, &current_user).await {
        tracing::error!("Failed to set session: {}", e);
        return Redirect::to("/auth/login?success=Account+created,+please+log+in")
            .into_response();
    }

    set_sentry_user(&user.id, Some(user.email.as_str()));
    Redirect::to("/").into_response()
}

// =============================================================================
// Logout
// =============================================================================

/// Handle logout.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }

    clear_sentry_user();
    Redirect::to("/").into_response()
}
