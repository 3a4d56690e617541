//! JSON API authentication handlers.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::middleware::ApiUser;
use crate::services::auth::AuthService;
use crate::state::AppState;

use super::UserBody;

/// Register/login request body.
#[derive(Debug, Deserialize)]
pub struct CredentialsBody {
    pub email: String,
    pub password: String,
}

/// Register/login response body.
#[derive(Debug, Serialize)]
pub struct AuthBody {
    pub user: UserBody,
    pub token: String,
}

/// Create an account and return the user with their API token.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<CredentialsBody>,
) -> Result<impl IntoResponse> {
    let service = AuthService::new(state.pool());

    let user = service.register(&body.email, &body.password).await?;
    let token = service.issue_token(&user).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthBody {
            user: UserBody::from(&user),
            token,
        }),
    ))
}

/// Authenticate and return the user with their API token.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<CredentialsBody>,
) -> Result<Json<AuthBody>> {
    let service = AuthService::new(state.pool());

    let user = service.login(&body.email, &body.password).await?;
    let token = service.issue_token(&user).await?;

    Ok(Json(AuthBody {
        user: UserBody::from(&user),
        token,
    }))
}

/// Delete the caller's API token.
pub async fn logout(
    State(state): State<AppState>,
    ApiUser(user): ApiUser,
) -> Result<StatusCode> {
    AuthService::new(state.pool()).revoke_token(&user).await?;

    Ok(StatusCode::NO_CONTENT)
}
