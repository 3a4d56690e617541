//! Staff user management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a new staff user
//! orchard-cli staff create -e admin@example.com -p "a strong password"
//!
//! # Promote an existing user
//! orchard-cli staff grant -e user@example.com
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string
//!   (falls back to `DATABASE_URL`)

use secrecy::SecretString;
use thiserror::Error;

use orchard_core::{Email, EmailError};
use orchard_storefront::db::users::UserRepository;
use orchard_storefront::db::{self, RepositoryError};
use orchard_storefront::services::auth::{MIN_PASSWORD_LENGTH, hash_password};

/// Errors that can occur during staff operations.
#[derive(Debug, Error)]
pub enum StaffError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password too short.
    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters")]
    WeakPassword,

    /// Password hashing failed.
    #[error("Password hashing failed")]
    PasswordHash,

    /// User already exists.
    #[error("User already exists with email: {0}")]
    UserExists(String),

    /// User not found.
    #[error("No user with email: {0}")]
    UserNotFound(String),

    /// Repository error.
    #[error("Repository error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for StaffError {
    fn from(e: RepositoryError) -> Self {
        Self::Repository(e)
    }
}

/// Create a new staff user with email and password.
///
/// # Errors
///
/// Returns `StaffError` if the email or password is invalid, the user
/// already exists, or a database operation fails.
pub async fn create(email: &str, password: &str) -> Result<(), StaffError> {
    dotenvy::dotenv().ok();

    let email = Email::parse(email)?;
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(StaffError::WeakPassword);
    }

    let pool = connect().await?;
    let users = UserRepository::new(&pool);

    tracing::info!("Creating staff user: {email}");

    let password_hash = hash_password(password).map_err(|_| StaffError::PasswordHash)?;

    let user = users
        .create_with_password(&email, &password_hash)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => StaffError::UserExists(email.to_string()),
            other => StaffError::Repository(other),
        })?;

    users.set_staff(user.id, true).await?;

    tracing::info!("Staff user created successfully! ID: {}, Email: {email}", user.id);

    Ok(())
}

/// Grant staff access to an existing user.
///
/// # Errors
///
/// Returns `StaffError` if the email is invalid, the user does not exist,
/// or a database operation fails.
pub async fn grant(email: &str) -> Result<(), StaffError> {
    dotenvy::dotenv().ok();

    let email = Email::parse(email)?;

    let pool = connect().await?;
    let users = UserRepository::new(&pool);

    let user = users
        .get_by_email(&email)
        .await?
        .ok_or_else(|| StaffError::UserNotFound(email.to_string()))?;

    if user.is_staff {
        tracing::info!("User {email} is already staff, nothing to do");
        return Ok(());
    }

    users.set_staff(user.id, true).await?;

    tracing::info!("Granted staff access to {email}");

    Ok(())
}

/// Connect to the storefront database.
async fn connect() -> Result<sqlx::PgPool, StaffError> {
    let database_url = super::database_url()
        .map(SecretString::from)
        .ok_or(StaffError::MissingEnvVar("STOREFRONT_DATABASE_URL"))?;

    tracing::info!("Connecting to storefront database...");
    let pool = db::create_pool(&database_url).await?;

    Ok(pool)
}
