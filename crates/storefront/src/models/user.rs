//! User and profile models.

use chrono::{DateTime, Utc};
use serde::Serialize;

use orchard_core::{Email, UserId};

/// A registered user.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    /// Staff users can access the `/admin` back office.
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Optional contact details attached to a user.
///
/// Created lazily the first time the user saves their profile, so any field
/// may be absent.
#[derive(Debug, Clone, Default, Serialize, sqlx::FromRow)]
pub struct Profile {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}
