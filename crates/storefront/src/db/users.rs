//! User repository: accounts, passwords, profiles, and API tokens.

use sqlx::PgPool;

use orchard_core::{Email, UserId};

use super::{RepositoryError, conflict_on_unique};
use crate::models::{Profile, User};

const USER_COLUMNS: &str = "id, email, is_staff, created_at, updated_at";

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"SELECT {USER_COLUMNS} FROM shop."user" WHERE email = $1"#
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"SELECT {USER_COLUMNS} FROM shop."user" WHERE id = $1"#
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Create a new user with email and password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_with_password(
        &self,
        email: &Email,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"INSERT INTO shop."user" (email) VALUES ($1) RETURNING {USER_COLUMNS}"#
        ))
        .bind(email)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| conflict_on_unique(e, "email already exists"))?;

        sqlx::query("INSERT INTO shop.user_password (user_id, password_hash) VALUES ($1, $2)")
            .bind(user.id)
            .bind(password_hash)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(user)
    }

    /// Get a user together with their password hash, by email.
    ///
    /// Returns `None` if the user doesn't exist or has no password set.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserWithHash>(
            r#"
            SELECT u.id, u.email, u.is_staff, u.created_at, u.updated_at, p.password_hash
            FROM shop."user" u
            JOIN shop.user_password p ON u.id = p.user_id
            WHERE u.email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| {
            (
                User {
                    id: r.id,
                    email: r.email,
                    is_staff: r.is_staff,
                    created_at: r.created_at,
                    updated_at: r.updated_at,
                },
                r.password_hash,
            )
        }))
    }

    /// Update a user's email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the new email is taken.
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    pub async fn update_email(&self, id: UserId, email: &Email) -> Result<(), RepositoryError> {
        let result =
            sqlx::query(r#"UPDATE shop."user" SET email = $1, updated_at = now() WHERE id = $2"#)
                .bind(email)
                .bind(id)
                .execute(self.pool)
                .await
                .map_err(|e| conflict_on_unique(e, "email already exists"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Grant or revoke staff access.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    pub async fn set_staff(&self, id: UserId, is_staff: bool) -> Result<(), RepositoryError> {
        let result =
            sqlx::query(r#"UPDATE shop."user" SET is_staff = $1, updated_at = now() WHERE id = $2"#)
                .bind(is_staff)
                .bind(id)
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// List all users, newest first (admin back office).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let users = sqlx::query_as::<_, User>(&format!(
            r#"SELECT {USER_COLUMNS} FROM shop."user" ORDER BY id DESC"#
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    // =========================================================================
    // Profile
    // =========================================================================

    /// Get a user's profile, if they have saved one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>, RepositoryError> {
        let profile = sqlx::query_as::<_, Profile>(
            "SELECT full_name, phone, address FROM shop.profile WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(profile)
    }

    /// Upsert a user's profile. Creates the row on first save.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert_profile(
        &self,
        user_id: UserId,
        profile: &Profile,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO shop.profile (user_id, full_name, phone, address)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE
            SET full_name = EXCLUDED.full_name,
                phone = EXCLUDED.phone,
                address = EXCLUDED.address
            ",
        )
        .bind(user_id)
        .bind(&profile.full_name)
        .bind(&profile.phone)
        .bind(&profile.address)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    // =========================================================================
    // API Tokens
    // =========================================================================

    /// Store an API token for a user, replacing any existing one.
    ///
    /// One token per user, DRF-style: re-login reuses the stored token.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_or_create_token(
        &self,
        user_id: UserId,
        candidate: &str,
    ) -> Result<String, RepositoryError> {
        let token = sqlx::query_scalar::<_, String>(
            r"
            INSERT INTO shop.api_token (token, user_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING token
            ",
        )
        .bind(candidate)
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        Ok(token)
    }

    /// Look up the user owning an API token.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_token(&self, token: &str) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.email, u.is_staff, u.created_at, u.updated_at
            FROM shop."user" u
            JOIN shop.api_token t ON u.id = t.user_id
            WHERE t.token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Delete a user's API token (API logout).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_token(&self, user_id: UserId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM shop.api_token WHERE user_id = $1")
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}

/// Internal row shape for the user + password hash join.
#[derive(sqlx::FromRow)]
struct UserWithHash {
    id: UserId,
    email: Email,
    is_staff: bool,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
    password_hash: String,
}
