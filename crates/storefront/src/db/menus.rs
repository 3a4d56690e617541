//! Menu (category) repository.

use sqlx::PgPool;

use orchard_core::MenuId;

use super::RepositoryError;
use crate::models::{Menu, MenuTree, build_menu_trees};

/// Repository for menu database operations.
pub struct MenuRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MenuRepository<'a> {
    /// Create a new menu repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all menus, parents before children, alphabetical within a level.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Menu>, RepositoryError> {
        let menus = sqlx::query_as::<_, Menu>(
            "SELECT id, name, parent_id FROM shop.menu ORDER BY parent_id NULLS FIRST, name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(menus)
    }

    /// The nested category navigation: top-level menus with their children.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn navigation(&self) -> Result<Vec<MenuTree>, RepositoryError> {
        Ok(build_menu_trees(self.list().await?))
    }

    /// Get a menu by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: MenuId) -> Result<Option<Menu>, RepositoryError> {
        let menu =
            sqlx::query_as::<_, Menu>("SELECT id, name, parent_id FROM shop.menu WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        Ok(menu)
    }

    /// Create a menu, optionally under a parent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails (including a
    /// nonexistent parent, surfaced as a foreign key violation).
    pub async fn create(
        &self,
        name: &str,
        parent_id: Option<MenuId>,
    ) -> Result<Menu, RepositoryError> {
        let menu = sqlx::query_as::<_, Menu>(
            "INSERT INTO shop.menu (name, parent_id) VALUES ($1, $2) RETURNING id, name, parent_id",
        )
        .bind(name)
        .bind(parent_id)
        .fetch_one(self.pool)
        .await?;

        Ok(menu)
    }

    /// Delete a menu. Submenus cascade; products keep existing with a NULL menu.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the menu doesn't exist.
    pub async fn delete(&self, id: MenuId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM shop.menu WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
