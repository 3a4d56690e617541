//! Product repository.

use rust_decimal::Decimal;
use sqlx::PgPool;

use orchard_core::{MenuId, ProductId};

use super::RepositoryError;
use crate::models::Product;

const PRODUCT_COLUMNS: &str = "id, menu_id, name, price, stock, description, image_path, created_at";

/// Fields accepted when creating or updating a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub menu_id: Option<MenuId>,
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    pub description: String,
    pub image_path: Option<String>,
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM shop.product WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// List products, newest first, optionally filtered by menu.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, menu_id: Option<MenuId>) -> Result<Vec<Product>, RepositoryError> {
        let products = match menu_id {
            Some(menu_id) => {
                sqlx::query_as::<_, Product>(&format!(
                    "SELECT {PRODUCT_COLUMNS} FROM shop.product WHERE menu_id = $1 ORDER BY id DESC"
                ))
                .bind(menu_id)
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Product>(&format!(
                    "SELECT {PRODUCT_COLUMNS} FROM shop.product ORDER BY id DESC"
                ))
                .fetch_all(self.pool)
                .await?
            }
        };

        Ok(products)
    }

    /// Search products by name, newest first (admin back office).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, RepositoryError> {
        let pattern = format!("%{}%", query.replace('%', "\\%").replace('_', "\\_"));
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM shop.product WHERE name ILIKE $1 ORDER BY id DESC"
        ))
        .bind(pattern)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// The most recently added products, for the dashboard.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn recently_added(&self, limit: i64) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM shop.product ORDER BY id DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Dashboard "best sellers". Approximated by highest stock on hand,
    /// as there is no sales aggregate to order by.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn best_sellers(&self, limit: i64) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM shop.product ORDER BY stock DESC, id DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Products from the same menu as `product_id`, excluding it, for the
    /// "related products" strip on the detail page.
    ///
    /// Returns an empty list when the product has no menu.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn related(
        &self,
        product_id: ProductId,
        limit: i64,
    ) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            r"
            SELECT {PRODUCT_COLUMNS} FROM shop.product
            WHERE menu_id = (SELECT menu_id FROM shop.product WHERE id = $1)
              AND menu_id IS NOT NULL
              AND id <> $1
            ORDER BY id DESC
            LIMIT $2
            "
        ))
        .bind(product_id)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, new: &NewProduct) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r"
            INSERT INTO shop.product (menu_id, name, price, stock, description, image_path)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(new.menu_id)
        .bind(&new.name)
        .bind(new.price)
        .bind(new.stock)
        .bind(&new.description)
        .bind(&new.image_path)
        .fetch_one(self.pool)
        .await?;

        Ok(product)
    }

    /// Replace a product's editable fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    pub async fn update(&self, id: ProductId, new: &NewProduct) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r"
            UPDATE shop.product
            SET menu_id = $2, name = $3, price = $4, stock = $5,
                description = $6, image_path = $7
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(id)
        .bind(new.menu_id)
        .bind(&new.name)
        .bind(new.price)
        .bind(new.stock)
        .bind(&new.description)
        .bind(&new.image_path)
        .fetch_optional(self.pool)
        .await?;

        product.ok_or(RepositoryError::NotFound)
    }

    /// Delete a product. Cart lines, favourites, and reviews cascade.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM shop.product WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
