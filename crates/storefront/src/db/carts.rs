//! Cart repository.
//!
//! A user's cart is created lazily on first use. Lines are unique per
//! (cart, product); adding a product that is already in the cart bumps
//! its quantity instead.

use sqlx::PgPool;

use orchard_core::{CartId, CartItemId, ProductId, UserId};

use super::RepositoryError;
use crate::models::{Cart, CartLine};

const LINE_QUERY: &str = r"
    SELECT ci.id AS item_id, p.id AS product_id, p.name AS product_name,
           p.price AS unit_price, p.stock, ci.quantity
    FROM shop.cart_item ci
    JOIN shop.product p ON p.id = ci.product_id
    WHERE ci.cart_id = $1
    ORDER BY ci.id
";

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the user's cart, creating it if they don't have one yet.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_or_create(&self, user_id: UserId) -> Result<Cart, RepositoryError> {
        // Upsert keeps this a single round trip. DO UPDATE (rather than
        // DO NOTHING) makes RETURNING yield the existing row too.
        let cart = sqlx::query_as::<_, Cart>(
            r"
            INSERT INTO shop.cart (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING id, user_id, created_at
            ",
        )
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        Ok(cart)
    }

    /// The cart's lines joined with their products, oldest line first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn lines(&self, cart_id: CartId) -> Result<Vec<CartLine>, RepositoryError> {
        let lines = sqlx::query_as::<_, CartLine>(LINE_QUERY)
            .bind(cart_id)
            .fetch_all(self.pool)
            .await?;

        Ok(lines)
    }

    /// Add a product to the cart. If the product is already in the cart,
    /// its quantity is incremented by `quantity` instead.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other query failures.
    pub async fn add_product(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO shop.cart_item (cart_id, product_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (cart_id, product_id)
            DO UPDATE SET quantity = shop.cart_item.quantity + EXCLUDED.quantity
            ",
        )
        .bind(cart_id)
        .bind(product_id)
        .bind(quantity)
        .execute(self.pool)
        .await
        .map_err(super::not_found_on_fk)?;

        Ok(())
    }

    /// Get a single cart line by item ID, scoped to the cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the line isn't in this cart.
    pub async fn get_line(
        &self,
        cart_id: CartId,
        item_id: CartItemId,
    ) -> Result<CartLine, RepositoryError> {
        let line = sqlx::query_as::<_, CartLine>(
            r"
            SELECT ci.id AS item_id, p.id AS product_id, p.name AS product_name,
                   p.price AS unit_price, p.stock, ci.quantity
            FROM shop.cart_item ci
            JOIN shop.product p ON p.id = ci.product_id
            WHERE ci.cart_id = $1 AND ci.id = $2
            ",
        )
        .bind(cart_id)
        .bind(item_id)
        .fetch_optional(self.pool)
        .await?;

        line.ok_or(RepositoryError::NotFound)
    }

    /// Set a line's quantity. Quantities below 1 are rejected by a CHECK
    /// constraint, so callers clamp first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the line isn't in this cart.
    pub async fn set_quantity(
        &self,
        cart_id: CartId,
        item_id: CartItemId,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE shop.cart_item SET quantity = $3 WHERE cart_id = $1 AND id = $2")
                .bind(cart_id)
                .bind(item_id)
                .bind(quantity)
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Remove a line from the cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the line isn't in this cart.
    pub async fn remove_line(
        &self,
        cart_id: CartId,
        item_id: CartItemId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM shop.cart_item WHERE cart_id = $1 AND id = $2")
            .bind(cart_id)
            .bind(item_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
