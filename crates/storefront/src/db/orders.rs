//! Order repository, including the checkout transaction.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use orchard_core::{OrderId, OrderStatus, PaymentMethod, UserId};

use super::RepositoryError;
use crate::models::{CartLine, Order, OrderLine, OrderSummary, Payment, Shipping, ShippingForm, cart_subtotal};

const ORDER_COLUMNS: &str = "id, user_id, status, total_amount, created_at";

/// An order joined with its owner's email, for the admin order list.
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct OrderWithUser {
    pub id: OrderId,
    pub user_email: String,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Place an order from the user's cart.
    ///
    /// In one transaction: lock the cart's products, total the lines,
    /// insert the order (status pending) and one item per line capturing
    /// the unit price, decrement stock, and empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::EmptyCart` if the cart has no lines.
    /// Returns `RepositoryError::InsufficientStock` if any line exceeds the
    /// product's available stock; nothing is committed in that case.
    pub async fn create_from_cart(&self, user_id: UserId) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let lines = sqlx::query_as::<_, CartLine>(
            r"
            SELECT ci.id AS item_id, p.id AS product_id, p.name AS product_name,
                   p.price AS unit_price, p.stock, ci.quantity
            FROM shop.cart_item ci
            JOIN shop.cart c ON c.id = ci.cart_id
            JOIN shop.product p ON p.id = ci.product_id
            WHERE c.user_id = $1
            ORDER BY ci.id
            FOR UPDATE OF p
            ",
        )
        .bind(user_id)
        .fetch_all(&mut *tx)
        .await?;

        if lines.is_empty() {
            return Err(RepositoryError::EmptyCart);
        }

        for line in &lines {
            if line.quantity > line.stock {
                return Err(RepositoryError::InsufficientStock {
                    product: line.product_name.clone(),
                    requested: line.quantity,
                    available: line.stock,
                });
            }
        }

        let total = cart_subtotal(&lines);

        let order = sqlx::query_as::<_, Order>(&format!(
            r#"
            INSERT INTO shop."order" (user_id, status, total_amount)
            VALUES ($1, $2, $3)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(OrderStatus::Pending)
        .bind(total)
        .fetch_one(&mut *tx)
        .await?;

        for line in &lines {
            sqlx::query(
                r"
                INSERT INTO shop.order_item (order_id, product_id, quantity, price)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(order.id)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(line.unit_price)
            .execute(&mut *tx)
            .await?;

            sqlx::query("UPDATE shop.product SET stock = stock - $2 WHERE id = $1")
                .bind(line.product_id)
                .bind(line.quantity)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query(
            r"
            DELETE FROM shop.cart_item ci
            USING shop.cart c
            WHERE ci.cart_id = c.id AND c.user_id = $1
            ",
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(order)
    }

    /// A user's orders with shipping/payment presence, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<OrderSummary>, RepositoryError> {
        let orders = sqlx::query_as::<_, OrderSummary>(
            r#"
            SELECT o.id, o.status, o.total_amount, o.created_at,
                   s.order_id IS NOT NULL AS has_shipping,
                   pay.order_id IS NOT NULL AS has_payment
            FROM shop."order" o
            LEFT JOIN shop.shipping s ON s.order_id = o.id
            LEFT JOIN shop.payment pay ON pay.order_id = o.id
            WHERE o.user_id = $1
            ORDER BY o.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// Get an order by ID, scoped to its owner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist or
    /// belongs to another user.
    pub async fn get_for_user(
        &self,
        user_id: UserId,
        order_id: OrderId,
    ) -> Result<Order, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            r#"SELECT {ORDER_COLUMNS} FROM shop."order" WHERE id = $1 AND user_id = $2"#
        ))
        .bind(order_id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        order.ok_or(RepositoryError::NotFound)
    }

    /// Get an order by ID regardless of owner (admin back office).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    pub async fn get(&self, order_id: OrderId) -> Result<Order, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            r#"SELECT {ORDER_COLUMNS} FROM shop."order" WHERE id = $1"#
        ))
        .bind(order_id)
        .fetch_optional(self.pool)
        .await?;

        order.ok_or(RepositoryError::NotFound)
    }

    /// All orders with their owners' emails, newest first (admin back office).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<OrderWithUser>, RepositoryError> {
        let orders = sqlx::query_as::<_, OrderWithUser>(
            r#"
            SELECT o.id, u.email AS user_email, o.status, o.total_amount, o.created_at
            FROM shop."order" o
            JOIN shop."user" u ON u.id = o.user_id
            ORDER BY o.id DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// An order's items joined with product names.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn lines(&self, order_id: OrderId) -> Result<Vec<OrderLine>, RepositoryError> {
        let lines = sqlx::query_as::<_, OrderLine>(
            r"
            SELECT oi.id AS item_id, p.id AS product_id, p.name AS product_name,
                   oi.quantity, oi.price
            FROM shop.order_item oi
            JOIN shop.product p ON p.id = oi.product_id
            WHERE oi.order_id = $1
            ORDER BY oi.id
            ",
        )
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        Ok(lines)
    }

    /// Change an order's status (admin back office).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    pub async fn set_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(r#"UPDATE shop."order" SET status = $2 WHERE id = $1"#)
            .bind(order_id)
            .bind(status)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    // =========================================================================
    // Shipping
    // =========================================================================

    /// Get an order's shipping address, if one has been saved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_shipping(&self, order_id: OrderId) -> Result<Option<Shipping>, RepositoryError> {
        let shipping = sqlx::query_as::<_, Shipping>(
            r"
            SELECT order_id, full_name, address_line1, address_line2, city,
                   state, postal_code, country, phone, shipped_at
            FROM shop.shipping
            WHERE order_id = $1
            ",
        )
        .bind(order_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(shipping)
    }

    /// Upsert an order's shipping address from the form fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert_shipping(
        &self,
        order_id: OrderId,
        form: &ShippingForm,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO shop.shipping
                (order_id, full_name, address_line1, address_line2, city,
                 state, postal_code, country, phone)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (order_id) DO UPDATE
            SET full_name = EXCLUDED.full_name,
                address_line1 = EXCLUDED.address_line1,
                address_line2 = EXCLUDED.address_line2,
                city = EXCLUDED.city,
                state = EXCLUDED.state,
                postal_code = EXCLUDED.postal_code,
                country = EXCLUDED.country,
                phone = EXCLUDED.phone
            ",
        )
        .bind(order_id)
        .bind(&form.full_name)
        .bind(&form.address_line1)
        .bind(&form.address_line2)
        .bind(&form.city)
        .bind(&form.state)
        .bind(&form.postal_code)
        .bind(&form.country)
        .bind(&form.phone)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    // =========================================================================
    // Payment
    // =========================================================================

    /// Get an order's payment record, if one has been saved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_payment(&self, order_id: OrderId) -> Result<Option<Payment>, RepositoryError> {
        let payment = sqlx::query_as::<_, Payment>(
            r"
            SELECT order_id, method, status, transaction_id, paid_at
            FROM shop.payment
            WHERE order_id = $1
            ",
        )
        .bind(order_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(payment)
    }

    /// Upsert an order's payment method. Re-submitting resets the status to
    /// pending and clears `paid_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert_payment(
        &self,
        order_id: OrderId,
        method: PaymentMethod,
        transaction_id: Option<&str>,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO shop.payment (order_id, method, status, transaction_id)
            VALUES ($1, $2, 'pending', $3)
            ON CONFLICT (order_id) DO UPDATE
            SET method = EXCLUDED.method,
                status = 'pending',
                transaction_id = EXCLUDED.transaction_id,
                paid_at = NULL
            ",
        )
        .bind(order_id)
        .bind(method)
        .bind(transaction_id)
        .execute(self.pool)
        .await?;

        Ok(())
    }

}
