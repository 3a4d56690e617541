//! Cart models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use orchard_core::{CartId, CartItemId, ProductId, UserId};

/// A user's cart. Created lazily on first access; one per user.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Cart {
    pub id: CartId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// A cart line joined with its product, as read by the cart page and the
/// order transaction.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CartLine {
    pub item_id: CartItemId,
    pub product_id: ProductId,
    pub product_name: String,
    pub unit_price: Decimal,
    pub stock: i32,
    pub quantity: i32,
}

impl CartLine {
    /// Price of this line (unit price x quantity).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Sum of all line totals in a cart.
#[must_use]
pub fn cart_subtotal(lines: &[CartLine]) -> Decimal {
    lines.iter().map(CartLine::line_total).sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn line(id: i32, price: &str, quantity: i32) -> CartLine {
        CartLine {
            item_id: CartItemId::new(id),
            product_id: ProductId::new(id),
            product_name: format!("product {id}"),
            unit_price: dec(price),
            stock: 100,
            quantity,
        }
    }

    #[test]
    fn test_line_total() {
        assert_eq!(line(1, "19.99", 3).line_total(), dec("59.97"));
        assert_eq!(line(1, "2.50", 1).line_total(), dec("2.50"));
    }

    #[test]
    fn test_cart_subtotal() {
        let lines = vec![line(1, "19.99", 2), line(2, "0.01", 5)];
        assert_eq!(cart_subtotal(&lines), dec("40.03"));
    }

    #[test]
    fn test_cart_subtotal_empty() {
        assert_eq!(cart_subtotal(&[]), Decimal::ZERO);
    }
}
