//! Order, shipping, and payment models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use orchard_core::{OrderId, OrderItemId, OrderStatus, PaymentMethod, PaymentStatus, ProductId, UserId};

/// A finalized order. Items and prices are a snapshot taken at checkout;
/// only `status` changes afterwards.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// An order joined with the presence of its shipping/payment records,
/// as shown on the order list page.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderSummary {
    pub id: OrderId,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub has_shipping: bool,
    pub has_payment: bool,
}

/// An order item joined with its product name.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderLine {
    pub item_id: OrderItemId,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: i32,
    /// Unit price captured at order time.
    pub price: Decimal,
}

impl OrderLine {
    /// Price of this line (captured unit price x quantity).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Shipping address for an order (one per order, upserted from the form).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Shipping {
    pub order_id: OrderId,
    pub full_name: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
    pub shipped_at: Option<DateTime<Utc>>,
}

/// Shipping form fields, shared between the HTML form and the JSON API.
#[derive(Debug, Clone, Deserialize)]
pub struct ShippingForm {
    pub full_name: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
}

/// Payment record for an order (one per order, upserted from the form).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Payment {
    pub order_id: OrderId,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub transaction_id: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_line_total() {
        let line = OrderLine {
            item_id: OrderItemId::new(1),
            product_id: ProductId::new(9),
            product_name: "apples".to_owned(),
            quantity: 4,
            price: "3.25".parse().unwrap(),
        };
        assert_eq!(line.line_total(), "13.00".parse::<Decimal>().unwrap());
    }
}
