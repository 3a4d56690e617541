//! JSON API order handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use orchard_core::{OrderId, PaymentMethod};

use crate::db::OrderRepository;
use crate::error::Result;
use crate::middleware::ApiUser;
use crate::models::{Order, OrderLine, OrderSummary, Payment, Shipping, ShippingForm};
use crate::state::AppState;

/// Order detail response body.
#[derive(Debug, Serialize)]
pub struct OrderBody {
    #[serde(flatten)]
    pub order: Order,
    pub lines: Vec<OrderLine>,
    pub shipping: Option<Shipping>,
    pub payment: Option<Payment>,
}

/// Payment request body.
#[derive(Debug, Deserialize)]
pub struct PaymentBody {
    pub method: PaymentMethod,
    pub transaction_id: Option<String>,
}

/// List the caller's orders.
pub async fn index(
    State(state): State<AppState>,
    ApiUser(user): ApiUser,
) -> Result<Json<Vec<OrderSummary>>> {
    let orders = OrderRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;

    Ok(Json(orders))
}

/// Place an order from the caller's cart.
///
/// Fails with 400 when the cart is empty or stock is insufficient.
pub async fn create(
    State(state): State<AppState>,
    ApiUser(user): ApiUser,
) -> Result<impl IntoResponse> {
    let order = OrderRepository::new(state.pool())
        .create_from_cart(user.id)
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// Get an order with its items, shipping, and payment.
pub async fn show(
    State(state): State<AppState>,
    ApiUser(user): ApiUser,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderBody>> {
    let repo = OrderRepository::new(state.pool());

    let order = repo.get_for_user(user.id, id).await?;
    let lines = repo.lines(id).await?;
    let shipping = repo.get_shipping(id).await?;
    let payment = repo.get_payment(id).await?;

    Ok(Json(OrderBody {
        order,
        lines,
        shipping,
        payment,
    }))
}

/// Save an order's shipping address.
pub async fn save_shipping(
    State(state): State<AppState>,
    ApiUser(user): ApiUser,
    Path(id): Path<OrderId>,
    Json(body): Json<ShippingForm>,
) -> Result<Json<Shipping>> {
    let repo = OrderRepository::new(state.pool());

    let order = repo.get_for_user(user.id, id).await?;
    repo.upsert_shipping(order.id, &body).await?;

    let shipping = repo
        .get_shipping(order.id)
        .await?
        .ok_or_else(|| crate::error::AppError::Internal("shipping upsert vanished".to_owned()))?;

    Ok(Json(shipping))
}

/// Save an order's payment method. Status resets to pending.
pub async fn save_payment(
    State(state): State<AppState>,
    ApiUser(user): ApiUser,
    Path(id): Path<OrderId>,
    Json(body): Json<PaymentBody>,
) -> Result<Json<Payment>> {
    let repo = OrderRepository::new(state.pool());

    let order = repo.get_for_user(user.id, id).await?;
    let transaction_id = body
        .transaction_id
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());
    repo.upsert_payment(order.id, body.method, transaction_id).await?;

    let payment = repo
        .get_payment(order.id)
        .await?
        .ok_or_else(|| crate::error::AppError::Internal("payment upsert vanished".to_owned()))?;

    Ok(Json(payment))
}
