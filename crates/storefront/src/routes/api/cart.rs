//! JSON API cart handlers.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use orchard_core::ProductId;

use crate::db::CartRepository;
use crate::error::{AppError, Result};
use crate::middleware::ApiUser;
use crate::models::{CartLine, cart_subtotal};
use crate::state::AppState;

/// Cart response body.
#[derive(Debug, Serialize)]
pub struct CartBody {
    pub lines: Vec<CartLine>,
    pub subtotal: Decimal,
}

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
pub struct AddBody {
    pub product_id: ProductId,
    pub quantity: Option<i32>,
}

/// Get the caller's cart contents.
pub async fn show(State(state): State<AppState>, ApiUser(user): ApiUser) -> Result<Json<CartBody>> {
    let carts = CartRepository::new(state.pool());
    let cart = carts.get_or_create(user.id).await?;
    let lines = carts.lines(cart.id).await?;
    let subtotal = cart_subtotal(&lines);

    Ok(Json(CartBody { lines, subtotal }))
}

/// Add a product to the caller's cart. An existing line has its quantity
/// incremented.
pub async fn add(
    State(state): State<AppState>,
    ApiUser(user): ApiUser,
    Json(body): Json<AddBody>,
) -> Result<Json<CartBody>> {
    let quantity = body.quantity.unwrap_or(1);
    if quantity < 1 {
        return Err(AppError::BadRequest("quantity must be at least 1".to_owned()));
    }

    let carts = CartRepository::new(state.pool());
    let cart = carts.get_or_create(user.id).await?;
    carts.add_product(cart.id, body.product_id, quantity).await?;

    let lines = carts.lines(cart.id).await?;
    let subtotal = cart_subtotal(&lines);

    Ok(Json(CartBody { lines, subtotal }))
}
