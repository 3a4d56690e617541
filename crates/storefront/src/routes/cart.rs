//! Cart route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use orchard_core::{CartItemId, ProductId};

use crate::db::CartRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireUser;
use crate::models::{CartLine, CurrentUser, cart_subtotal};
use crate::routes::auth::MessageQuery;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Add-to-cart form data.
#[derive(Debug, Deserialize)]
pub struct AddForm {
    pub product_id: ProductId,
    pub quantity: Option<i32>,
}

/// Quantity update form data.
#[derive(Debug, Deserialize)]
pub struct UpdateForm {
    pub item_id: CartItemId,
    pub action: QuantityAction,
}

/// Direction of a quantity update.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityAction {
    Inc,
    Dec,
}

/// Remove-line form data.
#[derive(Debug, Deserialize)]
pub struct RemoveForm {
    pub item_id: CartItemId,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartTemplate {
    pub user: Option<CurrentUser>,
    pub lines: Vec<CartLine>,
    pub subtotal: Decimal,
    pub error: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart page.
#[instrument(skip(state, user))]
pub async fn show(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Query(query): Query<MessageQuery>,
) -> Result<CartTemplate> {
    let carts = CartRepository::new(state.pool());
    let cart = carts.get_or_create(user.id).await?;
    let lines = carts.lines(cart.id).await?;
    let subtotal = cart_subtotal(&lines);

    Ok(CartTemplate {
        user: Some(user),
        lines,
        subtotal,
        error: query.error,
    })
}

/// Add a product to the cart. An existing line has its quantity bumped.
pub async fn add(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Form(form): Form<AddForm>,
) -> Result<Response> {
    let quantity = form.quantity.unwrap_or(1).max(1);

    let carts = CartRepository::new(state.pool());
    let cart = carts.get_or_create(user.id).await?;
    carts.add_product(cart.id, form.product_id, quantity).await?;

    Ok(Redirect::to("/cart").into_response())
}

/// Increment or decrement a line's quantity.
///
/// Decrementing below 1 is refused with a warning rather than removing the
/// line; removal is its own action.
pub async fn update(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Form(form): Form<UpdateForm>,
) -> Result<Response> {
    let carts = CartRepository::new(state.pool());
    let cart = carts.get_or_create(user.id).await?;
    let line = carts.get_line(cart.id, form.item_id).await?;

    let quantity = match form.action {
        QuantityAction::Inc => line.quantity + 1,
        QuantityAction::Dec => {
            if line.quantity <= 1 {
                return Ok(
                    Redirect::to("/cart?error=Minimum+quantity+is+1").into_response()
                );
            }
            line.quantity - 1
        }
    };

    carts.set_quantity(cart.id, form.item_id, quantity).await?;

    Ok(Redirect::to("/cart").into_response())
}

/// Remove a line from the cart.
pub async fn remove(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Form(form): Form<RemoveForm>,
) -> Result<Response> {
    let carts = CartRepository::new(state.pool());
    let cart = carts.get_or_create(user.id).await?;
    carts.remove_line(cart.id, form.item_id).await?;

    Ok(Redirect::to("/cart").into_response())
}
