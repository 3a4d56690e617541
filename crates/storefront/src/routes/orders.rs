//! Order route handlers: history, checkout, shipping, and payment.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use orchard_core::{OrderId, PaymentMethod};

use crate::db::{OrderRepository, RepositoryError};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireUser;
use crate::models::{
    CurrentUser, Order, OrderLine, OrderSummary, Payment, Shipping, ShippingForm,
};
use crate::routes::auth::MessageQuery;
use crate::state::AppState;

// =============================================================================
// Templates
// =============================================================================

/// Order history template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersTemplate {
    pub user: Option<CurrentUser>,
    pub orders: Vec<OrderSummary>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Order detail template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/show.html")]
pub struct OrderDetailTemplate {
    pub user: Option<CurrentUser>,
    pub order: Order,
    pub lines: Vec<OrderLine>,
    pub shipping: Option<Shipping>,
    pub payment: Option<Payment>,
}

/// Shipping address form template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/shipping.html")]
pub struct ShippingFormTemplate {
    pub user: Option<CurrentUser>,
    pub order: Order,
    pub shipping: Option<Shipping>,
}

/// Payment method form template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/payment.html")]
pub struct PaymentFormTemplate {
    pub user: Option<CurrentUser>,
    pub order: Order,
    pub payment: Option<Payment>,
    pub methods: &'static [PaymentMethod],
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the order history.
#[instrument(skip(state, user))]
pub async fn index(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Query(query): Query<MessageQuery>,
) -> Result<OrdersTemplate> {
    let orders = OrderRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;

    Ok(OrdersTemplate {
        user: Some(user),
        orders,
        error: query.error,
        success: query.success,
    })
}

/// Place an order from the cart.
///
/// Empty carts and out-of-stock lines bounce back to the cart page with a
/// message instead of a bare error response.
#[instrument(skip(state, user))]
pub async fn create(State(state): State<AppState>, RequireUser(user): RequireUser) -> Response {
    match OrderRepository::new(state.pool())
        .create_from_cart(user.id)
        .await
    {
        Ok(order) => Redirect::to(&format!("/orders/{}/shipping", order.id)).into_response(),
        Err(RepositoryError::EmptyCart) => {
            Redirect::to("/cart?error=Your+cart+is+empty").into_response()
        }
        Err(e @ RepositoryError::InsufficientStock { .. }) => {
            let target = format!("/cart?error={}", urlencoding::encode(&e.to_string()));
            Redirect::to(&target).into_response()
        }
        Err(e) => crate::error::AppError::from(e).into_response(),
    }
}

/// Display an order's detail page.
#[instrument(skip(state, user))]
pub async fn show(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<OrderId>,
) -> Result<OrderDetailTemplate> {
    let repo = OrderRepository::new(state.pool());

    let order = repo.get_for_user(user.id, id).await?;
    let lines = repo.lines(id).await?;
    let shipping = repo.get_shipping(id).await?;
    let payment = repo.get_payment(id).await?;

    Ok(OrderDetailTemplate {
        user: Some(user),
        order,
        lines,
        shipping,
        payment,
    })
}

/// Display the shipping address form.
pub async fn shipping_form(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<OrderId>,
) -> Result<ShippingFormTemplate> {
    let repo = OrderRepository::new(state.pool());

    let order = repo.get_for_user(user.id, id).await?;
    let shipping = repo.get_shipping(id).await?;

    Ok(ShippingFormTemplate {
        user: Some(user),
        order,
        shipping,
    })
}

/// Save the shipping address.
pub async fn save_shipping(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<OrderId>,
    Form(form): Form<ShippingForm>,
) -> Result<Response> {
    let repo = OrderRepository::new(state.pool());

    let order = repo.get_for_user(user.id, id).await?;
    repo.upsert_shipping(order.id, &form).await?;

    Ok(Redirect::to(&format!("/orders/{id}/payment")).into_response())
}

/// Payment method form data.
#[derive(Debug, Deserialize)]
pub struct PaymentForm {
    pub method: PaymentMethod,
    pub transaction_id: Option<String>,
}

/// Display the payment method form.
pub async fn payment_form(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<OrderId>,
) -> Result<PaymentFormTemplate> {
    let repo = OrderRepository::new(state.pool());

    let order = repo.get_for_user(user.id, id).await?;
    let payment = repo.get_payment(id).await?;

    Ok(PaymentFormTemplate {
        user: Some(user),
        order,
        payment,
        methods: &PaymentMethod::ALL,
    })
}

/// Save the payment method. Re-submitting resets the status to pending.
pub async fn save_payment(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<OrderId>,
    Form(form): Form<PaymentForm>,
) -> Result<Response> {
    let repo = OrderRepository::new(state.pool());

    let order = repo.get_for_user(user.id, id).await?;
    let transaction_id = form
        .transaction_id
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());
    repo.upsert_payment(order.id, form.method, transaction_id).await?;

    Ok(Redirect::to("/orders?success=Order+placed").into_response())
}
