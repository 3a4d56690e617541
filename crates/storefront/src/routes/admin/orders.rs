//! Admin order management handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use orchard_core::{OrderId, OrderStatus};

use crate::db::OrderRepository;
use crate::db::orders::OrderWithUser;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireStaff;
use crate::models::{CurrentUser, Order, OrderLine, Payment, Shipping};
use crate::state::AppState;

/// Status update form data.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: OrderStatus,
}

/// Order list template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/orders.html")]
pub struct AdminOrdersTemplate {
    pub user: CurrentUser,
    pub orders: Vec<OrderWithUser>,
}

/// Order detail template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/order_detail.html")]
pub struct AdminOrderDetailTemplate {
    pub user: CurrentUser,
    pub order: Order,
    pub lines: Vec<OrderLine>,
    pub shipping: Option<Shipping>,
    pub payment: Option<Payment>,
    pub statuses: &'static [OrderStatus],
}

/// List all orders.
pub async fn index(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
) -> Result<AdminOrdersTemplate> {
    let orders = OrderRepository::new(state.pool()).list_all().await?;

    Ok(AdminOrdersTemplate { user, orders })
}

/// Display an order regardless of owner.
pub async fn show(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<OrderId>,
) -> Result<AdminOrderDetailTemplate> {
    let repo = OrderRepository::new(state.pool());

    let order = repo.get(id).await?;
    let lines = repo.lines(id).await?;
    let shipping = repo.get_shipping(id).await?;
    let payment = repo.get_payment(id).await?;

    Ok(AdminOrderDetailTemplate {
        user,
        order,
        lines,
        shipping,
        payment,
        statuses: &OrderStatus::ALL,
    })
}

/// Update an order's status.
pub async fn update_status(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<OrderId>,
    Form(form): Form<StatusForm>,
) -> Result<Response> {
    OrderRepository::new(state.pool())
        .set_status(id, form.status)
        .await?;

    Ok(Redirect::to(&format!("/admin/orders/{id}")).into_response())
}
