//! JSON API product handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use orchard_core::{MenuId, ProductId};

use crate::db::ProductRepository;
use crate::db::products::NewProduct;
use crate::error::{AppError, Result};
use crate::middleware::ApiUser;
use crate::models::Product;
use crate::state::AppState;

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<MenuId>,
}

/// Product creation request body. Only name and price are required.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
    pub name: String,
    pub price: Decimal,
    pub menu_id: Option<MenuId>,
    pub stock: Option<i32>,
    pub description: Option<String>,
    pub image_path: Option<String>,
}

/// List products, optionally filtered by menu.
pub async fn index(
    State(state): State<AppState>,
    _auth: ApiUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool())
        .list(query.category)
        .await?;

    Ok(Json(products))
}

/// Create a product. Staff only.
pub async fn create(
    State(state): State<AppState>,
    ApiUser(user): ApiUser,
    Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse> {
    if !user.is_staff {
        return Err(AppError::Forbidden("staff access required".to_owned()));
    }

    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_owned()));
    }
    if body.price < Decimal::ZERO {
        return Err(AppError::BadRequest("price must not be negative".to_owned()));
    }

    let product = ProductRepository::new(state.pool())
        .create(&NewProduct {
            menu_id: body.menu_id,
            name: body.name.trim().to_owned(),
            price: body.price,
            stock: body.stock.unwrap_or(0).max(0),
            description: body.description.unwrap_or_default(),
            image_path: body.image_path,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID.
pub async fn show(
    State(state): State<AppState>,
    _auth: ApiUser,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(product))
}
