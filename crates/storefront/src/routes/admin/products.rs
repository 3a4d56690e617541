//! Admin product management handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use orchard_core::{MenuId, ProductId};

use crate::db::{MenuRepository, ProductRepository};
use crate::db::products::NewProduct;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireStaff;
use crate::models::{CurrentUser, Menu, Product};
use crate::state::AppState;

/// Query parameters for the product list.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Product form data. Numeric fields arrive as strings and are validated
/// here; an empty `menu_id` means "no menu".
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub stock: String,
    pub description: Option<String>,
    pub image_path: Option<String>,
    pub menu_id: Option<String>,
}

impl ProductForm {
    fn into_new_product(self) -> Result<NewProduct> {
        let name = self.name.trim().to_owned();
        if name.is_empty() {
            return Err(AppError::BadRequest("name is required".to_owned()));
        }

        let price: Decimal = self
            .price
            .trim()
            .parse()
            .map_err(|_| AppError::BadRequest("price must be a number".to_owned()))?;
        if price < Decimal::ZERO {
            return Err(AppError::BadRequest("price must not be negative".to_owned()));
        }

        let stock: i32 = self
            .stock
            .trim()
            .parse()
            .map_err(|_| AppError::BadRequest("stock must be a whole number".to_owned()))?;
        if stock < 0 {
            return Err(AppError::BadRequest("stock must not be negative".to_owned()));
        }

        let menu_id = match self.menu_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                raw.parse::<MenuId>()
                    .map_err(|_| AppError::BadRequest("invalid menu".to_owned()))?,
            ),
        };

        Ok(NewProduct {
            menu_id,
            name,
            price,
            stock,
            description: self.description.unwrap_or_default(),
            image_path: self
                .image_path
                .map(|p| p.trim().to_owned())
                .filter(|p| !p.is_empty()),
        })
    }
}

/// Product list template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/products.html")]
pub struct AdminProductsTemplate {
    pub user: CurrentUser,
    pub products: Vec<Product>,
    pub query: Option<String>,
}

/// Product create/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/product_form.html")]
pub struct AdminProductFormTemplate {
    pub user: CurrentUser,
    pub product: Option<Product>,
    pub menus: Vec<Menu>,
}

/// List products, with optional name search.
pub async fn index(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Query(query): Query<SearchQuery>,
) -> Result<AdminProductsTemplate> {
    let repo = ProductRepository::new(state.pool());

    let query = query.q.filter(|q| !q.trim().is_empty());
    let products = match &query {
        Some(q) => repo.search(q.trim()).await?,
        None => repo.list(None).await?,
    };

    Ok(AdminProductsTemplate {
        user,
        products,
        query,
    })
}

/// Display the new-product form.
pub async fn new_form(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
) -> Result<AdminProductFormTemplate> {
    let menus = MenuRepository::new(state.pool()).list().await?;

    Ok(AdminProductFormTemplate {
        user,
        product: None,
        menus,
    })
}

/// Create a product.
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    ProductRepository::new(state.pool())
        .create(&form.into_new_product()?)
        .await?;

    Ok(Redirect::to("/admin/products").into_response())
}

/// Display the edit form for a product.
pub async fn edit_form(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<ProductId>,
) -> Result<AdminProductFormTemplate> {
    let pool = state.pool();

    let product = ProductRepository::new(pool)
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    let menus = MenuRepository::new(pool).list().await?;

    Ok(AdminProductFormTemplate {
        user,
        product: Some(product),
        menus,
    })
}

/// Update a product.
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<ProductId>,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    ProductRepository::new(state.pool())
        .update(id, &form.into_new_product()?)
        .await?;

    Ok(Redirect::to("/admin/products").into_response())
}

/// Delete a product.
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<ProductId>,
) -> Result<Response> {
    ProductRepository::new(state.pool()).delete(id).await?;

    Ok(Redirect::to("/admin/products").into_response())
}
