//! Catalog route handlers: product listing, detail, and review submission.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use orchard_core::{MenuId, ProductId};

use crate::db::{FavouriteRepository, MenuRepository, ProductRepository, ReviewRepository};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{OptionalUser, RequireUser};
use crate::models::{CurrentUser, Menu, MenuTree, Product, ProductReview, rating_in_range};
use crate::state::AppState;

/// Number of related products on the detail page.
const RELATED_PRODUCTS: i64 = 8;

// =============================================================================
// Listing
// =============================================================================

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Menu ID to filter by.
    pub category: Option<MenuId>,
}

/// Product listing template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductIndexTemplate {
    pub user: Option<CurrentUser>,
    pub navigation: Vec<MenuTree>,
    pub products: Vec<Product>,
    pub category: Option<Menu>,
}

/// Display the product listing, optionally filtered by `?category=`.
#[instrument(skip(state, user))]
pub async fn index(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    Query(query): Query<ListQuery>,
) -> Result<ProductIndexTemplate> {
    let pool = state.pool();
    let menus = MenuRepository::new(pool);

    let category = match query.category {
        Some(id) => menus.get(id).await?,
        None => None,
    };

    let navigation = menus.navigation().await?;
    let products = ProductRepository::new(pool)
        .list(category.as_ref().map(|m| m.id))
        .await?;

    Ok(ProductIndexTemplate {
        user,
        navigation,
        products,
        category,
    })
}

// =============================================================================
// Detail
// =============================================================================

/// Product detail template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub user: Option<CurrentUser>,
    pub product: Product,
    pub quantity: i32,
    pub related: Vec<Product>,
    pub reviews: Vec<ProductReview>,
    pub is_favourite: bool,
    pub error: Option<String>,
}

/// Query parameters for the product detail page.
#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    /// Pre-selected quantity for the add-to-cart form.
    pub quantity: Option<i32>,
    pub error: Option<String>,
}

/// Display a product's detail page.
#[instrument(skip(state, user))]
pub async fn show(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    Path(id): Path<ProductId>,
    Query(query): Query<DetailQuery>,
) -> Result<ProductShowTemplate> {
    let pool = state.pool();
    let products = ProductRepository::new(pool);

    let product = products
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let related = products.related(id, RELATED_PRODUCTS).await?;
    let reviews = ReviewRepository::new(pool).list_for_product(id).await?;

    let is_favourite = match &user {
        Some(user) => FavouriteRepository::new(pool)
            .product_ids(user.id)
            .await?
            .contains(&id),
        None => false,
    };

    Ok(ProductShowTemplate {
        user,
        product,
        quantity: query.quantity.unwrap_or(1).max(1),
        related,
        reviews,
        is_favourite,
        error: query.error,
    })
}

// =============================================================================
// Reviews
// =============================================================================

/// Review form data.
#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    pub rating: i32,
    pub comment: Option<String>,
}

/// Handle review submission from the product detail page.
pub async fn create_review(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<ProductId>,
    Form(form): Form<ReviewForm>,
) -> Result<Response> {
    if !rating_in_range(form.rating) {
        let target = format!("/products/{id}?error=Rating+must+be+between+1+and+5");
        return Ok(Redirect::to(&target).into_response());
    }

    let comment = form.comment.as_deref().map(str::trim).filter(|c| !c.is_empty());

    ReviewRepository::new(state.pool())
        .create(user.id, id, form.rating, comment)
        .await?;

    Ok(Redirect::to(&format!("/products/{id}")).into_response())
}
