//! Dashboard (home page) route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::db::{MenuRepository, ProductRepository, ReviewRepository};
use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalUser;
use crate::models::{CurrentUser, MenuTree, Product, ProductReview};
use crate::state::AppState;

/// Number of products in the "recently added" and "best sellers" strips.
const PRODUCTS_PER_STRIP: i64 = 8;

/// Number of reviews shown on the dashboard.
const LATEST_REVIEWS: i64 = 10;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub user: Option<CurrentUser>,
    pub navigation: Vec<MenuTree>,
    pub recently_added: Vec<Product>,
    pub best_sellers: Vec<Product>,
    pub latest_reviews: Vec<ProductReview>,
}

/// Display the home page.
#[instrument(skip(state, user))]
pub async fn home(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
) -> Result<HomeTemplate> {
    let pool = state.pool();
    let products = ProductRepository::new(pool);

    let navigation = MenuRepository::new(pool).navigation().await?;
    let recently_added = products.recently_added(PRODUCTS_PER_STRIP).await?;
    let best_sellers = products.best_sellers(PRODUCTS_PER_STRIP).await?;
    let latest_reviews = ReviewRepository::new(pool).latest(LATEST_REVIEWS).await?;

    Ok(HomeTemplate {
        user,
        navigation,
        recently_added,
        best_sellers,
        latest_reviews,
    })
}
