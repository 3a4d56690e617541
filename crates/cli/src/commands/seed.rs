//! Catalog seeding command.
//!
//! Reads menus and products from a YAML file and inserts them into the
//! catalog. Seeding is idempotent: menus are matched by name and parent,
//! products by name, so re-running the command skips existing rows.
//!
//! # Usage
//!
//! ```bash
//! orchard-cli seed -f crates/cli/seed/catalog.yaml
//! ```
//!
//! # File Format
//!
//! ```yaml
//! menus:
//!   - name: Fruit
//!     submenus:
//!       - Apples
//!       - Citrus
//!
//! products:
//!   - name: Honeycrisp Apples
//!     menu: Apples
//!     price: "3.99"
//!     stock: 120
//!     description: Crisp, sweet, and very juicy.
//! ```

use std::collections::HashMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use orchard_core::MenuId;

/// Errors that can occur while seeding the catalog.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Seed file could not be read.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Seed file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Seed file could not be parsed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A product references a menu that is not declared in the file.
    #[error("Product '{product}' references unknown menu '{menu}'")]
    UnknownMenu { product: String, menu: String },
}

/// The seed file's top-level structure.
#[derive(Debug, Deserialize)]
struct Catalog {
    #[serde(default)]
    menus: Vec<MenuEntry>,
    #[serde(default)]
    products: Vec<ProductEntry>,
}

/// A top-level menu with its submenus.
#[derive(Debug, Deserialize)]
struct MenuEntry {
    name: String,
    #[serde(default)]
    submenus: Vec<String>,
}

/// A product referencing a menu by name.
#[derive(Debug, Deserialize)]
struct ProductEntry {
    name: String,
    menu: Option<String>,
    price: Decimal,
    #[serde(default)]
    stock: i32,
    #[serde(default)]
    description: String,
    image: Option<String>,
}

/// Seed the catalog from a YAML file.
///
/// # Errors
///
/// Returns `SeedError` if the environment is missing the database URL, the
/// file cannot be read or parsed, or a database operation fails.
pub async fn run(file_path: &str) -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url =
        super::database_url().ok_or(SeedError::MissingEnvVar("STOREFRONT_DATABASE_URL"))?;

    let path = Path::new(file_path);
    if !path.exists() {
        return Err(SeedError::FileNotFound(file_path.to_owned()));
    }

    info!(path = %file_path, "Loading catalog from file");

    // Read and validate YAML before connecting to the database
    let content = tokio::fs::read_to_string(path).await?;
    let catalog: Catalog = serde_yaml::from_str(&content)?;

    info!(
        menus = catalog.menus.len(),
        products = catalog.products.len(),
        "Parsed catalog"
    );

    let pool = PgPool::connect(&database_url).await?;
    info!("Connected to database");

    // Menus first, so products can reference them by name.
    let mut menu_ids: HashMap<String, MenuId> = HashMap::new();
    for entry in &catalog.menus {
        let parent_id = get_or_create_menu(&pool, &entry.name, None).await?;
        menu_ids.insert(entry.name.clone(), parent_id);

        for submenu in &entry.submenus {
            let id = get_or_create_menu(&pool, submenu, Some(parent_id)).await?;
            menu_ids.insert(submenu.clone(), id);
        }
    }

    let mut inserted = 0_usize;
    let mut skipped = 0_usize;
    for product in &catalog.products {
        let menu_id = match &product.menu {
            Some(menu) => Some(*menu_ids.get(menu).ok_or_else(|| SeedError::UnknownMenu {
                product: product.name.clone(),
                menu: menu.clone(),
            })?),
            None => None,
        };

        if product_exists(&pool, &product.name).await? {
            skipped += 1;
            continue;
        }

        sqlx::query(
            r"
            INSERT INTO shop.product (menu_id, name, price, stock, description, image_path)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(menu_id)
        .bind(&product.name)
        .bind(product.price)
        .bind(product.stock)
        .bind(&product.description)
        .bind(&product.image)
        .execute(&pool)
        .await?;

        inserted += 1;
    }

    info!("Seeding complete!");
    info!("  Menus: {}", menu_ids.len());
    info!("  Products inserted: {inserted}");
    info!("  Products skipped (already exist): {skipped}");

    Ok(())
}

/// Find a menu by name and parent, creating it if absent.
async fn get_or_create_menu(
    pool: &PgPool,
    name: &str,
    parent_id: Option<MenuId>,
) -> Result<MenuId, SeedError> {
    let existing = sqlx::query_scalar::<_, MenuId>(
        "SELECT id FROM shop.menu WHERE name = $1 AND parent_id IS NOT DISTINCT FROM $2",
    )
    .bind(name)
    .bind(parent_id)
    .fetch_optional(pool)
    .await?;

    if let Some(id) = existing {
        return Ok(id);
    }

    let id = sqlx::query_scalar::<_, MenuId>(
        "INSERT INTO shop.menu (name, parent_id) VALUES ($1, $2) RETURNING id",
    )
    .bind(name)
    .bind(parent_id)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Whether a product with this name already exists.
async fn product_exists(pool: &PgPool, name: &str) -> Result<bool, SeedError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT count(*) FROM shop.product WHERE name = $1")
        .bind(name)
        .fetch_one(pool)
        .await?;

    Ok(count > 0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog_yaml() {
        let yaml = r#"
menus:
  - name: Fruit
    submenus:
      - Apples
products:
  - name: Honeycrisp Apples
    menu: Apples
    price: "3.99"
    stock: 120
    description: Crisp and sweet.
"#;
        let catalog: Catalog = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(catalog.menus.len(), 1);
        assert_eq!(catalog.menus[0].submenus, vec!["Apples"]);
        assert_eq!(catalog.products.len(), 1);
        assert_eq!(catalog.products[0].price, Decimal::new(399, 2));
        assert_eq!(catalog.products[0].stock, 120);
    }

    #[test]
    fn test_parse_catalog_defaults() {
        let yaml = r#"
products:
  - name: Mystery Box
    price: "10.00"
"#;
        let catalog: Catalog = serde_yaml::from_str(yaml).unwrap();
        assert!(catalog.menus.is_empty());
        assert_eq!(catalog.products[0].stock, 0);
        assert!(catalog.products[0].menu.is_none());
        assert!(catalog.products[0].image.is_none());
    }
}
