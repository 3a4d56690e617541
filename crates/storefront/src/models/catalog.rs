//! Catalog models: menus (categories) and products.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use orchard_core::{MenuId, ProductId};

/// A product category. `parent_id = NULL` means top-level menu; otherwise
/// the entry is a submenu of its parent. Only one level of nesting is used.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Menu {
    pub id: MenuId,
    pub name: String,
    pub parent_id: Option<MenuId>,
}

/// A top-level menu with its submenus, as rendered in the catalog sidebar.
#[derive(Debug, Clone, Serialize)]
pub struct MenuTree {
    pub menu: Menu,
    pub children: Vec<Menu>,
}

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: ProductId,
    pub menu_id: Option<MenuId>,
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    pub description: String,
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Whether the product can currently be ordered.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Group a flat menu listing into top-level menus with their children.
///
/// Rows must contain every menu; ordering of the input is preserved within
/// each group.
#[must_use]
pub fn build_menu_trees(menus: Vec<Menu>) -> Vec<MenuTree> {
    let (parents, children): (Vec<Menu>, Vec<Menu>) =
        menus.into_iter().partition(|m| m.parent_id.is_none());

    parents
        .into_iter()
        .map(|menu| {
            let id = menu.id;
            MenuTree {
                menu,
                children: children
                    .iter()
                    .filter(|c| c.parent_id == Some(id))
                    .cloned()
                    .collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu(id: i32, name: &str, parent: Option<i32>) -> Menu {
        Menu {
            id: MenuId::new(id),
            name: name.to_owned(),
            parent_id: parent.map(MenuId::new),
        }
    }

    #[test]
    fn test_build_menu_trees_groups_children() {
        let trees = build_menu_trees(vec![
            menu(1, "Fruit", None),
            menu(2, "Citrus", Some(1)),
            menu(3, "Berries", Some(1)),
            menu(4, "Dairy", None),
        ]);

        assert_eq!(trees.len(), 2);
        assert_eq!(trees[0].menu.name, "Fruit");
        assert_eq!(trees[0].children.len(), 2);
        assert_eq!(trees[1].menu.name, "Dairy");
        assert!(trees[1].children.is_empty());
    }

    #[test]
    fn test_build_menu_trees_empty() {
        assert!(build_menu_trees(Vec::new()).is_empty());
    }
}
