//! Domain models for Orchard Market.
//!
//! Plain data structs decoded from database rows (via `sqlx::FromRow`) plus
//! the session-stored identity type. View-specific shapes live next to their
//! route handlers, not here.

pub mod cart;
pub mod catalog;
pub mod order;
pub mod review;
pub mod session;
pub mod user;

pub use cart::{Cart, CartLine, cart_subtotal};
pub use catalog::{Menu, MenuTree, Product, build_menu_trees};
pub use order::{Order, OrderLine, OrderSummary, Payment, Shipping, ShippingForm};
pub use review::{ProductReview, Review, rating_in_range};
pub use session::{CurrentUser, session_keys};
pub use user::{Profile, User};
