//! CLI command implementations.

pub mod migrate;
pub mod seed;
pub mod staff;

/// Read the storefront database URL from the environment.
///
/// Prefers `STOREFRONT_DATABASE_URL`, falling back to the generic
/// `DATABASE_URL` set by most hosting providers.
pub(crate) fn database_url() -> Option<String> {
    std::env::var("STOREFRONT_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
}
