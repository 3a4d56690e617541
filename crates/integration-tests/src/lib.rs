//! Integration tests for Orchard Market.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p orchard-cli -- migrate
//!
//! # Start the storefront
//! cargo run -p orchard-storefront
//!
//! # Run integration tests against it
//! cargo test -p orchard-integration-tests -- --ignored
//! ```
//!
//! Tests are `#[ignore]`d by default because they need a running server.
//! The server address is read from `STOREFRONT_BASE_URL` and defaults to
//! `http://localhost:3000`.

use reqwest::Client;
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the storefront (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// An HTTP client with a cookie store, for session-based HTML flows.
#[must_use]
pub fn browser_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// A plain HTTP client for the token-authenticated JSON API.
#[must_use]
pub fn api_client() -> Client {
    Client::builder().build().expect("Failed to create HTTP client")
}

/// A unique throwaway email address for this test run.
#[must_use]
pub fn unique_email() -> String {
    format!("integration-test-{}@example.com", Uuid::new_v4())
}

/// Register a fresh API user and return their email and token.
///
/// # Panics
///
/// Panics if the server is unreachable or registration fails.
pub async fn register_api_user(client: &Client) -> (String, String) {
    let email = unique_email();
    let resp = client
        .post(format!("{}/api/auth/register", base_url()))
        .json(&json!({ "email": email, "password": "integration-pass" }))
        .send()
        .await
        .expect("Failed to register test user");

    assert_eq!(resp.status(), 201, "registration should return 201 Created");

    let body: Value = resp.json().await.expect("Failed to parse register response");
    let token = body
        .get("token")
        .and_then(Value::as_str)
        .expect("register response should contain a token")
        .to_string();

    (email, token)
}
