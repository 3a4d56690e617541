//! Integration tests for the JSON API catalog, cart, favourites, and reviews.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - A seeded catalog (orchard-cli seed -f crates/cli/seed/catalog.yaml)
//! - The storefront running (cargo run -p orchard-storefront)
//!
//! Run with: cargo test -p orchard-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use orchard_integration_tests::{api_client, base_url, register_api_user};

/// Fetch the first product in the catalog, skipping the test when empty.
async fn first_product(client: &Client, token: &str) -> Option<Value> {
    let resp = client
        .get(format!("{}/api/products", base_url()))
        .header("Authorization", format!("Token {token}"))
        .send()
        .await
        .expect("Failed to list products");

    assert_eq!(resp.status(), StatusCode::OK);

    let products: Vec<Value> = resp.json().await.expect("Failed to parse product list");
    products.into_iter().next()
}

// ============================================================================
// Catalog Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_product_detail_matches_listing() {
    let client = api_client();
    let (_email, token) = register_api_user(&client).await;

    let Some(product) = first_product(&client, &token).await else {
        return; // Empty catalog, nothing to verify
    };
    let id = product.get("id").and_then(Value::as_i64).expect("product id");

    let resp = client
        .get(format!("{}/api/products/{id}", base_url()))
        .header("Authorization", format!("Token {token}"))
        .send()
        .await
        .expect("Failed to get product detail");

    assert_eq!(resp.status(), StatusCode::OK);

    let detail: Value = resp.json().await.expect("Failed to parse product detail");
    assert_eq!(detail.get("id"), product.get("id"));
    assert_eq!(detail.get("name"), product.get("name"));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_unknown_product_is_not_found() {
    let client = api_client();
    let (_email, token) = register_api_user(&client).await;

    let resp = client
        .get(format!("{}/api/products/999999999", base_url()))
        .header("Authorization", format!("Token {token}"))
        .send()
        .await
        .expect("Failed to get unknown product");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_product_create_requires_staff() {
    let client = api_client();
    let (_email, token) = register_api_user(&client).await;

    let resp = client
        .post(format!("{}/api/products", base_url()))
        .header("Authorization", format!("Token {token}"))
        .json(&json!({ "name": "Contraband", "price": "1.00", "stock": 1 }))
        .send()
        .await
        .expect("Failed to attempt product create");

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

// ============================================================================
// Cart Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_cart_add_increments_existing_line() {
    let client = api_client();
    let (_email, token) = register_api_user(&client).await;

    let Some(product) = first_product(&client, &token).await else {
        return;
    };
    let product_id = product.get("id").and_then(Value::as_i64).expect("product id");

    // Fresh user, fresh cart
    let resp = client
        .get(format!("{}/api/cart", base_url()))
        .header("Authorization", format!("Token {token}"))
        .send()
        .await
        .expect("Failed to get cart");
    let cart: Value = resp.json().await.expect("Failed to parse cart");
    assert_eq!(cart.get("lines").and_then(Value::as_array).map(Vec::len), Some(0));

    // Add twice, the second call increments the same line
    for _ in 0..2 {
        let resp = client
            .post(format!("{}/api/cart", base_url()))
            .header("Authorization", format!("Token {token}"))
            .json(&json!({ "product_id": product_id, "quantity": 1 }))
            .send()
            .await
            .expect("Failed to add to cart");
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = client
        .get(format!("{}/api/cart", base_url()))
        .header("Authorization", format!("Token {token}"))
        .send()
        .await
        .expect("Failed to get cart");
    let cart: Value = resp.json().await.expect("Failed to parse cart");

    let lines = cart.get("lines").and_then(Value::as_array).expect("cart lines");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].get("quantity").and_then(Value::as_i64), Some(2));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_cart_rejects_non_positive_quantity() {
    let client = api_client();
    let (_email, token) = register_api_user(&client).await;

    let Some(product) = first_product(&client, &token).await else {
        return;
    };
    let product_id = product.get("id").and_then(Value::as_i64).expect("product id");

    let resp = client
        .post(format!("{}/api/cart", base_url()))
        .header("Authorization", format!("Token {token}"))
        .json(&json!({ "product_id": product_id, "quantity": 0 }))
        .send()
        .await
        .expect("Failed to send zero-quantity add");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_cart_add_unknown_product_is_not_found() {
    let client = api_client();
    let (_email, token) = register_api_user(&client).await;

    let resp = client
        .post(format!("{}/api/cart", base_url()))
        .header("Authorization", format!("Token {token}"))
        .json(&json!({ "product_id": 999_999_999, "quantity": 1 }))
        .send()
        .await
        .expect("Failed to add unknown product to cart");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Favourites Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_favourite_add_is_idempotent() {
    let client = api_client();
    let (_email, token) = register_api_user(&client).await;

    let Some(product) = first_product(&client, &token).await else {
        return;
    };
    let product_id = product.get("id").and_then(Value::as_i64).expect("product id");

    for _ in 0..2 {
        let resp = client
            .post(format!("{}/api/favourites", base_url()))
            .header("Authorization", format!("Token {token}"))
            .json(&json!({ "product_id": product_id }))
            .send()
            .await
            .expect("Failed to add favourite");
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = client
        .get(format!("{}/api/favourites", base_url()))
        .header("Authorization", format!("Token {token}"))
        .send()
        .await
        .expect("Failed to list favourites");
    let favourites: Vec<Value> = resp.json().await.expect("Failed to parse favourites");
    assert_eq!(favourites.len(), 1);

    let resp = client
        .delete(format!("{}/api/favourites", base_url()))
        .header("Authorization", format!("Token {token}"))
        .json(&json!({ "product_id": product_id }))
        .send()
        .await
        .expect("Failed to remove favourite");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_favourite_add_unknown_product_is_not_found() {
    let client = api_client();
    let (_email, token) = register_api_user(&client).await;

    let resp = client
        .post(format!("{}/api/favourites", base_url()))
        .header("Authorization", format!("Token {token}"))
        .json(&json!({ "product_id": 999_999_999 }))
        .send()
        .await
        .expect("Failed to add unknown favourite");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Review Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_review_rating_bounds() {
    let client = api_client();
    let (_email, token) = register_api_user(&client).await;

    let Some(product) = first_product(&client, &token).await else {
        return;
    };
    let id = product.get("id").and_then(Value::as_i64).expect("product id");

    let resp = client
        .post(format!("{}/api/products/{id}/reviews", base_url()))
        .header("Authorization", format!("Token {token}"))
        .json(&json!({ "rating": 6, "comment": "off the chart" }))
        .send()
        .await
        .expect("Failed to send out-of-range review");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .post(format!("{}/api/products/{id}/reviews", base_url()))
        .header("Authorization", format!("Token {token}"))
        .json(&json!({ "rating": 5, "comment": "excellent" }))
        .send()
        .await
        .expect("Failed to send review");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .get(format!("{}/api/products/{id}/reviews", base_url()))
        .header("Authorization", format!("Token {token}"))
        .send()
        .await
        .expect("Failed to list reviews");
    let reviews: Vec<Value> = resp.json().await.expect("Failed to parse reviews");
    assert!(
        reviews
            .iter()
            .any(|r| r.get("comment").and_then(Value::as_str) == Some("excellent"))
    );
}
