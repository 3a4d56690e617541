//! Integration tests for order placement through the JSON API.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - A seeded catalog with in-stock products
//! - The storefront running (cargo run -p orchard-storefront)
//!
//! Run with: cargo test -p orchard-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use orchard_integration_tests::{api_client, base_url, register_api_user};

/// Fetch the first in-stock product, skipping the test when none exists.
async fn first_in_stock_product(client: &Client, token: &str) -> Option<Value> {
    let resp = client
        .get(format!("{}/api/products", base_url()))
        .header("Authorization", format!("Token {token}"))
        .send()
        .await
        .expect("Failed to list products");

    assert_eq!(resp.status(), StatusCode::OK);

    let products: Vec<Value> = resp.json().await.expect("Failed to parse product list");
    products
        .into_iter()
        .find(|p| p.get("stock").and_then(Value::as_i64).unwrap_or(0) > 0)
}

/// Add a product to the caller's cart.
async fn add_to_cart(client: &Client, token: &str, product_id: i64, quantity: i64) {
    let resp = client
        .post(format!("{}/api/cart", base_url()))
        .header("Authorization", format!("Token {token}"))
        .json(&json!({ "product_id": product_id, "quantity": quantity }))
        .send()
        .await
        .expect("Failed to add to cart");

    assert_eq!(resp.status(), StatusCode::OK);
}

// ============================================================================
// Order Placement Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_order_from_empty_cart_is_rejected() {
    let client = api_client();
    let (_email, token) = register_api_user(&client).await;

    let resp = client
        .post(format!("{}/api/orders", base_url()))
        .header("Authorization", format!("Token {token}"))
        .send()
        .await
        .expect("Failed to place order");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_order_placement_empties_cart_and_decrements_stock() {
    let client = api_client();
    let (_email, token) = register_api_user(&client).await;

    let Some(product) = first_in_stock_product(&client, &token).await else {
        return; // No stock to order against
    };
    let product_id = product.get("id").and_then(Value::as_i64).expect("product id");
    let stock_before = product.get("stock").and_then(Value::as_i64).expect("stock");

    add_to_cart(&client, &token, product_id, 1).await;

    let resp = client
        .post(format!("{}/api/orders", base_url()))
        .header("Authorization", format!("Token {token}"))
        .send()
        .await
        .expect("Failed to place order");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let order: Value = resp.json().await.expect("Failed to parse order");
    assert_eq!(order.get("status").and_then(Value::as_str), Some("pending"));

    // Cart is now empty
    let resp = client
        .get(format!("{}/api/cart", base_url()))
        .header("Authorization", format!("Token {token}"))
        .send()
        .await
        .expect("Failed to get cart");
    let cart: Value = resp.json().await.expect("Failed to parse cart");
    assert_eq!(cart.get("lines").and_then(Value::as_array).map(Vec::len), Some(0));

    // Stock went down by the ordered quantity
    let resp = client
        .get(format!("{}/api/products/{product_id}", base_url()))
        .header("Authorization", format!("Token {token}"))
        .send()
        .await
        .expect("Failed to get product");
    let after: Value = resp.json().await.expect("Failed to parse product");
    assert_eq!(
        after.get("stock").and_then(Value::as_i64),
        Some(stock_before - 1)
    );
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_order_exceeding_stock_is_rejected() {
    let client = api_client();
    let (_email, token) = register_api_user(&client).await;

    let Some(product) = first_in_stock_product(&client, &token).await else {
        return;
    };
    let product_id = product.get("id").and_then(Value::as_i64).expect("product id");
    let stock = product.get("stock").and_then(Value::as_i64).expect("stock");

    add_to_cart(&client, &token, product_id, stock + 1).await;

    let resp = client
        .post(format!("{}/api/orders", base_url()))
        .header("Authorization", format!("Token {token}"))
        .send()
        .await
        .expect("Failed to place order");

    // Rejected, and the cart is left intact for the user to fix
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .get(format!("{}/api/cart", base_url()))
        .header("Authorization", format!("Token {token}"))
        .send()
        .await
        .expect("Failed to get cart");
    let cart: Value = resp.json().await.expect("Failed to parse cart");
    assert_eq!(cart.get("lines").and_then(Value::as_array).map(Vec::len), Some(1));
}

// ============================================================================
// Shipping & Payment Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_shipping_and_payment_capture() {
    let client = api_client();
    let (_email, token) = register_api_user(&client).await;

    let Some(product) = first_in_stock_product(&client, &token).await else {
        return;
    };
    let product_id = product.get("id").and_then(Value::as_i64).expect("product id");

    add_to_cart(&client, &token, product_id, 1).await;

    let resp = client
        .post(format!("{}/api/orders", base_url()))
        .header("Authorization", format!("Token {token}"))
        .send()
        .await
        .expect("Failed to place order");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let order: Value = resp.json().await.expect("Failed to parse order");
    let order_id = order.get("id").and_then(Value::as_i64).expect("order id");

    // Save shipping
    let resp = client
        .post(format!("{}/api/orders/{order_id}/shipping", base_url()))
        .header("Authorization", format!("Token {token}"))
        .json(&json!({
            "full_name": "Integration Test",
            "address_line1": "123 Test Street",
            "city": "Testville",
            "state": "CA",
            "postal_code": "90210",
            "country": "US",
            "phone": "555-0100"
        }))
        .send()
        .await
        .expect("Failed to save shipping");
    assert_eq!(resp.status(), StatusCode::OK);

    // Save payment
    let resp = client
        .post(format!("{}/api/orders/{order_id}/payment", base_url()))
        .header("Authorization", format!("Token {token}"))
        .json(&json!({ "method": "cod" }))
        .send()
        .await
        .expect("Failed to save payment");
    assert_eq!(resp.status(), StatusCode::OK);

    // Detail reflects both
    let resp = client
        .get(format!("{}/api/orders/{order_id}", base_url()))
        .header("Authorization", format!("Token {token}"))
        .send()
        .await
        .expect("Failed to get order detail");
    assert_eq!(resp.status(), StatusCode::OK);

    let detail: Value = resp.json().await.expect("Failed to parse order detail");
    assert_eq!(
        detail.pointer("/shipping/city").and_then(Value::as_str),
        Some("Testville")
    );
    assert_eq!(
        detail.pointer("/payment/method").and_then(Value::as_str),
        Some("cod")
    );
    assert_eq!(
        detail.pointer("/payment/status").and_then(Value::as_str),
        Some("pending")
    );
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_orders_are_scoped_to_their_owner() {
    let client = api_client();
    let (_email, token) = register_api_user(&client).await;

    let Some(product) = first_in_stock_product(&client, &token).await else {
        return;
    };
    let product_id = product.get("id").and_then(Value::as_i64).expect("product id");

    add_to_cart(&client, &token, product_id, 1).await;

    let resp = client
        .post(format!("{}/api/orders", base_url()))
        .header("Authorization", format!("Token {token}"))
        .send()
        .await
        .expect("Failed to place order");
    let order: Value = resp.json().await.expect("Failed to parse order");
    let order_id = order.get("id").and_then(Value::as_i64).expect("order id");

    // A different user can't see it
    let (_other_email, other_token) = register_api_user(&client).await;
    let resp = client
        .get(format!("{}/api/orders/{order_id}", base_url()))
        .header("Authorization", format!("Token {other_token}"))
        .send()
        .await
        .expect("Failed to get order as other user");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
