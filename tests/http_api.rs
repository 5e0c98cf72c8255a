//! HTTP 层集成测试 - oneshot 驱动完整路由
//!
//! Status-code mapping and the `{success, message?, ...payload}` envelope,
//! end to end over the assembled router.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use quickcart_server::api;
use quickcart_server::core::{Config, ServerState};

async fn app() -> Router {
    let config = Config::with_overrides("/tmp/quickcart-test", 0);
    let state = ServerState::initialize_in_memory(&config)
        .await
        .expect("in-memory state");
    api::router().with_state(state)
}

async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn cash_order_body() -> Value {
    json!({
        "userId": "user:asha",
        "items": [{
            "productId": "product:bananas",
            "name": "Organic Bananas",
            "price": 3.49,
            "quantity": 2,
            "image": "/images/bananas.jpg"
        }],
        "shippingAddress": {
            "fullName": "Asha Rao",
            "phone": "555-0142",
            "address": "12 Elm Street",
            "city": "Springfield",
            "state": "IL",
            "zipCode": "62704",
            "country": "USA"
        },
        "paymentMethod": "Cash on Delivery",
        "subtotal": 6.98,
        "shippingCost": 0,
        "totalAmount": 6.98
    })
}

#[tokio::test]
async fn cash_checkout_returns_201_with_defaults() {
    let app = app().await;

    let (status, body) = request(&app, "POST", "/api/orders", Some(cash_order_body())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["order"]["orderStatus"], json!("Processing"));
    assert_eq!(body["order"]["paymentStatus"], json!("Pending"));
    assert!(
        body["order"]["orderNumber"]
            .as_str()
            .unwrap()
            .starts_with("ORD")
    );
}

#[tokio::test]
async fn order_validation_failures_are_400_with_envelope() {
    let app = app().await;

    let mut body = cash_order_body();
    body["items"] = json!([]);
    let (status, body) = request(&app, "POST", "/api/orders", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert!(body["message"].as_str().unwrap().contains("items"));

    // out-of-set enum is rejected, never coerced
    let mut body = cash_order_body();
    body["paymentMethod"] = json!("Barter");
    let (status, body) = request(&app, "POST", "/api/orders", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("paymentMethod"));
}

#[tokio::test]
async fn unknown_ids_are_404() {
    let app = app().await;

    let (status, body) = request(&app, "GET", "/api/orders/order:doesnotexist", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));

    let (status, _) = request(&app, "GET", "/api/payments/payment:doesnotexist", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn shipped_orders_cannot_be_cancelled_over_http() {
    let app = app().await;

    let (_, body) = request(&app, "POST", "/api/orders", Some(cash_order_body())).await;
    let id = body["order"]["id"].as_str().unwrap().to_string();

    let (status, _) = request(
        &app,
        "PATCH",
        &format!("/api/orders/{id}/status"),
        Some(json!({"orderStatus": "Shipped"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = request(&app, "DELETE", &format!("/api/orders/{id}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));

    let (_, body) = request(&app, "GET", &format!("/api/orders/{id}"), None).await;
    assert_eq!(body["order"]["orderStatus"], json!("Shipped"));
}

#[tokio::test]
async fn cancelling_a_fresh_order_returns_it_cancelled() {
    let app = app().await;

    let (_, body) = request(&app, "POST", "/api/orders", Some(cash_order_body())).await;
    let id = body["order"]["id"].as_str().unwrap().to_string();

    let (status, body) = request(&app, "DELETE", &format!("/api/orders/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["order"]["orderStatus"], json!("Cancelled"));
    assert_eq!(body["message"], json!("Order cancelled successfully"));
}

#[tokio::test]
async fn online_checkout_resolves_the_payment_on_read() {
    let app = app().await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/payments",
        Some(json!({
            "userId": "user:asha",
            "amount": 25.98,
            "paymentMethod": "Credit/Debit Card",
            "cardLastFour": "4242",
            "transactionStatus": "Completed"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let payment_id = body["payment"]["id"].as_str().unwrap().to_string();
    let txn = body["payment"]["transactionId"].as_str().unwrap();
    assert!(txn.starts_with("TXN"));

    let mut order = cash_order_body();
    order["paymentMethod"] = json!("Online Payment");
    order["paymentId"] = json!(payment_id);
    order["subtotal"] = json!(19.99);
    order["shippingCost"] = json!(5.99);
    order["totalAmount"] = json!(25.98);
    order["paymentStatus"] = json!("Paid");
    let (status, body) = request(&app, "POST", "/api/orders", Some(order)).await;
    assert_eq!(status, StatusCode::CREATED);
    let order_id = body["order"]["id"].as_str().unwrap().to_string();

    let (_, body) = request(&app, "GET", &format!("/api/orders/{order_id}"), None).await;
    assert_eq!(body["order"]["payment"]["amount"], json!(25.98));

    // linked payment is out of the orphan listing
    let (_, body) = request(&app, "GET", "/api/payments/orphaned", None).await;
    assert_eq!(body["payments"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn payment_missing_amount_is_400() {
    let app = app().await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/payments",
        Some(json!({
            "userId": "user:asha",
            "paymentMethod": "PayPal"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("amount"));
}

#[tokio::test]
async fn user_listing_is_empty_not_an_error() {
    let app = app().await;

    let (status, body) = request(&app, "GET", "/api/orders/user/user:nobody", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["orders"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn signup_login_round_trip() {
    let app = app().await;

    let signup = json!({
        "fullName": "Asha Rao",
        "email": "asha@example.com",
        "password": "correct horse",
        "phone": "555-0142"
    });
    let (status, body) = request(&app, "POST", "/api/signup", Some(signup.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], json!("Account created"));

    // duplicate email is a conflict
    let (status, _) = request(&app, "POST", "/api/signup", Some(signup)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = request(
        &app,
        "POST",
        "/api/login",
        Some(json!({"email": "asha@example.com", "password": "correct horse"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fullName"], json!("Asha Rao"));
    assert!(body["id"].as_str().unwrap().starts_with("user:"));

    let (status, _) = request(
        &app,
        "POST",
        "/api/login",
        Some(json!({"email": "asha@example.com", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn product_search_filters_case_insensitively() {
    let app = app().await;

    for (name, category) in [
        ("Organic Bananas", "Fruit"),
        ("Ground Coffee", "Beverages"),
        ("Banana Bread", "Bakery"),
    ] {
        let (status, _) = request(
            &app,
            "POST",
            "/api/products",
            Some(json!({
                "name": name,
                "category": category,
                "price": 4.99,
                "weight": "500 g",
                "image": "/images/item.jpg",
                "description": "Fresh from the shelf"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = request(&app, "GET", "/api/products?search=banana", None).await;
    assert_eq!(body["products"].as_array().unwrap().len(), 2);

    let (_, body) = request(&app, "GET", "/api/products?category=Beverages", None).await;
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], json!("Ground Coffee"));
}

#[tokio::test]
async fn admin_listing_resolves_the_user_projection() {
    let app = app().await;

    let (_, _) = request(
        &app,
        "POST",
        "/api/signup",
        Some(json!({
            "fullName": "Asha Rao",
            "email": "asha@example.com",
            "password": "correct horse"
        })),
    )
    .await;
    let (_, body) = request(
        &app,
        "POST",
        "/api/login",
        Some(json!({"email": "asha@example.com", "password": "correct horse"})),
    )
    .await;
    let user_id = body["id"].as_str().unwrap().to_string();

    let mut order = cash_order_body();
    order["userId"] = json!(user_id);
    request(&app, "POST", "/api/orders", Some(order)).await;

    // an order whose userId resolves nowhere keeps the raw id, user stays null
    request(&app, "POST", "/api/orders", Some(cash_order_body())).await;

    let (status, body) = request(&app, "GET", "/api/orders", None).await;
    assert_eq!(status, StatusCode::OK);
    let orders = body["orders"].as_array().unwrap();
    assert_eq!(orders.len(), 2);

    let resolved: Vec<&Value> = orders
        .iter()
        .filter(|o| o["userId"] == json!(user_id))
        .collect();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0]["user"]["fullName"], json!("Asha Rao"));
    assert_eq!(resolved[0]["user"]["email"], json!("asha@example.com"));

    let unresolved: Vec<&Value> = orders
        .iter()
        .filter(|o| o["userId"] == json!("user:asha"))
        .collect();
    assert_eq!(unresolved.len(), 1);
    assert!(unresolved[0]["user"].is_null());
}

#[tokio::test]
async fn health_endpoint_answers() {
    let app = app().await;

    let (status, body) = request(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));
}
