//! # Request Handlers
//!
//! Axum request handlers for the storefront payment API.
//!
//! Every handler returns `Result<_, (StatusCode, Json<ErrorResponse>)>`
//! and maps failures through [`payment_error_to_response`]. That mapping
//! is the top-level error boundary: no internal failure reaches the
//! caller as anything but a short, typed `{success: false, error,
//! [details]}` body.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Form, Json,
};
use pay_core::{validate_order_request, PaymentError, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::{error, info, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create payment response
#[derive(Debug, Serialize)]
pub struct CreatePaymentResponse {
    pub success: bool,
    /// Hosted payment page the browser posts `payment_data` to
    pub payment_url: String,
    /// Gateway form field set
    pub payment_data: Value,
    /// Freshly generated order id
    pub order_id: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

/// Partial user payload for create/update
#[derive(Debug, Default, Deserialize)]
pub struct UserPayload {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Map a `PaymentError` to its HTTP response. Validation failures carry
/// every collected field error in `details`; auth failures stay generic
/// (the reason was logged at the call site).
fn payment_error_to_response(err: PaymentError) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    let details = err.details();
    let response = ErrorResponse {
        success: false,
        error: err.to_string(),
        details: (!details.is_empty()).then_some(details),
    };
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "storefront-pay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create a hosted-page payment from a raw cart body.
///
/// Pipeline: validate → price → token exchange → payload. Validation
/// failures answer 400 with all collected errors; token failures answer
/// 500 with a generic message.
#[instrument(skip(state, body))]
pub async fn create_payment(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CreatePaymentResponse>, (StatusCode, Json<ErrorResponse>)> {
    let body_value: Value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).map_err(|_| {
            payment_error_to_response(PaymentError::Validation(vec![ValidationError::new(
                "body",
                "request body must be valid JSON",
            )]))
        })?
    };

    let request = validate_order_request(&body_value)
        .map_err(|errors| payment_error_to_response(PaymentError::Validation(errors)))?;

    let session = state
        .gateway
        .create_payment(&request)
        .await
        .map_err(|err| {
            error!("failed to create payment: {err:?}");
            payment_error_to_response(err)
        })?;

    info!("payment created for order {}", session.order_id);

    Ok(Json(CreatePaymentResponse {
        success: true,
        payment_url: session.payment_url,
        payment_data: session.payment_data,
        order_id: session.order_id,
    }))
}

/// Receive the gateway's asynchronous post-payment notification.
///
/// The field set is recorded and acknowledged; no signature or origin
/// verification exists and nothing is reconciled against an order.
#[instrument(skip(fields))]
pub async fn payment_response(
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Json<Value>, (StatusCode, Json<ErrorResponse>)> {
    if fields.is_empty() {
        warn!("empty gateway payment response");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                success: false,
                error: "no data received".to_string(),
                details: None,
            }),
        ));
    }

    info!("gateway payment response received: {:?}", fields);

    Ok(Json(json!({
        "success": true,
        "status": "received",
        "message": "response processed"
    })))
}

/// The fixed five-item product catalog
pub async fn list_products(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "success": true,
        "data": state.catalog.products()
    }))
}

// =============================================================================
// User Directory (collaborator)
// =============================================================================

/// List all users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<ErrorResponse>)> {
    let users = state.users.list().await.map_err(payment_error_to_response)?;
    Ok(Json(json!({"success": true, "data": users})))
}

/// Create a user
#[instrument(skip(state, body))]
pub async fn create_user(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<ErrorResponse>)> {
    let payload: UserPayload = serde_json::from_slice(&body).unwrap_or_default();
    let (username, email) = require_user_fields(payload)?;

    let user = state
        .users
        .create(&username, &email)
        .await
        .map_err(payment_error_to_response)?;

    info!("created user {}", user.id);
    Ok((
        StatusCode::CREATED,
        Json(json!({"success": true, "data": user})),
    ))
}

/// Fetch one user
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<ErrorResponse>)> {
    let user = state
        .users
        .get(user_id)
        .await
        .map_err(payment_error_to_response)?;
    Ok(Json(json!({"success": true, "data": user})))
}

/// Update the provided fields of a user
#[instrument(skip(state, body))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    body: Bytes,
) -> Result<Json<Value>, (StatusCode, Json<ErrorResponse>)> {
    let payload: UserPayload = serde_json::from_slice(&body).unwrap_or_default();

    let user = state
        .users
        .update(user_id, payload.username, payload.email)
        .await
        .map_err(payment_error_to_response)?;

    Ok(Json(json!({"success": true, "data": user})))
}

/// Delete a user
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<ErrorResponse>)> {
    state
        .users
        .delete(user_id)
        .await
        .map_err(payment_error_to_response)?;

    info!("deleted user {user_id}");
    Ok(Json(json!({"success": true, "message": "user deleted"})))
}

fn require_user_fields(
    payload: UserPayload,
) -> Result<(String, String), (StatusCode, Json<ErrorResponse>)> {
    let mut errors = Vec::new();
    if payload.username.is_none() {
        errors.push(ValidationError::new("username", "is required"));
    }
    if payload.email.is_none() {
        errors.push(ValidationError::new("email", "is required"));
    }
    if !errors.is_empty() {
        return Err(payment_error_to_response(PaymentError::Validation(errors)));
    }
    // Both checked above
    Ok((payload.username.unwrap_or_default(), payload.email.unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::create_router;
    use crate::state::{AppConfig, AppState};
    use crate::store::UserStore;
    use async_trait::async_trait;
    use axum_test::TestServer;
    use chrono::Utc;
    use pay_core::{
        AuthError, Order, OrderRequest, PaymentGateway, PaymentResult, PaymentSession,
        ProductCatalog,
    };
    use std::sync::Arc;

    struct StubGateway;

    #[async_trait]
    impl PaymentGateway for StubGateway {
        async fn create_payment(&self, request: &OrderRequest) -> PaymentResult<PaymentSession> {
            let order = Order::from_request(request);
            Ok(PaymentSession {
                order_id: order.id,
                payment_url: "https://gateway.test/Payment".to_string(),
                payment_data: json!({"token": "tok123", "Names": request.customer_name}),
                created_at: Utc::now(),
            })
        }

        fn gateway_name(&self) -> &'static str {
            "stub"
        }
    }

    struct FailingGateway;

    #[async_trait]
    impl PaymentGateway for FailingGateway {
        async fn create_payment(&self, _request: &OrderRequest) -> PaymentResult<PaymentSession> {
            Err(PaymentError::Auth(AuthError::Status(503)))
        }

        fn gateway_name(&self) -> &'static str {
            "failing"
        }
    }

    async fn test_server(gateway: Arc<dyn PaymentGateway>) -> TestServer {
        let state = AppState {
            gateway,
            catalog: ProductCatalog::fixed(),
            users: UserStore::connect("sqlite::memory:").await.unwrap(),
            config: AppConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                database_url: "sqlite::memory:".to_string(),
                static_dir: "static".to_string(),
                environment: "test".to_string(),
            },
        };
        TestServer::new(create_router(state)).unwrap()
    }

    fn valid_cart() -> Value {
        json!({
            "customer_name": "Juan Pérez",
            "customer_email": "juan@example.com",
            "customer_address": "Calle 123",
            "items": [{"name": "X", "price": 10.00, "quantity": 2}]
        })
    }

    #[tokio::test]
    async fn test_create_payment_success() {
        let server = test_server(Arc::new(StubGateway)).await;

        let res = server.post("/api/agilpay/create-payment").json(&valid_cart()).await;
        assert_eq!(res.status_code(), StatusCode::OK);

        let body: Value = res.json();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["payment_url"], "https://gateway.test/Payment");
        assert_eq!(body["payment_data"]["token"], "tok123");
        assert!(!body["order_id"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_payment_missing_fields() {
        let server = test_server(Arc::new(StubGateway)).await;

        let res = server
            .post("/api/agilpay/create-payment")
            .json(&json!({"customer_name": "Juan Pérez"}))
            .await;
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);

        let body: Value = res.json();
        assert_eq!(body["success"], json!(false));
        let details = body["details"].as_array().unwrap();
        assert_eq!(details.len(), 3);
        assert!(details.iter().any(|d| d.as_str().unwrap().contains("customer_email")));
    }

    #[tokio::test]
    async fn test_create_payment_empty_items() {
        let server = test_server(Arc::new(StubGateway)).await;

        let mut cart = valid_cart();
        cart["items"] = json!([]);
        let res = server.post("/api/agilpay/create-payment").json(&cart).await;
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);

        let body: Value = res.json();
        let details = body["details"].as_array().unwrap();
        assert!(details[0].as_str().unwrap().contains("must be a non-empty list"));
    }

    #[tokio::test]
    async fn test_create_payment_invalid_json_body() {
        let server = test_server(Arc::new(StubGateway)).await;

        let res = server
            .post("/api/agilpay/create-payment")
            .text("{not json")
            .await;
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_payment_auth_failure_is_generic_500() {
        let server = test_server(Arc::new(FailingGateway)).await;

        let res = server.post("/api/agilpay/create-payment").json(&valid_cart()).await;
        assert_eq!(res.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = res.json();
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], "could not obtain authentication token");
        // The gateway reason (503) must not leak
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_payment_response_acknowledged() {
        let server = test_server(Arc::new(StubGateway)).await;

        let res = server
            .post("/api/agilpay/payment-response")
            .form(&[("TransactionId", "abc-1"), ("Status", "approved")])
            .await;
        assert_eq!(res.status_code(), StatusCode::OK);

        let body: Value = res.json();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["status"], "received");
    }

    #[tokio::test]
    async fn test_payment_response_empty_body_rejected() {
        let server = test_server(Arc::new(StubGateway)).await;

        let res = server
            .post("/api/agilpay/payment-response")
            .form(&Vec::<(String, String)>::new())
            .await;
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);

        let body: Value = res.json();
        assert_eq!(body["success"], json!(false));
    }

    #[tokio::test]
    async fn test_products_returns_five_fixed_items() {
        let server = test_server(Arc::new(StubGateway)).await;

        let res = server.get("/api/agilpay/products").await;
        assert_eq!(res.status_code(), StatusCode::OK);

        let body: Value = res.json();
        assert_eq!(body["success"], json!(true));
        let products = body["data"].as_array().unwrap();
        assert_eq!(products.len(), 5);
        assert_eq!(products[0]["price"], json!(99.99));
    }

    #[tokio::test]
    async fn test_user_crud_flow() {
        let server = test_server(Arc::new(StubGateway)).await;

        // Create
        let res = server
            .post("/api/users")
            .json(&json!({"username": "alice", "email": "Alice@Example.com"}))
            .await;
        assert_eq!(res.status_code(), StatusCode::CREATED);
        let body: Value = res.json();
        let id = body["data"]["id"].as_i64().unwrap();
        assert_eq!(body["data"]["email"], "alice@example.com");

        // Duplicate -> 409
        let res = server
            .post("/api/users")
            .json(&json!({"username": "alice", "email": "other@example.com"}))
            .await;
        assert_eq!(res.status_code(), StatusCode::CONFLICT);

        // List
        let res = server.get("/api/users").await;
        assert_eq!(res.json::<Value>()["data"].as_array().unwrap().len(), 1);

        // Update
        let res = server
            .put(&format!("/api/users/{id}"))
            .json(&json!({"email": "new@example.com"}))
            .await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.json::<Value>()["data"]["email"], "new@example.com");

        // Delete, then gone
        let res = server.delete(&format!("/api/users/{id}")).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        let res = server.get(&format!("/api/users/{id}")).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_user_missing_fields() {
        let server = test_server(Arc::new(StubGateway)).await;

        let res = server.post("/api/users").json(&json!({"username": "alice"})).await;
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);

        let body: Value = res.json();
        let details = body["details"].as_array().unwrap();
        assert!(details[0].as_str().unwrap().contains("email"));
    }

    #[tokio::test]
    async fn test_missing_user_is_404() {
        let server = test_server(Arc::new(StubGateway)).await;

        let res = server.get("/api/users/999").await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health() {
        let server = test_server(Arc::new(StubGateway)).await;

        let res = server.get("/health").await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.json::<Value>()["status"], "healthy");
    }
}
