//! # Gateway Token Client
//!
//! Server-to-server OAuth client-credentials exchange with Agilpay,
//! scoped to a single order. One POST, a fixed 30 second budget, no
//! retry; every failure mode maps to a distinct [`AuthError`] reason.

use crate::config::AgilpayConfig;
use pay_core::{AuthError, PaymentResult};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

/// Fixed budget for the token exchange
pub(crate) const TOKEN_TIMEOUT: Duration = Duration::from_secs(30);

/// Wire body of the token request
#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    grant_type: &'static str,
    client_id: &'a str,
    client_secret: &'a str,
    #[serde(rename = "orderId")]
    order_id: &'a str,
    #[serde(rename = "customerId")]
    customer_id: &'a str,
    amount: f64,
}

/// Wire body of the token response; fields other than `access_token`
/// are ignored
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// Exchange client credentials for an order-scoped payment token.
///
/// Returns the opaque bearer token on HTTP 200 with a non-empty
/// `access_token` in the body. Any other outcome fails: the token is
/// single-use-per-order and there is nothing to cache or refresh.
pub async fn fetch_payment_token(
    client: &Client,
    config: &AgilpayConfig,
    order_id: &str,
    customer_id: &str,
    amount: f64,
) -> PaymentResult<String> {
    let request = TokenRequest {
        grant_type: "client_credentials",
        client_id: &config.client_id,
        client_secret: &config.client_secret,
        order_id,
        customer_id,
        amount,
    };

    info!("requesting payment token for order {}", order_id);

    let response = client
        .post(&config.token_url)
        .json(&request)
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                AuthError::Timeout
            } else {
                AuthError::Network(e.to_string())
            }
        })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| AuthError::Network(e.to_string()))?;

    if status != StatusCode::OK {
        error!(
            "token endpoint error for order {}: status={}, body={}",
            order_id, status, body
        );
        return Err(AuthError::Status(status.as_u16()).into());
    }

    let token_response: TokenResponse =
        serde_json::from_str(&body).map_err(|e| AuthError::Malformed(e.to_string()))?;

    match token_response.access_token.filter(|t| !t.is_empty()) {
        Some(token) => {
            info!("token obtained for order {}", order_id);
            Ok(token)
        }
        None => {
            error!("access_token missing in token response for order {}", order_id);
            Err(AuthError::MissingToken.into())
        }
    }
}
