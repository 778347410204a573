//! # Agilpay Gateway
//!
//! [`PaymentGateway`] implementation orchestrating the payment pipeline:
//! price the validated cart, exchange credentials for an order-scoped
//! token, assemble the hosted-page payload. Stages run strictly in
//! sequence; a failed stage fails the whole request with no partial
//! retry.

use crate::config::AgilpayConfig;
use crate::payload::build_payload;
use crate::token::{fetch_payment_token, TOKEN_TIMEOUT};
use async_trait::async_trait;
use chrono::Utc;
use pay_core::{Order, OrderRequest, PaymentError, PaymentGateway, PaymentResult, PaymentSession};
use reqwest::Client;
use tracing::{info, instrument};

/// Agilpay hosted-page payment gateway
pub struct AgilpayGateway {
    config: AgilpayConfig,
    client: Client,
}

impl AgilpayGateway {
    /// Create a new gateway from explicit configuration
    pub fn new(config: AgilpayConfig) -> Self {
        let client = Client::builder()
            .timeout(TOKEN_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables (sandbox defaults apply)
    pub fn from_env() -> Self {
        Self::new(AgilpayConfig::from_env())
    }

    /// The active gateway configuration
    pub fn config(&self) -> &AgilpayConfig {
        &self.config
    }
}

#[async_trait]
impl PaymentGateway for AgilpayGateway {
    #[instrument(skip(self, request), fields(customer = %request.customer_email))]
    async fn create_payment(&self, request: &OrderRequest) -> PaymentResult<PaymentSession> {
        // Price the cart. A fresh order id per call: double-submits are
        // not deduplicated and each produces its own token exchange.
        let order = Order::from_request(request);

        info!(
            "created order {}: {} items, total={}",
            order.id,
            order.item_count(),
            order.total.display()
        );

        let token = fetch_payment_token(
            &self.client,
            &self.config,
            &order.id,
            &request.customer_email,
            order.total.as_decimal(),
        )
        .await?;

        let payload = build_payload(&self.config, request, &order, &token)?;
        let payment_data = serde_json::to_value(&payload)
            .map_err(|e| PaymentError::Internal(format!("failed to encode payment data: {e}")))?;

        info!("payment session ready for order {}", order.id);

        Ok(PaymentSession {
            order_id: order.id,
            payment_url: self.config.payment_url.clone(),
            payment_data,
            created_at: Utc::now(),
        })
    }

    fn gateway_name(&self) -> &'static str {
        "agilpay"
    }
}
