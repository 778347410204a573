//! # Payment Gateway Trait
//!
//! Seam between the HTTP layer and the hosted-page gateway integration.
//! The API layer depends only on this trait, so handlers can be exercised
//! with a stub gateway and the real integration can be swapped without
//! touching client code.

use crate::error::PaymentResult;
use crate::order::OrderRequest;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Result of orchestrating one payment creation.
///
/// `payment_data` is the gateway-specific form field set the browser
/// submits to `payment_url`; this subsystem never calls `payment_url`
/// itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSession {
    /// Freshly generated order id, never reused
    pub order_id: String,

    /// Hosted payment page the browser posts the fields to
    pub payment_url: String,

    /// Gateway form fields, serialized as a JSON object
    pub payment_data: serde_json::Value,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

/// Core trait for hosted-page payment gateways.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Run the full payment pipeline for a validated request:
    /// price the cart, exchange credentials for an order-scoped token,
    /// and assemble the hosted-page payload.
    async fn create_payment(&self, request: &OrderRequest) -> PaymentResult<PaymentSession>;

    /// Gateway name (for logging)
    fn gateway_name(&self) -> &'static str;
}

/// Type alias for a shared gateway (dynamic dispatch)
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;
