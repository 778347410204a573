//! # Hosted-Page Payload
//!
//! The exact field set Agilpay's hosted payment page expects, and the
//! deterministic transform that assembles it from a validated request,
//! a priced order, and a payment token.

use crate::config::AgilpayConfig;
use pay_core::{Order, OrderRequest, PaymentError, PaymentResult};
use serde::{Deserialize, Serialize};

/// Merchant display name on the hosted page
pub const MERCHANT_NAME: &str = "Webflow Store";

/// `NoHeader` flag selecting embedded (iframe) presentation
pub const IFRAME_PRESENTATION: &str = "2";

/// One line inside the payment detail
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DetailItem {
    pub description: String,

    /// Stringified quantity, as the gateway expects
    pub quantity: String,

    /// Line amount as a decimal number
    pub amount: f64,

    /// Always zero; no tax model exists
    pub tax: i64,
}

/// The merchant-scoped payment detail carried inside `Detail`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PaymentDetail {
    pub merchant_key: String,

    /// The order id, doubling as the gateway service reference
    pub service: String,

    pub merchant_name: String,

    pub description: String,

    /// Order total as a decimal number
    pub amount: f64,

    /// Always zero; no tax model exists
    pub tax: i64,

    /// ISO 4217 numeric code ("840" = USD)
    pub currency: String,

    pub items: Vec<DetailItem>,
}

/// Envelope the gateway expects inside the serialized `Detail` string
#[derive(Debug, Serialize, Deserialize)]
struct DetailEnvelope {
    #[serde(rename = "Payments")]
    payments: Vec<PaymentDetail>,
}

/// The full form field set the browser submits to the hosted page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PaymentPayload {
    /// Configured OAuth client id
    pub site_id: String,

    /// Customer email, reused as the gateway user id
    pub user_id: String,

    pub names: String,

    pub email: String,

    pub address: String,

    /// [`PaymentDetail`] envelope serialized to a JSON string
    pub detail: String,

    #[serde(rename = "SuccessURL")]
    pub success_url: String,

    #[serde(rename = "ReturnURL")]
    pub return_url: String,

    #[serde(rename = "token")]
    pub token: String,

    pub no_header: String,
}

/// Assemble the hosted-page payload. Deterministic: same inputs, same
/// payload; the only failure path is JSON encoding of the detail, which
/// cannot happen for these types.
pub fn build_payload(
    config: &AgilpayConfig,
    request: &OrderRequest,
    order: &Order,
    token: &str,
) -> PaymentResult<PaymentPayload> {
    let items = order
        .items
        .iter()
        .map(|item| DetailItem {
            description: item.description.clone(),
            quantity: item.quantity.to_string(),
            amount: item.amount.as_decimal(),
            tax: item.tax,
        })
        .collect();

    let detail = PaymentDetail {
        merchant_key: config.merchant_key.clone(),
        service: order.id.clone(),
        merchant_name: MERCHANT_NAME.to_string(),
        description: format!("Orden {}", order.id),
        amount: order.total.as_decimal(),
        tax: 0,
        currency: order.currency.iso_numeric().to_string(),
        items,
    };

    let detail_json = serde_json::to_string(&DetailEnvelope {
        payments: vec![detail],
    })
    .map_err(|e| PaymentError::Internal(format!("failed to encode payment detail: {e}")))?;

    Ok(PaymentPayload {
        site_id: config.client_id.clone(),
        user_id: request.customer_email.clone(),
        names: request.customer_name.clone(),
        email: request.customer_email.clone(),
        address: request.customer_address.clone(),
        detail: detail_json,
        success_url: request.success_url().to_string(),
        return_url: request.return_url().to_string(),
        token: token.to_string(),
        no_header: IFRAME_PRESENTATION.to_string(),
    })
}
