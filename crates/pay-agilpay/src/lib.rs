//! # pay-agilpay
//!
//! Agilpay hosted-page gateway integration for storefront-pay-rs.
//!
//! The flow has three stages, run in strict sequence by
//! [`AgilpayGateway`]:
//!
//! 1. Price the validated cart into an order with a fresh id.
//! 2. Exchange client credentials for an order-scoped payment token
//!    (OAuth client-credentials grant, 30 s budget, no retry).
//! 3. Assemble the exact field set the hosted payment page expects;
//!    the browser submits those fields, this service never does.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_agilpay::AgilpayGateway;
//! use pay_core::PaymentGateway;
//!
//! // Sandbox credentials apply when the environment sets none
//! let gateway = AgilpayGateway::from_env();
//!
//! let session = gateway.create_payment(&order_request).await?;
//! // session.payment_url + session.payment_data go back to the browser
//! ```

pub mod checkout;
pub mod config;
pub mod payload;
pub mod token;

// Re-exports
pub use checkout::AgilpayGateway;
pub use config::AgilpayConfig;
pub use payload::{
    build_payload, DetailItem, PaymentDetail, PaymentPayload, IFRAME_PRESENTATION, MERCHANT_NAME,
};
pub use token::fetch_payment_token;
