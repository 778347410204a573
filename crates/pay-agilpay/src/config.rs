//! # Agilpay Configuration
//!
//! Configuration for the Agilpay gateway integration. Credentials and
//! endpoint URLs are read from the environment once at startup, with
//! documented sandbox defaults, and never mutated afterwards.

use std::env;

/// Sandbox defaults, used when the environment does not override them
const DEFAULT_CLIENT_ID: &str = "API-001";
const DEFAULT_CLIENT_SECRET: &str = "Dynapay";
const DEFAULT_MERCHANT_KEY: &str = "TEST-001";
const DEFAULT_TOKEN_URL: &str = "https://sandbox-webapi.agilpay.net/oauth/paymenttoken";
const DEFAULT_PAYMENT_URL: &str = "https://sandbox-webpay.agilpay.net/Payment";

/// Agilpay gateway configuration
#[derive(Debug, Clone)]
pub struct AgilpayConfig {
    /// OAuth client id; also the hosted page `SiteId`
    pub client_id: String,

    /// OAuth client secret
    pub client_secret: String,

    /// Merchant key carried inside the payment detail
    pub merchant_key: String,

    /// Token endpoint (OAuth client-credentials exchange)
    pub token_url: String,

    /// Hosted payment page the browser submits the payload to
    pub payment_url: String,
}

impl AgilpayConfig {
    /// Load configuration from environment variables.
    ///
    /// Recognized env vars, all optional (sandbox defaults apply):
    /// - `AGILPAY_CLIENT_ID`
    /// - `AGILPAY_CLIENT_SECRET`
    /// - `AGILPAY_MERCHANT_KEY`
    /// - `AGILPAY_TOKEN_URL`
    /// - `AGILPAY_PAYMENT_URL`
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self {
            client_id: env::var("AGILPAY_CLIENT_ID")
                .unwrap_or_else(|_| DEFAULT_CLIENT_ID.to_string()),
            client_secret: env::var("AGILPAY_CLIENT_SECRET")
                .unwrap_or_else(|_| DEFAULT_CLIENT_SECRET.to_string()),
            merchant_key: env::var("AGILPAY_MERCHANT_KEY")
                .unwrap_or_else(|_| DEFAULT_MERCHANT_KEY.to_string()),
            token_url: env::var("AGILPAY_TOKEN_URL")
                .unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string()),
            payment_url: env::var("AGILPAY_PAYMENT_URL")
                .unwrap_or_else(|_| DEFAULT_PAYMENT_URL.to_string()),
        }
    }

    /// Create config with explicit values (for testing)
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        merchant_key: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            merchant_key: merchant_key.into(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            payment_url: DEFAULT_PAYMENT_URL.to_string(),
        }
    }

    /// Check if pointed at the sandbox environment
    pub fn is_sandbox(&self) -> bool {
        self.token_url.contains("sandbox")
    }

    /// Builder: set custom token endpoint (for testing)
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Builder: set custom payment page URL (for testing)
    pub fn with_payment_url(mut self, url: impl Into<String>) -> Self {
        self.payment_url = url.into();
        self
    }
}

impl Default for AgilpayConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
