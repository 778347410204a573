//! # Application State
//!
//! Shared state for the Axum application: the payment gateway, the fixed
//! product catalog, the user store, and the process configuration. All of
//! it is constructed once at startup and read-only afterwards.

use crate::store::UserStore;
use pay_agilpay::AgilpayGateway;
use pay_core::{BoxedPaymentGateway, ProductCatalog};
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// SQLite URL for the user directory
    pub database_url: String,
    /// Directory served as the front-end bundle
    pub static_dir: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://storefront-pay.db?mode=rwc".to_string()),
            static_dir: std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Hosted-page payment gateway
    pub gateway: BoxedPaymentGateway,
    /// Fixed product catalog
    pub catalog: ProductCatalog,
    /// User directory
    pub users: UserStore,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create the AppState with the Agilpay gateway and the SQLite store
    pub async fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let users = UserStore::connect(&config.database_url)
            .await
            .map_err(|e| anyhow::anyhow!("failed to open user store: {e}"))?;

        let gateway = Arc::new(AgilpayGateway::from_env()) as BoxedPaymentGateway;

        Ok(Self {
            gateway,
            catalog: ProductCatalog::fixed(),
            users,
            config,
        })
    }
}
