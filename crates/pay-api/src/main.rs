//! # Storefront-Pay RS
//!
//! Hosted-page payment backend for the storefront front-end.
//!
//! ## Usage
//!
//! ```bash
//! # Sandbox credentials apply when unset
//! export AGILPAY_CLIENT_ID=API-001
//! export AGILPAY_CLIENT_SECRET=...
//! export AGILPAY_MERCHANT_KEY=TEST-001
//!
//! # Run the server
//! storefront-pay
//! ```

use pay_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Print banner
    print_banner();

    // Initialize application state
    let state = AppState::new().await?;

    let addr = state.config.socket_addr();
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Products loaded: {}", state.catalog.len());
    info!("Payment gateway: {}", state.gateway.gateway_name());

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("🚀 Storefront-Pay starting on http://{}", addr);

    if !is_prod {
        info!("📝 Health: http://{}/health", addr);
        info!("💳 Payments: POST http://{}/api/agilpay/create-payment", addr);
        info!("🔔 Callback: POST http://{}/api/agilpay/payment-response", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  💳 Storefront-Pay RS 💳
  ━━━━━━━━━━━━━━━━━━━━━━━
  Hosted-page payment backend
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
