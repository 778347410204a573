//! # Routes
//!
//! Axum router configuration for the storefront payment API.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/agilpay/create-payment` | Create hosted-page payment |
//! | POST | `/api/agilpay/payment-response` | Gateway callback receiver |
//! | GET | `/api/agilpay/products` | Fixed product catalog |
//! | GET/POST | `/api/users` | List / create users |
//! | GET/PUT/DELETE | `/api/users/{id}` | Single-user operations |
//!
//! Anything else falls through to the static front-end bundle.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - allow all origins for now
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Payment routes
    let agilpay_routes = Router::new()
        .route("/create-payment", post(handlers::create_payment))
        .route("/payment-response", post(handlers::payment_response))
        .route("/products", get(handlers::list_products));

    // User directory routes
    let user_routes = Router::new()
        .route(
            "/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            "/users/{user_id}",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        );

    // Front-end bundle with index.html fallback
    let static_dir = &state.config.static_dir;
    let static_service = ServeDir::new(static_dir)
        .not_found_service(ServeFile::new(format!("{static_dir}/index.html")));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/agilpay", agilpay_routes)
        .nest("/api", user_routes)
        .fallback_service(static_service)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
