//! # pay-api
//!
//! HTTP API layer for storefront-pay-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - REST endpoints for payment creation, the gateway callback, and the
//!   product catalog
//! - User directory CRUD over SQLite
//! - Static serving of the front-end bundle

pub mod handlers;
pub mod routes;
pub mod state;
pub mod store;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
pub use store::{User, UserStore};
