//! # pay-core
//!
//! Core types and traits for the storefront-pay payment engine.
//!
//! This crate provides:
//! - `OrderRequest`, `CartItem`, and `Order` for the cart-to-order flow
//! - `validate_order_request` for turning raw bodies into validated carts
//! - `Price` and `Currency` for exact integer-cents money arithmetic
//! - `ProductCatalog` for the fixed storefront catalog
//! - `PaymentGateway` trait for hosted-page gateway integrations
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{validate_order_request, Order};
//!
//! // Validate the raw request body
//! let request = validate_order_request(&body)?;
//!
//! // Price the cart into an order with a fresh id
//! let order = Order::from_request(&request);
//!
//! // Hand the request to a gateway implementation
//! let session = gateway.create_payment(&request).await?;
//! ```

pub mod error;
pub mod gateway;
pub mod order;
pub mod product;
pub mod validate;

// Re-exports for convenience
pub use error::{AuthError, PaymentError, PaymentResult, ValidationError};
pub use gateway::{BoxedPaymentGateway, PaymentGateway, PaymentSession};
pub use order::{CartItem, Order, OrderItem, OrderRequest, DEFAULT_RETURN_URL, DEFAULT_SUCCESS_URL};
pub use product::{Currency, Price, Product, ProductCatalog};
pub use validate::{is_valid_email, validate_order_request};
