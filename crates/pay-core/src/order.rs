//! # Order Types
//!
//! Validated order requests and priced orders for storefront-pay.
//!
//! An [`OrderRequest`] is what the Cart Validator produces from a raw
//! request body. Pricing it yields an [`Order`]: a freshly identified,
//! normalized copy with per-line amounts and the aggregate total. Orders
//! live only for the duration of one HTTP call; nothing is persisted.

use crate::product::{Currency, Price};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default redirect targets when the storefront does not supply its own
pub const DEFAULT_SUCCESS_URL: &str = "https://example.com/success";
pub const DEFAULT_RETURN_URL: &str = "https://example.com/return";

/// A single cart line as submitted by the storefront
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    /// Display name
    pub name: String,

    /// Unit price
    pub unit_price: Price,

    /// Quantity (strictly positive)
    pub quantity: u32,
}

impl CartItem {
    pub fn new(name: impl Into<String>, unit_price: Price, quantity: u32) -> Self {
        Self {
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    /// Line total: unit price × quantity, in cents
    pub fn total(&self) -> Price {
        Price {
            amount: self.unit_price.amount * self.quantity as i64,
            currency: self.unit_price.currency,
        }
    }
}

/// A validated payment request from the storefront.
///
/// Construction goes through the cart validator; the fields hold the
/// invariants it enforced (non-empty strings, email-shaped address,
/// non-empty item list, positive prices and quantities).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Customer full name
    pub customer_name: String,

    /// Customer email; doubles as the gateway user id
    pub customer_email: String,

    /// Customer billing/shipping address
    pub customer_address: String,

    /// Cart lines (never empty)
    pub items: Vec<CartItem>,

    /// Redirect target after a successful payment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_url: Option<String>,

    /// Redirect target when the shopper returns without paying
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
}

impl OrderRequest {
    /// Success URL, falling back to the fixed placeholder
    pub fn success_url(&self) -> &str {
        self.success_url.as_deref().unwrap_or(DEFAULT_SUCCESS_URL)
    }

    /// Return URL, falling back to the fixed placeholder
    pub fn return_url(&self) -> &str {
        self.return_url.as_deref().unwrap_or(DEFAULT_RETURN_URL)
    }
}

/// A normalized order line with its computed amount
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    /// Line description (the cart item name)
    pub description: String,

    /// Quantity
    pub quantity: u32,

    /// Computed line amount (unit price × quantity)
    pub amount: Price,

    /// Tax on this line; no tax model exists, always zero
    pub tax: i64,
}

/// A priced order ready for the gateway.
///
/// The id is generated fresh for every request and never reused;
/// repeated submissions of the same cart produce distinct orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique order ID (generated)
    pub id: String,

    /// Normalized lines with computed amounts
    pub items: Vec<OrderItem>,

    /// Aggregate total: Σ(price × quantity)
    pub total: Price,

    /// Settlement currency
    pub currency: Currency,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Price a validated request into an order.
    ///
    /// Pure aside from id/timestamp generation; integer cents arithmetic
    /// keeps the total exact regardless of item order.
    pub fn from_request(request: &OrderRequest) -> Self {
        let currency = request
            .items
            .first()
            .map(|item| item.unit_price.currency)
            .unwrap_or_default();

        let items: Vec<OrderItem> = request
            .items
            .iter()
            .map(|item| OrderItem {
                description: item.name.clone(),
                quantity: item.quantity,
                amount: item.total(),
                tax: 0,
            })
            .collect();

        let total_amount: i64 = items.iter().map(|item| item.amount.amount).sum();

        Self {
            id: Uuid::new_v4().to_string(),
            items,
            total: Price::from_cents(total_amount, currency),
            currency,
            created_at: Utc::now(),
        }
    }

    /// Total item count across all lines
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}
