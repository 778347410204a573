//! # Money & Product Types
//!
//! Price arithmetic and the static product catalog for storefront-pay.
//! Amounts are held in the smallest currency unit so order totals never
//! accumulate floating-point drift; decimal conversion happens only at
//! the wire/display edge.

use serde::{Deserialize, Serialize, Serializer};

/// Supported settlement currency (ISO 4217).
///
/// The hosted-page gateway settles in USD only; the numeric code is what
/// goes on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    USD,
}

impl Currency {
    /// Returns the ISO 4217 alphabetic code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::USD => "usd",
        }
    }

    /// Returns the ISO 4217 numeric code used by the gateway
    pub fn iso_numeric(&self) -> &'static str {
        match self {
            Currency::USD => "840",
        }
    }

    /// Returns the number of decimal places for this currency
    pub fn decimal_places(&self) -> u8 {
        match self {
            Currency::USD => 2,
        }
    }

    /// Convert a decimal amount to the smallest currency unit (cents)
    pub fn to_smallest_unit(&self, amount: f64) -> i64 {
        let multiplier = 10_f64.powi(self.decimal_places() as i32);
        (amount * multiplier).round() as i64
    }

    /// Convert from smallest unit back to decimal
    pub fn from_smallest_unit(&self, amount: i64) -> f64 {
        let divisor = 10_f64.powi(self.decimal_places() as i32);
        amount as f64 / divisor
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// Price with amount in smallest currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in smallest currency unit (cents for USD)
    pub amount: i64,
    /// Currency
    pub currency: Currency,
}

impl Price {
    /// Create a new price from a decimal amount
    pub fn new(amount: f64, currency: Currency) -> Self {
        Self {
            amount: currency.to_smallest_unit(amount),
            currency,
        }
    }

    /// Create a price from the smallest unit (cents)
    pub fn from_cents(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Get the decimal amount
    pub fn as_decimal(&self) -> f64 {
        self.currency.from_smallest_unit(self.amount)
    }

    /// Format for display (e.g., "$10.00")
    pub fn display(&self) -> String {
        format!("${:.2}", self.as_decimal())
    }
}

/// Serialize a `Price` as its decimal value, for API payloads that carry
/// plain numbers (`"price": 99.99`) rather than cents.
pub fn serialize_as_decimal<S>(price: &Price, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(price.as_decimal())
}

/// A product in the storefront catalog
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    /// Catalog identifier
    pub id: u32,

    /// Display name
    pub name: String,

    /// Short description
    pub description: String,

    /// Price, exposed as a decimal number
    #[serde(serialize_with = "serialize_as_decimal")]
    pub price: Price,

    /// Product image URL
    pub image: String,
}

impl Product {
    fn new(id: u32, name: &str, description: &str, price: f64, image: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            description: description.to_string(),
            price: Price::new(price, Currency::USD),
            image: image.to_string(),
        }
    }
}

/// The storefront product catalog.
///
/// Read-only and fixed at startup: the front-end renders these five items
/// and submits whatever cart the shopper assembles from them.
#[derive(Debug, Clone)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    /// The fixed five-item catalog served by `GET /products`
    pub fn fixed() -> Self {
        Self {
            products: vec![
                Product::new(
                    1,
                    "Premium Product A",
                    "Detailed description of premium product A",
                    99.99,
                    "https://via.placeholder.com/300x200?text=Product+A",
                ),
                Product::new(
                    2,
                    "Standard Product B",
                    "Detailed description of standard product B",
                    59.99,
                    "https://via.placeholder.com/300x200?text=Product+B",
                ),
                Product::new(
                    3,
                    "Basic Product C",
                    "Detailed description of basic product C",
                    29.99,
                    "https://via.placeholder.com/300x200?text=Product+C",
                ),
                Product::new(
                    4,
                    "Deluxe Product D",
                    "Detailed description of deluxe product D",
                    149.99,
                    "https://via.placeholder.com/300x200?text=Product+D",
                ),
                Product::new(
                    5,
                    "Special Product E",
                    "Detailed description of special product E",
                    79.99,
                    "https://via.placeholder.com/300x200?text=Product+E",
                ),
            ],
        }
    }

    /// Find a product by ID
    pub fn get(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// All products, in catalog order
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Get number of products
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self::fixed()
    }
}
