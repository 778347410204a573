//! # Cart Validation
//!
//! Turns a raw request body into a validated [`OrderRequest`] or a list of
//! human-readable field errors.
//!
//! Checks run in stages. A stage that fails short-circuits the later ones
//! (there is no point type-checking items inside a body that is not an
//! object), but every error *within* a stage is collected, so a request
//! missing three fields hears about all three at once.

use crate::error::ValidationError;
use crate::order::{CartItem, OrderRequest};
use crate::product::{Currency, Price};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Required top-level string fields of a payment request
const REQUIRED_STRING_FIELDS: [&str; 3] = ["customer_name", "customer_email", "customer_address"];

/// local-part@domain.tld with a TLD of at least two letters
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

/// Check a string against the standard email shape
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Validate a raw JSON body into an [`OrderRequest`].
///
/// Pure: no side effects, no IO. On failure, returns every collected
/// [`ValidationError`] so the caller can report them together.
pub fn validate_order_request(body: &Value) -> Result<OrderRequest, Vec<ValidationError>> {
    let Some(object) = body.as_object() else {
        return Err(vec![ValidationError::new(
            "body",
            "request body must be a JSON object",
        )]);
    };

    // Stage: required top-level fields, all missing ones reported together
    let mut errors: Vec<ValidationError> = Vec::new();
    for field in REQUIRED_STRING_FIELDS {
        match object.get(field) {
            None | Some(Value::Null) => {
                errors.push(ValidationError::new(field, "is required"));
            }
            Some(Value::String(s)) if s.trim().is_empty() => {
                errors.push(ValidationError::new(field, "is required"));
            }
            Some(Value::String(_)) => {}
            Some(_) => {
                errors.push(ValidationError::new(field, "must be a string"));
            }
        }
    }
    if matches!(object.get("items"), None | Some(Value::Null)) {
        errors.push(ValidationError::new("items", "is required"));
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    // Stage: items must be a non-empty ordered list
    let raw_items = match object.get("items") {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => {
            return Err(vec![ValidationError::new(
                "items",
                "must be a non-empty list",
            )]);
        }
    };

    // Stage: per-item checks plus email shape, collected together.
    // Item indices are 1-based in user-facing messages.
    let mut items: Vec<CartItem> = Vec::with_capacity(raw_items.len());
    for (idx, raw) in raw_items.iter().enumerate() {
        let field = format!("items[{}]", idx + 1);

        let Some(item) = raw.as_object() else {
            errors.push(ValidationError::new(field, "must be an object"));
            continue;
        };

        let missing: Vec<&str> = ["name", "price", "quantity"]
            .into_iter()
            .filter(|key| matches!(item.get(*key), None | Some(Value::Null)))
            .collect();
        if !missing.is_empty() {
            errors.push(ValidationError::new(
                field,
                format!("is missing fields: {}", missing.join(", ")),
            ));
            continue;
        }

        let name = match item.get("name").and_then(Value::as_str) {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                errors.push(ValidationError::new(
                    field.clone(),
                    "name must be a non-empty string",
                ));
                continue;
            }
        };

        let price = parse_positive_price(&item["price"]);
        let quantity = parse_positive_quantity(&item["quantity"]);

        match (price, quantity) {
            (Some(price), Some(quantity)) => {
                items.push(CartItem::new(
                    name,
                    Price::new(price, Currency::USD),
                    quantity,
                ));
            }
            (price, quantity) => {
                if price.is_none() {
                    errors.push(ValidationError::new(
                        field.clone(),
                        "price must be a positive number",
                    ));
                }
                if quantity.is_none() {
                    errors.push(ValidationError::new(
                        field.clone(),
                        "quantity must be a positive integer",
                    ));
                }
            }
        }
    }

    let customer_email = string_field(object, "customer_email");
    if !is_valid_email(&customer_email) {
        errors.push(ValidationError::new(
            "customer_email",
            "must be a valid email address",
        ));
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(OrderRequest {
        customer_name: string_field(object, "customer_name"),
        customer_email,
        customer_address: string_field(object, "customer_address"),
        items,
        success_url: optional_url(object, "success_url"),
        return_url: optional_url(object, "return_url"),
    })
}

fn string_field(object: &serde_json::Map<String, Value>, key: &str) -> String {
    object
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn optional_url(object: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(String::from)
}

/// Accepts a JSON number or numeric string; must be finite and > 0
fn parse_positive_price(value: &Value) -> Option<f64> {
    let price = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (price.is_finite() && price > 0.0).then_some(price)
}

/// Accepts a JSON integer or integer string; must be >= 1
fn parse_positive_quantity(value: &Value) -> Option<u32> {
    let quantity = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }?;
    (1..=u32::MAX as u64)
        .contains(&quantity)
        .then_some(quantity as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_body() -> Value {
        json!({
            "customer_name": "Juan Pérez",
            "customer_email": "juan@example.com",
            "customer_address": "Calle 123",
            "items": [
                {"name": "X", "price": 10.00, "quantity": 2}
            ]
        })
    }

    #[test]
    fn test_valid_request_passes() {
        let request = validate_order_request(&valid_body()).unwrap();
        assert_eq!(request.customer_name, "Juan Pérez");
        assert_eq!(request.items.len(), 1);
        assert_eq!(request.items[0].unit_price.amount, 1000);
        assert_eq!(request.items[0].quantity, 2);
    }

    #[test]
    fn test_non_object_body_rejected() {
        let errors = validate_order_request(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "body");
    }

    #[test]
    fn test_missing_fields_reported_together() {
        let body = json!({"customer_name": "Juan Pérez"});
        let errors = validate_order_request(&body).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["customer_email", "customer_address", "items"]
        );
        assert!(errors.iter().all(|e| e.message == "is required"));
    }

    #[test]
    fn test_each_required_field_independently() {
        for field in ["customer_name", "customer_email", "customer_address", "items"] {
            let mut body = valid_body();
            body.as_object_mut().unwrap().remove(field);
            let errors = validate_order_request(&body).unwrap_err();
            assert!(
                errors.iter().any(|e| e.field == field),
                "missing {field} not reported"
            );
        }
    }

    #[test]
    fn test_non_string_customer_field_rejected() {
        let mut body = valid_body();
        body["customer_name"] = json!(42);
        let errors = validate_order_request(&body).unwrap_err();
        assert_eq!(errors[0].field, "customer_name");
        assert_eq!(errors[0].message, "must be a string");
    }

    #[test]
    fn test_empty_items_rejected() {
        let mut body = valid_body();
        body["items"] = json!([]);
        let errors = validate_order_request(&body).unwrap_err();
        assert_eq!(errors[0].field, "items");
        assert_eq!(errors[0].message, "must be a non-empty list");
    }

    #[test]
    fn test_items_must_be_a_list() {
        let mut body = valid_body();
        body["items"] = json!("not a list");
        let errors = validate_order_request(&body).unwrap_err();
        assert_eq!(errors[0].message, "must be a non-empty list");
    }

    #[test]
    fn test_bad_price_and_quantity_cite_one_based_index() {
        let mut body = valid_body();
        body["items"] = json!([
            {"name": "ok", "price": 5.0, "quantity": 1},
            {"name": "bad", "price": -1, "quantity": 0}
        ]);
        let errors = validate_order_request(&body).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.field == "items[2]"));
        assert!(errors.iter().any(|e| e.message.contains("price")));
        assert!(errors.iter().any(|e| e.message.contains("quantity")));
    }

    #[test]
    fn test_fractional_quantity_rejected() {
        let mut body = valid_body();
        body["items"][0]["quantity"] = json!(2.5);
        let errors = validate_order_request(&body).unwrap_err();
        assert_eq!(errors[0].field, "items[1]");
        assert!(errors[0].message.contains("quantity"));
    }

    #[test]
    fn test_numeric_strings_accepted() {
        let mut body = valid_body();
        body["items"][0]["price"] = json!("10.00");
        body["items"][0]["quantity"] = json!("2");
        let request = validate_order_request(&body).unwrap();
        assert_eq!(request.items[0].unit_price.amount, 1000);
        assert_eq!(request.items[0].quantity, 2);
    }

    #[test]
    fn test_item_missing_fields_reported() {
        let mut body = valid_body();
        body["items"] = json!([{"name": "X"}]);
        let errors = validate_order_request(&body).unwrap_err();
        assert_eq!(errors[0].field, "items[1]");
        assert!(errors[0].message.contains("price"));
        assert!(errors[0].message.contains("quantity"));
    }

    #[test]
    fn test_invalid_email_rejected() {
        for bad in ["juan", "juan@", "juan@example", "juan@example.c", "@example.com"] {
            let mut body = valid_body();
            body["customer_email"] = json!(bad);
            let errors = validate_order_request(&body).unwrap_err();
            assert!(
                errors.iter().any(|e| e.field == "customer_email"),
                "{bad} accepted"
            );
        }
    }

    #[test]
    fn test_item_errors_and_email_error_collected_together() {
        let mut body = valid_body();
        body["customer_email"] = json!("not-an-email");
        body["items"][0]["price"] = json!(0);
        let errors = validate_order_request(&body).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_optional_urls_pass_through() {
        let mut body = valid_body();
        body["success_url"] = json!("https://store.example/ok");
        let request = validate_order_request(&body).unwrap();
        assert_eq!(
            request.success_url.as_deref(),
            Some("https://store.example/ok")
        );
        assert!(request.return_url.is_none());
    }
}
