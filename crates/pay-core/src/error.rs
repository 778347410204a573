//! # Payment Error Types
//!
//! Typed error handling for the storefront-pay payment engine.
//! All payment operations return `Result<T, PaymentError>`.

use thiserror::Error;

/// A single field-level validation failure.
///
/// `field` is either a top-level field name (`customer_email`) or a
/// 1-based item reference (`items[2]`) so the caller can point the user
/// at the offending entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Why a token exchange with the gateway failed.
///
/// The reasons are distinct for logging; callers map all of them to a
/// single generic user-visible outcome.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Transport-level failure reaching the token endpoint
    #[error("network error: {0}")]
    Network(String),

    /// The 30 second call budget expired
    #[error("token request timed out")]
    Timeout,

    /// Token endpoint answered with a non-200 status
    #[error("token endpoint returned status {0}")]
    Status(u16),

    /// Response body did not parse as JSON
    #[error("malformed token response: {0}")]
    Malformed(String),

    /// Response parsed but carried no `access_token`
    #[error("access_token missing from response")]
    MissingToken,
}

/// Core error type for all payment operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// User input malformed; carries every collected field error
    #[error("invalid order request")]
    Validation(Vec<ValidationError>),

    /// Token exchange with the gateway failed. The display message is
    /// deliberately generic; the underlying reason is logged, not surfaced.
    #[error("could not obtain authentication token")]
    Auth(#[source] AuthError),

    /// Unique-constraint violation in the user directory
    #[error("{0}")]
    Conflict(String),

    /// Requested resource does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// Anything unanticipated (should not happen)
    #[error("internal error: {0}")]
    Internal(String),
}

impl PaymentError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::Validation(_) => 400,
            PaymentError::Auth(_) => 500,
            PaymentError::Conflict(_) => 409,
            PaymentError::NotFound(_) => 404,
            PaymentError::Internal(_) => 500,
        }
    }

    /// Field-level details for validation failures, empty otherwise
    pub fn details(&self) -> Vec<String> {
        match self {
            PaymentError::Validation(errors) => errors.iter().map(|e| e.to_string()).collect(),
            _ => Vec::new(),
        }
    }
}

impl From<AuthError> for PaymentError {
    fn from(err: AuthError) -> Self {
        PaymentError::Auth(err)
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let validation = PaymentError::Validation(vec![ValidationError::new(
            "customer_name",
            "is required",
        )]);
        assert_eq!(validation.status_code(), 400);
        assert_eq!(PaymentError::Auth(AuthError::Timeout).status_code(), 500);
        assert_eq!(
            PaymentError::Conflict("username or email already exists".into()).status_code(),
            409
        );
        assert_eq!(PaymentError::NotFound("user".into()).status_code(), 404);
        assert_eq!(PaymentError::Internal("boom".into()).status_code(), 500);
    }

    #[test]
    fn test_auth_error_message_is_generic() {
        // The gateway reason must never leak into the display message.
        let err = PaymentError::Auth(AuthError::Status(503));
        assert_eq!(err.to_string(), "could not obtain authentication token");
    }

    #[test]
    fn test_validation_details() {
        let err = PaymentError::Validation(vec![
            ValidationError::new("customer_email", "must be a valid email address"),
            ValidationError::new("items[1]", "price must be a positive number"),
        ]);
        let details = err.details();
        assert_eq!(details.len(), 2);
        assert!(details[1].contains("items[1]"));
    }
}
