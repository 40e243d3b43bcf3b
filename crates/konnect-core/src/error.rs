//! # Gateway Error Types
//!
//! Typed error handling for the Konnect client.
//! All gateway operations return `Result<T, KonnectError>`.

use std::fmt;
use thiserror::Error;

/// The gateway call an error originated from.
///
/// Only used to pick the generic failure message for statuses that have
/// no dedicated variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `POST /payments/init-payment`
    InitPayment,
    /// `GET /payments/{paymentId}`
    PaymentDetails,
}

impl Operation {
    /// Generic failure message for this operation
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::InitPayment => "Failed to initialize payment.",
            Operation::PaymentDetails => "Failed to get payment details.",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::InitPayment => f.write_str("init-payment"),
            Operation::PaymentDetails => f.write_str("payment-details"),
        }
    }
}

/// Core error type for all gateway operations
#[derive(Debug, Error)]
pub enum KonnectError {
    /// HTTP 401
    #[error("Unauthorized: The provided access token is invalid or expired.")]
    Unauthorized,

    /// HTTP 403
    #[error("Forbidden: You do not have permission to access this resource.")]
    Forbidden,

    /// HTTP 404
    #[error("Not Found: The requested resource could not be found.")]
    NotFound,

    /// HTTP 422, the gateway rejected the request parameters
    #[error("Unprocessable Entity: The request parameters are invalid.")]
    UnprocessableEntity,

    /// HTTP 502
    #[error("Bad Gateway: The server received an invalid response from an upstream server.")]
    BadGateway,

    /// Any other non-success status
    #[error("{} (HTTP {status})", .operation.failure_message())]
    RequestFailed { operation: Operation, status: u16 },

    /// Transport failure (DNS, connect, reading the body)
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// JSON encoding of the request or decoding of the response failed
    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    /// Missing or malformed client configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl KonnectError {
    /// Map an HTTP status to its dedicated error, if it has one.
    ///
    /// Returns `None` for every status without a dedicated variant, success
    /// statuses included; callers then apply their own success check.
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            401 => Some(KonnectError::Unauthorized),
            403 => Some(KonnectError::Forbidden),
            404 => Some(KonnectError::NotFound),
            422 => Some(KonnectError::UnprocessableEntity),
            502 => Some(KonnectError::BadGateway),
            _ => None,
        }
    }

    /// Classify a response status for `operation`.
    ///
    /// Dedicated statuses win over the generic non-success check.
    pub fn check_status(operation: Operation, status: u16) -> KonnectResult<()> {
        if let Some(err) = Self::from_status(status) {
            return Err(err);
        }
        if !(200..300).contains(&status) {
            return Err(KonnectError::RequestFailed { operation, status });
        }
        Ok(())
    }

    /// Returns the HTTP status this error was raised for, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            KonnectError::Unauthorized => Some(401),
            KonnectError::Forbidden => Some(403),
            KonnectError::NotFound => Some(404),
            KonnectError::UnprocessableEntity => Some(422),
            KonnectError::BadGateway => Some(502),
            KonnectError::RequestFailed { status, .. } => Some(*status),
            KonnectError::Transport(e) => e.status().map(|s| s.as_u16()),
            KonnectError::Decode(_) | KonnectError::Configuration(_) => None,
        }
    }

    /// Returns true if the gateway refused the credentials or the resource
    pub fn is_auth_error(&self) -> bool {
        matches!(self, KonnectError::Unauthorized | KonnectError::Forbidden)
    }
}

/// Result type alias for gateway operations
pub type KonnectResult<T> = Result<T, KonnectError>;
