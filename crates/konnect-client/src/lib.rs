//! # konnect-client
//!
//! Client for the Konnect payment gateway.
//!
//! Two calls are exposed:
//!
//! 1. **initiate_payment** - `POST /payments/init-payment`
//!    - Creates a payment credited to the configured receiver wallet
//!    - Returns the hosted checkout URL and the payment reference
//!
//! 2. **payment_details** - `GET /payments/{paymentId}`
//!    - Returns the payment with its wallets and transactions
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use konnect_client::{KonnectClient, KonnectConfig};
//! use konnect_core::{InitPaymentRequest, Token};
//!
//! let client = KonnectClient::new(
//!     KonnectConfig::new(api_key, wallet_id).development(true),
//! );
//!
//! let link = client
//!     .initiate_payment(&InitPaymentRequest::new(10_000).with_token(Token::TND))
//!     .await?;
//!
//! // Redirect the payer to link.pay_url(), then later:
//! let payment = client.payment_details(link.payment_ref().unwrap_or_default()).await?;
//! ```
//!
//! ## Errors
//!
//! Statuses 401, 403, 404, 422 and 502 map to dedicated `KonnectError`
//! variants for both calls; any other non-success status yields
//! `KonnectError::RequestFailed`. Transport and JSON failures are passed
//! through unchanged.

pub mod client;
pub mod config;

// Re-exports
pub use client::KonnectClient;
pub use config::{Environment, KonnectConfig, PREPRODUCTION_BASE_URL, PRODUCTION_BASE_URL};
