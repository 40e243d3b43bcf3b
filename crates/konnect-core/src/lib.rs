//! # konnect-core
//!
//! Core types and traits for the Konnect payment gateway client.
//!
//! This crate provides:
//! - `InitPaymentRequest` and the pass-through `InitPaymentResponse` / `PaymentDetails`
//! - `KonnectError` for typed, status-keyed error handling
//! - `PaymentGateway` trait implemented by the HTTP client
//!
//! ## Example
//!
//! ```rust,ignore
//! use konnect_core::{InitPaymentRequest, PaymentGateway, PaymentMethod, Token};
//!
//! let params = InitPaymentRequest::new(12_500)
//!     .with_token(Token::TND)
//!     .with_accepted_payment_methods([PaymentMethod::BankCard])
//!     .with_order_id("order-42");
//!
//! let link = gateway.initiate_payment(&params).await?;
//! // Redirect the payer to link.pay_url()
//! ```

pub mod error;
pub mod gateway;
pub mod payment;

// Re-exports for convenience
pub use error::{KonnectError, KonnectResult, Operation};
pub use gateway::{PaymentGateway, SharedPaymentGateway};
pub use payment::{
    InitPaymentRequest, InitPaymentResponse, PaymentDetails, PaymentMethod, PaymentType, Theme,
    Token, Transaction,
};
