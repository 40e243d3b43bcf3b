//! # Payment Gateway Trait
//!
//! The seam between callers and the Konnect HTTP client. Depend on
//! `PaymentGateway` rather than the concrete client to swap in a fake.

use crate::error::KonnectResult;
use crate::payment::{InitPaymentRequest, InitPaymentResponse, PaymentDetails};
use async_trait::async_trait;
use std::sync::Arc;

/// Operations offered by the payment gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a payment and return the hosted checkout link.
    ///
    /// # Arguments
    /// * `params` - Payment parameters; the receiver wallet comes from the
    ///   gateway's own configuration
    async fn initiate_payment(&self, params: &InitPaymentRequest)
        -> KonnectResult<InitPaymentResponse>;

    /// Look up a payment by the reference returned from `initiate_payment`.
    async fn payment_details(&self, payment_id: &str) -> KonnectResult<PaymentDetails>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared gateway (dynamic dispatch)
pub type SharedPaymentGateway = Arc<dyn PaymentGateway>;
