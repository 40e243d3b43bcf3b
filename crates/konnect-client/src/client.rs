//! # Konnect Client
//!
//! HTTP client for the Konnect payments API. Each call sends exactly one
//! request, maps well-known failure statuses to `KonnectError` and relays the
//! gateway's body otherwise. No retries, no caching, no client-side timeout.

use crate::config::KonnectConfig;
use async_trait::async_trait;
use konnect_core::{
    InitPaymentRequest, InitPaymentResponse, KonnectError, KonnectResult, Operation,
    PaymentDetails, PaymentGateway,
};
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::{debug, error, info, instrument};

/// Client for a single receiver wallet.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct KonnectClient {
    config: KonnectConfig,
    client: Client,
}

impl KonnectClient {
    /// Create a new client. Performs no I/O.
    pub fn new(config: KonnectConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> KonnectResult<Self> {
        let config = KonnectConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Use a caller-built transport (proxies, timeouts, TLS roots)
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn config(&self) -> &KonnectConfig {
        &self.config
    }

    /// Base URL all calls are made against
    pub fn endpoint(&self) -> &str {
        self.config.endpoint()
    }

    /// Request body for init-payment: the caller's params with the configured
    /// wallet written over any `receiverWalletId` they carry.
    fn init_payment_body(&self, params: &InitPaymentRequest) -> KonnectResult<Value> {
        let mut body = serde_json::to_value(params)?;
        if let Value::Object(fields) = &mut body {
            fields.insert(
                "receiverWalletId".to_string(),
                Value::String(self.config.receiver_wallet_id.clone()),
            );
        }
        Ok(body)
    }

    /// Create a payment and return its hosted checkout link.
    #[instrument(skip(self, params), fields(amount = params.amount, order_id = ?params.order_id))]
    pub async fn initiate_payment(
        &self,
        params: &InitPaymentRequest,
    ) -> KonnectResult<InitPaymentResponse> {
        let url = format!("{}/payments/init-payment", self.endpoint());
        let body = self.init_payment_body(params)?;

        debug!("Initiating Konnect payment: url={}", url);

        let response = self
            .client
            .post(&url)
            .header("Accept", "*/*")
            .header("Content-Type", "application/json")
            .header("x-api-key", &self.config.access_token)
            .body(body.to_string())
            .send()
            .await?;

        let body = read_body(Operation::InitPayment, response).await?;
        let init = InitPaymentResponse::new(serde_json::from_str(&body)?);

        info!(
            "Created Konnect payment: ref={:?}, url={:?}",
            init.payment_ref(),
            init.pay_url()
        );

        Ok(init)
    }

    /// Fetch a payment by id, unwrapped from its `{ "payment": ... }` envelope.
    ///
    /// Sibling fields of `payment` are dropped. A body without `payment`
    /// yields details wrapping `null`.
    ///
    /// Sent without the API key or content headers that
    /// [`initiate_payment`](Self::initiate_payment) attaches. Whether the
    /// gateway requires authentication for this lookup is unconfirmed, so
    /// none is sent.
    #[instrument(skip(self))]
    pub async fn payment_details(&self, payment_id: &str) -> KonnectResult<PaymentDetails> {
        let url = format!("{}/payments/{}", self.endpoint(), payment_id);

        debug!("Fetching Konnect payment details: url={}", url);

        let response = self.client.get(&url).send().await?;

        let body = read_body(Operation::PaymentDetails, response).await?;
        let payment = unwrap_envelope(serde_json::from_str(&body)?);

        debug!(
            "Fetched Konnect payment: id={:?}, status={:?}",
            payment.id(),
            payment.status()
        );

        Ok(payment)
    }
}

#[async_trait]
impl PaymentGateway for KonnectClient {
    async fn initiate_payment(
        &self,
        params: &InitPaymentRequest,
    ) -> KonnectResult<InitPaymentResponse> {
        KonnectClient::initiate_payment(self, params).await
    }

    async fn payment_details(&self, payment_id: &str) -> KonnectResult<PaymentDetails> {
        KonnectClient::payment_details(self, payment_id).await
    }

    fn provider_name(&self) -> &'static str {
        "konnect"
    }
}

/// Classify the status, then read the body.
///
/// The status is checked first so an error status never surfaces as a
/// decode failure, whatever its body.
async fn read_body(operation: Operation, response: Response) -> KonnectResult<String> {
    let status = response.status().as_u16();

    if let Err(err) = KonnectError::check_status(operation, status) {
        error!("Konnect API error: operation={}, status={}", operation, status);
        return Err(err);
    }

    Ok(response.text().await?)
}

fn unwrap_envelope(body: Value) -> PaymentDetails {
    let payment = match body {
        Value::Object(mut fields) => fields.remove("payment").unwrap_or(Value::Null),
        _ => Value::Null,
    };
    PaymentDetails::new(payment)
}
