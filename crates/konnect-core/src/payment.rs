//! # Payment Types
//!
//! Request and response records exchanged with the Konnect gateway.
//! Field names follow the gateway's camelCase wire format. Nothing here is
//! validated locally; the gateway rejects bad parameters with HTTP 422.
//!
//! Responses wrap the decoded JSON as-is. Accessors read well-known fields
//! and return `None` when a field is absent or has another type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Currency the payer is charged in.
///
/// The receiver is always credited in TND; the gateway handles conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Token {
    #[default]
    TND,
    EUR,
    USD,
}

impl Token {
    /// Returns the wire code
    pub fn as_str(&self) -> &'static str {
        match self {
            Token::TND => "TND",
            Token::EUR => "EUR",
            Token::USD => "USD",
        }
    }

    /// Decimal places of the smallest unit (millimes for TND, cents otherwise)
    pub fn decimal_places(&self) -> u8 {
        match self {
            Token::TND => 3,
            Token::EUR | Token::USD => 2,
        }
    }

    /// Convert a decimal amount to the smallest unit the gateway expects.
    ///
    /// Returns `None` for negative, non-finite or out-of-range amounts.
    pub fn to_smallest_unit(&self, amount: f64) -> Option<u64> {
        let multiplier = 10_f64.powi(self.decimal_places() as i32);
        let units = (amount * multiplier).round();
        if !units.is_finite() || units < 0.0 || units >= u64::MAX as f64 {
            return None;
        }
        Some(units as u64)
    }
}

/// Whether a payment may be settled in several installments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    /// Paid all at once
    Immediate,
    /// May be paid partially
    Partial,
}

/// Payment methods offered on the hosted checkout page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "wallet")]
    Wallet,
    #[serde(rename = "bank_card")]
    BankCard,
    #[serde(rename = "e-DINAR")]
    EDinar,
    #[serde(rename = "flouci")]
    Flouci,
}

/// Checkout page theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

/// Parameters for `POST /payments/init-payment`.
///
/// `receiverWalletId` is deliberately absent: the client injects the wallet
/// it was configured with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitPaymentRequest {
    /// Amount in the smallest unit of `token` (millimes for TND)
    pub amount: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<Token>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<PaymentType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_payment_methods: Option<Vec<PaymentMethod>>,

    /// Minutes before the payment expires
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifespan: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout_form: Option<bool>,

    /// Ask the payer to cover the gateway fees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_payment_fees_to_amount: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Caller's own identifier for this order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    /// Called by the gateway as `GET <webhook>?payment_ref=<ref>` once paid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,

    /// Parameters not modelled above, sent as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InitPaymentRequest {
    /// Create a request for `amount` (smallest currency unit)
    pub fn new(amount: u64) -> Self {
        Self {
            amount,
            ..Default::default()
        }
    }

    pub fn with_token(mut self, token: Token) -> Self {
        self.token = Some(token);
        self
    }

    pub fn with_payment_type(mut self, payment_type: PaymentType) -> Self {
        self.payment_type = Some(payment_type);
        self
    }

    pub fn with_accepted_payment_methods(
        mut self,
        methods: impl IntoIterator<Item = PaymentMethod>,
    ) -> Self {
        self.accepted_payment_methods = Some(methods.into_iter().collect());
        self
    }

    pub fn with_lifespan(mut self, minutes: u32) -> Self {
        self.lifespan = Some(minutes);
        self
    }

    pub fn with_checkout_form(mut self, enabled: bool) -> Self {
        self.checkout_form = Some(enabled);
        self
    }

    pub fn with_fees_on_payer(mut self, enabled: bool) -> Self {
        self.add_payment_fees_to_amount = Some(enabled);
        self
    }

    /// Prefill the payer's name
    pub fn with_payer(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = Some(last_name.into());
        self
    }

    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    pub fn with_webhook(mut self, url: impl Into<String>) -> Self {
        self.webhook = Some(url.into());
        self
    }

    pub fn with_success_url(mut self, url: impl Into<String>) -> Self {
        self.success_url = Some(url.into());
        self
    }

    pub fn with_fail_url(mut self, url: impl Into<String>) -> Self {
        self.fail_url = Some(url.into());
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Add a parameter this type does not model
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Body returned by `POST /payments/init-payment`, kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InitPaymentResponse(Value);

impl InitPaymentResponse {
    pub fn new(body: Value) -> Self {
        Self(body)
    }

    /// Hosted checkout page to redirect the payer to
    pub fn pay_url(&self) -> Option<&str> {
        self.0.get("payUrl").and_then(Value::as_str)
    }

    /// Gateway identifier of the created payment
    pub fn payment_ref(&self) -> Option<&str> {
        self.0.get("paymentRef").and_then(Value::as_str)
    }

    /// Any top-level field of the body
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

/// The `payment` object of the `{ "payment": ... }` envelope returned by
/// `GET /payments/{paymentId}`, kept verbatim.
///
/// Amounts are read as `f64` since the gateway types them as plain JSON
/// numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentDetails(Value);

impl PaymentDetails {
    pub fn new(payment: Value) -> Self {
        Self(payment)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    fn number_field(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(Value::as_f64)
    }

    pub fn id(&self) -> Option<&str> {
        self.str_field("id")
    }

    pub fn status(&self) -> Option<&str> {
        self.str_field("status")
    }

    /// `immediate` or `partial`
    pub fn payment_type(&self) -> Option<&str> {
        self.str_field("type")
    }

    pub fn token(&self) -> Option<&str> {
        self.str_field("token")
    }

    pub fn amount(&self) -> Option<f64> {
        self.number_field("amount")
    }

    pub fn amount_due(&self) -> Option<f64> {
        self.number_field("amountDue")
    }

    pub fn reached_amount(&self) -> Option<f64> {
        self.number_field("reachedAmount")
    }

    pub fn converted_amount(&self) -> Option<f64> {
        self.number_field("convertedAmount")
    }

    pub fn exchange_rate(&self) -> Option<f64> {
        self.number_field("exchangeRate")
    }

    pub fn order_id(&self) -> Option<&str> {
        self.str_field("orderId")
    }

    pub fn short_id(&self) -> Option<&str> {
        self.str_field("shortId")
    }

    pub fn link(&self) -> Option<&str> {
        self.str_field("link")
    }

    pub fn expiration_date(&self) -> Option<&str> {
        self.str_field("expirationDate")
    }

    /// Parse `expirationDate` when the gateway sent an RFC 3339 timestamp
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expiration_date()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Wallet credited by this payment
    pub fn receiver_wallet(&self) -> Option<&Value> {
        self.0.get("receiverWallet").filter(|v| !v.is_null())
    }

    /// Transfers attached to the payment; empty when absent or not a list
    pub fn transactions(&self) -> Vec<Transaction<'_>> {
        self.0
            .get("transactions")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(Transaction).collect())
            .unwrap_or_default()
    }

    /// Any field of the payment object
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

/// Borrowed view of one entry of a payment's `transactions`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transaction<'a>(&'a Value);

impl<'a> Transaction<'a> {
    fn str_field(&self, key: &str) -> Option<&'a str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn id(&self) -> Option<&'a str> {
        self.str_field("_id")
    }

    pub fn status(&self) -> Option<&'a str> {
        self.str_field("status")
    }

    pub fn transaction_type(&self) -> Option<&'a str> {
        self.str_field("type")
    }

    pub fn method(&self) -> Option<&'a str> {
        self.str_field("method")
    }

    pub fn token(&self) -> Option<&'a str> {
        self.str_field("token")
    }

    pub fn amount(&self) -> Option<f64> {
        self.0.get("amount").and_then(Value::as_f64)
    }

    /// Id of the payment this transaction belongs to
    pub fn payment(&self) -> Option<&'a str> {
        self.str_field("payment")
    }

    pub fn sender_wallet(&self) -> Option<&'a Value> {
        self.0.get("senderWallet").filter(|v| !v.is_null())
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.0.get(key)
    }

    pub fn as_value(&self) -> &'a Value {
        self.0
    }
}
