//! # Konnect Configuration
//!
//! Credentials and endpoint selection for the Konnect client.
//! Secrets can be loaded from environment variables.

use konnect_core::KonnectError;
use std::env;

/// Production API base URL
pub const PRODUCTION_BASE_URL: &str = "https://api.konnect.network/api/v2";

/// Pre-production (sandbox) API base URL
pub const PREPRODUCTION_BASE_URL: &str = "https://api.preprod.konnect.network/api/v2";

/// Which Konnect deployment the client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Production,
    PreProduction,
}

impl Environment {
    /// Base URL of this deployment
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_BASE_URL,
            Environment::PreProduction => PREPRODUCTION_BASE_URL,
        }
    }
}

/// Konnect API configuration
#[derive(Clone)]
pub struct KonnectConfig {
    /// API key sent as `x-api-key`
    pub access_token: String,

    /// Wallet credited by every payment this client creates
    pub receiver_wallet_id: String,

    pub environment: Environment,

    /// Overrides the environment's base URL (for testing/mocking)
    pub api_base_url: Option<String>,
}

impl KonnectConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `KONNECT_API_KEY`
    /// - `KONNECT_WALLET_ID`
    ///
    /// Optional:
    /// - `KONNECT_DEVELOPMENT` (`true`, `1` or `yes` selects pre-production)
    pub fn from_env() -> Result<Self, KonnectError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let access_token = env::var("KONNECT_API_KEY")
            .map_err(|_| KonnectError::Configuration("KONNECT_API_KEY not set".to_string()))?;

        let receiver_wallet_id = env::var("KONNECT_WALLET_ID")
            .map_err(|_| KonnectError::Configuration("KONNECT_WALLET_ID not set".to_string()))?;

        if access_token.trim().is_empty() {
            return Err(KonnectError::Configuration(
                "KONNECT_API_KEY must not be empty".to_string(),
            ));
        }

        if receiver_wallet_id.trim().is_empty() {
            return Err(KonnectError::Configuration(
                "KONNECT_WALLET_ID must not be empty".to_string(),
            ));
        }

        let development = match env::var("KONNECT_DEVELOPMENT") {
            Ok(value) => parse_flag(&value).ok_or_else(|| {
                KonnectError::Configuration(format!(
                    "KONNECT_DEVELOPMENT must be a boolean, got {value:?}"
                ))
            })?,
            Err(_) => false,
        };

        Ok(Self::new(access_token, receiver_wallet_id).development(development))
    }

    /// Create config for the production environment
    pub fn new(access_token: impl Into<String>, receiver_wallet_id: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            receiver_wallet_id: receiver_wallet_id.into(),
            environment: Environment::Production,
            api_base_url: None,
        }
    }

    /// Builder: `true` targets the pre-production API
    pub fn development(self, enabled: bool) -> Self {
        let environment = if enabled {
            Environment::PreProduction
        } else {
            Environment::Production
        };
        self.with_environment(environment)
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Base URL every request is built from
    pub fn endpoint(&self) -> &str {
        self.api_base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
    }

    /// Check if targeting pre-production
    pub fn is_development(&self) -> bool {
        self.environment == Environment::PreProduction
    }
}

// Keeps the API key out of logs.
impl std::fmt::Debug for KonnectConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KonnectConfig")
            .field("access_token", &"<redacted>")
            .field("receiver_wallet_id", &self.receiver_wallet_id)
            .field("environment", &self.environment)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" | "" => Some(false),
        _ => None,
    }
}
