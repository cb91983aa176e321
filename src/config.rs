//! # Gateway configuration
//!
//! Credentials, endpoint selection and the debug and mock toggles shared by
//! every transaction.
//!
//! ## Examples
//!
//! ```rust
//! use authorizenet::config::{Endpoints, GatewayConfigBuilder};
//!
//! # fn example() -> Result<(), authorizenet::GatewayError> {
//! let config = GatewayConfigBuilder::new()
//!     .login("api-login-id")
//!     .transaction_key("transaction-key")
//!     .production()
//!     .build()?;
//!
//! assert_eq!(config.endpoints(), &Endpoints::production());
//! # Ok(())
//! # }
//! ```
//!
//! Loading from the environment:
//!
//! ```rust,no_run
//! use authorizenet::config::GatewayConfig;
//!
//! # fn example() -> Result<(), authorizenet::GatewayError> {
//! // AUTHORIZENET_API_LOGIN_ID, AUTHORIZENET_TRANSACTION_KEY,
//! // AUTHORIZENET_ENVIRONMENT=sandbox|production, AUTHORIZENET_DEBUG, AUTHORIZENET_MOCK
//! let config = GatewayConfig::from_env()?;
//! # Ok(())
//! # }
//! ```

use crate::GatewayError;
use log::info;

pub const AIM_SANDBOX_URL: &str = "https://test.authorize.net/gateway/transact.dll";
pub const AIM_PRODUCTION_URL: &str = "https://secure.authorize.net/gateway/transact.dll";
pub const ARB_SANDBOX_URL: &str = "https://apitest.authorize.net/xml/v1/request.api";
pub const ARB_PRODUCTION_URL: &str = "https://api.authorize.net/xml/v1/request.api";

pub const ENV_LOGIN: &str = "AUTHORIZENET_API_LOGIN_ID";
pub const ENV_TRANSACTION_KEY: &str = "AUTHORIZENET_TRANSACTION_KEY";
pub const ENV_ENVIRONMENT: &str = "AUTHORIZENET_ENVIRONMENT";
pub const ENV_DEBUG: &str = "AUTHORIZENET_DEBUG";
pub const ENV_MOCK: &str = "AUTHORIZENET_MOCK";

/// Target URLs of both gateways.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Form-encoded, pipe-delimited gateway.
    pub aim: String,
    /// XML recurring billing gateway.
    pub arb: String,
}

impl Endpoints {
    pub fn sandbox() -> Self {
        Self {
            aim: AIM_SANDBOX_URL.to_string(),
            arb: ARB_SANDBOX_URL.to_string(),
        }
    }

    pub fn production() -> Self {
        Self {
            aim: AIM_PRODUCTION_URL.to_string(),
            arb: ARB_PRODUCTION_URL.to_string(),
        }
    }

    pub fn custom<A: Into<String>, B: Into<String>>(aim: A, arb: B) -> Self {
        Self {
            aim: aim.into(),
            arb: arb.into(),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::sandbox()
    }
}

/// Settings injected into every transaction before it executes.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    login: String,
    transaction_key: String,
    endpoints: Endpoints,
    debug: bool,
    mock: bool,
}

impl GatewayConfig {
    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn transaction_key(&self) -> &str {
        &self.transaction_key
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Debug mode forces test transactions where the gateway supports it.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Mock mode answers every transaction with a canned response.
    pub fn mock(&self) -> bool {
        self.mock
    }

    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self, GatewayError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, such as a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GatewayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = GatewayConfigBuilder::new()
            .debug(parse_flag(lookup(ENV_DEBUG)))
            .mock(parse_flag(lookup(ENV_MOCK)));

        if let Some(login) = lookup(ENV_LOGIN) {
            builder = builder.login(login);
        }
        if let Some(key) = lookup(ENV_TRANSACTION_KEY) {
            builder = builder.transaction_key(key);
        }

        builder = match lookup(ENV_ENVIRONMENT).as_deref().map(str::trim) {
            None | Some("") => builder,
            Some(value) if value.eq_ignore_ascii_case("sandbox") => builder.sandbox(),
            Some(value) if value.eq_ignore_ascii_case("production") => builder.production(),
            Some(other) => {
                return Err(GatewayError::Configuration(format!(
                    "Unknown {} value: {}",
                    ENV_ENVIRONMENT, other
                )));
            }
        };

        builder.build()
    }
}

fn parse_flag(value: Option<String>) -> bool {
    matches!(
        value.as_deref().map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}

/// Builder for [`GatewayConfig`] with a fluent interface.
pub struct GatewayConfigBuilder {
    login: Option<String>,
    transaction_key: Option<String>,
    endpoints: Endpoints,
    debug: bool,
    mock: bool,
}

impl Default for GatewayConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GatewayConfigBuilder {
    /// Creates a builder targeting the sandbox endpoints.
    pub fn new() -> Self {
        Self {
            login: None,
            transaction_key: None,
            endpoints: Endpoints::sandbox(),
            debug: false,
            mock: false,
        }
    }

    /// Sets the API login id.
    pub fn login<S: Into<String>>(mut self, login: S) -> Self {
        self.login = Some(login.into());
        self
    }

    /// Sets the transaction key.
    pub fn transaction_key<S: Into<String>>(mut self, key: S) -> Self {
        self.transaction_key = Some(key.into());
        self
    }

    pub fn sandbox(mut self) -> Self {
        self.endpoints = Endpoints::sandbox();
        self
    }

    pub fn production(mut self) -> Self {
        self.endpoints = Endpoints::production();
        self
    }

    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn mock(mut self, mock: bool) -> Self {
        self.mock = mock;
        self
    }

    /// Builds the configuration.
    ///
    /// Credentials are required unless mock mode is on.
    pub fn build(self) -> Result<GatewayConfig, GatewayError> {
        let login = match (self.login, self.mock) {
            (Some(login), _) if !login.is_empty() => login,
            (_, true) => String::new(),
            _ => {
                return Err(GatewayError::Configuration(
                    "API login id is required".to_string(),
                ));
            }
        };
        let transaction_key = match (self.transaction_key, self.mock) {
            (Some(key), _) if !key.is_empty() => key,
            (_, true) => String::new(),
            _ => {
                return Err(GatewayError::Configuration(
                    "Transaction key is required".to_string(),
                ));
            }
        };

        info!(
            "Gateway configured: aim={} arb={} debug={} mock={}",
            self.endpoints.aim, self.endpoints.arb, self.debug, self.mock
        );

        Ok(GatewayConfig {
            login,
            transaction_key,
            endpoints: self.endpoints,
            debug: self.debug,
            mock: self.mock,
        })
    }
}
