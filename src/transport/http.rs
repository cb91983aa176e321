//! Blocking HTTP transport using reqwest.

use std::time::Duration;

use log::{debug, error};
use reqwest::blocking::Client;

use crate::core::transport::{GatewayRequest, Transport};
use crate::error::GatewayError;

/// Blocking HTTP transport.
///
/// Posts the request body with its headers and returns the response body.
/// Connection errors, timeouts and non-success statuses are reported as
/// [`GatewayError::Transport`].
///
/// # Examples
///
/// ```rust,no_run
/// use authorizenet::config::GatewayConfig;
/// use authorizenet::core::transaction::GatewayTransaction;
/// use authorizenet::gateway::aim::AimTransaction;
/// use authorizenet::transport::HttpTransportBuilder;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), authorizenet::GatewayError> {
/// let transport = HttpTransportBuilder::new()
///     .timeout(Duration::from_secs(20))
///     .build()?;
///
/// let config = GatewayConfig::from_env()?;
/// let mut transaction = AimTransaction::new(&config, [("x_amount", "10.00")]);
/// transaction.execute(&transport)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with the default builder settings.
    pub fn new() -> Result<Self, GatewayError> {
        HttpTransportBuilder::new().build()
    }
}

impl Transport for HttpTransport {
    fn post(&self, request: &GatewayRequest) -> Result<String, GatewayError> {
        let mut builder = self.client.post(&request.url).body(request.body.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        debug!("POST {} ({} bytes)", request.url, request.body.len());
        let response = builder.send().map_err(|e| {
            error!("Failed to reach {}: {}", request.url, e);
            GatewayError::Transport(format!("Failed to reach {}: {}", request.url, e))
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("{} answered with HTTP {}", request.url, status);
            return Err(GatewayError::Transport(format!(
                "{} answered with HTTP {}",
                request.url, status
            )));
        }

        response.text().map_err(|e| {
            GatewayError::Transport(format!("Failed to read response from {}: {}", request.url, e))
        })
    }
}

/// Builder for [`HttpTransport`].
pub struct HttpTransportBuilder {
    timeout: Duration,
    connect_timeout: Duration,
    accept_invalid_certs: bool,
}

impl Default for HttpTransportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransportBuilder {
    /// Creates a builder with a 30 second timeout and certificate validation on.
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            accept_invalid_certs: false,
        }
    }

    /// Sets the total request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Disables certificate validation, for test gateways behind self-signed certificates.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn build(self) -> Result<HttpTransport, GatewayError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .build()
            .map_err(|e| {
                GatewayError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(HttpTransport { client })
    }
}
