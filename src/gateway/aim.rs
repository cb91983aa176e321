//! # Delimited gateway transactions
//!
//! Posts a form-encoded field set and reads the pipe-delimited positional
//! response.
//!
//! ## Examples
//!
//! ```rust
//! use authorizenet::config::GatewayConfigBuilder;
//! use authorizenet::core::transaction::GatewayTransaction;
//! use authorizenet::core::transport::{GatewayRequest, Transport};
//! use authorizenet::gateway::aim::AimTransaction;
//! use authorizenet::GatewayError;
//!
//! struct Unreachable;
//!
//! impl Transport for Unreachable {
//!     fn post(&self, _request: &GatewayRequest) -> Result<String, GatewayError> {
//!         Err(GatewayError::Transport("offline".to_string()))
//!     }
//! }
//!
//! # fn example() -> Result<(), GatewayError> {
//! let config = GatewayConfigBuilder::new().mock(true).build()?;
//! let mut transaction = AimTransaction::new(&config, [("x_amount", "75.00")]);
//!
//! transaction.execute(&Unreachable)?;
//!
//! assert!(transaction.is_approved());
//! assert_eq!(transaction.nice_named_response()["Amount"], "75.00");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use indexmap::IndexMap;
use log::{debug, error, info};

use crate::config::GatewayConfig;
use crate::core::{
    fields::FieldSet,
    response::{PositionalResponse, ResponseField},
    transaction::GatewayTransaction,
    transport::{GatewayRequest, Transport},
};
use crate::error::GatewayError;

/// Field separator requested through `x_delim_char`.
pub const AIM_DELIMITER: char = '|';

/// Response answered in mock mode: an approved test authorization.
pub const MOCK_AIM_FIELDS: [&str; 40] = [
    "1",
    "1",
    "1",
    "(TESTMODE) This transaction has been approved.",
    "000000",
    "P",
    "0",
    "",
    "",
    "75.00",
    "CC",
    "auth_only",
    "",
    "John",
    "Smith",
    "",
    "1234 West Main St.",
    "Some City",
    "CA",
    "12345",
    "US",
    "555-555-5555",
    "",
    "someone@somedomain.com",
    "",
    "",
    "",
    "",
    "",
    "",
    "",
    "",
    "",
    "",
    "",
    "",
    "",
    "F8B3EFAAD9428554CC27C140B7648EFA",
    "",
    "",
];

/// Default field set; credentials are filled from the configuration.
const AIM_DEFAULTS: [(&str, &str); 25] = [
    ("x_login", ""),
    ("x_tran_key", ""),
    ("x_first_name", ""),
    ("x_last_name", ""),
    ("x_address", ""),
    ("x_city", ""),
    ("x_state", ""),
    ("x_zip", ""),
    ("x_country", ""),
    ("x_email", ""),
    ("x_phone", ""),
    ("x_card_num", ""),
    ("x_amount", ""),
    ("x_description", ""),
    ("x_exp_date", ""),
    ("x_card_code", ""),
    ("x_version", "3.1"),
    ("x_delim_data", "TRUE"),
    ("x_delim_char", "|"),
    ("x_url", "FALSE"),
    ("x_type", "AUTH_CAPTURE"),
    ("x_test_request", "FALSE"),
    ("x_method", "CC"),
    ("x_relay_response", "FALSE"),
    ("x_encap_char", ""),
];

/// A single form-encoded transaction against the delimited gateway.
pub struct AimTransaction {
    config: GatewayConfig,
    fields: FieldSet,
    response: PositionalResponse,
}

impl AimTransaction {
    /// Merges `overrides` over the default field set; overrides win.
    pub fn new<K, V, I>(config: &GatewayConfig, overrides: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut fields = FieldSet::from_pairs(AIM_DEFAULTS);
        fields.set("x_login", config.login());
        fields.set("x_tran_key", config.transaction_key());

        Self {
            config: config.clone(),
            fields: fields.merged(overrides),
            response: PositionalResponse::default(),
        }
    }

    /// Fields as supplied by the caller, merged with the defaults.
    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    /// Fields actually sent: debug mode forces a test authorization only.
    pub fn effective_fields(&self) -> FieldSet {
        let mut fields = self.fields.clone();
        if self.config.debug() {
            fields.set("x_type", "AUTH_ONLY");
            fields.set("x_test_request", "TRUE");
        }
        fields
    }

    pub fn build_request(&self) -> Result<GatewayRequest, GatewayError> {
        let body = self.effective_fields().to_form_body()?;
        Ok(
            GatewayRequest::new(&self.config.endpoints().aim, body)
                .header("Content-Type", "application/x-www-form-urlencoded"),
        )
    }

    /// Percent-decodes a raw body and splits it into positional fields.
    pub fn decode_body(body: &str) -> PositionalResponse {
        let plus_decoded = body.replace('+', " ");
        let decoded = urlencoding::decode_binary(plus_decoded.as_bytes());
        PositionalResponse::from_delimited(&String::from_utf8_lossy(&decoded), AIM_DELIMITER)
    }

    pub fn response(&self) -> &PositionalResponse {
        &self.response
    }

    pub fn raw_response(&self) -> &[String] {
        self.response.raw()
    }

    pub fn nice_named_response(&self) -> IndexMap<String, String> {
        self.response.decode_nice()
    }

    pub fn code_named_response(&self) -> IndexMap<String, String> {
        self.response.decode_code()
    }

    pub fn response_reason_code(&self) -> &str {
        self.response.get(ResponseField::ResponseReasonCode)
    }

    pub fn approval_code(&self) -> &str {
        self.response.get(ResponseField::ApprovalCode)
    }

    pub fn transaction_id(&self) -> &str {
        self.response.get(ResponseField::TransactionId)
    }
}

impl GatewayTransaction for AimTransaction {
    fn execute(&mut self, transport: &dyn Transport) -> Result<(), GatewayError> {
        let body = if self.config.mock() {
            info!("Mock mode: answering AIM transaction with canned response");
            MOCK_AIM_FIELDS.join("|")
        } else {
            let request = self.build_request()?;
            info!("Posting AIM transaction to {}", request.url);
            transport.post(&request).inspect_err(|e| {
                error!("AIM transaction failed: {}", e);
            })?
        };

        self.response = Self::decode_body(&body);
        debug!(
            "AIM response decoded into {} fields, approved={}",
            self.response.len(),
            self.response.is_approved()
        );
        Ok(())
    }

    fn is_approved(&self) -> bool {
        self.response.is_approved()
    }

    fn response_code(&self) -> &str {
        self.response.get(ResponseField::ResponseCode)
    }

    fn response_message(&self) -> &str {
        self.response.get(ResponseField::ResponseReasonText)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Endpoints, GatewayConfigBuilder};
    use std::cell::RefCell;

    struct RecordingTransport {
        reply: Result<String, String>,
        requests: RefCell<Vec<GatewayRequest>>,
    }

    impl RecordingTransport {
        fn replying(body: &str) -> Self {
            Self {
                reply: Ok(body.to_string()),
                requests: RefCell::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for RecordingTransport {
        fn post(&self, request: &GatewayRequest) -> Result<String, GatewayError> {
            self.requests.borrow_mut().push(request.clone());
            self.reply.clone().map_err(GatewayError::Transport)
        }
    }

    fn config(debug: bool, mock: bool) -> GatewayConfig {
        GatewayConfigBuilder::new()
            .login("login")
            .transaction_key("key")
            .endpoints(Endpoints::custom("https://aim.test/transact", "https://arb.test/api"))
            .debug(debug)
            .mock(mock)
            .build()
            .unwrap()
    }

    #[test]
    fn caller_overrides_win_over_defaults() {
        let transaction = AimTransaction::new(
            &config(false, false),
            [("x_amount", "10.00"), ("x_type", "AUTH_ONLY"), ("x_invoice_num", "INV-9")],
        );

        let fields = transaction.fields();
        assert_eq!(fields.get("x_login"), "login");
        assert_eq!(fields.get("x_tran_key"), "key");
        assert_eq!(fields.get("x_amount"), "10.00");
        assert_eq!(fields.get("x_type"), "AUTH_ONLY");
        assert_eq!(fields.get("x_version"), "3.1");
        assert_eq!(fields.keys().last(), Some("x_invoice_num"));
    }

    #[test]
    fn debug_forces_test_auth_without_touching_fields() {
        let transaction = AimTransaction::new(&config(true, false), [("x_amount", "1.00")]);

        let effective = transaction.effective_fields();
        assert_eq!(effective.get("x_type"), "AUTH_ONLY");
        assert_eq!(effective.get("x_test_request"), "TRUE");
        assert_eq!(transaction.fields().get("x_type"), "AUTH_CAPTURE");
        assert_eq!(transaction.fields().get("x_test_request"), "FALSE");
    }

    #[test]
    fn request_is_form_encoded_to_configured_endpoint() {
        let transaction =
            AimTransaction::new(&config(false, false), [("x_description", "Tea & cakes")]);

        let request = transaction.build_request().unwrap();

        assert_eq!(request.url, "https://aim.test/transact");
        assert_eq!(
            request.header_value("Content-Type"),
            Some("application/x-www-form-urlencoded")
        );
        assert!(request.body.starts_with("x_login=login&x_tran_key=key&"));
        assert!(request.body.contains("x_description=Tea+%26+cakes"));
        assert!(request.body.contains("x_delim_char=%7C"));
    }

    #[test]
    fn execute_decodes_delimited_body() {
        let transport = RecordingTransport::replying(
            "1|1|1|This+transaction+has+been+approved.|A1B2C3|Y|2149186775",
        );
        let mut transaction = AimTransaction::new(&config(false, false), [("x_amount", "5.00")]);

        transaction.execute(&transport).unwrap();

        assert_eq!(transport.requests.borrow().len(), 1);
        assert!(transaction.is_approved());
        assert_eq!(transaction.response_code(), "1");
        assert_eq!(transaction.response_message(), "This transaction has been approved.");
        assert_eq!(transaction.approval_code(), "A1B2C3");
        assert_eq!(transaction.transaction_id(), "2149186775");
        assert_eq!(transaction.nice_named_response().len(), 7);
    }

    #[test]
    fn declined_response_is_not_approved() {
        let transport = RecordingTransport::replying("2|1|2|This transaction has been declined.");
        let mut transaction = AimTransaction::new(&config(false, false), [("x_amount", "5.00")]);

        transaction.execute(&transport).unwrap();

        assert!(!transaction.is_approved());
        assert_eq!(transaction.response_reason_code(), "2");
        assert_eq!(transaction.transaction_id(), "");
    }

    #[test]
    fn percent_encoded_body_is_decoded_before_split() {
        let response = AimTransaction::decode_body("1%7C1%7C1%7CApproved%20%26%20settled");

        assert_eq!(response.raw(), &["1", "1", "1", "Approved & settled"]);
    }

    #[test]
    fn transport_failure_keeps_previous_response() {
        let mut transaction = AimTransaction::new(&config(false, false), [("x_amount", "5.00")]);
        transaction
            .execute(&RecordingTransport::replying("1|1|1|ok"))
            .unwrap();

        let transport = RecordingTransport::failing("connection reset");
        let result = transaction.execute(&transport);

        match result {
            Err(GatewayError::Transport(message)) => assert_eq!(message, "connection reset"),
            other => panic!("Expected Transport error, got {:?}", other),
        }
        assert_eq!(transport.requests.borrow().len(), 1);
        assert!(transaction.is_approved());
    }

    #[test]
    fn mock_mode_skips_transport() {
        let transport = RecordingTransport::failing("must not be called");
        let mut transaction = AimTransaction::new(&config(false, true), [("x_amount", "999.00")]);

        transaction.execute(&transport).unwrap();

        assert!(transport.requests.borrow().is_empty());
        assert!(transaction.is_approved());
        assert_eq!(transaction.raw_response().len(), MOCK_AIM_FIELDS.len());
        assert_eq!(transaction.nice_named_response()["Amount"], "75.00");
        assert_eq!(transaction.code_named_response()["hash"], MOCK_AIM_FIELDS[37]);
    }
}
