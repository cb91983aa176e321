//! # Recurring billing transactions
//!
//! Creates, updates and cancels subscriptions by posting XML requests and
//! reading the XML reply.
//!
//! A transaction starts in [`SubscriptionMode::Create`], or in
//! [`SubscriptionMode::Update`] when a subscription id is supplied.
//! [`ArbSubscription::cancel`] switches it to [`SubscriptionMode::Cancel`] for
//! good.
//!
//! ## Examples
//!
//! ```rust
//! use authorizenet::config::GatewayConfigBuilder;
//! use authorizenet::core::transaction::GatewayTransaction;
//! use authorizenet::core::transport::{GatewayRequest, Transport};
//! use authorizenet::gateway::arb::ArbSubscription;
//! use authorizenet::gateway::subscription::SubscriptionMode;
//! use authorizenet::GatewayError;
//!
//! struct Gateway;
//!
//! impl Transport for Gateway {
//!     fn post(&self, request: &GatewayRequest) -> Result<String, GatewayError> {
//!         assert!(request.body.contains("<ARBCancelSubscriptionRequest"));
//!         Ok("<ARBCancelSubscriptionResponse><refId>R1</refId><messages>\
//!             <resultCode>Ok</resultCode><message><code>I00001</code>\
//!             <text>Successful.</text></message></messages>\
//!             </ARBCancelSubscriptionResponse>"
//!             .to_string())
//!     }
//! }
//!
//! # fn example() -> Result<(), GatewayError> {
//! let config = GatewayConfigBuilder::new()
//!     .login("login")
//!     .transaction_key("key")
//!     .build()?;
//!
//! let mut subscription =
//!     ArbSubscription::new(&config, [("x_ref_id", "R1"), ("x_subsc_id", "100748")]);
//! assert_eq!(subscription.mode(), SubscriptionMode::Update);
//!
//! subscription.cancel();
//! subscription.execute(&Gateway)?;
//!
//! assert!(subscription.is_approved());
//! assert_eq!(subscription.response_message(), "Successful.");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use log::{debug, error, info, warn};
use serde::Deserialize;
use sha1::{Digest, Sha1};

use crate::config::GatewayConfig;
use crate::core::{
    build_ref_id,
    fields::FieldSet,
    transaction::GatewayTransaction,
    transport::{GatewayRequest, Transport},
};
use crate::error::GatewayError;
use crate::xml::{XmlDocumentReader, XmlDocumentReaderBuilder};

use super::subscription::{ARB_NAMESPACE, SubscriptionMode, SubscriptionRequest};

/// Response answered in mock mode: a successfully created subscription.
pub const MOCK_ARB_RESPONSE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ARBCreateSubscriptionResponse
    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
    xmlns:xsd="http://www.w3.org/2001/XMLSchema"
    xmlns="AnetApi/xml/v1/schema/AnetApiSchema.xsd">
  <refId>MOCK</refId>
  <messages>
    <resultCode>Ok</resultCode>
    <message>
      <code>I00001</code>
      <text>Successful.</text>
    </message>
  </messages>
  <subscriptionId>100748</subscriptionId>
</ARBCreateSubscriptionResponse>"#;

const ARB_DEFAULTS: [(&str, &str); 16] = [
    ("x_login", ""),
    ("x_tran_key", ""),
    ("x_ref_id", ""),
    ("x_subsc_id", ""),
    ("x_subsc_name", ""),
    ("x_length", ""),
    ("x_unit", ""),
    ("x_start_date", ""),
    ("x_total_occurrences", ""),
    ("x_trial_occurrences", ""),
    ("x_trial_amount", ""),
    ("x_first_name", ""),
    ("x_last_name", ""),
    ("x_card_num", ""),
    ("x_amount", ""),
    ("x_exp_date", ""),
];

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArbMessage {
    pub code: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ArbMessages {
    pub result_code: String,
    pub message: Vec<ArbMessage>,
}

/// Decoded recurring billing reply; absent elements read as empty strings.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ArbResponse {
    pub ref_id: String,
    pub messages: ArbMessages,
    pub subscription_id: String,
}

impl ArbResponse {
    pub fn ref_id(&self) -> &str {
        &self.ref_id
    }

    pub fn result_code(&self) -> &str {
        &self.messages.result_code
    }

    /// Code of the first message.
    pub fn code(&self) -> &str {
        self.messages
            .message
            .first()
            .map(|message| message.code.as_str())
            .unwrap_or("")
    }

    /// Text of the first message.
    pub fn text(&self) -> &str {
        self.messages
            .message
            .first()
            .map(|message| message.text.as_str())
            .unwrap_or("")
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }
}

/// A recurring billing transaction.
pub struct ArbSubscription {
    config: GatewayConfig,
    fields: FieldSet,
    mode: SubscriptionMode,
    reader: XmlDocumentReader,
    response: ArbResponse,
}

impl ArbSubscription {
    /// Merges `overrides` over the default field set and picks the mode.
    ///
    /// An empty `x_ref_id` is replaced by a generated reference.
    pub fn new<K, V, I>(config: &GatewayConfig, overrides: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut fields = FieldSet::from_pairs(ARB_DEFAULTS);
        fields.set("x_login", config.login());
        fields.set("x_tran_key", config.transaction_key());
        let mut fields = fields.merged(overrides);
        if !fields.is_filled("x_ref_id") {
            fields.set("x_ref_id", build_ref_id());
        }

        let mode = SubscriptionMode::from_fields(&fields);
        debug!("Subscription transaction created in {} mode", mode);

        Self {
            config: config.clone(),
            fields,
            mode,
            reader: XmlDocumentReaderBuilder::new()
                .strip_namespace(ARB_NAMESPACE)
                .build(),
            response: ArbResponse::default(),
        }
    }

    /// Switches the transaction to cancel mode; there is no way back.
    pub fn cancel(&mut self) {
        debug!("Subscription transaction switched from {} to cancel", self.mode);
        self.mode = SubscriptionMode::Cancel;
    }

    pub fn mode(&self) -> SubscriptionMode {
        self.mode
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    /// Hook for debug-mode overrides; the recurring gateway has none.
    fn force_parameters(&self) {
        if self.config.debug() {
            debug!("No parameters forced for recurring billing in debug mode");
        }
    }

    pub fn request(&self) -> SubscriptionRequest {
        SubscriptionRequest::from_fields(self.mode, &self.fields)
    }

    pub fn build_request(&self) -> Result<GatewayRequest, GatewayError> {
        let body = self.request().to_xml()?;
        Ok(
            GatewayRequest::new(&self.config.endpoints().arb, body)
                .header("Content-Type", "text/xml"),
        )
    }

    /// Parses a reply; an unreadable document becomes an empty response.
    pub fn decode_body(&self, body: &str) -> ArbResponse {
        match self.reader.read::<ArbResponse>(body) {
            Ok(response) => response,
            Err(e) => {
                warn!("Recurring billing reply could not be decoded: {}", e);
                ArbResponse::default()
            }
        }
    }

    pub fn response(&self) -> &ArbResponse {
        &self.response
    }

    pub fn ref_id(&self) -> &str {
        self.response.ref_id()
    }

    pub fn result_code(&self) -> &str {
        self.response.result_code()
    }

    pub fn subscription_id(&self) -> &str {
        self.response.subscription_id()
    }

    /// Short order token derived from the request fields and the reply.
    ///
    /// Six upper-case hex characters of a SHA-1 digest over the field values
    /// joined by `:`, followed by the reply's refId, message code and
    /// subscription id.
    pub fn order_hash(&self) -> String {
        let mut base = self.fields.values().collect::<Vec<_>>().join(":");
        base.push_str(self.response.ref_id());
        base.push_str(self.response.code());
        base.push_str(self.response.subscription_id());

        let digest = hex::encode_upper(Sha1::digest(base.as_bytes()));
        digest[5..11].to_string()
    }
}

impl GatewayTransaction for ArbSubscription {
    fn execute(&mut self, transport: &dyn Transport) -> Result<(), GatewayError> {
        self.force_parameters();

        let body = if self.config.mock() {
            info!("Mock mode: answering {} subscription with canned response", self.mode);
            MOCK_ARB_RESPONSE.to_string()
        } else {
            let request = self.build_request()?;
            info!("Posting {} subscription request to {}", self.mode, request.url);
            transport.post(&request).inspect_err(|e| {
                error!("Subscription {} failed: {}", self.mode, e);
            })?
        };

        self.response = self.decode_body(&body);
        debug!(
            "Subscription reply: result={} code={} subscription={}",
            self.response.result_code(),
            self.response.code(),
            self.response.subscription_id()
        );
        Ok(())
    }

    fn is_approved(&self) -> bool {
        self.response.result_code() == "Ok"
    }

    fn response_code(&self) -> &str {
        self.response.code()
    }

    fn response_message(&self) -> &str {
        self.response.text()
    }
}
