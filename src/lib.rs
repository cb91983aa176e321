#![cfg_attr(docsrs, feature(doc_cfg))]
//#![warn(missing_docs)]

/*!
 # Authorize.net for Rust

 A synchronous client for the Authorize.net payment gateways:

 - **AIM**: posts a form-encoded field set and reads the pipe-delimited,
   position-based response.
 - **ARB**: creates, updates and cancels recurring billing subscriptions by
   posting XML requests and reading the XML reply.

 ## Core Concepts

- **GatewayConfig:** credentials, endpoints and the debug and mock toggles.
- **FieldSet:** the ordered request fields, defaults merged with caller values.
- **GatewayTransaction:** one request/response cycle. `execute` posts the request
  once; accessors such as `is_approved` or `response_message` then read the
  decoded response and never fail.
- **Transport:** the capability that actually posts a request. The `http`
  feature provides a blocking `reqwest` implementation; tests can supply their own.
- **XmlNode:** structured input for the XML writer, including repeated
  same-named elements.

 ## Features

| **Feature** | **Description**                                      |
|-------------|------------------------------------------------------|
| http        | Enables `HttpTransport`, a blocking reqwest transport |
| full        | Enables all available features                       |

 ## Getting Started

```toml
[dependencies]
authorizenet-rs = { version = "<version>", features = ["http"] }
```

Then:

```rust
# use authorizenet::{
#     config::GatewayConfigBuilder,
#     core::transaction::GatewayTransaction,
#     core::transport::{GatewayRequest, Transport},
#     gateway::aim::AimTransaction,
#     GatewayError,
# };
# struct NoNetwork;
# impl Transport for NoNetwork {
#     fn post(&self, _request: &GatewayRequest) -> Result<String, GatewayError> {
#         Err(GatewayError::Transport("no network in doc tests".to_string()))
#     }
# }
fn main() -> Result<(), GatewayError> {
    let config = GatewayConfigBuilder::new()
        .login("api-login-id")
        .transaction_key("transaction-key")
        .sandbox()
        .mock(true)
        .build()?;

    let mut transaction = AimTransaction::new(
        &config,
        [
            ("x_card_num", "4007000000027"),
            ("x_exp_date", "12/30"),
            ("x_amount", "75.00"),
        ],
    );

    // With the `http` feature: `let transport = authorizenet::transport::HttpTransport::new()?;`
    transaction.execute(&NoNetwork)?;

    assert!(transaction.is_approved());
    assert_eq!(transaction.response_code(), "1");

    Ok(())
}
```

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.
 */

/// Gateway configuration: credentials, endpoints, debug and mock toggles
pub mod config;

/// Core types shared by every gateway: fields, responses, transport seam
pub mod core;

/// Error types for gateway operations
pub mod error;

#[doc(inline)]
pub use error::*;

/// Gateway transactions (AIM and ARB)
pub mod gateway;

/// Transport implementations
pub mod transport;

/// XML request writing and response reading
pub mod xml;
