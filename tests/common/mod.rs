pub mod mocks;

pub use mocks::MockTransport;

use authorizenet::config::{Endpoints, GatewayConfig, GatewayConfigBuilder};

pub const AIM_URL: &str = "https://aim.test/gateway/transact.dll";
pub const ARB_URL: &str = "https://arb.test/xml/v1/request.api";

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn config(debug: bool, mock: bool) -> GatewayConfig {
    GatewayConfigBuilder::new()
        .login("test-login")
        .transaction_key("test-key")
        .endpoints(Endpoints::custom(AIM_URL, ARB_URL))
        .debug(debug)
        .mock(mock)
        .build()
        .unwrap()
}
