//! Mock version of the gateway transport;
use mockall::mock;

use authorizenet::GatewayError;
use authorizenet::core::transport::{GatewayRequest, Transport};

mock! {
    pub Transport {}
    impl Transport for Transport {
        fn post(&self, request: &GatewayRequest) -> Result<String, GatewayError>;
    }
}
