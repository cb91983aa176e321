use thiserror::Error;

#[derive(Error, Debug)]
/// Gateway error
pub enum GatewayError {
    #[error("Transport from: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Serialization from: {0}")]
    Serialization(String),

    #[error("Configuration: {0}")]
    Configuration(String),
}
