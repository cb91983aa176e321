use crate::error::GatewayError;

use super::transport::Transport;

/// One request/response cycle against a gateway.
///
/// `execute` posts the request once and keeps the decoded response; the
/// accessors are total reads over that response and degrade to `""` or
/// `false` when nothing usable was received.
pub trait GatewayTransaction {
    fn execute(&mut self, transport: &dyn Transport) -> Result<(), GatewayError>;

    fn is_approved(&self) -> bool;

    fn response_code(&self) -> &str;

    fn response_message(&self) -> &str;
}
