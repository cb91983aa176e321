/// Form-encoded transactions with a pipe-delimited positional response.
pub mod aim;

/// Recurring billing subscriptions over XML.
pub mod arb;

/// Recurring billing request shapes, one per subscription mode.
pub mod subscription;

pub use aim::AimTransaction;
pub use arb::{ArbResponse, ArbSubscription};
pub use subscription::{SubscriptionMode, SubscriptionRequest};
