//! # Transports
//!
//! Implementations of [`Transport`](crate::core::transport::Transport).

#[cfg(feature = "http")]
#[cfg_attr(docsrs, doc(cfg(feature = "http")))]
pub mod http;

#[cfg(feature = "http")]
pub use http::{HttpTransport, HttpTransportBuilder};
