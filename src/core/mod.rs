use rand::distr::{Alphanumeric, SampleString};

pub mod fields;

pub mod response;

pub mod transaction;

pub mod transport;

/// Generates a random reference consisting of alphanumeric characters.
///
/// # Returns
///
/// A `String` of 8 characters, short enough for any gateway reference field.
pub(crate) fn build_ref_id() -> String {
    Alphanumeric.sample_string(&mut rand::rng(), 8)
}
