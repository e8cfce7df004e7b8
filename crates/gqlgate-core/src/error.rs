//! Error types for the core crate.

use thiserror::Error;

/// Request-level validation failures raised before anything is sent upstream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The requested resource is not on the allow-list.
    #[error("resource {name:?} is not in the allow-list")]
    UnknownResource { name: String },

    /// The `since` value could not be read as a date.
    #[error("could not parse {raw:?} as a date")]
    InvalidDate { raw: String },
}
