//! Precondition errors for itemsdb
//!
//! Every variant is raised before a request leaves the process.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemsError {
    #[error("no name given")]
    NoName,

    #[error("scheme empty")]
    EmptyScheme,

    #[error("scheme should be a JSON object, got {0}")]
    InvalidScheme(String),

    #[error("unknown or invalid type: {0}")]
    UnknownType(String),

    #[error("id empty")]
    EmptyId,

    #[error("invalid id: {0}")]
    InvalidId(String),

    #[error("item empty")]
    EmptyItem,

    #[error("{field} should be numeric")]
    NotNumeric { field: &'static str },

    /// Numeric, but negative or fractional
    #[error("{field} should be a non-negative integer")]
    OutOfRange { field: &'static str },
}
