//! Client error types

use itemsdb_core::ItemsError;
use itemsdb_net::TransportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Rejected before any request was sent
    #[error(transparent)]
    Precondition(#[from] ItemsError),

    /// Passed through from the transport untouched
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// The precondition that failed, if this error never reached the wire
    pub fn precondition(&self) -> Option<&ItemsError> {
        match self {
            ClientError::Precondition(e) => Some(e),
            _ => None,
        }
    }
}
