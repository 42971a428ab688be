//! Error type for command handlers.

use thiserror::Error;

use crate::error::DomainError;

#[derive(Debug, Error)]
pub enum HandlerError {
    /// No handler registered for this command name.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    /// Payload decode / deserialization failed.
    #[error("decode failed: {0}")]
    DecodeFailed(String),
    /// Guard rejected the command (required input missing).
    #[error("guard rejected command: {0}")]
    GuardRejected(String),
    /// Wrong credentials, or a missing, expired or forged bearer token.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("internal error: {0}")]
    Internal(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::DecodeFailed(err.to_string())
    }
}

impl HandlerError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::UnknownCommand(_) => 404,
            HandlerError::DecodeFailed(_) => 400,
            HandlerError::GuardRejected(_) => 400,
            HandlerError::Unauthorized(_) => 401,
            HandlerError::Internal(_) => 500,
            HandlerError::Domain(err) => match err {
                DomainError::InvalidInput(_) | DomainError::OutOfRange { .. } => 400,
                DomainError::InconsistentScore { .. } | DomainError::InvalidRelationship(_) => 422,
                DomainError::NotFound { .. } => 404,
                DomainError::AlreadyReported { .. } => 409,
                DomainError::StorageFailure(_) => 500,
            },
        }
    }
}
