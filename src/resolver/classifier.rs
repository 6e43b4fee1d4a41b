//! Mapping from engine failures to caller-facing errors.

use crate::engine::{EngineError, codes};
use crate::error::InboundError;

/// Classify an engine failure.
///
/// A client error whose code is [`codes::METADATA_URL_NOT_FOUND`] becomes
/// [`InboundError::NotFound`], every other client error becomes
/// [`InboundError::Client`], and server errors become [`InboundError::Server`].
/// Code, message and description are carried over unchanged.
pub fn classify(error: &EngineError) -> InboundError {
    match error {
        EngineError::Client {
            code,
            message,
            description,
        } if code == codes::METADATA_URL_NOT_FOUND => {
            InboundError::not_found(code.clone(), message.clone(), description.clone())
        }
        EngineError::Client {
            code,
            message,
            description,
        } => InboundError::client(code.clone(), message.clone(), description.clone()),
        EngineError::Server {
            code,
            message,
            description,
        } => InboundError::server(code.clone(), message.clone(), description.clone()),
    }
}

/// Report any engine failure as a server error, keeping its code and message.
pub fn classify_as_server(error: &EngineError) -> InboundError {
    InboundError::server(
        error.code(),
        error.message(),
        error.description().map(str::to_string),
    )
}

impl From<EngineError> for InboundError {
    fn from(error: EngineError) -> Self {
        classify(&error)
    }
}
