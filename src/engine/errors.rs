//! Errors raised by a SAML engine.
//!
//! The engine distinguishes failures the caller caused (bad configuration, unknown
//! metadata URL, issuer conflicts) from failures inside the engine or its transport.
//! It knows nothing about the caller-facing taxonomy; the resolver's classifier maps
//! these onto [`InboundError`](crate::InboundError).

/// Error codes emitted by engines in this crate.
pub mod codes {
    /// The manual configuration is incomplete or inconsistent
    pub const INVALID_CONFIGURATION: &str = "SAML2-60001";
    /// Another service provider already owns the issuer
    pub const ISSUER_CONFLICT: &str = "SAML2-60002";
    /// The metadata document lacks required elements
    pub const INVALID_METADATA: &str = "SAML2-60003";
    /// Nothing is published at the metadata URL
    pub const METADATA_URL_NOT_FOUND: &str = "SAML2-60004";
    /// No service provider is registered under the issuer being updated
    pub const ISSUER_NOT_FOUND: &str = "SAML2-60005";
    /// The metadata blob is not valid base64 or not UTF-8
    pub const METADATA_DECODE_FAILED: &str = "SAML2-65001";
    /// The metadata URL could not be reached
    pub const METADATA_FETCH_FAILED: &str = "SAML2-65002";
    /// The random integer source failed
    pub const RANDOM_GENERATION_FAILED: &str = "SAML2-65003";
    /// Persisting or reading a record failed
    pub const STORAGE_FAILURE: &str = "SAML2-65004";
}

/// Failure reported by a SAML engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Caused by the request
    #[error("SAML engine client error {code}: {message}")]
    Client {
        code: String,
        message: String,
        description: Option<String>,
    },

    /// Caused by the engine or its transport
    #[error("SAML engine server error {code}: {message}")]
    Server {
        code: String,
        message: String,
        description: Option<String>,
    },
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    pub fn client(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Client {
            code: code.into(),
            message: message.into(),
            description: None,
        }
    }

    pub fn server(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Server {
            code: code.into(),
            message: message.into(),
            description: None,
        }
    }

    /// Attach a longer description.
    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        match &mut self {
            Self::Client { description, .. } | Self::Server { description, .. } => {
                *description = Some(text.into());
            }
        }
        self
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Client { code, .. } | Self::Server { code, .. } => code,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Client { message, .. } | Self::Server { message, .. } => message,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Client { description, .. } | Self::Server { description, .. } => {
                description.as_deref()
            }
        }
    }

    pub fn is_client(&self) -> bool {
        matches!(self, Self::Client { .. })
    }
}
