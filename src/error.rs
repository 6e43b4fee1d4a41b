//! Error types for SAML2 inbound configuration operations.
//!
//! Every operation exposed by the [`InboundResolver`](crate::InboundResolver) returns
//! an [`InboundResult`], whose error side is one of three caller-facing categories:
//!
//! - [`InboundError::Client`] - the request itself is malformed or contradictory
//! - [`InboundError::NotFound`] - a referenced external endpoint or resource is absent
//! - [`InboundError::Server`] - the engine failed internally or could not be reached
//!
//! Each category carries the code, message and optional description supplied by
//! whoever detected the failure. Errors raised by the resolver itself use the
//! [`ErrorMessage`] catalogue; errors raised by the engine keep the engine's code.

/// Prefix applied to every code in the [`ErrorMessage`] catalogue.
pub const ERROR_CODE_PREFIX: &str = "SAML-";

/// Caller-facing error for SAML2 inbound operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InboundError {
    /// Malformed or contradictory caller input
    #[error("{code} | {message}")]
    Client {
        code: String,
        message: String,
        description: Option<String>,
    },

    /// A referenced endpoint or resource does not exist
    #[error("{code} | {message}")]
    NotFound {
        code: String,
        message: String,
        description: Option<String>,
    },

    /// Engine-internal or transport failure
    #[error("{code} | {message}")]
    Server {
        code: String,
        message: String,
        description: Option<String>,
    },
}

/// Result alias used throughout the crate.
pub type InboundResult<T> = Result<T, InboundError>;

impl InboundError {
    /// Create a client error from explicit parts.
    pub fn client(
        code: impl Into<String>,
        message: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self::Client {
            code: code.into(),
            message: message.into(),
            description,
        }
    }

    /// Create a not-found error from explicit parts.
    pub fn not_found(
        code: impl Into<String>,
        message: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self::NotFound {
            code: code.into(),
            message: message.into(),
            description,
        }
    }

    /// Create a server error from explicit parts.
    pub fn server(
        code: impl Into<String>,
        message: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self::Server {
            code: code.into(),
            message: message.into(),
            description,
        }
    }

    /// Create an error from a catalogue entry, choosing the category the entry belongs to.
    pub fn from_catalogue(entry: ErrorMessage) -> Self {
        let code = entry.code();
        let message = entry.message().to_string();
        let description = Some(entry.description().to_string());
        if entry.is_client_error() {
            Self::Client {
                code,
                message,
                description,
            }
        } else {
            Self::Server {
                code,
                message,
                description,
            }
        }
    }

    /// The error code.
    pub fn code(&self) -> &str {
        match self {
            Self::Client { code, .. } | Self::NotFound { code, .. } | Self::Server { code, .. } => {
                code
            }
        }
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        match self {
            Self::Client { message, .. }
            | Self::NotFound { message, .. }
            | Self::Server { message, .. } => message,
        }
    }

    /// The optional longer description.
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Client { description, .. }
            | Self::NotFound { description, .. }
            | Self::Server { description, .. } => description.as_deref(),
        }
    }

    /// Conventional HTTP status for this category.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Client { .. } => 400,
            Self::NotFound { .. } => 404,
            Self::Server { .. } => 500,
        }
    }

    /// Check if this is a client error.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Client { .. })
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Server { .. })
    }
}

impl From<ErrorMessage> for InboundError {
    fn from(entry: ErrorMessage) -> Self {
        Self::from_catalogue(entry)
    }
}

/// Error conditions detected by the resolver itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorMessage {
    // Client errors.
    InvalidBindings,
    MissingConfigurationSource,
    UnsupportedProtocol,

    // Server errors.
    InvalidConfiguration,
}

impl ErrorMessage {
    /// Prefixed error code.
    pub fn code(&self) -> String {
        let code = match self {
            Self::InvalidBindings => "60001",
            Self::MissingConfigurationSource => "60002",
            Self::UnsupportedProtocol => "60003",
            Self::InvalidConfiguration => "65001",
        };
        format!("{}{}", ERROR_CODE_PREFIX, code)
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidBindings => "Invalid SAML2 binding configuration.",
            Self::MissingConfigurationSource => "Invalid SAML2 inbound configuration.",
            Self::UnsupportedProtocol => "Unsupported inbound protocol.",
            Self::InvalidConfiguration => "Invalid resolver configuration.",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::InvalidBindings => {
                "HTTP_POST and HTTP_REDIRECT bindings are mandatory and cannot be disabled."
            }
            Self::MissingConfigurationSource => {
                "One of metadataFile, metadataURL, manualConfig must be present."
            }
            Self::UnsupportedProtocol => "Only the SAML2 inbound protocol is handled here.",
            Self::InvalidConfiguration => "The resolver configuration failed validation.",
        }
    }

    fn is_client_error(&self) -> bool {
        !matches!(self, Self::InvalidConfiguration)
    }
}

/// Errors raised while loading or validating a [`ResolverConfig`](crate::ResolverConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configuration value is out of range or empty
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    /// The configuration document could not be parsed
    #[error("Configuration parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Create an invalid configuration error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

impl From<ConfigError> for InboundError {
    fn from(error: ConfigError) -> Self {
        let entry = ErrorMessage::InvalidConfiguration;
        Self::server(entry.code(), entry.message(), Some(error.to_string()))
    }
}
