//! SAML2 inbound authentication configuration for identity provider applications.
//!
//! Creates, updates, reads and deletes the SAML2 trust relationship between an
//! application and the identity provider. Records are owned by a pluggable SAML
//! engine; this crate decides which engine operation a request maps to, enforces the
//! binding policy, and reports engine failures as client, not-found or server errors.
//!
//! # Core Components
//!
//! - [`InboundResolver`] - create/update/read/delete of an application's SAML2 inbound
//! - [`SamlEngine`] - Trait for the engine that owns service provider records
//! - [`InMemorySamlEngine`] - Thread-safe in-memory engine
//! - [`InboundError`] - Caller-facing error categories
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use saml_inbound::{InMemorySamlEngine, InboundResolver, RequestContext};
//! use saml_inbound::model::{Application, RequestedSamlConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = InboundResolver::new(InMemorySamlEngine::new());
//! let mut application = Application::new("app-1", "Travelocity");
//! let requested = RequestedSamlConfig::from_metadata_url("https://travelocity.com/metadata");
//!
//! let inbound = resolver
//!     .put_config(&mut application, &requested, &RequestContext::with_generated_id())
//!     .await?;
//! println!("Registered issuer {}", inbound.auth_key);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod model;
pub mod resolver;

// Re-export commonly used types for convenience
pub use config::{DEFAULT_TENANT_DOMAIN, ResolverConfig};
pub use context::RequestContext;
pub use engine::{EngineError, EngineResult, InMemorySamlEngine, SamlEngine};
pub use error::{ConfigError, ErrorMessage, InboundError, InboundResult};
pub use resolver::{InboundResolver, classify, validate_bindings};
