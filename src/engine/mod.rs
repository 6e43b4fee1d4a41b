//! SAML engine abstraction.
//!
//! The engine owns service provider records: it validates them, persists them keyed by
//! issuer within a tenant, parses metadata documents and fetches metadata URLs. The
//! resolver layer decides *which* engine operation to call; the engine decides how
//! to carry it out.
//!
//! # Architecture
//!
//! The engine is responsible for:
//! - Validating and persisting service provider records
//! - Issuer uniqueness within a tenant
//! - Decoding and interpreting metadata documents
//! - Fetching metadata from URLs
//!
//! The engine is NOT responsible for:
//! - Choosing between create and update
//! - Source precedence or binding policy
//! - Caller-facing error categories
//!
//! # Example Usage
//!
//! ```rust
//! use saml_inbound::engine::{InMemorySamlEngine, SamlEngine};
//! use saml_inbound::model::ManualConfiguration;
//! use saml_inbound::RequestContext;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = InMemorySamlEngine::new();
//! let context = RequestContext::with_generated_id();
//!
//! let config = ManualConfiguration::new("travelocity.com")
//!     .with_assertion_consumer_url("https://travelocity.com/acs");
//! let record = engine.create_with_manual_config(&config, &context).await?;
//! assert_eq!(record.issuer, "travelocity.com");
//!
//! let found = engine.get_by_issuer("travelocity.com", &context).await?;
//! assert!(found.is_some());
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod in_memory;
pub mod metadata;

pub use errors::{EngineError, EngineResult, codes};
pub use in_memory::{InMemoryEngineStats, InMemorySamlEngine};

use crate::context::RequestContext;
use crate::model::{ManualConfiguration, ServiceProviderRecord};
use std::future::Future;

/// Operations the resolver needs from a SAML engine.
///
/// Every write returns the record as stored, so callers never need a follow-up read.
/// Tenant scoping comes from [`RequestContext::tenant_domain`].
pub trait SamlEngine: Send + Sync {
    /// Create a service provider from inline configuration.
    fn create_with_manual_config(
        &self,
        config: &ManualConfiguration,
        context: &RequestContext,
    ) -> impl Future<Output = EngineResult<ServiceProviderRecord>> + Send;

    /// Create a service provider from a base64-encoded metadata document.
    fn create_with_metadata_file(
        &self,
        metadata_file: &str,
        context: &RequestContext,
    ) -> impl Future<Output = EngineResult<ServiceProviderRecord>> + Send;

    /// Create a service provider from metadata published at `url`.
    fn create_with_metadata_url(
        &self,
        url: &str,
        context: &RequestContext,
    ) -> impl Future<Output = EngineResult<ServiceProviderRecord>> + Send;

    /// Replace the service provider registered as `current_issuer`.
    ///
    /// The new configuration may carry a different issuer.
    fn update_with_manual_config(
        &self,
        config: &ManualConfiguration,
        current_issuer: &str,
        context: &RequestContext,
    ) -> impl Future<Output = EngineResult<ServiceProviderRecord>> + Send;

    fn update_with_metadata_file(
        &self,
        metadata_file: &str,
        current_issuer: &str,
        context: &RequestContext,
    ) -> impl Future<Output = EngineResult<ServiceProviderRecord>> + Send;

    fn update_with_metadata_url(
        &self,
        url: &str,
        current_issuer: &str,
        context: &RequestContext,
    ) -> impl Future<Output = EngineResult<ServiceProviderRecord>> + Send;

    /// Read a record by issuer. `None` if no such service provider exists.
    fn get_by_issuer(
        &self,
        issuer: &str,
        context: &RequestContext,
    ) -> impl Future<Output = EngineResult<Option<ServiceProviderRecord>>> + Send;

    /// Remove a record by issuer.
    fn remove_by_issuer(
        &self,
        issuer: &str,
        context: &RequestContext,
    ) -> impl Future<Output = EngineResult<()>> + Send;

    /// Generate a positive random integer.
    fn random_integer(&self) -> EngineResult<u32>;
}
