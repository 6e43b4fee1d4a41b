//! SAML2 inbound configuration resolver.
//!
//! The resolver turns a [`RequestedSamlConfig`] into exactly one engine call and
//! folds the engine's answer back into the owning [`Application`]. It holds no
//! state of its own; all records live in the [`SamlEngine`].
//!
//! # Module Organization
//!
//! * [`binding_policy`] - mandatory binding rule for manual configurations
//! * [`classifier`] - engine failure to caller error mapping
//! * [`convert`] - stored record to request shape
//!
//! # Flow of `put_config`
//!
//! 1. Reject requested bindings that drop `HTTP_POST` or `HTTP_REDIRECT`
//! 2. Pick create or update from the application's current SAML2 issuer
//! 3. Pick the configuration source: metadata file, then metadata URL, then manual
//! 4. Call the matching engine operation
//! 5. Copy the returned certificate onto the application
//! 6. Build the inbound record, attaching the attribute consuming service index
//! 7. Replace the application's SAML2 inbound record with it
//!
//! # Example Usage
//!
//! ```rust
//! use saml_inbound::engine::InMemorySamlEngine;
//! use saml_inbound::model::{Application, ManualConfiguration, RequestedSamlConfig};
//! use saml_inbound::{InboundResolver, RequestContext};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = InboundResolver::new(InMemorySamlEngine::new());
//! let context = RequestContext::for_tenant("example.com");
//! let mut application = Application::new("app-1", "Travelocity");
//!
//! let requested = RequestedSamlConfig::from_manual(
//!     ManualConfiguration::new("travelocity.com")
//!         .with_assertion_consumer_url("https://travelocity.com/acs"),
//! );
//! let inbound = resolver
//!     .put_config(&mut application, &requested, &context)
//!     .await?;
//! assert_eq!(inbound.auth_key, "travelocity.com");
//!
//! let stored = resolver.fetch_config(&inbound, &context).await?;
//! assert!(stored.is_some());
//! # Ok(())
//! # }
//! ```

pub mod binding_policy;
pub mod classifier;
pub mod convert;

pub use binding_policy::{validate_bindings, validate_requested_bindings};
pub use classifier::{classify, classify_as_server};
pub use convert::to_requested_config;

use crate::config::ResolverConfig;
use crate::context::RequestContext;
use crate::engine::{EngineResult, SamlEngine};
use crate::error::{ErrorMessage, InboundError, InboundResult};
use crate::model::{
    ATTRIBUTE_CONSUMING_SERVICE_INDEX, Application, Certificate, CertificateType, ConfigSource,
    InboundAuthRecord, RequestedSamlConfig, SAML2_PROTOCOL, ServiceProviderRecord,
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use log::{debug, info, trace, warn};

/// Resolves SAML2 inbound configuration requests against a [`SamlEngine`].
#[derive(Debug, Clone)]
pub struct InboundResolver<E: SamlEngine> {
    engine: E,
    config: ResolverConfig,
}

impl<E: SamlEngine> InboundResolver<E> {
    /// Create a resolver with the default configuration.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            config: ResolverConfig::default(),
        }
    }

    /// Create a resolver with an explicit configuration.
    ///
    /// Fails with a server error if the configuration does not validate.
    pub fn with_config(engine: E, config: ResolverConfig) -> InboundResult<Self> {
        config.validate()?;
        Ok(Self { engine, config })
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Create or update the SAML2 configuration of `application`.
    ///
    /// The operation is an update when the application already carries a SAML2
    /// inbound record, and a create otherwise. On success the application's
    /// certificate reflects the stored service provider and its SAML2 inbound record
    /// is replaced by the returned one. No engine call is made when the request fails
    /// validation, and the application is untouched when the engine call fails.
    pub async fn put_config(
        &self,
        application: &mut Application,
        requested: &RequestedSamlConfig,
        context: &RequestContext,
    ) -> InboundResult<InboundAuthRecord> {
        let context = self.scoped(context);
        validate_requested_bindings(requested)?;

        let current_issuer = application.inbound_key(SAML2_PROTOCOL).map(str::to_string);
        let source = requested
            .source()
            .ok_or_else(|| InboundError::from(ErrorMessage::MissingConfigurationSource))?;

        let populated = requested.populated_sources();
        if populated.len() > 1 {
            debug!(
                "Using {} for application '{}'; ignoring {:?} (request: '{}')",
                source.kind(),
                application.id,
                &populated[1..],
                context.request_id
            );
        }

        let result = match current_issuer.as_deref() {
            Some(issuer) => {
                info!(
                    "Updating SAML2 service provider '{}' from {} for tenant '{}' (request: '{}')",
                    issuer,
                    source.kind(),
                    self.tenant(&context),
                    context.request_id
                );
                self.update(source, issuer, &context).await
            }
            None => {
                info!(
                    "Creating SAML2 service provider from {} for tenant '{}' (request: '{}')",
                    source.kind(),
                    self.tenant(&context),
                    context.request_id
                );
                self.create(source, &context).await
            }
        };
        let record = result.map_err(|e| {
            let error = classify(&e);
            warn!(
                "SAML engine rejected configuration for application '{}': {} (request: '{}')",
                application.id, e, context.request_id
            );
            error
        })?;
        trace!("Stored service provider: {:?}", record);

        if self.config.propagate_certificate && record.has_certificate() {
            if let Some(certificate) = record.certificate.as_deref() {
                application.certificate = Some(Certificate {
                    certificate_type: CertificateType::Pem,
                    value: STANDARD.encode(certificate.as_bytes()),
                });
            }
        }

        let mut inbound = InboundAuthRecord::saml2(record.issuer.clone());
        if record.attribute_profile_enabled {
            if let Some(index) = self.attribute_index(source, &record, &context) {
                inbound = inbound.with_property(ATTRIBUTE_CONSUMING_SERVICE_INDEX, index);
            }
        }

        debug!(
            "Resolved SAML2 inbound '{}' for application '{}'",
            inbound.auth_key, application.id
        );
        application.upsert_inbound(inbound.clone());
        Ok(inbound)
    }

    /// Read the configuration behind `inbound`.
    ///
    /// Returns `Ok(None)` when the engine has no record for the issuer.
    pub async fn fetch_config(
        &self,
        inbound: &InboundAuthRecord,
        context: &RequestContext,
    ) -> InboundResult<Option<RequestedSamlConfig>> {
        Self::ensure_saml2(inbound)?;
        let context = self.scoped(context);

        let record = self
            .engine
            .get_by_issuer(&inbound.auth_key, &context)
            .await
            .map_err(|e| {
                warn!(
                    "Failed to read SAML2 service provider '{}': {} (request: '{}')",
                    inbound.auth_key, e, context.request_id
                );
                classify(&e)
            })?;

        match record {
            Some(record) => Ok(Some(to_requested_config(&record))),
            None => {
                debug!(
                    "No SAML2 service provider '{}' in tenant '{}'",
                    inbound.auth_key,
                    self.tenant(&context)
                );
                Ok(None)
            }
        }
    }

    /// Remove the service provider behind `inbound` from the engine.
    ///
    /// Any engine failure is reported as a server error.
    pub async fn delete_config(
        &self,
        inbound: &InboundAuthRecord,
        context: &RequestContext,
    ) -> InboundResult<()> {
        Self::ensure_saml2(inbound)?;
        let context = self.scoped(context);

        info!(
            "Deleting SAML2 service provider '{}' for tenant '{}' (request: '{}')",
            inbound.auth_key,
            self.tenant(&context),
            context.request_id
        );
        self.engine
            .remove_by_issuer(&inbound.auth_key, &context)
            .await
            .map_err(|e| {
                warn!(
                    "Failed to delete SAML2 service provider '{}': {} (request: '{}')",
                    inbound.auth_key, e, context.request_id
                );
                classify_as_server(&e)
            })
    }

    /// Delete the application's SAML2 service provider and drop its inbound record.
    ///
    /// Returns the removed record, or `None` if the application had no SAML2 inbound.
    /// The application is left untouched when the engine delete fails.
    pub async fn remove_from_application(
        &self,
        application: &mut Application,
        context: &RequestContext,
    ) -> InboundResult<Option<InboundAuthRecord>> {
        let Some(inbound) = application.inbound(SAML2_PROTOCOL).cloned() else {
            return Ok(None);
        };
        self.delete_config(&inbound, context).await?;
        Ok(application.remove_inbound(SAML2_PROTOCOL))
    }

    async fn create(
        &self,
        source: ConfigSource<'_>,
        context: &RequestContext,
    ) -> EngineResult<ServiceProviderRecord> {
        match source {
            ConfigSource::MetadataFile(file) => {
                self.engine.create_with_metadata_file(file, context).await
            }
            ConfigSource::MetadataUrl(url) => {
                self.engine.create_with_metadata_url(url, context).await
            }
            ConfigSource::Manual(config) => {
                self.engine.create_with_manual_config(config, context).await
            }
        }
    }

    async fn update(
        &self,
        source: ConfigSource<'_>,
        current_issuer: &str,
        context: &RequestContext,
    ) -> EngineResult<ServiceProviderRecord> {
        match source {
            ConfigSource::MetadataFile(file) => {
                self.engine
                    .update_with_metadata_file(file, current_issuer, context)
                    .await
            }
            ConfigSource::MetadataUrl(url) => {
                self.engine
                    .update_with_metadata_url(url, current_issuer, context)
                    .await
            }
            ConfigSource::Manual(config) => {
                self.engine
                    .update_with_manual_config(config, current_issuer, context)
                    .await
            }
        }
    }

    /// Caller index, then stored index, then a generated one.
    ///
    /// Only a manual source carries a caller index. Generation failures are logged
    /// and leave the index out.
    fn attribute_index(
        &self,
        source: ConfigSource<'_>,
        record: &ServiceProviderRecord,
        context: &RequestContext,
    ) -> Option<String> {
        let supplied = source
            .attribute_index()
            .filter(|index| !index.trim().is_empty())
            .or_else(|| record.attribute_index());
        if let Some(index) = supplied {
            return Some(index.to_string());
        }
        if !self.config.generate_attribute_index {
            return None;
        }

        match self.engine.random_integer() {
            Ok(value) => Some(value.to_string()),
            Err(e) => {
                let error = classify(&e);
                warn!(
                    "Omitting attribute consuming service index for '{}': {} (request: '{}')",
                    record.issuer, error, context.request_id
                );
                None
            }
        }
    }

    /// Copy of `context` with the tenant made explicit.
    fn scoped(&self, context: &RequestContext) -> RequestContext {
        RequestContext {
            request_id: context.request_id.clone(),
            tenant_domain: Some(self.tenant(context).to_string()),
        }
    }

    fn tenant<'a>(&'a self, context: &'a RequestContext) -> &'a str {
        context.effective_tenant(&self.config.default_tenant_domain)
    }

    fn ensure_saml2(inbound: &InboundAuthRecord) -> InboundResult<()> {
        if inbound.is_saml2() {
            return Ok(());
        }
        let entry = ErrorMessage::UnsupportedProtocol;
        Err(InboundError::client(
            entry.code(),
            entry.message(),
            Some(format!(
                "{} Received: {}.",
                entry.description(),
                inbound.protocol
            )),
        ))
    }
}
