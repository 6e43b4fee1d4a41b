//! In-memory SAML engine.
//!
//! A thread-safe [`SamlEngine`] that keeps service provider records in a
//! `tenant_domain → issuer → record` map guarded by tokio's `RwLock`. Metadata URLs are
//! resolved against a local registry instead of the network, which makes the engine
//! suitable for tests, the validator binary and benchmarks.
//!
//! # Example Usage
//!
//! ```rust
//! use saml_inbound::engine::{InMemorySamlEngine, SamlEngine};
//! use saml_inbound::RequestContext;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = InMemorySamlEngine::new();
//! engine
//!     .publish_metadata(
//!         "https://sp.example.com/metadata",
//!         r#"<EntityDescriptor entityID="sp.example.com">
//!              <AssertionConsumerService Location="https://sp.example.com/acs"/>
//!            </EntityDescriptor>"#,
//!     )
//!     .await;
//!
//! let context = RequestContext::for_tenant("example.com");
//! let record = engine
//!     .create_with_metadata_url("https://sp.example.com/metadata", &context)
//!     .await?;
//! assert_eq!(record.issuer, "sp.example.com");
//! # Ok(())
//! # }
//! ```

use crate::config::DEFAULT_TENANT_DOMAIN;
use crate::context::RequestContext;
use crate::engine::errors::{EngineError, EngineResult, codes};
use crate::engine::metadata::{decode_metadata_file, parse_service_provider};
use crate::engine::SamlEngine;
use crate::model::{ManualConfiguration, ServiceProviderRecord};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::Utc;
use log::{debug, trace};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone)]
enum PublishedMetadata {
    Document(String),
    Unreachable,
}

/// Thread-safe in-memory SAML engine.
///
/// Clones share the same underlying state.
#[derive(Debug, Clone)]
pub struct InMemorySamlEngine {
    // Structure: tenant_domain -> issuer -> record
    data: Arc<RwLock<HashMap<String, HashMap<String, ServiceProviderRecord>>>>,
    published: Arc<RwLock<HashMap<String, PublishedMetadata>>>,
}

impl InMemorySamlEngine {
    /// Create an engine with no records and no published metadata.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
            published: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Serve `xml` as the metadata document at `url`.
    pub async fn publish_metadata(&self, url: impl Into<String>, xml: impl Into<String>) {
        let mut published = self.published.write().await;
        published.insert(url.into(), PublishedMetadata::Document(xml.into()));
    }

    /// Make every fetch of `url` fail as a transport error.
    pub async fn mark_unreachable(&self, url: impl Into<String>) {
        let mut published = self.published.write().await;
        published.insert(url.into(), PublishedMetadata::Unreachable);
    }

    /// Get engine statistics for debugging and monitoring.
    pub async fn stats(&self) -> InMemoryEngineStats {
        let data_guard = self.data.read().await;
        let published_guard = self.published.read().await;

        InMemoryEngineStats {
            tenant_count: data_guard.len(),
            total_records: data_guard.values().map(HashMap::len).sum(),
            published_documents: published_guard
                .values()
                .filter(|entry| matches!(entry, PublishedMetadata::Document(_)))
                .count(),
        }
    }

    /// Clear all records and published metadata (useful for testing).
    pub async fn clear(&self) {
        self.data.write().await.clear();
        self.published.write().await.clear();
    }

    fn tenant_key(context: &RequestContext) -> String {
        context.effective_tenant(DEFAULT_TENANT_DOMAIN).to_string()
    }

    fn record_from_manual(config: &ManualConfiguration) -> EngineResult<ServiceProviderRecord> {
        if config.issuer.trim().is_empty() {
            return Err(EngineError::client(
                codes::INVALID_CONFIGURATION,
                "Issuer is required.",
            ));
        }
        if config.assertion_consumer_urls.is_empty() {
            return Err(EngineError::client(
                codes::INVALID_CONFIGURATION,
                "At least one assertion consumer URL is required.",
            )
            .with_description(format!("No assertion consumer URL for {}.", config.issuer)));
        }
        if let Some(default_url) = &config.default_assertion_consumer_url {
            if !config.assertion_consumer_urls.contains(default_url) {
                return Err(EngineError::client(
                    codes::INVALID_CONFIGURATION,
                    "Default assertion consumer URL is not one of the assertion consumer URLs.",
                )
                .with_description(default_url.clone()));
            }
        }

        let mut record = ServiceProviderRecord::new(config.issuer.clone());
        record.issuer_qualifier = config.service_provider_qualifier.clone();
        record.assertion_consumer_urls = config.assertion_consumer_urls.clone();
        record.default_assertion_consumer_url = config
            .default_assertion_consumer_url
            .clone()
            .or_else(|| config.assertion_consumer_urls.first().cloned());
        record.idp_entity_id_alias = config.idp_entity_id_alias.clone();
        record.certificate = config
            .certificate
            .clone()
            .filter(|certificate| !certificate.trim().is_empty());

        if let Some(profile) = &config.single_sign_on_profile {
            if let Some(bindings) = &profile.bindings {
                if !bindings.keeps_mandatory() {
                    return Err(EngineError::client(
                        codes::INVALID_CONFIGURATION,
                        "HTTP_POST and HTTP_REDIRECT bindings are mandatory.",
                    )
                    .with_description(format!("Requested bindings: {}.", bindings)));
                }
                record.bindings = bindings.clone();
            }
            record.signature_validation_for_artifact_binding =
                profile.enable_signature_validation_for_artifact_binding;
            record.idp_initiated_sso_enabled = profile.enable_idp_initiated_single_sign_on;
            record.attribute_consuming_service_index =
                profile.attribute_consuming_service_index.clone();
        }
        if let Some(profile) = &config.attribute_profile {
            record.attribute_profile_enabled = profile.enabled;
            record.always_include_attributes = profile.always_include_attributes_in_response;
        }
        if let Some(profile) = &config.single_logout_profile {
            record.single_logout_enabled = profile.enabled;
            record.slo_request_url = profile.logout_request_url.clone();
            record.slo_response_url = profile.logout_response_url.clone();
        }
        Ok(record)
    }

    fn record_from_metadata_file(metadata_file: &str) -> EngineResult<ServiceProviderRecord> {
        let xml = decode_metadata_file(metadata_file)?;
        parse_service_provider(&xml)
    }

    async fn fetch_metadata(&self, url: &str) -> EngineResult<ServiceProviderRecord> {
        let entry = self.published.read().await.get(url).cloned();
        match entry {
            Some(PublishedMetadata::Document(xml)) => {
                trace!("Fetched {} bytes of metadata from {}", xml.len(), url);
                parse_service_provider(&xml)
            }
            Some(PublishedMetadata::Unreachable) => Err(EngineError::server(
                codes::METADATA_FETCH_FAILED,
                "Error fetching metadata from URL.",
            )
            .with_description(format!("Connection to {} failed.", url))),
            None => Err(EngineError::client(
                codes::METADATA_URL_NOT_FOUND,
                "Metadata URL not found.",
            )
            .with_description(format!("Nothing is published at {}.", url))),
        }
    }

    fn with_thumbprint(mut record: ServiceProviderRecord) -> ServiceProviderRecord {
        record.certificate_thumbprint = record
            .certificate
            .as_deref()
            .map(|certificate| STANDARD.encode(Sha256::digest(certificate.as_bytes())));
        record
    }

    async fn insert(
        &self,
        record: ServiceProviderRecord,
        context: &RequestContext,
    ) -> EngineResult<ServiceProviderRecord> {
        let tenant = Self::tenant_key(context);
        let record = Self::with_thumbprint(record);

        let mut data_guard = self.data.write().await;
        let tenant_data = data_guard.entry(tenant.clone()).or_default();
        if tenant_data.contains_key(&record.issuer) {
            return Err(EngineError::client(
                codes::ISSUER_CONFLICT,
                "Service provider already exists.",
            )
            .with_description(format!(
                "Issuer {} is already registered in tenant {}.",
                record.issuer, tenant
            )));
        }

        tenant_data.insert(record.issuer.clone(), record.clone());
        debug!("Stored service provider '{}' in tenant '{}'", record.issuer, tenant);
        Ok(record)
    }

    async fn replace(
        &self,
        mut record: ServiceProviderRecord,
        current_issuer: &str,
        context: &RequestContext,
    ) -> EngineResult<ServiceProviderRecord> {
        let tenant = Self::tenant_key(context);

        let mut data_guard = self.data.write().await;
        let Some(tenant_data) = data_guard
            .get_mut(&tenant)
            .filter(|tenant_data| tenant_data.contains_key(current_issuer))
        else {
            return Err(EngineError::client(
                codes::ISSUER_NOT_FOUND,
                "Service provider not found.",
            )
            .with_description(format!(
                "Issuer {} is not registered in tenant {}.",
                current_issuer, tenant
            )));
        };
        if record.issuer != current_issuer && tenant_data.contains_key(&record.issuer) {
            return Err(EngineError::client(
                codes::ISSUER_CONFLICT,
                "Service provider already exists.",
            )
            .with_description(format!(
                "Issuer {} is already registered in tenant {}.",
                record.issuer, tenant
            )));
        }

        if let Some(existing) = tenant_data.remove(current_issuer) {
            record.created_at = existing.created_at;
        }
        record.last_modified = Utc::now();
        let record = Self::with_thumbprint(record);

        tenant_data.insert(record.issuer.clone(), record.clone());
        debug!(
            "Replaced service provider '{}' with '{}' in tenant '{}'",
            current_issuer, record.issuer, tenant
        );
        Ok(record)
    }
}

impl Default for InMemorySamlEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SamlEngine for InMemorySamlEngine {
    async fn create_with_manual_config(
        &self,
        config: &ManualConfiguration,
        context: &RequestContext,
    ) -> EngineResult<ServiceProviderRecord> {
        let record = Self::record_from_manual(config)?;
        self.insert(record, context).await
    }

    async fn create_with_metadata_file(
        &self,
        metadata_file: &str,
        context: &RequestContext,
    ) -> EngineResult<ServiceProviderRecord> {
        let record = Self::record_from_metadata_file(metadata_file)?;
        self.insert(record, context).await
    }

    async fn create_with_metadata_url(
        &self,
        url: &str,
        context: &RequestContext,
    ) -> EngineResult<ServiceProviderRecord> {
        let record = self.fetch_metadata(url).await?;
        self.insert(record, context).await
    }

    async fn update_with_manual_config(
        &self,
        config: &ManualConfiguration,
        current_issuer: &str,
        context: &RequestContext,
    ) -> EngineResult<ServiceProviderRecord> {
        let record = Self::record_from_manual(config)?;
        self.replace(record, current_issuer, context).await
    }

    async fn update_with_metadata_file(
        &self,
        metadata_file: &str,
        current_issuer: &str,
        context: &RequestContext,
    ) -> EngineResult<ServiceProviderRecord> {
        let record = Self::record_from_metadata_file(metadata_file)?;
        self.replace(record, current_issuer, context).await
    }

    async fn update_with_metadata_url(
        &self,
        url: &str,
        current_issuer: &str,
        context: &RequestContext,
    ) -> EngineResult<ServiceProviderRecord> {
        let record = self.fetch_metadata(url).await?;
        self.replace(record, current_issuer, context).await
    }

    async fn get_by_issuer(
        &self,
        issuer: &str,
        context: &RequestContext,
    ) -> EngineResult<Option<ServiceProviderRecord>> {
        let tenant = Self::tenant_key(context);
        let data_guard = self.data.read().await;
        Ok(data_guard
            .get(&tenant)
            .and_then(|tenant_data| tenant_data.get(issuer))
            .cloned())
    }

    async fn remove_by_issuer(&self, issuer: &str, context: &RequestContext) -> EngineResult<()> {
        let tenant = Self::tenant_key(context);
        let mut data_guard = self.data.write().await;

        let removed = data_guard
            .get_mut(&tenant)
            .and_then(|tenant_data| tenant_data.remove(issuer))
            .is_some();
        // Clean up empty tenant maps
        if data_guard.get(&tenant).is_some_and(HashMap::is_empty) {
            data_guard.remove(&tenant);
        }

        debug!(
            "Remove of service provider '{}' in tenant '{}' (existed: {})",
            issuer, tenant, removed
        );
        Ok(())
    }

    fn random_integer(&self) -> EngineResult<u32> {
        let bytes = Uuid::new_v4().into_bytes();
        let value = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) & 0x7fff_ffff;
        Ok(value.max(1))
    }
}

/// Statistics about in-memory engine usage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryEngineStats {
    pub tenant_count: usize,
    pub total_records: usize,
    pub published_documents: usize,
}
