//! Shared test utilities for SAML2 inbound integration tests.
//!
//! - [`RecordingEngine`] wraps the in-memory engine and records every call, so tests
//!   can assert which engine operation a request was routed to
//! - [`fixtures`] holds metadata documents and request builders

#![allow(dead_code)]

pub mod fixtures;

use saml_inbound::engine::{EngineError, EngineResult, InMemorySamlEngine, SamlEngine};
use saml_inbound::model::{ManualConfiguration, ServiceProviderRecord};
use saml_inbound::{InboundResolver, RequestContext};
use std::sync::{Arc, Mutex};

/// Install `env_logger` once per test binary; `RUST_LOG` controls verbosity.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// An engine operation as observed by [`RecordingEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    CreateWithManualConfig { issuer: String },
    CreateWithMetadataFile,
    CreateWithMetadataUrl { url: String },
    UpdateWithManualConfig { issuer: String, current_issuer: String },
    UpdateWithMetadataFile { current_issuer: String },
    UpdateWithMetadataUrl { url: String, current_issuer: String },
    GetByIssuer { issuer: String },
    RemoveByIssuer { issuer: String },
    RandomInteger,
}

impl EngineCall {
    pub fn is_create(&self) -> bool {
        matches!(
            self,
            Self::CreateWithManualConfig { .. }
                | Self::CreateWithMetadataFile
                | Self::CreateWithMetadataUrl { .. }
        )
    }

    pub fn is_update(&self) -> bool {
        matches!(
            self,
            Self::UpdateWithManualConfig { .. }
                | Self::UpdateWithMetadataFile { .. }
                | Self::UpdateWithMetadataUrl { .. }
        )
    }
}

/// In-memory engine that records calls and can be told to fail.
#[derive(Debug, Clone, Default)]
pub struct RecordingEngine {
    inner: InMemorySamlEngine,
    calls: Arc<Mutex<Vec<EngineCall>>>,
    random_failure: Option<EngineError>,
    remove_failure: Option<EngineError>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `random_integer` call fail with `error`.
    pub fn failing_random_integer(mut self, error: EngineError) -> Self {
        self.random_failure = Some(error);
        self
    }

    /// Make every `remove_by_issuer` call fail with `error`.
    pub fn failing_remove(mut self, error: EngineError) -> Self {
        self.remove_failure = Some(error);
        self
    }

    /// The wrapped engine, for seeding and inspection.
    pub fn inner(&self) -> &InMemorySamlEngine {
        &self.inner
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls excluding reads and random number generation.
    pub fn writes(&self) -> Vec<EngineCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.is_create() || call.is_update())
            .collect()
    }

    pub fn reset(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: EngineCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl SamlEngine for RecordingEngine {
    async fn create_with_manual_config(
        &self,
        config: &ManualConfiguration,
        context: &RequestContext,
    ) -> EngineResult<ServiceProviderRecord> {
        self.record(EngineCall::CreateWithManualConfig {
            issuer: config.issuer.clone(),
        });
        self.inner.create_with_manual_config(config, context).await
    }

    async fn create_with_metadata_file(
        &self,
        metadata_file: &str,
        context: &RequestContext,
    ) -> EngineResult<ServiceProviderRecord> {
        self.record(EngineCall::CreateWithMetadataFile);
        self.inner
            .create_with_metadata_file(metadata_file, context)
            .await
    }

    async fn create_with_metadata_url(
        &self,
        url: &str,
        context: &RequestContext,
    ) -> EngineResult<ServiceProviderRecord> {
        self.record(EngineCall::CreateWithMetadataUrl {
            url: url.to_string(),
        });
        self.inner.create_with_metadata_url(url, context).await
    }

    async fn update_with_manual_config(
        &self,
        config: &ManualConfiguration,
        current_issuer: &str,
        context: &RequestContext,
    ) -> EngineResult<ServiceProviderRecord> {
        self.record(EngineCall::UpdateWithManualConfig {
            issuer: config.issuer.clone(),
            current_issuer: current_issuer.to_string(),
        });
        self.inner
            .update_with_manual_config(config, current_issuer, context)
            .await
    }

    async fn update_with_metadata_file(
        &self,
        metadata_file: &str,
        current_issuer: &str,
        context: &RequestContext,
    ) -> EngineResult<ServiceProviderRecord> {
        self.record(EngineCall::UpdateWithMetadataFile {
            current_issuer: current_issuer.to_string(),
        });
        self.inner
            .update_with_metadata_file(metadata_file, current_issuer, context)
            .await
    }

    async fn update_with_metadata_url(
        &self,
        url: &str,
        current_issuer: &str,
        context: &RequestContext,
    ) -> EngineResult<ServiceProviderRecord> {
        self.record(EngineCall::UpdateWithMetadataUrl {
            url: url.to_string(),
            current_issuer: current_issuer.to_string(),
        });
        self.inner
            .update_with_metadata_url(url, current_issuer, context)
            .await
    }

    async fn get_by_issuer(
        &self,
        issuer: &str,
        context: &RequestContext,
    ) -> EngineResult<Option<ServiceProviderRecord>> {
        self.record(EngineCall::GetByIssuer {
            issuer: issuer.to_string(),
        });
        self.inner.get_by_issuer(issuer, context).await
    }

    async fn remove_by_issuer(&self, issuer: &str, context: &RequestContext) -> EngineResult<()> {
        self.record(EngineCall::RemoveByIssuer {
            issuer: issuer.to_string(),
        });
        if let Some(error) = &self.remove_failure {
            return Err(error.clone());
        }
        self.inner.remove_by_issuer(issuer, context).await
    }

    fn random_integer(&self) -> EngineResult<u32> {
        self.record(EngineCall::RandomInteger);
        match &self.random_failure {
            Some(error) => Err(error.clone()),
            None => self.inner.random_integer(),
        }
    }
}

/// Resolver over a fresh recording engine, with logging initialised.
pub fn recording_resolver() -> InboundResolver<RecordingEngine> {
    init_logging();
    InboundResolver::new(RecordingEngine::new())
}
