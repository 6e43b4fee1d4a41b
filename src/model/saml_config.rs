//! Caller-supplied SAML2 inbound configuration.
//!
//! A [`RequestedSamlConfig`] names at most one effective configuration source. The
//! payload may populate more than one; [`RequestedSamlConfig::source`] resolves which
//! one wins according to [`SOURCE_PRECEDENCE`].

use crate::model::binding::BindingSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of configuration source a request can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    MetadataFile,
    MetadataUrl,
    ManualConfiguration,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MetadataFile => "metadataFile",
            Self::MetadataUrl => "metadataURL",
            Self::ManualConfiguration => "manualConfiguration",
        };
        f.write_str(name)
    }
}

/// Order in which configuration sources are considered. The first present source wins.
pub const SOURCE_PRECEDENCE: [SourceKind; 3] = [
    SourceKind::MetadataFile,
    SourceKind::MetadataUrl,
    SourceKind::ManualConfiguration,
];

/// The configuration source selected for a request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigSource<'a> {
    /// Base64-encoded metadata document
    MetadataFile(&'a str),
    /// URL the engine fetches metadata from
    MetadataUrl(&'a str),
    /// Inline configuration
    Manual(&'a ManualConfiguration),
}

impl<'a> ConfigSource<'a> {
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::MetadataFile(_) => SourceKind::MetadataFile,
            Self::MetadataUrl(_) => SourceKind::MetadataUrl,
            Self::Manual(_) => SourceKind::ManualConfiguration,
        }
    }

    /// Caller-supplied attribute consuming service index of a manual source.
    pub fn attribute_index(&self) -> Option<&'a str> {
        match *self {
            Self::Manual(config) => config
                .single_sign_on_profile
                .as_ref()?
                .attribute_consuming_service_index
                .as_deref(),
            _ => None,
        }
    }
}

/// SAML2 inbound configuration as submitted by a caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestedSamlConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_file: Option<String>,
    #[serde(rename = "metadataURL", skip_serializing_if = "Option::is_none")]
    pub metadata_url: Option<String>,
    #[serde(alias = "manualConfig", skip_serializing_if = "Option::is_none")]
    pub manual_configuration: Option<ManualConfiguration>,
}

impl RequestedSamlConfig {
    pub fn from_metadata_file(metadata_file: impl Into<String>) -> Self {
        Self {
            metadata_file: Some(metadata_file.into()),
            ..Self::default()
        }
    }

    pub fn from_metadata_url(metadata_url: impl Into<String>) -> Self {
        Self {
            metadata_url: Some(metadata_url.into()),
            ..Self::default()
        }
    }

    pub fn from_manual(configuration: ManualConfiguration) -> Self {
        Self {
            manual_configuration: Some(configuration),
            ..Self::default()
        }
    }

    fn source_of(&self, kind: SourceKind) -> Option<ConfigSource<'_>> {
        match kind {
            SourceKind::MetadataFile => self.metadata_file.as_deref().map(ConfigSource::MetadataFile),
            SourceKind::MetadataUrl => self.metadata_url.as_deref().map(ConfigSource::MetadataUrl),
            SourceKind::ManualConfiguration => {
                self.manual_configuration.as_ref().map(ConfigSource::Manual)
            }
        }
    }

    /// The effective source: the first populated one in [`SOURCE_PRECEDENCE`] order.
    pub fn source(&self) -> Option<ConfigSource<'_>> {
        SOURCE_PRECEDENCE
            .iter()
            .find_map(|kind| self.source_of(*kind))
    }

    /// Every populated source kind, in precedence order.
    pub fn populated_sources(&self) -> Vec<SourceKind> {
        SOURCE_PRECEDENCE
            .into_iter()
            .filter(|kind| self.source_of(*kind).is_some())
            .collect()
    }

    /// Requested bindings, if the manual configuration specifies any.
    pub fn requested_bindings(&self) -> Option<&BindingSet> {
        self.manual_configuration
            .as_ref()?
            .single_sign_on_profile
            .as_ref()?
            .bindings
            .as_ref()
    }
}

/// Inline service provider configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualConfiguration {
    pub issuer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_provider_qualifier: Option<String>,
    #[serde(default)]
    pub assertion_consumer_urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_assertion_consumer_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idp_entity_id_alias: Option<String>,
    /// PEM-encoded signing certificate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_sign_on_profile: Option<SingleSignOnProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_profile: Option<AttributeProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_logout_profile: Option<SingleLogoutProfile>,
}

impl ManualConfiguration {
    pub fn new(issuer: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            ..Self::default()
        }
    }

    pub fn with_assertion_consumer_url(mut self, url: impl Into<String>) -> Self {
        self.assertion_consumer_urls.push(url.into());
        self
    }

    pub fn with_certificate(mut self, pem: impl Into<String>) -> Self {
        self.certificate = Some(pem.into());
        self
    }

    pub fn with_single_sign_on_profile(mut self, profile: SingleSignOnProfile) -> Self {
        self.single_sign_on_profile = Some(profile);
        self
    }

    pub fn with_attribute_profile(mut self, profile: AttributeProfile) -> Self {
        self.attribute_profile = Some(profile);
        self
    }

    pub fn with_single_logout_profile(mut self, profile: SingleLogoutProfile) -> Self {
        self.single_logout_profile = Some(profile);
        self
    }
}

/// Single sign-on behaviour requested by the service provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleSignOnProfile {
    /// Requested bindings; `None` defers to the identity provider default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bindings: Option<BindingSet>,
    #[serde(default)]
    pub enable_signature_validation_for_artifact_binding: bool,
    #[serde(default)]
    pub enable_idp_initiated_single_sign_on: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_consuming_service_index: Option<String>,
}

impl SingleSignOnProfile {
    pub fn with_bindings(bindings: BindingSet) -> Self {
        Self {
            bindings: Some(bindings),
            ..Self::default()
        }
    }

    pub fn with_attribute_consuming_service_index(mut self, index: impl Into<String>) -> Self {
        self.attribute_consuming_service_index = Some(index.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeProfile {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub always_include_attributes_in_response: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleLogoutProfile {
    #[serde(default)]
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logout_request_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logout_response_url: Option<String>,
}
