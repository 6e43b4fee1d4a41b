//! The engine's representation of a SAML2 service provider.

use crate::model::binding::BindingSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A service provider record as stored by the SAML engine.
///
/// Records are replaced wholesale on every write; the resolver never edits one in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceProviderRecord {
    pub issuer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer_qualifier: Option<String>,
    pub assertion_consumer_urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_assertion_consumer_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idp_entity_id_alias: Option<String>,
    /// PEM-encoded signing certificate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
    /// Base64 SHA-256 digest of the certificate text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_thumbprint: Option<String>,
    pub bindings: BindingSet,
    #[serde(default)]
    pub signature_validation_for_artifact_binding: bool,
    #[serde(default)]
    pub idp_initiated_sso_enabled: bool,
    #[serde(default)]
    pub attribute_profile_enabled: bool,
    #[serde(default)]
    pub always_include_attributes: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_consuming_service_index: Option<String>,
    #[serde(default)]
    pub single_logout_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slo_request_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slo_response_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

impl ServiceProviderRecord {
    /// Create a record with mandatory bindings and no optional profiles.
    pub fn new(issuer: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            issuer: issuer.into(),
            issuer_qualifier: None,
            assertion_consumer_urls: Vec::new(),
            default_assertion_consumer_url: None,
            idp_entity_id_alias: None,
            certificate: None,
            certificate_thumbprint: None,
            bindings: BindingSet::mandatory(),
            signature_validation_for_artifact_binding: false,
            idp_initiated_sso_enabled: false,
            attribute_profile_enabled: false,
            always_include_attributes: false,
            attribute_consuming_service_index: None,
            single_logout_enabled: false,
            slo_request_url: None,
            slo_response_url: None,
            created_at: now,
            last_modified: now,
        }
    }

    pub fn has_certificate(&self) -> bool {
        self.certificate
            .as_deref()
            .is_some_and(|c| !c.trim().is_empty())
    }

    /// Stored attribute consuming service index, ignoring blank values.
    pub fn attribute_index(&self) -> Option<&str> {
        self.attribute_consuming_service_index
            .as_deref()
            .filter(|index| !index.trim().is_empty())
    }
}
