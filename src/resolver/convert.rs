//! Conversion of stored service provider records back into request shape.

use crate::model::{
    AttributeProfile, ManualConfiguration, RequestedSamlConfig, ServiceProviderRecord,
    SingleLogoutProfile, SingleSignOnProfile,
};

/// Express a stored record as the manual configuration that would reproduce it.
pub fn to_requested_config(record: &ServiceProviderRecord) -> RequestedSamlConfig {
    let single_sign_on_profile = SingleSignOnProfile {
        bindings: Some(record.bindings.clone()),
        enable_signature_validation_for_artifact_binding: record
            .signature_validation_for_artifact_binding,
        enable_idp_initiated_single_sign_on: record.idp_initiated_sso_enabled,
        attribute_consuming_service_index: record.attribute_index().map(str::to_string),
    };

    let attribute_profile = AttributeProfile {
        enabled: record.attribute_profile_enabled,
        always_include_attributes_in_response: record.always_include_attributes,
    };

    let single_logout_profile = SingleLogoutProfile {
        enabled: record.single_logout_enabled,
        logout_request_url: record.slo_request_url.clone(),
        logout_response_url: record.slo_response_url.clone(),
    };

    RequestedSamlConfig::from_manual(ManualConfiguration {
        issuer: record.issuer.clone(),
        service_provider_qualifier: record.issuer_qualifier.clone(),
        assertion_consumer_urls: record.assertion_consumer_urls.clone(),
        default_assertion_consumer_url: record.default_assertion_consumer_url.clone(),
        idp_entity_id_alias: record.idp_entity_id_alias.clone(),
        certificate: record.certificate.clone(),
        single_sign_on_profile: Some(single_sign_on_profile),
        attribute_profile: Some(attribute_profile),
        single_logout_profile: Some(single_logout_profile),
    })
}
