//! Metadata documents and request builders.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use saml_inbound::model::{
    AttributeProfile, BindingSet, ManualConfiguration, RequestedSamlConfig, SingleSignOnProfile,
};

/// Issuer declared by [`TRAVELOCITY_METADATA`].
pub const TRAVELOCITY_ISSUER: &str = "travelocity.com";

/// Issuer declared by [`AVIS_METADATA`].
pub const AVIS_ISSUER: &str = "avis.com";

pub const TRAVELOCITY_METADATA_URL: &str = "https://travelocity.com/saml/metadata";
pub const AVIS_METADATA_URL: &str = "https://avis.com/saml/metadata";

pub const TRAVELOCITY_METADATA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<md:EntityDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata" entityID="travelocity.com">
  <md:SPSSODescriptor AuthnRequestsSigned="true" protocolSupportEnumeration="urn:oasis:names:tc:SAML:2.0:protocol">
    <md:KeyDescriptor use="signing">
      <ds:KeyInfo xmlns:ds="http://www.w3.org/2000/09/xmldsig#">
        <ds:X509Data>
          <ds:X509Certificate>MIICNTCCAZ6gAwIBAgIES343gjANBgkqhkiG9w0BAQUFADBVMQswCQYDVQQGEwJVUzEL</ds:X509Certificate>
        </ds:X509Data>
      </ds:KeyInfo>
    </md:KeyDescriptor>
    <md:SingleLogoutService Binding="urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Redirect" Location="https://travelocity.com/saml/slo"/>
    <md:AssertionConsumerService Binding="urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST" Location="https://travelocity.com/saml/acs" index="1" isDefault="true"/>
    <md:AttributeConsumingService index="1223160755">
      <md:ServiceName xml:lang="en">Travelocity</md:ServiceName>
    </md:AttributeConsumingService>
  </md:SPSSODescriptor>
</md:EntityDescriptor>"#;

pub const AVIS_METADATA: &str = r#"<md:EntityDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata" entityID="avis.com">
  <md:SPSSODescriptor protocolSupportEnumeration="urn:oasis:names:tc:SAML:2.0:protocol">
    <md:AssertionConsumerService Binding="urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST" Location="https://avis.com/saml/acs" index="1"/>
  </md:SPSSODescriptor>
</md:EntityDescriptor>"#;

/// PEM certificate used by manual configurations.
pub const CERTIFICATE: &str = "-----BEGIN CERTIFICATE-----\nMIICNTCCAZ6gAwIBAgIES343gjANBgkqhkiG9w0BAQUFADBV\n-----END CERTIFICATE-----";

/// [`TRAVELOCITY_METADATA`] as an uploaded metadata file.
pub fn travelocity_metadata_file() -> String {
    STANDARD.encode(TRAVELOCITY_METADATA)
}

/// Minimal valid manual configuration for `issuer`.
pub fn manual_config(issuer: &str) -> ManualConfiguration {
    ManualConfiguration::new(issuer).with_assertion_consumer_url(format!("https://{}/acs", issuer))
}

pub fn manual_request(issuer: &str) -> RequestedSamlConfig {
    RequestedSamlConfig::from_manual(manual_config(issuer))
}

pub fn manual_request_with_bindings(issuer: &str, bindings: BindingSet) -> RequestedSamlConfig {
    RequestedSamlConfig::from_manual(
        manual_config(issuer).with_single_sign_on_profile(SingleSignOnProfile::with_bindings(bindings)),
    )
}

/// Manual request with the attribute profile on and an optional caller index.
pub fn manual_request_with_attributes(issuer: &str, index: Option<&str>) -> RequestedSamlConfig {
    let mut profile = SingleSignOnProfile::with_bindings(BindingSet::mandatory());
    if let Some(index) = index {
        profile = profile.with_attribute_consuming_service_index(index);
    }
    RequestedSamlConfig::from_manual(
        manual_config(issuer)
            .with_single_sign_on_profile(profile)
            .with_attribute_profile(AttributeProfile {
                enabled: true,
                always_include_attributes_in_response: false,
            }),
    )
}
