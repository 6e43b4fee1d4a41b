//! SAML2 service provider metadata extraction.
//!
//! Pulls the values a service provider record needs out of an `EntityDescriptor`
//! document. Elements are matched by local name, so prefixed and unprefixed
//! metadata read the same.

use crate::engine::errors::{EngineError, EngineResult, codes};
use crate::model::{SamlBinding, ServiceProviderRecord};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use log::trace;
use roxmltree::{Document, Node};

const ARTIFACT_BINDING_URN: &str = "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Artifact";

/// Decode a base64 metadata blob into its XML text.
pub fn decode_metadata_file(metadata_file: &str) -> EngineResult<String> {
    let bytes = STANDARD.decode(metadata_file.trim()).map_err(|e| {
        EngineError::server(codes::METADATA_DECODE_FAILED, "Error decoding metadata file.")
            .with_description(e.to_string())
    })?;
    String::from_utf8(bytes).map_err(|e| {
        EngineError::server(codes::METADATA_DECODE_FAILED, "Metadata file is not UTF-8.")
            .with_description(e.to_string())
    })
}

/// Build a record from an `EntityDescriptor` document.
pub fn parse_service_provider(xml: &str) -> EngineResult<ServiceProviderRecord> {
    let doc = Document::parse(xml).map_err(|e| {
        EngineError::client(codes::INVALID_METADATA, "Invalid metadata.")
            .with_description(e.to_string())
    })?;

    let entity_id = elements(&doc, "EntityDescriptor")
        .find_map(|node| node.attribute("entityID"))
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| {
            EngineError::client(codes::INVALID_METADATA, "Invalid metadata.")
                .with_description("EntityDescriptor has no entityID.")
        })?;

    let mut record = ServiceProviderRecord::new(entity_id);

    for node in elements(&doc, "AssertionConsumerService") {
        let Some(location) = node.attribute("Location") else {
            continue;
        };
        if node.attribute("Binding") == Some(ARTIFACT_BINDING_URN) {
            record.bindings.insert(SamlBinding::Artifact);
        }
        if node.attribute("isDefault") == Some("true") {
            record.default_assertion_consumer_url = Some(location.to_string());
        }
        if !record.assertion_consumer_urls.iter().any(|url| url == location) {
            record.assertion_consumer_urls.push(location.to_string());
        }
    }
    if record.assertion_consumer_urls.is_empty() {
        return Err(
            EngineError::client(codes::INVALID_METADATA, "Invalid metadata.").with_description(
                format!("No AssertionConsumerService found for {}.", record.issuer),
            ),
        );
    }
    if record.default_assertion_consumer_url.is_none() {
        record.default_assertion_consumer_url = record.assertion_consumer_urls.first().cloned();
    }

    if let Some(node) = elements(&doc, "SingleLogoutService").next() {
        record.single_logout_enabled = true;
        record.slo_request_url = node.attribute("Location").map(str::to_string);
        record.slo_response_url = node.attribute("ResponseLocation").map(str::to_string);
    }

    if let Some(node) = elements(&doc, "AttributeConsumingService").next() {
        record.attribute_profile_enabled = true;
        record.attribute_consuming_service_index = node.attribute("index").map(str::to_string);
    }

    record.certificate = elements(&doc, "X509Certificate")
        .filter_map(|node| node.text())
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(to_pem);

    trace!(
        "Parsed metadata for '{}' with {} assertion consumer URL(s)",
        record.issuer,
        record.assertion_consumer_urls.len()
    );
    Ok(record)
}

fn elements<'a, 'input>(
    doc: &'a Document<'input>,
    local_name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    doc.descendants()
        .filter(move |node| node.is_element() && node.tag_name().name() == local_name)
}

fn to_pem(body: &str) -> String {
    let compact: String = body.chars().filter(|c| !c.is_whitespace()).collect();
    format!(
        "-----BEGIN CERTIFICATE-----\n{}\n-----END CERTIFICATE-----",
        compact
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const METADATA: &str = r#"<?xml version="1.0"?>
<md:EntityDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata" entityID="travelocity.com">
  <md:SPSSODescriptor protocolSupportEnumeration="urn:oasis:names:tc:SAML:2.0:protocol">
    <md:KeyDescriptor use="signing">
      <ds:KeyInfo xmlns:ds="http://www.w3.org/2000/09/xmldsig#">
        <ds:X509Data>
          <ds:X509Certificate>MIIDSTCCAjGgAwIBAgIEAoLQ
            /TANBgkqhkiG9w0BAQsFADBVMQsw</ds:X509Certificate>
        </ds:X509Data>
      </ds:KeyInfo>
    </md:KeyDescriptor>
    <md:SingleLogoutService Binding="urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST" Location="https://travelocity.com/slo"/>
    <md:AssertionConsumerService Binding="urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST" Location="https://travelocity.com/acs" index="1"/>
    <md:AssertionConsumerService Binding="urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Artifact" Location="https://travelocity.com/artifact" index="2" isDefault="true"/>
    <md:AttributeConsumingService index="1223160755">
      <md:ServiceName xml:lang="en">Travelocity</md:ServiceName>
    </md:AttributeConsumingService>
  </md:SPSSODescriptor>
</md:EntityDescriptor>"#;

    #[test]
    fn test_parse_full_document() {
        let record = parse_service_provider(METADATA).unwrap();
        assert_eq!(record.issuer, "travelocity.com");
        assert_eq!(
            record.assertion_consumer_urls,
            vec![
                "https://travelocity.com/acs".to_string(),
                "https://travelocity.com/artifact".to_string()
            ]
        );
        assert_eq!(
            record.default_assertion_consumer_url.as_deref(),
            Some("https://travelocity.com/artifact")
        );
        assert!(record.bindings.contains(SamlBinding::Artifact));
        assert!(record.single_logout_enabled);
        assert_eq!(
            record.slo_request_url.as_deref(),
            Some("https://travelocity.com/slo")
        );
        assert!(record.attribute_profile_enabled);
        assert_eq!(record.attribute_index(), Some("1223160755"));

        let certificate = record.certificate.unwrap();
        assert!(certificate.starts_with("-----BEGIN CERTIFICATE-----\nMIIDSTCCAjGgAwIBAgIEAoLQ/TANBgkq"));
    }

    #[test]
    fn test_missing_entity_id_is_client_error() {
        let error = parse_service_provider("<EntityDescriptor></EntityDescriptor>").unwrap_err();
        assert!(error.is_client());
        assert_eq!(error.code(), codes::INVALID_METADATA);
    }

    #[test]
    fn test_missing_acs_is_client_error() {
        let xml = r#"<EntityDescriptor entityID="sp"><SPSSODescriptor/></EntityDescriptor>"#;
        let error = parse_service_provider(xml).unwrap_err();
        assert!(error.is_client());
    }

    #[test]
    fn test_decode_rejects_malformed_base64_as_server_error() {
        let error = decode_metadata_file("not base64 !!").unwrap_err();
        assert!(!error.is_client());
        assert_eq!(error.code(), codes::METADATA_DECODE_FAILED);
    }

    #[test]
    fn test_decode_round_trip() {
        let encoded = STANDARD.encode(METADATA);
        assert_eq!(decode_metadata_file(&encoded).unwrap(), METADATA);
    }

    #[test]
    fn test_attribute_values_are_unescaped() {
        let xml = r#"<md:EntityDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata" entityID="sp&amp;co">
  <md:SPSSODescriptor>
    <md:AssertionConsumerService ResponseLocation="https://sp.example/unused" Location="https://sp.example/acs?a=1&amp;b=2"/>
  </md:SPSSODescriptor>
</md:EntityDescriptor>"#;
        let record = parse_service_provider(xml).unwrap();
        assert_eq!(record.issuer, "sp&co");
        assert_eq!(
            record.assertion_consumer_urls,
            vec!["https://sp.example/acs?a=1&b=2".to_string()]
        );
    }

    #[test]
    fn test_malformed_xml_is_client_error() {
        let error = parse_service_provider("<EntityDescriptor entityID=\"sp\">").unwrap_err();
        assert!(error.is_client());
        assert_eq!(error.code(), codes::INVALID_METADATA);
    }
}
