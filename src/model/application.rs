//! The owning application and its inbound authentication records.

use serde::{Deserialize, Serialize};

/// Protocol tag of a SAML2 inbound record.
pub const SAML2_PROTOCOL: &str = "SAML2";

/// Name of the property carrying the attribute consuming service index.
pub const ATTRIBUTE_CONSUMING_SERVICE_INDEX: &str = "attrConsumServiceIndex";

/// A named string property on an inbound record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Link between an application and one of its inbound protocol identities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundAuthRecord {
    pub protocol: String,
    /// Protocol-specific key; the issuer for SAML2
    pub auth_key: String,
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl InboundAuthRecord {
    /// Create a SAML2 record keyed by `issuer`.
    pub fn saml2(issuer: impl Into<String>) -> Self {
        Self {
            protocol: SAML2_PROTOCOL.to_string(),
            auth_key: issuer.into(),
            properties: Vec::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push(Property::new(name, value));
        self
    }

    pub fn is_saml2(&self) -> bool {
        self.protocol == SAML2_PROTOCOL
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CertificateType {
    Pem,
}

/// Certificate attached to an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    #[serde(rename = "type")]
    pub certificate_type: CertificateType,
    pub value: String,
}

/// An application registered with the identity provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<Certificate>,
    #[serde(default)]
    pub inbound_auth: Vec<InboundAuthRecord>,
}

impl Application {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Auth key of the inbound record for `protocol`, if the application has one.
    pub fn inbound_key(&self, protocol: &str) -> Option<&str> {
        self.inbound(protocol).map(|r| r.auth_key.as_str())
    }

    pub fn inbound(&self, protocol: &str) -> Option<&InboundAuthRecord> {
        self.inbound_auth.iter().find(|r| r.protocol == protocol)
    }

    /// Replace the record for the same protocol, or add it.
    pub fn upsert_inbound(&mut self, record: InboundAuthRecord) {
        match self
            .inbound_auth
            .iter_mut()
            .find(|r| r.protocol == record.protocol)
        {
            Some(existing) => *existing = record,
            None => self.inbound_auth.push(record),
        }
    }

    /// Remove and return the record for `protocol`.
    pub fn remove_inbound(&mut self, protocol: &str) -> Option<InboundAuthRecord> {
        let position = self.inbound_auth.iter().position(|r| r.protocol == protocol)?;
        Some(self.inbound_auth.remove(position))
    }
}
