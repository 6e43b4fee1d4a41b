//! Data model for SAML2 inbound configuration.
//!
//! - [`binding`] - SAML bindings and binding sets
//! - [`saml_config`] - caller-supplied configuration and source precedence
//! - [`application`] - the owning application and its inbound records
//! - [`service_provider`] - the engine's service provider record

pub mod application;
pub mod binding;
pub mod saml_config;
pub mod service_provider;

pub use application::{
    ATTRIBUTE_CONSUMING_SERVICE_INDEX, Application, Certificate, CertificateType,
    InboundAuthRecord, Property, SAML2_PROTOCOL,
};
pub use binding::{BindingSet, SamlBinding};
pub use saml_config::{
    AttributeProfile, ConfigSource, ManualConfiguration, RequestedSamlConfig, SOURCE_PRECEDENCE,
    SingleLogoutProfile, SingleSignOnProfile, SourceKind,
};
pub use service_provider::ServiceProviderRecord;
