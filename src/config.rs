//! Resolver configuration.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Tenant used when a request does not name one.
pub const DEFAULT_TENANT_DOMAIN: &str = "carbon.super";

/// Settings consumed by [`InboundResolver::with_config`](crate::InboundResolver::with_config).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverConfig {
    /// Tenant whose issuer namespace is used when the request context has none
    pub default_tenant_domain: String,
    /// Copy the service provider certificate onto the owning application
    pub propagate_certificate: bool,
    /// Generate an attribute consuming service index when none is supplied or stored
    pub generate_attribute_index: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_tenant_domain: DEFAULT_TENANT_DOMAIN.to_string(),
            propagate_certificate: true,
            generate_attribute_index: true,
        }
    }
}

impl ResolverConfig {
    pub fn with_default_tenant_domain(mut self, tenant_domain: impl Into<String>) -> Self {
        self.default_tenant_domain = tenant_domain.into();
        self
    }

    pub fn with_certificate_propagation(mut self, enabled: bool) -> Self {
        self.propagate_certificate = enabled;
        self
    }

    pub fn with_attribute_index_generation(mut self, enabled: bool) -> Self {
        self.generate_attribute_index = enabled;
        self
    }

    /// Validate the configuration for consistency and correctness.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_tenant_domain.trim().is_empty() {
            return Err(ConfigError::invalid("Default tenant domain cannot be empty"));
        }
        if self.default_tenant_domain.chars().any(char::is_whitespace) {
            return Err(ConfigError::invalid(format!(
                "Default tenant domain '{}' contains whitespace",
                self.default_tenant_domain
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration document.
    ///
    /// Missing fields take their default values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
