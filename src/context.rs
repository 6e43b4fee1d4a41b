//! Request context for SAML2 inbound operations.
//!
//! Carries a request id for log correlation and the tenant whose issuer namespace the
//! operation targets.

use uuid::Uuid;

/// Request context threaded through every engine call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Unique identifier for this request
    pub request_id: String,
    /// Tenant domain, or `None` to use the resolver's default tenant
    pub tenant_domain: Option<String>,
}

impl RequestContext {
    /// Create a new request context with a specific request ID.
    pub fn new(request_id: String) -> Self {
        Self {
            request_id,
            tenant_domain: None,
        }
    }

    /// Create a new request context with a generated request ID.
    pub fn with_generated_id() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }

    /// Create a new request context with generated ID for a tenant.
    pub fn for_tenant(tenant_domain: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            tenant_domain: Some(tenant_domain.into()),
        }
    }

    /// Get the tenant domain if one was supplied.
    pub fn tenant_domain(&self) -> Option<&str> {
        self.tenant_domain.as_deref()
    }

    /// Tenant domain, falling back to `default` when none was supplied.
    pub fn effective_tenant<'a>(&'a self, default: &'a str) -> &'a str {
        self.tenant_domain().unwrap_or(default)
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::with_generated_id()
    }
}
