//! Binding policy for manually configured service providers.
//!
//! The identity provider cannot switch `HTTP_POST` or `HTTP_REDIRECT` off for a
//! single service provider, so a request that omits either one is rejected instead
//! of being silently widened. `ARTIFACT` is optional and never stands in for a
//! mandatory binding.

use crate::error::{ErrorMessage, InboundError, InboundResult};
use crate::model::{BindingSet, RequestedSamlConfig};

/// Check that `bindings` keeps both mandatory bindings enabled.
pub fn validate_bindings(bindings: &BindingSet) -> InboundResult<()> {
    if !bindings.keeps_mandatory() {
        let entry = ErrorMessage::InvalidBindings;
        return Err(InboundError::client(
            entry.code(),
            entry.message(),
            Some(format!("{} Requested: {}.", entry.description(), bindings)),
        ));
    }
    Ok(())
}

/// Apply [`validate_bindings`] to the bindings of a request, if it names any.
///
/// Requests without a manual configuration, single-sign-on profile or bindings list
/// pass; the engine applies its defaults to them.
pub fn validate_requested_bindings(requested: &RequestedSamlConfig) -> InboundResult<()> {
    match requested.requested_bindings() {
        Some(bindings) => validate_bindings(bindings),
        None => Ok(()),
    }
}
