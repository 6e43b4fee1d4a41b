//! SAML2 bindings and binding sets.
//!
//! A binding is the HTTP mechanism used to carry a SAML message. Service providers
//! request a set of them through their single-sign-on profile.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A SAML2 message binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SamlBinding {
    #[serde(rename = "HTTP_POST")]
    HttpPost,
    #[serde(rename = "HTTP_REDIRECT")]
    HttpRedirect,
    #[serde(rename = "ARTIFACT")]
    Artifact,
}

impl SamlBinding {
    /// Every binding, in declaration order.
    pub const ALL: [SamlBinding; 3] = [Self::HttpPost, Self::HttpRedirect, Self::Artifact];

    /// Wire name of the binding.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::HttpPost => "HTTP_POST",
            Self::HttpRedirect => "HTTP_REDIRECT",
            Self::Artifact => "ARTIFACT",
        }
    }

    /// Whether the identity provider always keeps this binding enabled.
    pub const fn is_mandatory(&self) -> bool {
        matches!(self, Self::HttpPost | Self::HttpRedirect)
    }
}

impl fmt::Display for SamlBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SamlBinding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HTTP_POST" => Ok(Self::HttpPost),
            "HTTP_REDIRECT" => Ok(Self::HttpRedirect),
            "ARTIFACT" => Ok(Self::Artifact),
            _ => Err(format!("Invalid SAML binding: {}", s)),
        }
    }
}

/// A set of requested bindings.
///
/// Serialized as a JSON array; duplicates collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BindingSet(BTreeSet<SamlBinding>);

impl BindingSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The bindings the identity provider enables when none are requested.
    pub fn mandatory() -> Self {
        SamlBinding::ALL
            .into_iter()
            .filter(SamlBinding::is_mandatory)
            .collect()
    }

    pub fn with(mut self, binding: SamlBinding) -> Self {
        self.0.insert(binding);
        self
    }

    pub fn insert(&mut self, binding: SamlBinding) -> bool {
        self.0.insert(binding)
    }

    pub fn contains(&self, binding: SamlBinding) -> bool {
        self.0.contains(&binding)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = SamlBinding> + '_ {
        self.0.iter().copied()
    }

    /// Whether both mandatory bindings are enabled.
    ///
    /// Holds iff `|B| >= 2` and not (`|B| = 2` and `ARTIFACT` in `B`).
    pub fn keeps_mandatory(&self) -> bool {
        let size = self.len();
        size >= 2 && !(size == 2 && self.contains(SamlBinding::Artifact))
    }
}

impl FromIterator<SamlBinding> for BindingSet {
    fn from_iter<I: IntoIterator<Item = SamlBinding>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for BindingSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|b| b.as_str()).collect();
        write!(f, "[{}]", names.join(", "))
    }
}
