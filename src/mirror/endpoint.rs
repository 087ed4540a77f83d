use std::collections::BTreeSet;

use serde::Serialize;

use super::HostCapability;

/// Registry api root, every descriptor this crate creates uses it
///
pub const REGISTRY_API_PATH: &str = "/v2";

/// A registry endpoint a client should try, paired with the authorizer it should use,
///
/// The authorizer is opaque to this crate, it is cloned onto each descriptor as-is and
/// is never serialized.
///
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EndpointDescriptor<A> {
    /// host[:port] of the endpoint
    pub host: String,
    /// Scheme to use when connecting, usually http or https
    pub scheme: String,
    /// Root path of the registry api
    pub path: String,
    /// Registry operations this endpoint may serve
    pub capabilities: BTreeSet<HostCapability>,
    #[serde(skip_serializing)]
    pub authorizer: A,
}

impl<A> EndpointDescriptor<A> {
    /// Returns a new descriptor that can resolve and pull,
    ///
    pub fn pull_only(scheme: impl Into<String>, host: impl Into<String>, authorizer: A) -> Self {
        Self {
            host: host.into(),
            scheme: scheme.into(),
            path: REGISTRY_API_PATH.to_string(),
            capabilities: BTreeSet::from([HostCapability::Resolve, HostCapability::Pull]),
            authorizer,
        }
    }

    /// Returns the base url of this endpoint, ex. https://registry-1.docker.io
    ///
    pub fn url(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }

    /// Returns true if the endpoint is reached over plain http,
    ///
    pub fn is_http(&self) -> bool {
        self.scheme == "http"
    }
}
