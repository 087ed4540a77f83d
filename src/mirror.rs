use tracing::{event, Level};

use crate::{Error, Mirror, RegistryConfig};

mod endpoint;
pub use endpoint::EndpointDescriptor;
pub use endpoint::REGISTRY_API_PATH;

mod host_capabilities;
pub use host_capabilities::HostCapability;

mod scheme;
pub use scheme::infer_endpoint;
pub use scheme::is_localhost;
pub use scheme::InferredEndpoint;

/// Host pattern that matches any registry host w/o an exact mirror entry
///
pub const WILDCARD_HOST: &str = "*";

/// Docker hub is addressed as docker.io in image references but is served from this host
///
pub const DOCKER_HUB_HOST: &str = "docker.io";
pub const DOCKER_HUB_REGISTRY_HOST: &str = "registry-1.docker.io";

/// Resolves registry hosts from a registry config, attaching the same authorizer to every host,
///
/// Designed to match containerd's registry hosts function, for example, given this config:
/// ```toml
/// [mirrors."docker.io"]
/// endpoints = ["http://198.158.0.0"]
/// ```
///
/// Resolving `docker.io` returns `http://198.158.0.0` followed by `https://registry-1.docker.io`.
///
#[derive(Clone, Debug)]
pub struct RegistryHosts<A> {
    config: RegistryConfig,
    authorizer: A,
}

impl<A> RegistryHosts<A>
where
    A: Clone,
{
    /// Returns a new resolver over config,
    ///
    pub fn new(config: RegistryConfig, authorizer: A) -> Self {
        Self { config, authorizer }
    }

    /// Returns the endpoints to try for host, in order,
    ///
    pub fn resolve(&self, host: impl AsRef<str>) -> Result<Vec<EndpointDescriptor<A>>, Error> {
        resolve(&self.config, host.as_ref(), &self.authorizer)
    }

    /// Returns the registry config being resolved,
    ///
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }
}

/// Finds the mirror to use for host, an exact entry wins over the wildcard entry,
///
pub fn lookup<'a>(config: &'a RegistryConfig, host: &str) -> Option<&'a Mirror> {
    config
        .mirror(host)
        .or_else(|| config.mirror(WILDCARD_HOST))
}

/// Returns the endpoints to try for host, in order,
///
/// Mirror endpoints come first in their configured order, the upstream registry is always last.
/// If any mirror endpoint is malformed, no endpoints are returned.
///
pub fn resolve<A>(
    config: &RegistryConfig,
    host: &str,
    authorizer: &A,
) -> Result<Vec<EndpointDescriptor<A>>, Error>
where
    A: Clone,
{
    let endpoints = lookup(config, host)
        .map(|m| m.endpoints.as_slice())
        .unwrap_or_default();

    let mut hosts = Vec::with_capacity(endpoints.len() + 1);
    for endpoint in endpoints {
        let inferred = infer_endpoint(endpoint)?;
        let authority = inferred.authority();
        event!(
            Level::DEBUG,
            "Using mirror {}://{authority} for {host}",
            inferred.scheme
        );

        hosts.push(EndpointDescriptor::pull_only(
            inferred.scheme,
            authority,
            authorizer.clone(),
        ));
    }

    let upstream = if host == DOCKER_HUB_HOST {
        DOCKER_HUB_REGISTRY_HOST
    } else {
        host
    };
    hosts.push(EndpointDescriptor::pull_only(
        "https",
        upstream,
        authorizer.clone(),
    ));

    Ok(hosts)
}
