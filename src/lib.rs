mod error;
pub use error::Error;
pub use error::ErrorCategory;

mod config;
pub use config::HostsConfig;
pub use config::Mirror;
pub use config::PartitionRules;
pub use config::RegistryConfig;

mod mirror;
pub use mirror::infer_endpoint;
pub use mirror::is_localhost;
pub use mirror::lookup;
pub use mirror::resolve;
pub use mirror::EndpointDescriptor;
pub use mirror::HostCapability;
pub use mirror::InferredEndpoint;
pub use mirror::RegistryHosts;
pub use mirror::DOCKER_HUB_HOST;
pub use mirror::DOCKER_HUB_REGISTRY_HOST;
pub use mirror::REGISTRY_API_PATH;
pub use mirror::WILDCARD_HOST;

pub mod ecr;
pub use ecr::fetch_ecr_ref;
pub use ecr::EcrReference;

mod labels;
pub use labels::parse_labels;
pub use labels::LabelMap;
