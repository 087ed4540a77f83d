mod hosts_config;
pub use hosts_config::HostsConfig;

mod registry_config;
pub use registry_config::Mirror;
pub use registry_config::RegistryConfig;

mod partition_rules;
pub use partition_rules::PartitionRules;
