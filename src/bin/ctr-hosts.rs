use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use ctr_hosts::{
    fetch_ecr_ref, parse_labels, Error, HostsConfig, PartitionRules, RegistryConfig, RegistryHosts,
};
use tracing::{event, Level};
use tracing_subscriber::EnvFilter;

/// Resolves registry hosts and ECR pull-through references for a container runtime,
///
#[tokio::main]
async fn main() {
    let cli = CtrHosts::parse();
    tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(
                    if cli.debug { "ctr_hosts=debug" } else { "ctr_hosts=info" }
                        .parse()
                        .expect("should parse"),
                )
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match cli.command.handle().await {
        Ok(output) => println!("{output}"),
        Err(err) => {
            event!(Level::ERROR, "{err}");
            std::process::exit(1);
        }
    }
}

/// ctr-hosts CLI
///
#[derive(Parser)]
#[clap(name = "ctr-hosts")]
#[clap(arg_required_else_help = true)]
#[clap(about = "Resolves registry mirror endpoints and ECR pull-through cache references")]
struct CtrHosts {
    /// Enable debug mode
    #[clap(long, short, action)]
    debug: bool,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prints the endpoints to try for a registry host as json, in order
    Resolve(ResolveSettings),
    /// Prints a containerd hosts.toml for a registry host
    HostsToml(ResolveSettings),
    /// Prints the canonical pull-through cache reference for an ECR image uri
    EcrRef(EcrRefSettings),
    /// Prints `key=value` label entries as a json map
    Labels(LabelSettings),
}

#[derive(Args)]
struct ResolveSettings {
    /// Path to the registry config toml
    #[clap(long)]
    config: Option<PathBuf>,
    /// Registry host, Ex. docker.io
    host: String,
}

#[derive(Args)]
struct EcrRefSettings {
    /// Path to the partition rules json
    #[clap(long)]
    rules: Option<PathBuf>,
    /// ECR image uri, Ex. 111111111111.dkr.ecr.us-west-2.amazonaws.com/my_image:latest
    uri: String,
}

#[derive(Args)]
struct LabelSettings {
    /// Label entries, Ex. io.cri-containerd.pinned=pinned
    entries: Vec<String>,
}

impl ResolveSettings {
    async fn registry_hosts(&self) -> Result<RegistryHosts<()>, Error> {
        let config = match self.config.as_ref() {
            Some(path) => RegistryConfig::try_load(path).await?,
            None => RegistryConfig::default(),
        };

        Ok(RegistryHosts::new(config, ()))
    }
}

impl Commands {
    /// Handles the command, returning what should be printed,
    ///
    async fn handle(&self) -> Result<String, Error> {
        match self {
            Commands::Resolve(settings) => {
                let hosts = settings.registry_hosts().await?.resolve(&settings.host)?;
                Ok(serde_json::to_string_pretty(&hosts)?)
            }
            Commands::HostsToml(settings) => {
                let hosts = settings.registry_hosts().await?.resolve(&settings.host)?;
                Ok(format!("{}", HostsConfig::from_endpoints(&hosts)))
            }
            Commands::EcrRef(EcrRefSettings { rules, uri }) => {
                let rules = match rules.as_ref() {
                    Some(path) => PartitionRules::try_load(path).await?,
                    None => PartitionRules::default(),
                };

                fetch_ecr_ref(uri, &rules)
            }
            Commands::Labels(LabelSettings { entries }) => {
                Ok(serde_json::to_string_pretty(&parse_labels(entries))?)
            }
        }
    }
}
