use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

use toml_edit::{value, Array, Document, Item, Table};
use tracing::{event, Level};

use crate::{EndpointDescriptor, Error};

const DEFAULT_HOSTS_DIR: &str = "etc/containerd/certs.d/";

/// Struct for creating a hosts.toml file for containerd hosts configuration,
///
/// Rendered from resolved endpoints, the last endpoint is the upstream server and every other
/// endpoint becomes a host entry in priority order,
///
/// ```toml
/// server = "https://registry-1.docker.io"
///
/// [host."http://localhost:5000"]
/// capabilities = ["pull", "resolve"]
/// skip_verify = true
/// ```
///
pub struct HostsConfig {
    document: Document,
}

impl HostsConfig {
    /// Renders resolved endpoints as a hosts config,
    ///
    pub fn from_endpoints<A>(endpoints: &[EndpointDescriptor<A>]) -> Self {
        let mut document = Document::new();

        if let Some((upstream, mirrors)) = endpoints.split_last() {
            document["server"] = value(upstream.url());

            let mut hosts = Table::new();
            hosts.set_implicit(true);
            for mirror in mirrors {
                let mut host = Table::new();
                host["capabilities"] = value(
                    mirror
                        .capabilities
                        .iter()
                        .map(|c| c.as_str())
                        .collect::<Array>(),
                );

                // http hosts are only used if verification is skipped
                if mirror.is_http() {
                    host["skip_verify"] = value(true);
                }

                hosts.insert(&mirror.url(), Item::Table(host));
            }

            if !hosts.is_empty() {
                document.insert("host", Item::Table(hosts));
            }
        }

        Self { document }
    }

    /// Tries to save to `{root}/etc/containerd/certs.d/{registry_host}/hosts.toml`,
    ///
    pub async fn try_save(
        &self,
        root: impl AsRef<Path>,
        registry_host: impl AsRef<str>,
    ) -> Result<PathBuf, Error> {
        let path = root
            .as_ref()
            .join(DEFAULT_HOSTS_DIR)
            .join(registry_host.as_ref());

        tokio::fs::create_dir_all(&path).await?;
        let path = path.join("hosts.toml");

        tokio::fs::write(&path, format!("{}", self)).await?;
        event!(Level::INFO, "Wrote hosts config to {:?}", path);
        Ok(path)
    }
}

impl Display for HostsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.document)
    }
}

#[cfg(test)]
mod tests {
    use super::HostsConfig;
    use crate::{resolve, RegistryConfig};

    fn render(config: &RegistryConfig, host: &str) -> toml::Value {
        let endpoints = resolve(config, host, &()).expect("should resolve");
        let hosts_config = HostsConfig::from_endpoints(&endpoints);
        toml::from_str(&format!("{hosts_config}")).expect("should be valid toml")
    }

    #[test]
    fn test_hosts_config() {
        let config = RegistryConfig::default()
            .with_mirror("docker.io", ["localhost:5000", "mirror.example.com"]);

        let rendered = render(&config, "docker.io");
        assert_eq!(
            Some("https://registry-1.docker.io"),
            rendered["server"].as_str()
        );

        let hosts = rendered["host"].as_table().expect("should have hosts");
        assert_eq!(2, hosts.len());

        let local = &hosts["http://localhost:5000"];
        assert_eq!(
            Some(&vec![
                toml::Value::String("pull".to_string()),
                toml::Value::String("resolve".to_string())
            ]),
            local["capabilities"].as_array()
        );
        assert_eq!(Some(true), local["skip_verify"].as_bool());

        let remote = &hosts["https://mirror.example.com"];
        assert!(remote.get("skip_verify").is_none());
    }

    #[test]
    fn test_hosts_config_keeps_priority_order() {
        let config = RegistryConfig::default().with_mirror("*", ["zeta.example.com", "alpha.example.com"]);
        let endpoints = resolve(&config, "ghcr.io", &()).expect("should resolve");
        let rendered = format!("{}", HostsConfig::from_endpoints(&endpoints));

        let zeta = rendered.find("zeta.example.com").expect("should have zeta");
        let alpha = rendered.find("alpha.example.com").expect("should have alpha");
        assert!(zeta < alpha);
    }

    #[test]
    fn test_hosts_config_no_mirrors() {
        let rendered = render(&RegistryConfig::default(), "ghcr.io");
        assert_eq!(Some("https://ghcr.io"), rendered["server"].as_str());
        assert!(rendered.get("host").is_none());

        let empty = HostsConfig::from_endpoints::<()>(&[]);
        assert_eq!("", format!("{empty}"));
    }

    #[tokio::test]
    async fn test_save_hosts_config() {
        let root = std::env::temp_dir().join(format!("ctr_hosts_test_hosts_config_{}", std::process::id()));
        let endpoints = resolve(
            &RegistryConfig::default().with_mirror("docker.io", ["localhost:5000"]),
            "docker.io",
            &(),
        )
        .expect("should resolve");

        let path = HostsConfig::from_endpoints(&endpoints)
            .try_save(&root, "docker.io")
            .await
            .expect("should save");
        assert_eq!(
            root.join("etc/containerd/certs.d/docker.io/hosts.toml"),
            path
        );

        let saved = tokio::fs::read_to_string(&path).await.expect("should read");
        assert!(saved.contains(r#"server = "https://registry-1.docker.io""#));

        tokio::fs::remove_dir_all(&root).await.expect("should clean up");
    }
}
