use std::fmt::Display;

use serde::Serialize;

/// Host capabilities, named the way containerd's hosts.toml names them,
///
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum HostCapability {
    /// Pull means that the host can pull content from a registry
    ///
    Pull,
    /// Resolve means the host can resolve a tag to a digest
    ///
    Resolve,
    /// Push means that the host can push content to the registry
    ///
    Push,
}

impl HostCapability {
    /// Returns the name used in hosts.toml,
    ///
    pub fn as_str(&self) -> &'static str {
        match self {
            HostCapability::Pull => "pull",
            HostCapability::Resolve => "resolve",
            HostCapability::Push => "push",
        }
    }
}

impl Display for HostCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
