use std::str::FromStr;

use tracing::{event, Level};

use crate::{Error, PartitionRules};

use super::{is_generic_region, Partition};

const ECR_SERVICE: &str = "ecr";
const ECR_FIPS_SERVICE: &str = "ecr-fips";
const ACCOUNT_ID_LEN: usize = 12;

/// Parts of an ECR image uri,
///
/// ECR image uris have the shape `<account>.dkr.ecr[-fips].<region>.<domain>/<repo_path>`, the
/// domain varies by partition (amazonaws.com, amazonaws.com.cn, ..) and is not kept.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcrReference {
    /// 12 digit aws account id
    pub account: String,
    pub region: String,
    /// Repository and tag/digest, ex. `bottlerocket/container:1.2.3`
    pub repo_path: String,
    /// True if the uri addressed the ecr-fips endpoint
    pub fips: bool,
}

impl EcrReference {
    /// Parses an ECR image uri,
    ///
    pub fn parse(uri: &str) -> Result<Self, Error> {
        let invalid = || Error::invalid_ecr_uri(uri);

        let (registry, repo_path) = uri.split_once('/').ok_or_else(invalid)?;
        if repo_path.is_empty() {
            return Err(invalid());
        }

        let mut segments = registry.split('.');

        let account = segments.next().unwrap_or_default();
        if account.len() != ACCOUNT_ID_LEN || !account.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        if segments.next() != Some("dkr") {
            return Err(invalid());
        }

        let fips = match segments.next() {
            Some(ECR_SERVICE) => false,
            Some(ECR_FIPS_SERVICE) => true,
            _ => return Err(invalid()),
        };

        let region = segments.next().unwrap_or_default();
        if region.is_empty() {
            return Err(invalid());
        }

        // The domain itself is not validated, but it has to be there
        if !segments.any(|s| !s.is_empty()) {
            return Err(invalid());
        }

        Ok(Self {
            account: account.to_string(),
            region: region.to_string(),
            repo_path: repo_path.to_string(),
            fips,
        })
    }
}

impl FromStr for EcrReference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Resolves a reference prefix for a region, or None if the strategy does not apply
///
type PrefixStrategy = fn(&str, &PartitionRules) -> Option<String>;

/// Prefix strategies in order of precedence, the first prefix found is used
///
const PREFIX_STRATEGIES: [PrefixStrategy; 2] = [override_prefix, derived_prefix];

fn override_prefix(region: &str, rules: &PartitionRules) -> Option<String> {
    rules.prefix_override(region).map(str::to_string)
}

fn derived_prefix(region: &str, _: &PartitionRules) -> Option<String> {
    if !is_generic_region(region) {
        return None;
    }

    let partition = Partition::from_region(region);
    Some(format!("ecr.aws/arn:{partition}:{ECR_SERVICE}:{region}:"))
}

/// Returns the reference prefix for a region, ex. `ecr.aws/arn:aws:ecr:us-west-2:`
///
pub fn reference_prefix(region: &str, rules: &PartitionRules) -> Result<String, Error> {
    PREFIX_STRATEGIES
        .iter()
        .find_map(|strategy| strategy(region, rules))
        .ok_or_else(|| Error::invalid_region(region))
}

/// Builds the canonical pull-through cache reference for a parsed ECR uri,
///
/// ```text
/// ecr.aws/arn:<partition>:<ecr|ecr-fips>:<region>:<account>:repository/<repo_path>
/// ```
///
pub fn build(reference: &EcrReference, rules: &PartitionRules) -> Result<String, Error> {
    let mut prefix = reference_prefix(&reference.region, rules)?;

    if reference.fips {
        if !rules.supports_fips(&reference.region) {
            return Err(Error::fips_unsupported_region(&reference.region));
        }

        prefix = prefix.replacen(
            &format!(":{ECR_SERVICE}:"),
            &format!(":{ECR_FIPS_SERVICE}:"),
            1,
        );
    }

    let canonical = format!(
        "{prefix}{}:repository/{}",
        reference.account, reference.repo_path
    );
    event!(Level::DEBUG, "Built ECR reference {canonical}");
    Ok(canonical)
}

/// Parses an ECR image uri and builds its canonical pull-through cache reference,
///
pub fn fetch_ecr_ref(uri: &str, rules: &PartitionRules) -> Result<String, Error> {
    build(&EcrReference::parse(uri)?, rules)
}
