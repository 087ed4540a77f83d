use std::{
    collections::{BTreeMap, BTreeSet},
    path::Path,
};

use serde::{Deserialize, Serialize};
use tracing::{event, Level};

use crate::Error;

/// Static knowledge about ECR regions that cannot be derived from the region name,
///
/// Example:
///
/// ```json
/// {
///     "fips_supported_regions": ["us-east-1", "us-west-2", "us-gov-west-1"],
///     "reference_prefix_overrides": {
///         "eu-isoe-west-1": "ecr.aws/arn:aws-iso-e:ecr:eu-isoe-west-1:"
///     }
/// }
/// ```
///
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PartitionRules {
    /// Regions that serve an ecr-fips endpoint
    ///
    #[serde(default)]
    pub fips_supported_regions: BTreeSet<String>,
    /// Region to reference prefix, ex. `ecr.aws/arn:aws-iso-e:ecr:eu-isoe-west-1:`
    ///
    #[serde(default)]
    pub reference_prefix_overrides: BTreeMap<String, String>,
}

impl PartitionRules {
    /// Tries to load rules from a json file,
    ///
    pub async fn try_load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let content = tokio::fs::read_to_string(path.as_ref()).await?;
        event!(Level::DEBUG, "Loaded partition rules from {:?}", path.as_ref());
        Self::try_load_content(content)
    }

    /// Tries to parse content as json partition rules,
    ///
    pub fn try_load_content(content: impl AsRef<str>) -> Result<Self, Error> {
        Ok(serde_json::from_str(content.as_ref())?)
    }

    /// Adds a region that supports FIPS,
    ///
    pub fn with_fips_region(mut self, region: impl Into<String>) -> Self {
        self.fips_supported_regions.insert(region.into());
        self
    }

    /// Adds a literal reference prefix for a region,
    ///
    pub fn with_prefix_override(
        mut self,
        region: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        self.reference_prefix_overrides
            .insert(region.into(), prefix.into());
        self
    }

    /// Returns true if the region serves an ecr-fips endpoint,
    ///
    pub fn supports_fips(&self, region: &str) -> bool {
        self.fips_supported_regions.contains(region)
    }

    /// Returns the override prefix for a region, if one is configured,
    ///
    pub fn prefix_override(&self, region: &str) -> Option<&str> {
        self.reference_prefix_overrides
            .get(region)
            .map(String::as_str)
    }
}

#[test]
fn test_load_partition_rules() {
    let rules = PartitionRules::try_load_content(
        r#"{
    "fips_supported_regions": ["us-east-1", "us-gov-west-1"],
    "reference_prefix_overrides": {
        "eu-isoe-west-1": "ecr.aws/arn:aws-iso-e:ecr:eu-isoe-west-1:"
    }
}"#,
    )
    .expect("should load");

    assert_eq!(
        PartitionRules::default()
            .with_fips_region("us-east-1")
            .with_fips_region("us-gov-west-1")
            .with_prefix_override("eu-isoe-west-1", "ecr.aws/arn:aws-iso-e:ecr:eu-isoe-west-1:"),
        rules
    );
    assert!(rules.supports_fips("us-gov-west-1"));
    assert!(!rules.supports_fips("ca-central-1"));
    assert_eq!(
        Some("ecr.aws/arn:aws-iso-e:ecr:eu-isoe-west-1:"),
        rules.prefix_override("eu-isoe-west-1")
    );

    let rules = PartitionRules::try_load_content("{}").expect("should load");
    assert_eq!(PartitionRules::default(), rules);

    for content in ["not json", r#"{"fips_supported_regions": 5}"#] {
        let err = PartitionRules::try_load_content(content).expect_err("should not load");
        assert_eq!(&crate::ErrorCategory::DataFormat, err.category(), "{content}");
    }
}
