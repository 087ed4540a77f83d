use std::fmt::Display;

use logos::Logos;

/// Tokens of an aws region name, ex. `us-gov-west-1` lexes to
/// `Word Hyphen Word Hyphen Word Hyphen Number`
///
#[derive(Logos, Debug, PartialEq, Eq)]
enum RegionToken {
    #[regex("[a-z]+")]
    Word,
    #[token("-")]
    Hyphen,
    #[regex("[0-9]+")]
    Number,
    #[error]
    Error,
}

/// Returns true if region has the generic aws region shape,
///
/// One or more lowercase words each followed by a hyphen, ending in a number, ex. `us-west-2`,
/// `cn-north-1`, `us-gov-west-1`, `mx-central-1`.
///
pub fn is_generic_region(region: &str) -> bool {
    let tokens = RegionToken::lexer(region).collect::<Vec<_>>();

    match tokens.split_last() {
        Some((RegionToken::Number, head)) => {
            !head.is_empty()
                && head
                    .chunks(2)
                    .all(|pair| matches!(pair, [RegionToken::Word, RegionToken::Hyphen]))
        }
        _ => false,
    }
}

/// Aws partitions that can be derived from a region name,
///
/// Other partitions, ex. aws-iso-e, are only reachable through reference prefix overrides.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Aws,
    AwsCn,
    AwsUsGov,
}

impl Partition {
    /// Derives the partition from the region prefix,
    ///
    pub fn from_region(region: &str) -> Self {
        if region.starts_with("cn-") {
            Partition::AwsCn
        } else if region.starts_with("us-gov-") {
            Partition::AwsUsGov
        } else {
            Partition::Aws
        }
    }

    /// Returns the partition name used in arns,
    ///
    pub fn as_str(&self) -> &'static str {
        match self {
            Partition::Aws => "aws",
            Partition::AwsCn => "aws-cn",
            Partition::AwsUsGov => "aws-us-gov",
        }
    }
}

impl Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[test]
fn test_region_shape() {
    assert!(is_generic_region("us-west-2"));
    assert!(is_generic_region("cn-north-1"));
    assert!(is_generic_region("us-gov-west-1"));
    assert!(is_generic_region("mx-central-1"));
    assert!(is_generic_region("eu-isoe-west-1"));

    assert!(!is_generic_region(""));
    assert!(!is_generic_region("outer-space"));
    assert!(!is_generic_region("1"));
    assert!(!is_generic_region("us-west-2a"));
    assert!(!is_generic_region("us--west-2"));
    assert!(!is_generic_region("-us-west-2"));
    assert!(!is_generic_region("US-WEST-2"));
    assert!(!is_generic_region("us-west 2"));
}

#[test]
fn test_partition_from_region() {
    assert_eq!(Partition::Aws, Partition::from_region("us-west-2"));
    assert_eq!(Partition::Aws, Partition::from_region("mx-central-1"));
    assert_eq!(Partition::AwsCn, Partition::from_region("cn-northwest-1"));
    assert_eq!(Partition::AwsUsGov, Partition::from_region("us-gov-east-1"));
    assert_eq!("aws-us-gov", format!("{}", Partition::AwsUsGov));
}
