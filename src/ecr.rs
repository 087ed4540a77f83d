//! Translation of ECR image uris into partition-aware pull-through cache references,
//!
//! ```text
//! 111111111111.dkr.ecr.us-gov-west-1.amazonaws.com/bottlerocket/container:1.2.3
//! ecr.aws/arn:aws-us-gov:ecr:us-gov-west-1:111111111111:repository/bottlerocket/container:1.2.3
//! ```
//!
mod reference;
pub use reference::build;
pub use reference::fetch_ecr_ref;
pub use reference::reference_prefix;
pub use reference::EcrReference;

mod region;
pub use region::is_generic_region;
pub use region::Partition;
