use std::fmt::Display;

use tracing::error;

/// Struct to represent when the library encounters an error,
///
#[derive(Debug)]
pub struct Error {
    category: ErrorCategory,
}

impl Error {
    /// An endpoint configured under a mirror could not be parsed as a url or host,
    ///
    pub fn malformed_endpoint(endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        error!("Malformed mirror endpoint, {endpoint:?}");
        Error {
            category: ErrorCategory::MalformedEndpoint(endpoint),
        }
    }

    /// The image uri does not have the shape of an ECR image uri,
    ///
    pub fn invalid_ecr_uri(uri: impl Into<String>) -> Self {
        let uri = uri.into();
        error!("Invalid ECR image uri, {uri:?}");
        Error {
            category: ErrorCategory::InvalidEcrUri(uri),
        }
    }

    /// The region has no prefix override and does not look like an aws region,
    ///
    pub fn invalid_region(region: impl Into<String>) -> Self {
        let region = region.into();
        error!("Invalid region, {region:?}");
        Error {
            category: ErrorCategory::InvalidRegion(region),
        }
    }

    /// A FIPS endpoint was requested for a region that does not offer one,
    ///
    pub fn fips_unsupported_region(region: impl Into<String>) -> Self {
        let region = region.into();
        error!("FIPS is not supported in region, {region:?}");
        Error {
            category: ErrorCategory::FipsUnsupportedRegion(region),
        }
    }

    /// Returns an error that indicates a data-format issue,
    ///
    pub fn data_format() -> Self {
        Error {
            category: ErrorCategory::DataFormat,
        }
    }

    /// Returns an error that indicates that there was an error with the system env. For example reading a file, etc.
    ///
    pub fn system_environment() -> Self {
        Error {
            category: ErrorCategory::SystemEnvironment,
        }
    }

    /// Returns the category of this error,
    ///
    pub fn category(&self) -> &ErrorCategory {
        &self.category
    }
}

/// Enumeration of error categories,
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A mirror endpoint that is not a valid url or host, with the endpoint as configured
    MalformedEndpoint(String),
    /// An image uri that is not shaped like an ECR image uri
    InvalidEcrUri(String),
    /// A region w/o a prefix override that is not shaped like an aws region
    InvalidRegion(String),
    /// A FIPS reference for a region that does not offer ecr-fips
    FipsUnsupportedRegion(String),
    /// Content could not be deserialized
    DataFormat,
    /// The system environment could not be used, ex. a file could not be read
    SystemEnvironment,
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.category {
            ErrorCategory::MalformedEndpoint(endpoint) => {
                write!(f, "malformed mirror endpoint {endpoint:?}")
            }
            ErrorCategory::InvalidEcrUri(uri) => write!(f, "invalid ECR image uri {uri:?}"),
            ErrorCategory::InvalidRegion(region) => write!(f, "invalid region {region:?}"),
            ErrorCategory::FipsUnsupportedRegion(region) => {
                write!(f, "FIPS is not supported in region {region:?}")
            }
            ErrorCategory::DataFormat => write!(f, "invalid data format"),
            ErrorCategory::SystemEnvironment => write!(f, "system environment error"),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        error!("Error w/ system i/o, {value}");
        Self::system_environment()
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        error!("Error with json serialization, {value}");
        Self::data_format()
    }
}

impl From<toml::de::Error> for Error {
    fn from(value: toml::de::Error) -> Self {
        error!("Error parsing toml, {value}");
        Self::data_format()
    }
}

#[test]
fn test_error_display() {
    let error = Error::invalid_region("outer-space");
    assert_eq!(
        &ErrorCategory::InvalidRegion("outer-space".to_string()),
        error.category()
    );
    assert_eq!(r#"invalid region "outer-space""#, format!("{error}"));
}
