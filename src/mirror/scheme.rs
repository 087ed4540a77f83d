use std::net::IpAddr;

use hyper::Uri;
use tracing::{event, Level};

use crate::Error;

/// Scheme, host and port of a mirror endpoint,
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferredEndpoint {
    pub scheme: String,
    pub host: String,
    pub port: Option<u16>,
}

impl InferredEndpoint {
    /// Returns host[:port],
    ///
    pub fn authority(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{port}", self.host),
            None => self.host.clone(),
        }
    }
}

/// Parses a mirror endpoint into scheme, host and port,
///
/// An endpoint w/ an explicit scheme keeps it. Otherwise localhost and loopback addresses
/// are reached over http, and everything else over https.
///
pub fn infer_endpoint(endpoint: &str) -> Result<InferredEndpoint, Error> {
    let url = if endpoint.contains("://") {
        endpoint.to_string()
    } else {
        let authority = endpoint.split('/').next().unwrap_or_default();
        let scheme = if is_localhost(authority) { "http" } else { "https" };
        event!(Level::TRACE, "Inferred scheme {scheme} for {endpoint}");
        format!("{scheme}://{endpoint}")
    };

    let uri = url
        .parse::<Uri>()
        .map_err(|_| Error::malformed_endpoint(endpoint))?;

    // A port that is present but not a u16 would otherwise be dropped
    if uri.port().is_some() && uri.port_u16().is_none() {
        return Err(Error::malformed_endpoint(endpoint));
    }

    match (uri.scheme_str(), uri.host()) {
        (Some(scheme), Some(host)) if is_valid_host(host) => Ok(InferredEndpoint {
            scheme: scheme.to_string(),
            host: host.to_string(),
            port: uri.port_u16(),
        }),
        _ => Err(Error::malformed_endpoint(endpoint)),
    }
}

/// Returns true if the host part of host[:port] is localhost or a loopback address,
///
pub fn is_localhost(host: &str) -> bool {
    let host = strip_port(host);

    host == "localhost"
        || host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .map(|ip| ip.is_loopback())
            .unwrap_or_default()
}

/// Removes a trailing :port, leaving bare ipv6 addresses alone
///
fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return host.split_once(']').map(|(h, _)| &host[..h.len() + 1]).unwrap_or(host);
    }

    match host.rsplit_once(':') {
        Some((h, port)) if !h.contains(':') && port.chars().all(|c| c.is_ascii_digit()) => h,
        _ => host,
    }
}

fn is_valid_host(host: &str) -> bool {
    if host.starts_with('[') {
        return host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .is_ok();
    }

    !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_'))
}

#[allow(unused_imports)]
mod tests {
    use super::{infer_endpoint, is_localhost, InferredEndpoint};
    use crate::ErrorCategory;

    #[test]
    fn test_infer_scheme() {
        let inferred = infer_endpoint("localhost").expect("should parse");
        assert_eq!("http", inferred.scheme);
        assert_eq!("localhost", inferred.host);
        assert_eq!(None, inferred.port);

        let inferred = infer_endpoint("localhost:5000").expect("should parse");
        assert_eq!("http", inferred.scheme);
        assert_eq!("localhost:5000", inferred.authority());

        let inferred = infer_endpoint("127.0.0.1").expect("should parse");
        assert_eq!("http", inferred.scheme);

        let inferred = infer_endpoint("127.10.0.3:8578").expect("should parse");
        assert_eq!("http", inferred.scheme);
        assert_eq!(Some(8578), inferred.port);

        let inferred = infer_endpoint("[::1]:5000").expect("should parse");
        assert_eq!("http", inferred.scheme);

        let inferred = infer_endpoint("198.158.0.0").expect("should parse");
        assert_eq!("https", inferred.scheme);

        let inferred = infer_endpoint("localhost:5000/v2").expect("should parse");
        assert_eq!("http", inferred.scheme);
        assert_eq!("localhost:5000", inferred.authority());

        let inferred = infer_endpoint("127.0.0.1:5000/x").expect("should parse");
        assert_eq!("http", inferred.scheme);
        assert_eq!("127.0.0.1:5000", inferred.authority());

        let inferred = infer_endpoint("example.com/v2").expect("should parse");
        assert_eq!("https", inferred.scheme);

        let inferred = infer_endpoint("example.com:443").expect("should parse");
        assert_eq!(
            InferredEndpoint {
                scheme: "https".to_string(),
                host: "example.com".to_string(),
                port: Some(443),
            },
            inferred
        );
    }

    #[test]
    fn test_explicit_scheme() {
        let inferred = infer_endpoint("http://198.158.0.0").expect("should parse");
        assert_eq!("http", inferred.scheme);
        assert_eq!("198.158.0.0", inferred.authority());

        let inferred = infer_endpoint("https://localhost:5000").expect("should parse");
        assert_eq!("https", inferred.scheme);
        assert_eq!("localhost:5000", inferred.authority());
    }

    #[test]
    fn test_malformed_endpoint() {
        assert!(infer_endpoint("$#%#$$#%#$").is_err());
        assert!(infer_endpoint("").is_err());
        assert!(infer_endpoint("http://").is_err());

        // Ports that are out of range or not numbers
        for endpoint in [
            "localhost:99999",
            "http://mirror.example.com:70000",
            "example.com:65536",
            "localhost:abc",
        ] {
            let err = infer_endpoint(endpoint).expect_err("should not parse");
            assert_eq!(
                &ErrorCategory::MalformedEndpoint(endpoint.to_string()),
                err.category(),
                "{endpoint}"
            );
        }
    }

    #[test]
    fn test_is_localhost() {
        assert!(is_localhost("localhost"));
        assert!(is_localhost("localhost:5000"));
        assert!(is_localhost("::1"));
        assert!(is_localhost("[::1]:5000"));
        assert!(!is_localhost("example.com"));
        assert!(!is_localhost("10.0.0.1:5000"));
    }
}
