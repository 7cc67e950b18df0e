//! Storage locator decomposition
//!
//! Object URLs use virtual-hosted addressing:
//! `https://<bucket>.<region>.<provider-domain>/<key>`.
//! The first two host labels name the bucket and the region, the path
//! (without its leading slash, percent-decoded) is the object key.

use url::{Host, Url};

use crate::error::{Error, Result};

/// Provider domain used when a URL host carries only `<bucket>.<region>`
pub const DEFAULT_PROVIDER_DOMAIN: &str = "digitaloceanspaces.com";

/// Storage coordinates derived from an object or bucket URL
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageLocator {
    /// Bucket name (first host label)
    pub bucket: String,
    /// Region (second host label)
    pub region: String,
    /// Object key (empty for bucket-level URLs)
    pub key: String,
    /// URL scheme, reused for the service endpoint
    pub scheme: String,
    /// Remaining host labels after the region (may be empty)
    pub domain: String,
    /// Explicit port, if the URL carried a non-default one
    pub port: Option<u16>,
}

impl StorageLocator {
    /// Whether this locator addresses the bucket rather than an object
    pub fn is_bucket(&self) -> bool {
        self.key.is_empty()
    }

    /// Same bucket and endpoint, different object key
    pub fn with_key(&self, key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..self.clone()
        }
    }

    /// Service endpoint for this locator: `<scheme>://<region>.<domain>[:<port>]`
    ///
    /// `default_domain` is used when the URL host had no labels past the region.
    pub fn endpoint(&self, default_domain: &str) -> String {
        let domain = if self.domain.is_empty() {
            default_domain
        } else {
            &self.domain
        };
        match self.port {
            Some(port) => format!("{}://{}.{}:{}", self.scheme, self.region, domain, port),
            None => format!("{}://{}.{}", self.scheme, self.region, domain),
        }
    }
}

impl std::fmt::Display for StorageLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.key.is_empty() {
            write!(f, "{}", self.bucket)
        } else {
            write!(f, "{}/{}", self.bucket, self.key)
        }
    }
}

/// Decompose a URL into bucket, region and object key
///
/// Query strings and fragments are ignored. The key is taken from the path
/// as it appears in the URL; it is not percent-decoded.
pub fn decompose(url: &str) -> Result<StorageLocator> {
    let parsed =
        Url::parse(url).map_err(|e| Error::MalformedUrl(format!("'{url}' is not a URL: {e}")))?;

    let host = match parsed.host() {
        Some(Host::Domain(host)) => host,
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => {
            return Err(Error::MalformedUrl(format!(
                "'{url}' has an IP address host. Expected: <bucket>.<region>.<domain>"
            )));
        }
        None => {
            return Err(Error::MalformedUrl(format!("'{url}' has no host")));
        }
    };

    let mut labels = host.split('.');
    let (bucket, region) = match (labels.next(), labels.next()) {
        (Some(bucket), Some(region)) if !bucket.is_empty() && !region.is_empty() => {
            (bucket, region)
        }
        _ => {
            return Err(Error::MalformedUrl(format!(
                "host '{host}' in '{url}' must have at least two labels: <bucket>.<region>[.<domain>]"
            )));
        }
    };
    let domain = labels.collect::<Vec<_>>().join(".");

    // Url::parse percent-encodes the path; object keys are stored decoded
    let raw_key = parsed.path().trim_start_matches('/');
    let key = urlencoding::decode(raw_key).map_err(|e| {
        Error::MalformedUrl(format!("object key in '{url}' is not valid UTF-8: {e}"))
    })?;

    Ok(StorageLocator {
        bucket: bucket.to_string(),
        region: region.to_string(),
        key: key.into_owned(),
        scheme: parsed.scheme().to_string(),
        domain,
        port: parsed.port(),
    })
}
