use crate::UrlError;
use url::Url;

/// The domain scope of a crawl session
///
/// Holds the scheme and host of the crawl's root URL, plus a normalized
/// form of the host with any leading "www." removed. All same-domain
/// decisions go through this type, so "www.example.com" and "example.com"
/// are treated as one site.
#[derive(Debug, Clone)]
pub struct DomainScope {
    scheme: String,
    host: String,
    normalized_host: String,
}

impl DomainScope {
    /// Creates a domain scope from the crawl's start URL
    ///
    /// A start URL without an http(s) scheme or without a host is rejected;
    /// the caller treats this as fatal and aborts before seeding.
    ///
    /// # Examples
    ///
    /// ```
    /// use sitegraph::url::DomainScope;
    ///
    /// let scope = DomainScope::from_start_url("https://www.example.com/about").unwrap();
    /// assert_eq!(scope.host(), "www.example.com");
    /// assert_eq!(scope.normalized_host(), "example.com");
    /// assert_eq!(scope.root_url(), "https://www.example.com");
    /// ```
    pub fn from_start_url(start_url: &str) -> Result<Self, UrlError> {
        let url = Url::parse(start_url).map_err(|e| UrlError::Parse(e.to_string()))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UrlError::InvalidScheme(url.scheme().to_string()));
        }

        let host = url.host_str().ok_or(UrlError::MissingHost)?.to_lowercase();

        Ok(Self {
            scheme: url.scheme().to_string(),
            normalized_host: strip_www(&host).to_string(),
            host,
        })
    }

    /// The root URL used for constructing well-known paths like /sitemap.xml
    pub fn root_url(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }

    /// The host exactly as it appeared in the start URL (lowercased)
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The host with any leading "www." removed
    pub fn normalized_host(&self) -> &str {
        &self.normalized_host
    }

    /// Checks whether a URL belongs to the crawled domain
    ///
    /// Parses the URL, strips a leading "www." from its host, and compares
    /// against the root's normalized host. Unparseable or host-less URLs
    /// are never same-domain. Pure, no side effects.
    ///
    /// # Examples
    ///
    /// ```
    /// use sitegraph::url::DomainScope;
    ///
    /// let scope = DomainScope::from_start_url("http://example.com").unwrap();
    /// assert!(scope.is_same_domain("http://www.example.com/a"));
    /// assert!(scope.is_same_domain("http://example.com/b"));
    /// assert!(!scope.is_same_domain("http://other.com/"));
    /// ```
    pub fn is_same_domain(&self, url: &str) -> bool {
        match Url::parse(url) {
            Ok(parsed) => match parsed.host_str() {
                Some(host) => strip_www(&host.to_lowercase()) == self.normalized_host,
                None => false,
            },
            Err(_) => false,
        }
    }
}

/// Strips a single leading "www." from a host
fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}
