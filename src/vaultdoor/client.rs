//! HTTP plumbing for the Vaultdoor API.
//!
//! [`BaseUrl`] builds endpoint URLs, [`VaultTransport`] is the authenticated
//! fetch capability, and [`HttpTransport`] implements it on top of reqwest.

use crate::error::{Result, VaultError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Url;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

/// Validated Vaultdoor base URL.
///
/// Always absolute http(s) and always ending in `/`, so endpoint paths are
/// resolved below it rather than replacing its last segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Parse and normalize a base URL.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut url = Url::parse(raw.trim())
            .map_err(|e| VaultError::invalid_base_url(format!("{}: {}", raw, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(VaultError::invalid_base_url(format!(
                "{}: scheme must be http or https",
                raw
            )));
        }
        if url.cannot_be_a_base() || url.host_str().is_none() {
            return Err(VaultError::invalid_base_url(format!("{}: missing host", raw)));
        }

        url.set_query(None);
        url.set_fragment(None);
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self(url))
    }

    /// Build `{base}seg1/seg2/...`, percent-encoding each segment.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.0.clone();
        url.path_segments_mut()
            .map_err(|_| VaultError::invalid_base_url(self.0.as_str()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Authenticated GET capability.
///
/// Any HTTP status is an `Ok`; only failures to obtain a response are errors.
#[allow(async_fn_in_trait)]
pub trait VaultTransport {
    async fn get(&self, url: &Url) -> Result<TransportResponse>;
}

/// Options for the reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct TransportOptions {
    /// Bearer token attached to every request.
    pub token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Honour HTTP(S)_PROXY from the environment.
    pub use_system_proxy: bool,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            token: None,
            timeout: Duration::from_secs(30),
            use_system_proxy: true,
        }
    }
}

/// reqwest implementation of [`VaultTransport`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(options: &TransportOptions) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(ref token) = options.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| VaultError::Client(format!("invalid token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        } else {
            info!("No Vaultdoor token configured, sending unauthenticated requests");
        }

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(options.timeout)
            .user_agent(concat!("vaultsummary/", env!("CARGO_PKG_VERSION")));
        if !options.use_system_proxy {
            builder = builder.no_proxy();
        }

        let client = builder
            .build()
            .map_err(|e| VaultError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

impl VaultTransport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<TransportResponse> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("GET {} -> {}", url, status);
        Ok(TransportResponse { status, body })
    }
}

/// Vaultdoor API client over some transport.
#[derive(Debug, Clone)]
pub struct VaultdoorClient<T = HttpTransport> {
    pub(super) transport: T,
    pub(super) base_url: BaseUrl,
}

impl<T: VaultTransport> VaultdoorClient<T> {
    pub fn new(transport: T, base_url: BaseUrl) -> Self {
        Self {
            transport,
            base_url,
        }
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vaultdoor::testing::{closed_port_url, serve};
    use std::collections::HashMap;

    #[test]
    fn test_base_url_appends_separator() {
        let base = BaseUrl::parse("https://vaultdoor-server").unwrap();
        assert_eq!(base.as_str(), "https://vaultdoor-server/");

        let nested = BaseUrl::parse("https://host/vaultdoor").unwrap();
        assert_eq!(nested.as_str(), "https://host/vaultdoor/");
    }

    #[test]
    fn test_base_url_rejects_bad_input() {
        assert!(BaseUrl::parse("not a url").is_err());
        assert!(BaseUrl::parse("ftp://vaultdoor-server/").is_err());
        assert!(BaseUrl::parse("mailto:ops@example.com").is_err());
    }

    #[test]
    fn test_endpoint_paths() {
        let base = BaseUrl::parse("https://vaultdoor-server/").unwrap();
        let url = base
            .endpoint(&["api", "vault", "vault-id-here", "projectSummary", "123"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://vaultdoor-server/api/vault/vault-id-here/projectSummary/123"
        );

        let nested = BaseUrl::parse("https://host/vaultdoor/").unwrap();
        assert_eq!(
            nested.endpoint(&["api", "vault"]).unwrap().as_str(),
            "https://host/vaultdoor/api/vault"
        );
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let base = BaseUrl::parse("https://vaultdoor-server/").unwrap();
        let url = base.endpoint(&["api", "vault", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "https://vaultdoor-server/api/vault/a%2Fb%20c");
    }

    fn direct() -> TransportOptions {
        TransportOptions {
            use_system_proxy: false,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_http_transport_sends_token() {
        let mut routes = HashMap::new();
        routes.insert("/api/vault".to_string(), (200, "[]".to_string()));
        let server = serve(routes).await;

        let transport = HttpTransport::new(&TransportOptions {
            token: Some("sekrit".to_string()),
            ..direct()
        })
        .unwrap();
        let base = BaseUrl::parse(&server.base_url).unwrap();
        let response = transport
            .get(&base.endpoint(&["api", "vault"]).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, "[]");

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        let head = requests[0].to_lowercase();
        assert!(head.starts_with("get /api/vault "));
        assert!(head.contains("authorization: bearer sekrit"));
    }

    #[tokio::test]
    async fn test_http_transport_passes_error_status_through() {
        let server = serve(HashMap::new()).await;
        let transport = HttpTransport::new(&direct()).unwrap();
        let base = BaseUrl::parse(&server.base_url).unwrap();

        let response = transport
            .get(&base.endpoint(&["missing"]).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status, 404);
        assert!(!response.is_ok());
    }

    #[tokio::test]
    async fn test_http_transport_connection_refused() {
        let transport = HttpTransport::new(&direct()).unwrap();
        let base = BaseUrl::parse(&closed_port_url()).unwrap();

        let err = transport
            .get(&base.endpoint(&["api", "vault"]).unwrap())
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn test_rejects_unprintable_token() {
        let result = HttpTransport::new(&TransportOptions {
            token: Some("bad\ntoken".to_string()),
            ..Default::default()
        });
        assert!(matches!(result, Err(VaultError::Client(_))));
    }
}
