//! Directory API client implementation.

use popwatch_core::{DirectorySearchResponse, ListedPop, PopwatchError, Result};
use reqwest::Client as HttpClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// The public directory API base URL
const DEFAULT_BASE_URL: &str = "https://aws.amazon.com/api";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Directory holding the edge-location map pins
const DIRECTORY_ID: &str = "cf-map-pins";

/// Tag marking an entry as an edge PoP (as opposed to a regional cache)
const EDGE_LOCATION_TAG: &str = "Edge Locations";

/// Entry ids come back scoped to the directory
const ID_PREFIX: &str = "cf-map-pins#";

/// Largest page the search endpoint serves
const PAGE_SIZE: u64 = 500;

/// Locale the directory is queried in. The pin metadata is cosmetic, so
/// the historical default is kept and made overridable.
const DEFAULT_LOCALE: &str = "ja_JP";

/// Client for the public PoP directory API
#[derive(Clone)]
pub struct DirectoryClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    base_url: String,
    locale: String,
}

impl DirectoryClient {
    /// Create a new client using default settings
    #[must_use]
    pub fn new() -> Self {
        DirectoryClientBuilder::new().build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> DirectoryClientBuilder {
        DirectoryClientBuilder::new()
    }

    /// Fetch every edge location the directory knows about.
    ///
    /// Entries tagged as anything other than an edge location are skipped,
    /// as are entries whose id does not carry the expected directory
    /// prefix (those are warned about). The returned listing carries no
    /// code/subnet annotations; callers merge those from an existing
    /// listing.
    pub async fn edge_locations(&self) -> Result<Vec<ListedPop>> {
        let size = PAGE_SIZE.to_string();
        let url = self.build_url(
            "/dirs/items/search",
            &[
                ("item.directoryId", DIRECTORY_ID),
                ("size", &size),
                ("item.locale", &self.inner.locale),
            ],
        );
        debug!(url = %url, "GET request");

        let response = self
            .inner
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| PopwatchError::Http(e.to_string()))?;

        let response: DirectorySearchResponse = self.handle_response(response).await?;

        if response.metadata.count > PAGE_SIZE {
            warn!(
                count = response.metadata.count,
                page_size = PAGE_SIZE,
                "directory holds more entries than one page; listing is truncated"
            );
        }

        let mut pops = Vec::new();
        for hit in response.items {
            if !hit.has_tag(EDGE_LOCATION_TAG) {
                continue;
            }
            let item = hit.item;
            let Some(id) = item.id.strip_prefix(ID_PREFIX) else {
                warn!(name = %item.name, id = %item.id, "entry has invalid id, skipping");
                continue;
            };
            pops.push(ListedPop {
                id: id.to_string(),
                name: item.name,
                location: item.additional_fields.pin_name,
                country: item.additional_fields.pin_description,
                subnet: None,
                code: None,
                neighbors: Vec::new(),
            });
        }

        Ok(pops)
    }

    /// Build a URL with query parameters
    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!("{}{}", self.inner.base_url, path);

        let mut separator = '?';
        for (key, value) in params {
            url.push(separator);
            separator = '&';
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }

        url
    }

    /// Handle an API response that returns JSON
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| PopwatchError::Http(e.to_string()))?;
            serde_json::from_str(&body).map_err(PopwatchError::Json)
        } else {
            let code = status.as_u16();
            let body = response.text().await.unwrap_or_default();

            // Try to parse an error message from JSON
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);

            Err(PopwatchError::Api { code, message })
        }
    }
}

impl Default for DirectoryClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for configuring a [`DirectoryClient`]
pub struct DirectoryClientBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: String,
    locale: String,
}

impl DirectoryClientBuilder {
    /// Create a new builder with defaults
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("popwatch/{}", env!("CARGO_PKG_VERSION")),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }

    /// Set the base URL (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set the locale the directory is queried in
    #[must_use]
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Build the client
    #[must_use]
    pub fn build(self) -> DirectoryClient {
        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .expect("Failed to build HTTP client");

        DirectoryClient {
            inner: Arc::new(ClientInner {
                http,
                base_url: self.base_url,
                locale: self.locale,
            }),
        }
    }
}

impl Default for DirectoryClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// URL encoding helper
mod urlencoding {
    pub fn encode(s: &str) -> String {
        url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
    }
}
