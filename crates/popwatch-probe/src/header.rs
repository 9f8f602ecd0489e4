//! Response-header probing.

use crate::error::{ProbeError, ProbeResult};
use crate::{Probe, ProbeKind};
use async_trait::async_trait;
use popwatch_core::{ExpectedPrefix, Observation, Pop};
use std::time::Duration;
use tracing::{debug, warn};

/// Routing-identifier header the edge stamps on responses
pub const DEFAULT_HEADER: &str = "x-amz-cf-pop";

/// Probes a PoP by requesting `{code}.{domain}` and reading the
/// routing-identifier response header.
pub struct HeaderProbe {
    domain: String,
    header: String,
    http: reqwest::Client,
}

impl HeaderProbe {
    /// Create a header probe for the given base domain.
    ///
    /// `header` is the response header carrying the routing identifier;
    /// `timeout` bounds each request.
    pub fn new(
        domain: impl Into<String>,
        header: impl Into<String>,
        timeout: Duration,
    ) -> ProbeResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("popwatch/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProbeError::Http(e.to_string()))?;

        Ok(Self {
            domain: domain.into(),
            header: header.into(),
            http,
        })
    }

    /// HEAD the hostname and pull the routing identifier out of the
    /// response headers. Absent or non-UTF-8 header values read as empty.
    async fn fetch_location(&self, hostname: &str) -> ProbeResult<String> {
        let url = format!("http://{hostname}");
        debug!(url = %url, "HEAD request");

        let response = self
            .http
            .head(&url)
            .send()
            .await
            .map_err(|e| ProbeError::Http(e.to_string()))?;

        Ok(response
            .headers()
            .get(self.header.as_str())
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string())
    }
}

#[async_trait]
impl Probe for HeaderProbe {
    fn kind(&self) -> ProbeKind {
        ProbeKind::Header
    }

    async fn observe(&self, pop: &Pop) -> Observation {
        let hostname = format!("{}.{}", pop.code_lower(), self.domain);

        let observed = match self.fetch_location(&hostname).await {
            Ok(value) => value,
            Err(e) => {
                warn!(code = %pop.code, host = %hostname, error = %e, "header probe failed");
                String::new()
            }
        };

        Observation::Identifier {
            observed,
            expected: ExpectedPrefix::Code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn pop(code: &str) -> Pop {
        Pop {
            id: format!("{code}-test"),
            name: None,
            location: None,
            country: None,
            subnet: "1.2.3.0/24".parse().unwrap(),
            code: code.to_string(),
            neighbors: Vec::new(),
        }
    }

    // `observe` builds `{code}.{domain}` hostnames, which a test resolver
    // cannot answer for; these tests drive `fetch_location` with the mock
    // server's own address instead.

    #[tokio::test]
    async fn header_value_is_observed() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(200).insert_header(DEFAULT_HEADER, "NRT52-P1"))
            .mount(&server)
            .await;

        let probe =
            HeaderProbe::new("example.net", DEFAULT_HEADER, Duration::from_secs(2)).unwrap();
        let hostname = server.address().to_string();

        assert_eq!(probe.fetch_location(&hostname).await.unwrap(), "NRT52-P1");
    }

    #[tokio::test]
    async fn missing_header_reads_as_empty() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let probe =
            HeaderProbe::new("example.net", DEFAULT_HEADER, Duration::from_secs(2)).unwrap();
        let hostname = server.address().to_string();

        assert_eq!(probe.fetch_location(&hostname).await.unwrap(), "");
    }

    #[tokio::test]
    async fn connection_failure_degrades_to_empty_observation() {
        // Reserved TLD, nothing resolves; the request errors and observe
        // absorbs it
        let probe =
            HeaderProbe::new("invalid.test", DEFAULT_HEADER, Duration::from_secs(1)).unwrap();
        let observation = probe.observe(&pop("NRT")).await;

        assert_eq!(
            observation,
            Observation::Identifier {
                observed: String::new(),
                expected: ExpectedPrefix::Code,
            }
        );
    }
}
