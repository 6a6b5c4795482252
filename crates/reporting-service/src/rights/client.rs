//! Reqwest-based client for the reference-data rights endpoint.

use std::sync::Arc;
use std::time::Instant;

use reporting_core::model::Right;
use reqwest::{Client, StatusCode};
use url::Url;

use super::{ReferenceDataConfig, RightLookup, RightLookupError};
use crate::TRACING_TARGET_RIGHTS;

struct ReferenceDataClientInner {
    http: Client,
    config: ReferenceDataConfig,
}

/// HTTP client resolving rights through
/// `GET {base_url}/api/rights/search?name={name}`.
///
/// A `200` answer is decoded as the right, `404` means the right is unknown
/// and any other status is an error.
#[derive(Clone)]
pub struct ReferenceDataClient {
    inner: Arc<ReferenceDataClientInner>,
}

impl std::fmt::Debug for ReferenceDataClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReferenceDataClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl ReferenceDataClient {
    /// Creates a client with the given configuration.
    pub fn new(config: ReferenceDataConfig) -> Result<Self, RightLookupError> {
        let timeout = config.effective_timeout();

        tracing::debug!(
            target: TRACING_TARGET_RIGHTS,
            base_url = %config.base_url,
            timeout_ms = timeout.as_millis(),
            "Creating reference-data client"
        );

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(config.effective_user_agent())
            .build()?;

        Ok(Self {
            inner: Arc::new(ReferenceDataClientInner { http, config }),
        })
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ReferenceDataConfig {
        &self.inner.config
    }

    /// Builds the search URL for a right name.
    pub(crate) fn search_url(&self, name: &str) -> Result<Url, RightLookupError> {
        let mut url = self.inner.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RightLookupError::InvalidBaseUrl(self.inner.config.base_url.to_string()))?
            .pop_if_empty()
            .extend(["api", "rights", "search"]);
        url.query_pairs_mut().clear().append_pair("name", name);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl RightLookup for ReferenceDataClient {
    async fn find_right(&self, name: &str) -> Result<Option<Right>, RightLookupError> {
        let start = Instant::now();
        let url = self.search_url(name)?;

        tracing::debug!(
            target: TRACING_TARGET_RIGHTS,
            right = name,
            "Looking up right"
        );

        let mut request = self.inner.http.get(url);
        if let Some(token) = &self.inner.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        let right = match status {
            StatusCode::OK => Some(response.json::<Right>().await?),
            StatusCode::NOT_FOUND => None,
            _ => {
                tracing::warn!(
                    target: TRACING_TARGET_RIGHTS,
                    right = name,
                    status = status.as_u16(),
                    "Unexpected status from rights service"
                );
                return Err(RightLookupError::UnexpectedStatus {
                    status: status.as_u16(),
                    right: name.to_owned(),
                });
            }
        };

        tracing::debug!(
            target: TRACING_TARGET_RIGHTS,
            right = name,
            found = right.is_some(),
            elapsed = ?start.elapsed(),
            "Right lookup completed"
        );

        Ok(right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> ReferenceDataClient {
        let config = ReferenceDataConfig::new(Url::parse(base_url).unwrap()).with_timeout(2);
        ReferenceDataClient::new(config).unwrap()
    }

    #[test]
    fn search_url_appends_path_and_encodes_name() {
        let client = client("http://referencedata.local/");
        let url = client.search_url("REPORTS VIEW&ALL").unwrap();
        assert_eq!(
            url.as_str(),
            "http://referencedata.local/api/rights/search?name=REPORTS+VIEW%26ALL"
        );
    }

    #[test]
    fn search_url_keeps_base_path() {
        let client = client("http://gateway.local/referencedata");
        let url = client.search_url("REPORTS_VIEW").unwrap();
        assert_eq!(url.path(), "/referencedata/api/rights/search");
    }

    #[test]
    fn cannot_be_a_base_url_is_rejected() {
        let client = client("mailto:ops@example.org");
        let error = client.search_url("REPORTS_VIEW").unwrap_err();
        assert!(matches!(error, RightLookupError::InvalidBaseUrl(_)));
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transient_error() {
        let client = client("http://127.0.0.1:1/");
        let error = client.find_right("REPORTS_VIEW").await.unwrap_err();
        assert!(matches!(error, RightLookupError::Http(_)));
        assert!(error.is_transient());
    }
}
