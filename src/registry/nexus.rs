//! Nexus 3 search API implementation
//!
//! Uses `GET <endpoint>?repository=..&name=..&sort=version[&version=..]`
//! and follows `continuationToken` until the last page.

use std::collections::HashSet;
use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::FETCH_TIMEOUT_MS;
use crate::registry::error::RegistryError;
use crate::registry::source::{AssetQuery, AssetSource};

/// One page of the search response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchPage {
    #[serde(default)]
    items: Vec<Asset>,
    #[serde(default)]
    continuation_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Asset {
    path: String,
}

/// HTTP basic auth credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

/// Registry implementation for the Nexus 3 search API
pub struct NexusRegistry {
    client: reqwest::Client,
    endpoint: String,
    credentials: Option<Credentials>,
}

impl NexusRegistry {
    /// Creates a new NexusRegistry for a full search endpoint URL,
    /// e.g. `https://nexus.example.com/service/rest/v1/search/assets`
    pub fn new(endpoint: &str, credentials: Option<Credentials>) -> Self {
        Self::with_timeout(endpoint, credentials, Duration::from_millis(FETCH_TIMEOUT_MS))
    }

    pub fn with_timeout(
        endpoint: &str,
        credentials: Option<Credentials>,
        timeout: Duration,
    ) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("nexus-tags")
                .timeout(timeout)
                .build()
                .expect("Failed to create HTTP client"),
            endpoint: endpoint.to_string(),
            credentials,
        }
    }

    fn search_url(
        &self,
        query: &AssetQuery,
        continuation_token: Option<&str>,
    ) -> Result<Url, RegistryError> {
        let mut params = vec![
            ("repository", query.repository.as_str()),
            ("name", query.component_name.as_str()),
            ("sort", "version"),
        ];
        if let Some(version) = &query.component_version {
            params.push(("version", version.as_str()));
        }
        if let Some(token) = continuation_token {
            params.push(("continuationToken", token));
        }

        Url::parse_with_params(&self.endpoint, &params).map_err(|e| {
            RegistryError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                reason: e.to_string(),
            }
        })
    }

    async fn fetch_page(
        &self,
        query: &AssetQuery,
        continuation_token: Option<&str>,
    ) -> Result<SearchPage, RegistryError> {
        let url = self.search_url(query, continuation_token)?;

        let mut request = self.client.get(url.clone());
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.user, Some(&credentials.password));
        }
        let response = request.send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(query.repository.clone()));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(RegistryError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            warn!("Nexus returned status {}: {}", status, url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let body = response.text().await?;
        if body.is_empty() {
            return Err(RegistryError::InvalidResponse(
                "Empty response body".to_string(),
            ));
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!("Failed to parse Nexus search response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })
    }
}

#[async_trait::async_trait]
impl AssetSource for NexusRegistry {
    async fn search_paths(&self, query: &AssetQuery) -> Result<Vec<String>, RegistryError> {
        let mut paths = Vec::new();
        let mut continuation_token: Option<String> = None;
        let mut pages = 0;
        let mut seen_tokens = HashSet::new();

        loop {
            let page = self
                .fetch_page(query, continuation_token.as_deref())
                .await?;
            pages += 1;
            paths.extend(page.items.into_iter().map(|asset| asset.path));

            match page.continuation_token.filter(|token| !token.is_empty()) {
                Some(token) if !seen_tokens.insert(token.clone()) => {
                    warn!("Nexus repeated continuation token {}, stopping", token);
                    break;
                }
                Some(token) => continuation_token = Some(token),
                None => break,
            }
        }

        debug!(
            "Fetched {} asset paths from {} in {} page(s)",
            paths.len(),
            self.endpoint,
            pages
        );
        Ok(paths)
    }
}
