//! GitHub repository search gateway.
//!
//! Calls `GET {base}/search/repositories?q=<keyword>&page=<n>` and
//! normalizes the body so a missing `items` array becomes empty and a missing
//! `total_count` becomes zero. Every failure mode collapses to `None`.

use async_trait::async_trait;
use reposearch_core::config::SearchConfig;
use reposearch_core::error::{Result, SearchError};
use reposearch_core::search::{FIRST_PAGE, ResultItem, SearchGateway, SearchResponse};
use reqwest::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;

const SEARCH_PATH: &str = "/search/repositories";
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// [`SearchGateway`] backed by the GitHub REST search API.
#[derive(Clone)]
pub struct GithubSearchGateway {
    client: Client,
    base_url: String,
    user_agent: String,
    per_page: Option<u32>,
}

impl GithubSearchGateway {
    /// Creates a gateway for the API rooted at `base_url`.
    pub fn new(base_url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            user_agent: user_agent.into(),
            per_page: None,
        }
    }

    /// Creates a gateway from the loaded configuration.
    pub fn from_config(config: &SearchConfig) -> Self {
        let gateway = Self::new(config.api_base_url.clone(), config.user_agent.clone());
        match config.per_page {
            Some(per_page) => gateway.with_per_page(per_page),
            None => gateway,
        }
    }

    /// Requests a specific page size instead of the API default.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    fn search_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), SEARCH_PATH)
    }

    fn query_params(&self, keyword: &str, page: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", keyword.to_string()),
            ("page", page.max(FIRST_PAGE).to_string()),
        ];
        if let Some(per_page) = self.per_page {
            params.push(("per_page", per_page.to_string()));
        }
        params
    }

    async fn fetch(&self, keyword: &str, page: u32) -> Result<SearchResponse> {
        let response = self
            .client
            .get(self.search_url())
            .query(&self.query_params(keyword, page))
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, GITHUB_ACCEPT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::http_status(status.as_u16(), error_message(&body)));
        }

        let body = response.text().await?;
        normalize_body(&body)
    }
}

#[async_trait]
impl SearchGateway for GithubSearchGateway {
    async fn search(&self, keyword: &str, page: u32) -> Option<SearchResponse> {
        if keyword.trim().is_empty() {
            tracing::debug!("Skipping search for blank keyword");
            return None;
        }

        match self.fetch(keyword, page).await {
            Ok(response) => {
                tracing::info!(
                    keyword,
                    page,
                    items = response.items.len(),
                    total_count = response.total_count,
                    "Search page fetched"
                );
                Some(response)
            }
            Err(e) => {
                tracing::warn!(keyword, page, error = %e, "Search request failed");
                None
            }
        }
    }
}

/// Raw body as sent by the API; every field may be absent.
#[derive(Debug, Deserialize)]
struct RawSearchResponse {
    #[serde(default)]
    items: Option<Vec<ResultItem>>,
    #[serde(default)]
    total_count: Option<u64>,
}

impl From<RawSearchResponse> for SearchResponse {
    fn from(raw: RawSearchResponse) -> Self {
        Self {
            items: raw.items.unwrap_or_default(),
            total_count: raw.total_count.unwrap_or(0),
        }
    }
}

/// Parses and normalizes a success body.
fn normalize_body(body: &str) -> Result<SearchResponse> {
    let raw: RawSearchResponse = serde_json::from_str(body)?;
    Ok(raw.into())
}

/// Pulls `message` out of an API error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.get("message")
                .and_then(|msg| msg.as_str())
                .map(|msg| msg.to_string())
        })
        .unwrap_or_else(|| body.to_string())
}
