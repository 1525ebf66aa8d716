//! # Wikipedia Presence Checker
//!
//! Runs a full-text search against the MediaWiki API and looks only at the
//! top-ranked hit. The hit counts as the artist's page when the query appears,
//! case-insensitively, in its title or its snippet. Alternate spellings are
//! missed and short names can collide with unrelated titles; both are accepted.

use crate::{errors::ProviderError, providers::PresenceChecker, types::WikipediaPresence};
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client as ReqwestClient;
use serde::Deserialize;
use std::{sync::LazyLock, time::Duration};
use tracing::{debug, info, warn};
use url::{form_urlencoded, Url};

const PROVIDER: &str = "Wikipedia";

pub const DEFAULT_WIKIPEDIA_API_URL: &str = "https://en.wikipedia.org/w/api.php";
pub const DEFAULT_WIKIPEDIA_PAGE_BASE_URL: &str = "https://en.wikipedia.org/wiki";

// MediaWiki wraps matched terms in `<span class="searchmatch">`.
static SEARCH_MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("markup pattern is valid"));

#[derive(Deserialize, Debug)]
struct SearchResponse {
    query: Option<SearchQuery>,
}

#[derive(Deserialize, Debug)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Deserialize, Debug)]
struct SearchHit {
    title: String,
    #[serde(default)]
    snippet: Option<String>,
}

/// Returns true if `query` occurs in `title` or `snippet`, ignoring case and
/// surrounding whitespace in the query.
pub fn is_presence_match(query: &str, title: &str, snippet: Option<&str>) -> bool {
    let needle = query.trim().to_lowercase();
    if title.trim().to_lowercase().contains(&needle) {
        return true;
    }
    snippet
        .map(|s| s.to_lowercase().contains(&needle))
        .unwrap_or(false)
}

/// Removes HTML tags from a search snippet.
pub fn strip_search_markup(snippet: &str) -> String {
    SEARCH_MARKUP.replace_all(snippet, "").into_owned()
}

/// Builds the article URL for a page title, e.g. `Drake (musician)` becomes
/// `{base}/Drake_%28musician%29`.
pub fn page_url(base_url: &str, title: &str) -> String {
    let slug = title.split_whitespace().collect::<Vec<_>>().join("_");
    let encoded: String = form_urlencoded::byte_serialize(slug.as_bytes()).collect();
    format!("{}/{}", base_url.trim_end_matches('/'), encoded)
}

/// A [`PresenceChecker`] backed by the MediaWiki search API.
#[derive(Clone, Debug)]
pub struct WikipediaProvider {
    client: ReqwestClient,
    api_url: String,
    page_base_url: String,
}

impl WikipediaProvider {
    pub fn new(
        api_url: String,
        page_base_url: String,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(ProviderError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url,
            page_base_url,
        })
    }

    async fn search_top_hit(&self, name: &str) -> Result<Option<SearchHit>, ProviderError> {
        let url = Url::parse_with_params(
            &self.api_url,
            &[
                ("action", "query"),
                ("list", "search"),
                ("format", "json"),
                ("origin", "*"),
                ("srsearch", name),
            ],
        )
        .map_err(|source| ProviderError::InvalidUrl {
            provider: PROVIDER,
            source,
        })?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ProviderError::Request {
                provider: PROVIDER,
                source,
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                provider: PROVIDER,
                status,
                body,
            });
        }

        let search: SearchResponse =
            response
                .json()
                .await
                .map_err(|source| ProviderError::Deserialization {
                    provider: PROVIDER,
                    source,
                })?;

        Ok(search.query.and_then(|q| q.search.into_iter().next()))
    }
}

#[async_trait]
impl PresenceChecker for WikipediaProvider {
    async fn check_presence(&self, name: &str) -> WikipediaPresence {
        let hit = match self.search_top_hit(name).await {
            Ok(Some(hit)) => hit,
            Ok(None) => {
                info!(query = %name, "No Wikipedia search results");
                return WikipediaPresence::absent();
            }
            Err(e) => {
                warn!(query = %name, "Wikipedia lookup failed: {e}");
                return WikipediaPresence::absent();
            }
        };

        // Matching runs on the raw snippet, so a name split across highlight
        // spans does not count.
        if !is_presence_match(name, &hit.title, hit.snippet.as_deref()) {
            debug!(query = %name, title = %hit.title, "Top Wikipedia hit does not match");
            return WikipediaPresence::absent();
        }

        info!(query = %name, title = %hit.title, "Found Wikipedia page");
        let url = page_url(&self.page_base_url, &hit.title);
        let snippet = hit.snippet.as_deref().map(strip_search_markup);
        WikipediaPresence::found(hit.title, url, snippet)
    }
}
