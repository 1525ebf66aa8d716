//! # Instagram Profile Fetcher
//!
//! Looks up an Instagram profile through an Apify scraper actor. The handle is
//! guessed from the artist's display name, so the profile returned may belong
//! to an unrelated account.

use crate::{errors::ProviderError, providers::SocialProfileFetcher, types::SocialProfile};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{info, warn};

const PROVIDER: &str = "Apify";

pub const DEFAULT_APIFY_API_URL: &str = "https://api.apify.com/v2";
pub const DEFAULT_INSTAGRAM_ACTOR_ID: &str = "dSCLg0C3YEZ83HzYX";

/// Guesses an Instagram handle from a display name: lowercased, with every
/// whitespace character removed.
pub fn derive_handle(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ActorInput<'a> {
    usernames: [&'a str; 1],
    search_limit: u32,
    search_type: &'a str,
}

/// Maps one dataset item onto a [`SocialProfile`], keeping the raw item.
fn profile_from_item(username: &str, item: Value) -> SocialProfile {
    SocialProfile {
        username: username.to_string(),
        follower_count: item.get("followersCount").and_then(Value::as_u64),
        verified: item.get("verified").and_then(Value::as_bool),
        raw: item,
    }
}

/// A [`SocialProfileFetcher`] that runs an Apify actor synchronously and reads
/// its dataset items.
#[derive(Clone, Debug)]
pub struct ApifyInstagramProvider {
    client: ReqwestClient,
    api_url: String,
    actor_id: String,
    token: Option<String>,
}

impl ApifyInstagramProvider {
    pub fn new(
        api_url: String,
        actor_id: String,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(ProviderError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            actor_id,
            token: token.filter(|t| !t.is_empty()),
        })
    }

    async fn run_actor(&self, handle: &str) -> Result<Vec<Value>, ProviderError> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| ProviderError::MissingCredentials("APIFY_TOKEN not set".to_string()))?;

        let url = format!(
            "{}/acts/{}/run-sync-get-dataset-items",
            self.api_url, self.actor_id
        );
        let input = ActorInput {
            usernames: [handle],
            search_limit: 1,
            search_type: "user",
        };

        let response = self
            .client
            .post(url)
            .query(&[("token", token)])
            .json(&input)
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

        response
            .json()
            .await
            .map_err(|source| ProviderError::Deserialization {
                provider: PROVIDER,
                source,
            })
    }
}

#[async_trait]
impl SocialProfileFetcher for ApifyInstagramProvider {
    async fn fetch_profile(&self, name: &str) -> SocialProfile {
        let handle = derive_handle(name);
        match self.run_actor(&handle).await {
            Ok(items) => match items.into_iter().next() {
                Some(item) => {
                    info!(handle = %handle, "Fetched Instagram profile");
                    profile_from_item(&handle, item)
                }
                None => {
                    info!(handle = %handle, "Instagram actor returned no profile");
                    SocialProfile::empty(handle)
                }
            },
            Err(e) => {
                warn!(handle = %handle, "Instagram lookup failed: {e}");
                SocialProfile::empty(handle)
            }
        }
    }
}
