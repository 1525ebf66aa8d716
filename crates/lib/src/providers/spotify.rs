//! # Spotify Metadata Provider
//!
//! Resolves an artist name against the Spotify Web API. Every lookup performs a
//! fresh client-credentials exchange followed by a top-1 artist search.

use crate::{errors::ProviderError, providers::MetadataProvider, types::ArtistMetadata};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

const PROVIDER: &str = "Spotify";

pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";

// --- Spotify-specific response structures ---

#[derive(Deserialize, Debug)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize, Debug)]
struct SearchResponse {
    artists: Option<ArtistPage>,
}

#[derive(Deserialize, Debug)]
struct ArtistPage {
    #[serde(default)]
    items: Vec<SpotifyArtist>,
}

#[derive(Deserialize, Debug)]
struct SpotifyArtist {
    name: String,
    followers: Option<Followers>,
    popularity: Option<u32>,
    #[serde(default)]
    images: Vec<Image>,
    #[serde(default)]
    genres: Vec<String>,
    external_urls: Option<ExternalUrls>,
}

#[derive(Deserialize, Debug)]
struct Followers {
    total: Option<u64>,
}

#[derive(Deserialize, Debug)]
struct Image {
    url: String,
}

#[derive(Deserialize, Debug)]
struct ExternalUrls {
    spotify: Option<String>,
}

impl From<SpotifyArtist> for ArtistMetadata {
    fn from(artist: SpotifyArtist) -> Self {
        Self {
            name: artist.name,
            follower_count: artist.followers.and_then(|f| f.total).unwrap_or(0),
            popularity: artist.popularity.unwrap_or(0).min(100) as u8,
            photo_url: artist.images.into_iter().next().map(|i| i.url),
            // Not exposed by the public Web API.
            monthly_listeners: None,
            verified: None,
            genres: artist.genres,
            spotify_url: artist.external_urls.and_then(|u| u.spotify),
        }
    }
}

/// A [`MetadataProvider`] backed by the Spotify Web API.
#[derive(Clone, Debug)]
pub struct SpotifyProvider {
    client: ReqwestClient,
    token_url: String,
    api_url: String,
    client_id: String,
    client_secret: String,
}

impl SpotifyProvider {
    pub fn new(
        token_url: String,
        api_url: String,
        client_id: String,
        client_secret: String,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        if client_id.is_empty() || client_secret.is_empty() {
            return Err(ProviderError::MissingCredentials(
                "Spotify client id/secret not set".to_string(),
            ));
        }
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(ProviderError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            token_url,
            api_url: api_url.trim_end_matches('/').to_string(),
            client_id,
            client_secret,
        })
    }

    async fn fetch_token(&self) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
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

        let token: TokenResponse =
            response
                .json()
                .await
                .map_err(|source| ProviderError::Deserialization {
                    provider: PROVIDER,
                    source,
                })?;
        Ok(token.access_token)
    }
}

#[async_trait]
impl MetadataProvider for SpotifyProvider {
    async fn find_artist(&self, name: &str) -> Result<Option<ArtistMetadata>, ProviderError> {
        let token = self.fetch_token().await?;
        debug!("Obtained Spotify access token");

        let response = self
            .client
            .get(format!("{}/search", self.api_url))
            .bearer_auth(token)
            .query(&[("q", name), ("type", "artist"), ("limit", "1")])
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

        let artist = search
            .artists
            .and_then(|page| page.items.into_iter().next())
            .map(ArtistMetadata::from);

        match &artist {
            Some(a) => info!(query = %name, resolved = %a.name, "Resolved artist on Spotify"),
            None => info!(query = %name, "No Spotify artist matched"),
        }
        Ok(artist)
    }
}
