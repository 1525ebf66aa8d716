//! # Domain Types
//!
//! The records that flow through an artist check. Every value here is built
//! once per request and dropped when the response is sent.

use crate::errors::CheckError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The analysis text returned when the model reply cannot be understood.
pub const FALLBACK_ANALYSIS: &str = "unable to parse response";

/// A validated, trimmed artist name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistQuery(String);

impl ArtistQuery {
    /// Trims the raw input and rejects it if nothing is left.
    pub fn parse(raw: &str) -> Result<Self, CheckError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CheckError::InvalidInput);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Normalized catalog data for the best-matching artist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtistMetadata {
    pub name: String,
    pub follower_count: u64,
    /// Catalog popularity, always within `0..=100`.
    pub popularity: u8,
    pub photo_url: Option<String>,
    pub monthly_listeners: Option<u64>,
    pub verified: Option<bool>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub spotify_url: Option<String>,
}

/// Whether the artist appears to have a Wikipedia article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WikipediaPresence {
    #[serde(rename = "hasWikipedia")]
    pub has_page: bool,
    pub page_title: Option<String>,
    pub page_url: Option<String>,
    pub snippet: Option<String>,
}

impl WikipediaPresence {
    /// The negative result. All optional fields are `None`.
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn found(title: String, url: String, snippet: Option<String>) -> Self {
        Self {
            has_page: true,
            page_title: Some(title),
            page_url: Some(url),
            snippet,
        }
    }
}

/// A best-effort social profile lookup. The profile may belong to someone else.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialProfile {
    /// The handle that was looked up.
    pub username: String,
    pub follower_count: Option<u64>,
    pub verified: Option<bool>,
    /// The provider payload as returned, or `Null` when nothing came back.
    #[serde(default)]
    pub raw: Value,
}

impl SocialProfile {
    pub fn empty(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Default::default()
        }
    }

    /// True when the lookup produced no usable data.
    pub fn is_empty(&self) -> bool {
        self.follower_count.is_none() && self.verified.is_none() && self.raw.is_null()
    }
}

/// Everything known about the artist, handed to the scoring service as one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedArtistRecord {
    pub metadata: ArtistMetadata,
    pub wikipedia: WikipediaPresence,
    pub social: SocialProfile,
}

/// The model's verdict. Higher scores mean the artist looks less authentic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u8,
    pub analysis: String,
}

impl ScoreResult {
    pub fn fallback() -> Self {
        Self {
            score: 0,
            analysis: FALLBACK_ANALYSIS.to_string(),
        }
    }
}

/// The subset of catalog data exposed to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotifyInfo {
    pub photo: Option<String>,
    pub followers: u64,
    pub popularity: u8,
    pub monthly_listeners: Option<u64>,
    pub verified: Option<bool>,
}

/// The subset of social data exposed to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstagramData {
    pub username: String,
    pub followers: Option<u64>,
    pub verified: Option<bool>,
}

/// The response returned for a successful check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistReport {
    pub artist_name: String,
    pub fake_score: u8,
    pub analysis: String,
    pub wiki_data: WikipediaPresence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spotify_info: Option<SpotifyInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram_data: Option<InstagramData>,
}

impl ArtistReport {
    pub fn from_parts(record: &AggregatedArtistRecord, score: ScoreResult) -> Self {
        let metadata = &record.metadata;
        let instagram_data = (!record.social.is_empty()).then(|| InstagramData {
            username: record.social.username.clone(),
            followers: record.social.follower_count,
            verified: record.social.verified,
        });

        Self {
            artist_name: metadata.name.clone(),
            fake_score: score.score,
            analysis: score.analysis,
            wiki_data: record.wikipedia.clone(),
            spotify_info: Some(SpotifyInfo {
                photo: metadata.photo_url.clone(),
                followers: metadata.follower_count,
                popularity: metadata.popularity,
                monthly_listeners: metadata.monthly_listeners,
                verified: metadata.verified,
            }),
            instagram_data,
        }
    }
}
