//! # Test Doubles
//!
//! Call-counting stand-ins for every collaborator of [`fakeartist::ArtistChecker`].
//! Each double is cheap to clone and shares its counters across clones, so a
//! test can hand one copy to the checker and keep another for assertions.

use async_trait::async_trait;
use fakeartist::{
    errors::{PromptError, ProviderError},
    providers::{ai::AiProvider, MetadataProvider, PresenceChecker, SocialProfileFetcher},
    types::{ArtistMetadata, SocialProfile, WikipediaPresence},
};
use serde_json::json;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};

// --- Mock AI Provider ---

#[derive(Clone, Debug)]
enum AiBehaviour {
    Reply(String),
    Fail(String),
}

/// An [`AiProvider`] that returns a fixed reply and records every prompt pair.
#[derive(Clone, Debug)]
pub struct MockAiProvider {
    behaviour: AiBehaviour,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockAiProvider {
    pub fn replying(reply: &str) -> Self {
        Self {
            behaviour: AiBehaviour::Reply(reply.to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            behaviour: AiBehaviour::Fail(message.to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Retrieves the recorded `(system, user)` prompt pairs.
    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, PromptError> {
        self.calls
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));
        match &self.behaviour {
            AiBehaviour::Reply(reply) => Ok(reply.clone()),
            AiBehaviour::Fail(message) => Err(PromptError::AiApi(message.clone())),
        }
    }
}

// --- Mock Metadata Provider ---

/// A [`MetadataProvider`] with a canned answer.
#[derive(Clone, Debug)]
pub struct MockMetadataProvider {
    artist: Option<ArtistMetadata>,
    fail: bool,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockMetadataProvider {
    pub fn found(artist: ArtistMetadata) -> Self {
        Self {
            artist: Some(artist),
            fail: false,
            calls: Arc::default(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            artist: None,
            fail: false,
            calls: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            artist: None,
            fail: true,
            calls: Arc::default(),
        }
    }

    /// The names this provider was asked to resolve, in order.
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl MetadataProvider for MockMetadataProvider {
    async fn find_artist(&self, name: &str) -> Result<Option<ArtistMetadata>, ProviderError> {
        self.calls.lock().unwrap().push(name.to_string());
        if self.fail {
            return Err(ProviderError::Api {
                provider: "MockMetadata",
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        Ok(self.artist.clone())
    }
}

// --- Mock Presence Checker ---

/// A [`PresenceChecker`] with a canned answer.
#[derive(Clone, Debug)]
pub struct MockPresenceChecker {
    presence: WikipediaPresence,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockPresenceChecker {
    pub fn new(presence: WikipediaPresence) -> Self {
        Self {
            presence,
            calls: Arc::default(),
        }
    }

    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl PresenceChecker for MockPresenceChecker {
    async fn check_presence(&self, name: &str) -> WikipediaPresence {
        self.calls.lock().unwrap().push(name.to_string());
        self.presence.clone()
    }
}

// --- Mock Social Fetcher ---

/// A [`SocialProfileFetcher`] with a canned answer.
#[derive(Clone, Debug)]
pub struct MockSocialFetcher {
    profile: Option<SocialProfile>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockSocialFetcher {
    pub fn new(profile: SocialProfile) -> Self {
        Self {
            profile: Some(profile),
            calls: Arc::default(),
        }
    }

    /// Returns an empty profile for whatever name is asked.
    pub fn empty() -> Self {
        Self {
            profile: None,
            calls: Arc::default(),
        }
    }

    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl SocialProfileFetcher for MockSocialFetcher {
    async fn fetch_profile(&self, name: &str) -> SocialProfile {
        self.calls.lock().unwrap().push(name.to_string());
        self.profile
            .clone()
            .unwrap_or_else(|| SocialProfile::empty(name))
    }
}

// --- Fixtures ---

/// Catalog data for "Drake" with a million followers.
pub fn drake_metadata() -> ArtistMetadata {
    ArtistMetadata {
        name: "Drake".to_string(),
        follower_count: 1_000_000,
        popularity: 95,
        photo_url: Some("https://i.scdn.co/image/drake.jpg".to_string()),
        monthly_listeners: None,
        verified: None,
        genres: vec!["hip hop".to_string()],
        spotify_url: Some("https://open.spotify.com/artist/3TVXtAsR1Inumwj472S9r4".to_string()),
    }
}

pub fn drake_presence() -> WikipediaPresence {
    WikipediaPresence::found(
        "Drake (musician)".to_string(),
        "https://en.wikipedia.org/wiki/Drake_%28musician%29".to_string(),
        Some("Aubrey Drake Graham is a Canadian rapper".to_string()),
    )
}

pub fn drake_profile() -> SocialProfile {
    SocialProfile {
        username: "drake".to_string(),
        follower_count: Some(500),
        verified: Some(true),
        raw: json!({ "username": "drake", "followersCount": 500, "verified": true }),
    }
}
