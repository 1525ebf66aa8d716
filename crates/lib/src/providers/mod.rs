//! # Providers
//!
//! The external collaborators of an artist check. Each data source sits behind
//! a trait so the checker can be assembled with real HTTP clients in the server
//! and with counting doubles in tests.

pub mod ai;
pub mod instagram;
pub mod spotify;
pub mod wikipedia;

use crate::{
    errors::ProviderError,
    types::{ArtistMetadata, SocialProfile, WikipediaPresence},
};
use async_trait::async_trait;
use std::fmt::Debug;

/// Resolves a free-text name to a single catalog artist.
#[async_trait]
pub trait MetadataProvider: Send + Sync + Debug {
    /// Returns `Ok(None)` when the catalog has no match. Transport and API
    /// failures are reported as errors.
    async fn find_artist(&self, name: &str) -> Result<Option<ArtistMetadata>, ProviderError>;
}

/// Decides whether an artist has an encyclopedia page.
///
/// Implementations never fail; errors degrade to [`WikipediaPresence::absent`].
#[async_trait]
pub trait PresenceChecker: Send + Sync + Debug {
    async fn check_presence(&self, name: &str) -> WikipediaPresence;
}

/// Looks up a social profile for an artist.
///
/// Implementations never fail; errors degrade to [`SocialProfile::empty`].
#[async_trait]
pub trait SocialProfileFetcher: Send + Sync + Debug {
    async fn fetch_profile(&self, name: &str) -> SocialProfile;
}
