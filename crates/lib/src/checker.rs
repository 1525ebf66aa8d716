//! # Artist Checker
//!
//! The request-scoped pipeline behind `/api/check-artist`: resolve the artist,
//! gather encyclopedia and social signals, score the aggregate and shape the
//! report.

use crate::{
    errors::CheckError,
    providers::{MetadataProvider, PresenceChecker, SocialProfileFetcher},
    scoring::SuspicionScorer,
    types::{AggregatedArtistRecord, ArtistQuery, ArtistReport, ScoreResult},
};
use std::sync::Arc;
use tracing::info;

/// The result of a check, plus the intermediate values for debug output.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub report: ArtistReport,
    pub record: AggregatedArtistRecord,
    pub score: ScoreResult,
}

/// Orchestrates a single artist check. Every collaborator is injected, so one
/// checker can be shared across requests without shared mutable state.
#[derive(Clone, Debug)]
pub struct ArtistChecker {
    metadata: Arc<dyn MetadataProvider>,
    presence: Arc<dyn PresenceChecker>,
    social: Arc<dyn SocialProfileFetcher>,
    scorer: Arc<SuspicionScorer>,
}

impl ArtistChecker {
    pub fn builder() -> ArtistCheckerBuilder {
        ArtistCheckerBuilder::default()
    }

    /// Runs the full check and returns only the caller-facing report.
    pub async fn check(&self, artist_name: &str) -> Result<ArtistReport, CheckError> {
        Ok(self.check_detailed(artist_name).await?.report)
    }

    /// Runs the full check.
    ///
    /// 1. An empty name fails with [`CheckError::InvalidInput`] before any call.
    /// 2. No catalog match fails with [`CheckError::NotFound`]; nothing else is called.
    /// 3. Wikipedia and Instagram are queried concurrently with the resolved name.
    /// 4. The aggregate is scored; a scoring failure is fatal.
    pub async fn check_detailed(&self, artist_name: &str) -> Result<CheckOutcome, CheckError> {
        let query = ArtistQuery::parse(artist_name)?;
        info!(artist = %query.as_str(), "Checking artist");

        let metadata = self
            .metadata
            .find_artist(query.as_str())
            .await?
            .ok_or_else(|| CheckError::NotFound(query.as_str().to_string()))?;

        let (wikipedia, social) = tokio::join!(
            self.presence.check_presence(&metadata.name),
            self.social.fetch_profile(&metadata.name),
        );

        let record = AggregatedArtistRecord {
            metadata,
            wikipedia,
            social,
        };

        let score = self.scorer.score(&record).await?;
        let report = ArtistReport::from_parts(&record, score.clone());

        Ok(CheckOutcome {
            report,
            record,
            score,
        })
    }
}

/// A builder for [`ArtistChecker`].
#[derive(Default)]
pub struct ArtistCheckerBuilder {
    metadata: Option<Arc<dyn MetadataProvider>>,
    presence: Option<Arc<dyn PresenceChecker>>,
    social: Option<Arc<dyn SocialProfileFetcher>>,
    scorer: Option<Arc<SuspicionScorer>>,
}

impl ArtistCheckerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn metadata_provider(mut self, provider: Arc<dyn MetadataProvider>) -> Self {
        self.metadata = Some(provider);
        self
    }

    pub fn presence_checker(mut self, checker: Arc<dyn PresenceChecker>) -> Self {
        self.presence = Some(checker);
        self
    }

    pub fn social_fetcher(mut self, fetcher: Arc<dyn SocialProfileFetcher>) -> Self {
        self.social = Some(fetcher);
        self
    }

    pub fn scorer(mut self, scorer: SuspicionScorer) -> Self {
        self.scorer = Some(Arc::new(scorer));
        self
    }

    pub fn build(self) -> Result<ArtistChecker, CheckError> {
        Ok(ArtistChecker {
            metadata: self
                .metadata
                .ok_or(CheckError::MissingCollaborator("metadata provider"))?,
            presence: self
                .presence
                .ok_or(CheckError::MissingCollaborator("presence checker"))?,
            social: self
                .social
                .ok_or(CheckError::MissingCollaborator("social fetcher"))?,
            scorer: self
                .scorer
                .ok_or(CheckError::MissingCollaborator("scorer"))?,
        })
    }
}
