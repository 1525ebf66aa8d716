//! # fakeartist
//!
//! Aggregates public signals about a music artist (Spotify catalog data,
//! Wikipedia presence and an Instagram profile) and asks a language model how
//! likely the artist is to be fake or AI-generated.

pub mod checker;
pub mod errors;
pub mod prompts;
pub mod providers;
pub mod scoring;
pub mod types;

pub use checker::{ArtistChecker, ArtistCheckerBuilder, CheckOutcome};
pub use errors::{CheckError, PromptError, ProviderError};
pub use scoring::{parse_score_reply, ScoreParseError, SuspicionScorer};
pub use types::{
    AggregatedArtistRecord, ArtistMetadata, ArtistQuery, ArtistReport, ScoreResult,
    SocialProfile, WikipediaPresence,
};
