//! # Suspicion Scoring
//!
//! Turns an [`AggregatedArtistRecord`] into a [`ScoreResult`] by asking the
//! configured AI provider. Replies are free text; the first JSON object in the
//! reply is parsed and anything unusable becomes [`ScoreResult::fallback`].

use crate::{
    errors::PromptError,
    prompts::{SCORING_SYSTEM_PROMPT, SCORING_USER_PROMPT},
    providers::ai::AiProvider,
    types::{AggregatedArtistRecord, ScoreResult},
};
use serde_json::{json, Value};
use std::fmt::Debug;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const DEFAULT_ANALYSIS: &str = "No analysis provided.";

/// Why a model reply could not be turned into a [`ScoreResult`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScoreParseError {
    #[error("reply contains no JSON object")]
    NoJsonObject,
    #[error("reply contains invalid JSON: {0}")]
    InvalidJson(String),
    #[error("reply JSON has no numeric score")]
    MissingScore,
}

/// Parses the first JSON value that starts at the first `{` in `text`.
/// Anything after that value is ignored.
fn first_json_object(text: &str) -> Result<Value, ScoreParseError> {
    let start = text.find('{').ok_or(ScoreParseError::NoJsonObject)?;
    serde_json::Deserializer::from_str(&text[start..])
        .into_iter::<Value>()
        .next()
        .ok_or(ScoreParseError::NoJsonObject)?
        .map_err(|e| ScoreParseError::InvalidJson(e.to_string()))
}

fn score_from_value(value: &Value) -> Option<u8> {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !raw.is_finite() {
        return None;
    }
    Some(raw.round().clamp(0.0, 100.0) as u8)
}

/// Parses a free-form model reply into a [`ScoreResult`].
///
/// Only the first JSON object counts; text and objects after it are ignored.
/// Scores are rounded and clamped to `0..=100`; a missing `analysis` becomes
/// [`DEFAULT_ANALYSIS`].
pub fn parse_score_reply(reply: &str) -> Result<ScoreResult, ScoreParseError> {
    let parsed = first_json_object(reply)?;

    let score = parsed
        .get("score")
        .and_then(score_from_value)
        .ok_or(ScoreParseError::MissingScore)?;
    let analysis = parsed
        .get("analysis")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_ANALYSIS.to_string());

    Ok(ScoreResult { score, analysis })
}

fn or_unknown<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "unknown".to_string(), |v| v.to_string())
}

/// Renders the user prompt template with every aggregated field.
pub fn render_user_prompt(template: &str, record: &AggregatedArtistRecord) -> String {
    let metadata = &record.metadata;
    let wikipedia = json!({
        "hasWiki": record.wikipedia.has_page,
        "wikiTitle": record.wikipedia.page_title,
        "wikiUrl": record.wikipedia.page_url,
        "wikiSnippet": record.wikipedia.snippet,
    });
    let social = json!({
        "username": record.social.username,
        "followersCount": record.social.follower_count,
        "verified": record.social.verified,
    });
    let genres = if metadata.genres.is_empty() {
        "unknown".to_string()
    } else {
        metadata.genres.join(", ")
    };

    template
        .replace("{name}", &metadata.name)
        .replace("{followers}", &metadata.follower_count.to_string())
        .replace("{popularity}", &metadata.popularity.to_string())
        .replace("{monthly_listeners}", &or_unknown(metadata.monthly_listeners))
        .replace("{verified}", &or_unknown(metadata.verified))
        .replace("{genres}", &genres)
        .replace("{wikipedia}", &wikipedia.to_string())
        .replace("{social}", &social.to_string())
}

/// Scores an artist record with a hosted language model.
#[derive(Clone, Debug)]
pub struct SuspicionScorer {
    ai_provider: Box<dyn AiProvider>,
    system_prompt: String,
    user_prompt: String,
}

impl SuspicionScorer {
    /// Creates a scorer with the default prompts.
    pub fn new(ai_provider: Box<dyn AiProvider>) -> Self {
        Self {
            ai_provider,
            system_prompt: SCORING_SYSTEM_PROMPT.to_string(),
            user_prompt: SCORING_USER_PROMPT.to_string(),
        }
    }

    /// Replaces the prompt templates, e.g. with values from `config.yml`.
    pub fn with_prompts(mut self, system_prompt: String, user_prompt: String) -> Self {
        self.system_prompt = system_prompt;
        self.user_prompt = user_prompt;
        self
    }

    /// Asks the model for a verdict.
    ///
    /// Only transport or API failures are errors. A reply that cannot be
    /// parsed yields [`ScoreResult::fallback`] and is not retried.
    pub async fn score(&self, record: &AggregatedArtistRecord) -> Result<ScoreResult, PromptError> {
        let user_prompt = render_user_prompt(&self.user_prompt, record);
        debug!(system_prompt = %self.system_prompt, user_prompt = %user_prompt, "--> Sending prompts to AI Provider");

        let reply = self
            .ai_provider
            .generate(&self.system_prompt, &user_prompt)
            .await?;
        debug!("<-- Scoring reply from AI: {}", reply);

        match parse_score_reply(&reply) {
            Ok(result) => {
                info!(artist = %record.metadata.name, score = result.score, "Scored artist");
                Ok(result)
            }
            Err(e) => {
                warn!(artist = %record.metadata.name, "Could not parse scoring reply: {e}");
                Ok(ScoreResult::fallback())
            }
        }
    }
}
