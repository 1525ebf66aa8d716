//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. Every external client is constructed here once
//! and injected into the [`ArtistChecker`]; handlers never create clients.

use crate::config::{AppConfig, ProviderConfig, SCORING_TASK};
use fakeartist::{
    providers::{
        ai::{gemini::GeminiProvider, openai::OpenAiProvider, AiProvider},
        instagram::ApifyInstagramProvider,
        spotify::SpotifyProvider,
        wikipedia::WikipediaProvider,
    },
    ArtistChecker, SuspicionScorer,
};
use std::{collections::HashMap, sync::Arc, time::Duration};
use tracing::info;

/// A fully resolved task configuration with non-optional fields.
#[derive(Clone, Debug)]
pub struct ResolvedTask {
    pub provider: String,
    pub system_prompt: String,
    pub user_prompt: String,
}

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The artist check pipeline with all of its collaborators.
    pub checker: Arc<ArtistChecker>,
}

fn build_ai_provider(name: &str, config: &ProviderConfig) -> anyhow::Result<Box<dyn AiProvider>> {
    let timeout = Duration::from_secs(config.timeout_secs);
    let provider: Box<dyn AiProvider> = match config.provider.as_str() {
        "gemini" => {
            let api_key = config
                .api_key
                .clone()
                .filter(|k| !k.is_empty())
                .ok_or_else(|| anyhow::anyhow!("api_key is required for gemini provider '{name}'"))?;
            // If api_url is not provided in config, construct it from the model name.
            let api_url = config.api_url.clone().unwrap_or_else(|| {
                format!(
                    "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
                    config.model_name
                )
            });
            Box::new(GeminiProvider::new(api_url, api_key, timeout)?)
        }
        "openai" => {
            let api_url = config
                .api_url
                .clone()
                .unwrap_or_else(|| "https://api.openai.com/v1/chat/completions".to_string());
            Box::new(OpenAiProvider::new(
                api_url,
                config.api_key.clone(),
                Some(config.model_name.clone()),
                timeout,
            )?)
        }
        other => {
            return Err(anyhow::anyhow!(
                "Unsupported AI provider type '{other}' for provider '{name}'"
            ));
        }
    };
    Ok(provider)
}

fn resolve_task(config: &AppConfig, name: &str) -> anyhow::Result<ResolvedTask> {
    let task_config = config
        .tasks
        .get(name)
        .ok_or_else(|| anyhow::anyhow!("Task '{name}' is not configured"))?;
    let provider = task_config.provider.clone().ok_or_else(|| {
        anyhow::anyhow!("Resolved task '{name}' is missing required 'provider' field")
    })?;
    let system_prompt = task_config.system_prompt.clone().ok_or_else(|| {
        anyhow::anyhow!("Resolved task '{name}' is missing required 'system_prompt' field")
    })?;
    let user_prompt = task_config.user_prompt.clone().ok_or_else(|| {
        anyhow::anyhow!("Resolved task '{name}' is missing required 'user_prompt' field")
    })?;
    Ok(ResolvedTask {
        provider,
        system_prompt,
        user_prompt,
    })
}

/// Builds the shared application state from the configuration.
///
/// - Instantiates an AI provider client for each entry in `providers`.
/// - Resolves the scoring task and wires its provider into a [`SuspicionScorer`].
/// - Builds the Spotify, Wikipedia and Apify clients and the [`ArtistChecker`].
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let mut ai_providers = HashMap::new();
    for (name, provider_config) in &config.providers {
        ai_providers.insert(name.clone(), build_ai_provider(name, provider_config)?);
    }

    let task = resolve_task(&config, SCORING_TASK)?;
    let ai_provider = ai_providers.remove(&task.provider).ok_or_else(|| {
        anyhow::anyhow!(
            "Task '{SCORING_TASK}' uses provider '{}', which is not defined in 'providers'",
            task.provider
        )
    })?;
    let scorer =
        SuspicionScorer::new(ai_provider).with_prompts(task.system_prompt, task.user_prompt);
    info!(provider = %task.provider, "Initialized scoring provider.");

    let spotify = &config.spotify;
    let metadata = SpotifyProvider::new(
        spotify.token_url.clone(),
        spotify.api_url.clone(),
        spotify.client_id.clone().unwrap_or_default(),
        spotify.client_secret.clone().unwrap_or_default(),
        Duration::from_secs(spotify.timeout_secs),
    )?;

    let wikipedia = &config.wikipedia;
    let presence = WikipediaProvider::new(
        wikipedia.api_url.clone(),
        wikipedia.page_base_url.clone(),
        Duration::from_secs(wikipedia.timeout_secs),
    )?;

    let instagram = &config.instagram;
    if instagram.token.is_none() {
        tracing::warn!("APIFY_TOKEN is not set; Instagram lookups will return empty profiles.");
    }
    let social = ApifyInstagramProvider::new(
        instagram.api_url.clone(),
        instagram.actor_id.clone(),
        instagram.token.clone(),
        Duration::from_secs(instagram.timeout_secs),
    )?;

    let checker = ArtistChecker::builder()
        .metadata_provider(Arc::new(metadata))
        .presence_checker(Arc::new(presence))
        .social_fetcher(Arc::new(social))
        .scorer(scorer)
        .build()?;

    Ok(AppState {
        checker: Arc::new(checker),
    })
}
