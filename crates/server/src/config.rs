//! # Application Configuration
//!
//! This module defines the configuration structure for the `fakeartist-server`
//! and loads it from a `config.yml` file layered with environment variables.

use config::{
    Config as ConfigBuilder, Environment, File, FileFormat, Value as ConfigValue,
    ValueKind as ConfigValueKind,
};
use fakeartist::{
    prompts::{SCORING_SYSTEM_PROMPT, SCORING_USER_PROMPT},
    providers::{
        instagram::{DEFAULT_APIFY_API_URL, DEFAULT_INSTAGRAM_ACTOR_ID},
        spotify::{DEFAULT_SPOTIFY_API_URL, DEFAULT_SPOTIFY_TOKEN_URL},
        wikipedia::{DEFAULT_WIKIPEDIA_API_URL, DEFAULT_WIKIPEDIA_PAGE_BASE_URL},
    },
};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::sync::LazyLock;
use tracing::info;

/// The task key used by the suspicion scorer.
pub const SCORING_TASK: &str = "artist_scoring";

static ENV_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}").expect("placeholder pattern is valid")
});

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates a required configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub spotify: SpotifyConfig,
    #[serde(default)]
    pub wikipedia: WikipediaConfig,
    #[serde(default)]
    pub instagram: InstagramConfig,
    /// A map of named, reusable AI provider configurations.
    pub providers: HashMap<String, ProviderConfig>,
    /// A map of tasks, each specifying a provider and prompts.
    pub tasks: HashMap<String, TaskConfig>,
}

fn default_port() -> u16 {
    3000
}

fn default_data_timeout_secs() -> u64 {
    15
}

fn default_actor_timeout_secs() -> u64 {
    60
}

fn default_ai_timeout_secs() -> u64 {
    120
}

/// Spotify Web API settings. Credentials usually come from `SPOTIFY_CLIENT_ID`
/// and `SPOTIFY_CLIENT_SECRET`.
#[derive(Debug, Deserialize, Clone)]
pub struct SpotifyConfig {
    #[serde(default = "default_spotify_token_url")]
    pub token_url: String,
    #[serde(default = "default_spotify_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default = "default_data_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_spotify_token_url() -> String {
    DEFAULT_SPOTIFY_TOKEN_URL.to_string()
}

fn default_spotify_api_url() -> String {
    DEFAULT_SPOTIFY_API_URL.to_string()
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            token_url: default_spotify_token_url(),
            api_url: default_spotify_api_url(),
            client_id: None,
            client_secret: None,
            timeout_secs: default_data_timeout_secs(),
        }
    }
}

/// MediaWiki search settings.
#[derive(Debug, Deserialize, Clone)]
pub struct WikipediaConfig {
    #[serde(default = "default_wikipedia_api_url")]
    pub api_url: String,
    #[serde(default = "default_wikipedia_page_base_url")]
    pub page_base_url: String,
    #[serde(default = "default_data_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_wikipedia_api_url() -> String {
    DEFAULT_WIKIPEDIA_API_URL.to_string()
}

fn default_wikipedia_page_base_url() -> String {
    DEFAULT_WIKIPEDIA_PAGE_BASE_URL.to_string()
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            api_url: default_wikipedia_api_url(),
            page_base_url: default_wikipedia_page_base_url(),
            timeout_secs: default_data_timeout_secs(),
        }
    }
}

/// Apify actor settings for the Instagram lookup. The token usually comes from `APIFY_TOKEN`.
#[derive(Debug, Deserialize, Clone)]
pub struct InstagramConfig {
    #[serde(default = "default_apify_api_url")]
    pub api_url: String,
    #[serde(default = "default_instagram_actor_id")]
    pub actor_id: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_actor_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_apify_api_url() -> String {
    DEFAULT_APIFY_API_URL.to_string()
}

fn default_instagram_actor_id() -> String {
    DEFAULT_INSTAGRAM_ACTOR_ID.to_string()
}

impl Default for InstagramConfig {
    fn default() -> Self {
        Self {
            api_url: default_apify_api_url(),
            actor_id: default_instagram_actor_id(),
            token: None,
            timeout_secs: default_actor_timeout_secs(),
        }
    }
}

/// A reusable configuration for a specific AI provider instance.
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// The type of provider ("openai" or "gemini").
    pub provider: String,
    /// The API URL. Optional for Gemini, where it is derived from the model name.
    pub api_url: Option<String>,
    /// The API key, which can be null for local OpenAI-compatible servers.
    pub api_key: Option<String>,
    pub model_name: String,
    #[serde(default = "default_ai_timeout_secs")]
    pub timeout_secs: u64,
}

/// Defines the prompts and provider for a specific application task.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct TaskConfig {
    /// The key of the provider to use from the `providers` map.
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub user_prompt: Option<String>,
}

/// Constructs a `config::Value` map of the default tasks from the library.
/// This serves as the base layer of configuration.
fn build_default_tasks() -> HashMap<String, ConfigValue> {
    let tasks = vec![(
        SCORING_TASK,
        ("openai_default", SCORING_SYSTEM_PROMPT, SCORING_USER_PROMPT),
    )];

    tasks
        .into_iter()
        .map(|(name, (provider, sys, user))| {
            let mut table = HashMap::new();
            table.insert("provider".to_string(), ConfigValue::from(provider));
            table.insert("system_prompt".to_string(), ConfigValue::from(sys));
            table.insert("user_prompt".to_string(), ConfigValue::from(user));
            (
                name.to_string(),
                ConfigValue::new(None, ConfigValueKind::Table(table)),
            )
        })
        .collect()
}

// Reads a file and substitutes `${VAR}` placeholders from the environment.
// Returns Ok(None) if the file does not exist.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let expanded_content = ENV_PLACEHOLDER.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

/// Loads the application configuration from a file and environment variables.
///
/// - Layer 1: the default scoring task from the library.
/// - Layer 2: `config.yml`, or `config.{AI_PROVIDER}.yml` when it is absent.
/// - Layer 3: optional `prompt.yml` overrides.
/// - Layer 4: top-level env vars such as `PORT`.
/// - Layer 5: `FAKEARTIST_...` env vars for nested keys (e.g. `FAKEARTIST_SPOTIFY__API_URL`).
///
/// Empty secrets are finally filled from `SPOTIFY_CLIENT_ID`, `SPOTIFY_CLIENT_SECRET`
/// and `APIFY_TOKEN`.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let base_path = env!("CARGO_MANIFEST_DIR");
    let mut builder = ConfigBuilder::builder().set_default("tasks", build_default_tasks())?;

    let main_config_path = if let Some(override_path) = config_path_override {
        override_path.to_string()
    } else {
        let user_config_path = format!("{base_path}/config.yml");
        if std::path::Path::new(&user_config_path).exists() {
            info!("Loading user-defined configuration from '{user_config_path}'.");
            user_config_path
        } else {
            let provider = env::var("AI_PROVIDER").unwrap_or_else(|_| "openai".to_string());
            let fallback_path = format!("{base_path}/config.{provider}.yml");
            info!("'{user_config_path}' not found. Falling back to '{fallback_path}' based on AI_PROVIDER='{provider}'.");
            fallback_path
        }
    };

    let main_content = read_and_substitute(&main_config_path)?
        .ok_or_else(|| ConfigError::NotFound(format!("Main config file not found at '{main_config_path}'. Please ensure 'config.yml' exists or your AI_PROVIDER is set to load a valid template ('openai' or 'gemini').")))?;
    builder = builder.add_source(File::from_str(&main_content, FileFormat::Yaml));

    let user_prompt_path = format!("{base_path}/prompt.yml");
    if let Some(user_prompts_content) = read_and_substitute(&user_prompt_path)? {
        info!("Loading user prompt overrides from '{user_prompt_path}'.");
        builder = builder.add_source(File::from_str(&user_prompts_content, FileFormat::Yaml));
    }

    let settings = builder
        .add_source(Environment::default())
        .add_source(
            Environment::with_prefix("FAKEARTIST")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;

    if config.spotify.client_id.as_deref().unwrap_or("").is_empty() {
        config.spotify.client_id = non_empty_env("SPOTIFY_CLIENT_ID");
    }
    if config.spotify.client_secret.as_deref().unwrap_or("").is_empty() {
        config.spotify.client_secret = non_empty_env("SPOTIFY_CLIENT_SECRET");
    }
    if config.instagram.token.as_deref().unwrap_or("").is_empty() {
        config.instagram.token = non_empty_env("APIFY_TOKEN");
    }

    Ok(config)
}
