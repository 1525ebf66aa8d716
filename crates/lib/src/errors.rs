use thiserror::Error;

/// Errors raised by the AI provider that backs the scoring service.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("API key is missing")]
    MissingApiKey,
}

/// Errors raised by the artist data providers (Spotify, Wikipedia, Apify).
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Request to {provider} failed: {source}")]
    Request {
        provider: &'static str,
        source: reqwest::Error,
    },
    #[error("{provider} returned status {status}: {body}")]
    Api {
        provider: &'static str,
        status: u16,
        body: String,
    },
    #[error("Failed to deserialize {provider} response: {source}")]
    Deserialization {
        provider: &'static str,
        source: reqwest::Error,
    },
    #[error("Invalid URL for {provider}: {source}")]
    InvalidUrl {
        provider: &'static str,
        source: url::ParseError,
    },
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),
}

/// The failures an artist check can surface to its caller.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Missing artistName")]
    InvalidInput,
    #[error("No artist found for \"{0}\".")]
    NotFound(String),
    #[error("Artist metadata lookup failed: {0}")]
    Metadata(#[from] ProviderError),
    #[error("Scoring service failed: {0}")]
    Scoring(#[from] PromptError),
    #[error("ArtistChecker is missing its {0}")]
    MissingCollaborator(&'static str),
}
