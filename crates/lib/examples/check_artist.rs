use fakeartist::{
    providers::{
        ai::{gemini::GeminiProvider, openai::OpenAiProvider, AiProvider},
        instagram::{ApifyInstagramProvider, DEFAULT_APIFY_API_URL, DEFAULT_INSTAGRAM_ACTOR_ID},
        spotify::{SpotifyProvider, DEFAULT_SPOTIFY_API_URL, DEFAULT_SPOTIFY_TOKEN_URL},
        wikipedia::{WikipediaProvider, DEFAULT_WIKIPEDIA_API_URL, DEFAULT_WIKIPEDIA_PAGE_BASE_URL},
    },
    ArtistChecker, SuspicionScorer,
};
use dotenvy::dotenv;
use std::{env, sync::Arc, time::Duration};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    dotenv().ok();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} '<artist name>'", args[0]);
        return Ok(());
    }
    let artist_name = args[1..].join(" ");

    let ai_provider_name = env::var("AI_PROVIDER").unwrap_or_else(|_| "openai".to_string());
    let api_url = env::var("AI_API_URL")?;
    let api_key = env::var("AI_API_KEY").ok();
    let ai_model = env::var("AI_MODEL").ok();
    let timeout = Duration::from_secs(30);

    let ai_provider: Box<dyn AiProvider> = match ai_provider_name.as_str() {
        "gemini" => Box::new(GeminiProvider::new(
            api_url,
            api_key.unwrap_or_default(),
            timeout,
        )?),
        "openai" => Box::new(OpenAiProvider::new(api_url, api_key, ai_model, timeout)?),
        other => anyhow::bail!("Unsupported AI provider: {other}"),
    };

    let spotify = SpotifyProvider::new(
        DEFAULT_SPOTIFY_TOKEN_URL.to_string(),
        DEFAULT_SPOTIFY_API_URL.to_string(),
        env::var("SPOTIFY_CLIENT_ID")?,
        env::var("SPOTIFY_CLIENT_SECRET")?,
        timeout,
    )?;
    let wikipedia = WikipediaProvider::new(
        DEFAULT_WIKIPEDIA_API_URL.to_string(),
        DEFAULT_WIKIPEDIA_PAGE_BASE_URL.to_string(),
        timeout,
    )?;
    let instagram = ApifyInstagramProvider::new(
        DEFAULT_APIFY_API_URL.to_string(),
        DEFAULT_INSTAGRAM_ACTOR_ID.to_string(),
        env::var("APIFY_TOKEN").ok(),
        Duration::from_secs(60),
    )?;

    let checker = ArtistChecker::builder()
        .metadata_provider(Arc::new(spotify))
        .presence_checker(Arc::new(wikipedia))
        .social_fetcher(Arc::new(instagram))
        .scorer(SuspicionScorer::new(ai_provider))
        .build()?;

    let report = checker.check(&artist_name).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
