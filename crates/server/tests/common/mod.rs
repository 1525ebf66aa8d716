//! # Common Test Utilities
//!
//! - `TestApp`: spawns the real server on a random port. It is either wired
//!   from a config file whose upstream URLs all point at an
//!   `httpmock::MockServer`, or assembled directly from an injected
//!   [`ArtistChecker`] built with test doubles.

// Not every helper is used by every test binary.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use fakeartist::{ArtistChecker, SuspicionScorer};
use fakeartist_server::{
    config::{self, AppConfig},
    router,
    state::{build_app_state, AppState},
};
use fakeartist_test_utils::{MockAiProvider, MockMetadataProvider, MockPresenceChecker, MockSocialFetcher};
use httpmock::MockServer;
use reqwest::Client;
use std::{fs::File, io::Write, net::SocketAddr, sync::Arc};
use tempfile::{tempdir, TempDir};
use tokio::{net::TcpListener, task::JoinHandle};

/// Writes a config file pointing every upstream at `mock_server` and loads it.
pub fn mock_config(mock_server: &MockServer) -> Result<(AppConfig, TempDir)> {
    let config_dir = tempdir()?;
    let config_path = config_dir.path().join("config.yml");
    let config_content = format!(
        r#"
port: 0
spotify:
  token_url: "{token_url}"
  api_url: "{spotify_url}"
  client_id: "test-client"
  client_secret: "test-secret"
wikipedia:
  api_url: "{wiki_url}"
  page_base_url: "https://en.wikipedia.org/wiki"
instagram:
  api_url: "{apify_url}"
  actor_id: "test-actor"
  token: "apify-token"
providers:
  openai_default:
    provider: "openai"
    api_url: "{chat_url}"
    api_key: null
    model_name: "mock-chat-model"
"#,
        token_url = mock_server.url("/api/token"),
        spotify_url = mock_server.url("/v1"),
        wiki_url = mock_server.url("/w/api.php"),
        apify_url = mock_server.url("/v2"),
        chat_url = mock_server.url("/v1/chat/completions"),
    );
    let mut file = File::create(&config_path)?;
    file.write_all(config_content.as_bytes())?;

    let config = config::get_config(config_path.to_str())?;
    Ok((config, config_dir))
}

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: Option<MockServer>,
    _config_dir: Option<TempDir>,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the server with real providers pointed at a fresh `MockServer`.
    pub async fn spawn() -> Result<Self> {
        let mock_server = MockServer::start_async().await;
        let (config, config_dir) = mock_config(&mock_server)?;
        let app_state = build_app_state(config).await?;

        let mut app = TestApp::spawn_with_state(app_state).await?;
        app.mock_server = Some(mock_server);
        app._config_dir = Some(config_dir);
        Ok(app)
    }

    /// Spawns the server around an already assembled checker.
    pub async fn spawn_with_checker(checker: ArtistChecker) -> Result<Self> {
        let app_state = AppState {
            checker: Arc::new(checker),
        };
        TestApp::spawn_with_state(app_state).await
    }

    pub async fn spawn_with_state(app_state: AppState) -> Result<Self> {
        dotenvy::dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        Ok(Self {
            address,
            client: Client::new(),
            mock_server: None,
            _config_dir: None,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// The mock upstream server. Only set by [`TestApp::spawn`].
    pub fn upstream(&self) -> &MockServer {
        self.mock_server
            .as_ref()
            .expect("TestApp was not spawned with a mock upstream")
    }

    pub async fn check_artist(&self, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/api/check-artist", self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// The doubles behind a checker, kept so tests can inspect call counts.
#[derive(Clone)]
pub struct Doubles {
    pub metadata: MockMetadataProvider,
    pub presence: MockPresenceChecker,
    pub social: MockSocialFetcher,
    pub ai: MockAiProvider,
}

impl Doubles {
    pub fn checker(&self) -> ArtistChecker {
        ArtistChecker::builder()
            .metadata_provider(Arc::new(self.metadata.clone()))
            .presence_checker(Arc::new(self.presence.clone()))
            .social_fetcher(Arc::new(self.social.clone()))
            .scorer(SuspicionScorer::new(Box::new(self.ai.clone())))
            .build()
            .expect("all collaborators are set")
    }

    pub fn downstream_calls(&self) -> usize {
        self.presence.call_count() + self.social.call_count() + self.ai.call_count()
    }
}
