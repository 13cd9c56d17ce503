use std::{sync::Arc, time::Duration};

use axum::extract::FromRef;
use color_eyre::eyre::{ensure, WrapErr};
use posts::{HttpPostSource, PostSource};
use tracing::instrument;
use url::Url;

use crate::{feed::HomeFeed, Result};

pub(crate) const DEFAULT_POSTS_ENDPOINT: &str =
    "https://intronus-backend.herokuapp.com/posts/getPosts";

const DEFAULT_VIEWER_NAME: &str = "Batman";

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub(crate) struct AppConfig {
    /// Collection endpoint the home feed reads on mount.
    pub posts_endpoint: Url,
    /// Name greeted by the home page banner.
    pub viewer_name: String,
    pub port: u16,
    /// A fetch taking longer than this fails like any other.
    pub posts_timeout: Duration,
}

impl AppConfig {
    #[instrument(name = "AppConfig::from_env")]
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let posts_endpoint =
            lookup("POSTS_ENDPOINT").unwrap_or_else(|| DEFAULT_POSTS_ENDPOINT.to_string());
        let posts_endpoint = Url::parse(&posts_endpoint)
            .wrap_err_with(|| format!("Invalid POSTS_ENDPOINT {posts_endpoint} not parsable"))?;
        ensure!(
            matches!(posts_endpoint.scheme(), "http" | "https"),
            "POSTS_ENDPOINT must be an http(s) URL, got {posts_endpoint}"
        );

        let viewer_name = lookup("VIEWER_NAME")
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_VIEWER_NAME.to_string());

        let port = match lookup("PORT") {
            Some(port) => port
                .parse()
                .wrap_err_with(|| format!("Invalid PORT {port}"))?,
            None => DEFAULT_PORT,
        };

        let posts_timeout = match lookup("POSTS_TIMEOUT_SECS") {
            Some(secs) => {
                let secs: u64 = secs
                    .parse()
                    .wrap_err_with(|| format!("Invalid POSTS_TIMEOUT_SECS {secs}"))?;
                ensure!(secs > 0, "POSTS_TIMEOUT_SECS must be at least 1");

                Duration::from_secs(secs)
            }
            None => posts::DEFAULT_TIMEOUT,
        };

        Ok(Self {
            posts_endpoint,
            viewer_name,
            port,
            posts_timeout,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct AppState {
    pub app: AppConfig,
    pub feed: HomeFeed,
}

impl AppState {
    /// Mounts the home feed against the configured endpoint. Must be called
    /// from inside the runtime, the feed's fetch is spawned immediately.
    pub fn mount(app: AppConfig) -> Result<Self> {
        let source = HttpPostSource::with_timeout(app.posts_endpoint.clone(), app.posts_timeout)
            .wrap_err("Failed to build the posts HTTP client")?;

        Ok(Self::with_source(app, Arc::new(source)))
    }

    pub fn with_source(app: AppConfig, source: Arc<dyn PostSource>) -> Self {
        let feed = HomeFeed::mount(source);

        Self { app, feed }
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(state: &AppState) -> Self {
        state.app.clone()
    }
}

impl FromRef<AppState> for HomeFeed {
    fn from_ref(state: &AppState) -> Self {
        state.feed.clone()
    }
}
