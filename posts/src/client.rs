use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::Post;

/// Where the home feed gets its posts from.
#[async_trait]
pub trait PostSource: Send + Sync {
    async fn fetch_posts(&self) -> Result<Vec<Post>, FetchError>;
}

/// Any failure to turn the collection endpoint's response into posts.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {endpoint} failed")]
    Request {
        endpoint: Url,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned error {status}: {body}")]
    Status {
        endpoint: Url,
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("Response from {endpoint} was not a JSON array of posts")]
    Decode {
        endpoint: Url,
        #[source]
        source: serde_json::Error,
    },
}

/// How long a fetch may take before it counts as failed.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Reads the whole post collection with a single unauthenticated `GET`.
#[derive(Debug, Clone)]
pub struct HttpPostSource {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpPostSource {
    pub fn new(endpoint: Url) -> reqwest::Result<Self> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    /// A hung backend turns into a [`FetchError::Request`] after `timeout`.
    pub fn with_timeout(endpoint: Url, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: reqwest::Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl PostSource for HttpPostSource {
    #[instrument(name = "HttpPostSource::fetch_posts", skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch_posts(&self) -> Result<Vec<Post>, FetchError> {
        let endpoint = &self.endpoint;

        let response = self
            .client
            .get(endpoint.clone())
            .send()
            .await
            .map_err(|source| FetchError::Request {
                endpoint: endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read response body".to_string());

            return Err(FetchError::Status {
                endpoint: endpoint.clone(),
                status,
                body,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Request {
                endpoint: endpoint.clone(),
                source,
            })?;

        let posts: Vec<Post> =
            serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
                endpoint: endpoint.clone(),
                source,
            })?;

        tracing::debug!(count = posts.len(), "Fetched posts");

        Ok(posts)
    }
}
