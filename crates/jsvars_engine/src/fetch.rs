use std::time::Duration;

use futures_util::StreamExt;
use jsvars_core::{Content, FailureKind};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

use crate::FetchError;

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub redirect_limit: usize,
    pub user_agent: String,
    /// Whole-request timeout. `None` leaves the transport defaults in place.
    pub request_timeout: Option<Duration>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            redirect_limit: 10,
            user_agent: concat!("jsvars/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout: None,
        }
    }
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    /// Retrieve `target` exactly once.
    async fn fetch(&self, target: &str) -> Result<Content, FetchError>;
}

/// HTTP fetcher. The client, and with it the connection pool, is shared by
/// every worker of a run.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(settings.user_agent)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit));
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| FetchError::new(FailureKind::Transport, err.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, target: &str) -> Result<Content, FetchError> {
        // Dropping `response` on any return below releases the connection.
        let response = self
            .client
            .get(target)
            .send()
            .await
            .map_err(|err| FetchError::new(FailureKind::Transport, err.to_string()))?;

        // Only 200 counts; any other status, 2xx included, is reported.
        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::new(
                FailureKind::NonSuccessStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk =
                chunk.map_err(|err| FetchError::new(FailureKind::BodyRead, err.to_string()))?;
            bytes.extend_from_slice(&chunk);
        }

        Ok(Content {
            bytes,
            content_type,
        })
    }
}
