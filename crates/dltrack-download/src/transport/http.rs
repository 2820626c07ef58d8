//! Production transport using reqwest.
//!
//! The raw `Content-Length` header is passed through untouched; validating it
//! is the tracker's job.

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::header::CONTENT_LENGTH;

use dltrack_core::{DownloadError, DownloadResult, ResponseHead, SourceResponse, Transport};

use super::error::HttpError;
use crate::config::TransferConfig;

/// HTTP(S) transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport from the transfer configuration.
    pub fn new(config: &TransferConfig) -> DownloadResult<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.connect_timeout);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| DownloadError::other(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    async fn send(&self, url: &str) -> Result<reqwest::Response, HttpError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn open(&self, url: &str) -> DownloadResult<SourceResponse> {
        let response = self.send(url).await?;

        let content_length = response
            .headers()
            .get(CONTENT_LENGTH)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());

        tracing::debug!(
            target: "dltrack.transport",
            url,
            status = %response.status(),
            content_length = content_length.as_deref().unwrap_or("<none>"),
            "Response received"
        );

        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| DownloadError::from(HttpError::from(e))))
            .boxed();

        Ok(SourceResponse {
            head: ResponseHead { content_length },
            body,
        })
    }
}
