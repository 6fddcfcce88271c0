use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    /// Failure reported by a custom [`Transport`]
    #[error("transport failure: {0}")]
    Other(String),
}

/// Everything the dispatcher needs to know about a finished request
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
    /// The final url, including the encoded query string
    pub url: Url,
}

/// Executes a single `GET` request.
///
/// The dispatcher never runs two requests at once, so implementations don't
/// have to limit concurrency themselves.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(
        &self,
        url: &Url,
        params: &[(String, String)],
    ) -> Result<HttpResponse, TransportError>;
}

/// Default [`Transport`] backed by [`reqwest::Client`]
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(
        &self,
        url: &Url,
        params: &[(String, String)],
    ) -> Result<HttpResponse, TransportError> {
        let resp = self.client.get(url.clone()).query(params).send().await?;

        let status = resp.status();
        let headers = resp.headers().clone();
        let url = resp.url().clone();
        let body = resp.bytes().await?;

        Ok(HttpResponse {
            status,
            headers,
            body,
            url,
        })
    }
}
