use std::fmt;
use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use thiserror::Error;
use tokio::time::Instant;
use url::Url;

use crate::token_bucket::instant_after;
use crate::transport::{HttpResponse, TransportError};

#[derive(Error, Debug)]
pub enum Error {
    /// Connection failures, timeouts, ... These are never retried
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("couldn't decode response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("no api-key has been set")]
    MissingApiKey,

    /// The dispatcher stopped before the query was answered
    #[error("dispatcher has shut down")]
    Shutdown,
}
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Status code of the response, if the error came from one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api(err) => Some(err.status()),
            Error::Transport(TransportError::Reqwest(err)) => err.status(),
            _ => None,
        }
    }
}

/// A response from the Steam API with a non-2xx status code.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
    url: Url,
}

impl ApiError {
    pub fn from_response(resp: HttpResponse) -> Self {
        Self {
            status: resp.status,
            headers: resp.headers,
            body: String::from_utf8_lossy(&resp.body).into_owned(),
            url: resp.url,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
    pub fn body(&self) -> &str {
        &self.body
    }
    /// The requested url. Contains the api-key, see [`ApiError::redacted_url`].
    pub fn url(&self) -> &Url {
        &self.url
    }
    pub fn redacted_url(&self) -> String {
        redact_url(&self.url)
    }

    /// Steam answers with `500` and `503` while it is overloaded or
    /// rate-limiting us, anything else won't change by asking again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.status,
            StatusCode::INTERNAL_SERVER_ERROR | StatusCode::SERVICE_UNAVAILABLE
        )
    }

    /// When the failed request may be sent again, [`None`] if it is terminal.
    pub fn retry_at(&self, now: Instant, cooldown: Duration) -> Option<Instant> {
        self.is_retryable().then(|| instant_after(now, cooldown))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let url = self.redacted_url();
        match self.status {
            StatusCode::UNAUTHORIZED => write!(f, "profile is private ({})", url),
            StatusCode::FORBIDDEN => write!(f, "access denied, check the api-key ({})", url),
            StatusCode::NOT_FOUND => write!(f, "not found ({})", url),
            StatusCode::INTERNAL_SERVER_ERROR => {
                write!(f, "user not found or server error ({})", url)
            }
            status => write!(f, "request to {} returned status {}", url, status),
        }
    }
}

impl std::error::Error for ApiError {}

/// Replaces the value of the `key` query parameter so urls can be logged.
pub fn redact_url(url: &Url) -> String {
    if !url.query_pairs().any(|(k, _)| k == "key") {
        return url.to_string();
    }
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" { "<redacted>".into() } else { v };
            (k.into_owned(), v.into_owned())
        })
        .collect();

    let mut url = url.clone();
    url.query_pairs_mut().clear().extend_pairs(pairs);
    url.to_string()
}
