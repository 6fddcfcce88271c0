use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::constants::{API_BASE, DEFAULT_MAX_RETRIES, QUEUE_CAPACITY, RETRY_DELAY, STORE_BASE};
use crate::dispatcher::{Dispatcher, QueryParams, RetryPolicy};
use crate::error::{Error, Result};
use crate::token_bucket::{Throttle, TokenBucket};
use crate::transport::{ReqwestTransport, Transport};

/// Entry point for every endpoint.
///
/// Clones share the same request queue and throttle.
#[derive(Debug, Clone)]
pub struct Client {
    dispatcher: Dispatcher,
    api_key: Option<String>,
    api_base: Url,
    store_base: Url,
}

pub struct ClientOptions {
    api_key: Option<String>,
    api_base: Option<String>,
    store_base: Option<String>,
    throttle: Option<(Duration, u32)>,
    retry_delay: Option<Duration>,
    max_retries: Option<Option<u32>>,
    queue_capacity: Option<usize>,
    timeout: Option<Duration>,
    http_client: Option<reqwest::Client>,
    transport: Option<Arc<dyn Transport>>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientOptions {
    pub fn new() -> Self {
        Self {
            api_key: None,
            api_base: None,
            store_base: None,
            throttle: None,
            retry_delay: None,
            max_retries: None,
            queue_capacity: None,
            timeout: None,
            http_client: None,
            transport: None,
        }
    }
    /// Appended as `key` to every Web API request. Store endpoints work without one.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }
    pub fn store_base(mut self, base: impl Into<String>) -> Self {
        self.store_base = Some(base.into());
        self
    }
    /// Allow a burst of `capacity` requests, then one request per `interval`
    pub fn throttle(mut self, interval: Duration, capacity: u32) -> Self {
        self.throttle = Some((interval, capacity));
        self
    }
    pub fn retry_delay(mut self, dur: Duration) -> Self {
        self.retry_delay = Some(dur);
        self
    }
    pub fn retry_delay_ms(self, ms: u64) -> Self {
        self.retry_delay(Duration::from_millis(ms))
    }
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(Some(retries));
        self
    }
    /// Retry `500`/`503` responses until they succeed
    pub fn unbounded_retries(mut self) -> Self {
        self.max_retries = Some(None);
        self
    }
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = Some(capacity);
        self
    }
    /// Per-request timeout of the default transport
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }
    /// Send requests with this client instead of a new one
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }
    /// Replace the HTTP layer entirely, takes precedence over
    /// [`ClientOptions::http_client`] and [`ClientOptions::timeout`]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Spawns the request worker, so this has to be called from within a
    /// tokio runtime.
    pub fn build(self) -> Result<Client> {
        let api_base = parse_base(self.api_base.as_deref().unwrap_or(API_BASE))?;
        let store_base = parse_base(self.store_base.as_deref().unwrap_or(STORE_BASE))?;

        let transport: Arc<dyn Transport> = match (self.transport, self.http_client) {
            (Some(transport), _) => transport,
            (None, Some(client)) => Arc::new(ReqwestTransport::new(client)),
            (None, None) => match self.timeout {
                Some(timeout) => Arc::new(ReqwestTransport::with_timeout(timeout)?),
                None => Arc::new(ReqwestTransport::default()),
            },
        };

        let throttle = Throttle::new(
            self.throttle
                .map(|(interval, capacity)| TokenBucket::new(interval, capacity)),
        );
        let retry = RetryPolicy {
            delay: self.retry_delay.unwrap_or(RETRY_DELAY),
            max_retries: self.max_retries.unwrap_or(Some(DEFAULT_MAX_RETRIES)),
        };
        let capacity = self.queue_capacity.unwrap_or(QUEUE_CAPACITY);

        Ok(Client {
            dispatcher: Dispatcher::spawn(transport, throttle, retry, capacity),
            api_key: self.api_key,
            api_base,
            store_base,
        })
    }
}

/// `Url::join` drops the last path segment unless the base ends with a slash
fn parse_base(base: &str) -> Result<Url> {
    if base.ends_with('/') {
        Ok(Url::parse(base)?)
    } else {
        Ok(Url::parse(&format!("{}/", base))?)
    }
}

impl Client {
    /// Client with the default options and the given api-key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientOptions::new().api_key(api_key).build()
    }

    /// Replaces the current throttle with a full bucket of `capacity` tokens
    /// and one new token per `interval`.
    pub fn enable_throttling(&self, interval: Duration, capacity: u32) {
        self.dispatcher.throttle().enable(interval, capacity);
    }

    pub fn disable_throttling(&self) {
        self.dispatcher.throttle().disable();
    }

    /// Changes the refill interval of the throttle. Does nothing while
    /// throttling is disabled.
    pub fn set_delay(&self, interval: Duration) {
        if !self.dispatcher.throttle().set_rate(interval) {
            log::warn!("set_delay({:?}) ignored, throttling is disabled", interval);
        }
    }

    /// The refill interval of the throttle, [`None`] while throttling is disabled.
    pub fn delay(&self) -> Option<Duration> {
        self.dispatcher.throttle().rate()
    }

    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or(Error::MissingApiKey)
    }

    /// `GET` a Web API endpoint with the api-key appended to `params`
    pub(crate) async fn get_json<T>(&self, path: &str, mut params: QueryParams) -> Result<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let url = self.api_base.join(path)?;
        params.push("key", self.api_key()?);
        self.dispatcher.request(url, params).await
    }

    /// `GET` a store endpoint, these don't take an api-key
    pub(crate) async fn get_store_json<T>(&self, path: &str, params: QueryParams) -> Result<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let url = self.store_base.join(path)?;
        self.dispatcher.request(url, params).await
    }
}
