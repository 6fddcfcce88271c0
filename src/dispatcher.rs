//! Single worker that executes every request of a [`Client`](crate::Client).
//!
//! Callers hand a [`Query`] to the [`Dispatcher`] and wait on its reply
//! channel. The worker takes queries in the order they arrive, spends a token
//! from the [`Throttle`] and sends the request. Queries that fail with a
//! retryable status are put back at the end of the queue once their cooldown
//! is over, everything else is answered right away.

use std::fmt::Display;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{sleep_until, Instant};
use url::Url;

use crate::constants::{DEFAULT_MAX_RETRIES, QUEUE_CAPACITY, RETRY_DELAY};
use crate::error::{redact_url, ApiError, Error, Result};
use crate::token_bucket::Throttle;
use crate::transport::Transport;

/// Ordered query parameters, duplicate keys are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Display) -> &mut Self {
        self.0.push((key.into(), value.to_string()));
        self
    }

    /// Only pushes `value` if there is one
    pub fn push_opt(&mut self, key: impl Into<String>, value: Option<impl Display>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// First value stored for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn as_slice(&self) -> &[(String, String)] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (k, v) in iter {
            params.push(k, v);
        }
        params
    }
}

/// Where the outcome of a query goes. Answering consumes the reply, so a
/// query can't be answered twice.
trait Reply: Send {
    fn succeed(self: Box<Self>, body: &[u8]);
    fn fail(self: Box<Self>, err: Error);
}

struct JsonReply<T> {
    tx: oneshot::Sender<Result<T>>,
}

impl<T> Reply for JsonReply<T>
where
    T: DeserializeOwned + Send + 'static,
{
    fn succeed(self: Box<Self>, body: &[u8]) {
        let decoded = serde_json::from_slice::<T>(body).map_err(Error::from);
        // the caller might have stopped waiting, that's fine
        let _ = self.tx.send(decoded);
    }
    fn fail(self: Box<Self>, err: Error) {
        let _ = self.tx.send(Err(err));
    }
}

/// One pending request
pub struct Query {
    url: Url,
    params: QueryParams,
    reply: Box<dyn Reply>,
    attempts: u32,
}

impl Query {
    /// Creates a query whose response body is decoded into `T`, and the
    /// receiver the outcome is delivered to.
    pub fn new<T>(url: Url, params: QueryParams) -> (Self, PendingReply<T>)
    where
        T: DeserializeOwned + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let query = Query {
            url,
            params,
            reply: Box::new(JsonReply { tx }),
            attempts: 0,
        };
        (query, PendingReply { rx, _marker: PhantomData })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    /// How often the query has been sent so far
    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

impl std::fmt::Debug for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Query")
            .field("url", &self.url.as_str())
            .field("params", &self.params.len())
            .field("attempts", &self.attempts)
            .finish_non_exhaustive()
    }
}

/// Receiving end of a submitted [`Query`]
pub struct PendingReply<T> {
    rx: oneshot::Receiver<Result<T>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> PendingReply<T> {
    pub async fn wait(self) -> Result<T> {
        self.rx.await.unwrap_or(Err(Error::Shutdown))
    }
}

/// How transient failures are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Time between a failed attempt and the query being queued again
    pub delay: Duration,
    /// [`None`] retries forever
    pub max_retries: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay: RETRY_DELAY,
            max_retries: Some(DEFAULT_MAX_RETRIES),
        }
    }
}

impl RetryPolicy {
    fn allows(&self, retries_so_far: u32) -> bool {
        self.max_retries.map_or(true, |max| retries_so_far < max)
    }
}

/// Handle for submitting queries to the worker. Cloning is cheap, the worker
/// stops once every handle is dropped and the queue ran empty.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    tx: mpsc::Sender<Query>,
    throttle: Throttle,
}

impl Dispatcher {
    /// Spawns the worker onto the current tokio runtime.
    ///
    /// # Panics
    ///
    /// If called outside of a tokio runtime.
    pub fn spawn(
        transport: Arc<dyn Transport>,
        throttle: Throttle,
        retry: RetryPolicy,
        queue_capacity: usize,
    ) -> Self {
        let (tx, rx) = mpsc::channel(queue_capacity.max(1));
        let worker = Worker {
            rx,
            requeue: tx.downgrade(),
            transport,
            throttle: throttle.clone(),
            retry,
        };
        tokio::spawn(worker.run());
        Self { tx, throttle }
    }

    /// Same as [`Dispatcher::spawn`] with the default queue size
    pub fn spawn_default(transport: Arc<dyn Transport>, throttle: Throttle) -> Self {
        Self::spawn(transport, throttle, RetryPolicy::default(), QUEUE_CAPACITY)
    }

    pub fn throttle(&self) -> &Throttle {
        &self.throttle
    }

    /// Puts `query` at the end of the queue.
    ///
    /// If the worker is gone, the query is answered with [`Error::Shutdown`]
    /// and the same error is returned.
    pub async fn submit(&self, query: Query) -> Result<()> {
        match self.tx.send(query).await {
            Ok(()) => Ok(()),
            Err(mpsc::error::SendError(query)) => {
                query.reply.fail(Error::Shutdown);
                Err(Error::Shutdown)
            }
        }
    }

    /// Submits a `GET` for `url` and waits for the decoded response.
    pub async fn request<T>(&self, url: Url, params: QueryParams) -> Result<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let (query, reply) = Query::new::<T>(url, params);
        self.submit(query).await?;
        reply.wait().await
    }
}

struct Worker {
    rx: mpsc::Receiver<Query>,
    /// Weak, so the worker alone doesn't keep the queue open
    requeue: mpsc::WeakSender<Query>,
    transport: Arc<dyn Transport>,
    throttle: Throttle,
    retry: RetryPolicy,
}

impl Worker {
    async fn run(mut self) {
        while let Some(query) = self.rx.recv().await {
            self.execute(query).await;
        }
        log::debug!("dispatcher queue closed, worker stopped");
    }

    async fn execute(&self, mut query: Query) {
        self.throttle.acquire().await;

        query.attempts += 1;
        let resp = match self.transport.get(&query.url, query.params.as_slice()).await {
            Ok(resp) => resp,
            Err(err) => {
                log::warn!("request to {} failed: {}", redact_url(&query.url), err);
                query.reply.fail(err.into());
                return;
            }
        };

        log::debug!(
            "executed query: url={} status={} attempt={}",
            redact_url(&resp.url),
            resp.status,
            query.attempts
        );

        if resp.status.is_success() {
            query.reply.succeed(&resp.body);
            return;
        }

        let err = ApiError::from_response(resp);
        let resume_at = match err.retry_at(Instant::now(), self.retry.delay) {
            Some(at) if self.retry.allows(query.attempts - 1) => at,
            _ => {
                log::error!(
                    "api error: status={} url={} attempts={}",
                    err.status(),
                    err.redacted_url(),
                    query.attempts
                );
                query.reply.fail(err.into());
                return;
            }
        };

        match self.requeue.upgrade() {
            Some(tx) => {
                log::warn!(
                    "{} returned {}, retrying in {:?}",
                    err.redacted_url(),
                    err.status(),
                    self.retry.delay
                );
                // start over fresh once the cooldown is over
                self.throttle.drain();
                tokio::spawn(reschedule(tx, query, resume_at));
            }
            None => query.reply.fail(err.into()),
        }
    }
}

async fn reschedule(tx: mpsc::Sender<Query>, query: Query, resume_at: Instant) {
    sleep_until(resume_at).await;
    if let Err(mpsc::error::SendError(query)) = tx.send(query).await {
        query.reply.fail(Error::Shutdown);
    }
}
