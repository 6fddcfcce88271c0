use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time::{sleep_until, Instant};

/// Roughly 30 years, what tokio itself uses for "never"
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// `at + dur`, clamped to [`FAR_FUTURE`] instead of panicking on overflow
pub(crate) fn instant_after(at: Instant, dur: Duration) -> Instant {
    at.checked_add(dur.min(FAR_FUTURE)).unwrap_or(at)
}

/// Grants one token every `interval`, holding at most `capacity` tokens.
///
/// A new bucket starts full, so the first `capacity` acquisitions don't wait.
#[derive(Debug)]
pub struct TokenBucket {
    capacity: u32,
    state: Mutex<BucketState>,
}

#[derive(Debug)]
struct BucketState {
    interval: Duration,
    tokens: u32,
    last_refill: Instant,
}

impl BucketState {
    fn refill(&mut self, capacity: u32, now: Instant) {
        if self.tokens >= capacity || self.interval.is_zero() {
            self.tokens = capacity;
            self.last_refill = now;
            return;
        }

        let elapsed = now.saturating_duration_since(self.last_refill);
        let earned = elapsed.as_nanos() / self.interval.as_nanos();
        let missing = capacity - self.tokens;

        if earned >= u128::from(missing) {
            self.tokens = capacity;
            self.last_refill = now;
        } else {
            // earned < missing <= u32::MAX
            let earned = earned as u32;
            self.tokens += earned;
            self.last_refill += self.interval * earned;
        }
    }
}

impl TokenBucket {
    /// A `capacity` of `0` is treated as `1`.
    pub fn new(interval: Duration, capacity: u32) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            state: Mutex::new(BucketState {
                interval,
                tokens: capacity,
                last_refill: Instant::now(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, BucketState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Waits until a token is available and takes it.
    pub async fn acquire(&self) {
        loop {
            let ready_at = {
                let mut state = self.state();
                state.refill(self.capacity, Instant::now());
                if state.tokens > 0 {
                    state.tokens -= 1;
                    return;
                }
                instant_after(state.last_refill, state.interval)
            };
            sleep_until(ready_at).await;
        }
    }

    /// Takes a token if one is available right now.
    pub fn try_acquire(&self) -> bool {
        let mut state = self.state();
        state.refill(self.capacity, Instant::now());
        if state.tokens > 0 {
            state.tokens -= 1;
            true
        } else {
            false
        }
    }

    /// Tokens earned under the old interval are kept.
    pub fn set_rate(&self, interval: Duration) {
        let mut state = self.state();
        state.refill(self.capacity, Instant::now());
        state.interval = interval;
    }

    pub fn rate(&self) -> Duration {
        self.state().interval
    }

    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn available(&self) -> u32 {
        let mut state = self.state();
        state.refill(self.capacity, Instant::now());
        state.tokens
    }

    /// Throws away all tokens, the next one is granted a full interval from now.
    pub fn drain(&self) {
        let mut state = self.state();
        state.tokens = 0;
        state.last_refill = Instant::now();
    }
}

/// Shared, replaceable slot for the [`TokenBucket`] the dispatcher spends from.
///
/// An empty slot means throttling is disabled. Reconfiguring wakes up a
/// pending [`Throttle::acquire`], so it waits under the new settings.
#[derive(Debug, Clone, Default)]
pub struct Throttle {
    bucket: Arc<RwLock<Option<Arc<TokenBucket>>>>,
    changed: Arc<Notify>,
}

impl Throttle {
    pub fn new(bucket: Option<TokenBucket>) -> Self {
        Self {
            bucket: Arc::new(RwLock::new(bucket.map(Arc::new))),
            changed: Arc::new(Notify::new()),
        }
    }

    fn current(&self) -> Option<Arc<TokenBucket>> {
        self.bucket
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the current bucket with a fresh, full one.
    pub fn enable(&self, interval: Duration, capacity: u32) {
        let bucket = Arc::new(TokenBucket::new(interval, capacity));
        *self.bucket.write().unwrap_or_else(PoisonError::into_inner) = Some(bucket);
        self.changed.notify_waiters();
    }

    pub fn disable(&self) {
        *self.bucket.write().unwrap_or_else(PoisonError::into_inner) = None;
        self.changed.notify_waiters();
    }

    pub fn is_enabled(&self) -> bool {
        self.current().is_some()
    }

    /// Returns `false` if throttling is disabled and there is no rate to change.
    pub fn set_rate(&self, interval: Duration) -> bool {
        match self.current() {
            Some(bucket) => {
                bucket.set_rate(interval);
                self.changed.notify_waiters();
                true
            }
            None => false,
        }
    }

    pub fn rate(&self) -> Option<Duration> {
        self.current().map(|bucket| bucket.rate())
    }

    /// Waits for a token of the current bucket. Starts over whenever the
    /// throttle is reconfigured while waiting.
    pub async fn acquire(&self) {
        loop {
            let changed = self.changed.notified();
            tokio::pin!(changed);
            // register before looking at the bucket, so no change is missed
            changed.as_mut().enable();

            let Some(bucket) = self.current() else {
                return;
            };
            tokio::select! {
                _ = bucket.acquire() => return,
                _ = &mut changed => continue,
            }
        }
    }

    pub fn drain(&self) {
        if let Some(bucket) = self.current() {
            bucket.drain();
        }
    }
}
