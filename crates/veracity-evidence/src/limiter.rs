//! Fixed-interval rate limiting for corpus downloads

use async_trait::async_trait;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Monotonic time source
#[async_trait]
pub trait Clock: Send + Sync + fmt::Debug {
    /// Time elapsed since the clock's origin
    fn now(&self) -> Duration;

    /// Wait for `duration`
    async fn sleep(&self, duration: Duration);
}

/// Real clock backed by the tokio timer
#[derive(Debug, Clone)]
pub struct TokioClock {
    origin: tokio::time::Instant,
}

impl TokioClock {
    /// Create a clock whose origin is now
    pub fn new() -> Self {
        Self {
            origin: tokio::time::Instant::now(),
        }
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clock for TokioClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[derive(Debug, Default)]
struct FakeClockState {
    now: Duration,
    sleeps: Vec<Duration>,
}

/// Manually driven clock; `sleep` returns immediately and advances time
#[derive(Debug, Clone, Default)]
pub struct FakeClock {
    state: Arc<Mutex<FakeClockState>>,
}

impl FakeClock {
    /// Create a clock at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward without sleeping
    pub fn advance(&self, duration: Duration) {
        self.state.lock().now += duration;
    }

    /// Every duration passed to `sleep`, in order
    pub fn sleeps(&self) -> Vec<Duration> {
        self.state.lock().sleeps.clone()
    }
}

#[async_trait]
impl Clock for FakeClock {
    fn now(&self) -> Duration {
        self.state.lock().now
    }

    async fn sleep(&self, duration: Duration) {
        let mut state = self.state.lock();
        state.sleeps.push(duration);
        state.now += duration;
    }
}

/// Grants at most one permit per `interval`
///
/// The first permit is immediate; each later one waits until `interval` has
/// passed since the previous grant. Concurrent callers are served in turn.
#[derive(Debug)]
pub struct FixedIntervalLimiter {
    interval: Duration,
    clock: Arc<dyn Clock>,
    next_slot: tokio::sync::Mutex<Option<Duration>>,
}

impl FixedIntervalLimiter {
    /// Create a limiter on the given clock
    pub fn new(interval: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            interval,
            clock,
            next_slot: tokio::sync::Mutex::new(None),
        }
    }

    /// Create a limiter on the tokio clock
    pub fn with_tokio_clock(interval: Duration) -> Self {
        Self::new(interval, Arc::new(TokioClock::new()))
    }

    /// Configured spacing
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait for the next permit
    pub async fn acquire(&self) {
        let mut next_slot = self.next_slot.lock().await;
        let now = self.clock.now();
        let granted = match *next_slot {
            Some(slot) if slot > now => {
                self.clock.sleep(slot - now).await;
                slot
            }
            _ => now,
        };
        *next_slot = Some(granted + self.interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_permit_is_immediate() {
        let clock = FakeClock::new();
        let limiter = FixedIntervalLimiter::new(Duration::from_millis(500), Arc::new(clock.clone()));

        limiter.acquire().await;
        assert!(clock.sleeps().is_empty());
    }

    #[tokio::test]
    async fn test_back_to_back_permits_are_spaced() {
        let clock = FakeClock::new();
        let limiter = FixedIntervalLimiter::new(Duration::from_millis(500), Arc::new(clock.clone()));

        limiter.acquire().await;
        limiter.acquire().await;
        limiter.acquire().await;
        assert_eq!(
            clock.sleeps(),
            vec![Duration::from_millis(500), Duration::from_millis(500)]
        );
        assert_eq!(clock.now(), Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn test_elapsed_time_reduces_wait() {
        let clock = FakeClock::new();
        let limiter = FixedIntervalLimiter::new(Duration::from_millis(500), Arc::new(clock.clone()));

        limiter.acquire().await;
        clock.advance(Duration::from_millis(300));
        limiter.acquire().await;
        clock.advance(Duration::from_secs(2));
        limiter.acquire().await;

        assert_eq!(clock.sleeps(), vec![Duration::from_millis(200)]);
    }

    #[tokio::test]
    async fn test_tokio_clock_advances() {
        let clock = TokioClock::new();
        let before = clock.now();
        clock.sleep(Duration::from_millis(5)).await;
        assert!(clock.now() >= before + Duration::from_millis(5));
    }
}
