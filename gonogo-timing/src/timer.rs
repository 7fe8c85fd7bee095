use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Monotonic timestamp source for reaction-time measurement
pub trait Timer: Clone + Send + Sync {
    type Timestamp: Copy + Clone + Send + Sync;
    fn now(&self) -> Self::Timestamp;
    fn elapsed(&self, ts: Self::Timestamp) -> Duration;
}

/// Wall-clock-independent timer backed by `Instant`; timestamps are
/// nanoseconds since the timer was created.
#[derive(Debug, Clone)]
pub struct MonotonicTimer {
    start: Instant,
}

impl MonotonicTimer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer for MonotonicTimer {
    type Timestamp = u64;

    fn now(&self) -> u64 {
        self.start.elapsed().as_nanos() as u64
    }

    fn elapsed(&self, ts: u64) -> Duration {
        Duration::from_nanos(self.now().saturating_sub(ts))
    }
}

/// Timer advanced by hand, for deterministic tests. Clones share the
/// same clock so a state machine holding one can be driven externally.
#[derive(Debug, Clone, Default)]
pub struct ManualTimer {
    now_ns: Arc<AtomicU64>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, d: Duration) {
        self.now_ns
            .fetch_add(d.as_nanos() as u64, Ordering::SeqCst);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Timer for ManualTimer {
    type Timestamp = u64;

    fn now(&self) -> u64 {
        self.now_ns.load(Ordering::SeqCst)
    }

    fn elapsed(&self, ts: u64) -> Duration {
        Duration::from_nanos(self.now().saturating_sub(ts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monotonic_timer_never_goes_backwards() {
        let timer = MonotonicTimer::new();
        let a = timer.now();
        let b = timer.now();
        assert!(b >= a);
    }

    #[test]
    fn manual_timer_clones_share_the_clock() {
        let timer = ManualTimer::new();
        let clone = timer.clone();
        timer.advance_ms(250);
        assert_eq!(clone.now(), 250_000_000);
        assert_eq!(clone.elapsed(0), Duration::from_millis(250));
    }
}
