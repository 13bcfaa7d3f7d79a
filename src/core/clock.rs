use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch.
pub type Millis = u64;

pub const MILLIS_PER_SECOND: Millis = 1_000;
pub const MILLIS_PER_MINUTE: Millis = 60 * MILLIS_PER_SECOND;
pub const MILLIS_PER_HOUR: Millis = 60 * MILLIS_PER_MINUTE;

/// Wall-clock time source consumed by the store and the timers.
///
/// Timestamps are not monotonic. A device clock change can move `now_ms`
/// backwards; callers compare with saturating arithmetic and treat that as
/// "no time has passed".
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> Millis;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> Millis {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as Millis)
            .unwrap_or(0)
    }
}

/// Settable clock for tests and scripted sessions.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self {
            now: AtomicU64::new(start),
        }
    }

    pub fn set(&self, now: Millis) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, delta: Millis) {
        self.now.fetch_add(delta, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.now.load(Ordering::SeqCst)
    }
}

/// `now - earlier`, clamped at zero when the clock moved backwards.
pub fn elapsed_since(earlier: Millis, now: Millis) -> Millis {
    now.saturating_sub(earlier)
}
