//! Monotonic clock seam for time-windowed authentication.
//!
//! Authenticator logic never reads system time directly; it takes a
//! [`Clock`] so the same code runs against the real clock in production and
//! a controllable clock in deterministic tests. This mirrors the
//! environment-abstraction pattern used across the rest of the stack.

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Instant,
};

/// A monotonically non-decreasing time source, in whole seconds.
///
/// # Invariants
///
/// - Monotonicity: within one process lifetime, `now_secs` never returns a
///   value smaller than a previously returned one. A backward jump would
///   let a freshly generated authenticator fail its own verification.
/// - Thread safety: implementations must be safe for concurrent reads;
///   authenticator generation and verification take `&self` and may run
///   from any number of threads.
pub trait Clock: Send + Sync {
    /// Current time in seconds. The absolute base is irrelevant; only
    /// differences and window quotients are ever used.
    fn now_secs(&self) -> u64;
}

/// Production clock backed by [`Instant`].
///
/// Seconds are measured from the moment the clock was created, which makes
/// the source immune to wall-clock adjustments. Generation and verification
/// of a given authenticator must go through the same `SystemClock` (or a
/// clone of it), since two instances have unrelated origins.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock whose epoch is the moment of this call.
    #[must_use]
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_secs(&self) -> u64 {
        self.origin.elapsed().as_secs()
    }
}

/// Manually driven clock for deterministic tests.
///
/// Time only moves when the test advances it, so window-boundary behavior
/// can be pinned down exactly.
#[derive(Debug, Default)]
pub struct FixedClock {
    now: AtomicU64,
}

impl FixedClock {
    /// Create a clock frozen at `now` seconds.
    #[must_use]
    pub fn at(now: u64) -> Self {
        Self { now: AtomicU64::new(now) }
    }

    /// Jump to an absolute time. Callers are responsible for keeping the
    /// sequence of values non-decreasing.
    pub fn set(&self, now: u64) {
        self.now.store(now, Ordering::Relaxed);
    }

    /// Move time forward by `secs`.
    pub fn advance(&self, secs: u64) {
        self.now.fetch_add(secs, Ordering::Relaxed);
    }
}

impl Clock for FixedClock {
    fn now_secs(&self) -> u64 {
        self.now.load(Ordering::Relaxed)
    }
}
