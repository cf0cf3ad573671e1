//! Cryptographic building blocks for the Duskwire protocol.
//!
//! Currently this is the timed-authentication scheme: stateless,
//! replay-resistant tokens bound to a shared secret, an optional context
//! buffer, and a discrete time window. The heavy lifting is plain
//! HMAC-SHA256; what this crate adds is the windowing contract and the
//! clock seam that keeps the logic deterministic under test.
//!
//! Both entry points are pure functions of their inputs. There is no
//! instance state, no locking, and no I/O; concurrency needs nothing more
//! than a `Sync` clock.

/// Monotonic clock abstraction and implementations.
pub mod clock;

/// Time-windowed keyed authenticators.
pub mod timed_auth;

pub use clock::{Clock, FixedClock, SystemClock};
pub use timed_auth::{
    TIMED_AUTH_KEY_SIZE, TIMED_AUTH_SIZE, check_timed_auth, generate_timed_auth,
};
