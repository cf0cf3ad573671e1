//! Replay-resistant time-windowed authenticators.
//!
//! An authenticator is an HMAC over the current time window's index plus an
//! optional context buffer. Whoever holds the key can mint a token now and
//! recognize it later, without storing anything per token: the time window
//! is the only state. Tokens expire when their window (plus one grace
//! window) passes, which bounds how long a captured token can be replayed.
//!
//! Used for handshake cookies and similar prove-you-were-here exchanges
//! where generation and verification happen on the same node.
//!
//! # Security
//!
//! - **Replay horizon**: verification accepts the current window and the
//!   immediately preceding one, nothing else. A token is replayable for at
//!   most `2 * timeout` seconds after the start of its window, then
//!   permanently dead.
//! - **Context binding**: the context buffer is part of the MAC input, so a
//!   token minted for one exchange cannot be replayed in another.
//! - **One-bit result**: verification returns a bare `bool`. Wrong key,
//!   expired window, and corrupted token are indistinguishable to a caller
//!   and, by extension, to a probing adversary.
//! - **Constant-time comparison**: token matching goes through the MAC's
//!   own verification, never a byte-wise `==`.

use std::num::NonZeroU16;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::clock::Clock;

/// Size in bytes of an authenticator token (HMAC-SHA256 tag).
pub const TIMED_AUTH_SIZE: usize = 32;

/// Size in bytes of the shared secret key.
pub const TIMED_AUTH_KEY_SIZE: usize = 32;

type HmacSha256 = Hmac<Sha256>;

/// Feed one window's hash input into a fresh MAC.
///
/// The input is the window index as 8 bytes in host byte order followed by
/// the context bytes. The index never crosses the network, so a
/// wire-stable encoding is deliberately not used. The previous window is
/// selected with a wrapping decrement, matching unsigned arithmetic at
/// window zero.
fn window_mac(
    clock: &dyn Clock,
    timeout: NonZeroU16,
    previous: bool,
    key: &[u8; TIMED_AUTH_KEY_SIZE],
    context: &[u8],
) -> HmacSha256 {
    let window = (clock.now_secs() / u64::from(timeout.get())).wrapping_sub(u64::from(previous));
    let Ok(mut mac) = HmacSha256::new_from_slice(key) else {
        // HMAC accepts keys of any length.
        unreachable!()
    };
    mac.update(&window.to_ne_bytes());
    mac.update(context);
    mac
}

/// Generate an authenticator for the current time window.
///
/// Always succeeds: the `timeout > 0` contract is carried by the
/// [`NonZeroU16`] parameter, and HMAC itself is infallible. The key is
/// borrowed for the call only and never retained. An empty `context` is
/// valid and still bound into the token.
#[must_use]
pub fn generate_timed_auth(
    clock: &dyn Clock,
    timeout: NonZeroU16,
    key: &[u8; TIMED_AUTH_KEY_SIZE],
    context: &[u8],
) -> [u8; TIMED_AUTH_SIZE] {
    window_mac(clock, timeout, false, key, context).finalize().into_bytes().into()
}

/// Verify an authenticator against the current and previous time windows.
///
/// Returns `true` iff `token` matches the authenticator for the current
/// window or the one immediately before it, checked in that order with the
/// first match winning. The one-window lookback absorbs a token that was
/// minted just before a window boundary; there is deliberately no
/// future-window tolerance, so a verifier running ahead of the generator
/// gets no slack.
///
/// All failure causes collapse to `false`; the comparison itself is
/// constant-time.
#[must_use]
pub fn check_timed_auth(
    clock: &dyn Clock,
    timeout: NonZeroU16,
    key: &[u8; TIMED_AUTH_KEY_SIZE],
    context: &[u8],
    token: &[u8; TIMED_AUTH_SIZE],
) -> bool {
    for previous in [false, true] {
        let mac = window_mac(clock, timeout, previous, key, context);
        if mac.verify_slice(token).is_ok() {
            return true;
        }
    }
    false
}
