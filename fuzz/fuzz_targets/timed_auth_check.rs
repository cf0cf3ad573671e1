//! Fuzzer for timed-authenticator verification.
//!
//! Verification must never panic and must never accept a token that was
//! not generated within the two-window acceptance horizon for the same
//! key and context.

#![no_main]

use std::num::NonZeroU16;

use duskwire_crypto::{
    FixedClock, TIMED_AUTH_KEY_SIZE, TIMED_AUTH_SIZE, check_timed_auth, generate_timed_auth,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 + 8 + TIMED_AUTH_KEY_SIZE {
        return;
    }

    let (timeout_bytes, rest) = data.split_at(2);
    let (time_bytes, rest) = rest.split_at(8);
    let (key_bytes, context) = rest.split_at(TIMED_AUTH_KEY_SIZE);

    let Some(timeout) =
        NonZeroU16::new(u16::from_be_bytes([timeout_bytes[0], timeout_bytes[1]]))
    else {
        return;
    };
    let now = u64::from_be_bytes([
        time_bytes[0],
        time_bytes[1],
        time_bytes[2],
        time_bytes[3],
        time_bytes[4],
        time_bytes[5],
        time_bytes[6],
        time_bytes[7],
    ]);
    let mut key = [0u8; TIMED_AUTH_KEY_SIZE];
    key.copy_from_slice(key_bytes);

    let clock = FixedClock::at(now);
    let token = generate_timed_auth(&clock, timeout, &key, context);
    assert!(check_timed_auth(&clock, timeout, &key, context, &token));

    // A token of context bytes (or zeros) must not verify unless it
    // happens to equal the real one.
    let mut forged = [0u8; TIMED_AUTH_SIZE];
    for (dst, src) in forged.iter_mut().zip(context.iter()) {
        *dst = *src;
    }
    if forged != token {
        assert!(!check_timed_auth(&clock, timeout, &key, context, &forged));
    }

    // Wrong key must reject.
    let mut wrong_key = key;
    wrong_key[0] ^= 0x01;
    assert!(!check_timed_auth(&clock, timeout, &wrong_key, context, &token));
});
