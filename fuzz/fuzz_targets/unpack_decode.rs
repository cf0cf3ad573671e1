//! Adversarial-input fuzzer for the wire decoder.
//!
//! Feeds arbitrary bytes through every decode operation. The decoder is
//! allowed to fail on anything; it is never allowed to panic, over-read,
//! or allocate based on an unvalidated length prefix.

#![no_main]

use duskwire_proto::{
    ConferenceType, FileControl, GroupPrivacyState, MessageType, UserStatus, unpack,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Use the first byte to select an operation sequence; the rest is the
    // wire buffer. This lets libFuzzer explore each decode path with
    // marker bytes at offset zero.
    let Some((&selector, wire)) = data.split_first() else {
        return;
    };

    let _ = unpack(wire, |up| {
        match selector % 8 {
            0 => {
                let count = up.read_array()?;
                // The defensive bound guarantees this never exceeds input.
                assert!(count as usize <= wire.len());
                for _ in 0..count {
                    let _ = up.read_u8()?;
                }
            }
            1 => {
                up.read_array_fixed(u32::from(selector / 8))?;
            }
            2 => {
                let data = up.read_bin()?;
                assert!(data.len() <= wire.len());
            }
            3 => {
                let mut buf = [0u8; 64];
                let n = up.read_bin_into(&mut buf)?;
                assert!(n <= buf.len());
            }
            4 => {
                let mut exact = [0u8; 32];
                up.read_bin_fixed(&mut exact)?;
            }
            5 => {
                let _ = up.read_bool()?;
                up.read_nil()?;
                let _ = up.read_u64()?;
            }
            6 => {
                let _ = up.read_u16_be()?;
                let _ = up.read_u32_be()?;
                let _ = up.read_u64_be()?;
            }
            _ => {
                let _ = MessageType::unpack(up);
                let _ = UserStatus::unpack(up);
                let _ = ConferenceType::unpack(up);
                let _ = FileControl::unpack(up);
                let _ = GroupPrivacyState::unpack(up);
            }
        }
        assert!(up.remaining() <= wire.len());
        Ok(())
    });
});
