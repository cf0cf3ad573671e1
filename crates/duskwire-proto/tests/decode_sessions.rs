//! End-to-end decode sessions against hand-built wire buffers.
//!
//! These tests drive the public API the way a protocol layer would:
//! a whole message decoded in one session, with the wire bytes written out
//! explicitly so any change to the accepted grammar shows up as a test
//! diff.

use duskwire_proto::{ConferenceType, FileControl, UnpackError, unpack};
use hex_literal::hex;
use proptest::prelude::*;

#[test]
fn decode_handshake_like_message() {
    // [version: u8, session: u64-be bin, capabilities flag, padding: nil]
    // 94            -- 4-element array
    // 01            -- version 1
    // c4 08 ..      -- 8-byte session id as a byte-string
    // c3            -- capabilities flag: true
    // c0            -- reserved slot, nil
    let wire = hex!("94 01 c408 0011223344556677 c3 c0");

    let (version, session, flag) = unpack(&wire, |up| {
        up.read_array_fixed(4)?;
        let version = up.read_u8()?;
        let mut session = [0u8; 8];
        up.read_bin_fixed(&mut session)?;
        let flag = up.read_bool()?;
        up.read_nil()?;
        assert_eq!(up.remaining(), 0);
        Ok((version, u64::from_be_bytes(session), flag))
    })
    .unwrap();

    assert_eq!(version, 1);
    assert_eq!(session, 0x0011_2233_4455_6677);
    assert!(flag);
}

#[test]
fn decode_enum_bearing_message() {
    // [conference type, file control] as minimal-width u32 fields.
    let wire = hex!("92 01 02");
    let (conf, ctrl) = unpack(&wire, |up| {
        up.read_array_fixed(2)?;
        Ok((ConferenceType::unpack(up)?, FileControl::unpack(up)?))
    })
    .unwrap();
    assert_eq!(conf, ConferenceType::Av);
    assert_eq!(ctrl, FileControl::Cancel);
}

#[test]
fn failure_mid_session_leaves_no_partial_output() {
    // Valid array and first field, then a truncated byte-string. The
    // session must fail as a whole; the closure's partial work is
    // discarded with it.
    let wire = hex!("92 2a c4 10 0102");
    let result = unpack(&wire, |up| {
        up.read_array_fixed(2)?;
        let first = up.read_u8()?;
        let second = up.read_bin()?;
        Ok((first, second))
    });
    assert_eq!(
        result.unwrap_err(),
        UnpackError::LengthExceedsInput { claimed: 16, remaining: 2 }
    );
}

#[test]
fn corrupted_size_prefix_always_fails() {
    // Take a valid message and inflate its byte-string size prefix past
    // the remaining input; every inflated variant must be rejected.
    let valid = hex!("c4 04 deadbeef");
    assert!(unpack(&valid, |up| up.read_bin()).is_ok());

    for oversize in [5u8, 6, 0x7f, 0xff] {
        let mut corrupted = valid;
        corrupted[1] = oversize;
        let err = unpack(&corrupted, |up| up.read_bin()).unwrap_err();
        assert_eq!(
            err,
            UnpackError::LengthExceedsInput { claimed: u32::from(oversize), remaining: 4 },
            "size prefix {oversize} must not decode"
        );
    }
}

proptest! {
    #[test]
    fn remaining_never_exceeds_input(wire in prop::collection::vec(any::<u8>(), 0..512)) {
        // Drain the buffer with a mix of reads; whatever happens, the
        // reported remaining length stays within the input and decreases
        // monotonically.
        let _ = unpack(&wire, |up| {
            let mut last = up.remaining();
            assert_eq!(last, wire.len());
            loop {
                let before = up.remaining();
                let progressed = up.read_u8().is_ok()
                    || up.read_bin().is_ok()
                    || up.read_array().is_ok()
                    || up.skip(1).is_ok();
                let after = up.remaining();
                assert!(after <= before);
                assert!(after <= last);
                last = after;
                if !progressed || after == 0 {
                    break;
                }
            }
            Ok(())
        });
    }

    #[test]
    fn declared_bin_size_is_honored_exactly(payload in prop::collection::vec(any::<u8>(), 0..200), trailer in any::<u8>()) {
        // bin8 with exact size prefix, then one trailing byte. The decoder
        // must consume exactly the declared payload and leave the trailer.
        let mut wire = vec![0xc4, payload.len() as u8];
        wire.extend_from_slice(&payload);
        wire.push(trailer);

        let (data, rest) = unpack(&wire, |up| {
            let data = up.read_bin()?;
            Ok((data, up.remaining()))
        }).unwrap();
        prop_assert_eq!(&data[..], &payload[..]);
        prop_assert_eq!(rest, 1);
    }
}
