//! Wire-format decoding for the Duskwire protocol.
//!
//! This crate sits directly on the trust boundary: the byte buffers it
//! consumes come from the network and are fully adversarial. It provides a
//! streaming decoder for the protocol's MessagePack-family wire encoding
//! (arrays, booleans, nil, unsigned integers, byte-strings) plus the typed
//! enum adapters higher layers use for single 32-bit fields.
//!
//! # Design
//!
//! - **Scoped decode sessions**: the only entry point is
//!   [`unpack`], which borrows the input buffer for the duration of a
//!   closure. The unpacker cannot outlive the buffer or escape the call.
//!
//! - **Bounds before bytes**: declared array and byte-string lengths are
//!   validated against the remaining input before anything is allocated or
//!   copied. A forged length prefix fails cleanly; it never over-reads and
//!   never triggers an oversized allocation.
//!
//! - **Read-only by construction**: the decoder has no write half. The
//!   symmetric encoder is a separate component with its own interface.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cursor;
pub mod errors;
pub mod types;
pub mod unpack;

pub use errors::{Result, UnpackError};
pub use types::{
    ConferenceType, FileControl, GroupPrivacyState, GroupTopicLock, GroupVoiceState, MessageType,
    UserStatus,
};
pub use unpack::{Unpacker, unpack};
