//! Error types for wire-format decoding.
//!
//! All errors are structured, testable, and carry the information a caller
//! needs to decide whether to drop a connection or just log and move on.
//! Nothing in this crate escalates a decode failure beyond the immediate
//! caller.

use thiserror::Error;

/// Errors that can occur while decoding an untrusted byte buffer.
///
/// A failed decode leaves the unpacker in an aborted state: callers must
/// treat any error as terminal for that decode session and must not issue
/// further reads against the same unpacker.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnpackError {
    /// A read requested more bytes than the buffer has left
    #[error("short buffer: requested {requested} bytes, {remaining} remaining")]
    ShortBuffer {
        /// Bytes the operation needed
        requested: usize,
        /// Bytes still available in the buffer
        remaining: usize,
    },

    /// The next marker byte does not encode the requested type
    #[error("type mismatch: expected {expected}, found marker {found:#04x}")]
    TypeMismatch {
        /// Human-readable name of the expected wire type
        expected: &'static str,
        /// The marker byte actually present
        found: u8,
    },

    /// An array did not have the arity the protocol mandates
    #[error("arity mismatch: expected {expected} elements, got {actual}")]
    ArityMismatch {
        /// Element count required by the caller
        expected: u32,
        /// Element count declared on the wire
        actual: u32,
    },

    /// A byte-string's declared size did not match a fixed expectation
    #[error("size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        /// Size required by the caller
        expected: u32,
        /// Size declared on the wire
        actual: u32,
    },

    /// A declared length exceeds the bytes still available in the input.
    ///
    /// The wire format does not itself guarantee that a declared array or
    /// byte-string length is backed by real data, so the decoder enforces
    /// this bound before any allocation happens.
    #[error("declared length {claimed} exceeds {remaining} remaining input bytes")]
    LengthExceedsInput {
        /// Length declared on the wire
        claimed: u32,
        /// Bytes still available in the buffer
        remaining: usize,
    },

    /// A byte-string's declared size exceeds a caller-supplied capacity
    #[error("declared size {claimed} exceeds caller bound of {max} bytes")]
    SizeExceedsBound {
        /// Size declared on the wire
        claimed: u32,
        /// Maximum the caller can accept
        max: usize,
    },

    /// A decoded discriminant does not name a known enum value
    #[error("invalid {kind} discriminant: {value}")]
    InvalidDiscriminant {
        /// Name of the enum being decoded
        kind: &'static str,
        /// The unrecognized wire value
        value: u32,
    },
}

/// Convenient Result type alias for decode operations
pub type Result<T> = std::result::Result<T, UnpackError>;
