//! Streaming decoder for the Duskwire wire encoding.
//!
//! The wire format is a MessagePack-family encoding restricted to the
//! shapes the protocol actually uses: arrays, booleans, nil, unsigned
//! integers of four widths, and length-prefixed byte-strings. Input buffers
//! come straight off the network and are fully untrusted, so every
//! operation is bounds-checked against the bytes actually present before
//! anything is copied or allocated.
//!
//! # Security
//!
//! - **No over-read**: no sequence of decode calls can read past the end of
//!   the input buffer. Declared array and byte-string lengths are checked
//!   against the remaining input before allocation.
//! - **Fail terminal**: a failed read aborts the decode session. The
//!   unpacker's position is unspecified after an error and callers must not
//!   issue further reads.
//! - **No unchecked paths**: every operation returns `Result`. There are no
//!   "fast path" variants that skip validation.

use bytes::Bytes;

use crate::{
    cursor::Cursor,
    errors::{Result, UnpackError},
};

/// Wire marker bytes (MessagePack encoding).
mod marker {
    pub const NIL: u8 = 0xc0;
    pub const FALSE: u8 = 0xc2;
    pub const TRUE: u8 = 0xc3;
    pub const BIN8: u8 = 0xc4;
    pub const BIN16: u8 = 0xc5;
    pub const BIN32: u8 = 0xc6;
    pub const UINT8: u8 = 0xcc;
    pub const UINT16: u8 = 0xcd;
    pub const UINT32: u8 = 0xce;
    pub const UINT64: u8 = 0xcf;
    pub const ARRAY16: u8 = 0xdc;
    pub const ARRAY32: u8 = 0xdd;
    pub const FIXARRAY_LO: u8 = 0x90;
    pub const FIXARRAY_HI: u8 = 0x9f;
    pub const POS_FIXINT_HI: u8 = 0x7f;
}

/// Run a decode session over `buf`.
///
/// Constructs a fresh [`Unpacker`] borrowing `buf` and hands it to `f`. The
/// unpacker lives exactly as long as the call: it cannot escape the closure
/// and never outlives (or owns) the buffer. This is the only way to obtain
/// an unpacker.
///
/// # Errors
///
/// Returns whatever `f` returns. A decode error from any read operation
/// should be propagated out of `f` with `?`; partially decoded state is not
/// meaningful to resume.
pub fn unpack<T>(buf: &[u8], f: impl FnOnce(&mut Unpacker<'_>) -> Result<T>) -> Result<T> {
    let mut unpacker = Unpacker::new(buf);
    f(&mut unpacker)
}

/// Cursor-bounded streaming reader over one untrusted input buffer.
///
/// Created by [`unpack`] for the duration of a single decode session.
/// All reads consume input in order; the protocol layer above decides what
/// shape to expect next.
#[derive(Debug)]
pub struct Unpacker<'a> {
    cur: Cursor<'a>,
}

impl<'a> Unpacker<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { cur: Cursor::new(buf) }
    }

    /// Bytes of input not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cur.remaining()
    }

    /// Decode an array marker and return its element count.
    ///
    /// # Errors
    ///
    /// Fails if the next marker is not an array, or if the declared element
    /// count exceeds the remaining input. The format itself does not
    /// guarantee that an array's length is backed by data; enforcing it
    /// here stops a caller from later over-reading on the strength of a
    /// forged count.
    pub fn read_array(&mut self) -> Result<u32> {
        let count = self.read_array_marker()?;
        if count as usize > self.cur.remaining() {
            return Err(UnpackError::LengthExceedsInput {
                claimed: count,
                remaining: self.cur.remaining(),
            });
        }
        Ok(count)
    }

    /// Decode an array marker that must have exactly `expected` elements.
    ///
    /// Used where the protocol mandates a fixed-arity tuple. Succeeds
    /// exactly when [`read_array`](Self::read_array) would return
    /// `expected`, consuming the same bytes.
    pub fn read_array_fixed(&mut self, expected: u32) -> Result<()> {
        let actual = self.read_array_marker()?;
        if actual != expected {
            return Err(UnpackError::ArityMismatch { expected, actual });
        }
        if actual as usize > self.cur.remaining() {
            return Err(UnpackError::LengthExceedsInput {
                claimed: actual,
                remaining: self.cur.remaining(),
            });
        }
        Ok(())
    }

    /// Decode a boolean.
    pub fn read_bool(&mut self) -> Result<bool> {
        let found = self.cur.read_byte()?;
        match found {
            marker::FALSE => Ok(false),
            marker::TRUE => Ok(true),
            _ => Err(UnpackError::TypeMismatch { expected: "bool", found }),
        }
    }

    /// Decode a nil marker. Consumes the marker byte and nothing else.
    pub fn read_nil(&mut self) -> Result<()> {
        let found = self.cur.read_byte()?;
        if found == marker::NIL {
            Ok(())
        } else {
            Err(UnpackError::TypeMismatch { expected: "nil", found })
        }
    }

    /// Decode an unsigned 8-bit integer.
    ///
    /// The encoder writes integers at their minimal width, so this accepts
    /// both the positive-fixint and uint8 encodings. A wider marker fails
    /// with a type mismatch even when its value would fit.
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_uint("u8", 1).map(|v| v as u8)
    }

    /// Decode an unsigned 16-bit integer (accepts any narrower encoding).
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_uint("u16", 2).map(|v| v as u16)
    }

    /// Decode an unsigned 32-bit integer (accepts any narrower encoding).
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_uint("u32", 4).map(|v| v as u32)
    }

    /// Decode an unsigned 64-bit integer (accepts any narrower encoding).
    pub fn read_u64(&mut self) -> Result<u64> {
        self.read_uint("u64", 8)
    }

    /// Decode a byte-string into a freshly allocated buffer.
    ///
    /// The declared size is validated against the remaining input before
    /// any allocation happens, so a forged size prefix cannot trigger a
    /// huge allocation. Zero-length byte-strings are valid and yield an
    /// empty buffer. The returned [`Bytes`] is owned by the caller.
    pub fn read_bin(&mut self) -> Result<Bytes> {
        let size = self.read_bin_size()?;
        if size as usize > self.cur.remaining() {
            return Err(UnpackError::LengthExceedsInput {
                claimed: size,
                remaining: self.cur.remaining(),
            });
        }
        let mut data = vec![0u8; size as usize];
        self.cur.read_exact(&mut data)?;
        Ok(Bytes::from(data))
    }

    /// Decode a byte-string into a caller-supplied buffer.
    ///
    /// Fails without writing anything if the declared size exceeds
    /// `dest.len()`. On success returns the number of bytes written, which
    /// may be less than the buffer's capacity.
    pub fn read_bin_into(&mut self, dest: &mut [u8]) -> Result<usize> {
        let size = self.read_bin_size()?;
        if size as usize > dest.len() {
            return Err(UnpackError::SizeExceedsBound { claimed: size, max: dest.len() });
        }
        self.cur.read_exact(&mut dest[..size as usize])?;
        Ok(size as usize)
    }

    /// Decode a byte-string whose size must equal `dest.len()` exactly.
    ///
    /// Used for fixed-size protocol fields (keys, identifiers, tags) where
    /// any other length is a protocol violation.
    pub fn read_bin_fixed(&mut self, dest: &mut [u8]) -> Result<()> {
        let size = self.read_bin_size()?;
        if size as usize != dest.len() {
            return Err(UnpackError::SizeMismatch { expected: dest.len() as u32, actual: size });
        }
        self.cur.read_exact(dest)
    }

    /// Decode only a byte-string's size prefix.
    ///
    /// For callers that want to validate the size before consuming the
    /// payload; follow up with [`read_raw`](Self::read_raw) or
    /// [`skip`](Self::skip).
    pub fn read_bin_size(&mut self) -> Result<u32> {
        let found = self.cur.read_byte()?;
        let width = match found {
            marker::BIN8 => 1,
            marker::BIN16 => 2,
            marker::BIN32 => 4,
            _ => return Err(UnpackError::TypeMismatch { expected: "bin", found }),
        };
        Ok(self.read_be(width)? as u32)
    }

    /// Read `dest.len()` raw bytes with no marker.
    ///
    /// Some protocol fields are embedded as untagged big-endian byte runs
    /// inside a byte-string payload; this is the reader for those.
    pub fn read_raw(&mut self, dest: &mut [u8]) -> Result<()> {
        self.cur.read_exact(dest)
    }

    /// Discard `count` raw bytes without copying them.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.cur.skip(count)
    }

    /// Read one raw byte as a big-endian u8.
    ///
    /// The `_be` readers reconstruct integers from raw byte runs (no
    /// markers), for message types that encode fields as big-endian
    /// byte-strings rather than native wire integers. Both representations
    /// exist in the protocol, so both decode paths are kept distinct.
    pub fn read_u8_be(&mut self) -> Result<u8> {
        let mut byte = [0u8; 1];
        self.read_raw(&mut byte)?;
        Ok(byte[0])
    }

    /// Read two raw bytes as a big-endian u16.
    pub fn read_u16_be(&mut self) -> Result<u16> {
        let hi = self.read_u8_be()?;
        let lo = self.read_u8_be()?;
        Ok((u16::from(hi) << 8) | u16::from(lo))
    }

    /// Read four raw bytes as a big-endian u32.
    pub fn read_u32_be(&mut self) -> Result<u32> {
        let hi = self.read_u16_be()?;
        let lo = self.read_u16_be()?;
        Ok((u32::from(hi) << 16) | u32::from(lo))
    }

    /// Read eight raw bytes as a big-endian u64.
    pub fn read_u64_be(&mut self) -> Result<u64> {
        let hi = self.read_u32_be()?;
        let lo = self.read_u32_be()?;
        Ok((u64::from(hi) << 32) | u64::from(lo))
    }

    /// Decode an unsigned integer whose encoded width is at most
    /// `max_width` bytes. Positive fixints are always accepted.
    fn read_uint(&mut self, expected: &'static str, max_width: usize) -> Result<u64> {
        let found = self.cur.read_byte()?;
        if found <= marker::POS_FIXINT_HI {
            return Ok(u64::from(found));
        }
        let width = match found {
            marker::UINT8 => 1,
            marker::UINT16 => 2,
            marker::UINT32 => 4,
            marker::UINT64 => 8,
            _ => return Err(UnpackError::TypeMismatch { expected, found }),
        };
        if width > max_width {
            return Err(UnpackError::TypeMismatch { expected, found });
        }
        self.read_be(width)
    }

    fn read_array_marker(&mut self) -> Result<u32> {
        let found = self.cur.read_byte()?;
        match found {
            marker::FIXARRAY_LO..=marker::FIXARRAY_HI => Ok(u32::from(found & 0x0f)),
            marker::ARRAY16 => Ok(self.read_be(2)? as u32),
            marker::ARRAY32 => Ok(self.read_be(4)? as u32),
            _ => Err(UnpackError::TypeMismatch { expected: "array", found }),
        }
    }

    /// Read `width` big-endian bytes into the low end of a u64.
    fn read_be(&mut self, width: usize) -> Result<u64> {
        debug_assert!(width <= 8);
        let mut bytes = [0u8; 8];
        self.cur.read_exact(&mut bytes[8 - width..])?;
        Ok(u64::from_be_bytes(bytes))
    }
}
