//! Bounds-checked cursor over a borrowed input buffer.
//!
//! The cursor pairs the slice with its read offset in one type, so position
//! and remaining length can never desynchronize. It is read-only: the
//! encode side of the protocol has its own writer and never shares this
//! interface.

use crate::errors::{Result, UnpackError};

/// Read-only cursor over `buf[offset..]`.
///
/// Every read checks the remaining length first and consumes nothing on
/// failure, so a failed read never leaves a partially-copied destination.
#[derive(Debug)]
pub(crate) struct Cursor<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    /// Bytes not yet consumed.
    pub(crate) fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    /// Copy exactly `dest.len()` bytes into `dest`.
    pub(crate) fn read_exact(&mut self, dest: &mut [u8]) -> Result<()> {
        let n = dest.len();
        if n > self.remaining() {
            return Err(UnpackError::ShortBuffer { requested: n, remaining: self.remaining() });
        }
        dest.copy_from_slice(&self.buf[self.offset..self.offset + n]);
        self.offset += n;
        Ok(())
    }

    /// Consume and return a single byte.
    pub(crate) fn read_byte(&mut self) -> Result<u8> {
        if self.remaining() == 0 {
            return Err(UnpackError::ShortBuffer { requested: 1, remaining: 0 });
        }
        let b = self.buf[self.offset];
        self.offset += 1;
        Ok(b)
    }

    /// Advance past `count` bytes without copying them.
    pub(crate) fn skip(&mut self, count: usize) -> Result<()> {
        if count > self.remaining() {
            return Err(UnpackError::ShortBuffer { requested: count, remaining: self.remaining() });
        }
        self.offset += count;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_exact_consumes_in_order() {
        let mut cur = Cursor::new(&[1, 2, 3, 4]);
        let mut half = [0u8; 2];
        cur.read_exact(&mut half).unwrap();
        assert_eq!(half, [1, 2]);
        cur.read_exact(&mut half).unwrap();
        assert_eq!(half, [3, 4]);
        assert_eq!(cur.remaining(), 0);
    }

    #[test]
    fn short_read_consumes_nothing() {
        let mut cur = Cursor::new(&[1, 2]);
        let mut dest = [0u8; 3];
        let err = cur.read_exact(&mut dest).unwrap_err();
        assert_eq!(err, UnpackError::ShortBuffer { requested: 3, remaining: 2 });
        // Destination untouched, cursor unchanged.
        assert_eq!(dest, [0, 0, 0]);
        assert_eq!(cur.remaining(), 2);
    }

    #[test]
    fn skip_past_end_fails() {
        let mut cur = Cursor::new(&[0; 4]);
        cur.skip(4).unwrap();
        assert!(cur.skip(1).is_err());
    }

    #[test]
    fn empty_read_always_succeeds() {
        let mut cur = Cursor::new(&[]);
        cur.read_exact(&mut []).unwrap();
        assert_eq!(cur.remaining(), 0);
    }
}
