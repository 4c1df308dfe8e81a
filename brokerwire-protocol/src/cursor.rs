use bytes::Buf;

use crate::errors::DecodeError;

/// Bounds-checked little-endian reader over a response payload.
#[derive(Debug, Clone)]
pub struct WireCursor<'a> {
    buf: &'a [u8],
    position: usize,
}

impl<'a> WireCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        WireCursor { buf, position: 0 }
    }

    pub fn at(buf: &'a [u8], position: usize) -> Self {
        WireCursor {
            buf,
            position: position.min(buf.len()),
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let remaining = self.remaining();
        if remaining < len {
            return Err(DecodeError::Truncated {
                needed: len,
                remaining,
            });
        }
        let head = &self.buf[self.position..self.position + len];
        self.position += len;
        Ok(head)
    }

    /// Everything left in the buffer.
    pub fn read_rest(&mut self) -> &'a [u8] {
        let rest = &self.buf[self.position..];
        self.position = self.buf.len();
        rest
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.read_bytes(1)?[0])
    }

    /// Flag bytes are true only when exactly 1.
    pub fn read_flag(&mut self) -> Result<bool, DecodeError> {
        Ok(self.read_u8()? == 1)
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        let mut b = self.read_bytes(4)?;
        Ok(b.get_u32_le())
    }

    pub fn read_i32(&mut self) -> Result<i32, DecodeError> {
        let mut b = self.read_bytes(4)?;
        Ok(b.get_i32_le())
    }

    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        let mut b = self.read_bytes(8)?;
        Ok(b.get_u64_le())
    }

    pub fn read_u128(&mut self) -> Result<u128, DecodeError> {
        let mut b = self.read_bytes(16)?;
        Ok(b.get_u128_le())
    }

    /// String with a one-byte length prefix. Invalid UTF-8 is replaced with
    /// U+FFFD; the full prefixed length is still consumed.
    pub fn read_short_string(&mut self) -> Result<String, DecodeError> {
        let len = self.read_u8()? as usize;
        self.read_string(len)
    }

    /// String with a four-byte length prefix.
    pub fn read_long_string(&mut self) -> Result<String, DecodeError> {
        let len = self.read_u32()? as usize;
        self.read_string(len)
    }

    fn read_string(&mut self, len: usize) -> Result<String, DecodeError> {
        let raw = self.read_bytes(len)?;
        Ok(String::from_utf8_lossy(raw).into_owned())
    }
}
