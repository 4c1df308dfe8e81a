use bytes::{BufMut, Bytes, BytesMut};

use crate::cursor::WireCursor;
use crate::errors::DecodeError;

/// A positional record in a broker response payload.
///
/// Records carry no count prefix of their own; listings are decoded by
/// calling [`WireRecord::decode_at`] repeatedly and advancing by the number
/// of bytes each record consumed (see [`crate::collection`]).
pub trait WireRecord: Sized {
    fn read(cursor: &mut WireCursor<'_>) -> Result<Self, DecodeError>;

    fn write(&self, buf: &mut BytesMut);

    /// Decodes one record at `offset`, returning it with the bytes consumed.
    fn decode_at(buf: &[u8], offset: usize) -> Result<(Self, usize), DecodeError> {
        if offset > buf.len() {
            return Err(DecodeError::Truncated {
                needed: offset - buf.len(),
                remaining: 0,
            });
        }
        let mut cursor = WireCursor::at(buf, offset);
        let record = Self::read(&mut cursor)?;
        Ok((record, cursor.position() - offset))
    }

    fn encode(&self) -> Bytes {
        let mut buf = BytesMut::new();
        self.write(&mut buf);
        buf.freeze()
    }
}

pub(crate) fn put_short_string(buf: &mut BytesMut, value: &str) {
    let bytes = &value.as_bytes()[..value.len().min(u8::MAX as usize)];
    buf.put_u8(bytes.len() as u8);
    buf.extend_from_slice(bytes);
}

pub(crate) fn put_long_string(buf: &mut BytesMut, value: &str) {
    buf.put_u32_le(value.len() as u32);
    buf.extend_from_slice(value.as_bytes());
}

pub(crate) fn put_flag(buf: &mut BytesMut, value: bool) {
    buf.put_u8(value as u8);
}
