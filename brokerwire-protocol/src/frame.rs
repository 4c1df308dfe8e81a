/*
request:
[ length       : u32 ]  = 4 + payload length
[ command_code : u32 ]
[ payload bytes... ]

response:
[ status : u32 ]
[ length : u32 ]
[ body bytes... ]  only when length > 1
*/

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::command::CommandCode;
use crate::cursor::WireCursor;
use crate::error_code::ServerError;
use crate::errors::DecodeError;

pub const REQUEST_LENGTH_SIZE: usize = 4;
pub const RESPONSE_PREAMBLE_SIZE: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFrame {
    pub command: CommandCode,
    pub payload: Bytes,
}

impl RequestFrame {
    pub fn new(command: CommandCode, payload: Bytes) -> Self {
        RequestFrame { command, payload }
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.reserve(REQUEST_LENGTH_SIZE + 4 + self.payload.len());
        buf.put_u32_le(self.payload.len() as u32 + 4);
        buf.put_u32_le(self.command.code());
        buf.extend_from_slice(&self.payload);
    }

    /// Splits one complete request off the front of `buf`, or returns
    /// `None` if more bytes are needed.
    pub fn decode(buf: &mut BytesMut) -> Result<Option<RequestFrame>, DecodeError> {
        if buf.len() < REQUEST_LENGTH_SIZE + 4 {
            return Ok(None);
        }

        let mut cursor = &buf[..];
        let length = cursor.get_u32_le() as usize;
        if length < 4 {
            return Err(DecodeError::Truncated {
                needed: 4,
                remaining: length,
            });
        }
        if cursor.remaining() < length {
            return Ok(None);
        }
        let command = CommandCode::from(cursor.get_u32_le());

        buf.advance(REQUEST_LENGTH_SIZE + 4);
        let payload = buf.split_to(length - 4).freeze();
        Ok(Some(RequestFrame { command, payload }))
    }
}

/// What a response preamble asks the reader to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// Success with no content.
    Empty,
    /// Success; read exactly this many body bytes.
    Body(usize),
    /// Non-zero status the client does not treat as fatal.
    Soft(ServerError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponsePreamble {
    pub status: u32,
    pub length: u32,
}

impl ResponsePreamble {
    pub fn ok(length: u32) -> Self {
        ResponsePreamble { status: 0, length }
    }

    pub fn error(status: u32) -> Self {
        ResponsePreamble { status, length: 0 }
    }

    pub fn encode(&self) -> [u8; RESPONSE_PREAMBLE_SIZE] {
        let mut raw = [0u8; RESPONSE_PREAMBLE_SIZE];
        raw[..4].copy_from_slice(&self.status.to_le_bytes());
        raw[4..].copy_from_slice(&self.length.to_le_bytes());
        raw
    }

    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let mut cursor = WireCursor::new(buf);
        Ok(ResponsePreamble {
            status: cursor.read_u32()?,
            length: cursor.read_u32()?,
        })
    }

    /// Hard errors come back as `Err`; soft ones as [`ResponseOutcome::Soft`].
    pub fn outcome(&self) -> Result<ResponseOutcome, ServerError> {
        if self.status != 0 {
            let error = ServerError::from_code(self.status);
            return if error.is_soft() {
                Ok(ResponseOutcome::Soft(error))
            } else {
                Err(error)
            };
        }
        if self.length <= 1 {
            return Ok(ResponseOutcome::Empty);
        }
        Ok(ResponseOutcome::Body(self.length as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_frame_layout() {
        let frame = RequestFrame::new(CommandCode::GetStreams, Bytes::from_static(b"abc"));
        let mut buf = BytesMut::new();
        frame.encode(&mut buf);

        assert_eq!(&buf[..4], &7u32.to_le_bytes());
        assert_eq!(&buf[4..8], &201u32.to_le_bytes());
        assert_eq!(&buf[8..], b"abc");
    }

    #[test]
    fn test_request_frame_decode_waits_for_full_frame() {
        let frame = RequestFrame::new(CommandCode::Ping, Bytes::from_static(b"xyz"));
        let mut encoded = BytesMut::new();
        frame.encode(&mut encoded);
        frame.encode(&mut encoded);

        let mut partial = BytesMut::from(&encoded[..9]);
        assert_eq!(RequestFrame::decode(&mut partial).unwrap(), None);

        assert_eq!(RequestFrame::decode(&mut encoded).unwrap(), Some(frame.clone()));
        assert_eq!(RequestFrame::decode(&mut encoded).unwrap(), Some(frame));
        assert!(encoded.is_empty());
    }

    #[test]
    fn test_empty_ok_response() {
        let preamble = ResponsePreamble::decode(&ResponsePreamble::ok(0).encode()).unwrap();
        assert_eq!(preamble.outcome().unwrap(), ResponseOutcome::Empty);
        assert_eq!(ResponsePreamble::ok(1).outcome().unwrap(), ResponseOutcome::Empty);
        assert_eq!(ResponsePreamble::ok(2).outcome().unwrap(), ResponseOutcome::Body(2));
    }

    #[test]
    fn test_soft_error_code() {
        let raw = ResponsePreamble::error(1012).encode();
        let outcome = ResponsePreamble::decode(&raw).unwrap().outcome().unwrap();
        assert_eq!(outcome, ResponseOutcome::Soft(ServerError::from_code(1012)));
    }

    #[test]
    fn test_hard_error_code() {
        let err = ResponsePreamble::error(40).outcome().unwrap_err();
        assert_eq!(err.code, 40);
        assert_eq!(err.name, "unauthenticated");
    }

    #[test]
    fn test_short_preamble() {
        assert!(ResponsePreamble::decode(&[0, 0, 0, 0, 1]).unwrap_err().is_truncated());
    }
}
