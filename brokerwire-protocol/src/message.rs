/*
poll response:
[ partition_id   : u32 ]
[ current_offset : u64 ]
[ messages_count : u32 ]
then, until the buffer runs out:
[ checksum            : u64  ]
[ id                  : u128 ]
[ offset              : u64  ]
[ timestamp           : u64  ]
[ origin_timestamp    : u64  ]
[ user_headers_length : u32  ]
[ payload_length      : u32  ]
[ payload bytes       : [u8] ]
[ user header bytes   : [u8] ]
*/
use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

use crate::compression::MessageCompression;
use crate::cursor::WireCursor;
use crate::errors::{DecodeError, ProtocolError};

pub const MESSAGE_HEADER_SIZE: usize = 56;
pub const BATCH_PREAMBLE_SIZE: usize = 16;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageHeader {
    pub checksum: u64,
    pub id: u128,
    pub offset: u64,
    pub timestamp: u64,
    pub origin_timestamp: u64,
    pub user_headers_length: u32,
    pub payload_length: u32,
}

impl MessageHeader {
    pub fn read(cursor: &mut WireCursor<'_>) -> Result<Self, DecodeError> {
        Ok(MessageHeader {
            checksum: cursor.read_u64()?,
            id: cursor.read_u128()?,
            offset: cursor.read_u64()?,
            timestamp: cursor.read_u64()?,
            origin_timestamp: cursor.read_u64()?,
            user_headers_length: cursor.read_u32()?,
            payload_length: cursor.read_u32()?,
        })
    }

    pub fn write(&self, buf: &mut BytesMut) {
        buf.put_u64_le(self.checksum);
        buf.put_u128_le(self.id);
        buf.put_u64_le(self.offset);
        buf.put_u64_le(self.timestamp);
        buf.put_u64_le(self.origin_timestamp);
        buf.put_u32_le(self.user_headers_length);
        buf.put_u32_le(self.payload_length);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub header: MessageHeader,
    pub payload: Bytes,
    pub user_headers: Option<Bytes>,
}

impl Message {
    /// Builds a message whose header lengths match its payload and headers.
    pub fn new(id: u128, offset: u64, timestamp: u64, payload: Bytes, user_headers: Option<Bytes>) -> Self {
        let header = MessageHeader {
            id,
            offset,
            timestamp,
            origin_timestamp: timestamp,
            user_headers_length: user_headers.as_ref().map(|h| h.len() as u32).unwrap_or(0),
            payload_length: payload.len() as u32,
            ..Default::default()
        };
        Message {
            header,
            payload,
            user_headers,
        }
    }

    /// Writes header, payload and user headers as they appear in a poll response.
    pub fn write(&self, buf: &mut BytesMut) {
        self.header.write(buf);
        buf.extend_from_slice(&self.payload);
        if let Some(user_headers) = &self.user_headers {
            buf.extend_from_slice(user_headers);
        }
    }
}

/// Result of a poll. Messages keep the order they arrived in; they are not
/// sorted by offset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBatch {
    pub partition_id: u32,
    pub current_offset: u64,
    pub message_count: u32,
    pub messages: Vec<Message>,
}

impl MessageBatch {
    pub fn decode(buf: Bytes, compression: MessageCompression) -> Result<Self, ProtocolError> {
        Self::decode_with_limit(buf, compression, usize::MAX)
    }

    /// Like [`MessageBatch::decode`], failing if any payload decompresses
    /// to more than `max_payload` bytes.
    pub fn decode_with_limit(
        buf: Bytes,
        compression: MessageCompression,
        max_payload: usize,
    ) -> Result<Self, ProtocolError> {
        if buf.is_empty() {
            return Ok(MessageBatch::default());
        }

        let mut cursor = WireCursor::new(&buf);
        let partition_id = cursor.read_u32()?;
        let current_offset = cursor.read_u64()?;
        let message_count = cursor.read_u32()?;

        let mut messages = Vec::new();
        while cursor.remaining() >= MESSAGE_HEADER_SIZE {
            let header = MessageHeader::read(&mut cursor)?;

            let start = cursor.position();
            let payload_end = start + header.payload_length as usize;
            if payload_end > buf.len() {
                break;
            }
            let headers_end = payload_end + header.user_headers_length as usize;
            if headers_end > buf.len() {
                break;
            }
            cursor.read_bytes(headers_end - start)?;

            let payload = buf.slice(start..payload_end);
            let user_headers = (header.user_headers_length > 0)
                .then(|| buf.slice(payload_end..headers_end));

            // A payload that fails to decompress poisons the whole batch.
            let payload = if compression.is_enabled() {
                Bytes::from(compression.decompress_limited(&payload, max_payload)?)
            } else {
                payload
            };

            messages.push(Message {
                header,
                payload,
                user_headers,
            });
        }

        Ok(MessageBatch {
            partition_id,
            current_offset,
            message_count,
            messages,
        })
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(BATCH_PREAMBLE_SIZE);
        buf.put_u32_le(self.partition_id);
        buf.put_u64_le(self.current_offset);
        buf.put_u32_le(self.message_count);
        for message in &self.messages {
            message.write(&mut buf);
        }
        buf.freeze()
    }

    pub fn is_offset_ordered(&self) -> bool {
        self.messages
            .windows(2)
            .all(|pair| pair[0].header.offset <= pair[1].header.offset)
    }
}
