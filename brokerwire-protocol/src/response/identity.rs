use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

use crate::cursor::WireCursor;
use crate::errors::DecodeError;

/// Reply to a successful login: the authenticated user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityInfo {
    pub user_id: u32,
}

impl IdentityInfo {
    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let mut cursor = WireCursor::new(buf);
        Ok(IdentityInfo {
            user_id: cursor.read_u32()?,
        })
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(4);
        buf.put_u32_le(self.user_id);
        buf.freeze()
    }
}

/// Stored consumer offset for one partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerOffsetInfo {
    pub partition_id: u32,
    pub current_offset: u64,
    pub stored_offset: u64,
}

impl ConsumerOffsetInfo {
    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let mut cursor = WireCursor::new(buf);
        Ok(ConsumerOffsetInfo {
            partition_id: cursor.read_u32()?,
            current_offset: cursor.read_u64()?,
            stored_offset: cursor.read_u64()?,
        })
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(20);
        buf.put_u32_le(self.partition_id);
        buf.put_u64_le(self.current_offset);
        buf.put_u64_le(self.stored_offset);
        buf.freeze()
    }
}
