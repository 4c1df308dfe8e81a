/*
[ id             : u32 ]
[ created_at     : u64 ]
[ segments_count : u32 ]
[ current_offset : u64 ]
[ size_bytes     : u64 ]
[ messages_count : u64 ]
*/
use bytes::{BufMut, BytesMut};
use serde::{Deserialize, Serialize};

use crate::codec::WireRecord;
use crate::cursor::WireCursor;
use crate::errors::DecodeError;

pub const PARTITION_RECORD_SIZE: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionRecord {
    pub id: u32,
    pub created_at: u64,
    pub segments_count: u32,
    pub current_offset: u64,
    pub size_bytes: u64,
    pub messages_count: u64,
}

impl WireRecord for PartitionRecord {
    fn read(cursor: &mut WireCursor<'_>) -> Result<Self, DecodeError> {
        Ok(PartitionRecord {
            id: cursor.read_u32()?,
            created_at: cursor.read_u64()?,
            segments_count: cursor.read_u32()?,
            current_offset: cursor.read_u64()?,
            size_bytes: cursor.read_u64()?,
            messages_count: cursor.read_u64()?,
        })
    }

    fn write(&self, buf: &mut BytesMut) {
        buf.put_u32_le(self.id);
        buf.put_u64_le(self.created_at);
        buf.put_u32_le(self.segments_count);
        buf.put_u64_le(self.current_offset);
        buf.put_u64_le(self.size_bytes);
        buf.put_u64_le(self.messages_count);
    }
}
