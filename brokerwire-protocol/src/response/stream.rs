/*
[ id             : u32 ]
[ created_at     : u64 ]
[ topics_count   : u32 ]
[ size_bytes     : u64 ]
[ messages_count : u64 ]
[ name_len       : u8  ]
[ name bytes     : [u8] ]
*/
use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

use crate::codec::{put_short_string, WireRecord};
use crate::collection::decode_all_from;
use crate::cursor::WireCursor;
use crate::errors::DecodeError;
use crate::response::topic::TopicRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamRecord {
    pub id: u32,
    pub created_at: u64,
    pub topics_count: u32,
    pub size_bytes: u64,
    pub messages_count: u64,
    pub name: String,
}

impl WireRecord for StreamRecord {
    fn read(cursor: &mut WireCursor<'_>) -> Result<Self, DecodeError> {
        Ok(StreamRecord {
            id: cursor.read_u32()?,
            created_at: cursor.read_u64()?,
            topics_count: cursor.read_u32()?,
            size_bytes: cursor.read_u64()?,
            messages_count: cursor.read_u64()?,
            name: cursor.read_short_string()?,
        })
    }

    fn write(&self, buf: &mut BytesMut) {
        buf.put_u32_le(self.id);
        buf.put_u64_le(self.created_at);
        buf.put_u32_le(self.topics_count);
        buf.put_u64_le(self.size_bytes);
        buf.put_u64_le(self.messages_count);
        put_short_string(buf, &self.name);
    }
}

/// A stream record followed by every topic it contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamDetails {
    #[serde(flatten)]
    pub stream: StreamRecord,
    pub topics: Vec<TopicRecord>,
}

impl StreamDetails {
    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let (stream, consumed) = StreamRecord::decode_at(buf, 0)?;
        let topics = decode_all_from(buf, consumed)?;
        Ok(StreamDetails { stream, topics })
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::new();
        self.stream.write(&mut buf);
        for topic in &self.topics {
            topic.write(&mut buf);
        }
        buf.freeze()
    }
}
