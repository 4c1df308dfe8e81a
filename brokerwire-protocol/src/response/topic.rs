/*
[ id                    : u32 ]
[ created_at            : u64 ]
[ partitions_count      : u32 ]
[ message_expiry        : u64 ]  microseconds, 0 = never
[ compression_algorithm : u8  ]
[ max_topic_size        : u64 ]
[ replication_factor    : u8  ]
[ size_bytes            : u64 ]
[ messages_count        : u64 ]
[ name_len              : u8  ]
[ name bytes            : [u8] ]
*/
use std::time::Duration;

use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

use crate::codec::{put_short_string, WireRecord};
use crate::collection::decode_all_from;
use crate::cursor::WireCursor;
use crate::errors::DecodeError;
use crate::response::partition::PartitionRecord;

/// Server-side compression configured on a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompressionAlgorithm {
    None,
    Gzip,
    Unknown(u8),
}

impl From<u8> for CompressionAlgorithm {
    fn from(value: u8) -> Self {
        match value {
            1 => CompressionAlgorithm::None,
            2 => CompressionAlgorithm::Gzip,
            other => CompressionAlgorithm::Unknown(other),
        }
    }
}

impl CompressionAlgorithm {
    pub fn as_code(&self) -> u8 {
        match self {
            CompressionAlgorithm::None => 1,
            CompressionAlgorithm::Gzip => 2,
            CompressionAlgorithm::Unknown(code) => *code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRecord {
    pub id: u32,
    pub created_at: u64,
    pub partitions_count: u32,
    pub message_expiry: Option<Duration>,
    pub compression_algorithm: CompressionAlgorithm,
    pub max_topic_size: u64,
    pub replication_factor: u8,
    pub size_bytes: u64,
    pub messages_count: u64,
    pub name: String,
}

impl WireRecord for TopicRecord {
    fn read(cursor: &mut WireCursor<'_>) -> Result<Self, DecodeError> {
        let id = cursor.read_u32()?;
        let created_at = cursor.read_u64()?;
        let partitions_count = cursor.read_u32()?;
        let message_expiry = match cursor.read_u64()? {
            0 => None,
            micros => Some(Duration::from_micros(micros)),
        };
        Ok(TopicRecord {
            id,
            created_at,
            partitions_count,
            message_expiry,
            compression_algorithm: cursor.read_u8()?.into(),
            max_topic_size: cursor.read_u64()?,
            replication_factor: cursor.read_u8()?,
            size_bytes: cursor.read_u64()?,
            messages_count: cursor.read_u64()?,
            name: cursor.read_short_string()?,
        })
    }

    fn write(&self, buf: &mut BytesMut) {
        buf.put_u32_le(self.id);
        buf.put_u64_le(self.created_at);
        buf.put_u32_le(self.partitions_count);
        let expiry = self
            .message_expiry
            .map(|expiry| expiry.as_micros() as u64)
            .unwrap_or(0);
        buf.put_u64_le(expiry);
        buf.put_u8(self.compression_algorithm.as_code());
        buf.put_u64_le(self.max_topic_size);
        buf.put_u8(self.replication_factor);
        buf.put_u64_le(self.size_bytes);
        buf.put_u64_le(self.messages_count);
        put_short_string(buf, &self.name);
    }
}

/// A topic record followed by its partitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicDetails {
    #[serde(flatten)]
    pub topic: TopicRecord,
    pub partitions: Vec<PartitionRecord>,
}

impl TopicDetails {
    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let (topic, consumed) = TopicRecord::decode_at(buf, 0)?;
        let partitions = decode_all_from(buf, consumed)?;
        Ok(TopicDetails { topic, partitions })
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::new();
        self.topic.write(&mut buf);
        for partition in &self.partitions {
            partition.write(&mut buf);
        }
        buf.freeze()
    }
}
