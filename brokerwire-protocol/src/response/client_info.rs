/*
[ client_id             : u32 ]
[ user_id               : u32 ]
[ transport             : u8  ]  1 = tcp, 2 = quic
[ address_len           : u32 ]  note: four bytes, unlike every other string
[ address               : [u8] ]
[ consumer_groups_count : u32 ]

details only, consumer_groups_count times:
[ stream_id : i32 ] [ topic_id : i32 ] [ group_id : i32 ]
*/
use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

use crate::codec::{put_long_string, WireRecord};
use crate::cursor::WireCursor;
use crate::errors::DecodeError;

const CONSUMER_GROUP_INFO_SIZE: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transport {
    Tcp,
    Quic,
    Unknown,
}

impl From<u8> for Transport {
    fn from(value: u8) -> Self {
        match value {
            1 => Transport::Tcp,
            2 => Transport::Quic,
            _ => Transport::Unknown,
        }
    }
}

impl Transport {
    pub fn as_code(&self) -> u8 {
        match self {
            Transport::Tcp => 1,
            Transport::Quic => 2,
            Transport::Unknown => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub client_id: u32,
    pub user_id: u32,
    pub transport: Transport,
    pub address: String,
    pub consumer_groups_count: u32,
}

impl WireRecord for ClientRecord {
    fn read(cursor: &mut WireCursor<'_>) -> Result<Self, DecodeError> {
        Ok(ClientRecord {
            client_id: cursor.read_u32()?,
            user_id: cursor.read_u32()?,
            transport: cursor.read_u8()?.into(),
            address: cursor.read_long_string()?,
            consumer_groups_count: cursor.read_u32()?,
        })
    }

    fn write(&self, buf: &mut BytesMut) {
        buf.put_u32_le(self.client_id);
        buf.put_u32_le(self.user_id);
        buf.put_u8(self.transport.as_code());
        put_long_string(buf, &self.address);
        buf.put_u32_le(self.consumer_groups_count);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerGroupInfo {
    pub stream_id: i32,
    pub topic_id: i32,
    pub group_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDetails {
    #[serde(flatten)]
    pub client: ClientRecord,
    pub consumer_groups: Vec<ConsumerGroupInfo>,
}

impl ClientDetails {
    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let mut cursor = WireCursor::new(buf);
        let client = ClientRecord::read(&mut cursor)?;

        let count = client.consumer_groups_count as usize;
        let mut consumer_groups =
            Vec::with_capacity(count.min(cursor.remaining() / CONSUMER_GROUP_INFO_SIZE));
        for _ in 0..count {
            consumer_groups.push(ConsumerGroupInfo {
                stream_id: cursor.read_i32()?,
                topic_id: cursor.read_i32()?,
                group_id: cursor.read_i32()?,
            });
        }

        Ok(ClientDetails {
            client,
            consumer_groups,
        })
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::new();
        self.client.write(&mut buf);
        for group in &self.consumer_groups {
            buf.put_i32_le(group.stream_id);
            buf.put_i32_le(group.topic_id);
            buf.put_i32_le(group.group_id);
        }
        buf.freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(count: u32) -> ClientRecord {
        ClientRecord {
            client_id: 42,
            user_id: 1,
            transport: Transport::Tcp,
            address: "127.0.0.1:52114".into(),
            consumer_groups_count: count,
        }
    }

    #[test]
    fn test_address_uses_four_byte_prefix() {
        let bytes = client(0).encode();
        assert_eq!(&bytes[9..13], &(15u32).to_le_bytes());
        assert_eq!(bytes.len(), 4 + 4 + 1 + 4 + 15 + 4);
        let (parsed, consumed) = ClientRecord::decode_at(&bytes, 0).unwrap();
        assert_eq!(parsed, client(0));
        assert_eq!(consumed, bytes.len());
    }

    #[test]
    fn test_unknown_transport() {
        let mut bytes = client(0).encode().to_vec();
        bytes[8] = 7;
        let (parsed, _) = ClientRecord::decode_at(&bytes, 0).unwrap();
        assert_eq!(parsed.transport, Transport::Unknown);
    }

    #[test]
    fn test_client_details_reads_exactly_count_groups() {
        let details = ClientDetails {
            client: ClientRecord {
                transport: Transport::Quic,
                ..client(2)
            },
            consumer_groups: vec![
                ConsumerGroupInfo {
                    stream_id: 1,
                    topic_id: 2,
                    group_id: 3,
                },
                ConsumerGroupInfo {
                    stream_id: 1,
                    topic_id: 5,
                    group_id: -1,
                },
            ],
        };
        assert_eq!(ClientDetails::decode(&details.encode()).unwrap(), details);
    }

    #[test]
    fn test_client_details_with_missing_groups() {
        let bytes = client(3).encode();
        assert!(ClientDetails::decode(&bytes).unwrap_err().is_truncated());
    }
}
