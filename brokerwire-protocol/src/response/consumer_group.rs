use bytes::{BufMut, BytesMut};
use serde::{Deserialize, Serialize};

use crate::codec::{put_short_string, WireRecord};
use crate::cursor::WireCursor;
use crate::errors::DecodeError;

/*
[ id               : u32 ]
[ partitions_count : u32 ]
[ members_count    : u32 ]
[ name_len         : u8  ]
[ name bytes       : [u8] ]
*/
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerGroupRecord {
    pub id: u32,
    pub partitions_count: u32,
    pub members_count: u32,
    pub name: String,
}

impl ConsumerGroupRecord {
    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        Ok(Self::decode_at(buf, 0)?.0)
    }
}

impl WireRecord for ConsumerGroupRecord {
    fn read(cursor: &mut WireCursor<'_>) -> Result<Self, DecodeError> {
        Ok(ConsumerGroupRecord {
            id: cursor.read_u32()?,
            partitions_count: cursor.read_u32()?,
            members_count: cursor.read_u32()?,
            name: cursor.read_short_string()?,
        })
    }

    fn write(&self, buf: &mut BytesMut) {
        buf.put_u32_le(self.id);
        buf.put_u32_le(self.partitions_count);
        buf.put_u32_le(self.members_count);
        put_short_string(buf, &self.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consumer_group_roundtrip() {
        let group = ConsumerGroupRecord {
            id: 1,
            partitions_count: 4,
            members_count: 2,
            name: "email-worker".into(),
        };
        let bytes = group.encode();
        assert_eq!(bytes.len(), 13 + "email-worker".len());
        assert_eq!(ConsumerGroupRecord::decode(&bytes).unwrap(), group);
    }
}
