/*
[ id           : u32 ]
[ created_at   : u64 ]
[ status       : u8  ]  1 = active, 2 = inactive
[ username_len : u8  ]
[ username     : [u8] ]

details only:
[ has_permissions : u8 ]
[ permissions_len : u32 ]   when has_permissions == 1
[ permissions     : [u8] ]
*/
use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

use crate::codec::{put_flag, put_short_string, WireRecord};
use crate::cursor::WireCursor;
use crate::errors::DecodeError;
use crate::response::permissions::PermissionTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserStatus {
    Active,
    Inactive,
}

impl TryFrom<u8> for UserStatus {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, DecodeError> {
        match value {
            1 => Ok(UserStatus::Active),
            2 => Ok(UserStatus::Inactive),
            _ => Err(DecodeError::InvalidUserStatus(value)),
        }
    }
}

impl UserStatus {
    pub fn as_code(&self) -> u8 {
        match self {
            UserStatus::Active => 1,
            UserStatus::Inactive => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: u32,
    pub created_at: u64,
    pub status: UserStatus,
    pub username: String,
}

impl WireRecord for UserRecord {
    fn read(cursor: &mut WireCursor<'_>) -> Result<Self, DecodeError> {
        Ok(UserRecord {
            id: cursor.read_u32()?,
            created_at: cursor.read_u64()?,
            status: UserStatus::try_from(cursor.read_u8()?)?,
            username: cursor.read_short_string()?,
        })
    }

    fn write(&self, buf: &mut BytesMut) {
        buf.put_u32_le(self.id);
        buf.put_u64_le(self.created_at);
        buf.put_u8(self.status.as_code());
        put_short_string(buf, &self.username);
    }
}

/// A single user as returned by a user lookup, with its permission tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetails {
    #[serde(flatten)]
    pub user: UserRecord,
    pub permissions: Option<PermissionTree>,
}

impl UserDetails {
    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let mut cursor = WireCursor::new(buf);
        let user = UserRecord::read(&mut cursor)?;
        let permissions = if cursor.read_flag()? {
            let len = cursor.read_u32()? as usize;
            let block = cursor.read_bytes(len)?;
            Some(PermissionTree::decode(block)?)
        } else {
            None
        };
        Ok(UserDetails { user, permissions })
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::new();
        self.user.write(&mut buf);
        match &self.permissions {
            Some(permissions) => {
                let block = permissions.encode();
                put_flag(&mut buf, true);
                buf.put_u32_le(block.len() as u32);
                buf.extend_from_slice(&block);
            }
            None => put_flag(&mut buf, false),
        }
        buf.freeze()
    }
}
