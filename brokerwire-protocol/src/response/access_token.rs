use bytes::{BufMut, BytesMut};
use serde::{Deserialize, Serialize};

use crate::codec::{put_short_string, WireRecord};
use crate::cursor::WireCursor;
use crate::errors::DecodeError;

/// Personal access token as listed by the broker: `[u8 len][name][u64 expiry]`.
///
/// The expiry is only present when at least eight bytes follow the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenRecord {
    pub name: String,
    /// Unix time in microseconds.
    pub expiry: Option<u64>,
}

impl WireRecord for AccessTokenRecord {
    fn read(cursor: &mut WireCursor<'_>) -> Result<Self, DecodeError> {
        let name = cursor.read_short_string()?;
        let expiry = if cursor.remaining() >= 8 {
            Some(cursor.read_u64()?)
        } else {
            cursor.read_rest();
            None
        };
        Ok(AccessTokenRecord { name, expiry })
    }

    fn write(&self, buf: &mut BytesMut) {
        put_short_string(buf, &self.name);
        if let Some(expiry) = self.expiry {
            buf.put_u64_le(expiry);
        }
    }
}

/// Token value handed out once, on creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAccessToken {
    pub token: String,
}

impl RawAccessToken {
    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let mut cursor = WireCursor::new(buf);
        Ok(RawAccessToken {
            token: cursor.read_short_string()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_with_expiry() {
        let token = AccessTokenRecord {
            name: "ci".into(),
            expiry: Some(1_800_000_000_000_000),
        };
        let bytes = token.encode();
        let (parsed, consumed) = AccessTokenRecord::decode_at(&bytes, 0).unwrap();
        assert_eq!(parsed, token);
        assert_eq!(consumed, 1 + 2 + 8);
    }

    #[test]
    fn test_short_tail_means_no_expiry() {
        let mut bytes = BytesMut::new();
        put_short_string(&mut bytes, "deploy");
        bytes.extend_from_slice(&[1, 2, 3]);
        let (parsed, consumed) = AccessTokenRecord::decode_at(&bytes, 0).unwrap();
        assert_eq!(parsed.name, "deploy");
        assert_eq!(parsed.expiry, None);
        assert_eq!(consumed, bytes.len());
    }

    #[test]
    fn test_raw_token() {
        let mut bytes = BytesMut::new();
        put_short_string(&mut bytes, "secret-value");
        assert_eq!(RawAccessToken::decode(&bytes).unwrap().token, "secret-value");
    }
}
