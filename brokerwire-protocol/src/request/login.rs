use bytes::{BufMut, Bytes, BytesMut};

use crate::codec::{put_long_string, put_short_string};

/*
[ username_len : u8  ] [ username ]
[ password_len : u8  ] [ password ]
[ version_len  : u32 ] [ version ]   0 when absent
[ context_len  : u32 ] [ context ]   0 when absent
*/
#[derive(Debug, Clone)]
pub struct LoginUserRequest {
    pub username: String,
    pub password: String,
    pub version: Option<String>,
    pub context: Option<String>,
}

impl LoginUserRequest {
    pub fn new(username: &str, password: &str) -> Self {
        LoginUserRequest {
            username: username.to_string(),
            password: password.to_string(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
            context: None,
        }
    }

    /// Username and password longer than 255 bytes are cut to 255 so the
    /// length prefix always matches what follows it.
    pub fn serialize(&self) -> Bytes {
        let mut buf = BytesMut::new();
        put_short_string(&mut buf, &self.username);
        put_short_string(&mut buf, &self.password);
        for optional in [&self.version, &self.context] {
            match optional {
                Some(value) => put_long_string(&mut buf, value),
                None => buf.put_u32_le(0),
            }
        }
        buf.freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_login() {
        let req = LoginUserRequest {
            username: "ops1".into(),
            password: "secret".into(),
            version: None,
            context: None,
        };
        let bytes = req.serialize();

        let expected_len = 1 + 4 + 1 + 6 + 4 + 4;
        assert_eq!(bytes.len(), expected_len);
        assert_eq!(bytes[0], 4);
        assert_eq!(&bytes[5..6], &[6]);
    }

    #[test]
    fn test_long_username_prefix_matches_bytes() {
        let req = LoginUserRequest {
            username: "u".repeat(300),
            password: "pw".into(),
            version: None,
            context: None,
        };
        let bytes = req.serialize();

        assert_eq!(bytes[0], 255);
        assert_eq!(bytes[256], 2);
        assert_eq!(&bytes[257..259], b"pw");
        assert_eq!(bytes.len(), 1 + 255 + 1 + 2 + 4 + 4);
    }

    #[test]
    fn test_version_is_length_prefixed() {
        let mut req = LoginUserRequest::new("a", "b");
        req.version = Some("1.2".into());
        let bytes = req.serialize();
        assert_eq!(&bytes[4..8], &3u32.to_le_bytes());
        assert_eq!(&bytes[8..11], b"1.2");
    }
}
