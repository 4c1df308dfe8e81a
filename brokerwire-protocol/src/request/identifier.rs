use std::fmt;
use std::str::FromStr;

use bytes::{BufMut, Bytes, BytesMut};

/// Stream, topic, user or consumer group reference: by number or by name.
///
/// Wire form: `[kind: u8][length: u8][value]`, kind 1 = numeric (u32 LE),
/// kind 2 = name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Numeric(u32),
    Named(String),
}

impl Identifier {
    pub fn write(&self, buf: &mut BytesMut) {
        match self {
            Identifier::Numeric(id) => {
                buf.put_u8(1);
                buf.put_u8(4);
                buf.put_u32_le(*id);
            }
            Identifier::Named(name) => {
                let bytes = &name.as_bytes()[..name.len().min(u8::MAX as usize)];
                buf.put_u8(2);
                buf.put_u8(bytes.len() as u8);
                buf.extend_from_slice(bytes);
            }
        }
    }

    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::new();
        self.write(&mut buf);
        buf.freeze()
    }

    /// Concatenates identifiers, e.g. stream then topic.
    pub fn path(parts: &[&Identifier]) -> Bytes {
        let mut buf = BytesMut::new();
        for part in parts {
            part.write(&mut buf);
        }
        buf.freeze()
    }
}

impl From<u32> for Identifier {
    fn from(id: u32) -> Self {
        Identifier::Numeric(id)
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Identifier::Named(name.to_string())
    }
}

impl FromStr for Identifier {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<u32>() {
            Ok(id) => Identifier::Numeric(id),
            Err(_) => Identifier::Named(s.to_string()),
        })
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(id) => write!(f, "{id}"),
            Identifier::Named(name) => f.write_str(name),
        }
    }
}
