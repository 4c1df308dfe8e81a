//! Nested permission block attached to a user record.
//!
//! ```text
//! [ global flags : 10 x u8 ]
//! [ has_streams  : u8 ]
//!   ( [ stream_id : u32 ] [ stream flags : 6 x u8 ]
//!     [ has_topics : u8 ]
//!       ( [ topic_id : u32 ] [ topic flags : 4 x u8 ] [ more_topics : u8 ] )*
//!     [ more_streams : u8 ] )*
//! ```
//!
//! Lists carry no element count: a gate byte of 1 opens the list and each
//! entry is followed by a continuation byte, 0 closing the list.

use std::collections::BTreeMap;

use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

use crate::codec::put_flag;
use crate::cursor::WireCursor;
use crate::errors::DecodeError;

/// Streams are level 1, topics level 2.
pub const MAX_PERMISSION_DEPTH: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalPermissions {
    pub manage_servers: bool,
    pub read_servers: bool,
    pub manage_users: bool,
    pub read_users: bool,
    pub manage_streams: bool,
    pub read_streams: bool,
    pub manage_topics: bool,
    pub read_topics: bool,
    pub poll_messages: bool,
    pub send_messages: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamPermissions {
    pub manage_stream: bool,
    pub read_stream: bool,
    pub manage_topics: bool,
    pub read_topics: bool,
    pub poll_messages: bool,
    pub send_messages: bool,
    pub topics: BTreeMap<u32, TopicPermissions>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicPermissions {
    pub manage_topic: bool,
    pub read_topic: bool,
    pub poll_messages: bool,
    pub send_messages: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionTree {
    pub global: GlobalPermissions,
    pub streams: BTreeMap<u32, StreamPermissions>,
}

impl PermissionTree {
    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let mut cursor = WireCursor::new(buf);
        Self::read(&mut cursor)
    }

    pub fn read(cursor: &mut WireCursor<'_>) -> Result<Self, DecodeError> {
        let global = GlobalPermissions {
            manage_servers: cursor.read_flag()?,
            read_servers: cursor.read_flag()?,
            manage_users: cursor.read_flag()?,
            read_users: cursor.read_flag()?,
            manage_streams: cursor.read_flag()?,
            read_streams: cursor.read_flag()?,
            manage_topics: cursor.read_flag()?,
            read_topics: cursor.read_flag()?,
            poll_messages: cursor.read_flag()?,
            send_messages: cursor.read_flag()?,
        };
        let streams = read_entries(cursor, 1, read_stream)?;
        Ok(PermissionTree { global, streams })
    }

    pub fn write(&self, buf: &mut BytesMut) {
        let g = &self.global;
        for flag in [
            g.manage_servers,
            g.read_servers,
            g.manage_users,
            g.read_users,
            g.manage_streams,
            g.read_streams,
            g.manage_topics,
            g.read_topics,
            g.poll_messages,
            g.send_messages,
        ] {
            put_flag(buf, flag);
        }
        write_entries(buf, &self.streams, write_stream);
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::new();
        self.write(&mut buf);
        buf.freeze()
    }
}

fn read_entries<T>(
    cursor: &mut WireCursor<'_>,
    depth: usize,
    read_entry: fn(&mut WireCursor<'_>, usize) -> Result<(u32, T), DecodeError>,
) -> Result<BTreeMap<u32, T>, DecodeError> {
    if depth > MAX_PERMISSION_DEPTH {
        return Err(DecodeError::PermissionDepthExceeded(MAX_PERMISSION_DEPTH));
    }

    let mut entries = BTreeMap::new();
    if !cursor.read_flag()? {
        return Ok(entries);
    }
    loop {
        let (id, entry) = read_entry(cursor, depth)?;
        entries.insert(id, entry);
        if cursor.read_u8()? == 0 {
            break;
        }
    }
    Ok(entries)
}

fn read_stream(
    cursor: &mut WireCursor<'_>,
    depth: usize,
) -> Result<(u32, StreamPermissions), DecodeError> {
    let stream_id = cursor.read_u32()?;
    let manage_stream = cursor.read_flag()?;
    let read_stream = cursor.read_flag()?;
    let manage_topics = cursor.read_flag()?;
    let read_topics = cursor.read_flag()?;
    let poll_messages = cursor.read_flag()?;
    let send_messages = cursor.read_flag()?;
    let topics = read_entries(cursor, depth + 1, read_topic)?;
    Ok((
        stream_id,
        StreamPermissions {
            manage_stream,
            read_stream,
            manage_topics,
            read_topics,
            poll_messages,
            send_messages,
            topics,
        },
    ))
}

fn read_topic(
    cursor: &mut WireCursor<'_>,
    _depth: usize,
) -> Result<(u32, TopicPermissions), DecodeError> {
    let topic_id = cursor.read_u32()?;
    Ok((
        topic_id,
        TopicPermissions {
            manage_topic: cursor.read_flag()?,
            read_topic: cursor.read_flag()?,
            poll_messages: cursor.read_flag()?,
            send_messages: cursor.read_flag()?,
        },
    ))
}

fn write_entries<T>(buf: &mut BytesMut, entries: &BTreeMap<u32, T>, write_entry: fn(&mut BytesMut, &T)) {
    if entries.is_empty() {
        put_flag(buf, false);
        return;
    }
    put_flag(buf, true);
    let last = entries.len() - 1;
    for (index, (id, entry)) in entries.iter().enumerate() {
        buf.put_u32_le(*id);
        write_entry(buf, entry);
        put_flag(buf, index != last);
    }
}

fn write_stream(buf: &mut BytesMut, stream: &StreamPermissions) {
    for flag in [
        stream.manage_stream,
        stream.read_stream,
        stream.manage_topics,
        stream.read_topics,
        stream.poll_messages,
        stream.send_messages,
    ] {
        put_flag(buf, flag);
    }
    write_entries(buf, &stream.topics, write_topic);
}

fn write_topic(buf: &mut BytesMut, topic: &TopicPermissions) {
    for flag in [
        topic.manage_topic,
        topic.read_topic,
        topic.poll_messages,
        topic.send_messages,
    ] {
        put_flag(buf, flag);
    }
}
