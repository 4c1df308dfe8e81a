//! Listings are a bare concatenation of records with no count prefix: the
//! number of records is however many decode before the buffer runs out.
//! A trailing record that does not fit in the remaining bytes is dropped.

use tracing::debug;

use crate::codec::WireRecord;
use crate::errors::DecodeError;
use crate::response::{
    AccessTokenRecord, ClientRecord, ConsumerGroupRecord, StreamRecord, TopicRecord, UserRecord,
};

/// Listings larger than this have a reported decoding defect upstream.
pub const LARGE_LISTING_THRESHOLD: usize = 1 << 16;

pub fn decode_all<T: WireRecord>(buf: &[u8]) -> Result<Vec<T>, DecodeError> {
    decode_all_from(buf, 0)
}

/// Decodes records from `offset` until the buffer is exhausted.
pub fn decode_all_from<T: WireRecord>(buf: &[u8], offset: usize) -> Result<Vec<T>, DecodeError> {
    let mut records = Vec::new();
    let mut position = offset;

    while position < buf.len() {
        let (record, consumed) = match T::decode_at(buf, position) {
            Ok(decoded) => decoded,
            Err(e) if e.is_truncated() => {
                debug!(
                    "dropping partial trailing record at offset {} of {}: {}",
                    position,
                    buf.len(),
                    e
                );
                break;
            }
            Err(e) => return Err(e),
        };
        if consumed == 0 {
            return Err(DecodeError::NoProgress(position));
        }
        records.push(record);
        position += consumed;
    }

    Ok(records)
}

/// Stream listing. Kept as its own entry point so the large-listing
/// defect can be instrumented and patched in one place.
#[tracing::instrument(level = "trace", skip(buf), fields(len = buf.len()))]
pub fn decode_streams(buf: &[u8]) -> Result<Vec<StreamRecord>, DecodeError> {
    let streams = decode_all(buf)?;
    if buf.len() >= LARGE_LISTING_THRESHOLD {
        debug!(
            "large stream listing: {} bytes decoded into {} streams",
            buf.len(),
            streams.len()
        );
    }
    Ok(streams)
}

pub fn decode_topics(buf: &[u8]) -> Result<Vec<TopicRecord>, DecodeError> {
    decode_all(buf)
}

pub fn decode_consumer_groups(buf: &[u8]) -> Result<Vec<ConsumerGroupRecord>, DecodeError> {
    decode_all(buf)
}

/// Unlike other listings, an empty user listing is an error.
pub fn decode_users(buf: &[u8]) -> Result<Vec<UserRecord>, DecodeError> {
    if buf.is_empty() {
        return Err(DecodeError::EmptyPayload);
    }
    decode_all(buf)
}

pub fn decode_clients(buf: &[u8]) -> Result<Vec<ClientRecord>, DecodeError> {
    decode_all(buf)
}

pub fn decode_access_tokens(buf: &[u8]) -> Result<Vec<AccessTokenRecord>, DecodeError> {
    decode_all(buf)
}
