//! Wire format of the broker's binary TCP protocol.
//!
//! Everything here is synchronous and allocation-light: responses are
//! decoded from borrowed byte slices through a bounds-checked cursor, and
//! malformed or truncated input surfaces as [`DecodeError`] instead of a
//! panic.

pub mod codec;
pub mod collection;
pub mod command;
pub mod compression;
pub mod cursor;
pub mod error_code;
pub mod errors;
pub mod frame;
pub mod message;
pub mod request;
pub mod response;

pub use codec::WireRecord;
pub use command::CommandCode;
pub use compression::MessageCompression;
pub use cursor::WireCursor;
pub use error_code::{is_soft_error, ServerError, SOFT_ERROR_CODES};
pub use errors::{CompressionError, DecodeError, ProtocolError};
pub use frame::{RequestFrame, ResponseOutcome, ResponsePreamble, RESPONSE_PREAMBLE_SIZE};
pub use message::{Message, MessageBatch, MessageHeader, MESSAGE_HEADER_SIZE};
pub use request::{Identifier, LoginUserRequest};

// Re-export common responses
pub use response::{
    AccessTokenRecord, ClientDetails, ClientRecord, CompressionAlgorithm, ConsumerGroupInfo,
    ConsumerGroupRecord, ConsumerOffsetInfo, GlobalPermissions, IdentityInfo, PartitionRecord,
    PermissionTree, RawAccessToken, StreamDetails, StreamPermissions, StreamRecord,
    TopicDetails, TopicPermissions, TopicRecord, Transport, UserDetails, UserRecord, UserStatus,
};
