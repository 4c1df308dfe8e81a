//! Records found in broker response payloads.
//!
//! Names, usernames and addresses are decoded lossily: bytes that are not
//! valid UTF-8 become U+FFFD, so such a name does not re-encode to the
//! bytes it was read from. Record boundaries are unaffected.

pub mod access_token;
pub mod client_info;
pub mod consumer_group;
pub mod identity;
pub mod partition;
pub mod permissions;
pub mod stream;
pub mod topic;
pub mod user;

pub use access_token::{AccessTokenRecord, RawAccessToken};
pub use client_info::{ClientDetails, ClientRecord, ConsumerGroupInfo, Transport};
pub use consumer_group::ConsumerGroupRecord;
pub use identity::{ConsumerOffsetInfo, IdentityInfo};
pub use partition::PartitionRecord;
pub use permissions::{GlobalPermissions, PermissionTree, StreamPermissions, TopicPermissions};
pub use stream::{StreamDetails, StreamRecord};
pub use topic::{CompressionAlgorithm, TopicDetails, TopicRecord};
pub use user::{UserDetails, UserRecord, UserStatus};
