use std::io;

use brokerwire_protocol::{CompressionError, DecodeError, ProtocolError, ServerError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("I/O error: {0}")]
    Transport(#[from] io::Error),

    #[error("Client is not connected")]
    NotConnected,

    #[error("Could not resolve address {0}")]
    AddressResolution(String),

    #[error("Server error: {0}")]
    Server(ServerError),

    #[error("Response body of {length} bytes exceeds the {limit} byte limit")]
    FrameTooLarge { length: usize, limit: usize },

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

impl ClientError {
    /// Transport failures and unread oversized bodies leave the connection
    /// unusable.
    pub fn is_fatal_to_connection(&self) -> bool {
        matches!(
            self,
            ClientError::Transport(_) | ClientError::FrameTooLarge { .. }
        )
    }
}

impl From<DecodeError> for ClientError {
    fn from(e: DecodeError) -> Self {
        ClientError::Protocol(ProtocolError::Decode(e))
    }
}

impl From<CompressionError> for ClientError {
    fn from(e: CompressionError) -> Self {
        ClientError::Protocol(ProtocolError::Compression(e))
    }
}

impl From<ServerError> for ClientError {
    fn from(e: ServerError) -> Self {
        ClientError::Server(e)
    }
}
