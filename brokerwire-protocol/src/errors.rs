use thiserror::Error;

use crate::error_code::ServerError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Truncated input: needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    #[error("Invalid user status: {0}")]
    InvalidUserStatus(u8),

    #[error("Permission tree nested deeper than {0} levels")]
    PermissionDepthExceeded(usize),

    #[error("Record decoder consumed no bytes at offset {0}")]
    NoProgress(usize),

    #[error("Empty payload")]
    EmptyPayload,
}

impl DecodeError {
    pub fn is_truncated(&self) -> bool {
        matches!(self, DecodeError::Truncated { .. })
    }
}

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("gzip decompress: {0}")]
    Gzip(#[from] std::io::Error),

    #[error("lz4 decompress: {0}")]
    Lz4(#[from] lz4_flex::block::DecompressError),

    #[error("decompressed payload exceeds {limit} bytes")]
    TooLarge { limit: usize },
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Payload decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Message batch decompression failed: {0}")]
    Compression(#[from] CompressionError),

    #[error("Server error: {0}")]
    Server(#[from] ServerError),
}
