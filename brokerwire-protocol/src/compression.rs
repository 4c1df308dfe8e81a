use std::fmt;
use std::io::Read;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CompressionError;

/// Client-side payload compression applied to polled messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageCompression {
    #[default]
    None,
    Gzip,
    Lz4,
}

impl MessageCompression {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, MessageCompression::None)
    }

    pub fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        self.decompress_limited(data, usize::MAX)
    }

    /// Fails with [`CompressionError::TooLarge`] instead of producing more
    /// than `limit` bytes.
    pub fn decompress_limited(&self, data: &[u8], limit: usize) -> Result<Vec<u8>, CompressionError> {
        let decompressed = match self {
            MessageCompression::None => data.to_vec(),
            MessageCompression::Gzip => {
                let decoder = flate2::read::GzDecoder::new(data);
                let mut decompressed = Vec::new();
                decoder
                    .take((limit as u64).saturating_add(1))
                    .read_to_end(&mut decompressed)?;
                decompressed
            }
            MessageCompression::Lz4 => {
                // the block starts with its decompressed size
                if let Some(prefix) = data.get(..4) {
                    let declared = u32::from_le_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]);
                    if declared as usize > limit {
                        return Err(CompressionError::TooLarge { limit });
                    }
                }
                lz4_flex::decompress_size_prepended(data)?
            }
        };
        if decompressed.len() > limit {
            return Err(CompressionError::TooLarge { limit });
        }
        Ok(decompressed)
    }

    pub fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        match self {
            MessageCompression::None => Ok(data.to_vec()),
            MessageCompression::Gzip => {
                let mut encoder = flate2::read::GzEncoder::new(data, flate2::Compression::default());
                let mut compressed = Vec::new();
                encoder.read_to_end(&mut compressed)?;
                Ok(compressed)
            }
            MessageCompression::Lz4 => Ok(lz4_flex::compress_prepend_size(data)),
        }
    }
}

impl FromStr for MessageCompression {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(MessageCompression::None),
            "gzip" => Ok(MessageCompression::Gzip),
            "lz4" => Ok(MessageCompression::Lz4),
            other => Err(format!(
                "unknown compression '{other}'. Supported: none, gzip, lz4"
            )),
        }
    }
}

impl fmt::Display for MessageCompression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MessageCompression::None => "none",
            MessageCompression::Gzip => "gzip",
            MessageCompression::Lz4 => "lz4",
        };
        f.write_str(name)
    }
}
