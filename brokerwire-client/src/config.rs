use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use brokerwire_protocol::MessageCompression;
use serde::{Deserialize, Serialize};

/// Connection settings for a single broker client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// `host:port` of the broker's TCP endpoint.
    pub address: String,

    /// Period of the background ping. `0` disables it.
    pub heartbeat_interval_ms: u64,

    /// How polled message payloads are decompressed.
    pub compression: MessageCompression,

    pub nodelay: bool,

    /// Largest response body, and largest decompressed message payload,
    /// the client will accept.
    pub max_response_bytes: usize,
}

pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 64 * 1024 * 1024;

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:8090".to_string(),
            heartbeat_interval_ms: 5_000,
            compression: MessageCompression::None,
            nodelay: true,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }
}

impl ClientConfig {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }

    pub fn heartbeat_interval(&self) -> Option<Duration> {
        (self.heartbeat_interval_ms > 0).then(|| Duration::from_millis(self.heartbeat_interval_ms))
    }

    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(p) => Self::read_from_file(p),
            None => Ok(Self::default()),
        }
    }

    fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("reading {:?}", path.as_ref()))?;
        let cfg: ClientConfig =
            toml::from_str(&raw).with_context(|| "parsing client config TOML")?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_when_no_file() {
        let cfg = ClientConfig::load_or_default(None::<&str>).unwrap();
        assert_eq!(cfg, ClientConfig::default());
        assert_eq!(cfg.heartbeat_interval(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "address = \"10.1.2.3:9000\"").unwrap();
        writeln!(file, "compression = \"gzip\"").unwrap();
        writeln!(file, "heartbeat_interval_ms = 0").unwrap();
        writeln!(file, "max_response_bytes = 4096").unwrap();

        let cfg = ClientConfig::load_or_default(Some(file.path())).unwrap();
        assert_eq!(cfg.address, "10.1.2.3:9000");
        assert_eq!(cfg.compression, MessageCompression::Gzip);
        assert_eq!(cfg.heartbeat_interval(), None);
        assert!(cfg.nodelay);
        assert_eq!(cfg.max_response_bytes, 4096);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClientConfig::load_or_default(Some(dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().contains("reading"));
    }
}
