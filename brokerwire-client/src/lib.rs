//! Async TCP client for the broker's binary protocol.

pub mod client;
pub mod config;
pub mod error;
mod heartbeat;

pub use client::{ClientState, Response, TcpClient};
pub use config::ClientConfig;
pub use error::ClientError;
