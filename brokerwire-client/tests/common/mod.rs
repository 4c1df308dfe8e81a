#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use brokerwire_client::{ClientConfig, TcpClient};
use brokerwire_protocol::{RequestFrame, ResponsePreamble};
use bytes::{Bytes, BytesMut};
use tokio::io::{duplex, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, DuplexStream};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// What the mock broker does with one request.
pub enum Reply {
    Ok(Bytes),
    Status(u32),
    /// Answer with a body after sleeping.
    Delayed(Duration, Bytes),
    /// Close the connection without answering.
    Hangup,
}

pub type Handler = Arc<dyn Fn(RequestFrame) -> Reply + Send + Sync>;

pub fn handler<F>(f: F) -> Handler
where
    F: Fn(RequestFrame) -> Reply + Send + Sync + 'static,
{
    Arc::new(f)
}

pub fn quiet_config(address: &str) -> ClientConfig {
    ClientConfig {
        address: address.to_string(),
        heartbeat_interval_ms: 0,
        ..ClientConfig::default()
    }
}

/// Serves requests on one connection until the peer goes away.
pub async fn serve<S>(mut stream: S, handler: Handler) -> anyhow::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut buf = BytesMut::with_capacity(1024);
    loop {
        buf.reserve(1024);
        if stream.read_buf(&mut buf).await? == 0 {
            return Ok(());
        }

        while let Some(frame) = RequestFrame::decode(&mut buf)? {
            match handler(frame) {
                Reply::Ok(body) => {
                    stream.write_all(&ResponsePreamble::ok(body.len() as u32).encode()).await?;
                    stream.write_all(&body).await?;
                }
                Reply::Delayed(delay, body) => {
                    tokio::time::sleep(delay).await;
                    stream.write_all(&ResponsePreamble::ok(body.len() as u32).encode()).await?;
                    stream.write_all(&body).await?;
                }
                Reply::Status(code) => {
                    stream.write_all(&ResponsePreamble::error(code).encode()).await?;
                }
                Reply::Hangup => return Ok(()),
            }
            stream.flush().await?;
        }
    }
}

/// Binds a broker on an ephemeral localhost port.
pub async fn spawn_broker(handler: Handler) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let (socket, _) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(_) => return,
            };
            let handler = handler.clone();
            tokio::spawn(async move {
                if let Err(e) = serve(socket, handler).await {
                    eprintln!("mock broker connection error: {:?}", e);
                }
            });
        }
    });
    addr
}

/// Client wired to an in-memory broker.
pub fn duplex_client(handler: Handler, config: ClientConfig) -> Arc<TcpClient<DuplexStream>> {
    let (client_side, broker_side) = duplex(64 * 1024);
    tokio::spawn(async move {
        let _ = serve(broker_side, handler).await;
    });
    TcpClient::with_stream(client_side, config, CancellationToken::new())
}
