use std::sync::Weak;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::client::TcpClient;
use crate::error::ClientError;

/// Pings the broker every `interval` until `shutdown` fires, the client is
/// dropped, or the connection goes away. Ping failures are logged and
/// otherwise ignored.
pub(crate) fn spawn<S>(
    client: Weak<TcpClient<S>>,
    interval: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // first tick fires immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("Heartbeat cancelled.");
                    break;
                }

                _ = ticker.tick() => {
                    let Some(client) = client.upgrade() else {
                        break;
                    };
                    match client.ping().await {
                        Ok(()) => tracing::debug!("Heartbeat ping acknowledged."),
                        Err(ClientError::NotConnected) => {
                            tracing::info!("Connection gone, stopping heartbeat.");
                            break;
                        }
                        Err(e) => tracing::warn!("Heartbeat ping failed: {}", e),
                    }
                }
            }
        }
    })
}
