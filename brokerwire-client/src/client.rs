use std::sync::Arc;

use brokerwire_protocol::collection::{
    decode_access_tokens, decode_clients, decode_consumer_groups, decode_streams, decode_topics,
    decode_users,
};
use brokerwire_protocol::{
    AccessTokenRecord, ClientDetails, ClientRecord, CommandCode, ConsumerGroupRecord, DecodeError,
    Identifier, IdentityInfo, LoginUserRequest, MessageBatch, RequestFrame, ResponseOutcome,
    ResponsePreamble, ServerError, StreamDetails, StreamRecord, TopicDetails, TopicRecord,
    UserDetails, UserRecord, RESPONSE_PREAMBLE_SIZE,
};
use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::{lookup_host, TcpSocket, TcpStream};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::heartbeat;

/// Reply to a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Body(Bytes),
    /// The broker answered with a status the client tolerates. The raw
    /// preamble is kept for callers that want to inspect it.
    Soft {
        error: ServerError,
        preamble: [u8; RESPONSE_PREAMBLE_SIZE],
    },
}

impl Response {
    pub fn into_body(self) -> Result<Bytes, ClientError> {
        match self {
            Response::Body(body) => Ok(body),
            Response::Soft { error, .. } => Err(ClientError::Server(error)),
        }
    }

    pub fn soft_error(&self) -> Option<&ServerError> {
        match self {
            Response::Body(_) => None,
            Response::Soft { error, .. } => Some(error),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    Connected,
    Disconnected,
}

/// One broker connection. Every request, heartbeat pings included, holds
/// the connection lock for its whole write-then-read round trip.
pub struct TcpClient<S = TcpStream> {
    connection: Mutex<Option<S>>,
    config: ClientConfig,
    heartbeat: CancellationToken,
}

impl TcpClient<TcpStream> {
    pub async fn connect(config: ClientConfig) -> Result<Arc<Self>, ClientError> {
        Self::connect_with_cancellation(config, CancellationToken::new()).await
    }

    /// Like [`TcpClient::connect`]; cancelling `cancel` stops the heartbeat.
    pub async fn connect_with_cancellation(
        config: ClientConfig,
        cancel: CancellationToken,
    ) -> Result<Arc<Self>, ClientError> {
        let addr = lookup_host(config.address.as_str())
            .await?
            .next()
            .ok_or_else(|| ClientError::AddressResolution(config.address.clone()))?;

        let socket = if addr.is_ipv4() {
            TcpSocket::new_v4()?
        } else {
            TcpSocket::new_v6()?
        };
        // liveness is the heartbeat's job
        socket.set_keepalive(false)?;
        let stream = socket.connect(addr).await?;
        stream.set_nodelay(config.nodelay)?;

        info!("connected to broker at {}", addr);
        Ok(Self::with_stream(stream, config, cancel))
    }
}

impl<S> TcpClient<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    /// Wraps an already open transport. Must be called inside a tokio
    /// runtime when the heartbeat is enabled.
    pub fn with_stream(stream: S, config: ClientConfig, cancel: CancellationToken) -> Arc<Self> {
        let client = Arc::new(TcpClient {
            connection: Mutex::new(Some(stream)),
            config,
            heartbeat: cancel.child_token(),
        });

        if let Some(interval) = client.config.heartbeat_interval() {
            heartbeat::spawn(Arc::downgrade(&client), interval, client.heartbeat.clone());
        }
        client
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Cancelling this token stops the heartbeat before its next tick.
    pub fn heartbeat_token(&self) -> CancellationToken {
        self.heartbeat.clone()
    }

    pub async fn state(&self) -> ClientState {
        match self.connection.lock().await.as_ref() {
            Some(_) => ClientState::Connected,
            None => ClientState::Disconnected,
        }
    }

    /// Sends one command and waits for its response.
    ///
    /// The stream is taken out of the client for the whole exchange. If this
    /// future is dropped midway (a timeout, a losing `select!` branch) the
    /// stream goes with it and the client is left Disconnected, so no later
    /// call can read a response meant for this one.
    pub async fn send(&self, command: CommandCode, payload: Bytes) -> Result<Response, ClientError> {
        let mut connection = self.connection.lock().await;
        let mut stream = connection.take().ok_or(ClientError::NotConnected)?;

        let result = exchange(&mut stream, command, payload, self.config.max_response_bytes).await;
        match &result {
            Err(e) if e.is_fatal_to_connection() => {
                warn!("{} failed, dropping connection: {}", command, e);
            }
            _ => *connection = Some(stream),
        }
        result
    }

    pub async fn close(&self) -> Result<(), ClientError> {
        self.heartbeat.cancel();
        let stream = self.connection.lock().await.take();
        if let Some(mut stream) = stream {
            stream.shutdown().await?;
            info!("connection closed");
        }
        Ok(())
    }

    async fn fetch(&self, command: CommandCode, payload: Bytes) -> Result<Bytes, ClientError> {
        self.send(command, payload).await?.into_body()
    }

    pub async fn ping(&self) -> Result<(), ClientError> {
        self.fetch(CommandCode::Ping, Bytes::new()).await?;
        Ok(())
    }

    pub async fn login_user(&self, username: &str, password: &str) -> Result<IdentityInfo, ClientError> {
        let request = LoginUserRequest::new(username, password);
        let body = self.fetch(CommandCode::LoginUser, request.serialize()).await?;
        Ok(IdentityInfo::decode(&body)?)
    }

    pub async fn get_me(&self) -> Result<Option<ClientDetails>, ClientError> {
        let body = self.fetch(CommandCode::GetMe, Bytes::new()).await?;
        optional(&body, ClientDetails::decode)
    }

    pub async fn get_streams(&self) -> Result<Vec<StreamRecord>, ClientError> {
        let body = self.fetch(CommandCode::GetStreams, Bytes::new()).await?;
        Ok(decode_streams(&body)?)
    }

    pub async fn get_stream(&self, stream: &Identifier) -> Result<Option<StreamDetails>, ClientError> {
        let body = self.fetch(CommandCode::GetStream, stream.to_bytes()).await?;
        optional(&body, StreamDetails::decode)
    }

    pub async fn get_topics(&self, stream: &Identifier) -> Result<Vec<TopicRecord>, ClientError> {
        let body = self.fetch(CommandCode::GetTopics, stream.to_bytes()).await?;
        Ok(decode_topics(&body)?)
    }

    pub async fn get_topic(
        &self,
        stream: &Identifier,
        topic: &Identifier,
    ) -> Result<Option<TopicDetails>, ClientError> {
        let body = self
            .fetch(CommandCode::GetTopic, Identifier::path(&[stream, topic]))
            .await?;
        optional(&body, TopicDetails::decode)
    }

    pub async fn get_consumer_groups(
        &self,
        stream: &Identifier,
        topic: &Identifier,
    ) -> Result<Vec<ConsumerGroupRecord>, ClientError> {
        let body = self
            .fetch(CommandCode::GetConsumerGroups, Identifier::path(&[stream, topic]))
            .await?;
        Ok(decode_consumer_groups(&body)?)
    }

    pub async fn get_consumer_group(
        &self,
        stream: &Identifier,
        topic: &Identifier,
        group: &Identifier,
    ) -> Result<Option<ConsumerGroupRecord>, ClientError> {
        let body = self
            .fetch(CommandCode::GetConsumerGroup, Identifier::path(&[stream, topic, group]))
            .await?;
        optional(&body, ConsumerGroupRecord::decode)
    }

    pub async fn get_users(&self) -> Result<Vec<UserRecord>, ClientError> {
        let body = self.fetch(CommandCode::GetUsers, Bytes::new()).await?;
        Ok(decode_users(&body)?)
    }

    pub async fn get_user(&self, user: &Identifier) -> Result<Option<UserDetails>, ClientError> {
        let body = self.fetch(CommandCode::GetUser, user.to_bytes()).await?;
        optional(&body, UserDetails::decode)
    }

    pub async fn get_clients(&self) -> Result<Vec<ClientRecord>, ClientError> {
        let body = self.fetch(CommandCode::GetClients, Bytes::new()).await?;
        Ok(decode_clients(&body)?)
    }

    pub async fn get_client(&self, client_id: u32) -> Result<Option<ClientDetails>, ClientError> {
        let mut payload = BytesMut::with_capacity(4);
        payload.put_u32_le(client_id);
        let body = self.fetch(CommandCode::GetClient, payload.freeze()).await?;
        optional(&body, ClientDetails::decode)
    }

    pub async fn get_personal_access_tokens(&self) -> Result<Vec<AccessTokenRecord>, ClientError> {
        let body = self
            .fetch(CommandCode::GetPersonalAccessTokens, Bytes::new())
            .await?;
        Ok(decode_access_tokens(&body)?)
    }

    /// Polls with a caller-built payload and decodes the batch using the
    /// configured compression.
    pub async fn poll_messages(&self, payload: Bytes) -> Result<MessageBatch, ClientError> {
        let body = self.fetch(CommandCode::PollMessages, payload).await?;
        Ok(MessageBatch::decode_with_limit(
            body,
            self.config.compression,
            self.config.max_response_bytes,
        )?)
    }
}

impl<S> Drop for TcpClient<S> {
    fn drop(&mut self) {
        self.heartbeat.cancel();
    }
}

/// An empty body means the entity does not exist.
fn optional<T>(
    body: &[u8],
    decode: fn(&[u8]) -> Result<T, DecodeError>,
) -> Result<Option<T>, ClientError> {
    if body.is_empty() {
        return Ok(None);
    }
    Ok(Some(decode(body)?))
}

async fn exchange<S>(
    stream: &mut S,
    command: CommandCode,
    payload: Bytes,
    max_body: usize,
) -> Result<Response, ClientError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut buf = BytesMut::new();
    RequestFrame::new(command, payload).encode(&mut buf);
    trace!("sending {} ({} bytes)", command, buf.len());
    stream.write_all(&buf).await?;
    stream.flush().await?;

    let mut raw = [0u8; RESPONSE_PREAMBLE_SIZE];
    stream.read_exact(&mut raw).await?;
    let preamble = ResponsePreamble::decode(&raw)?;

    match preamble.outcome() {
        Ok(ResponseOutcome::Empty) => Ok(Response::Body(Bytes::new())),
        Ok(ResponseOutcome::Body(len)) => {
            if len > max_body {
                return Err(ClientError::FrameTooLarge {
                    length: len,
                    limit: max_body,
                });
            }
            let mut body = vec![0u8; len];
            stream.read_exact(&mut body).await?;
            trace!("{} returned {} bytes", command, len);
            Ok(Response::Body(Bytes::from(body)))
        }
        Ok(ResponseOutcome::Soft(error)) => {
            drain(stream, preamble.length).await?;
            debug!("{} returned tolerated status {}", command, error);
            Ok(Response::Soft { error, preamble: raw })
        }
        Err(error) => {
            drain(stream, preamble.length).await?;
            debug!("{} failed with {}", command, error);
            Err(ClientError::Server(error))
        }
    }
}

// Error responses normally carry no body; skip one if present so the next
// exchange starts on a frame boundary.
async fn drain<S>(stream: &mut S, length: u32) -> Result<(), ClientError>
where
    S: AsyncRead + Unpin,
{
    if length <= 1 {
        return Ok(());
    }
    let mut limited = (&mut *stream).take(length as u64);
    let skipped = tokio::io::copy(&mut limited, &mut tokio::io::sink()).await?;
    if skipped < length as u64 {
        return Err(ClientError::Transport(std::io::ErrorKind::UnexpectedEof.into()));
    }
    Ok(())
}
