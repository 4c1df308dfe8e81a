mod common;

use std::time::Duration;

use brokerwire_client::{ClientError, ClientState, Response, TcpClient};
use brokerwire_protocol::{
    CommandCode, CompressionAlgorithm, DecodeError, Identifier, IdentityInfo, Message,
    MessageBatch, MessageCompression, ProtocolError, ResponsePreamble, StreamDetails,
    StreamRecord, TopicRecord, WireRecord,
};
use bytes::{Bytes, BytesMut};
use common::{duplex_client, handler, quiet_config, spawn_broker, Reply};

fn stream(id: u32, name: &str) -> StreamRecord {
    StreamRecord {
        id,
        created_at: 1_700_000_000_000_000,
        topics_count: 0,
        size_bytes: 0,
        messages_count: 0,
        name: name.to_string(),
    }
}

#[tokio::test]
async fn test_connect_and_ping_over_tcp() {
    let addr = spawn_broker(handler(|frame| {
        assert_eq!(frame.command, CommandCode::Ping);
        assert!(frame.payload.is_empty());
        Reply::Ok(Bytes::new())
    }))
    .await;

    let client = TcpClient::connect(quiet_config(&addr.to_string())).await.unwrap();
    client.ping().await.unwrap();
    assert_eq!(client.state().await, ClientState::Connected);

    client.close().await.unwrap();
    assert_eq!(client.state().await, ClientState::Disconnected);
    assert!(matches!(client.ping().await, Err(ClientError::NotConnected)));
}

#[tokio::test]
async fn test_unresolvable_address() {
    let err = TcpClient::connect(quiet_config("not an address")).await;
    assert!(err.is_err());
}

#[tokio::test]
async fn test_stream_listing() {
    let client = duplex_client(
        handler(|frame| {
            assert_eq!(frame.command, CommandCode::GetStreams);
            let mut body = BytesMut::new();
            stream(1, "orders").write(&mut body);
            stream(2, "payments").write(&mut body);
            Reply::Ok(body.freeze())
        }),
        quiet_config("in-memory"),
    );

    let streams = client.get_streams().await.unwrap();
    let names: Vec<&str> = streams.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["orders", "payments"]);
}

#[tokio::test]
async fn test_empty_body_means_no_entity() {
    let client = duplex_client(handler(|_| Reply::Ok(Bytes::new())), quiet_config("in-memory"));

    assert_eq!(client.get_stream(&Identifier::from("missing")).await.unwrap(), None);
    assert_eq!(client.get_streams().await.unwrap(), vec![]);
    assert_eq!(client.get_me().await.unwrap(), None);
}

#[tokio::test]
async fn test_empty_user_listing_is_an_error() {
    let client = duplex_client(handler(|_| Reply::Ok(Bytes::new())), quiet_config("in-memory"));

    let err = client.get_users().await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Protocol(ProtocolError::Decode(DecodeError::EmptyPayload))
    ));
}

#[tokio::test]
async fn test_stream_details_request_carries_identifier() {
    let details = StreamDetails {
        stream: stream(3, "events"),
        topics: vec![TopicRecord {
            id: 1,
            created_at: 0,
            partitions_count: 2,
            message_expiry: Some(Duration::from_secs(60)),
            compression_algorithm: CompressionAlgorithm::None,
            max_topic_size: 0,
            replication_factor: 1,
            size_bytes: 0,
            messages_count: 0,
            name: "clicks".to_string(),
        }],
    };
    let encoded = details.encode();
    let client = duplex_client(
        handler(move |frame| {
            assert_eq!(frame.command, CommandCode::GetStream);
            assert_eq!(frame.payload, Identifier::Numeric(3).to_bytes());
            Reply::Ok(encoded.clone())
        }),
        quiet_config("in-memory"),
    );

    let fetched = client.get_stream(&Identifier::Numeric(3)).await.unwrap();
    assert_eq!(fetched, Some(details));
}

#[tokio::test]
async fn test_soft_error_keeps_preamble() {
    let client = duplex_client(
        handler(|frame| match frame.command {
            CommandCode::CreateStream => Reply::Status(1012),
            _ => Reply::Ok(Bytes::new()),
        }),
        quiet_config("in-memory"),
    );

    let response = client
        .send(CommandCode::CreateStream, Bytes::new())
        .await
        .unwrap();
    match response {
        Response::Soft { error, preamble } => {
            assert_eq!(error.code, 1012);
            assert_eq!(preamble, ResponsePreamble::error(1012).encode());
        }
        other => panic!("expected soft error, got {:?}", other),
    }

    // the connection is still in sync
    client.ping().await.unwrap();
}

#[tokio::test]
async fn test_hard_error_is_returned() {
    let client = duplex_client(
        handler(|frame| match frame.command {
            CommandCode::GetUsers => Reply::Status(40),
            _ => Reply::Ok(Bytes::new()),
        }),
        quiet_config("in-memory"),
    );

    match client.get_users().await {
        Err(ClientError::Server(e)) => {
            assert_eq!(e.code, 40);
            assert_eq!(e.name, "unauthenticated");
        }
        other => panic!("expected server error, got {:?}", other),
    }
    assert_eq!(client.state().await, ClientState::Connected);
    client.ping().await.unwrap();
}

#[tokio::test]
async fn test_hangup_disconnects() {
    let client = duplex_client(handler(|_| Reply::Hangup), quiet_config("in-memory"));

    assert!(matches!(client.ping().await, Err(ClientError::Transport(_))));
    assert_eq!(client.state().await, ClientState::Disconnected);
    assert!(matches!(client.ping().await, Err(ClientError::NotConnected)));
}

#[tokio::test(start_paused = true)]
async fn test_abandoned_request_does_not_leak_its_response() {
    let client = duplex_client(
        handler(|frame| Reply::Delayed(Duration::from_millis(200), frame.payload)),
        quiet_config("in-memory"),
    );

    let first = tokio::time::timeout(
        Duration::from_millis(20),
        client.send(CommandCode::Other(9000), Bytes::from_static(b"AA-first")),
    )
    .await;
    assert!(first.is_err());

    // the late reply to the first request must never answer the second
    let second = client
        .send(CommandCode::Other(9000), Bytes::from_static(b"BB-second"))
        .await;
    assert!(matches!(second, Err(ClientError::NotConnected)));
    assert_eq!(client.state().await, ClientState::Disconnected);
}

#[tokio::test]
async fn test_oversized_body_is_refused() {
    let mut config = quiet_config("in-memory");
    config.max_response_bytes = 16;
    let client = duplex_client(
        handler(|_| Reply::Ok(Bytes::from(vec![7u8; 64]))),
        config,
    );

    let err = client
        .send(CommandCode::Other(9000), Bytes::new())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::FrameTooLarge {
            length: 64,
            limit: 16
        }
    ));
    assert_eq!(client.state().await, ClientState::Disconnected);
}

#[tokio::test]
async fn test_concurrent_requests_get_their_own_responses() {
    let client = duplex_client(
        handler(|frame| Reply::Ok(frame.payload)),
        quiet_config("in-memory"),
    );

    let mut tasks = Vec::new();
    for i in 0u32..64 {
        let client = client.clone();
        tasks.push(tokio::spawn(async move {
            let payload = Bytes::from(format!("request-{i}-{}", "x".repeat(i as usize)));
            let response = client
                .send(CommandCode::Other(9000), payload.clone())
                .await
                .unwrap();
            assert_eq!(response, Response::Body(payload));
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }
}

#[tokio::test]
async fn test_login_sends_credentials() {
    let client = duplex_client(
        handler(|frame| {
            assert_eq!(frame.command, CommandCode::LoginUser);
            assert_eq!(&frame.payload[..6], b"\x05admin");
            Reply::Ok(IdentityInfo { user_id: 1 }.encode())
        }),
        quiet_config("in-memory"),
    );

    let identity = client.login_user("admin", "secret").await.unwrap();
    assert_eq!(identity.user_id, 1);
}

#[tokio::test]
async fn test_poll_decompresses_with_configured_codec() {
    let compression = MessageCompression::Gzip;
    let batch = MessageBatch {
        partition_id: 1,
        current_offset: 9,
        message_count: 2,
        messages: vec![
            Message::new(
                1,
                8,
                100,
                Bytes::from(compression.compress(b"first").unwrap()),
                None,
            ),
            Message::new(
                2,
                9,
                101,
                Bytes::from(compression.compress(b"second").unwrap()),
                Some(Bytes::from_static(b"hdr")),
            ),
        ],
    };
    let encoded = batch.encode();

    let mut config = quiet_config("in-memory");
    config.compression = compression;
    let client = duplex_client(handler(move |_| Reply::Ok(encoded.clone())), config);

    let polled = client.poll_messages(Bytes::new()).await.unwrap();
    assert_eq!(polled.current_offset, 9);
    assert_eq!(&polled.messages[0].payload[..], b"first");
    assert_eq!(&polled.messages[1].payload[..], b"second");
    assert_eq!(polled.messages[1].user_headers.as_deref(), Some(&b"hdr"[..]));
    assert!(polled.is_offset_ordered());
}
