//! Integration tests for the WebSocket transport.
//!
//! These tests run a real WebSocket server on loopback and drive the
//! transport together with the Sans-IO client.
#![cfg(feature = "transport")]

use std::time::{Duration, Instant};

use futures::{SinkExt, StreamExt};
use hitfeed_client::{
    Origin, StreamAction, StreamClient, StreamEvent, StreamState,
    transport::{self, ConnectedClient, TransportConfig},
};
use tokio::{net::TcpListener, time::timeout};
use tokio_tungstenite::{
    accept_async,
    tungstenite::{
        Message,
        protocol::{CloseFrame, frame::coding::CloseCode},
    },
};

const SUBSCRIBE_ALL: &str = r#"{"name":"subscribe","payload":"all"}"#;

/// Bind a loopback listener and return it with its origin.
async fn listen() -> (TcpListener, Origin) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let origin = Origin::parse(&format!("http://{addr}")).unwrap();
    (listener, origin)
}

/// Wait for the next event from the server side of the transport.
async fn next_event(client: &mut ConnectedClient) -> StreamEvent {
    timeout(Duration::from_secs(5), client.from_server.recv())
        .await
        .expect("timed out waiting for event")
        .expect("transport channel closed")
}

/// Start a connection and wait for its handshake to finish.
async fn open(url: &str) -> ConnectedClient {
    let mut client = transport::connect(url);
    assert_eq!(next_event(&mut client).await, StreamEvent::Opened);
    client
}

#[tokio::test]
async fn connect_fails_without_server() {
    let (listener, origin) = listen().await;
    drop(listener);

    let config = TransportConfig { connect_timeout: Duration::from_millis(500), ..Default::default() };
    let mut client = transport::connect_with_config(&origin.stream_url(), &config);

    assert!(matches!(next_event(&mut client).await, StreamEvent::Closed { .. }));
}

#[tokio::test]
async fn silent_server_does_not_block_connect() {
    let (listener, origin) = listen().await;

    // Accept TCP, never answer the WebSocket handshake.
    let server = tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
        drop(tcp);
    });

    let config = TransportConfig { connect_timeout: Duration::from_millis(300), ..Default::default() };
    let started = Instant::now();
    let mut client = transport::connect_with_config(&origin.stream_url(), &config);
    assert!(started.elapsed() < Duration::from_millis(100), "connect must not wait for the handshake");

    assert_eq!(client.try_recv(), None);
    match next_event(&mut client).await {
        StreamEvent::Closed { reason } => assert!(reason.contains("timed out"), "unexpected reason: {reason}"),
        other => panic!("expected close, got {other:?}"),
    }
    server.abort();
}

#[tokio::test]
async fn frames_flow_both_ways() {
    let (listener, origin) = listen().await;

    let server = tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.unwrap();
        let mut socket = accept_async(tcp).await.unwrap();

        let request = socket.next().await.unwrap().unwrap();
        socket.send(Message::Text("echo".into())).await.unwrap();
        request.into_text().unwrap().to_string()
    });

    let mut client = open(&origin.stream_url()).await;
    client.to_server.send("hello server".to_string()).await.unwrap();

    assert_eq!(next_event(&mut client).await, StreamEvent::FrameReceived("echo".to_string()));
    assert_eq!(server.await.unwrap(), "hello server");
}

#[tokio::test]
async fn server_close_is_reported_once() {
    let (listener, origin) = listen().await;

    tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.unwrap();
        let mut socket = accept_async(tcp).await.unwrap();
        let close = CloseFrame { code: CloseCode::Away, reason: "restart".into() };
        let _ = socket.close(Some(close)).await;
    });

    let mut client = open(&origin.stream_url()).await;

    match next_event(&mut client).await {
        StreamEvent::Closed { reason } => {
            assert!(reason.contains("1001"), "unexpected reason: {reason}");
            assert!(reason.contains("restart"), "unexpected reason: {reason}");
        },
        other => panic!("expected close, got {other:?}"),
    }

    // Channel is now disconnected and keeps reading as closed.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(matches!(client.try_recv(), Some(StreamEvent::Closed { .. })));
}

#[tokio::test]
async fn binary_frames_are_ignored() {
    let (listener, origin) = listen().await;

    tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.unwrap();
        let mut socket = accept_async(tcp).await.unwrap();
        socket.send(Message::Binary(vec![1, 2, 3, 4, 5].into())).await.unwrap();
        socket.send(Message::Text("after-binary".into())).await.unwrap();
        let _ = socket.next().await;
    });

    let mut client = open(&origin.stream_url()).await;

    assert_eq!(
        next_event(&mut client).await,
        StreamEvent::FrameReceived("after-binary".to_string())
    );
}

#[tokio::test]
async fn stream_client_subscribes_and_delivers_over_socket() {
    let (listener, origin) = listen().await;

    let server = tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.unwrap();
        let mut socket = accept_async(tcp).await.unwrap();

        socket.send(Message::Text("".into())).await.unwrap();
        let subscribe = socket.next().await.unwrap().unwrap().into_text().unwrap().to_string();
        socket.send(Message::Text("successfully subscribed to all".into())).await.unwrap();
        socket.send(Message::Text("webklex/gohits".into())).await.unwrap();
        socket.send(Message::Text("ok".into())).await.unwrap();
        socket.send(Message::Text("webklex/other".into())).await.unwrap();
        let _ = socket.next().await;
        subscribe
    });

    let mut stream = StreamClient::new(&origin);
    let actions = stream.start();
    let Some(StreamAction::Connect { url }) = actions.last().cloned() else {
        panic!("start must request a socket");
    };

    let mut socket = transport::connect(&url);
    let opened = next_event(&mut socket).await;
    assert_eq!(opened, StreamEvent::Opened);
    for action in stream.handle(opened).unwrap() {
        if let StreamAction::Send(text) = action {
            socket.to_server.send(text).await.unwrap();
        }
    }

    let mut delivered = Vec::new();
    while delivered.len() < 2 {
        let event = next_event(&mut socket).await;
        for action in stream.handle(event).unwrap() {
            if let StreamAction::Deliver(text) = action {
                delivered.push(text);
            }
        }
    }

    assert_eq!(stream.state(), StreamState::Subscribed);
    assert_eq!(delivered, vec!["webklex/gohits", "webklex/other"]);

    drop(socket);
    assert_eq!(server.await.unwrap(), SUBSCRIBE_ALL);
}
