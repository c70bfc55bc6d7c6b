//! Integration test for the realtime chat channel — run an in-process
//! WebSocket server, join a conversation, assert dedup of redelivered
//! messages.

use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use tokio_tungstenite::tungstenite::protocol::Message as WsFrame;

use verdia_client::realtime::{ChatChannel, MessageLog};

fn push_frame(id: &str, minute: u32) -> WsFrame {
    let raw = json!({
        "event": "receiveMessage",
        "data": {
            "id": id,
            "conversationId": "c1",
            "senderId": "u2",
            "text": format!("msg {id}"),
            "createdAt": format!("2026-01-05T10:{minute:02}:00Z"),
        }
    })
    .to_string();
    WsFrame::Text(raw.into())
}

#[tokio::test]
async fn join_then_receive_deduplicates_redelivery() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ws listener");
    let addr = listener.local_addr().expect("ws addr");

    // Server: accept one connection, wait for the join event, push three
    // frames (one a redelivery), then close.
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let ws = tokio_tungstenite::accept_async(stream)
            .await
            .expect("ws handshake");
        let (mut sink, mut source) = ws.split();

        let join = source
            .next()
            .await
            .expect("join frame")
            .expect("join frame ok");
        let envelope: serde_json::Value =
            serde_json::from_str(join.to_text().expect("text frame")).expect("join json");
        assert_eq!(envelope["event"], "joinConversation");
        assert_eq!(envelope["data"], "c1");

        // Out of order, with "m1" delivered twice.
        sink.send(push_frame("m2", 5)).await.expect("push m2");
        sink.send(push_frame("m1", 1)).await.expect("push m1");
        sink.send(push_frame("m1", 1)).await.expect("redeliver m1");
        sink.send(WsFrame::Close(None)).await.expect("close");
    });

    let mut channel = ChatChannel::connect(&format!("ws://{addr}"))
        .await
        .expect("connect");
    channel.join("c1").expect("join");

    let mut log = MessageLog::new();
    while let Some(message) = channel.next_message().await {
        log.insert(message);
    }

    assert_eq!(log.len(), 2, "redelivered message must be dropped");
    let ids: Vec<&str> = log.messages().iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["m1", "m2"], "messages ordered by createdAt");
}
