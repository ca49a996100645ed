//! Integration tests for the GameQuery line-delimited JSON transport
//!
//! These run a local TCP listener that answers each connection with a
//! canned JSON line, the way the mod does.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

use ultron_client::client::{GameQueryClient, GameQueryServer, Query};
use ultron_client::error::ClientError;

/// Spawn a one-shot server that reads a single request line and replies
/// with `response` followed by a newline. Returns the bound port.
async fn spawn_canned_server(response: &'static str) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept failed");
        let mut reader = BufReader::new(stream);
        let mut request = String::new();
        reader
            .read_line(&mut request)
            .await
            .expect("read request failed");
        // Requests must be complete JSON lines
        let parsed: serde_json::Value =
            serde_json::from_str(request.trim()).expect("request was not valid JSON");
        assert!(parsed.get("type").is_some(), "request had no type tag");

        let mut stream = reader.into_inner();
        stream
            .write_all(format!("{}\n", response).as_bytes())
            .await
            .expect("write response failed");
    });

    port
}

fn client_for(port: u16) -> GameQueryClient {
    GameQueryClient::new(GameQueryServer::new("127.0.0.1".to_string(), port))
}

#[tokio::test]
async fn test_position_query_round_trip() {
    let port = spawn_canned_server(
        r#"{"position": {"x": 10.5, "y": 64.0, "z": -3.0, "yaw": 180.0, "pitch": 0.0, "health": 20.0, "maxHealth": 20.0, "food": 20, "level": 5, "experience": 100}}"#,
    )
    .await;

    let status = client_for(port).position().await.expect("position failed");
    assert_eq!(status.coords(), (10.5, 64.0, -3.0));
    assert_eq!(status.level, 5);
}

#[tokio::test]
async fn test_send_chat_reports_result() {
    let port =
        spawn_canned_server(r#"{"result": {"success": true, "message": "Message sent"}}"#).await;

    let result = client_for(port)
        .send_chat("#farm")
        .await
        .expect("send_chat failed");
    assert!(result.success);
    assert_eq!(result.message.as_deref(), Some("Message sent"));
}

#[tokio::test]
async fn test_top_level_error_surfaces_as_query_failed() {
    let port = spawn_canned_server(r#"{"error": "not in a world"}"#).await;

    let err = client_for(port).position().await.unwrap_err();
    match err {
        ClientError::QueryFailed(msg) => assert_eq!(msg, "not in a world"),
        other => panic!("expected QueryFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_goto_gives_up_after_max_wait() {
    // Answer every connection: actions succeed, position never moves
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        loop {
            let (stream, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => return,
            };
            let mut reader = BufReader::new(stream);
            let mut request = String::new();
            if reader.read_line(&mut request).await.is_err() {
                continue;
            }
            let parsed: serde_json::Value = serde_json::from_str(request.trim()).unwrap();
            let response = if parsed["type"] == "position" {
                r#"{"position": {"x": 0.0, "y": 64.0, "z": 0.0}}"#
            } else {
                r#"{"result": {"success": true}}"#
            };
            let mut stream = reader.into_inner();
            let _ = stream.write_all(format!("{}\n", response).as_bytes()).await;
        }
    });

    // The player stays at the origin, far from the target, so the
    // deadline is what ends the walk
    let arrived = client_for(port)
        .goto_within(100.0, 64.0, 100.0, 2.0, std::time::Duration::ZERO)
        .await
        .expect("goto failed");
    assert!(!arrived);
}

#[tokio::test]
async fn test_connection_refused_is_typed() {
    // Bind then drop the listener so the port is closed
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let err = client_for(port)
        .send_query(&Query::Position)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::ConnectionRefused { .. }));
}

#[tokio::test]
async fn test_closed_connection_without_response() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        // Accept and immediately close without answering
        let (stream, _) = listener.accept().await.unwrap();
        drop(stream);
    });

    let err = client_for(port)
        .send_query(&Query::Position)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::EmptyResponse | ClientError::Io(_)
    ));
}
