use diskconsole::api::{EngineClient, ExecutionFailure, TopologyError};
use diskconsole::config::Config;
use std::path::PathBuf;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

struct CapturedRequest {
    head: String,
    body: Vec<u8>,
}

/// Serves exactly one request with `status` and `body`, handing back what it received.
async fn serve_once(status: u16, body: &'static str) -> (Config, oneshot::Receiver<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        let header_end = loop {
            let read = socket.read(&mut chunk).await.expect("read");
            assert!(read > 0, "connection closed before headers");
            buf.extend_from_slice(&chunk[..read]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };
        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let content_length = head
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        while buf.len() < header_end + content_length {
            let read = socket.read(&mut chunk).await.expect("read body");
            assert!(read > 0, "connection closed before body");
            buf.extend_from_slice(&chunk[..read]);
        }
        let body_bytes = buf[header_end..header_end + content_length].to_vec();

        let response = format!(
            "HTTP/1.1 {status} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.expect("write");
        socket.shutdown().await.ok();
        let _ = tx.send(CapturedRequest {
            head,
            body: body_bytes,
        });
    });

    let config = Config {
        engine_url: format!("http://{addr}"),
        log_path: PathBuf::from("/tmp/dcon-wire-test.log"),
        log_filter: "info".to_string(),
        debug_payload: false,
    };
    (config, rx)
}

#[tokio::test]
async fn execute_posts_batch_as_json_array() {
    let (config, captured) = serve_once(200, r#"{"messages":["ok1","ok2"],"disk_resoult":null}"#).await;
    let client = EngineClient::new(&config).expect("client");

    let batch = vec!["c1".to_string(), "c2".to_string()];
    let messages = client.execute(&batch).await.expect("messages");
    assert_eq!(messages, vec!["ok1", "ok2"]);

    let request = captured.await.expect("request");
    assert!(request.head.starts_with("POST /execute HTTP/1.1"));
    assert!(request
        .head
        .to_ascii_lowercase()
        .contains("content-type: application/json"));
    let sent: serde_json::Value = serde_json::from_slice(&request.body).expect("json body");
    assert_eq!(sent, serde_json::json!(["c1", "c2"]));
}

#[tokio::test]
async fn execute_treats_server_error_as_failure() {
    let (config, _captured) = serve_once(500, r#"{"messages":["no"]}"#).await;
    let client = EngineClient::new(&config).expect("client");

    let result = client.execute(&["rep".to_string()]).await;
    assert!(matches!(result, Err(ExecutionFailure::Status(status)) if status.as_u16() == 500));
}

#[tokio::test]
async fn fetch_disks_reads_topology() {
    let (config, captured) = serve_once(
        200,
        r#"[{"size":10,"unit":"m","fit":"ff","path":"/tmp/d1.mia","particiones":[{"name":"Part1","size":5,"unit":"m","type":"p","fit":"bf"}]}]"#,
    )
    .await;
    let client = EngineClient::new(&config).expect("client");

    let disks = client.fetch_disks().await.expect("disks");
    assert_eq!(disks.len(), 1);
    assert_eq!(disks[0].path.as_deref(), Some("/tmp/d1.mia"));
    let partitions = disks[0].listed_partitions().expect("partitions");
    assert_eq!(partitions[0].kind.as_deref(), Some("p"));

    let request = captured.await.expect("request");
    assert!(request.head.starts_with("GET /discos HTTP/1.1"));
}

#[tokio::test]
async fn fetch_disks_rejects_empty_list() {
    let (config, _captured) = serve_once(200, "[]").await;
    let client = EngineClient::new(&config).expect("client");

    assert!(matches!(client.fetch_disks().await, Err(TopologyError::Empty)));
}

#[tokio::test]
async fn unreachable_engine_is_a_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let config = Config {
        engine_url: format!("http://{addr}"),
        log_path: PathBuf::from("/tmp/dcon-wire-test.log"),
        log_filter: "info".to_string(),
        debug_payload: false,
    };
    let client = EngineClient::new(&config).expect("client");

    assert!(matches!(
        client.execute(&["rep".to_string()]).await,
        Err(ExecutionFailure::Transport(_))
    ));
    assert!(matches!(
        client.fetch_disks().await,
        Err(TopologyError::Transport(_))
    ));
}
