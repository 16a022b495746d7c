mod common;

use std::net::SocketAddr;
use std::sync::Arc;

use emosi::prediction::PredictionService;
use emosi::server::Server;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

struct Running {
    addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<emosi::error::Result<()>>,
    _fixture: common::Fixture,
}

impl Running {
    async fn stop(self) {
        let _ = self.shutdown.send(());
        self.handle.await.unwrap().unwrap();
    }
}

async fn start() -> Running {
    let fixture = common::fixture();
    let service = PredictionService::from_config(&fixture.config).unwrap();
    let server = Server::bind(Arc::new(service), &fixture.config.bind_address())
        .await
        .unwrap();
    let addr = server.local_addr().unwrap();

    let (tx, rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.run_until(async {
        rx.await.ok();
    }));

    Running {
        addr,
        shutdown: tx,
        handle,
        _fixture: fixture,
    }
}

/// Send a raw request and return (status, body).
async fn send(addr: SocketAddr, raw: &str) -> (u16, String) {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();

    let (head, body) = response.split_once("\r\n\r\n").unwrap();
    let status = head
        .split(' ')
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap();
    assert!(head.contains("Content-Type: application/json"), "{head}");
    (status, body.to_string())
}

async fn get(addr: SocketAddr, target: &str) -> (u16, serde_json::Value) {
    let (status, body) = send(
        addr,
        &format!("GET {target} HTTP/1.1\r\nHost: localhost\r\n\r\n"),
    )
    .await;
    (status, serde_json::from_str(&body).unwrap())
}

#[tokio::test]
async fn test_predict_endpoint() {
    let server = start().await;

    let (status, body) = get(server.addr, "/predict-teks?text=aku+seneng%20bgt").await;
    assert_eq!(status, 200);
    assert_eq!(body["text"], "aku seneng bgt");
    assert_eq!(body["prediction"], "happy");
    assert_eq!(body["is_uncertain"], false);

    let confidence = body["confidence"].as_f64().unwrap();
    assert!(confidence > 0.5 && confidence <= 1.0);

    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(chrono::NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S").is_ok());

    let object = body.as_object().unwrap();
    assert_eq!(object.len(), 5);

    server.stop().await;
}

#[tokio::test]
async fn test_text_validation() {
    let server = start().await;

    let (status, body) = get(server.addr, "/predict-teks").await;
    assert_eq!(status, 422);
    assert!(body["detail"].is_string());

    let (status, _) = get(server.addr, "/predict-teks?text=").await;
    assert_eq!(status, 422);

    let (status, _) = get(server.addr, "/predict-teks?other=sedih").await;
    assert_eq!(status, 422);

    server.stop().await;
}

#[tokio::test]
async fn test_routing_errors() {
    let server = start().await;

    let (status, body) = get(server.addr, "/predict?text=sedih").await;
    assert_eq!(status, 404);
    assert_eq!(body["detail"], "Not Found");

    let (status, _) = send(
        server.addr,
        "POST /predict-teks?text=sedih HTTP/1.1\r\nContent-Length: 0\r\n\r\n",
    )
    .await;
    assert_eq!(status, 405);

    let (status, _) = send(server.addr, "BLAH\r\n\r\n").await;
    assert_eq!(status, 400);

    server.stop().await;
}

#[tokio::test]
async fn test_concurrent_requests() {
    let server = start().await;
    let addr = server.addr;

    let texts = ["marah", "takut", "senang", "sayang", "sedih"];
    let requests: Vec<_> = (0..20)
        .map(|i| {
            let text = texts[i % texts.len()];
            tokio::spawn(async move {
                let (status, body) = get(addr, &format!("/predict-teks?text={text}")).await;
                (text, status, body)
            })
        })
        .collect();

    for request in requests {
        let (text, status, body) = request.await.unwrap();
        assert_eq!(status, 200);
        assert_eq!(body["text"], text);
    }

    let (status, body) = get(addr, "/predict-teks?text=sayang").await;
    assert_eq!(status, 200);
    assert_eq!(body["prediction"], "love");

    server.stop().await;
}
