//! End-to-end tests over a real TCP listener

use serve_chat_gateway::api::UnimplementedHandler;
use serve_chat_gateway::config::Settings;
use serve_chat_gateway::HttpServer;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

/// A port that was free a moment ago
async fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

fn create_test_settings(port: u16) -> Settings {
    let mut settings = Settings::default();
    settings.server.address = "127.0.0.1".to_string();
    settings.server.port = port;
    settings.services.enable_all = true;
    settings
}

async fn raw_get(port: u16, path: &str) -> String {
    let mut stream = TcpStream::connect(("127.0.0.1", port)).await.unwrap();
    let request = format!(
        "GET {} HTTP/1.1\r\nHost: example.test:{}\r\nConnection: close\r\n\r\n",
        path, port
    );
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn test_avoid_serving_binds_nothing() {
    let port = free_port().await;
    let mut settings = create_test_settings(port);
    settings.server.avoid_serving = true;

    let server = HttpServer::new(settings).with_chat_handler(Arc::new(UnimplementedHandler));
    let result = tokio::time::timeout(Duration::from_secs(5), server.serve()).await;
    assert!(matches!(result, Ok(Ok(()))));

    assert!(TcpStream::connect(("127.0.0.1", port)).await.is_err());
}

#[tokio::test]
async fn test_serve_with_shutdown() {
    let port = free_port().await;
    let server = HttpServer::new(create_test_settings(port))
        .with_chat_handler(Arc::new(UnimplementedHandler));
    let (tx, rx) = oneshot::channel::<()>();

    let serving = tokio::spawn(async move {
        server
            .serve_with_shutdown(async {
                rx.await.ok();
            })
            .await
    });

    // Wait for the listener to come up
    let mut attempts = 0;
    while TcpStream::connect(("127.0.0.1", port)).await.is_err() {
        attempts += 1;
        assert!(attempts < 50, "server never started listening");
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    let response = raw_get(port, "/swagger/swagger_spec").await;
    assert!(response.starts_with("HTTP/1.1 200"));
    assert!(response.contains(&format!("http://example.test:{}/chat", port)));

    let response = raw_get(port, "/site/missing.html").await;
    assert!(response.starts_with("HTTP/1.1 500"));

    let response = raw_get(port, "/site/").await;
    assert!(response.starts_with("HTTP/1.1 200"));

    tx.send(()).unwrap();
    let result = tokio::time::timeout(Duration::from_secs(5), serving).await;
    assert!(matches!(result, Ok(Ok(Ok(())))));
}

#[tokio::test]
async fn test_bind_failure_is_returned() {
    let occupied = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = occupied.local_addr().unwrap().port();

    let server = HttpServer::new(create_test_settings(port))
        .with_chat_handler(Arc::new(UnimplementedHandler));
    let result = tokio::time::timeout(Duration::from_secs(5), server.serve()).await;
    assert!(matches!(result, Ok(Err(_))));
}

#[tokio::test]
async fn test_slow_request_headers_are_cut_off() {
    let mut settings = create_test_settings(8262);
    settings.server.read_header_timeout_secs = 1;
    let server = HttpServer::new(settings).with_chat_handler(Arc::new(UnimplementedHandler));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let (tx, rx) = oneshot::channel::<()>();
    let serving = tokio::spawn(async move {
        server
            .serve_on(listener, async {
                rx.await.ok();
            })
            .await
    });

    let mut stream = TcpStream::connect(("127.0.0.1", port)).await.unwrap();
    // Never finish the header block
    stream
        .write_all(b"GET /site/ HTTP/1.1\r\nHost: localhost\r\n")
        .await
        .unwrap();

    let started = std::time::Instant::now();
    let mut buf = Vec::new();
    let read = tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut buf)).await;
    assert!(read.is_ok(), "connection was still open after 5 s");
    assert!(started.elapsed() >= Duration::from_millis(900));

    tx.send(()).unwrap();
    assert!(serving.await.unwrap().is_ok());
}
