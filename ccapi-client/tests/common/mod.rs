//! Shared helpers for client integration tests

#![allow(dead_code)]

use axum::{http::StatusCode, Router};
use ccapi_client::{Client, Config};
use ccapi_fake::FakeCloudController;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub const TOKEN: &str = "token";

/// A fake Cloud Controller and a client pointed at it
pub struct TestEnv {
    pub fake: FakeCloudController,
    pub client: Client,
}

impl TestEnv {
    pub async fn start() -> anyhow::Result<Self> {
        let fake = FakeCloudController::start().await?;
        let client = Client::new(&Config::new(fake.url()))?;
        Ok(Self { fake, client })
    }
}

/// Serve `body` with `status` for every request; returns the base URL
pub async fn serve_canned(status: u16, body: &'static str) -> anyhow::Result<String> {
    let status = StatusCode::from_u16(status)?;
    let app = Router::new().fallback(move || async move { (status, body) });

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(format!("http://{}", addr))
}

/// An address nothing listens on
pub async fn closed_port_url() -> anyhow::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}", addr))
}

/// Answer one request with headers promising 100 bytes, send fewer, and hang up
pub async fn serve_truncated() -> anyhow::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let _ = socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\n{\"short\"")
                .await;
            let _ = socket.shutdown().await;
        }
    });

    Ok(format!("http://{}", addr))
}
