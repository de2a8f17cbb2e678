//! Embeddable fake server for client tests

use crate::api::{create_router, FakeState};
use anyhow::Result;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{error, info};

/// A fake Cloud Controller listening on a local port.
///
/// The listener is shut down when the value is dropped.
pub struct FakeCloudController {
    state: FakeState,
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl FakeCloudController {
    /// Start on an ephemeral port of the loopback interface.
    pub async fn start() -> Result<Self> {
        Self::bind("127.0.0.1:0").await
    }

    /// Start on the given address.
    pub async fn bind(addr: &str) -> Result<Self> {
        let state = FakeState::new();
        let app = create_router(state.clone());

        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        let (shutdown, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
            if let Err(e) = result {
                error!("Fake Cloud Controller error: {}", e);
            }
        });

        info!("Fake Cloud Controller listening on {}", addr);

        Ok(Self {
            state,
            addr,
            shutdown: Some(shutdown),
        })
    }

    /// Base URL to configure a client with
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stores backing the server, for seeding and inspection
    pub fn state(&self) -> &FakeState {
        &self.state
    }

    /// Drop every stored record
    pub async fn reset(&self) {
        self.state.reset().await;
    }
}

impl Drop for FakeCloudController {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_start_on_ephemeral_port() {
        let server = FakeCloudController::start().await.unwrap();

        assert_ne!(server.addr().port(), 0);
        assert_eq!(server.url(), format!("http://127.0.0.1:{}", server.addr().port()));

        let stream = tokio::net::TcpStream::connect(server.addr()).await;
        assert!(stream.is_ok());
    }

    #[tokio::test]
    async fn test_state_is_shared_with_router() {
        let server = FakeCloudController::start().await.unwrap();
        server.state().users.create(Default::default()).await;
        assert_eq!(server.state().users.len().await, 1);

        server.reset().await;
        assert!(server.state().users.is_empty().await);
    }
}
