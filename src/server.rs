//! HTTP edge for the prediction service.
//!
//! One tokio task per connection, one request per connection. The
//! synchronous pipeline runs on the blocking pool.

pub mod handler;
pub mod http;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use crate::error::Result;
use crate::prediction::PredictionService;
use crate::server::http::{HttpResponse, read_request};

pub use handler::PREDICT_PATH;

/// A bound listener serving [`PredictionService`].
#[derive(Debug)]
pub struct Server {
    service: Arc<PredictionService>,
    listener: TcpListener,
}

impl Server {
    /// Bind to `addr` (for example `0.0.0.0:8000`).
    pub async fn bind(service: Arc<PredictionService>, addr: &str) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { service, listener })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until Ctrl-C.
    pub async fn run(self) -> Result<()> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl-C: {e}");
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Serve until `shutdown` completes. In-flight connections are left to
    /// finish on their own tasks.
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        info!("Listening on http://{}{}", self.local_addr()?, PREDICT_PATH);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutting down");
                    return Ok(());
                }
                accepted = self.listener.accept() => {
                    let (stream, peer) = match accepted {
                        Ok(accepted) => accepted,
                        Err(e) => {
                            warn!("Failed to accept connection: {e}");
                            continue;
                        }
                    };
                    let service = self.service.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(service, stream).await {
                            warn!("Connection from {peer} failed: {e}");
                        }
                    });
                }
            }
        }
    }
}

async fn handle_connection(service: Arc<PredictionService>, mut stream: TcpStream) -> Result<()> {
    let (read_half, mut write_half) = stream.split();
    let mut reader = BufReader::new(read_half);

    let response = match read_request(&mut reader).await {
        Ok(Some(request)) => {
            debug!("{} {}", request.method, request.path);
            handler::handle(service, request).await
        }
        Ok(None) => return Ok(()),
        Err(e) => HttpResponse::detail(400, &e.to_string()),
    };

    write_half.write_all(&response.to_bytes()).await?;
    write_half.shutdown().await?;
    Ok(())
}
