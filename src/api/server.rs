/*!
 * Simulation Server
 * Newline-delimited JSON over TCP
 */

use super::handlers;
use super::service::SchedulerService;
use super::traits::ServerLifecycle;
use super::types::{ApiError, ApiResult, Response, ServerConfig};
use crate::core::limits::MAX_REQUEST_LINE_BYTES;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// TCP server answering one JSON reply line per request line
pub struct SimulationServer {
    config: ServerConfig,
    service: SchedulerService,
    running: Arc<AtomicBool>,
    shutdown: watch::Sender<bool>,
}

impl SimulationServer {
    pub fn new(config: ServerConfig, service: SchedulerService) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            config,
            service,
            running: Arc::new(AtomicBool::new(false)),
            shutdown,
        }
    }

    pub fn service(&self) -> &SchedulerService {
        &self.service
    }

    /// Accept connections on an already bound listener until `stop` is called
    ///
    /// A server that was stopped before serving returns immediately.
    pub async fn serve(&self, listener: TcpListener) -> ApiResult<()> {
        let local = listener
            .local_addr()
            .map_err(|e| ApiError::Internal(format!("listener address: {}", e)))?;

        let mut stop = self.shutdown.subscribe();
        if *stop.borrow_and_update() {
            info!(address = %local, "Simulation server stopped before serving");
            return Ok(());
        }
        self.running.store(true, Ordering::SeqCst);
        info!(address = %local, "Simulation server listening");

        loop {
            tokio::select! {
                _ = stop.wait_for(|stopped| *stopped) => break,
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        let service = self.service.clone();
                        let limit = self.config.request_timeout;
                        let stop = self.shutdown.subscribe();
                        tokio::spawn(async move {
                            if let Err(e) = handle_connection(stream, peer, service, limit, stop).await {
                                debug!(peer = %peer, error = %e, "Connection closed with error");
                            }
                        });
                    }
                    Err(e) => warn!(error = %e, "Failed to accept connection"),
                },
            }
        }

        self.running.store(false, Ordering::SeqCst);
        info!(address = %local, "Simulation server stopped");
        Ok(())
    }
}

impl ServerLifecycle for SimulationServer {
    fn start(&self) -> Pin<Box<dyn Future<Output = ApiResult<()>> + Send + '_>> {
        Box::pin(async move {
            let listener = TcpListener::bind(self.config.address).await.map_err(|e| {
                ApiError::Internal(format!("failed to bind {}: {}", self.config.address, e))
            })?;
            self.serve(listener).await
        })
    }

    fn stop(&self) -> Pin<Box<dyn Future<Output = ApiResult<()>> + Send + '_>> {
        Box::pin(async move {
            self.shutdown.send_replace(true);
            info!("Simulation server shutdown requested");
            Ok(())
        })
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn config(&self) -> &ServerConfig {
        &self.config
    }
}

async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    service: SchedulerService,
    limit: Duration,
    mut stop: watch::Receiver<bool>,
) -> std::io::Result<()> {
    debug!(peer = %peer, "Connection accepted");
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    loop {
        line.clear();
        let mut limited = (&mut reader).take(MAX_REQUEST_LINE_BYTES as u64 + 1);
        let read = tokio::select! {
            _ = stop.wait_for(|stopped| *stopped) => break,
            read = limited.read_line(&mut line) => read?,
        };
        if read == 0 {
            break;
        }

        // Overlong line: the rest of it is still in the socket, so give up on the connection
        let overlong = line.len() > MAX_REQUEST_LINE_BYTES;
        let response = if overlong {
            Response::failure(ApiError::InvalidRequest(format!(
                "request line exceeds {} bytes",
                MAX_REQUEST_LINE_BYTES
            )))
        } else {
            let request = line.trim();
            if request.is_empty() {
                continue;
            }
            respond(&service, request.to_owned(), limit).await
        };

        let mut payload = serde_json::to_vec(&response)?;
        payload.push(b'\n');
        writer.write_all(&payload).await?;

        if overlong {
            break;
        }
    }

    writer.shutdown().await?;
    debug!(peer = %peer, "Connection closed");
    Ok(())
}

/// Handle one line on the blocking pool under the request deadline
async fn respond(service: &SchedulerService, line: String, limit: Duration) -> Response {
    let service = service.clone();
    let work = tokio::task::spawn_blocking(move || handlers::handle_line(&service, &line));

    match tokio::time::timeout(limit, work).await {
        Ok(Ok(response)) => response,
        Ok(Err(e)) => Response::failure(ApiError::Internal(format!("request handler failed: {}", e))),
        Err(_) => {
            warn!(timeout_ms = limit.as_millis() as u64, "Request timed out");
            Response::failure(ApiError::Timeout(format!(
                "request exceeded {}ms",
                limit.as_millis()
            )))
        }
    }
}
