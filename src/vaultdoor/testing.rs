//! Test doubles for the Vaultdoor transport.

use crate::error::{Result, VaultError};
use crate::vaultdoor::client::{TransportResponse, VaultTransport};
use reqwest::Url;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Canned reply for one URL.
#[derive(Debug, Clone)]
pub(crate) enum FakeReply {
    Respond {
        status: u16,
        body: String,
        delay: Duration,
    },
    Unreachable,
}

impl FakeReply {
    pub(crate) fn ok(body: impl Into<String>) -> Self {
        Self::Respond {
            status: 200,
            body: body.into(),
            delay: Duration::from_millis(5),
        }
    }

    pub(crate) fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Respond {
            status,
            body: body.into(),
            delay: Duration::from_millis(5),
        }
    }

    pub(crate) fn delayed(self, by: Duration) -> Self {
        match self {
            Self::Respond { status, body, .. } => Self::Respond {
                status,
                body,
                delay: by,
            },
            other => other,
        }
    }
}

/// In-memory transport keyed by full URL. Unknown URLs answer 404.
#[derive(Debug, Default)]
pub(crate) struct FakeTransport {
    routes: HashMap<String, FakeReply>,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn route(mut self, url: &str, reply: FakeReply) -> Self {
        self.routes.insert(url.to_string(), reply);
        self
    }

    /// URLs requested so far, in call order.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Highest number of requests that were pending at the same time.
    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl VaultTransport for FakeTransport {
    async fn get(&self, url: &Url) -> Result<TransportResponse> {
        self.calls.lock().unwrap().push(url.to_string());

        let reply = self
            .routes
            .get(url.as_str())
            .cloned()
            .unwrap_or_else(|| FakeReply::status(404, "no such route"));

        match reply {
            FakeReply::Respond {
                status,
                body,
                delay,
            } => {
                let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                self.max_in_flight.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(delay).await;
                self.in_flight.fetch_sub(1, Ordering::SeqCst);
                Ok(TransportResponse { status, body })
            }
            FakeReply::Unreachable => Err(transport_error()),
        }
    }
}

/// A genuine reqwest error to stand in for a network failure.
pub(crate) fn transport_error() -> VaultError {
    let err = reqwest::Client::new()
        .get("not a url")
        .build()
        .unwrap_err();
    VaultError::Transport(err)
}

/// Loopback HTTP server answering fixed routes.
pub(crate) struct LoopbackServer {
    pub(crate) base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl LoopbackServer {
    /// Raw request heads received so far.
    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Start a server mapping request paths to `(status, body)`. Unknown paths get 404.
pub(crate) async fn serve(routes: HashMap<String, (u16, String)>) -> LoopbackServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let routes = routes.clone();
            let seen = Arc::clone(&seen);
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                loop {
                    let n = socket.read(&mut chunk).await.unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    buf.extend_from_slice(&chunk[..n]);
                    if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }

                let head = String::from_utf8_lossy(&buf).to_string();
                let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
                seen.lock().unwrap().push(head);

                let (status, body) = routes
                    .get(&path)
                    .cloned()
                    .unwrap_or((404, "not found".to_string()));
                let response = format!(
                    "HTTP/1.1 {} Canned\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    LoopbackServer {
        base_url: format!("http://{}/", addr),
        requests,
    }
}

/// URL of a local port with nothing listening on it.
pub(crate) fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/", addr)
}
