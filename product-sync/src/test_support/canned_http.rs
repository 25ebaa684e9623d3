//! One-shot HTTP responders standing in for the product catalogue.
//!
//! Each responder binds an ephemeral loopback port, accepts a single
//! connection, records the request head, and answers with a fixed status and
//! body. This exercises the real reqwest adapter without leaving the host.

use std::io;
use std::time::Duration;

use reqwest::{StatusCode, Url};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";
const STALL_DURATION: Duration = Duration::from_secs(30);

/// Running single-request catalogue responder.
pub struct CannedCatalogue {
    endpoint: Url,
    handle: JoinHandle<io::Result<String>>,
}

impl CannedCatalogue {
    /// Serve one request with `status` and a JSON `body`.
    ///
    /// # Errors
    ///
    /// Returns an error when the loopback listener cannot be bound.
    pub async fn respond_with(status: StatusCode, body: impl Into<String>) -> io::Result<Self> {
        let body = body.into();
        Self::spawn(move |mut stream| async move {
            let head = read_request_head(&mut stream).await?;
            let response = format!(
                "HTTP/1.1 {code} {reason}\r\ncontent-type: application/json\r\ncontent-length: {length}\r\nconnection: close\r\n\r\n{body}",
                code = status.as_u16(),
                reason = status.canonical_reason().unwrap_or("Unknown"),
                length = body.len(),
            );
            stream.write_all(response.as_bytes()).await?;
            stream.shutdown().await?;
            Ok(head)
        })
        .await
    }

    /// Accept one request and never answer it.
    ///
    /// # Errors
    ///
    /// Returns an error when the loopback listener cannot be bound.
    pub async fn stall() -> io::Result<Self> {
        Self::spawn(|mut stream| async move {
            let head = read_request_head(&mut stream).await?;
            tokio::time::sleep(STALL_DURATION).await;
            Ok(head)
        })
        .await
    }

    async fn spawn<F, Fut>(serve: F) -> io::Result<Self>
    where
        F: FnOnce(TcpStream) -> Fut + Send + 'static,
        Fut: Future<Output = io::Result<String>> + Send + 'static,
    {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
        let endpoint = products_endpoint(listener.local_addr()?.to_string().as_str())?;
        let handle = tokio::spawn(async move {
            let (stream, _) = listener.accept().await?;
            serve(stream).await
        });
        Ok(Self { endpoint, handle })
    }

    /// Products endpoint served by this responder.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Wait for the exchange to finish and return the raw request head.
    ///
    /// # Errors
    ///
    /// Returns an error when the connection failed or the task panicked.
    pub async fn request_head(self) -> io::Result<String> {
        self.handle.await.map_err(io::Error::other)?
    }
}

/// Endpoint on a loopback port with no listener, so connects are refused.
///
/// # Errors
///
/// Returns an error when no ephemeral port can be reserved.
pub fn unreachable_endpoint() -> io::Result<Url> {
    let address = std::net::TcpListener::bind(("127.0.0.1", 0))?.local_addr()?;
    products_endpoint(address.to_string().as_str())
}

fn products_endpoint(authority: &str) -> io::Result<Url> {
    Url::parse(&format!("http://{authority}/products")).map_err(io::Error::other)
}

async fn read_request_head(stream: &mut TcpStream) -> io::Result<String> {
    let mut head = Vec::new();
    let mut chunk = [0_u8; 1024];
    loop {
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            break;
        }
        head.extend_from_slice(&chunk[..read]);
        if head
            .windows(HEAD_TERMINATOR.len())
            .any(|window| window == HEAD_TERMINATOR)
        {
            break;
        }
    }
    Ok(String::from_utf8_lossy(&head).into_owned())
}
