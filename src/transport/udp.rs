//! UDP implementation of the transport seam.
//!
//! # Responsibilities
//! - Bind an ephemeral local socket per call (no pooling, no reuse)
//! - Deliver the payload as one datagram to the manager
//! - Collect the single reply datagram, decoded as text
//! - Enforce the reply timeout; release the socket on every exit path
//!
//! # Design Decisions
//! - The socket is `connect`ed to the manager so stray datagrams from other
//!   peers are not mistaken for the reply
//! - Received bytes are decoded lossily; the classifier deals in text

use std::time::Duration;

use async_trait::async_trait;
use tokio::net::UdpSocket;
use tokio::time;

use super::{Transport, TransportError};

// Large enough for any single reply datagram, including full `stat:` dumps.
const MAX_REPLY_BYTES: usize = 64 * 1024;

/// Per-call UDP transport.
#[derive(Debug, Clone)]
pub struct UdpTransport {
    reply_timeout: Duration,
}

impl UdpTransport {
    /// Create a transport that waits `reply_timeout` for the manager's answer.
    pub fn new(reply_timeout: Duration) -> Self {
        Self { reply_timeout }
    }
}

#[async_trait]
impl Transport for UdpTransport {
    async fn send(&self, payload: &str, host: &str, port: u16) -> Result<String, TransportError> {
        let addr = format!("{}:{}", host, port);

        // Dropped on every return below, releasing the port.
        let socket = UdpSocket::bind(("0.0.0.0", 0))
            .await
            .map_err(TransportError::Bind)?;

        socket
            .connect((host, port))
            .await
            .map_err(|source| TransportError::Send {
                addr: addr.clone(),
                source,
            })?;

        socket
            .send(payload.as_bytes())
            .await
            .map_err(|source| TransportError::Send {
                addr: addr.clone(),
                source,
            })?;

        let mut buf = vec![0u8; MAX_REPLY_BYTES];
        let received = time::timeout(self.reply_timeout, socket.recv(&mut buf))
            .await
            .map_err(|_| TransportError::Timeout {
                addr: addr.clone(),
                timeout_ms: self.reply_timeout.as_millis() as u64,
            })?
            .map_err(|source| TransportError::Receive { addr, source })?;

        Ok(String::from_utf8_lossy(&buf[..received]).into_owned())
    }
}
