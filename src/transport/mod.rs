//! Transport seam between the manager client and the wire.
//!
//! The core never assumes how a command reaches the manager daemon; it only
//! depends on the `send(payload, host, port) → reply text` contract below.
//! The production implementation is a per-call UDP socket (`udp.rs`), but a
//! process spawn or a pooled socket would satisfy the same trait.

pub mod udp;

use async_trait::async_trait;
use thiserror::Error;

pub use udp::UdpTransport;

/// Errors that can occur while exchanging one datagram with the manager.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Could not bind a local socket for the exchange.
    #[error("failed to bind local socket: {0}")]
    Bind(#[source] std::io::Error),

    /// The manager address did not resolve or the datagram could not be sent.
    #[error("failed to send to {addr}: {source}")]
    Send {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The reply could not be received.
    #[error("failed to receive reply from {addr}: {source}")]
    Receive {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// No reply arrived within the configured window.
    #[error("no reply from {addr} within {timeout_ms}ms")]
    Timeout { addr: String, timeout_ms: u64 },
}

/// A one-shot, connectionless exchange with the manager daemon.
///
/// Implementations must deliver `payload` as the full body of a single
/// outbound transmission, apply a short fixed timeout covering send and
/// receive, and return whatever text came back with no added framing.
/// Retries are never the transport's responsibility.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, payload: &str, host: &str, port: u16) -> Result<String, TransportError>;
}
