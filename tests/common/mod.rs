//! Shared utilities for integration testing.

use std::net::SocketAddr;

use tokio::net::{TcpListener, UdpSocket};

use ssmgr_gateway::{GatewayConfig, HttpServer, Shutdown};

/// Start a mock manager daemon that answers every datagram with a fixed
/// reply.
#[allow(dead_code)]
pub async fn start_mock_manager(reply: &'static str) -> SocketAddr {
    start_scripted_manager(move |_| Some(reply.to_string())).await
}

/// Start a scripted mock manager: the closure maps each received command
/// line to a reply; `None` stays silent, forcing the gateway's reply
/// timeout.
pub async fn start_scripted_manager<F>(script: F) -> SocketAddr
where
    F: Fn(&str) -> Option<String> + Send + Sync + 'static,
{
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = socket.local_addr().unwrap();

    tokio::spawn(async move {
        let mut buf = vec![0u8; 65536];
        loop {
            match socket.recv_from(&mut buf).await {
                Ok((received, from)) => {
                    let command = String::from_utf8_lossy(&buf[..received]).into_owned();
                    if let Some(reply) = script(&command) {
                        let _ = socket.send_to(reply.as_bytes(), from).await;
                    }
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Gateway config pointing at `manager`, with a short reply timeout so
/// failure cases stay fast.
pub fn config_for(manager: SocketAddr) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.upstream.host = manager.ip().to_string();
    config.upstream.port = manager.port();
    config.timeouts.upstream_reply_ms = 250;
    config
}

/// Spawn a gateway server on an ephemeral port; returns its address and
/// the handle that stops it at the end of a case.
pub async fn start_gateway_with(server: HttpServer) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Spawn a gateway with the real UDP transport.
#[allow(dead_code)]
pub async fn start_gateway(config: GatewayConfig) -> (SocketAddr, Shutdown) {
    start_gateway_with(HttpServer::new(config)).await
}
