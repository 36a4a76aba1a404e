//! Failure injection tests: every command kind must classify a transport
//! failure into its fixed comm_error reason, and the process must never
//! crash over an unreachable manager.

use std::sync::Arc;

use async_trait::async_trait;

use ssmgr_gateway::{HttpServer, Transport, TransportError};

mod common;

/// Transport that fails every exchange, as if the manager were unreachable.
struct FailingTransport;

#[async_trait]
impl Transport for FailingTransport {
    async fn send(&self, _payload: &str, host: &str, port: u16) -> Result<String, TransportError> {
        Err(TransportError::Timeout {
            addr: format!("{}:{}", host, port),
            timeout_ms: 250,
        })
    }
}

async fn start_failing_gateway() -> (std::net::SocketAddr, ssmgr_gateway::Shutdown) {
    let config = ssmgr_gateway::GatewayConfig::default();
    let server = HttpServer::with_transport(config, Arc::new(FailingTransport));
    common::start_gateway_with(server).await
}

#[tokio::test]
async fn test_stat_comm_failure() {
    let (gateway, shutdown) = start_failing_gateway().await;

    let res = reqwest::get(format!("http://{}/ports", gateway)).await.unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(
        res.text().await.unwrap(),
        r#"{"status":"comm_error","error":"stat_comm_failure"}"#
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_add_port_comm_failure() {
    let (gateway, shutdown) = start_failing_gateway().await;

    let res = reqwest::Client::new()
        .post(format!("http://{}/ports/8388", gateway))
        .body("secret")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 201);
    assert_eq!(
        res.text().await.unwrap(),
        r#"{"status":"comm_error","error":"add_port_comm_failure"}"#
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_remove_port_comm_failure() {
    let (gateway, shutdown) = start_failing_gateway().await;

    let res = reqwest::Client::new()
        .delete(format!("http://{}/ports/8388", gateway))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 201);
    assert_eq!(
        res.text().await.unwrap(),
        r#"{"status":"comm_error","error":"remove_port_comm_failure"}"#
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_silent_manager_times_out_as_comm_error() {
    // Same property through the real UDP transport: a manager that never
    // answers shows up as a comm_error once the reply window lapses.
    let manager = common::start_scripted_manager(|_| None).await;
    let (gateway, shutdown) = common::start_gateway(common::config_for(manager)).await;

    let res = reqwest::get(format!("http://{}/ports", gateway)).await.unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(
        res.text().await.unwrap(),
        r#"{"status":"comm_error","error":"stat_comm_failure"}"#
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_gateway_survives_failures_and_keeps_serving() {
    let (gateway, shutdown) = start_failing_gateway().await;
    let client = reqwest::Client::new();

    for _ in 0..3 {
        let res = client
            .get(format!("http://{}/ports", gateway))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);
    }

    // Healthcheck still green after repeated upstream failures.
    let res = client
        .get(format!("http://{}/healthcheck", gateway))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "ok");

    shutdown.trigger();
}
