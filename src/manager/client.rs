//! Manager client: one upstream exchange per operation.
//!
//! Owns the manager's coordinates and the transport seam, and runs the
//! encode → send → classify pipeline for the three supported operations.
//! Transport and encoding failures are converted into envelopes here; they
//! are logged but never escape as errors.

use std::sync::Arc;
use std::time::Instant;

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::transport::Transport;

use super::classify::{classify, Reply};
use super::command::{Command, CommandKind, PortAssignment};
use super::envelope::Envelope;

/// Client for the upstream manager daemon.
///
/// Cheap to share: handlers hold it behind an `Arc` and each request runs
/// its own independent exchange.
pub struct ManagerClient {
    transport: Arc<dyn Transport>,
    host: String,
    port: u16,
}

impl ManagerClient {
    pub fn new(upstream: &UpstreamConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            host: upstream.host.clone(),
            port: upstream.port,
        }
    }

    /// `ping`: ask the manager for its traffic statistics dump.
    pub async fn traffic_statistics(&self) -> Reply {
        self.dispatch(Command::Ping).await
    }

    /// `add`: open a managed port with the given password.
    pub async fn add_port(&self, server_port: u16, password: String) -> Reply {
        // An empty password only occurs on the malformed-request path; the
        // wire protocol omits the field rather than sending "".
        let assignment = PortAssignment {
            server_port,
            password: (!password.is_empty()).then_some(password),
        };
        self.dispatch(Command::AddPort(assignment)).await
    }

    /// `remove`: close a managed port.
    pub async fn remove_port(&self, server_port: u16) -> Reply {
        self.dispatch(Command::RemovePort(PortAssignment::remove(server_port)))
            .await
    }

    async fn dispatch(&self, command: Command) -> Reply {
        let kind = command.kind();
        let started = Instant::now();

        let payload = match command.encode() {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!(command = kind.as_str(), error = %err, "Command encoding failed");
                let reply = Reply::Envelope(Envelope::with_reason(
                    "internal_error",
                    marshal_failure_reason(kind),
                ));
                metrics::record_command(kind.as_str(), reply.status(), started);
                return reply;
            }
        };

        tracing::debug!(command = kind.as_str(), payload = %payload, "Sending manager command");

        let raw = self.transport.send(&payload, &self.host, self.port).await;
        if let Err(err) = &raw {
            tracing::warn!(
                command = kind.as_str(),
                host = %self.host,
                port = self.port,
                error = %err,
                "Upstream exchange failed"
            );
        }

        let reply = classify(kind, raw);
        metrics::record_command(kind.as_str(), reply.status(), started);
        reply
    }
}

fn marshal_failure_reason(kind: CommandKind) -> &'static str {
    match kind {
        CommandKind::Ping => "stat_json_marshal_failure",
        CommandKind::AddPort => "add_port_json_marshal_failure",
        CommandKind::RemovePort => "remove_port_json_marshal_failure",
    }
}
