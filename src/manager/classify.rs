//! Response classification, the decision core.
//!
//! # Responsibilities
//! - Disambiguate the manager's heterogeneous replies: `stat: <json>`
//!   payloads, the literal `ok`, known domain outcomes, arbitrary error text
//! - Map transport failures to the fixed `comm_error` reason per command
//! - Degrade unrecognized replies to a reported envelope, never a panic
//!
//! # Design Decisions
//! - Pure function of (command kind, raw reply); trivially unit-testable
//! - Comparisons are exact and case-sensitive, no trimming beyond what the
//!   transport already returned
//! - Statistics bodies pass through verbatim; they are upstream JSON and
//!   must not be re-wrapped or re-validated here

use crate::transport::TransportError;

use super::command::CommandKind;
use super::envelope::Envelope;

/// Prefix the manager puts in front of a statistics dump.
const STAT_PREFIX: &str = "stat: ";

/// Normalized outcome of one upstream exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Verbatim upstream statistics JSON (ping only), passed through
    /// without re-wrapping.
    Stats(String),
    /// Everything else: the uniform `{status, error?}` envelope.
    Envelope(Envelope),
}

impl Reply {
    /// The status communicated to the caller; used for logs and metrics.
    pub fn status(&self) -> &str {
        match self {
            Reply::Stats(_) => "ok",
            Reply::Envelope(envelope) => &envelope.status,
        }
    }

    /// Render the HTTP response body.
    pub fn into_body(self) -> String {
        match self {
            Reply::Stats(json) => json,
            Reply::Envelope(envelope) => envelope.to_json(),
        }
    }
}

impl CommandKind {
    /// Fixed reason reported when the transport failed for this command.
    fn comm_failure_reason(self) -> &'static str {
        match self {
            CommandKind::Ping => "stat_comm_failure",
            CommandKind::AddPort => "add_port_comm_failure",
            CommandKind::RemovePort => "remove_port_comm_failure",
        }
    }
}

/// Classify the raw reply (or transport failure) produced by `kind`.
pub fn classify(kind: CommandKind, raw: Result<String, TransportError>) -> Reply {
    let text = match raw {
        Ok(text) => text,
        Err(_) => {
            return Reply::Envelope(Envelope::with_reason(
                "comm_error",
                kind.comm_failure_reason(),
            ))
        }
    };

    match kind {
        CommandKind::Ping => match text.strip_prefix(STAT_PREFIX) {
            Some(body) => Reply::Stats(body.to_string()),
            None => Reply::Envelope(Envelope::with_reason("unexpected_answer", text)),
        },
        CommandKind::AddPort => match text.as_str() {
            "ok" => Reply::Envelope(Envelope::ok()),
            // The manager reports a duplicate add as "port is not available";
            // from the caller's perspective the port exists, which is the
            // requested end state, so this maps to a success with a note.
            "port is not available" => {
                Reply::Envelope(Envelope::with_reason("ok", "port_already_exists"))
            }
            _ => Reply::Envelope(Envelope::with_reason("unexpected_answer", text)),
        },
        CommandKind::RemovePort => match text.as_str() {
            "ok" => Reply::Envelope(Envelope::ok()),
            _ => Reply::Envelope(Envelope::with_reason("unexpected_answer", text)),
        },
    }
}
