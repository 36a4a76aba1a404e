//! Outbound command encoding.
//!
//! The manager daemon speaks a line-oriented text protocol: a bare `ping`,
//! or a verb prefix followed by one compact JSON object. Encoding is a pure
//! function of the typed command; the only possible failure is JSON
//! serialization, which callers treat as an internal fault.

use serde::Serialize;
use thiserror::Error;

/// A request to create or remove a managed port.
///
/// `password` is present and non-empty for creation and absent for removal.
/// Its absence is meaningful: the manager distinguishes the two shapes, so
/// `None` is omitted from the serialized object entirely, never sent as
/// null or empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortAssignment {
    pub server_port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl PortAssignment {
    /// Assignment for an `add` command.
    pub fn create(server_port: u16, password: impl Into<String>) -> Self {
        Self {
            server_port,
            password: Some(password.into()),
        }
    }

    /// Assignment for a `remove` command; carries no password.
    pub fn remove(server_port: u16) -> Self {
        Self {
            server_port,
            password: None,
        }
    }
}

/// Which of the three manager operations a command represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Ping,
    AddPort,
    RemovePort,
}

impl CommandKind {
    /// Short label for logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            CommandKind::Ping => "ping",
            CommandKind::AddPort => "add_port",
            CommandKind::RemovePort => "remove_port",
        }
    }
}

/// One outbound command, constructed per request and discarded after the
/// transport call returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ping,
    AddPort(PortAssignment),
    RemovePort(PortAssignment),
}

/// JSON serialization failed while building a command payload.
#[derive(Debug, Error)]
#[error("failed to serialize {} payload: {source}", .kind.as_str())]
pub struct EncodeError {
    pub kind: CommandKind,
    #[source]
    pub source: serde_json::Error,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Ping => CommandKind::Ping,
            Command::AddPort(_) => CommandKind::AddPort,
            Command::RemovePort(_) => CommandKind::RemovePort,
        }
    }

    /// Encode to the single outbound text line the manager understands.
    pub fn encode(&self) -> Result<String, EncodeError> {
        let json = |assignment: &PortAssignment| {
            serde_json::to_string(assignment).map_err(|source| EncodeError {
                kind: self.kind(),
                source,
            })
        };

        match self {
            Command::Ping => Ok("ping".to_string()),
            Command::AddPort(assignment) => Ok(format!("add: {}", json(assignment)?)),
            Command::RemovePort(assignment) => Ok(format!("remove: {}", json(assignment)?)),
        }
    }
}
