//! The manager protocol core.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → client.rs (one exchange per operation)
//!     → command.rs (encode `ping` / `add: {json}` / `remove: {json}`)
//!     → transport seam (datagram out, reply text or failure back)
//!     → classify.rs (raw reply → normalized outcome)
//!     → envelope.rs (outcome → `{status, error?}` JSON body)
//! ```
//!
//! Everything here is request-scoped and immutable after construction;
//! nothing is shared between concurrent requests except the read-only
//! client itself.

pub mod classify;
pub mod client;
pub mod command;
pub mod envelope;

pub use classify::{classify, Reply};
pub use client::ManagerClient;
pub use command::{Command, CommandKind, PortAssignment};
pub use envelope::Envelope;
