//! REST gateway for the shadowsocks-manager UDP control protocol.
//!
//! Exposes a small HTTP surface and relays each call, reformatted, as a
//! line-oriented text/JSON command (`ping`, `add: {json}`, `remove: {json}`)
//! to an upstream manager daemon over UDP, then parses the textual reply
//! back into a normalized JSON envelope for the HTTP caller.
//!
//! # Architecture Overview
//!
//! ```text
//!     HTTP request        ┌─────────┐    ┌──────────┐    ┌───────────┐
//!     ───────────────────▶│  http   │───▶│ manager  │───▶│ transport │──▶ manager
//!                         │ handlers│    │  client  │    │   (UDP)   │    daemon
//!                         └─────────┘    └────┬─────┘    └───────────┘
//!                                             │ encode / classify
//!     HTTP response       ┌─────────┐    ┌────┴─────┐
//!     ◀───────────────────│envelope │◀───│ classify │◀── raw reply text
//!                         └─────────┘    └──────────┘
//! ```
//!
//! Every request is handled with its own request-local state; the only
//! blocking point is the upstream exchange, bounded by its own timeout.

// Core subsystems
pub mod config;
pub mod http;
pub mod manager;
pub mod transport;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use manager::ManagerClient;
pub use transport::{Transport, TransportError};
