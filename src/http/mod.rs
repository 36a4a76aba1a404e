//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, shared state)
//!     → request.rs (add request ID)
//!     → handlers.rs (parse parameters, call the manager client)
//!     → envelope / passthrough body written to the client
//! ```

pub mod handlers;
pub mod request;
pub mod server;

pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
