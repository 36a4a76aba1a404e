//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Parse CLI → load config → init tracing → bind listener → serve
//!
//! Shutdown (shutdown.rs):
//!     SIGINT → trigger broadcast → server stops accepting and drains
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
