//! Observability infrastructure for structured logging.
//!
//! Instrumentation in the rest of the crate goes through the `tracing` macros;
//! this module wires those macros to a file-backed subscriber so storage
//! operations leave a trail without touching stdout.
//!
//! # Architecture
//!
//! - `init`: Subscriber setup and level resolution

pub mod init;

pub use init::init_tracing;
