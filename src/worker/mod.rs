//! Background worker for asynchronous vault operations.
//!
//! This module implements the worker thread that handles all storage I/O so
//! callers never block on the embedded database directly. Completion is
//! signaled over a response channel: one response per request, in order.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types
//! - `handler`: Worker implementation, dispatch, and thread handle

pub mod handler;
pub mod messages;

pub use handler::{VaultWorker, VaultWorkerHandle};
pub use messages::{VaultRequest, VaultResponse};
