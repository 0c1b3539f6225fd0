//! Network transport implementations.
//!
//! Transports are thin, retry-free request/response executors. Failover and
//! response normalization live above them, in the backend adapters and the
//! dispatcher; a transport only executes one request and classifies
//! connection-level failures as transient.

mod jsonrpc;
mod rest;

pub use jsonrpc::JsonRpcTransport;
pub use rest::RestTransport;

use std::time::Duration;

/// Fixed request timeout for every transport call.
///
/// There is deliberately no per-call override: a timeout surfaces as a
/// transient connection failure and is handled by the dispatcher's
/// failover path.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
