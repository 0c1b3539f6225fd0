//! Provider aggregation over UFO data sources.
//!
//! Normalizes several backends (block-explorer REST API, full-node
//! JSON-RPC) behind one capability trait and dispatches calls through an
//! ordered failover walk, so callers see a single client with uniform
//! models and a uniform error taxonomy.

mod backend;
mod backends;
mod dispatcher;
mod error;
mod transports;

pub use backend::NetworkBackend;
pub use backends::{Explorer, RpcNode};
pub use dispatcher::{NetworkClient, Operation, RouteTable};
pub use error::NetworkError;
pub use transports::{JsonRpcTransport, RestTransport, DEFAULT_TIMEOUT};
