//! Backend adapter implementations.
//!
//! One adapter per data source:
//!
//! - `explorer`: the UFO block-explorer REST API
//! - `node`: a full node's JSON-RPC interface

mod explorer;
mod node;

pub use explorer::Explorer;
pub use node::RpcNode;
