//! Service layer implementations.
//!
//! - `network`: backend adapters, transports, and the failover dispatcher

pub mod network;
