//! Domain models and data structures for the network access layer.
//!
//! This module contains the core data structures used throughout the crate:
//!
//! - `blockchain`: canonical chain models shared by every backend
//! - `core`: network selection and backend configuration

mod blockchain;
mod core;

pub use blockchain::{is_segwit_address, Unspent, SEGWIT_ADDRESS_PREFIX};

pub use core::{ExplorerConfig, Network, NodeConfig};
