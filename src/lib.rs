//! Unified network access layer for the UFO chain.
//!
//! This crate lets a wallet obtain balances, transaction histories,
//! unspent-output sets, single-transaction lookups, and broadcast capability
//! regardless of whether the underlying data source is a full node's
//! JSON-RPC interface or a block-explorer REST API. Each source exposes a
//! different wire format, different error semantics, and different units;
//! callers see one canonical model and one error contract.
//!
//! The crate is organized as:
//!
//! - `models`: canonical chain models and backend configuration
//! - `services::network`: backend adapters, transports, and the
//!   ordered-failover dispatcher
//! - `utils`: currency unit conversion
//!
//! # Example
//!
//! ```no_run
//! use ufobit::services::network::NetworkClient;
//!
//! # async fn example() -> Result<(), anyhow::Error> {
//! let client = NetworkClient::mainnet()?;
//! let balance = client.get_balance("UgdMm8b2WpGX5EdFxSry9VuJnyY8SWsZh3").await?;
//! println!("balance: {} ufoshi", balance);
//! # Ok(())
//! # }
//! ```

pub mod models;
pub mod services;
pub mod utils;
