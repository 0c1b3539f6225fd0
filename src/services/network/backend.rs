//! Core backend capability interface.
//!
//! Every data source (a full node's JSON-RPC interface or a block-explorer
//! REST API) implements this fixed capability set, translating its own wire
//! format into the canonical models. The dispatcher holds backends as trait
//! objects and never sees a backend-specific shape.

use async_trait::async_trait;
use serde_json::Value;

use crate::models::Unspent;

use super::error::NetworkError;

/// The fixed capability set every backend adapter implements.
///
/// Adapters perform no address validation: malformed input is forwarded and
/// surfaces as a backend-classified error. A backend that does not support
/// an operation is simply omitted from that operation's route, never
/// registered with a silent no-op.
///
/// Unspent ordering is normalized to a common most-recent-first convention;
/// backends differ in native order, so each adapter applies its own
/// correcting reversal or pass-through (documented per adapter).
#[async_trait]
pub trait NetworkBackend: Send + Sync {
	/// Human-readable backend name for logs
	fn name(&self) -> &str;

	/// Balance of an address in ufoshi
	async fn get_balance(&self, address: &str) -> Result<u64, NetworkError>;

	/// Ids of all transactions related to an address
	async fn get_transactions(&self, address: &str) -> Result<Vec<String>, NetworkError>;

	/// All unspent outputs belonging to an address, in the common ordering
	/// convention
	async fn get_unspent(&self, address: &str) -> Result<Vec<Unspent>, NetworkError>;

	/// Broadcasts a fully-serialized signed transaction.
	///
	/// `Ok(Some(txid))` means accepted; `Ok(None)` means the backend
	/// declined without raising, and the dispatcher then advances to the
	/// next configured backend.
	async fn broadcast_tx(&self, tx_hex: &str) -> Result<Option<String>, NetworkError>;

	/// Raw transaction payload by id, as the backend returns it
	async fn get_tx(&self, txid: &str) -> Result<Value, NetworkError>;
}
