//! Canonical chain models shared by every backend.
//!
//! Each backend speaks its own wire format; adapters translate whatever a
//! backend returns into these models so that callers never see a
//! backend-specific shape. Models are plain values: created fresh per
//! response, carrying no backing connection.

use serde::{Deserialize, Serialize};

/// First character of segwit-style addresses on this chain.
///
/// Addresses starting with `'U'` are treated as segwit by convention of the
/// UFO address scheme; this is not a general UTXO rule.
pub const SEGWIT_ADDRESS_PREFIX: char = 'U';

/// Returns whether an address is segwit-style under the chain's address
/// scheme (see [`SEGWIT_ADDRESS_PREFIX`]).
pub fn is_segwit_address(address: &str) -> bool {
	address.starts_with(SEGWIT_ADDRESS_PREFIX)
}

/// A spendable transaction output, normalized across backends.
///
/// Amounts are always in ufoshi (the integer smallest unit); adapters
/// convert whatever representation their backend uses before constructing
/// this model. `segwit` is always derived from the raw per-entry address
/// field, never left ambiguous.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Unspent {
	/// Amount in ufoshi
	pub amount: u64,

	/// Number of confirmations the owning transaction has
	pub confirmations: u32,

	/// Hex-encoded locking script, opaque to this layer
	pub script: String,

	/// Transaction id of the owning transaction (fixed-length hex)
	pub txid: String,

	/// Output position within the owning transaction
	pub vout: u32,

	/// Whether the owning address is segwit-style
	pub segwit: bool,
}

impl Unspent {
	/// Creates an unspent output, deriving `segwit` from the owning address.
	pub fn from_address(
		amount: u64,
		confirmations: u32,
		script: impl Into<String>,
		txid: impl Into<String>,
		vout: u32,
		address: &str,
	) -> Self {
		Self {
			amount,
			confirmations,
			script: script.into(),
			txid: txid.into(),
			vout,
			segwit: is_segwit_address(address),
		}
	}
}
