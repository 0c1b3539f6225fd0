//! Full-node backend adapter.
//!
//! Speaks a UFO node's JSON-RPC interface through the JSON-RPC transport.
//! The node reports amounts as decimal UFO, so every amount funnels through
//! the currency converter before a canonical model is constructed. Beyond
//! the canonical capability set, the adapter exposes the node's plain RPC
//! surface for direct interaction.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::warn;

use crate::models::{Network, NodeConfig, Unspent};
use crate::utils::currency::json_to_ufoshi;

use super::super::backend::NetworkBackend;
use super::super::error::NetworkError;
use super::super::transports::JsonRpcTransport;

/// Node RPC method constants
mod rpc_methods {
	pub const GET_RECEIVED_BY_ADDRESS: &str = "getreceivedbyaddress";
	pub const LIST_RECEIVED_BY_ADDRESS: &str = "listreceivedbyaddress";
	pub const LIST_UNSPENT: &str = "listunspent";
	pub const SEND_RAW_TRANSACTION: &str = "sendrawtransaction";
	pub const GET_RAW_TRANSACTION: &str = "getrawtransaction";
}

/// Confirmation window passed to `listunspent`: everything from unconfirmed
/// up.
const LIST_UNSPENT_MIN_CONF: u64 = 0;
const LIST_UNSPENT_MAX_CONF: u64 = 9_999_999;

/// Adapter for a full node's JSON-RPC interface.
///
/// Construction is the only fallible setup; afterwards the adapter holds no
/// per-call mutable state and is safe for concurrent reuse.
#[derive(Debug, Clone)]
pub struct RpcNode {
	transport: JsonRpcTransport,
	network: Network,
}

impl RpcNode {
	/// Creates an adapter for the node described by `config`.
	pub fn new(config: &NodeConfig) -> Result<Self, anyhow::Error> {
		Ok(Self {
			transport: JsonRpcTransport::new(config)?,
			network: config.network,
		})
	}

	/// Which network this node serves
	pub fn network(&self) -> Network {
		self.network
	}

	/// Sends a plain RPC call to the node and returns the raw result.
	///
	/// # Errors
	/// * [`NetworkError::Connection`] if the node is unreachable
	/// * [`NetworkError::Backend`] if the node declares an RPC error
	pub async fn rpc_call(&self, method: &str, params: Vec<Value>) -> Result<Value, NetworkError> {
		self.transport.send(method, params).await
	}

	/// Concatenated unspent outputs for several addresses, in per-address
	/// native node order.
	pub async fn get_unspents(&self, addresses: &[&str]) -> Result<Vec<Unspent>, NetworkError> {
		let mut unspent = Vec::new();
		for address in addresses {
			unspent.extend(self.get_unspent(address).await?);
		}
		Ok(unspent)
	}

	// ========== Plain node RPC surface ==========

	/// Returns the number of blocks in the longest blockchain.
	pub async fn getblockcount(&self) -> Result<Value, NetworkError> {
		self.rpc_call("getblockcount", vec![]).await
	}

	/// Returns the hash of the best (tip) block.
	pub async fn getbestblockhash(&self) -> Result<Value, NetworkError> {
		self.rpc_call("getbestblockhash", vec![]).await
	}

	/// Returns the hash of the block at the given height.
	pub async fn getblockhash(&self, height: u64) -> Result<Value, NetworkError> {
		self.rpc_call("getblockhash", vec![json!(height)]).await
	}

	/// Returns state info regarding blockchain processing.
	pub async fn getblockchaininfo(&self) -> Result<Value, NetworkError> {
		self.rpc_call("getblockchaininfo", vec![]).await
	}

	/// Returns state info regarding P2P networking.
	pub async fn getnetworkinfo(&self) -> Result<Value, NetworkError> {
		self.rpc_call("getnetworkinfo", vec![]).await
	}

	/// Returns details on the active state of the TX memory pool.
	pub async fn getmempoolinfo(&self) -> Result<Value, NetworkError> {
		self.rpc_call("getmempoolinfo", vec![]).await
	}

	/// Returns mining-related information.
	pub async fn getmininginfo(&self) -> Result<Value, NetworkError> {
		self.rpc_call("getmininginfo", vec![]).await
	}

	/// Returns the proof-of-work difficulty.
	pub async fn getdifficulty(&self) -> Result<Value, NetworkError> {
		self.rpc_call("getdifficulty", vec![]).await
	}

	/// Returns the number of connections to other nodes.
	pub async fn getconnectioncount(&self) -> Result<Value, NetworkError> {
		self.rpc_call("getconnectioncount", vec![]).await
	}

	/// Returns wallet state info.
	pub async fn getwalletinfo(&self) -> Result<Value, NetworkError> {
		self.rpc_call("getwalletinfo", vec![]).await
	}

	/// Returns a new address for receiving payments.
	///
	/// `address_type` is one of `legacy`, `p2sh-segwit`, `bech32`.
	pub async fn getnewaddress(&self, label: &str, address_type: &str) -> Result<Value, NetworkError> {
		self.rpc_call("getnewaddress", vec![json!(label), json!(address_type)])
			.await
	}

	/// Returns the addresses assigned the given label.
	pub async fn getaddressesbylabel(&self, label: &str) -> Result<Value, NetworkError> {
		self.rpc_call("getaddressesbylabel", vec![json!(label)]).await
	}

	/// Returns the combined balance of the given addresses, in ufoshi.
	/// Requires the node's address index.
	pub async fn getaddressbalance(&self, addresses: &[&str]) -> Result<Value, NetworkError> {
		self.rpc_call("getaddressbalance", vec![json!(addresses)]).await
	}

	/// Sends to multiple recipients in one transaction. `amounts` maps
	/// address to decimal UFO amount.
	pub async fn sendmany(
		&self,
		amounts: Value,
		minconf: u64,
		comment: &str,
	) -> Result<Value, NetworkError> {
		self.rpc_call(
			"sendmany",
			vec![json!(""), amounts, json!(minconf), json!(comment)],
		)
		.await
	}

	fn parse_unspent_entry(entry: &Value) -> Result<Unspent, NetworkError> {
		let amount = entry
			.get("amount")
			.ok_or_else(|| NetworkError::backend("listunspent entry missing 'amount'", None))?;
		let address = Self::str_field(entry, "address")?;

		Ok(Unspent::from_address(
			json_to_ufoshi(amount)?,
			Self::u64_field(entry, "confirmations")? as u32,
			Self::str_field(entry, "scriptPubKey")?,
			Self::str_field(entry, "txid")?,
			Self::u64_field(entry, "vout")? as u32,
			address,
		))
	}

	fn str_field<'a>(entry: &'a Value, name: &str) -> Result<&'a str, NetworkError> {
		entry.get(name).and_then(Value::as_str).ok_or_else(|| {
			NetworkError::backend(format!("listunspent entry missing '{}'", name), None)
		})
	}

	fn u64_field(entry: &Value, name: &str) -> Result<u64, NetworkError> {
		entry.get(name).and_then(Value::as_u64).ok_or_else(|| {
			NetworkError::backend(format!("listunspent entry missing '{}'", name), None)
		})
	}
}

#[async_trait]
impl NetworkBackend for RpcNode {
	fn name(&self) -> &str {
		"node"
	}

	/// `getreceivedbyaddress [address, 0]`; the node reports decimal UFO,
	/// converted here to ufoshi.
	async fn get_balance(&self, address: &str) -> Result<u64, NetworkError> {
		let balance = self
			.rpc_call(
				rpc_methods::GET_RECEIVED_BY_ADDRESS,
				vec![json!(address), json!(0)],
			)
			.await?;
		Ok(json_to_ufoshi(&balance)?)
	}

	/// `listreceivedbyaddress [0, true, true, address]`; txids of the
	/// first (and only) matching entry, empty when the address is unused.
	async fn get_transactions(&self, address: &str) -> Result<Vec<String>, NetworkError> {
		let response = self
			.rpc_call(
				rpc_methods::LIST_RECEIVED_BY_ADDRESS,
				vec![json!(0), json!(true), json!(true), json!(address)],
			)
			.await?;

		let entries = response
			.as_array()
			.ok_or_else(|| NetworkError::backend("listreceivedbyaddress result is not an array", None))?;
		let Some(first) = entries.first() else {
			return Ok(Vec::new());
		};

		first
			.get("txids")
			.and_then(Value::as_array)
			.ok_or_else(|| NetworkError::backend("listreceivedbyaddress entry missing 'txids'", None))?
			.iter()
			.map(|txid| {
				txid.as_str()
					.map(str::to_string)
					.ok_or_else(|| NetworkError::backend("non-string txid in 'txids'", None))
			})
			.collect()
	}

	/// `listunspent [0, 9999999, [address]]`. The node already lists
	/// outputs in the common convention, so its native order is passed
	/// through unchanged.
	async fn get_unspent(&self, address: &str) -> Result<Vec<Unspent>, NetworkError> {
		let response = self
			.rpc_call(
				rpc_methods::LIST_UNSPENT,
				vec![
					json!(LIST_UNSPENT_MIN_CONF),
					json!(LIST_UNSPENT_MAX_CONF),
					json!([address]),
				],
			)
			.await?;

		response
			.as_array()
			.ok_or_else(|| NetworkError::backend("listunspent result is not an array", None))?
			.iter()
			.map(Self::parse_unspent_entry)
			.collect()
	}

	/// `sendrawtransaction [hex]`. A node-declared RPC error means the
	/// transaction was rejected by this node (bad inputs, already spent);
	/// that is reported as a decline so failover can try elsewhere, while
	/// connection failures keep their transient classification.
	async fn broadcast_tx(&self, tx_hex: &str) -> Result<Option<String>, NetworkError> {
		match self
			.rpc_call(rpc_methods::SEND_RAW_TRANSACTION, vec![json!(tx_hex)])
			.await
		{
			// An empty txid result counts as a decline
			Ok(result) => match result.as_str() {
				Some("") => Ok(None),
				Some(txid) => Ok(Some(txid.to_string())),
				None => Err(NetworkError::backend(
					"sendrawtransaction result is not a txid",
					None,
				)),
			},
			Err(error) if error.is_transient() => Err(error),
			Err(error) => {
				warn!(backend = self.name(), error = %error, "node declined broadcast");
				Ok(None)
			}
		}
	}

	/// `getrawtransaction [txid, false]`: the serialized transaction hex.
	async fn get_tx(&self, txid: &str) -> Result<Value, NetworkError> {
		self.rpc_call(
			rpc_methods::GET_RAW_TRANSACTION,
			vec![json!(txid), json!(false)],
		)
		.await
	}
}
