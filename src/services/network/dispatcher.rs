//! Ordered-failover dispatch over backend adapters.
//!
//! The client owns one ordered backend sequence per operation. A call walks
//! its sequence: a success returns immediately, a transient (connection)
//! failure advances to the next backend, and a backend application error
//! aborts the walk and propagates as-is. An exhausted or empty sequence
//! yields [`NetworkError::AllBackendsUnreachable`].
//!
//! Broadcast is the one asymmetric operation: a backend may decline a
//! transaction without failing, which also advances the walk, and a walk in
//! which every reachable backend declined still ends in
//! [`NetworkError::AllBackendsUnreachable`].

use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{Network, NodeConfig, Unspent};

use super::backend::NetworkBackend;
use super::backends::{Explorer, RpcNode};
use super::error::NetworkError;

/// The canonical operations a backend sequence can be routed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
	GetBalance,
	GetTransactions,
	GetUnspent,
	BroadcastTx,
	GetTx,
}

impl Operation {
	/// Stable lowercase name, used in logs.
	pub fn as_str(&self) -> &'static str {
		match self {
			Operation::GetBalance => "get_balance",
			Operation::GetTransactions => "get_transactions",
			Operation::GetUnspent => "get_unspent",
			Operation::BroadcastTx => "broadcast_tx",
			Operation::GetTx => "get_tx",
		}
	}
}

/// Per-operation ordered backend sequences.
///
/// Each operation routes independently, so a deployment can e.g. broadcast
/// through a node while reading balances from an explorer.
#[derive(Clone, Default)]
pub struct RouteTable {
	balance: Vec<Arc<dyn NetworkBackend>>,
	transactions: Vec<Arc<dyn NetworkBackend>>,
	unspent: Vec<Arc<dyn NetworkBackend>>,
	broadcast: Vec<Arc<dyn NetworkBackend>>,
	tx: Vec<Arc<dyn NetworkBackend>>,
}

impl RouteTable {
	/// A table with every sequence empty. Dispatching against it yields
	/// [`NetworkError::AllBackendsUnreachable`].
	pub fn empty() -> Self {
		Self::default()
	}

	/// A table routing every operation to the one given backend.
	pub fn single(backend: Arc<dyn NetworkBackend>) -> Self {
		Self {
			balance: vec![backend.clone()],
			transactions: vec![backend.clone()],
			unspent: vec![backend.clone()],
			broadcast: vec![backend.clone()],
			tx: vec![backend],
		}
	}

	/// The ordered sequence for `operation`.
	pub fn route(&self, operation: Operation) -> &[Arc<dyn NetworkBackend>] {
		match operation {
			Operation::GetBalance => &self.balance,
			Operation::GetTransactions => &self.transactions,
			Operation::GetUnspent => &self.unspent,
			Operation::BroadcastTx => &self.broadcast,
			Operation::GetTx => &self.tx,
		}
	}

	/// Replaces the sequence for `operation`.
	pub fn set_route(&mut self, operation: Operation, backends: Vec<Arc<dyn NetworkBackend>>) {
		match operation {
			Operation::GetBalance => self.balance = backends,
			Operation::GetTransactions => self.transactions = backends,
			Operation::GetUnspent => self.unspent = backends,
			Operation::BroadcastTx => self.broadcast = backends,
			Operation::GetTx => self.tx = backends,
		}
	}

	/// Builder form of [`RouteTable::set_route`].
	pub fn with_route(
		mut self,
		operation: Operation,
		backends: Vec<Arc<dyn NetworkBackend>>,
	) -> Self {
		self.set_route(operation, backends);
		self
	}
}

impl std::fmt::Debug for RouteTable {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let names = |backends: &[Arc<dyn NetworkBackend>]| {
			backends.iter().map(|b| b.name().to_string()).collect::<Vec<_>>()
		};
		f.debug_struct("RouteTable")
			.field("balance", &names(&self.balance))
			.field("transactions", &names(&self.transactions))
			.field("unspent", &names(&self.unspent))
			.field("broadcast", &names(&self.broadcast))
			.field("tx", &names(&self.tx))
			.finish()
	}
}

/// Aggregating client over the configured backend adapters.
///
/// Exposes the canonical capability set and dispatches each call through
/// the route table's ordered failover walk.
#[derive(Debug, Clone)]
pub struct NetworkClient {
	network: Network,
	routes: RouteTable,
}

impl NetworkClient {
	/// A client over an explicit route table.
	pub fn new(network: Network, routes: RouteTable) -> Self {
		Self { network, routes }
	}

	/// A main-network client routed to the public block explorer.
	pub fn mainnet() -> Result<Self, anyhow::Error> {
		let explorer: Arc<dyn NetworkBackend> = Arc::new(Explorer::mainnet()?);
		Ok(Self::new(Network::Mainnet, RouteTable::single(explorer)))
	}

	/// A test-network client with no routed backends. Calls fail with
	/// [`NetworkError::AllBackendsUnreachable`] until a node is connected.
	pub fn testnet() -> Self {
		Self::new(Network::Testnet, RouteTable::empty())
	}

	/// Which network this client serves
	pub fn network(&self) -> Network {
		self.network
	}

	/// The current route table
	pub fn routes(&self) -> &RouteTable {
		&self.routes
	}

	/// Connects a full node and, when it serves this client's network,
	/// routes every operation to it. A node for a different network is
	/// still returned for direct use but leaves the routes untouched.
	pub fn connect_to_node(&mut self, config: &NodeConfig) -> Result<Arc<RpcNode>, anyhow::Error> {
		let node = Arc::new(RpcNode::new(config)?);
		if node.network() == self.network {
			self.routes = RouteTable::single(node.clone());
		}
		Ok(node)
	}

	/// Walks the operation's backend sequence in order.
	///
	/// Transient failures are absorbed and logged; application errors
	/// propagate unwrapped from the backend that produced them.
	async fn dispatch<'s, T, F>(&'s self, operation: Operation, call: F) -> Result<T, NetworkError>
	where
		F: Fn(&'s dyn NetworkBackend) -> BoxFuture<'s, Result<T, NetworkError>>,
	{
		for backend in self.routes.route(operation) {
			match call(backend.as_ref()).await {
				Ok(value) => {
					debug!(
						backend = backend.name(),
						operation = operation.as_str(),
						"backend call succeeded"
					);
					return Ok(value);
				}
				Err(error) if error.is_transient() => {
					warn!(
						backend = backend.name(),
						operation = operation.as_str(),
						error = %error,
						"backend unreachable, trying next"
					);
				}
				Err(error) => return Err(error),
			}
		}
		Err(NetworkError::AllBackendsUnreachable)
	}

	/// Confirmed-plus-unconfirmed balance of `address`, in ufoshi.
	pub async fn get_balance(&self, address: &str) -> Result<u64, NetworkError> {
		self.dispatch(Operation::GetBalance, move |backend| {
			backend.get_balance(address)
		})
		.await
	}

	/// Transaction ids touching `address`.
	pub async fn get_transactions(&self, address: &str) -> Result<Vec<String>, NetworkError> {
		self.dispatch(Operation::GetTransactions, move |backend| {
			backend.get_transactions(address)
		})
		.await
	}

	/// Unspent outputs spendable by `address`.
	pub async fn get_unspent(&self, address: &str) -> Result<Vec<Unspent>, NetworkError> {
		self.dispatch(Operation::GetUnspent, move |backend| {
			backend.get_unspent(address)
		})
		.await
	}

	/// Concatenated unspent outputs for several addresses.
	pub async fn get_unspents(&self, addresses: &[&str]) -> Result<Vec<Unspent>, NetworkError> {
		let mut unspent = Vec::new();
		for address in addresses {
			unspent.extend(self.get_unspent(address).await?);
		}
		Ok(unspent)
	}

	/// Raw transaction payload for `txid`, as the winning backend shapes it.
	pub async fn get_tx(&self, txid: &str) -> Result<Value, NetworkError> {
		self.dispatch(Operation::GetTx, move |backend| backend.get_tx(txid))
			.await
	}

	/// Broadcasts a raw transaction, returning the txid the accepting
	/// backend reported.
	///
	/// A decline (the backend rejected the transaction without failing,
	/// or reported an empty txid) advances the walk like a transient
	/// failure; when every backend is unreachable or declines, the walk
	/// ends in [`NetworkError::AllBackendsUnreachable`].
	pub async fn broadcast_tx(&self, tx_hex: &str) -> Result<String, NetworkError> {
		for backend in self.routes.route(Operation::BroadcastTx) {
			match backend.broadcast_tx(tx_hex).await {
				Ok(Some(txid)) if !txid.is_empty() => {
					debug!(backend = backend.name(), txid = %txid, "transaction broadcast");
					return Ok(txid);
				}
				Ok(_) => {
					warn!(
						backend = backend.name(),
						"backend declined broadcast, trying next"
					);
				}
				Err(error) if error.is_transient() => {
					warn!(
						backend = backend.name(),
						error = %error,
						"backend unreachable, trying next"
					);
				}
				Err(error) => return Err(error),
			}
		}
		Err(NetworkError::AllBackendsUnreachable)
	}
}
