//! Network selection and backend configuration.
//!
//! Configuration is created once at setup and immutable thereafter; backend
//! adapters hold no per-call mutable state, so a configured adapter is safe
//! to share across concurrent operations.

use serde::{Deserialize, Serialize};

/// Which UFO network a backend serves.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Network {
	/// The production network
	#[default]
	Mainnet,
	/// The test network
	Testnet,
}

impl Network {
	/// Returns the network as a string slug
	pub fn as_str(&self) -> &'static str {
		match self {
			Network::Mainnet => "mainnet",
			Network::Testnet => "testnet",
		}
	}
}

/// Connection settings for a full node's JSON-RPC interface.
///
/// Credentials end up embedded in the transport's single pre-configured
/// URL (user-info component) and are sent as HTTP basic auth.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeConfig {
	/// RPC username
	pub user: String,

	/// RPC password
	pub password: String,

	/// Node host
	pub host: String,

	/// Node RPC port
	pub port: u16,

	/// Connect over HTTPS instead of HTTP
	pub use_https: bool,

	/// Verify the node's TLS certificate (only meaningful with `use_https`)
	pub tls_verify: bool,

	/// Optional URL path under the host root
	pub path: String,

	/// Which network this node serves
	pub network: Network,
}

impl NodeConfig {
	/// Creates a config with the conventional defaults: plain HTTP on
	/// localhost-style deployments, mainnet, no extra path.
	pub fn new(user: impl Into<String>, password: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
		Self {
			user: user.into(),
			password: password.into(),
			host: host.into(),
			port,
			use_https: false,
			tls_verify: true,
			path: String::new(),
			network: Network::Mainnet,
		}
	}

	/// Switches the config to HTTPS
	pub fn with_https(mut self, tls_verify: bool) -> Self {
		self.use_https = true;
		self.tls_verify = tls_verify;
		self
	}

	/// Sets the URL path under the host root
	pub fn with_path(mut self, path: impl Into<String>) -> Self {
		self.path = path.into();
		self
	}

	/// Sets which network the node serves
	pub fn with_network(mut self, network: Network) -> Self {
		self.network = network;
		self
	}
}

/// Settings for a block-explorer REST backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExplorerConfig {
	/// Base API endpoint, without a trailing slash
	pub endpoint: String,
}

impl ExplorerConfig {
	/// The UFO block explorer serving the main network
	pub const MAIN_ENDPOINT: &'static str = "https://explorer.ufobject.com/api";

	/// Creates a config for a custom explorer deployment
	pub fn new(endpoint: impl Into<String>) -> Self {
		Self {
			endpoint: endpoint.into(),
		}
	}
}

impl Default for ExplorerConfig {
	fn default() -> Self {
		Self::new(Self::MAIN_ENDPOINT)
	}
}
