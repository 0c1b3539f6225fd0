//! Shared mocks and fixtures for the integration suite.

use async_trait::async_trait;
use mockall::mock;
use serde_json::Value;

use ufobit::models::{NodeConfig, Unspent};
use ufobit::services::network::{NetworkBackend, NetworkError};

mock! {
	pub Backend {}

	#[async_trait]
	impl NetworkBackend for Backend {
		fn name(&self) -> &'static str;
		async fn get_balance(&self, address: &str) -> Result<u64, NetworkError>;
		async fn get_transactions(&self, address: &str) -> Result<Vec<String>, NetworkError>;
		async fn get_unspent(&self, address: &str) -> Result<Vec<Unspent>, NetworkError>;
		async fn broadcast_tx(&self, tx_hex: &str) -> Result<Option<String>, NetworkError>;
		async fn get_tx(&self, txid: &str) -> Result<Value, NetworkError>;
	}
}

/// A mock backend with its log name preconfigured.
pub fn named_backend(name: &'static str) -> MockBackend {
	let mut backend = MockBackend::new();
	backend.expect_name().return_const(name);
	backend
}

/// A canonical unspent output for assertions.
pub fn sample_unspent(txid: &str, amount: u64) -> Unspent {
	Unspent {
		amount,
		confirmations: 3,
		script: "76a914ee".to_string(),
		txid: txid.to_string(),
		vout: 0,
		segwit: true,
	}
}

/// Node configuration pointing at a local mock server.
pub fn node_config_for(server: &mockito::Server) -> NodeConfig {
	let (host, port) = server
		.host_with_port()
		.rsplit_once(':')
		.map(|(host, port)| (host.to_string(), port.parse::<u16>().unwrap()))
		.unwrap();
	NodeConfig::new("user", "pass", host, port)
}

/// `Authorization` header value matching [`node_config_for`] credentials
/// (base64 of `user:pass`).
pub const BASIC_AUTH_HEADER: &str = "Basic dXNlcjpwYXNz";
