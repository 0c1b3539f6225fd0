//! Explorer backend behavior against a mocked REST API.

use mockito::Server;
use serde_json::{json, Value};

use ufobit::models::ExplorerConfig;
use ufobit::services::network::{Explorer, NetworkBackend, NetworkError};

const ADDRESS: &str = "UgdMm8b2WpGX5EdFxSry9VuJnyY8SWsZh3";

fn explorer_for(server: &Server) -> Explorer {
	Explorer::new(ExplorerConfig::new(server.url())).unwrap()
}

#[tokio::test]
async fn test_get_balance_parses_bare_ufoshi_body() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("GET", format!("/addr/{}/balance", ADDRESS).as_str())
		.with_status(200)
		.with_body("5000000000")
		.create_async()
		.await;

	let explorer = explorer_for(&server);
	assert_eq!(explorer.get_balance(ADDRESS).await.unwrap(), 5_000_000_000);
	mock.assert_async().await;
}

#[tokio::test]
async fn test_get_transactions_collects_txids() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("GET", format!("/addr/{}", ADDRESS).as_str())
		.with_status(200)
		.with_body(
			json!({
				"addrStr": ADDRESS,
				"txs": [{"txid": "aaa111"}, {"txid": "bbb222"}]
			})
			.to_string(),
		)
		.create_async()
		.await;

	let explorer = explorer_for(&server);
	assert_eq!(
		explorer.get_transactions(ADDRESS).await.unwrap(),
		vec!["aaa111".to_string(), "bbb222".to_string()]
	);
	mock.assert_async().await;
}

#[tokio::test]
async fn test_get_unspent_normalizes_and_reverses_order() {
	let mut server = Server::new_async().await;
	// Oldest-first wire order; the adapter reverses to most-recent-first
	let mock = server
		.mock("GET", format!("/addr/{}/utxo", ADDRESS).as_str())
		.with_status(200)
		.with_body(
			json!([
				{
					"satoshis": "100000000",
					"confirmations": 9,
					"scriptPubKey": "76a914aa",
					"txid": "oldest",
					"vout": 1,
					"address": ADDRESS
				},
				{
					"satoshis": "500000000",
					"confirmations": 3,
					"scriptPubKey": "76a914ee",
					"txid": "newest",
					"vout": 0,
					"address": ADDRESS
				}
			])
			.to_string(),
		)
		.create_async()
		.await;

	let explorer = explorer_for(&server);
	let unspent = explorer.get_unspent(ADDRESS).await.unwrap();

	assert_eq!(unspent.len(), 2);
	assert_eq!(unspent[0].txid, "newest");
	assert_eq!(unspent[0].amount, 500_000_000);
	assert_eq!(unspent[0].confirmations, 3);
	assert!(unspent[0].segwit);
	assert_eq!(unspent[1].txid, "oldest");
	mock.assert_async().await;
}

#[tokio::test]
async fn test_get_unspent_malformed_entry_is_backend_error() {
	let mut server = Server::new_async().await;
	server
		.mock("GET", format!("/addr/{}/utxo", ADDRESS).as_str())
		.with_status(200)
		.with_body(json!([{"satoshis": "1"}]).to_string())
		.create_async()
		.await;

	let explorer = explorer_for(&server);
	let error = explorer.get_unspent(ADDRESS).await.unwrap_err();
	assert!(matches!(error, NetworkError::Backend { .. }));
}

#[tokio::test]
async fn test_broadcast_accepted_returns_txid() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("POST", "/tx/send")
		.match_header("content-type", "application/x-www-form-urlencoded")
		.match_body("rawtx=0100beef")
		.with_status(200)
		.with_body(json!({"txid": "accepted-txid"}).to_string())
		.create_async()
		.await;

	let explorer = explorer_for(&server);
	assert_eq!(
		explorer.broadcast_tx("0100beef").await.unwrap(),
		Some("accepted-txid".to_string())
	);
	mock.assert_async().await;
}

#[tokio::test]
async fn test_broadcast_declined_body_is_not_an_error() {
	let mut server = Server::new_async().await;
	server
		.mock("POST", "/tx/send")
		.with_status(200)
		.with_body("0")
		.create_async()
		.await;

	let explorer = explorer_for(&server);
	assert_eq!(explorer.broadcast_tx("0100beef").await.unwrap(), None);
}

#[tokio::test]
async fn test_broadcast_empty_txid_is_a_decline() {
	let mut server = Server::new_async().await;
	server
		.mock("POST", "/tx/send")
		.with_status(200)
		.with_body(json!({"txid": ""}).to_string())
		.create_async()
		.await;

	let explorer = explorer_for(&server);
	assert_eq!(explorer.broadcast_tx("0100beef").await.unwrap(), None);
}

#[tokio::test]
async fn test_get_tx_returns_payload() {
	let mut server = Server::new_async().await;
	server
		.mock("GET", "/tx/abc123")
		.with_status(200)
		.with_body(json!({"txid": "abc123", "confirmations": 7}).to_string())
		.create_async()
		.await;

	let explorer = explorer_for(&server);
	let tx = explorer.get_tx("abc123").await.unwrap();
	assert_eq!(tx["txid"], "abc123");
}

#[tokio::test]
async fn test_get_tx_not_found_marker_is_null() {
	let mut server = Server::new_async().await;
	server
		.mock("GET", "/tx/missing")
		.with_status(200)
		.with_body("0")
		.create_async()
		.await;

	let explorer = explorer_for(&server);
	assert_eq!(explorer.get_tx("missing").await.unwrap(), Value::Null);
}

#[tokio::test]
async fn test_error_status_is_fatal_backend_error() {
	let mut server = Server::new_async().await;
	server
		.mock("GET", format!("/addr/{}/balance", ADDRESS).as_str())
		.with_status(404)
		.with_body("Not Found")
		.create_async()
		.await;

	let explorer = explorer_for(&server);
	let error = explorer.get_balance(ADDRESS).await.unwrap_err();
	assert!(matches!(error, NetworkError::Backend { .. }));
	assert!(!error.is_transient());
	assert!(error.to_string().contains("404"));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transient() {
	// Nothing listens on this port
	let explorer = Explorer::new(ExplorerConfig::new("http://127.0.0.1:1")).unwrap();

	let error = explorer.get_balance(ADDRESS).await.unwrap_err();
	assert!(error.is_transient());
}
