//! Block-explorer backend adapter.
//!
//! Speaks the UFO block explorer's REST API and normalizes its response
//! shapes into the canonical models. The explorer reports unspent amounts
//! as integer ufoshi (field named `satoshis`, usually as a decimal-integer
//! string) and marks "not found" / "rejected" with a bare `0` body.

use async_trait::async_trait;
use reqwest::Response;
use serde_json::Value;

use crate::models::{ExplorerConfig, Unspent};
use crate::utils::currency::parse_ufoshi;

use super::super::backend::NetworkBackend;
use super::super::error::NetworkError;
use super::super::transports::RestTransport;

/// Body the explorer returns for missing transactions and rejected
/// broadcasts
const DECLINED_BODY: &str = "0";

/// Adapter for the UFO block-explorer REST API.
///
/// Does not implement a capability beyond the canonical five; holds no
/// per-call mutable state and is safe for concurrent reuse.
#[derive(Debug, Clone)]
pub struct Explorer {
	config: ExplorerConfig,
	transport: RestTransport,
}

impl Explorer {
	/// Creates an adapter for a custom explorer deployment.
	pub fn new(config: ExplorerConfig) -> Result<Self, anyhow::Error> {
		Ok(Self {
			config,
			transport: RestTransport::new()?,
		})
	}

	/// Creates an adapter for the main-network explorer.
	pub fn mainnet() -> Result<Self, anyhow::Error> {
		Self::new(ExplorerConfig::default())
	}

	/// The configured base endpoint
	pub fn endpoint(&self) -> &str {
		&self.config.endpoint
	}

	fn url(&self, path: &str) -> String {
		format!("{}{}", self.config.endpoint, path)
	}

	/// Rejects non-success statuses; the explorer has no in-band error
	/// envelope, so anything >= 400 is a backend application error.
	fn check_status(response: Response) -> Result<Response, NetworkError> {
		let status = response.status();
		if status.as_u16() >= 400 {
			return Err(NetworkError::backend(
				format!("explorer responded with status code {}", status.as_u16()),
				None,
			));
		}
		Ok(response)
	}

	async fn read_json(response: Response) -> Result<Value, NetworkError> {
		let text = Self::read_text(response).await?;
		serde_json::from_str(&text).map_err(|e| {
			NetworkError::backend(
				format!("malformed explorer response: {} (body: {})", e, text),
				Some(Box::new(e)),
			)
		})
	}

	async fn read_text(response: Response) -> Result<String, NetworkError> {
		response.text().await.map_err(NetworkError::from_reqwest)
	}

	fn parse_unspent_entry(entry: &Value) -> Result<Unspent, NetworkError> {
		let amount = entry
			.get("satoshis")
			.or_else(|| entry.get("value"))
			.ok_or_else(|| NetworkError::backend("unspent entry missing amount field", None))?;
		let address = Self::str_field(entry, &["address"])?;

		Ok(Unspent::from_address(
			parse_ufoshi(amount)?,
			Self::u64_field(entry, "confirmations")? as u32,
			Self::str_field(entry, &["scriptPubKey", "script"])?,
			Self::str_field(entry, &["txid", "tx_hash"])?,
			Self::u64_field(entry, "vout")
				.or_else(|_| Self::u64_field(entry, "tx_output_n"))? as u32,
			address,
		))
	}

	fn str_field<'a>(entry: &'a Value, names: &[&str]) -> Result<&'a str, NetworkError> {
		names
			.iter()
			.find_map(|name| entry.get(name))
			.and_then(Value::as_str)
			.ok_or_else(|| {
				NetworkError::backend(format!("unspent entry missing '{}' field", names[0]), None)
			})
	}

	fn u64_field(entry: &Value, name: &str) -> Result<u64, NetworkError> {
		entry.get(name).and_then(Value::as_u64).ok_or_else(|| {
			NetworkError::backend(format!("unspent entry missing '{}' field", name), None)
		})
	}
}

#[async_trait]
impl NetworkBackend for Explorer {
	fn name(&self) -> &str {
		"explorer"
	}

	/// `GET {endpoint}/addr/{address}/balance`; the explorer reports the
	/// balance already in ufoshi, as a bare integer body.
	async fn get_balance(&self, address: &str) -> Result<u64, NetworkError> {
		let response = self
			.transport
			.get(&self.url(&format!("/addr/{}/balance", address)))
			.await?;
		let body = Self::read_json(Self::check_status(response)?).await?;
		Ok(parse_ufoshi(&body)?)
	}

	/// `GET {endpoint}/addr/{address}`; collects txids from the `txs`
	/// array (`transactions` accepted as an alias).
	async fn get_transactions(&self, address: &str) -> Result<Vec<String>, NetworkError> {
		let response = self
			.transport
			.get(&self.url(&format!("/addr/{}", address)))
			.await?;
		let body = Self::read_json(Self::check_status(response)?).await?;

		let txs = body
			.get("txs")
			.or_else(|| body.get("transactions"))
			.and_then(Value::as_array)
			.ok_or_else(|| NetworkError::backend("address response missing 'txs' array", None))?;

		txs.iter()
			.map(|tx| {
				tx.get("txid")
					.or_else(|| tx.get("hash"))
					.and_then(Value::as_str)
					.map(str::to_string)
					.ok_or_else(|| NetworkError::backend("transaction entry missing 'txid'", None))
			})
			.collect()
	}

	/// `GET {endpoint}/addr/{address}/utxo`. The explorer lists outputs
	/// oldest-first, so the mapped entries are reversed to reach the
	/// common most-recent-first convention.
	async fn get_unspent(&self, address: &str) -> Result<Vec<Unspent>, NetworkError> {
		let response = self
			.transport
			.get(&self.url(&format!("/addr/{}/utxo", address)))
			.await?;
		let body = Self::read_json(Self::check_status(response)?).await?;

		let entries = body
			.as_array()
			.ok_or_else(|| NetworkError::backend("utxo response is not an array", None))?;

		let mut unspent = entries
			.iter()
			.map(Self::parse_unspent_entry)
			.collect::<Result<Vec<_>, _>>()?;
		unspent.reverse();
		Ok(unspent)
	}

	/// `POST {endpoint}/tx/send` with form body `rawtx={hex}`. A bare `0`
	/// body means the explorer declined the transaction.
	async fn broadcast_tx(&self, tx_hex: &str) -> Result<Option<String>, NetworkError> {
		let response = self
			.transport
			.post_form(&self.url("/tx/send"), &[("rawtx", tx_hex)])
			.await?;
		let text = Self::read_text(Self::check_status(response)?).await?;

		if text.trim() == DECLINED_BODY {
			return Ok(None);
		}

		let body: Value = serde_json::from_str(&text).map_err(|e| {
			NetworkError::backend(
				format!("malformed broadcast response: {} (body: {})", e, text),
				Some(Box::new(e)),
			)
		})?;
		// An empty txid is a decline, same as the bare-`0` body
		match body.get("txid").and_then(Value::as_str) {
			Some("") => Ok(None),
			Some(txid) => Ok(Some(txid.to_string())),
			None => Err(NetworkError::backend("broadcast response missing 'txid'", None)),
		}
	}

	/// `GET {endpoint}/tx/{txid}`. A bare `0` body is the explorer's
	/// not-found marker, surfaced as a null payload.
	async fn get_tx(&self, txid: &str) -> Result<Value, NetworkError> {
		let response = self
			.transport
			.get(&self.url(&format!("/tx/{}", txid)))
			.await?;
		let text = Self::read_text(Self::check_status(response)?).await?;

		if text.trim() == DECLINED_BODY {
			return Ok(Value::Null);
		}
		serde_json::from_str(&text).map_err(|e| {
			NetworkError::backend(
				format!("malformed transaction response: {} (body: {})", e, text),
				Some(Box::new(e)),
			)
		})
	}
}
