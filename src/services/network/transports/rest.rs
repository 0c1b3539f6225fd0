//! REST transport for block-explorer backends.
//!
//! One request per call, no retry, no redirect override. The raw response
//! handle is returned so adapters can inspect status and body lazily;
//! only connection-level failures are classified here.

use anyhow::Context;
use reqwest::Response;

use super::super::error::NetworkError;
use super::DEFAULT_TIMEOUT;

/// A retry-free REST request executor
#[derive(Debug, Clone)]
pub struct RestTransport {
	client: reqwest::Client,
}

impl RestTransport {
	/// Creates a transport with the fixed request timeout.
	pub fn new() -> Result<Self, anyhow::Error> {
		let client = reqwest::Client::builder()
			.timeout(DEFAULT_TIMEOUT)
			.build()
			.context("failed to build HTTP client for REST transport")?;
		Ok(Self { client })
	}

	/// Executes one GET request.
	///
	/// # Errors
	/// [`NetworkError::Connection`] for refused/reset/DNS/timeout failures;
	/// other request failures are fatal. HTTP status handling is left to
	/// the caller.
	pub async fn get(&self, url: &str) -> Result<Response, NetworkError> {
		self.client
			.get(url)
			.send()
			.await
			.map_err(NetworkError::from_reqwest)
	}

	/// Executes one form-encoded POST request
	/// (`application/x-www-form-urlencoded`).
	pub async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<Response, NetworkError> {
		self.client
			.post(url)
			.form(form)
			.send()
			.await
			.map_err(NetworkError::from_reqwest)
	}
}
