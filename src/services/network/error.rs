//! Network access error types.
//!
//! The taxonomy separates connectivity problems from application problems:
//!
//! - [`NetworkError::Connection`]: refused connection, reset, DNS failure,
//!   timeout. Transient; always eligible for failover.
//! - [`NetworkError::Backend`]: malformed response, backend-declared
//!   RPC/API error, unexpected HTTP status. Fatal for that call: the
//!   request itself, not the transport, is the problem, so failover never
//!   masks it.
//! - [`NetworkError::AllBackendsUnreachable`]: terminal dispatcher failure
//!   once every configured backend transiently failed (or the sequence was
//!   empty).

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for all network access operations
#[derive(Debug, Error)]
pub enum NetworkError {
	/// Connection-level failure: refused, reset, DNS failure, timeout
	#[error("connection failure: {message}")]
	Connection {
		message: String,
		#[source]
		source: Option<BoxError>,
	},

	/// Application-level failure declared by the backend or caused by a
	/// malformed response
	#[error("backend error: {message}")]
	Backend {
		message: String,
		#[source]
		source: Option<BoxError>,
	},

	/// Every configured backend for the operation was unreachable
	#[error("all configured backends are unreachable")]
	AllBackendsUnreachable,
}

impl NetworkError {
	/// Creates a transient connection failure
	pub fn connection(message: impl Into<String>, source: Option<BoxError>) -> Self {
		Self::Connection {
			message: message.into(),
			source,
		}
	}

	/// Creates a fatal backend application error
	pub fn backend(message: impl Into<String>, source: Option<BoxError>) -> Self {
		Self::Backend {
			message: message.into(),
			source,
		}
	}

	/// Whether this error is eligible for failover to the next backend
	pub fn is_transient(&self) -> bool {
		matches!(self, Self::Connection { .. })
	}

	/// Classifies a reqwest error: connection-level failures (refused,
	/// reset, DNS, timeout) are transient, everything else is fatal.
	pub fn from_reqwest(error: reqwest::Error) -> Self {
		let message = error.to_string();
		if error.is_connect() || error.is_timeout() {
			Self::connection(message, Some(Box::new(error)))
		} else {
			Self::backend(message, Some(Box::new(error)))
		}
	}
}

impl From<reqwest::Error> for NetworkError {
	fn from(error: reqwest::Error) -> Self {
		Self::from_reqwest(error)
	}
}

impl From<crate::utils::currency::CurrencyError> for NetworkError {
	fn from(error: crate::utils::currency::CurrencyError) -> Self {
		// A bad amount in a response means the response itself is malformed
		Self::backend(error.to_string(), Some(Box::new(error)))
	}
}
