//! Conversion between decimal UFO amounts and integer ufoshi.
//!
//! There is exactly one canonical smallest-unit scale for the whole crate:
//! 1 UFO = [`UFOSHI_PER_UFO`] ufoshi. Every adapter funnels raw backend
//! amounts through this module before constructing a canonical model,
//! and there is no per-call precision override.
//!
//! Parsing is exact fixed-point arithmetic over the decimal text; amounts
//! never pass through binary floating point.

use serde_json::Value;
use thiserror::Error;

/// Ufoshi per whole UFO. The single canonical smallest-unit scale.
pub const UFOSHI_PER_UFO: u64 = 100_000_000;

/// Number of fractional decimal digits one UFO carries.
pub const UFO_DECIMALS: usize = 8;

/// Conversion failures.
///
/// Adapters surface these as backend application errors: a bad amount in a
/// response means the response itself is malformed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CurrencyError {
	/// The input is not a plain decimal number
	#[error("malformed decimal amount: {0:?}")]
	Malformed(String),

	/// Negative amounts have no smallest-unit representation
	#[error("negative amount: {0:?}")]
	Negative(String),

	/// More significant fractional digits than the canonical scale carries
	#[error("amount has more than {UFO_DECIMALS} fractional digits: {0:?}")]
	TooPrecise(String),

	/// The amount does not fit the smallest-unit integer range
	#[error("amount overflows the smallest-unit range: {0:?}")]
	Overflow(String),
}

/// Converts a decimal UFO amount to integer ufoshi.
///
/// Accepts plain decimal text (`"21"`, `"21.5"`, `".5"`, `"0.00000001"`).
/// Fractional digits beyond the canonical scale are accepted only when
/// zero; anything else is rejected rather than silently rounded.
///
/// # Errors
/// Returns a [`CurrencyError`] for malformed, negative, too-precise, or
/// out-of-range input.
pub fn ufo_to_ufoshi(amount: &str) -> Result<u64, CurrencyError> {
	let text = amount.trim();
	if text.is_empty() {
		return Err(CurrencyError::Malformed(amount.to_string()));
	}
	if text.starts_with('-') {
		return Err(CurrencyError::Negative(amount.to_string()));
	}
	let text = text.strip_prefix('+').unwrap_or(text);

	let (integral, fraction) = match text.split_once('.') {
		Some((integral, fraction)) => (integral, fraction),
		None => (text, ""),
	};
	if integral.is_empty() && fraction.is_empty() {
		return Err(CurrencyError::Malformed(amount.to_string()));
	}
	if !integral.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
		return Err(CurrencyError::Malformed(amount.to_string()));
	}

	// Digits beyond the canonical scale must be zero.
	let (fraction, excess) = fraction.split_at(fraction.len().min(UFO_DECIMALS));
	if excess.bytes().any(|b| b != b'0') {
		return Err(CurrencyError::TooPrecise(amount.to_string()));
	}

	let whole: u64 = if integral.is_empty() {
		0
	} else {
		integral
			.parse()
			.map_err(|_| CurrencyError::Overflow(amount.to_string()))?
	};

	let mut fractional: u64 = 0;
	if !fraction.is_empty() {
		fractional = fraction
			.parse()
			.map_err(|_| CurrencyError::Malformed(amount.to_string()))?;
		for _ in fraction.len()..UFO_DECIMALS {
			fractional *= 10;
		}
	}

	whole
		.checked_mul(UFOSHI_PER_UFO)
		.and_then(|ufoshi| ufoshi.checked_add(fractional))
		.ok_or_else(|| CurrencyError::Overflow(amount.to_string()))
}

/// Converts integer ufoshi to canonical decimal UFO text.
///
/// Integral amounts render without a fraction; otherwise trailing zeros
/// are trimmed (`150_000_000` → `"1.5"`).
pub fn ufoshi_to_ufo(amount: u64) -> String {
	let whole = amount / UFOSHI_PER_UFO;
	let fractional = amount % UFOSHI_PER_UFO;
	if fractional == 0 {
		return whole.to_string();
	}
	let fraction = format!("{fractional:0width$}", width = UFO_DECIMALS);
	format!("{}.{}", whole, fraction.trim_end_matches('0'))
}

/// Parses an amount that is already denominated in ufoshi.
///
/// Explorer backends report amounts as integer smallest-unit values,
/// sometimes as a JSON number and sometimes as a decimal-integer string;
/// both are accepted, fractions are not.
pub fn parse_ufoshi(value: &Value) -> Result<u64, CurrencyError> {
	match value {
		Value::Number(number) => number
			.as_u64()
			.ok_or_else(|| CurrencyError::Malformed(number.to_string())),
		Value::String(text) => text
			.trim()
			.parse()
			.map_err(|_| CurrencyError::Malformed(text.clone())),
		other => Err(CurrencyError::Malformed(other.to_string())),
	}
}

/// Converts a JSON amount field (number or numeric string) to ufoshi.
///
/// JSON numbers keep their exact decimal text via serde_json's
/// arbitrary-precision representation, so node amounts reach the parser
/// unrounded.
pub fn json_to_ufoshi(value: &Value) -> Result<u64, CurrencyError> {
	match value {
		Value::Number(number) => ufo_to_ufoshi(&number.to_string()),
		Value::String(text) => ufo_to_ufoshi(text),
		other => Err(CurrencyError::Malformed(other.to_string())),
	}
}
