//! Utility modules shared across the crate.
//!
//! - `currency`: conversion between decimal UFO and integer ufoshi

pub mod currency;

pub use currency::{
	json_to_ufoshi, parse_ufoshi, ufo_to_ufoshi, ufoshi_to_ufo, CurrencyError, UFOSHI_PER_UFO,
};
