//! Property-based tests for currency unit conversion.

use proptest::{prelude::*, test_runner::Config};

use ufobit::utils::currency::{
	json_to_ufoshi, parse_ufoshi, ufo_to_ufoshi, ufoshi_to_ufo, UFOSHI_PER_UFO,
};

// Strategy for amounts that fit the smallest-unit range with headroom
fn arb_ufoshi() -> impl Strategy<Value = u64> {
	0u64..=(u64::MAX / UFOSHI_PER_UFO) * UFOSHI_PER_UFO
}

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	#[test]
	fn prop_ufoshi_round_trips_through_decimal_text(amount in arb_ufoshi()) {
		let text = ufoshi_to_ufo(amount);
		prop_assert_eq!(ufo_to_ufoshi(&text).unwrap(), amount);
	}

	#[test]
	fn prop_rendered_text_never_has_trailing_fraction_zeros(amount in arb_ufoshi()) {
		let text = ufoshi_to_ufo(amount);
		if text.contains('.') {
			prop_assert!(!text.ends_with('0'));
			prop_assert!(!text.ends_with('.'));
		}
	}

	#[test]
	fn prop_whole_and_fraction_compose(whole in 0u64..1_000_000u64, fraction in 0u64..UFOSHI_PER_UFO) {
		let text = format!("{}.{:08}", whole, fraction);
		prop_assert_eq!(
			ufo_to_ufoshi(&text).unwrap(),
			whole * UFOSHI_PER_UFO + fraction
		);
	}

	#[test]
	fn prop_ninth_fractional_digit_rejected(whole in 0u64..1_000u64, digit in 1u32..10u32) {
		let text = format!("{}.00000000{}", whole, digit);
		prop_assert!(ufo_to_ufoshi(&text).is_err());
	}

	#[test]
	fn prop_negative_always_rejected(amount in arb_ufoshi()) {
		let text = format!("-{}", ufoshi_to_ufo(amount));
		prop_assert!(ufo_to_ufoshi(&text).is_err());
	}

	#[test]
	fn prop_json_string_and_number_amounts_agree(amount in arb_ufoshi()) {
		let text = ufoshi_to_ufo(amount);
		let as_string = serde_json::Value::String(text.clone());
		let as_number: serde_json::Value = serde_json::from_str(&text).unwrap();

		prop_assert_eq!(json_to_ufoshi(&as_string).unwrap(), amount);
		prop_assert_eq!(json_to_ufoshi(&as_number).unwrap(), amount);
	}

	#[test]
	fn prop_ufoshi_integer_parses_from_either_shape(amount in any::<u64>()) {
		let as_number: serde_json::Value = serde_json::from_str(&amount.to_string()).unwrap();
		let as_string = serde_json::Value::String(amount.to_string());

		prop_assert_eq!(parse_ufoshi(&as_number).unwrap(), amount);
		prop_assert_eq!(parse_ufoshi(&as_string).unwrap(), amount);
	}
}
