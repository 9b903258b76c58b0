//! Property-based tests for the codec laws: round-tripping, normalization
//! idempotence, key-order preservation, output hygiene, and delimiter
//! independence, checked across generated value trees.

use proptest::prelude::*;
use toon_codec::{decode, encode, DecodeOptions, Delimiter, EncodeOptions, Value};

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|i| Value::Number(f64::from(i))),
        (-1.0e12..1.0e12f64).prop_map(Value::Number),
        any::<String>().prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::vec(("[a-z_][a-z0-9_.]{0,6}", inner), 0..5)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

/// The empty root object encodes to the empty string, which the decoder
/// rejects as empty input; every other tree must survive the trip.
fn is_empty_root_object(value: &Value) -> bool {
    matches!(value, Value::Object(map) if map.is_empty())
}

proptest! {
    #[test]
    fn prop_round_trip(value in arb_value()) {
        let value = value.normalize();
        prop_assume!(!is_empty_root_object(&value));

        let text = encode(&value, &EncodeOptions::default()).unwrap();
        let back = decode(&text, &DecodeOptions::default())
            .unwrap_or_else(|e| panic!("decode failed: {e}\ninput was:\n{text}"));
        prop_assert_eq!(back, value);
    }

    #[test]
    fn prop_normalize_is_idempotent(value in arb_value()) {
        let once = value.clone().normalize();
        prop_assert_eq!(once.clone().normalize(), once);
    }

    #[test]
    fn prop_key_order_preserved(value in arb_value()) {
        let value = value.normalize();
        prop_assume!(!is_empty_root_object(&value));

        if let Value::Object(map) = &value {
            let text = encode(&value, &EncodeOptions::default()).unwrap();
            let back = decode(&text, &DecodeOptions::default()).unwrap();
            let before: Vec<_> = map.keys().cloned().collect();
            let after: Vec<_> = back.as_object().unwrap().keys().cloned().collect();
            prop_assert_eq!(before, after);
        }
    }

    #[test]
    fn prop_no_trailing_whitespace(value in arb_value()) {
        let value = value.normalize();
        let text = encode(&value, &EncodeOptions::default()).unwrap();
        prop_assert!(!text.ends_with('\n'));
        for line in text.lines() {
            prop_assert_eq!(line, line.trim_end());
        }
    }

    #[test]
    fn prop_delimiter_independence(value in arb_value()) {
        let value = value.normalize();
        prop_assume!(!is_empty_root_object(&value));

        for delimiter in [Delimiter::Comma, Delimiter::Tab, Delimiter::Pipe] {
            let options = EncodeOptions::new().with_delimiter(delimiter);
            let text = encode(&value, &options).unwrap();
            let back = decode(&text, &DecodeOptions::default())
                .unwrap_or_else(|e| panic!("decode failed: {e}\ninput was:\n{text}"));
            prop_assert_eq!(&back, &value, "delimiter {:?}", delimiter);
        }
    }

    #[test]
    fn prop_strict_acceptance_implies_lenient(value in arb_value()) {
        let value = value.normalize();
        prop_assume!(!is_empty_root_object(&value));

        let text = encode(&value, &EncodeOptions::default()).unwrap();
        let strict = decode(&text, &DecodeOptions::default()).unwrap();
        let lenient = decode(&text, &DecodeOptions::lenient()).unwrap();
        prop_assert_eq!(strict, lenient);
    }

    #[test]
    fn prop_length_marker_round_trip(value in arb_value()) {
        let value = value.normalize();
        prop_assume!(!is_empty_root_object(&value));

        let options = EncodeOptions::new().with_length_marker('#');
        let text = encode(&value, &options).unwrap();
        let back = decode(&text, &DecodeOptions::default())
            .unwrap_or_else(|e| panic!("decode failed: {e}\ninput was:\n{text}"));
        prop_assert_eq!(back, value);
    }
}
