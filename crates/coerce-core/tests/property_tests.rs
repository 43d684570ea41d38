use std::cmp::Ordering;

use chrono::{TimeZone, Utc};
use coerce_core::{CoerceError, Converter, DynamicValue};
use proptest::prelude::*;

fn utc_seconds(secs: i64) -> DynamicValue {
    DynamicValue::from(Utc.timestamp_opt(secs, 0).unwrap())
}

fn integer_value() -> impl Strategy<Value = DynamicValue> {
    prop_oneof![
        any::<i8>().prop_map(DynamicValue::from),
        any::<i16>().prop_map(DynamicValue::from),
        any::<i32>().prop_map(DynamicValue::from),
        any::<i64>().prop_map(DynamicValue::from),
        any::<isize>().prop_map(DynamicValue::from),
        any::<u8>().prop_map(DynamicValue::from),
        any::<u16>().prop_map(DynamicValue::from),
        any::<u32>().prop_map(DynamicValue::from),
        any::<u64>().prop_map(DynamicValue::from),
        any::<usize>().prop_map(DynamicValue::from),
    ]
}

fn in_universe_scalar() -> impl Strategy<Value = DynamicValue> {
    prop_oneof![
        integer_value(),
        any::<bool>().prop_map(DynamicValue::from),
        ".*".prop_map(DynamicValue::from),
        proptest::num::f32::NORMAL.prop_map(DynamicValue::from),
        proptest::num::f64::NORMAL.prop_map(DynamicValue::from),
        (0i64..4_102_444_800).prop_map(utc_seconds),
    ]
}

/// Sequences of mixed, nested and null elements
fn in_universe_sequence() -> impl Strategy<Value = DynamicValue> {
    let leaf = prop_oneof![
        4 => in_universe_scalar(),
        1 => Just(DynamicValue::Null),
    ];
    let element = leaf.prop_recursive(3, 32, 4, |inner| {
        proptest::collection::vec(inner, 0..4).prop_map(DynamicValue::Sequence)
    });
    proptest::collection::vec(element, 0..6).prop_map(DynamicValue::Sequence)
}

proptest! {
    #[test]
    fn prop_same_kind_conversion_is_identity(x in in_universe_scalar()) {
        let c = Converter::new();
        prop_assert_eq!(c.to(&x, &x), Ok(x.clone()));
    }

    #[test]
    fn prop_sequence_is_its_own_hint(x in in_universe_sequence()) {
        let c = Converter::new();
        prop_assert_eq!(c.to(&x, &x), Ok(x.clone()));
    }

    #[test]
    fn prop_u8_accepts_exactly_its_range(v in any::<i64>()) {
        let c = Converter::new();
        let result = c.to_type::<u8>(&DynamicValue::from(v));
        match v {
            0..=255 => prop_assert_eq!(result, Ok(v as u8)),
            _ if v < 0 => prop_assert!(matches!(
                result,
                Err(CoerceError::NegativeToUnsigned { .. })
            ), "expected NegativeToUnsigned, got {:?}", result),
            _ => prop_assert!(matches!(result, Err(CoerceError::Overflow { .. })), "expected Overflow, got {:?}", result),
        }
    }

    #[test]
    fn prop_i16_from_text_matches_native_parse(v in any::<i64>()) {
        let c = Converter::new();
        let result = c.to_type::<i16>(&DynamicValue::from(v.to_string()));
        match i16::try_from(v) {
            Ok(expected) => prop_assert_eq!(result, Ok(expected)),
            Err(_) => prop_assert!(matches!(result, Err(CoerceError::Overflow { .. })), "expected Overflow, got {:?}", result),
        }
    }

    #[test]
    fn prop_sequence_fails_at_first_bad_element(
        good in proptest::collection::vec(any::<u32>(), 0..8),
        tail in proptest::collection::vec(any::<u32>(), 0..8),
    ) {
        let c = Converter::new();
        let mut items: Vec<DynamicValue> = good.iter().map(|v| v.to_string().into()).collect();
        items.push("not-a-number".into());
        items.extend(tail.iter().map(|v| DynamicValue::from(v.to_string())));

        let result = c.to_sequence::<u64>(&DynamicValue::Sequence(items));
        prop_assert!(
            matches!(&result, Err(CoerceError::Parse { input, .. }) if input == "not-a-number"),
            "expected Parse error on \"not-a-number\", got {:?}", result
        );
    }

    #[test]
    fn prop_integer_compare_matches_native_order(a in any::<i64>(), b in any::<i64>()) {
        let c = Converter::new();
        prop_assert_eq!(
            c.compare(&DynamicValue::from(a), &DynamicValue::from(b.to_string())),
            Ok(a.cmp(&b))
        );
    }

    #[test]
    fn prop_compare_is_antisymmetric_for_timestamps(
        a in 0i64..4_102_444_800,
        b in 0i64..4_102_444_800,
    ) {
        let c = Converter::new();
        let ta = utc_seconds(a);
        let tb = utc_seconds(b);
        let forward = c.compare(&ta, &tb).unwrap();
        let backward = c.compare(&tb, &ta).unwrap();
        prop_assert_eq!(forward, backward.reverse());
        prop_assert_eq!(forward == Ordering::Equal, a == b);
    }
}
