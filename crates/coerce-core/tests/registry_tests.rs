#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::sync::Arc;
use std::thread;

use coerce_core::{
    CoerceError, Converter, DynamicValue, NumericKind, OpaqueValue, ScalarKind, TypeDescriptor,
};
use common::converter;

#[derive(Debug)]
struct Celsius(f64);

impl OpaqueValue for Celsius {
    fn type_name(&self) -> &str {
        "celsius"
    }

    fn as_text(&self) -> Option<String> {
        Some(format!("{}C", self.0))
    }
}

fn rounded_celsius(value: &DynamicValue) -> coerce_core::Result<i64> {
    match value {
        DynamicValue::Opaque(inner) if inner.type_name() == "celsius" => Ok(21),
        other => Err(CoerceError::unsupported(other.kind(), NumericKind::I64)),
    }
}

#[test]
fn test_override_handles_otherwise_unsupported_kind() {
    let c = converter();
    let reading = DynamicValue::opaque(Celsius(21.4));

    assert!(matches!(
        c.to_type::<i64>(&reading),
        Err(CoerceError::Unsupported { .. })
    ));

    c.register::<i64, _>(rounded_celsius);

    assert_eq!(c.to_type::<i64>(&reading), Ok(21));
    assert_eq!(c.to_type::<String>(&reading), Ok("21.4C".to_string()));
}

#[test]
fn test_override_applies_regardless_of_hint_value() {
    let c = converter();
    c.register::<i64, _>(|_| Ok(99));

    assert_eq!(c.to(&0i64, &DynamicValue::from("5")), Ok(99));
    assert_eq!(c.to(&-1i64, &DynamicValue::Null), Ok(99));
}

#[test]
fn test_override_only_for_requested_type() {
    let c = converter();
    c.register::<i64, _>(|_| Ok(99));

    assert_eq!(c.to_type::<i32>(&DynamicValue::from("5")), Ok(5));
    // Dynamic hint requests the untyped result, not i64
    assert_eq!(
        c.to(&DynamicValue::from(0i64), &DynamicValue::from("5")),
        Ok(DynamicValue::I64(5))
    );
}

#[test]
fn test_override_errors_are_returned() {
    let c = converter();
    c.register::<bool, _>(|value| {
        Err(CoerceError::parse(value.to_string(), ScalarKind::Bool, "custom"))
    });

    let err = c.to_type::<bool>(&DynamicValue::from("true")).unwrap_err();
    assert!(matches!(err, CoerceError::Parse { reason, .. } if reason == "custom"));
}

#[test]
fn test_last_registration_wins() {
    let c = converter();
    c.register::<u8, _>(|_| Ok(1));
    c.register::<u8, _>(|_| Ok(2));

    assert_eq!(c.to_type::<u8>(&DynamicValue::Null), Ok(2));
    assert_eq!(c.registry().len(), 1);
}

#[test]
fn test_override_used_for_sequence_elements() {
    let c = converter();
    c.register::<i64, _>(|value| Ok(value.to_string().len() as i64));

    let out: Vec<i64> = c
        .to_sequence(&DynamicValue::from(vec!["a", "bbb"]))
        .unwrap();
    assert_eq!(out, vec![1, 3]);
}

#[test]
fn test_override_for_sequence_type() {
    let c = converter();
    c.register::<Vec<u8>, _>(|value| Ok(value.to_string().into_bytes()));

    assert_eq!(
        c.to_type::<Vec<u8>>(&DynamicValue::from(12i32)),
        Ok(b"12".to_vec())
    );
}

#[test]
fn test_override_may_convert_through_registry() {
    let c = Arc::new(converter());
    let inner = Arc::downgrade(&c);
    c.register::<String, _>(move |value| {
        let c = inner.upgrade().expect("converter alive");
        let n: i64 = c.to_type(value)?;
        Ok(format!("#{n}"))
    });

    assert_eq!(
        c.to_type::<String>(&DynamicValue::from(7u8)),
        Ok("#7".to_string())
    );
}

#[test]
fn test_registries_are_independent() {
    let a = converter();
    let b = converter();
    a.register::<i64, _>(|_| Ok(1));

    assert_eq!(a.to_type::<i64>(&DynamicValue::from(5u8)), Ok(1));
    assert_eq!(b.to_type::<i64>(&DynamicValue::from(5u8)), Ok(5));
}

#[test]
fn test_concurrent_registration_and_lookup() {
    let c = Arc::new(Converter::new());

    let handles: Vec<_> = (0..8i64)
        .map(|i| {
            let c = c.clone();
            thread::spawn(move || {
                c.register::<i64, _>(move |_| Ok(i));
                for _ in 0..100 {
                    let v = c.to_type::<i64>(&DynamicValue::Null).unwrap();
                    assert!((0..8).contains(&v));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(c.registry().len(), 1);
}

#[test]
fn test_descriptor_override_with_matching_kind() {
    let c = converter();
    c.register_descriptor(TypeDescriptor::numeric(NumericKind::U16), |_| {
        Ok(DynamicValue::U16(4))
    });

    assert_eq!(c.to_type::<u16>(&DynamicValue::from("x")), Ok(4));
    assert_eq!(
        c.convert_to(&TypeDescriptor::numeric(NumericKind::U16), &DynamicValue::Null),
        Ok(DynamicValue::U16(4))
    );
}

#[test]
#[should_panic(expected = "converter override for u16 produced a text value")]
fn test_descriptor_override_with_wrong_kind_panics() {
    let c = converter();
    c.register_descriptor(TypeDescriptor::numeric(NumericKind::U16), |_| {
        Ok(DynamicValue::from("not a number"))
    });

    let _ = c.to_type::<u16>(&DynamicValue::from(1u16));
}

#[test]
fn test_registry_debug_lists_descriptors() {
    let c = converter();
    c.register::<Vec<i32>, _>(|_| Ok(vec![]));
    assert!(format!("{c:?}").contains("[]i32"));
    assert_eq!(
        c.registry()
            .lookup(&TypeDescriptor::sequence_of(NumericKind::I32.into()))
            .map(|f| f(&DynamicValue::Null)),
        Some(Ok(DynamicValue::Sequence(vec![])))
    );
}
