mod common;

use chrono::{DateTime, Utc};
use coerce_core::{is_date_shaped, CoerceError, DynamicValue};
use common::{counting_converter, utc};

#[test]
fn test_each_layout_is_recognized() {
    for text in [
        "2023-07-04T10:00:00Z",
        "2023-07-04 10:00:00",
        "2023-07-04T10:00:00.250+02:00",
        "04 Jul 2023 10:00:00 GMT",
        "Jul 4, 2023 10:00 AM",
        "Jul 4 2023 10:00:30 PM",
        "2023-07-04",
    ] {
        assert!(is_date_shaped(text), "{text}");
    }
}

#[test]
fn test_non_dates_are_rejected() {
    for text in [
        "hello",
        "",
        "12345",
        "2023/07/04",
        "2023-07-04T10:00:00 extra",
        "July 4, 2023 10:00 AM",
        "04 Jul 2023 10:00:00",
    ] {
        assert!(!is_date_shaped(text), "{text}");
    }
}

#[test]
fn test_shape_check_ignores_field_ranges() {
    assert!(is_date_shaped("2023-13-45"));
    assert!(is_date_shaped("9999-99-99T99:99:99Z"));
}

#[test]
fn test_invalid_shape_never_reaches_parser() {
    let (c, parser) = counting_converter();

    let err = c
        .to_type::<DateTime<Utc>>(&DynamicValue::from("hello"))
        .unwrap_err();

    assert_eq!(
        err,
        CoerceError::InvalidDateTime {
            input: "hello".to_string()
        }
    );
    assert_eq!(parser.calls(), 0);
}

#[test]
fn test_shaped_text_is_handed_to_parser() {
    let (c, parser) = counting_converter();

    let parsed = c
        .to_type::<DateTime<Utc>>(&DynamicValue::from("04 Jul 2023 19:00:00 JST"))
        .unwrap();

    assert_eq!(parsed, utc(2023, 7, 4, 10, 0, 0));
    assert_eq!(parser.calls(), 1);
}

#[test]
fn test_parser_rejection_is_parse_error() {
    let (c, parser) = counting_converter();

    let err = c
        .to_type::<DateTime<Utc>>(&DynamicValue::from("2023-02-30"))
        .unwrap_err();

    assert!(matches!(err, CoerceError::Parse { .. }), "{err:?}");
    assert_eq!(parser.calls(), 1);
}
