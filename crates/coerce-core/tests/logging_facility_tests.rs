#![allow(clippy::unwrap_used, clippy::expect_used)]

use coerce_core::errors::{CoerceError, ExErrorKind};
use coerce_core::logging_facility::test_capture::init_test_capture;
use coerce_core::types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DURATION_MS, FIELD_ERR_CODE, FIELD_ERR_KIND,
    FIELD_INDEX, FIELD_LEN, FIELD_SOURCE_KIND, FIELD_TARGET,
};
use coerce_core::{
    log_op_end, log_op_error, log_op_start, Converter, DynamicValue, NumericKind, ScalarKind,
    TypeDescriptor, ValueKind,
};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, target = ScalarKind::Bool);

    let starts = capture.events_for(op_name, EVENT_START);
    assert_eq!(starts.len(), 1);
    assert_eq!(starts[0].field(FIELD_TARGET), Some("bool"));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, target = NumericKind::U32, duration_ms = 42);

    let end_events = capture.events_for(op_name, EVENT_END);
    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].field(FIELD_DURATION_MS), Some("42"));
    assert_eq!(end_events[0].field(FIELD_TARGET), Some("u32"));
}

#[test]
fn test_log_op_error_includes_kind_and_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = CoerceError::overflow(256, NumericKind::U8);
    log_op_error!(op_name, err, target = NumericKind::U8, duration_ms = 10);

    let error_events = capture.events_for(op_name, EVENT_END_ERROR);
    assert_eq!(error_events.len(), 1, "Should have exactly one error event");
    assert_eq!(error_events[0].field(FIELD_ERR_CODE), Some("ERR_OVERFLOW"));
    assert_eq!(
        error_events[0].field(FIELD_ERR_KIND),
        Some(format!("{:?}", ExErrorKind::Overflow).as_str())
    );
    // Overflow carries no source kind
    assert_eq!(error_events[0].field(FIELD_SOURCE_KIND), None);
}

#[test]
fn test_log_op_error_records_source_kind() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_source_kind_unique_5";

    let err = CoerceError::unsupported(ValueKind::Opaque, ScalarKind::Timestamp);
    log_op_error!(op_name, err, target = ScalarKind::Timestamp, duration_ms = 1);

    let error_events = capture.events_for(op_name, EVENT_END_ERROR);
    assert_eq!(error_events.len(), 1);
    assert_eq!(error_events[0].field(FIELD_SOURCE_KIND), Some("opaque"));
    assert_eq!(error_events[0].field(FIELD_ERR_CODE), Some("ERR_UNSUPPORTED"));
}

#[test]
fn test_log_macros_with_multiple_fields() {
    let capture = init_test_capture();
    let op_name = "test_log_macros_fields_unique_4";

    log_op_start!(op_name, target = NumericKind::I64, len = 3usize);

    let start_event = capture
        .events()
        .into_iter()
        .find(|e| e.op.as_deref() == Some(op_name))
        .expect("Should have start event");

    assert_eq!(start_event.field(FIELD_LEN), Some("3"));
    assert_eq!(start_event.field(FIELD_TARGET), Some("i64"));
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_test_capture_assert_event_exists_fails() {
    let capture = init_test_capture();

    // This should panic because no such event exists
    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}

// Converter lifecycle events. Each test uses its own element type so the
// shared buffer can be filtered by the logged target.

#[test]
fn test_to_sequence_emits_start_and_end() {
    let capture = init_test_capture();
    let converter = Converter::new();

    let out: Vec<u16> = converter
        .to_sequence(&DynamicValue::from(vec!["1", "2", "3"]))
        .unwrap();
    assert_eq!(out, vec![1, 2, 3]);

    let starts = capture.count_events(|e| {
        e.op.as_deref() == Some("to_sequence")
            && e.event.as_deref() == Some(EVENT_START)
            && e.field(FIELD_TARGET) == Some("u16")
    });
    assert_eq!(starts, 1);

    let start = capture
        .events_for("to_sequence", EVENT_START)
        .into_iter()
        .find(|e| e.field(FIELD_TARGET) == Some("u16"))
        .unwrap();
    assert_eq!(start.field(FIELD_LEN), Some("3"));
    capture.assert_event_exists("to_sequence", EVENT_END);
}

#[test]
fn test_to_sequence_failure_emits_error_code() {
    let capture = init_test_capture();
    let converter = Converter::new();

    let result = converter.to_sequence::<i8>(&DynamicValue::from(vec!["1", "two"]));
    assert!(result.is_err());

    let error_event = capture
        .events_for("to_sequence", EVENT_END_ERROR)
        .into_iter()
        .find(|e| e.field(FIELD_TARGET) == Some("i8"))
        .expect("Should have error event for i8 sequence");
    assert_eq!(error_event.field(FIELD_ERR_CODE), Some("ERR_PARSE"));
    assert!(error_event.field(FIELD_DURATION_MS).is_some());
}

#[test]
fn test_register_emits_lifecycle() {
    let capture = init_test_capture();
    let converter = Converter::new();

    converter.register::<Vec<Vec<u32>>, _>(|_| Ok(vec![]));

    let start = capture
        .events_for("register", EVENT_START)
        .into_iter()
        .find(|e| e.field(FIELD_TARGET) == Some("[][]u32"));
    assert!(start.is_some());
    assert!(capture.count_events(|e| {
        e.op.as_deref() == Some("register")
            && e.event.as_deref() == Some(EVENT_END)
            && e.field("replaced") == Some("false")
    }) >= 1);
}

#[test]
fn test_to_sequence_non_sequence_input_logs_source_kind() {
    let capture = init_test_capture();
    let converter = Converter::new();

    let result = converter.to_sequence::<Vec<i16>>(&DynamicValue::from(true));
    assert!(result.is_err());

    let error_event = capture
        .events_for("to_sequence", EVENT_END_ERROR)
        .into_iter()
        .find(|e| e.field(FIELD_TARGET) == Some("[][]i16"))
        .expect("Should have error event for nested i16 sequence");
    assert_eq!(error_event.field(FIELD_SOURCE_KIND), Some("bool"));
    assert_eq!(error_event.field(FIELD_ERR_CODE), Some("ERR_UNSUPPORTED"));
}

#[test]
fn test_failing_element_logs_its_index() {
    let capture = init_test_capture();
    let converter = Converter::new();

    let input = DynamicValue::from(vec!["7", "8", "not-an-isize-element"]);
    assert!(converter.to_sequence::<isize>(&input).is_err());

    let element_event = capture
        .events()
        .into_iter()
        .find(|e| {
            e.field("error")
                .is_some_and(|error| error.contains("not-an-isize-element"))
        })
        .expect("Should have element failure event");
    assert_eq!(element_event.field(FIELD_INDEX), Some("2"));
}

#[test]
fn test_register_end_names_target() {
    let capture = init_test_capture();
    let converter = Converter::new();

    converter.register_descriptor(TypeDescriptor::sequence_of(TypeDescriptor::Any), |v| {
        Ok(v.clone())
    });

    assert!(capture.count_events(|e| {
        e.op.as_deref() == Some("register")
            && e.event.as_deref() == Some(EVENT_END)
            && e.field(FIELD_TARGET) == Some("[]any")
    }) >= 1);
}
