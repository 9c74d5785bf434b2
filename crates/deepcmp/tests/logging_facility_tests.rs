#![allow(clippy::unwrap_used, clippy::expect_used)]

use deepcmp::errors::DeepCmpError;
use deepcmp::logging_facility::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DEPTH, FIELD_DIFFERENCES, FIELD_DURATION_MS,
    FIELD_ERR_CODE, FIELD_ERR_KIND, FIELD_METHOD, FIELD_TYPE_NAME, OP_CHECK_EQUAL, OP_COMPARE,
};
use deepcmp::logging_facility::test_capture::init_test_capture;
use deepcmp::{check_equal, compare, log_op_end, log_op_error, log_op_start, Comparator, Reflect};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    let start_events = capture.events_for(op_name, EVENT_START);
    assert_eq!(start_events.len(), 1, "Should have exactly one start event");
    assert_eq!(
        start_events[0].component.as_deref(),
        Some("logging_facility_tests")
    );
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events = capture.events_for(op_name, EVENT_END);
    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].field(FIELD_DURATION_MS), Some("42"));
}

#[test]
fn test_log_op_error_includes_kind_and_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = DeepCmpError::InvalidConfig {
        reason: "bad".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let error_events = capture.events_for(op_name, EVENT_END_ERROR);
    assert_eq!(error_events.len(), 1, "Should have exactly one error event");
    assert_eq!(error_events[0].field(FIELD_ERR_CODE), Some("ERR_INVALID_CONFIG"));
    assert_eq!(error_events[0].field(FIELD_ERR_KIND), Some("InvalidConfig"));
    assert_eq!(error_events[0].level, tracing::Level::ERROR);
}

#[derive(Reflect)]
struct LoggedCompareUnique4 {
    a: i32,
    b: i32,
}

#[test]
fn test_compare_emits_start_and_end() {
    let capture = init_test_capture();

    let diff = compare(
        &LoggedCompareUnique4 { a: 1, b: 2 },
        &LoggedCompareUnique4 { a: 3, b: 4 },
    );
    assert_eq!(diff.len(), 2);

    let starts = capture.count_events(|e| {
        e.op.as_deref() == Some(OP_COMPARE)
            && e.event.as_deref() == Some(EVENT_START)
            && e.field(FIELD_TYPE_NAME) == Some("LoggedCompareUnique4")
    });
    assert_eq!(starts, 1);

    capture.assert_event_exists(OP_COMPARE, EVENT_END);
    let ends = capture.events_for(OP_COMPARE, EVENT_END);
    assert!(ends.iter().all(|e| e.field(FIELD_DURATION_MS).is_some()));
    assert!(ends.iter().any(|e| e.field(FIELD_DIFFERENCES) == Some("2")));
}

#[test]
fn test_check_equal_failure_logs_end_error() {
    let capture = init_test_capture();

    let err = check_equal(&vec![5u16, 6, 7, 8, 9], &vec![5u16, 6, 0, 0, 0]).unwrap_err();
    assert_eq!(err.diff().map(|d| d.len()), Some(3));

    let errors = capture.events_for(OP_CHECK_EQUAL, EVENT_END_ERROR);
    assert!(
        errors
            .iter()
            .any(|e| e.field(FIELD_DIFFERENCES) == Some("3")
                && e.field(FIELD_ERR_CODE) == Some("ERR_NOT_EQUAL")),
        "missing check_equal end_error event with 3 differences"
    );
}

#[test]
fn test_check_equal_success_logs_end() {
    let capture = init_test_capture();

    check_equal(&"unique-5", &"unique-5").unwrap();

    capture.assert_event_exists(OP_CHECK_EQUAL, EVENT_START);
    capture.assert_event_exists(OP_CHECK_EQUAL, EVENT_END);
}

#[derive(Reflect, PartialEq)]
#[reflect(equal)]
struct CachedLookupUnique6(i32);

#[test]
fn test_method_lookup_logs_type_and_method() {
    let capture = init_test_capture();

    assert!(compare(&CachedLookupUnique6(1), &CachedLookupUnique6(1)).is_empty());

    let lookups = capture.count_events(|e| {
        e.field(FIELD_TYPE_NAME) == Some("CachedLookupUnique6")
            && e.field(FIELD_METHOD) == Some("Equal")
            && e.field("found") == Some("true")
    });
    assert_eq!(lookups, 1);
}

#[test]
fn test_depth_limit_logs_depth() {
    let capture = init_test_capture();
    let shallow = Comparator {
        max_depth: 3,
        ..Comparator::new()
    };

    let diff = shallow.compare(
        &Box::new(Box::new(Box::new(Box::new(1)))),
        &Box::new(Box::new(Box::new(Box::new(2)))),
    );
    assert!(diff.is_empty());

    let cutoffs = capture.count_events(|e| {
        e.level == tracing::Level::TRACE && e.field(FIELD_DEPTH) == Some("3")
    });
    assert!(cutoffs >= 1, "missing depth cutoff event");
}
