//! Extracting failures from a chain.

use nebula_requirements::prelude::*;
use pretty_assertions::assert_eq;

fn failing_checks(count: usize) -> ObjectValidator<i32> {
    let mut validator = check_if(0, "value").expect("valid name");
    for _ in 0..count {
        validator = validator.is_positive().expect("check family");
    }
    validator
}

#[test]
fn else_get_exception_is_none_without_failures() {
    let validator = failing_checks(0);
    assert!(validator.else_get_exception().is_none());
    assert!(validator.else_throw().is_ok());
}

#[test]
fn single_failure_is_returned_unwrapped() {
    let validator = failing_checks(1);
    let error = validator.else_get_exception().expect("one failure");
    assert_eq!(error.kind(), ErrorKind::InvalidArgument);
    assert_eq!(error.message(), "value must be positive.\nactual: 0");
}

#[test]
fn multiple_failures_are_aggregated() {
    let validator = failing_checks(3);
    let error = validator.else_throw().expect_err("three failures");

    assert_eq!(error.kind(), ErrorKind::MultipleFailures);
    assert_eq!(error.failures().len(), 3);
    let messages: Vec<&str> = error.failures().iter().map(|f| f.message()).collect();
    assert_eq!(messages, validator.else_get_messages());
    assert!(error.message().starts_with("value must be positive.\nactual: 0\n\n"));
}

#[test]
fn failures_record_the_caller_location() {
    let validator = check_if(0, "value").and_then(|v| v.is_positive()).expect("check family");
    let failure = &validator.else_get_failures()[0];
    assert_eq!(failure.location().file(), file!());

    let error = failure.exception();
    assert_eq!(error.location().map(|l| l.file()), Some(file!()));
    assert!(error.backtrace().is_none());
}

#[test]
fn unclean_stack_traces_capture_a_backtrace() {
    let validators = Validators::default();
    validators.update_configuration_with(|updater| {
        updater.set_clean_stack_trace(false);
    });

    let error = validators
        .require_that(0, "value")
        .and_then(|v| v.is_positive())
        .expect_err("zero is not positive");
    assert!(error.backtrace().is_some());
    assert_eq!(error.location().map(|l| l.file()), Some(file!()));
}

#[test]
fn lazy_exceptions_defer_construction() {
    let validators = Validators::default();
    let lazy = validators
        .check_if(0, "value")
        .and_then(|v| v.is_positive())
        .expect("check family");
    let failure = &lazy.else_get_failures()[0];
    assert!(!failure.is_materialized());
    failure.exception();
    assert!(failure.is_materialized());

    validators.update_configuration_with(|updater| {
        updater.set_lazy_exceptions(false);
    });
    let eager = validators
        .check_if(0, "value")
        .and_then(|v| v.is_positive())
        .expect("check family");
    assert!(eager.else_get_failures()[0].is_materialized());
}
