//! The three validator families and how failures surface from each.

use nebula_requirements::prelude::*;
use pretty_assertions::assert_eq;

use crate::init_tracing;

#[test]
fn require_that_fails_fast_with_invalid_argument() {
    init_tracing();
    let validators = Validators::default();

    let error = validators
        .require_that(5, "age")
        .and_then(|v| v.is_greater_than(10))
        .expect_err("5 is not greater than 10");

    assert_eq!(error.kind(), ErrorKind::InvalidArgument);
    assert_eq!(error.message(), "age must be greater than 10.\nactual: 5");
}

#[test]
fn check_if_accumulates_one_failure_per_failed_call() {
    let validators = Validators::default();

    let validator = validators
        .check_if(5, "age")
        .and_then(|v| v.is_greater_than(10))
        .and_then(|v| v.is_less_than(3))
        .expect("check family never returns Err for failed checks");

    assert_eq!(validator.else_get_failures().len(), 2);
}

#[test]
fn assume_that_reports_missing_value_as_assertion() {
    let validators = Validators::default();

    let error = validators
        .assume_that_option(None::<String>, "value")
        .and_then(|v| v.is_not_null())
        .expect_err("value is absent");

    assert_eq!(error.kind(), ErrorKind::Assertion);
    assert!(!error.is_null_value());
    assert_eq!(error.message(), "value may not be None.");
}

#[test]
fn failed_chain_does_not_evaluate_the_value() {
    let validators = Validators::default();

    let validator = validators
        .check_if_option(None::<i32>, "value")
        .and_then(|v| v.is_not_null())
        .and_then(|v| v.is_positive())
        .expect("check family");

    let failures = validator.else_get_failures();
    assert_eq!(failures.len(), 2);
    assert!(failures[0].exception().is_null_value());
    // The second failure is generic and does not mention the missing value.
    assert!(failures[1].exception().is_invalid_argument());
    assert_eq!(
        failures[1].message(),
        "value could not be evaluated because an earlier check failed.\ncheck: is_positive"
    );
}

#[test]
fn usage_errors_bypass_the_throw_policy() {
    let validators = Validators::default();

    let error = validators.check_if(1, " padded").expect_err("invalid name");
    assert!(error.is_usage());

    let error = validators
        .check_if(1, "value")
        .and_then(|v| v.context("x", "value"))
        .expect_err("context name equals value name");
    assert!(error.is_usage());

    let error = validators
        .check_if(1, "value")
        .and_then(|v| v.is_between(3, 2))
        .expect_err("inverted range");
    assert!(error.is_usage());
}

#[test]
fn default_factory_free_functions() {
    assert!(require_that(3, "count").and_then(|v| v.is_positive()).is_ok());
    assert!(require_that_option(Some(3), "count").and_then(|v| v.is_not_null()).is_ok());

    let error = assume_that(3, "count")
        .and_then(|v| v.is_zero())
        .expect_err("not zero");
    assert!(error.is_assertion());
    assert!(assume_that_option(Some(0), "count").and_then(|v| v.is_zero()).is_ok());

    let validator = check_if(-1, "count")
        .and_then(|v| v.is_not_negative())
        .expect("check family");
    assert!(validator.has_failed());
    let validator = check_if_option(None::<u8>, "count")
        .and_then(|v| v.is_null())
        .expect("check family");
    assert!(!validator.has_failed());
}

#[test]
fn context_is_appended_to_messages() {
    let validators = Validators::default();
    validators.with_context("r-17", "request_id").expect("valid name");

    let validator = validators
        .check_if(5, "age")
        .and_then(|v| v.context(3, "attempt"))
        .and_then(|v| v.is_greater_than(10))
        .expect("check family");

    assert_eq!(
        validator.else_get_messages(),
        vec!["age must be greater than 10.\nactual: 5\nrequest_id: \"r-17\"\nattempt: 3"]
    );
    assert_eq!(validator.context_as_string(), "request_id: \"r-17\"\nattempt: 3");
}

#[test]
fn and_merges_failures_from_another_chain() {
    let validators = Validators::default();
    let width = validators
        .check_if(-1, "width")
        .and_then(|v| v.is_positive())
        .expect("check family");
    let height = validators
        .check_if(0, "height")
        .and_then(|v| v.is_positive())
        .expect("check family");

    let combined = width.and(&height);
    assert_eq!(combined.else_get_messages().len(), 2);
}

#[test]
fn apply_groups_checks() {
    let validators = Validators::default();
    let validator = validators
        .check_if(15, "percent")
        .and_then(|v| v.apply(|v| v.is_not_negative()?.is_less_than_or_equal_to(10)))
        .expect("check family");
    assert_eq!(validator.else_get_messages().len(), 1);
}
