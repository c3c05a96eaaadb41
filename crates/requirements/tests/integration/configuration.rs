//! Configuration updates, derived configuration caching and the policy
//! switches that shape failures.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use nebula_requirements::prelude::*;
use nebula_requirements::ConfigurationSettings;
use pretty_assertions::assert_eq;

// ============================================================================
// COPY-ON-WRITE UPDATES
// ============================================================================

#[test]
fn unchanged_update_keeps_every_configuration_instance() {
    let validators = Validators::default();
    let base = validators.configuration();
    let assume = validators.assume_that_configuration();
    let check = validators.check_if_configuration();

    let updater = validators.update_configuration();
    updater.close();

    assert!(Arc::ptr_eq(&base, &validators.configuration()));
    assert!(Arc::ptr_eq(&assume, &validators.assume_that_configuration()));
    assert!(Arc::ptr_eq(&check, &validators.check_if_configuration()));
}

#[test]
fn changed_update_recomputes_derived_configurations_lazily() {
    let validators = Validators::default();
    let assume = validators.assume_that_configuration();
    let check = validators.check_if_configuration();

    validators.update_configuration_with(|updater| {
        updater.set_include_diff(false);
    });

    let assume_after = validators.assume_that_configuration();
    let check_after = validators.check_if_configuration();
    assert!(!Arc::ptr_eq(&assume, &assume_after));
    assert!(!Arc::ptr_eq(&check, &check_after));
    assert!(!assume_after.include_diff());
    assert!(!check_after.include_diff());

    // Later reads hit the cache again.
    assert!(Arc::ptr_eq(&assume_after, &validators.assume_that_configuration()));
    assert!(Arc::ptr_eq(&check_after, &validators.check_if_configuration()));
}

#[test]
fn validators_keep_the_configuration_they_were_created_with() {
    let validators = Validators::default();
    let before = validators.check_if(1, "value").expect("valid name");

    validators.update_configuration_with(|updater| {
        updater.set_lazy_exceptions(false);
    });
    let after = validators.check_if(1, "value").expect("valid name");

    assert!(before.configuration().lazy_exceptions());
    assert!(!after.configuration().lazy_exceptions());
}

#[test]
fn settings_load_from_json() {
    let settings: ConfigurationSettings = serde_json::from_str(
        r#"{ "clean_stack_trace": false, "equality_method": "comparable" }"#,
    )
    .expect("valid settings");

    let validators = Validators::with_settings(&settings);
    let configuration = validators.configuration();
    assert!(!configuration.clean_stack_trace());
    assert_eq!(configuration.equality_method(), EqualityMethod::Comparable);
    assert!(configuration.include_diff());
    assert!(configuration.lazy_exceptions());
}

// ============================================================================
// EQUALITY STRATEGIES
// ============================================================================

/// A decimal whose `PartialEq` compares representation but whose ordering
/// compares magnitude, so `1.0` and `1.00` differ under one strategy only.
#[derive(Debug, Clone, Copy)]
struct Decimal {
    unscaled: i64,
    scale: u32,
}

impl Decimal {
    fn new(unscaled: i64, scale: u32) -> Self {
        Self { unscaled, scale }
    }

    fn at_scale(self, scale: u32) -> i128 {
        i128::from(self.unscaled) * 10_i128.pow(scale - self.scale)
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.unscaled == other.unscaled && self.scale == other.scale
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let scale = self.scale.max(other.scale);
        self.at_scale(scale).partial_cmp(&other.at_scale(scale))
    }
}

#[test]
fn equality_method_decides_is_equal_to() {
    let one = Decimal::new(10, 1);
    let also_one = Decimal::new(100, 2);

    let validators = Validators::default();
    assert!(validators.require_that(one, "value").and_then(|v| v.is_equal_to(also_one)).is_err());

    validators.update_configuration_with(|updater| {
        updater.set_equality_method(EqualityMethod::Comparable);
    });
    assert!(validators.require_that(one, "value").and_then(|v| v.is_equal_to(also_one)).is_ok());
    assert!(validators.require_that(one, "value").and_then(|v| v.is_not_equal_to(also_one)).is_err());
}

// ============================================================================
// RENDERING AND TRANSFORMERS
// ============================================================================

struct Secret(&'static str);

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Secret").field(&self.0).finish()
    }
}

impl PartialEq for Secret {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl PartialOrd for Secret {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(other.0)
    }
}

#[test]
fn string_mappers_render_values_in_messages() {
    let validators = Validators::default();
    validators.update_configuration_with(|updater| {
        updater.string_mappers().put::<Secret, _>(|_| "****".to_owned());
    });

    let error = validators
        .require_that(Secret("hunter2"), "password")
        .and_then(|v| v.is_equal_to(Secret("letmein")))
        .expect_err("different");
    assert_eq!(error.message(), "password must be equal to ****.\nactual: ****");
}

#[derive(Debug, thiserror::Error)]
#[error("rejected: {0}")]
struct Rejected(String);

#[test]
fn custom_transformer_wraps_foreign_errors() {
    let validators = Validators::default();
    validators.update_configuration_with(|updater| {
        updater.set_exception_transformer(ExceptionTransformer::new(|error| {
            Some(Box::new(Rejected(error.message().to_owned())))
        }));
    });

    let error = validators
        .require_that(1, "value")
        .and_then(|v| v.is_zero())
        .expect_err("not zero");
    assert_eq!(error.kind(), ErrorKind::Wrapped);
    assert_eq!(error.message(), "rejected: value must be zero.\nactual: 1");
}

#[test]
fn assume_that_applies_assertion_on_top_of_base_configuration() {
    let validators = Validators::default();
    validators.update_configuration_with(|updater| {
        updater.set_include_diff(false);
    });

    let configuration = validators.assume_that_configuration();
    assert!(!configuration.include_diff());
    assert_eq!(configuration.exception_transformer(), &ExceptionTransformer::to_assertion());
}
