//! Sharing one factory between threads.

use std::sync::Arc;
use std::thread;

use nebula_requirements::prelude::*;

#[test]
fn readers_observe_a_configuration_update() {
    let validators = Validators::default();
    let before = validators.check_if_configuration();

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..1_000 {
                    let configuration = validators.check_if_configuration();
                    assert!(!configuration.throw_on_failure());
                }
            });
        }
        scope.spawn(|| {
            validators.update_configuration_with(|updater| {
                updater.set_include_diff(false);
            });
        });
    });

    let after = validators.check_if_configuration();
    assert!(!Arc::ptr_eq(&before, &after));
    assert!(!after.include_diff());
    assert!(Arc::ptr_eq(&after, &validators.check_if_configuration()));
}

#[test]
fn concurrent_updates_leave_derived_configurations_consistent() {
    let validators = Validators::default();

    thread::scope(|scope| {
        for i in 0..8 {
            let validators = &validators;
            scope.spawn(move || {
                validators.update_configuration_with(|updater| {
                    updater.set_lazy_exceptions(i % 2 == 0);
                });
                validators.assume_that_configuration();
                validators.check_if_configuration();
            });
        }
    });

    let base = validators.configuration();
    assert_eq!(validators.assume_that_configuration().lazy_exceptions(), base.lazy_exceptions());
    assert_eq!(validators.check_if_configuration().lazy_exceptions(), base.lazy_exceptions());
}

#[test]
fn chains_on_different_threads_are_independent() {
    let validators = Validators::default();
    validators.with_context("batch-1", "batch").expect("valid name");

    let counts: Vec<usize> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4_i32)
            .map(|failures| {
                let validators = &validators;
                scope.spawn(move || {
                    let mut validator = validators.check_if(0, "value").expect("valid name");
                    for _ in 0..failures {
                        validator = validator.is_positive().expect("check family");
                    }
                    validator.else_get_failures().len()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().expect("worker panicked")).collect()
    });

    assert_eq!(counts, vec![0, 1, 2, 3]);
}
