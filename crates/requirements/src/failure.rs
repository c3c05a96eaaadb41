//! Recorded outcome of one failed check.

use std::fmt;
use std::panic::Location;
use std::sync::{Arc, OnceLock};

use crate::config::Configuration;
use crate::error::{Cause, ValidationError};

/// Builds the error associated with a failure from its message and cause.
pub type ExceptionFactory = Arc<dyn Fn(&str, Option<Cause>) -> ValidationError + Send + Sync>;

/// A validation failure.
///
/// Immutable once created. Its error is materialized eagerly when the failure
/// is recorded, or on first request when the configuration enables lazy
/// exceptions; either way it is built at most once.
#[derive(Clone)]
pub struct Failure {
    inner: Arc<FailureInner>,
}

struct FailureInner {
    configuration: Arc<Configuration>,
    message: String,
    cause: Option<Cause>,
    factory: ExceptionFactory,
    location: &'static Location<'static>,
    error: OnceLock<ValidationError>,
}

impl Failure {
    pub(crate) fn new(
        configuration: Arc<Configuration>,
        message: String,
        cause: Option<Cause>,
        factory: ExceptionFactory,
        location: &'static Location<'static>,
    ) -> Self {
        let lazy = configuration.lazy_exceptions();
        let failure = Self {
            inner: Arc::new(FailureInner {
                configuration,
                message,
                cause,
                factory,
                location,
                error: OnceLock::new(),
            }),
        };
        if !lazy {
            failure.materialize();
        }
        failure
    }

    /// Returns the message that explains what went wrong.
    pub fn message(&self) -> &str {
        &self.inner.message
    }

    /// Returns the underlying cause, if any.
    pub fn cause(&self) -> Option<&Cause> {
        self.inner.cause.as_ref()
    }

    /// Returns the source location of the call that recorded the failure.
    pub fn location(&self) -> &'static Location<'static> {
        self.inner.location
    }

    /// Returns true if the error has already been built.
    pub fn is_materialized(&self) -> bool {
        self.inner.error.get().is_some()
    }

    /// Returns the error associated with this failure, after the configured
    /// exception transformer has been applied.
    pub fn exception(&self) -> ValidationError {
        self.materialize().clone()
    }

    fn materialize(&self) -> &ValidationError {
        self.inner.error.get_or_init(|| {
            let inner = &self.inner;
            let mut error = (inner.factory)(&inner.message, inner.cause.clone()).at(inner.location);
            if !inner.configuration.clean_stack_trace() {
                error = error.with_captured_trace();
            }
            inner.configuration.exception_transformer().apply(error)
        })
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Failure")
            .field("message", &self.inner.message)
            .field("cause", &self.inner.cause)
            .field("location", &self.inner.location)
            .field("materialized", &self.is_materialized())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.message)
    }
}
