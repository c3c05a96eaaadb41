//! Error type returned by validators.
//!
//! Every failed check, whether it is returned immediately (require / assume
//! families) or materialized later from an accumulated [`Failure`], surfaces
//! as a [`ValidationError`]. The [`ErrorKind`] tells callers which part of the
//! taxonomy they are looking at:
//!
//! - [`ErrorKind::InvalidArgument`]: the value failed a semantic check
//! - [`ErrorKind::NullValue`]: the value was `None` where a value was required
//! - [`ErrorKind::Usage`]: the validator API itself was misused
//! - [`ErrorKind::MultipleFailures`]: more than one failure was accumulated
//! - [`ErrorKind::Assertion`]: a failure converted by the assume family
//! - [`ErrorKind::Wrapped`]: an exception transformer returned a foreign error
//!
//! # Examples
//!
//! ```rust,ignore
//! use nebula_requirements::{ErrorKind, require_that};
//!
//! let error = require_that(5, "age")?.is_greater_than(10).unwrap_err();
//! assert_eq!(error.kind(), ErrorKind::InvalidArgument);
//! ```

use std::backtrace::Backtrace;
use std::error::Error as StdError;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use crate::failure::Failure;

/// The underlying cause of a failure, shared between clones of the error.
pub type Cause = Arc<dyn StdError + Send + Sync + 'static>;

/// An owned, type-erased error as returned by an exception transformer.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

// ============================================================================
// ERROR KIND
// ============================================================================

/// Classifies a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The validated value failed a semantic check.
    InvalidArgument,
    /// The validated value was `None` when a value was required.
    NullValue,
    /// The validator API was misused. Always returned immediately.
    Usage,
    /// More than one failure was accumulated.
    MultipleFailures,
    /// A failure converted to an assertion by the assume family.
    Assertion,
    /// A foreign error returned by an exception transformer.
    Wrapped,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidArgument => "invalid argument",
            Self::NullValue => "null value",
            Self::Usage => "usage",
            Self::MultipleFailures => "multiple failures",
            Self::Assertion => "assertion",
            Self::Wrapped => "wrapped",
        };
        f.write_str(name)
    }
}

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A validation failure in its error form.
///
/// Cloning is cheap: the cause, the captured backtrace and nested failures
/// are reference counted.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    kind: ErrorKind,
    message: String,
    #[source]
    cause: Option<Cause>,
    suppressed: Vec<ValidationError>,
    failures: Vec<Failure>,
    location: Option<&'static Location<'static>>,
    captured_trace: Option<Arc<Backtrace>>,
}

impl ValidationError {
    fn with_kind(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
            suppressed: Vec::new(),
            failures: Vec::new(),
            location: None,
            captured_trace: None,
        }
    }

    /// Creates an error for a value that failed a semantic check.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::InvalidArgument, message)
    }

    /// Creates an error for a value that was `None` when a value was required.
    pub fn null_value(message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::NullValue, message)
    }

    /// Creates an error for misuse of the validator API.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Usage, message)
    }

    /// Creates an assertion error.
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Assertion, message)
    }

    /// Bundles several accumulated failures into one error.
    ///
    /// The message lists each failure's message, separated by a blank line.
    pub fn multiple_failures(failures: Vec<Failure>) -> Self {
        let message = failures
            .iter()
            .map(Failure::message)
            .collect::<Vec<_>>()
            .join("\n\n");
        let mut error = Self::with_kind(ErrorKind::MultipleFailures, message);
        error.failures = failures;
        error
    }

    /// Wraps an error that is not a `ValidationError`.
    pub fn wrapped(error: BoxError) -> Self {
        let mut wrapped = Self::with_kind(ErrorKind::Wrapped, error.to_string());
        wrapped.cause = Some(Arc::from(error));
        wrapped
    }

    /// Sets the underlying cause.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_cause(mut self, cause: Cause) -> Self {
        self.cause = Some(cause);
        self
    }

    /// Sets or clears the underlying cause.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_optional_cause(mut self, cause: Option<Cause>) -> Self {
        self.cause = cause;
        self
    }

    /// Attaches an error that was suppressed in favor of this one.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_suppressed(mut self, error: ValidationError) -> Self {
        self.suppressed.push(error);
        self
    }

    #[must_use]
    pub(crate) fn at(mut self, location: &'static Location<'static>) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub(crate) fn with_captured_trace(mut self) -> Self {
        self.captured_trace = Some(Arc::new(Backtrace::capture()));
        self
    }

    /// Returns the kind of the error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the message describing what went wrong.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the underlying cause, if any.
    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    /// Returns the errors suppressed in favor of this one.
    pub fn suppressed(&self) -> &[ValidationError] {
        &self.suppressed
    }

    /// Returns the failures bundled by a [`ErrorKind::MultipleFailures`] error.
    ///
    /// Empty for every other kind.
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Returns the source location of the call that recorded the failure.
    pub fn location(&self) -> Option<&'static Location<'static>> {
        self.location
    }

    /// Returns the backtrace captured when the error was materialized.
    ///
    /// Only present when stack traces are not cleaned. The capture honors
    /// `RUST_BACKTRACE` / `RUST_LIB_BACKTRACE`.
    pub fn backtrace(&self) -> Option<&Backtrace> {
        self.captured_trace.as_deref()
    }

    /// Returns true if the value failed a semantic check.
    pub fn is_invalid_argument(&self) -> bool {
        self.kind == ErrorKind::InvalidArgument
    }

    /// Returns true if the value was `None` when a value was required.
    pub fn is_null_value(&self) -> bool {
        self.kind == ErrorKind::NullValue
    }

    /// Returns true if the validator API was misused.
    pub fn is_usage(&self) -> bool {
        self.kind == ErrorKind::Usage
    }

    /// Returns true if this error bundles more than one failure.
    pub fn is_multiple_failures(&self) -> bool {
        self.kind == ErrorKind::MultipleFailures
    }

    /// Returns true if this is an assertion error.
    pub fn is_assertion(&self) -> bool {
        self.kind == ErrorKind::Assertion
    }

    /// Returns true if this error wraps a foreign error.
    pub fn is_wrapped(&self) -> bool {
        self.kind == ErrorKind::Wrapped
    }

    /// Converts the error into an assertion error, preserving its message,
    /// cause, suppressed errors, bundled failures and location.
    #[must_use]
    pub fn to_assertion(&self) -> ValidationError {
        Self {
            kind: ErrorKind::Assertion,
            ..self.clone()
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
