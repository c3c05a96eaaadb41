//! Per-chain validator state and the failure-accumulation state machine.
//!
//! A chain is either OK (no failures) or FAILED (at least one failure). The
//! transition is one-way. Every check made on a FAILED chain records a generic
//! "could not be evaluated" failure without looking at the value, so each
//! failing call maps to exactly one recorded failure.

use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use super::message::MessageBuilder;
use crate::config::Configuration;
use crate::error::{Cause, ValidationError};
use crate::failure::Failure;

/// Auxiliary name/value metadata attached to a validator for diagnostics.
pub type Context = IndexMap<String, Value>;

/// The mutable state of one validation chain.
///
/// Owned by the chain that created it and never shared between threads while
/// it is being mutated.
pub struct ValidatorCore {
    configuration: Arc<Configuration>,
    name: String,
    context: Context,
    failures: Vec<Failure>,
}

impl ValidatorCore {
    /// Creates the state of a new chain.
    ///
    /// Fails with a usage error if `name` is empty, has leading or trailing
    /// whitespace, or is already used by a context entry.
    #[track_caller]
    pub fn new(
        configuration: Arc<Configuration>,
        name: impl Into<String>,
        context: Context,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        require_valid_name(&name, "name")?;
        if context.contains_key(&name) {
            return Err(usage(format!(
                "name may not be equal to the name of a context entry.\nActual: {name}"
            )));
        }
        Ok(Self {
            configuration,
            name,
            context,
            failures: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Returns the failures recorded so far, in recording order.
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Returns true once any failure has been recorded.
    ///
    /// Checks must consult this before touching the value: a failed chain may
    /// wrap a value that is absent or inconsistent.
    pub fn has_failed(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Renders a value through the configured string mappers.
    pub fn render<T: fmt::Debug>(&self, value: &T) -> String {
        self.configuration.string_mappers().to_string(value)
    }

    /// Starts a failure message for this chain.
    pub fn message(&self, headline: impl Into<String>) -> MessageBuilder<'_> {
        MessageBuilder::new(self, headline)
    }

    // ------------------------------------------------------------------------
    // Recording failures
    // ------------------------------------------------------------------------

    /// Records a failure.
    ///
    /// If the configuration throws on failure, the failure's error (after the
    /// exception transformer) is returned as `Err` and the chain should stop.
    #[track_caller]
    pub fn add_failure<F>(
        &mut self,
        message: String,
        cause: Option<Cause>,
        factory: F,
    ) -> Result<(), ValidationError>
    where
        F: Fn(&str, Option<Cause>) -> ValidationError + Send + Sync + 'static,
    {
        let failure = Failure::new(
            Arc::clone(&self.configuration),
            message,
            cause,
            Arc::new(factory),
            Location::caller(),
        );
        self.failures.push(failure.clone());
        tracing::trace!(
            name = %self.name,
            failures = self.failures.len(),
            throw = self.configuration.throw_on_failure(),
            "validation failure recorded"
        );
        if self.configuration.throw_on_failure() {
            return Err(failure.exception());
        }
        Ok(())
    }

    /// Records a failure for a value that failed a semantic check.
    #[track_caller]
    pub fn add_invalid_argument(&mut self, message: String) -> Result<(), ValidationError> {
        self.add_failure(message, None, |message, cause| {
            ValidationError::invalid_argument(message).with_optional_cause(cause)
        })
    }

    /// Records a failure for a value that was `None` when a value was required.
    #[track_caller]
    pub fn add_null_value(&mut self, message: String) -> Result<(), ValidationError> {
        self.add_failure(message, None, |message, cause| {
            ValidationError::null_value(message).with_optional_cause(cause)
        })
    }

    /// Records the generic failure of a check that was skipped because the
    /// chain had already failed. The value is not consulted.
    #[track_caller]
    pub fn add_not_evaluated(&mut self, check: &str) -> Result<(), ValidationError> {
        let message = self
            .message(format!(
                "{} could not be evaluated because an earlier check failed.",
                self.name
            ))
            .detail("check", check)
            .build();
        self.add_invalid_argument(message)
    }

    /// Appends failures recorded by another chain.
    pub fn merge(&mut self, other: &ValidatorCore) {
        self.failures.extend(other.failures.iter().cloned());
    }

    // ------------------------------------------------------------------------
    // Context
    // ------------------------------------------------------------------------

    /// Attaches `value` under `name`, or removes the entry if `value`
    /// serializes to `null`.
    #[track_caller]
    pub fn set_context<V: Serialize>(&mut self, value: V, name: &str) -> Result<(), ValidationError> {
        require_valid_name(name, "name")?;
        self.require_name_differs_from_value(name)?;
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(e) => {
                return Err(usage(format!("context value \"{name}\" could not be serialized"))
                    .with_cause(Arc::new(e)));
            }
        };
        if value.is_null() {
            self.context.shift_remove(name);
        } else {
            self.context.insert(name.to_owned(), value);
        }
        Ok(())
    }

    /// Ensures that the name of a parameter (such as the name of an expected
    /// value) is valid and not already used by the value or a context entry.
    #[track_caller]
    pub fn require_name_is_unique(&self, name: &str) -> Result<(), ValidationError> {
        require_valid_name(name, "name")?;
        self.require_name_differs_from_value(name)?;
        if self.context.contains_key(name) {
            return Err(usage(format!(
                "name may not be equal to the name of a context entry.\nActual: {name}"
            )));
        }
        Ok(())
    }

    #[track_caller]
    fn require_name_differs_from_value(&self, name: &str) -> Result<(), ValidationError> {
        if name == self.name {
            return Err(usage(format!(
                "name may not be equal to the name of the value.\nActual: {name}"
            )));
        }
        Ok(())
    }

    /// Renders the context one `name: value` line per entry.
    pub fn context_as_string(&self) -> String {
        self.context
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // ------------------------------------------------------------------------
    // Terminal extraction
    // ------------------------------------------------------------------------

    /// Returns a snapshot of the recorded failures.
    pub fn else_get_failures(&self) -> Vec<Failure> {
        self.failures.clone()
    }

    /// Returns each failure's message, in recording order.
    pub fn else_get_messages(&self) -> Vec<String> {
        self.failures.iter().map(|f| f.message().to_owned()).collect()
    }

    /// Returns `None` if nothing failed, the failure's own error if exactly
    /// one failure was recorded, and an aggregate error otherwise.
    #[track_caller]
    pub fn else_get_exception(&self) -> Option<ValidationError> {
        match self.failures.as_slice() {
            [] => None,
            [failure] => Some(failure.exception()),
            failures => {
                let error = ValidationError::multiple_failures(failures.to_vec()).at(Location::caller());
                if self.configuration.clean_stack_trace() {
                    Some(error)
                } else {
                    Some(error.with_captured_trace())
                }
            }
        }
    }

    /// Returns the error [`else_get_exception`](Self::else_get_exception)
    /// would produce as `Err`, or `Ok(())` if nothing failed.
    #[track_caller]
    pub fn else_throw(&self) -> Result<(), ValidationError> {
        match self.else_get_exception() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for ValidatorCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorCore")
            .field("name", &self.name)
            .field("context", &self.context)
            .field("failures", &self.failures.len())
            .finish_non_exhaustive()
    }
}

#[track_caller]
fn usage(message: String) -> ValidationError {
    ValidationError::usage(message).at(Location::caller())
}

/// Ensures a name is non-empty and has no leading or trailing whitespace.
#[track_caller]
pub(crate) fn require_valid_name(name: &str, parameter: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(usage(format!("{parameter} may not be empty")));
    }
    if name.trim() != name {
        return Err(usage(format!(
            "{parameter} may not contain leading or trailing whitespace.\nActual: \"{name}\""
        )));
    }
    Ok(())
}
