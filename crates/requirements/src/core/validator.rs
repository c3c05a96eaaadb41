//! The trait shared by every validator.

use serde::Serialize;

use super::state::{Context, ValidatorCore};
use crate::config::Configuration;
use crate::error::ValidationError;
use crate::failure::Failure;

/// A fluent validator wrapping one value and the failures recorded for it.
///
/// Implementors only expose their [`ValidatorCore`]; everything else is
/// provided. Fluent methods take `self` and return `Self` (or
/// `Result<Self, ValidationError>`), so chains keep their concrete type.
///
/// # Examples
///
/// ```rust,ignore
/// use nebula_requirements::prelude::*;
///
/// let validator = check_if(5, "age")?
///     .context("r-17", "request_id")?
///     .is_greater_than(10)?;
/// assert_eq!(validator.else_get_messages().len(), 1);
/// ```
pub trait Validator: Sized {
    /// Returns the chain state.
    fn core(&self) -> &ValidatorCore;

    /// Returns the chain state for mutation.
    fn core_mut(&mut self) -> &mut ValidatorCore;

    /// Returns the name of the value.
    fn name(&self) -> &str {
        self.core().name()
    }

    /// Returns the configuration bound to this chain.
    fn configuration(&self) -> &Configuration {
        self.core().configuration()
    }

    /// Returns true once any check on this chain has failed.
    fn has_failed(&self) -> bool {
        self.core().has_failed()
    }

    /// Attaches contextual information that is appended to failure messages.
    /// A value that serializes to `null` removes the entry.
    ///
    /// Fails with a usage error if `name` is invalid or equal to the name of
    /// the value.
    #[track_caller]
    fn context<V: Serialize>(mut self, value: V, name: &str) -> Result<Self, ValidationError> {
        self.core_mut().set_context(value, name)?;
        Ok(self)
    }

    /// Returns the contextual information attached to this chain.
    fn context_map(&self) -> &Context {
        self.core().context()
    }

    /// Renders the contextual information one `name: value` line per entry.
    fn context_as_string(&self) -> String {
        self.core().context_as_string()
    }

    /// Appends every failure recorded by `other` to this chain.
    fn and<V: Validator>(mut self, other: &V) -> Self {
        self.core_mut().merge(other.core());
        self
    }

    /// Runs a group of checks against this chain.
    fn apply<F>(self, checks: F) -> Result<Self, ValidationError>
    where
        F: FnOnce(Self) -> Result<Self, ValidationError>,
    {
        checks(self)
    }

    /// Returns a snapshot of the recorded failures.
    fn else_get_failures(&self) -> Vec<Failure> {
        self.core().else_get_failures()
    }

    /// Returns each failure's message, in recording order.
    fn else_get_messages(&self) -> Vec<String> {
        self.core().else_get_messages()
    }

    /// Returns `None` if nothing failed, the failure's own error if exactly
    /// one check failed, and an aggregate error otherwise.
    #[track_caller]
    fn else_get_exception(&self) -> Option<ValidationError> {
        self.core().else_get_exception()
    }

    /// Returns whatever [`else_get_exception`](Self::else_get_exception)
    /// produces as `Err`, or `Ok(())` if nothing failed.
    #[track_caller]
    fn else_throw(&self) -> Result<(), ValidationError> {
        self.core().else_throw()
    }
}
