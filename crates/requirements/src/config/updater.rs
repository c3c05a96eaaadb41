//! Scoped, copy-on-write configuration updates.

use std::fmt;

use super::configuration::{Configuration, EqualityMethod};
use super::string_mappers::{MutableStringMappers, StringMappers};
use super::transformer::ExceptionTransformer;
use crate::factory::Validators;

/// Stages changes to a factory's configuration.
///
/// The updater works on a private copy of the factory's configuration.
/// Nothing is published until the updater is closed, either explicitly with
/// [`close`](Self::close) or implicitly when it is dropped. Closing is
/// idempotent. If no value changed, closing leaves the factory untouched;
/// otherwise the new configuration replaces the old one in a single atomic
/// swap and both derived configurations are invalidated.
///
/// ```rust,ignore
/// let validators = Validators::default();
/// {
///     let mut updater = validators.update_configuration();
///     updater.set_include_diff(false).set_lazy_exceptions(false);
/// } // published here
/// ```
#[must_use = "changes are published when the updater is closed or dropped"]
pub struct ConfigurationUpdater<'a> {
    factory: &'a Validators,
    clean_stack_trace: bool,
    include_diff: bool,
    equality_method: EqualityMethod,
    string_mappers: MutableStringMappers,
    opened_string_mappers: StringMappers,
    lazy_exceptions: bool,
    exception_transformer: ExceptionTransformer,
    changed: bool,
    closed: bool,
}

impl<'a> ConfigurationUpdater<'a> {
    pub(crate) fn new(factory: &'a Validators) -> Self {
        let configuration = factory.configuration();
        Self {
            factory,
            clean_stack_trace: configuration.clean_stack_trace,
            include_diff: configuration.include_diff,
            equality_method: configuration.equality_method,
            string_mappers: configuration.string_mappers.to_mutable(),
            opened_string_mappers: configuration.string_mappers.clone(),
            lazy_exceptions: configuration.lazy_exceptions,
            exception_transformer: configuration.exception_transformer.clone(),
            changed: false,
            closed: false,
        }
    }

    pub fn clean_stack_trace(&self) -> bool {
        self.clean_stack_trace
    }

    /// Specifies whether failures should report only the caller's location
    /// instead of capturing a backtrace that includes this library.
    pub fn set_clean_stack_trace(&mut self, clean_stack_trace: bool) -> &mut Self {
        if clean_stack_trace != self.clean_stack_trace {
            self.clean_stack_trace = clean_stack_trace;
            self.changed = true;
        }
        self
    }

    pub fn include_diff(&self) -> bool {
        self.include_diff
    }

    /// Specifies whether equality failures should describe where long values
    /// start to differ.
    pub fn set_include_diff(&mut self, include_diff: bool) -> &mut Self {
        if include_diff != self.include_diff {
            self.include_diff = include_diff;
            self.changed = true;
        }
        self
    }

    pub fn equality_method(&self) -> EqualityMethod {
        self.equality_method
    }

    /// Sets the strategy used to compare non-`None` values.
    pub fn set_equality_method(&mut self, equality_method: EqualityMethod) -> &mut Self {
        if equality_method != self.equality_method {
            self.equality_method = equality_method;
            self.changed = true;
        }
        self
    }

    /// Returns the staged string mappers. Changes are detected on close by
    /// comparing the staged mappers with the ones seen when the updater was
    /// opened.
    pub fn string_mappers(&mut self) -> &mut MutableStringMappers {
        &mut self.string_mappers
    }

    pub fn lazy_exceptions(&self) -> bool {
        self.lazy_exceptions
    }

    /// Specifies whether a failure's error may be built on first request
    /// instead of when the failure is recorded.
    pub fn set_lazy_exceptions(&mut self, lazy_exceptions: bool) -> &mut Self {
        if lazy_exceptions != self.lazy_exceptions {
            self.lazy_exceptions = lazy_exceptions;
            self.changed = true;
        }
        self
    }

    pub fn exception_transformer(&self) -> &ExceptionTransformer {
        &self.exception_transformer
    }

    /// Sets the transformer applied to every failure's error before it is
    /// returned.
    pub fn set_exception_transformer(&mut self, exception_transformer: ExceptionTransformer) -> &mut Self {
        if exception_transformer != self.exception_transformer {
            self.exception_transformer = exception_transformer;
            self.changed = true;
        }
        self
    }

    /// Publishes the staged configuration.
    pub fn close(mut self) {
        self.commit();
    }

    fn commit(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        let string_mappers = self.string_mappers.to_immutable();
        let changed = self.changed || string_mappers != self.opened_string_mappers;
        if !changed {
            tracing::debug!("configuration update closed without changes");
            return;
        }

        let current = self.factory.configuration();

        let updated = Configuration {
            clean_stack_trace: self.clean_stack_trace,
            include_diff: self.include_diff,
            equality_method: self.equality_method,
            string_mappers,
            lazy_exceptions: self.lazy_exceptions,
            throw_on_failure: current.throw_on_failure,
            exception_transformer: self.exception_transformer.clone(),
        };
        tracing::debug!(configuration = ?updated, "publishing configuration update");
        self.factory.set_configuration(updated);
    }
}

impl Drop for ConfigurationUpdater<'_> {
    fn drop(&mut self) {
        self.commit();
    }
}

impl fmt::Debug for ConfigurationUpdater<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigurationUpdater")
            .field("clean_stack_trace", &self.clean_stack_trace)
            .field("include_diff", &self.include_diff)
            .field("equality_method", &self.equality_method)
            .field("string_mappers", &self.string_mappers)
            .field("lazy_exceptions", &self.lazy_exceptions)
            .field("exception_transformer", &self.exception_transformer)
            .field("changed", &self.changed)
            .field("closed", &self.closed)
            .finish()
    }
}
