//! The validator factory.
//!
//! A [`Validators`] owns one base [`Configuration`] and hands out validators
//! in three families:
//!
//! | Family        | Configuration                         | On failure               |
//! |---------------|---------------------------------------|--------------------------|
//! | `require_that`| base                                  | `Err(InvalidArgument/NullValue)` |
//! | `assume_that` | base + assertion transformer          | `Err(Assertion)`         |
//! | `check_if`    | base with `throw_on_failure = false`  | recorded, `Ok`           |
//!
//! The assume and check configurations are derived from the base on first
//! use and cached until the base changes.
//!
//! A factory is `Send + Sync`. Validators it creates are not shared; each
//! call returns a fresh chain.

mod derived;

use std::fmt;
use std::panic::Location;
use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;
use serde::Serialize;

use self::derived::DerivedConfiguration;
use crate::config::{Configuration, ConfigurationSettings, ConfigurationUpdater, ExceptionTransformer};
use crate::core::{Context, require_valid_name};
use crate::error::ValidationError;
use crate::validators::ObjectValidator;

fn derive_assume_that(base: &Configuration) -> Configuration {
    base.to_builder()
        .exception_transformer(ExceptionTransformer::to_assertion())
        .build()
}

fn derive_check_if(base: &Configuration) -> Configuration {
    base.to_builder().throw_on_failure(false).build()
}

/// Creates validators that share one configuration.
///
/// # Examples
///
/// ```rust,ignore
/// use nebula_requirements::{Validators, Validator};
///
/// let validators = Validators::default();
/// validators.with_context("r-17", "request_id")?;
///
/// let port = validators.require_that(8080, "port")?.is_between(1, 65536)?;
///
/// let report = validators
///     .check_if(-3, "retries")?
///     .is_not_negative()?
///     .is_less_than(10)?;
/// assert_eq!(report.else_get_messages().len(), 2);
/// ```
pub struct Validators {
    configuration: ArcSwap<Configuration>,
    assume_that: DerivedConfiguration,
    check_if: DerivedConfiguration,
    context: ArcSwap<Context>,
}

impl Validators {
    /// Creates a factory whose base configuration is `configuration`.
    pub fn new(configuration: Configuration) -> Self {
        Self::from_parts(Arc::new(configuration), Arc::new(Context::new()))
    }

    /// Creates a factory from loadable settings. Every other switch keeps its
    /// default.
    pub fn with_settings(settings: &ConfigurationSettings) -> Self {
        Self::new(Configuration::from_settings(settings))
    }

    fn from_parts(configuration: Arc<Configuration>, context: Arc<Context>) -> Self {
        Self {
            configuration: ArcSwap::new(configuration),
            assume_that: DerivedConfiguration::new("assume_that", derive_assume_that),
            check_if: DerivedConfiguration::new("check_if", derive_check_if),
            context: ArcSwap::new(context),
        }
    }

    /// Returns an independent factory with the same configuration and
    /// context. Later changes to either factory do not affect the other.
    pub fn copy(&self) -> Self {
        Self::from_parts(self.configuration.load_full(), self.context.load_full())
    }

    // ========================================================================
    // CONFIGURATION
    // ========================================================================

    /// Returns the base configuration used by `require_that`.
    pub fn configuration(&self) -> Arc<Configuration> {
        self.configuration.load_full()
    }

    /// Returns the configuration used by `assume_that`.
    pub fn assume_that_configuration(&self) -> Arc<Configuration> {
        self.assume_that.get(&self.configuration)
    }

    /// Returns the configuration used by `check_if`.
    pub fn check_if_configuration(&self) -> Arc<Configuration> {
        self.check_if.get(&self.configuration)
    }

    /// Opens a scoped update of the base configuration. Changes are published
    /// when the updater is closed or dropped.
    pub fn update_configuration(&self) -> ConfigurationUpdater<'_> {
        ConfigurationUpdater::new(self)
    }

    /// Opens an updater, applies `update` and closes it.
    pub fn update_configuration_with<F>(&self, update: F) -> &Self
    where
        F: FnOnce(&mut ConfigurationUpdater<'_>),
    {
        let mut updater = self.update_configuration();
        update(&mut updater);
        updater.close();
        self
    }

    /// Publishes a new base configuration and discards both derived
    /// configurations.
    pub(crate) fn set_configuration(&self, configuration: Configuration) {
        self.configuration.store(Arc::new(configuration));
        self.assume_that.invalidate();
        self.check_if.invalidate();
        tracing::debug!("base configuration replaced, derived configurations invalidated");
    }

    #[cfg(test)]
    pub(crate) fn recomputations(&self) -> (u64, u64) {
        (self.assume_that.recomputations(), self.check_if.recomputations())
    }

    // ========================================================================
    // CONTEXT
    // ========================================================================

    /// Returns the context copied into every validator this factory creates.
    pub fn context(&self) -> Arc<Context> {
        self.context.load_full()
    }

    /// Adds `value` under `name` to the factory context, or removes the entry
    /// if `value` serializes to `null`.
    #[track_caller]
    pub fn with_context<V: Serialize>(&self, value: V, name: &str) -> Result<&Self, ValidationError> {
        require_valid_name(name, "name")?;
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(e) => {
                return Err(ValidationError::usage(format!(
                    "context value \"{name}\" could not be serialized"
                ))
                .with_cause(Arc::new(e))
                .at(Location::caller()));
            }
        };
        self.context.rcu(|context| {
            let mut context = Context::clone(context);
            if value.is_null() {
                context.shift_remove(name);
            } else {
                context.insert(name.to_owned(), value.clone());
            }
            context
        });
        Ok(self)
    }

    /// Removes `name` from the factory context.
    pub fn remove_context(&self, name: &str) -> &Self {
        self.context.rcu(|context| {
            let mut context = Context::clone(context);
            context.shift_remove(name);
            context
        });
        self
    }

    // ========================================================================
    // ENTRY POINTS
    // ========================================================================

    /// Validates a method argument. Failures are returned as `Err`.
    ///
    /// Fails with a usage error if `name` is invalid.
    #[track_caller]
    pub fn require_that<T>(&self, value: T, name: impl Into<String>) -> Result<ObjectValidator<T>, ValidationError> {
        self.require_that_option(Some(value), name)
    }

    /// Like [`require_that`](Self::require_that) for a value that may be
    /// absent.
    #[track_caller]
    pub fn require_that_option<T>(
        &self,
        value: Option<T>,
        name: impl Into<String>,
    ) -> Result<ObjectValidator<T>, ValidationError> {
        ObjectValidator::new(self.configuration(), name, value, self.context_copy())
    }

    /// Validates a class invariant or a condition the caller believes holds.
    /// Failures are returned as `Err` of kind `Assertion`.
    #[track_caller]
    pub fn assume_that<T>(&self, value: T, name: impl Into<String>) -> Result<ObjectValidator<T>, ValidationError> {
        self.assume_that_option(Some(value), name)
    }

    #[track_caller]
    pub fn assume_that_option<T>(
        &self,
        value: Option<T>,
        name: impl Into<String>,
    ) -> Result<ObjectValidator<T>, ValidationError> {
        ObjectValidator::new(self.assume_that_configuration(), name, value, self.context_copy())
    }

    /// Validates a value and records failures for later inspection. Checks
    /// never return `Err` for a failed comparison, only for misuse.
    #[track_caller]
    pub fn check_if<T>(&self, value: T, name: impl Into<String>) -> Result<ObjectValidator<T>, ValidationError> {
        self.check_if_option(Some(value), name)
    }

    #[track_caller]
    pub fn check_if_option<T>(
        &self,
        value: Option<T>,
        name: impl Into<String>,
    ) -> Result<ObjectValidator<T>, ValidationError> {
        ObjectValidator::new(self.check_if_configuration(), name, value, self.context_copy())
    }

    fn context_copy(&self) -> Context {
        Context::clone(&self.context.load())
    }
}

impl Default for Validators {
    fn default() -> Self {
        Self::new(Configuration::default())
    }
}

impl fmt::Debug for Validators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validators")
            .field("configuration", &self.configuration.load_full())
            .field("context", &self.context.load_full())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// DEFAULT FACTORY
// ============================================================================

static DEFAULT_VALIDATORS: LazyLock<Validators> = LazyLock::new(Validators::default);

/// Returns the process-wide factory used by the free functions.
pub fn default_validators() -> &'static Validators {
    &DEFAULT_VALIDATORS
}

/// [`Validators::require_that`] on the default factory.
#[track_caller]
pub fn require_that<T>(value: T, name: impl Into<String>) -> Result<ObjectValidator<T>, ValidationError> {
    DEFAULT_VALIDATORS.require_that(value, name)
}

/// [`Validators::require_that_option`] on the default factory.
#[track_caller]
pub fn require_that_option<T>(value: Option<T>, name: impl Into<String>) -> Result<ObjectValidator<T>, ValidationError> {
    DEFAULT_VALIDATORS.require_that_option(value, name)
}

/// [`Validators::assume_that`] on the default factory.
#[track_caller]
pub fn assume_that<T>(value: T, name: impl Into<String>) -> Result<ObjectValidator<T>, ValidationError> {
    DEFAULT_VALIDATORS.assume_that(value, name)
}

/// [`Validators::assume_that_option`] on the default factory.
#[track_caller]
pub fn assume_that_option<T>(value: Option<T>, name: impl Into<String>) -> Result<ObjectValidator<T>, ValidationError> {
    DEFAULT_VALIDATORS.assume_that_option(value, name)
}

/// [`Validators::check_if`] on the default factory.
#[track_caller]
pub fn check_if<T>(value: T, name: impl Into<String>) -> Result<ObjectValidator<T>, ValidationError> {
    DEFAULT_VALIDATORS.check_if(value, name)
}

/// [`Validators::check_if_option`] on the default factory.
#[track_caller]
pub fn check_if_option<T>(value: Option<T>, name: impl Into<String>) -> Result<ObjectValidator<T>, ValidationError> {
    DEFAULT_VALIDATORS.check_if_option(value, name)
}
