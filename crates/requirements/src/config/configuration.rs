//! The immutable validator configuration.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::string_mappers::StringMappers;
use super::transformer::ExceptionTransformer;

// ============================================================================
// EQUALITY METHOD
// ============================================================================

/// Determines how two non-`None` values are compared for equality.
///
/// The strategies disagree for types whose `PartialEq` is stricter than their
/// ordering, such as a decimal type that treats `1.0` and `1.00` as different
/// values but orders them as equal magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EqualityMethod {
    /// Values are equal if `PartialEq::eq` returns true.
    #[default]
    Object,
    /// Values are equal if `PartialOrd::partial_cmp` returns `Equal`.
    Comparable,
}

impl EqualityMethod {
    /// Compares two values using this strategy.
    pub fn equals<T: PartialEq + PartialOrd + ?Sized>(self, actual: &T, expected: &T) -> bool {
        match self {
            Self::Object => actual == expected,
            Self::Comparable => actual.partial_cmp(expected) == Some(Ordering::Equal),
        }
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// The policy switches that control validator behavior.
///
/// A configuration never changes after it is built. Derive a modified copy
/// through [`Configuration::to_builder`]. Two configurations are equal when
/// every field is equal; the exception transformer and string mappers compare
/// by the identity of their functions.
#[derive(Clone, PartialEq, Eq)]
pub struct Configuration {
    pub(super) clean_stack_trace: bool,
    pub(super) include_diff: bool,
    pub(super) equality_method: EqualityMethod,
    pub(super) string_mappers: StringMappers,
    pub(super) lazy_exceptions: bool,
    pub(super) throw_on_failure: bool,
    pub(super) exception_transformer: ExceptionTransformer,
}

impl Configuration {
    /// Returns a builder initialized with the default configuration.
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::default()
    }

    /// Returns a builder initialized with this configuration's values.
    pub fn to_builder(&self) -> ConfigurationBuilder {
        ConfigurationBuilder {
            configuration: self.clone(),
        }
    }

    /// Returns true if failures should report only the caller's location
    /// instead of capturing a full backtrace that includes this library.
    pub fn clean_stack_trace(&self) -> bool {
        self.clean_stack_trace
    }

    /// Returns true if equality failures should describe where long values
    /// start to differ.
    pub fn include_diff(&self) -> bool {
        self.include_diff
    }

    /// Returns the strategy used to compare non-`None` values.
    pub fn equality_method(&self) -> EqualityMethod {
        self.equality_method
    }

    /// Returns the mappers used to render values in failure messages.
    pub fn string_mappers(&self) -> &StringMappers {
        &self.string_mappers
    }

    /// Returns true if a failure's error may be built on first request
    /// instead of when the failure is recorded.
    pub fn lazy_exceptions(&self) -> bool {
        self.lazy_exceptions
    }

    /// Returns true if the first failure is returned as an `Err` immediately.
    pub fn throw_on_failure(&self) -> bool {
        self.throw_on_failure
    }

    /// Returns the transformer applied to every failure's error.
    pub fn exception_transformer(&self) -> &ExceptionTransformer {
        &self.exception_transformer
    }

    /// Builds a configuration from serializable settings, keeping the
    /// defaults for everything the settings do not cover.
    pub fn from_settings(settings: &ConfigurationSettings) -> Self {
        Self::builder()
            .clean_stack_trace(settings.clean_stack_trace)
            .include_diff(settings.include_diff)
            .equality_method(settings.equality_method)
            .lazy_exceptions(settings.lazy_exceptions)
            .build()
    }

    /// Returns the serializable subset of this configuration.
    pub fn settings(&self) -> ConfigurationSettings {
        ConfigurationSettings {
            clean_stack_trace: self.clean_stack_trace,
            include_diff: self.include_diff,
            equality_method: self.equality_method,
            lazy_exceptions: self.lazy_exceptions,
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            clean_stack_trace: true,
            include_diff: true,
            equality_method: EqualityMethod::Object,
            string_mappers: StringMappers::default(),
            lazy_exceptions: true,
            throw_on_failure: true,
            exception_transformer: ExceptionTransformer::identity(),
        }
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("clean_stack_trace", &self.clean_stack_trace)
            .field("include_diff", &self.include_diff)
            .field("equality_method", &self.equality_method)
            .field("string_mappers", &self.string_mappers)
            .field("lazy_exceptions", &self.lazy_exceptions)
            .field("throw_on_failure", &self.throw_on_failure)
            .field("exception_transformer", &self.exception_transformer)
            .finish()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builds a [`Configuration`] one field at a time.
///
/// ```rust,ignore
/// let configuration = Configuration::builder()
///     .throw_on_failure(false)
///     .equality_method(EqualityMethod::Comparable)
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigurationBuilder {
    configuration: Configuration,
}

impl ConfigurationBuilder {
    #[must_use = "builder methods must be chained or built"]
    pub fn clean_stack_trace(mut self, clean_stack_trace: bool) -> Self {
        self.configuration.clean_stack_trace = clean_stack_trace;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn include_diff(mut self, include_diff: bool) -> Self {
        self.configuration.include_diff = include_diff;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn equality_method(mut self, equality_method: EqualityMethod) -> Self {
        self.configuration.equality_method = equality_method;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn string_mappers(mut self, string_mappers: StringMappers) -> Self {
        self.configuration.string_mappers = string_mappers;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn lazy_exceptions(mut self, lazy_exceptions: bool) -> Self {
        self.configuration.lazy_exceptions = lazy_exceptions;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn throw_on_failure(mut self, throw_on_failure: bool) -> Self {
        self.configuration.throw_on_failure = throw_on_failure;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn exception_transformer(mut self, exception_transformer: ExceptionTransformer) -> Self {
        self.configuration.exception_transformer = exception_transformer;
        self
    }

    /// Freezes the configuration.
    pub fn build(self) -> Configuration {
        self.configuration
    }
}

// ============================================================================
// SETTINGS
// ============================================================================

/// The data-only part of a configuration, loadable from any serde format.
///
/// Missing fields take their default values.
///
/// ```rust,ignore
/// let settings: ConfigurationSettings =
///     serde_json::from_str(r#"{ "equality_method": "comparable" }"#)?;
/// let validators = Validators::with_settings(&settings);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigurationSettings {
    pub clean_stack_trace: bool,
    pub include_diff: bool,
    pub equality_method: EqualityMethod,
    pub lazy_exceptions: bool,
}

impl Default for ConfigurationSettings {
    fn default() -> Self {
        Configuration::default().settings()
    }
}
