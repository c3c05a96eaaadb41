//! Validator for any value that may be absent.

use std::fmt;
use std::sync::Arc;

use crate::config::Configuration;
use crate::core::{Context, Validator, ValidatorCore};
use crate::error::ValidationError;

/// Validates a value of type `T` that may be `None`.
///
/// The checks available depend on what `T` can do:
///
/// - any `T`: [`is_not_null`](Self::is_not_null)
/// - `T: Debug`: [`is_null`](Self::is_null)
/// - `T: PartialEq + PartialOrd + Debug`: equality checks, compared with the
///   configured [`EqualityMethod`](crate::EqualityMethod)
/// - `T: PartialOrd + Debug`: ordering checks (see `comparable.rs`)
/// - `T: Number`: sign, zero and divisibility checks (see `number.rs`)
pub struct ObjectValidator<T> {
    pub(crate) core: ValidatorCore,
    pub(crate) value: Option<T>,
}

impl<T> ObjectValidator<T> {
    /// Creates a validator bound to `configuration`.
    ///
    /// Fails with a usage error if `name` is invalid.
    #[track_caller]
    pub fn new(
        configuration: Arc<Configuration>,
        name: impl Into<String>,
        value: Option<T>,
        context: Context,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            core: ValidatorCore::new(configuration, name, context)?,
            value,
        })
    }

    /// Returns the value, or `None` if it is absent.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Consumes the validator and returns the value.
    pub fn into_value(self) -> Option<T> {
        self.value
    }

    /// Ensures that the value is present.
    #[track_caller]
    pub fn is_not_null(mut self) -> Result<Self, ValidationError> {
        if self.core.has_failed() {
            self.core.add_not_evaluated("is_not_null")?;
        } else if self.value.is_none() {
            self.add_missing()?;
        }
        Ok(self)
    }

    /// Runs `evaluate` against the value. `evaluate` returns the failure
    /// message if the check fails.
    ///
    /// Skips the check on a failed chain and records a null-value failure if
    /// the value is absent.
    #[track_caller]
    pub(crate) fn evaluate<F>(mut self, check: &str, evaluate: F) -> Result<Self, ValidationError>
    where
        F: FnOnce(&ValidatorCore, &T) -> Option<String>,
    {
        if self.core.has_failed() {
            self.core.add_not_evaluated(check)?;
            return Ok(self);
        }
        let Some(value) = self.value.as_ref() else {
            self.add_missing()?;
            return Ok(self);
        };
        if let Some(message) = evaluate(&self.core, value) {
            self.core.add_invalid_argument(message)?;
        }
        Ok(self)
    }

    #[track_caller]
    fn add_missing(&mut self) -> Result<(), ValidationError> {
        let message = self
            .core
            .message(format!("{} may not be None.", self.core.name()))
            .build();
        self.core.add_null_value(message)
    }
}

impl<T: fmt::Debug> ObjectValidator<T> {
    /// Ensures that the value is absent.
    #[track_caller]
    pub fn is_null(mut self) -> Result<Self, ValidationError> {
        if self.core.has_failed() {
            self.core.add_not_evaluated("is_null")?;
            return Ok(self);
        }
        if let Some(value) = &self.value {
            let message = self
                .core
                .message(format!("{} must be None.", self.core.name()))
                .detail("actual", self.core.render(value))
                .build();
            self.core.add_invalid_argument(message)?;
        }
        Ok(self)
    }
}

impl<T: PartialEq + PartialOrd + fmt::Debug> ObjectValidator<T> {
    /// Ensures that the value is equal to `expected`.
    #[track_caller]
    pub fn is_equal_to(self, expected: T) -> Result<Self, ValidationError> {
        self.equality(expected, None, true)
    }

    /// Ensures that the value is equal to `expected`, naming the expected
    /// value in the failure message.
    ///
    /// Fails with a usage error if `name` is invalid or already in use.
    #[track_caller]
    pub fn is_equal_to_named(self, expected: T, name: &str) -> Result<Self, ValidationError> {
        self.core.require_name_is_unique(name)?;
        self.equality(expected, Some(name), true)
    }

    /// Ensures that the value is not equal to `unwanted`.
    #[track_caller]
    pub fn is_not_equal_to(self, unwanted: T) -> Result<Self, ValidationError> {
        self.equality(unwanted, None, false)
    }

    /// Ensures that the value is not equal to `unwanted`, naming the other
    /// value in the failure message.
    #[track_caller]
    pub fn is_not_equal_to_named(self, unwanted: T, name: &str) -> Result<Self, ValidationError> {
        self.core.require_name_is_unique(name)?;
        self.equality(unwanted, Some(name), false)
    }

    #[track_caller]
    fn equality(mut self, other: T, other_name: Option<&str>, want_equal: bool) -> Result<Self, ValidationError> {
        let check = if want_equal { "is_equal_to" } else { "is_not_equal_to" };
        if self.core.has_failed() {
            self.core.add_not_evaluated(check)?;
            return Ok(self);
        }

        let method = self.core.configuration().equality_method();
        // An absent value is never equal to a present one.
        let equal = self
            .value
            .as_ref()
            .is_some_and(|value| method.equals(value, &other));
        if equal == want_equal {
            return Ok(self);
        }

        let expected = self.core.render(&other);
        let actual = match &self.value {
            Some(value) => self.core.render(value),
            None => "None".to_owned(),
        };
        let relation = if want_equal { "must be equal to" } else { "may not be equal to" };
        let headline = match other_name {
            Some(name) => format!("{} {relation} {name}.", self.core.name()),
            None => format!("{} {relation} {expected}.", self.core.name()),
        };
        let mut message = self.core.message(headline).detail("actual", actual.clone());
        if let Some(name) = other_name {
            message = message.detail(name, expected.clone());
        }
        if want_equal {
            message = message.diff(&actual, &expected);
        }
        let message = message.build();
        self.core.add_invalid_argument(message)?;
        Ok(self)
    }
}

impl<T> Validator for ObjectValidator<T> {
    fn core(&self) -> &ValidatorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ValidatorCore {
        &mut self.core
    }
}

impl<T: fmt::Debug> fmt::Debug for ObjectValidator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectValidator")
            .field("core", &self.core)
            .field("value", &self.value)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EqualityMethod;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;

    fn checking<T>(value: Option<T>) -> ObjectValidator<T> {
        let configuration = Configuration::builder().throw_on_failure(false).build();
        ObjectValidator::new(Arc::new(configuration), "value", value, Context::new())
            .expect("valid name")
    }

    fn requiring<T>(value: Option<T>) -> ObjectValidator<T> {
        ObjectValidator::new(Arc::new(Configuration::default()), "value", value, Context::new())
            .expect("valid name")
    }

    #[test]
    fn test_is_not_null() {
        assert!(requiring(Some(1)).is_not_null().is_ok());

        let error = requiring(None::<i32>).is_not_null().expect_err("absent");
        assert_eq!(error.kind(), ErrorKind::NullValue);
        assert_eq!(error.message(), "value may not be None.");
    }

    #[test]
    fn test_is_null() {
        assert!(requiring(None::<i32>).is_null().is_ok());

        let error = requiring(Some(3)).is_null().expect_err("present");
        assert_eq!(error.message(), "value must be None.\nactual: 3");
    }

    #[test]
    fn test_is_equal_to_message() {
        let error = requiring(Some("abc".to_owned()))
            .is_equal_to("abd".to_owned())
            .expect_err("different");
        assert_eq!(
            error.message(),
            "value must be equal to \"abd\".\nactual: \"abc\""
        );
    }

    #[test]
    fn test_is_equal_to_named_message() {
        let error = requiring(Some(4))
            .is_equal_to_named(5, "expected")
            .expect_err("different");
        assert_eq!(
            error.message(),
            "value must be equal to expected.\nactual: 4\nexpected: 5"
        );
    }

    #[test]
    fn test_is_equal_to_named_rejects_own_name() {
        let error = requiring(Some(4))
            .is_equal_to_named(4, "value")
            .expect_err("ambiguous name");
        assert!(error.is_usage());
    }

    #[test]
    fn test_absent_value_is_not_equal() {
        let validator = checking(None::<i32>).is_equal_to(1).expect("check family");
        assert!(validator.has_failed());
        assert_eq!(
            validator.else_get_messages(),
            vec!["value must be equal to 1.\nactual: None"]
        );

        assert!(checking(None::<i32>).is_not_equal_to(1).expect("check family").else_throw().is_ok());
    }

    #[test]
    fn test_is_not_equal_to() {
        assert!(requiring(Some(1)).is_not_equal_to(2).is_ok());
        let error = requiring(Some(1)).is_not_equal_to(1).expect_err("equal");
        assert_eq!(error.message(), "value may not be equal to 1.\nactual: 1");
    }

    #[test]
    fn test_is_not_equal_to_named() {
        assert!(requiring(Some(1)).is_not_equal_to_named(2, "previous").is_ok());

        let error = requiring(Some(1))
            .is_not_equal_to_named(1, "previous")
            .expect_err("equal");
        assert_eq!(error.message(), "value may not be equal to previous.\nactual: 1\nprevious: 1");

        let error = requiring(Some(1))
            .is_not_equal_to_named(2, "value")
            .expect_err("ambiguous name");
        assert!(error.is_usage());
    }

    #[test]
    fn test_long_values_get_diff_hint() {
        let actual = "a".repeat(40);
        let mut expected = actual.clone();
        expected.replace_range(10..11, "b");

        let error = requiring(Some(actual)).is_equal_to(expected).expect_err("different");
        assert!(error.message().ends_with("diff: values differ starting at character 11"));
    }

    #[test]
    fn test_diff_hint_can_be_disabled() {
        let configuration = Configuration::builder().include_diff(false).build();
        let actual = "a".repeat(40);
        let error = ObjectValidator::new(Arc::new(configuration), "value", Some(actual), Context::new())
            .expect("valid name")
            .is_equal_to("b".repeat(40))
            .expect_err("different");
        assert!(!error.message().contains("diff:"));
    }

    #[test]
    fn test_comparable_equality_uses_ordering() {
        let configuration = Configuration::builder()
            .equality_method(EqualityMethod::Comparable)
            .build();
        // -0.0 and 0.0 are equal under both strategies; NaN is equal under neither.
        let validator = ObjectValidator::new(Arc::new(configuration), "value", Some(f64::NAN), Context::new())
            .expect("valid name");
        assert!(validator.is_equal_to(f64::NAN).is_err());
    }

    #[test]
    fn test_value_accessors() {
        let validator = requiring(Some(7));
        assert_eq!(validator.value(), Some(&7));
        assert_eq!(validator.into_value(), Some(7));
    }
}
