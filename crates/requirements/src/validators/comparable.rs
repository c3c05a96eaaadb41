//! Ordering checks for values with a partial order.
//!
//! A value that is unordered relative to the bound (a NaN, for example)
//! fails every check.

use std::cmp::Ordering;
use std::fmt;
use std::panic::Location;

use super::object::ObjectValidator;
use crate::error::ValidationError;

// ============================================================================
// BOUNDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    LessThan,
    LessThanOrEqualTo,
    GreaterThan,
    GreaterThanOrEqualTo,
}

impl Bound {
    fn holds<T: PartialOrd + ?Sized>(self, value: &T, bound: &T) -> bool {
        let Some(ordering) = value.partial_cmp(bound) else {
            return false;
        };
        match self {
            Self::LessThan => ordering == Ordering::Less,
            Self::LessThanOrEqualTo => ordering != Ordering::Greater,
            Self::GreaterThan => ordering == Ordering::Greater,
            Self::GreaterThanOrEqualTo => ordering != Ordering::Less,
        }
    }

    fn phrase(self) -> &'static str {
        match self {
            Self::LessThan => "less than",
            Self::LessThanOrEqualTo => "less than or equal to",
            Self::GreaterThan => "greater than",
            Self::GreaterThanOrEqualTo => "greater than or equal to",
        }
    }

    fn check(self) -> &'static str {
        match self {
            Self::LessThan => "is_less_than",
            Self::LessThanOrEqualTo => "is_less_than_or_equal_to",
            Self::GreaterThan => "is_greater_than",
            Self::GreaterThanOrEqualTo => "is_greater_than_or_equal_to",
        }
    }
}

// ============================================================================
// CHECKS
// ============================================================================

impl<T: PartialOrd + fmt::Debug> ObjectValidator<T> {
    /// Ensures that the value is less than `maximum`.
    #[track_caller]
    pub fn is_less_than(self, maximum: T) -> Result<Self, ValidationError> {
        self.bounded(Bound::LessThan, maximum, None)
    }

    /// Ensures that the value is less than `maximum`, naming the bound in the
    /// failure message.
    #[track_caller]
    pub fn is_less_than_named(self, maximum: T, name: &str) -> Result<Self, ValidationError> {
        self.core.require_name_is_unique(name)?;
        self.bounded(Bound::LessThan, maximum, Some(name))
    }

    /// Ensures that the value is less than or equal to `maximum`.
    #[track_caller]
    pub fn is_less_than_or_equal_to(self, maximum: T) -> Result<Self, ValidationError> {
        self.bounded(Bound::LessThanOrEqualTo, maximum, None)
    }

    #[track_caller]
    pub fn is_less_than_or_equal_to_named(self, maximum: T, name: &str) -> Result<Self, ValidationError> {
        self.core.require_name_is_unique(name)?;
        self.bounded(Bound::LessThanOrEqualTo, maximum, Some(name))
    }

    /// Ensures that the value is greater than `minimum`.
    #[track_caller]
    pub fn is_greater_than(self, minimum: T) -> Result<Self, ValidationError> {
        self.bounded(Bound::GreaterThan, minimum, None)
    }

    #[track_caller]
    pub fn is_greater_than_named(self, minimum: T, name: &str) -> Result<Self, ValidationError> {
        self.core.require_name_is_unique(name)?;
        self.bounded(Bound::GreaterThan, minimum, Some(name))
    }

    /// Ensures that the value is greater than or equal to `minimum`.
    #[track_caller]
    pub fn is_greater_than_or_equal_to(self, minimum: T) -> Result<Self, ValidationError> {
        self.bounded(Bound::GreaterThanOrEqualTo, minimum, None)
    }

    #[track_caller]
    pub fn is_greater_than_or_equal_to_named(self, minimum: T, name: &str) -> Result<Self, ValidationError> {
        self.core.require_name_is_unique(name)?;
        self.bounded(Bound::GreaterThanOrEqualTo, minimum, Some(name))
    }

    /// Ensures that `minimum <= value < maximum`.
    ///
    /// Fails with a usage error if `minimum` is greater than `maximum`.
    #[track_caller]
    pub fn is_between(self, minimum: T, maximum: T) -> Result<Self, ValidationError> {
        self.between(minimum, maximum, false)
    }

    /// Ensures that `minimum <= value <= maximum`.
    ///
    /// Fails with a usage error if `minimum` is greater than `maximum`.
    #[track_caller]
    pub fn is_between_closed(self, minimum: T, maximum: T) -> Result<Self, ValidationError> {
        self.between(minimum, maximum, true)
    }

    #[track_caller]
    fn bounded(self, bound: Bound, limit: T, limit_name: Option<&str>) -> Result<Self, ValidationError> {
        self.evaluate(bound.check(), |core, value| {
            if bound.holds(value, &limit) {
                return None;
            }
            let rendered = core.render(&limit);
            let headline = format!(
                "{} must be {} {}.",
                core.name(),
                bound.phrase(),
                limit_name.unwrap_or(&rendered)
            );
            let mut message = core.message(headline).detail("actual", core.render(value));
            if let Some(name) = limit_name {
                message = message.detail(name, rendered.clone());
            }
            Some(message.build())
        })
    }

    #[track_caller]
    fn between(self, minimum: T, maximum: T, inclusive: bool) -> Result<Self, ValidationError> {
        if !matches!(minimum.partial_cmp(&maximum), Some(Ordering::Less | Ordering::Equal)) {
            return Err(ValidationError::usage(format!(
                "minimum may not be greater than maximum.\nminimum: {}\nmaximum: {}",
                self.core.render(&minimum),
                self.core.render(&maximum)
            ))
            .at(Location::caller()));
        }
        let check = if inclusive { "is_between_closed" } else { "is_between" };
        self.evaluate(check, |core, value| {
            let upper = if inclusive {
                Bound::LessThanOrEqualTo
            } else {
                Bound::LessThan
            };
            if Bound::GreaterThanOrEqualTo.holds(value, &minimum) && upper.holds(value, &maximum) {
                return None;
            }
            let closing = if inclusive { ']' } else { ')' };
            let headline = format!(
                "{} must be in the range [{}, {}{closing}.",
                core.name(),
                core.render(&minimum),
                core.render(&maximum)
            );
            Some(core.message(headline).detail("actual", core.render(value)).build())
        })
    }
}
