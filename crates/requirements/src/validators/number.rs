//! Sign, zero and divisibility checks for primitive numbers.

use std::fmt;

use super::object::ObjectValidator;
use crate::error::ValidationError;

/// A primitive number that can be validated.
///
/// Implemented for every integer and floating-point primitive.
pub trait Number: Copy + PartialOrd + fmt::Debug {
    const ZERO: Self;

    /// Returns `self % divisor`, or `None` if `divisor` is zero.
    fn remainder(self, divisor: Self) -> Option<Self>;

    fn is_nan(self) -> bool {
        false
    }

    fn is_finite(self) -> bool {
        true
    }
}

macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Number for $ty {
                const ZERO: Self = 0;

                fn remainder(self, divisor: Self) -> Option<Self> {
                    // Wrapping keeps MIN % -1 from overflowing.
                    (divisor != 0).then(|| self.wrapping_rem(divisor))
                }
            }
        )*
    };
}

macro_rules! impl_float {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Number for $ty {
                const ZERO: Self = 0.0;

                fn remainder(self, divisor: Self) -> Option<Self> {
                    (divisor != 0.0).then(|| self % divisor)
                }

                fn is_nan(self) -> bool {
                    <$ty>::is_nan(self)
                }

                fn is_finite(self) -> bool {
                    <$ty>::is_finite(self)
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_float!(f32, f64);

impl<T: Number> ObjectValidator<T> {
    /// Ensures that the value is less than zero.
    #[track_caller]
    pub fn is_negative(self) -> Result<Self, ValidationError> {
        self.sign("is_negative", "must be negative", |v| v < T::ZERO)
    }

    /// Ensures that the value is zero or greater. NaN fails.
    #[track_caller]
    pub fn is_not_negative(self) -> Result<Self, ValidationError> {
        self.sign("is_not_negative", "may not be negative", |v| v >= T::ZERO)
    }

    #[track_caller]
    pub fn is_zero(self) -> Result<Self, ValidationError> {
        self.sign("is_zero", "must be zero", |v| v == T::ZERO)
    }

    #[track_caller]
    pub fn is_not_zero(self) -> Result<Self, ValidationError> {
        self.sign("is_not_zero", "may not be zero", |v| v != T::ZERO)
    }

    /// Ensures that the value is greater than zero.
    #[track_caller]
    pub fn is_positive(self) -> Result<Self, ValidationError> {
        self.sign("is_positive", "must be positive", |v| v > T::ZERO)
    }

    /// Ensures that the value is zero or less. NaN fails.
    #[track_caller]
    pub fn is_not_positive(self) -> Result<Self, ValidationError> {
        self.sign("is_not_positive", "may not be positive", |v| v <= T::ZERO)
    }

    /// Ensures that the value is not NaN.
    #[track_caller]
    pub fn is_number(self) -> Result<Self, ValidationError> {
        self.sign("is_number", "must be a number", |v| !v.is_nan())
    }

    /// Ensures that the value is neither infinite nor NaN.
    #[track_caller]
    pub fn is_finite(self) -> Result<Self, ValidationError> {
        self.sign("is_finite", "must be finite", |v| v.is_finite())
    }

    /// Ensures that the value is a multiple of `factor`. Only zero is a
    /// multiple of zero.
    #[track_caller]
    pub fn is_multiple_of(self, factor: T) -> Result<Self, ValidationError> {
        self.multiple(factor, None, true)
    }

    /// Ensures that the value is a multiple of `factor`, naming the factor in
    /// the failure message.
    #[track_caller]
    pub fn is_multiple_of_named(self, factor: T, name: &str) -> Result<Self, ValidationError> {
        self.core.require_name_is_unique(name)?;
        self.multiple(factor, Some(name), true)
    }

    #[track_caller]
    pub fn is_not_multiple_of(self, factor: T) -> Result<Self, ValidationError> {
        self.multiple(factor, None, false)
    }

    #[track_caller]
    pub fn is_not_multiple_of_named(self, factor: T, name: &str) -> Result<Self, ValidationError> {
        self.core.require_name_is_unique(name)?;
        self.multiple(factor, Some(name), false)
    }

    #[track_caller]
    fn sign(self, check: &str, requirement: &str, passes: fn(T) -> bool) -> Result<Self, ValidationError> {
        self.evaluate(check, |core, value| {
            if passes(*value) {
                return None;
            }
            let headline = format!("{} {requirement}.", core.name());
            Some(core.message(headline).detail("actual", core.render(value)).build())
        })
    }

    #[track_caller]
    fn multiple(self, factor: T, factor_name: Option<&str>, want_multiple: bool) -> Result<Self, ValidationError> {
        let check = if want_multiple { "is_multiple_of" } else { "is_not_multiple_of" };
        self.evaluate(check, |core, value| {
            let multiple = match value.remainder(factor) {
                Some(remainder) => remainder == T::ZERO,
                None => *value == T::ZERO,
            };
            if multiple == want_multiple {
                return None;
            }
            let rendered = core.render(&factor);
            let relation = if want_multiple { "must be" } else { "may not be" };
            let headline = format!(
                "{} {relation} a multiple of {}.",
                core.name(),
                factor_name.unwrap_or(&rendered)
            );
            let mut message = core.message(headline).detail("actual", core.render(value));
            if let Some(name) = factor_name {
                message = message.detail(name, rendered.clone());
            }
            Some(message.build())
        })
    }
}
