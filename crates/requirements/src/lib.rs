//! # nebula-requirements
//!
//! Fluent precondition validation for Nebula crates. A chain either fails
//! fast, fails as an assertion, or silently accumulates failures for later
//! inspection.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use nebula_requirements::prelude::*;
//!
//! // Fail fast: the first failed check returns `Err`.
//! require_that(port, "port")?.is_between(1, 65536)?;
//!
//! // Accumulate: checks record failures and the caller decides what to do.
//! let report = check_if(retries, "retries")?.is_not_negative()?.is_less_than(10)?;
//! for message in report.else_get_messages() {
//!     tracing::warn!(%message, "invalid retry policy");
//! }
//! ```
//!
//! ## Families
//!
//! - [`require_that`]: failures are returned as `Err` of kind
//!   `InvalidArgument` or `NullValue`
//! - [`assume_that`]: failures are returned as `Err` of kind `Assertion`
//! - [`check_if`]: failures are recorded and only surface through
//!   [`Validator::else_throw`] and friends
//!
//! ## Configuration
//!
//! Every [`Validators`] factory owns an immutable [`Configuration`]. Changes go
//! through a scoped [`ConfigurationUpdater`] and are published atomically.

// ValidationError carries its failures and location inline; boxing it would
// add an allocation to every failed check.
#![allow(clippy::result_large_err)]

pub mod config;
pub mod core;
pub mod error;
pub mod factory;
pub mod failure;
pub mod prelude;
pub mod validators;

pub use config::{
    Configuration, ConfigurationBuilder, ConfigurationSettings, ConfigurationUpdater, EqualityMethod,
    ExceptionTransformer, MutableStringMappers, StringMapper, StringMappers,
};
pub use self::core::{Context, MessageBuilder, Validator, ValidatorCore};
pub use error::{BoxError, Cause, ErrorKind, ValidationError};
pub use factory::{
    Validators, assume_that, assume_that_option, check_if, check_if_option, default_validators, require_that,
    require_that_option,
};
pub use failure::{ExceptionFactory, Failure};
pub use validators::{Number, ObjectValidator};
