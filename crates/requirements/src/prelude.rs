//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use nebula_requirements::prelude::*;
//!
//! let validator = check_if(5, "age")?.is_greater_than(10)?;
//! assert!(validator.has_failed());
//! ```

pub use crate::config::{Configuration, ConfigurationUpdater, EqualityMethod, ExceptionTransformer};
pub use crate::core::Validator;
pub use crate::error::{ErrorKind, ValidationError};
pub use crate::factory::{
    Validators, assume_that, assume_that_option, check_if, check_if_option, require_that, require_that_option,
};
pub use crate::validators::{Number, ObjectValidator};
