//! Validators for concrete value types.
//!
//! [`ObjectValidator`] carries every check; which checks are available for a
//! given `T` is decided by the trait bounds on each `impl` block.

mod comparable;
mod number;
mod object;

pub use number::Number;
pub use object::ObjectValidator;
