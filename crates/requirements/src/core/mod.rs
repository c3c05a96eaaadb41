//! Validator core: chain state, failure accumulation and the `Validator` trait.
//!
//! Concrete validators embed a [`ValidatorCore`] and implement [`Validator`]
//! by exposing it. Every check follows the same shape:
//!
//! ```rust,ignore
//! #[track_caller]
//! pub fn is_positive(mut self) -> Result<Self, ValidationError> {
//!     if self.core.has_failed() {
//!         self.core.add_not_evaluated("is_positive")?;
//!         return Ok(self);
//!     }
//!     // compare, and on failure:
//!     self.core.add_invalid_argument(message)?;
//!     Ok(self)
//! }
//! ```

mod message;
mod state;
mod validator;

pub use message::MessageBuilder;
pub use state::{Context, ValidatorCore};
pub use validator::Validator;

pub(crate) use state::require_valid_name;
